//! Daily quote CLI command.
//!
//! Same policy as the web client's ticker: one generated quote per day,
//! cached in the local state file, with the deterministic catalog as the
//! fallback whenever generation is unavailable or fails.

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use laichat_core::quote::{daily_quote, QuoteGenerator};
use laichat_types::quote::Quote;

use crate::state::AppState;

/// Show the quote of the day, generating a fresh one when asked.
pub async fn show_quote(state: &AppState, regenerate: bool, json: bool) -> Result<()> {
    let today = chrono::Local::now().date_naive();

    if !regenerate {
        if let Some(cached) = state.local_state.cached_quote(today).await {
            return render(&cached, json);
        }
    }

    let quote = match state.provider.clone() {
        Some(provider) => {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.cyan} {msg}")
                    .unwrap(),
            );
            spinner.set_message("Asking the AI for a fresh quote...");
            spinner.enable_steady_tick(std::time::Duration::from_millis(80));

            let generated = QuoteGenerator::new(provider).generate().await;
            spinner.finish_and_clear();

            match generated {
                Ok(quote) => {
                    // Cache failures are non-fatal.
                    if let Err(e) = state.local_state.cache_quote(today, &quote).await {
                        tracing::warn!(error = %e, "failed to cache the generated quote");
                    }
                    quote
                }
                Err(e) => {
                    if !json {
                        eprintln!(
                            "  {} Generation failed ({e}), falling back to the catalog.",
                            style("!").yellow().bold()
                        );
                    }
                    daily_quote()
                }
            }
        }
        None => {
            if regenerate && !json {
                eprintln!(
                    "  {} No GEMINI_API_KEY set; showing the catalog quote instead.",
                    style("!").yellow().bold()
                );
            }
            daily_quote()
        }
    };

    render(&quote, json)
}

fn render(quote: &Quote, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(quote)?);
        return Ok(());
    }

    println!();
    println!("  {}", style("Quote of the day").bold());
    println!();
    println!("  {}", style(format!("\"{}\"", quote.translation)).cyan());
    println!("  {}", style(&quote.text).dim());
    println!("  {}", style(format!("- {}", quote.author)).dim());
    println!();
    Ok(())
}
