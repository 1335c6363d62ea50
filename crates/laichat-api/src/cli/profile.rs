//! Profile and client settings CLI command.
//!
//! With no flags, runs an interactive wizard seeded with the current
//! values. Flags make it one-shot for scripting; `--ticker` toggles the
//! daily-quote banner without touching the profile record.

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input};
use uuid::Uuid;

use laichat_types::client::ClientSettings;
use laichat_types::profile::UserProfile;

use crate::state::AppState;

/// View or update the local profile and client settings.
pub async fn manage_profile(
    state: &AppState,
    name: Option<String>,
    avatar: Option<String>,
    ticker: Option<bool>,
    json: bool,
) -> Result<()> {
    let user_id = state.local_state.ensure_user_id().await?;
    let current = state.profiles.profile(&user_id).await?;
    let settings = state.local_state.settings().await;

    let flags_given = name.is_some() || avatar.is_some() || ticker.is_some();

    if !flags_given && !json {
        return run_wizard(state, user_id, current, settings).await;
    }

    if name.is_some() || avatar.is_some() {
        let merged_name =
            name.or_else(|| current.as_ref().and_then(|p| p.display_name.clone()));
        let merged_avatar =
            avatar.or_else(|| current.as_ref().and_then(|p| p.avatar_url.clone()));
        state
            .profiles
            .upsert(user_id, merged_name, merged_avatar)
            .await?;
    }
    if let Some(show) = ticker {
        let mut updated = state.local_state.settings().await;
        updated.show_quote_ticker = show;
        state.local_state.update_settings(updated).await?;
    }

    let profile = state.profiles.profile(&user_id).await?;
    let settings = state.local_state.settings().await;
    render(profile.as_ref(), &settings, json)
}

/// Interactive wizard seeded with the stored values.
async fn run_wizard(
    state: &AppState,
    user_id: Uuid,
    current: Option<UserProfile>,
    settings: ClientSettings,
) -> Result<()> {
    let current_name = current
        .as_ref()
        .and_then(|p| p.display_name.clone())
        .unwrap_or_default();
    let current_avatar = current
        .as_ref()
        .and_then(|p| p.avatar_url.clone())
        .unwrap_or_default();

    let name = Input::<String>::new()
        .with_prompt("Display name")
        .default(current_name)
        .interact_text()?;

    let avatar = Input::<String>::new()
        .with_prompt("Avatar URL")
        .default(current_avatar)
        .interact_text()?;

    let show_ticker = Confirm::new()
        .with_prompt("Show the daily quote in the chat banner?")
        .default(settings.show_quote_ticker)
        .interact()?;

    let display_name = Some(name.trim().to_string()).filter(|s| !s.is_empty());
    let avatar_url = Some(avatar.trim().to_string()).filter(|s| !s.is_empty());

    let profile = state
        .profiles
        .upsert(user_id, display_name, avatar_url)
        .await?;

    let mut updated = settings;
    updated.show_quote_ticker = show_ticker;
    state.local_state.update_settings(updated).await?;

    println!();
    println!("  {} Profile saved.", style("✓").green().bold());
    println!();
    println!(
        "  {}    {}",
        style("Name:").bold(),
        profile.display_name.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  {}  {}",
        style("Avatar:").bold(),
        profile.avatar_url.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  {}   {}",
        style("Quote:").bold(),
        if show_ticker {
            "shown in the chat banner"
        } else {
            "hidden"
        }
    );
    println!();

    Ok(())
}

fn render(profile: Option<&UserProfile>, settings: &ClientSettings, json: bool) -> Result<()> {
    if json {
        let body = serde_json::json!({
            "profile": profile,
            "settings": settings,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let not_set = format!("{}", style("(not set)").dim());
    let name = profile
        .and_then(|p| p.display_name.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| not_set.clone());
    let avatar = profile
        .and_then(|p| p.avatar_url.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| not_set.clone());

    println!();
    println!("  {}", style("Profile").bold());
    println!();
    println!("  {}    {}", style("Name:").bold(), name);
    println!("  {}  {}", style("Avatar:").bold(), avatar);
    println!(
        "  {}   {}",
        style("Quote:").bold(),
        if settings.show_quote_ticker {
            format!("{}", style("on").green())
        } else {
            format!("{}", style("off").yellow())
        }
    );
    println!();

    Ok(())
}
