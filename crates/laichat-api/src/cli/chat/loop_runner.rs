//! Main chat loop orchestration.
//!
//! Coordinates the complete session lifecycle: identity resolution,
//! conversation resume, welcome banner, input loop with streamed
//! responses over the gateway, slash commands, file attachments, and
//! cancellation of in-flight turns.

use std::cell::Cell;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use base64::Engine;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use uuid::Uuid;

use laichat_core::chat::repository::ConversationRepository;
use laichat_core::quote::daily_quote;
use laichat_core::session::{
    CompletionTransport, SessionConfig, SessionController, TurnPhase,
};
use laichat_infra::transport::HttpCompletionTransport;
use laichat_types::conversation::Role;
use laichat_types::error::SessionError;
use laichat_types::turn::FileAttachment;

use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};

/// Run the interactive chat loop against a Laichat gateway.
pub async fn run_chat_loop(
    state: &AppState,
    resume: Option<Uuid>,
    attach: Vec<PathBuf>,
    server: Option<String>,
) -> anyhow::Result<()> {
    let user_id = state.local_state.ensure_user_id().await?;

    let server_url = server.unwrap_or_else(|| {
        format!(
            "http://{}:{}",
            state.config.server.host, state.config.server.port
        )
    });

    let transport = HttpCompletionTransport::new(server_url.clone());
    let mut controller = SessionController::new(
        transport,
        Arc::clone(&state.conversations),
        Some(user_id),
        SessionConfig::default(),
    );

    if let Some(id) = resume {
        let conversation = state
            .conversations
            .repo()
            .get_conversation(&id)
            .await?
            .filter(|c| c.user_id == user_id)
            .ok_or_else(|| anyhow::anyhow!("Conversation '{id}' not found"))?;
        let messages = state.conversations.messages(&conversation.id).await;
        controller.resume(conversation, &messages);
    }

    // The banner quote never hits the network: cached for today, or the
    // catalog entry.
    let settings = state.local_state.settings().await;
    let quote = if settings.show_quote_ticker {
        let today = chrono::Local::now().date_naive();
        Some(match state.local_state.cached_quote(today).await {
            Some(cached) => cached,
            None => daily_quote(),
        })
    } else {
        None
    };

    let conversation_label = controller.conversation().map(|c| c.id.to_string());
    print_welcome_banner(&server_url, conversation_label.as_deref(), quote.as_ref());

    // Replay the transcript when resuming.
    for turn in controller.turns() {
        let label = match turn.role {
            Role::User => style("You >").green().bold(),
            Role::Model => style("Laichat >").cyan().bold(),
        };
        println!("  {} {}", label, turn.text);
        println!();
    }

    // Files staged from --attach flags ride on the first message.
    let mut staged: Vec<FileAttachment> = Vec::new();
    for path in attach {
        match load_attachment(&path).await {
            Ok(file) => {
                println!(
                    "  {} Staged {} for the next message.",
                    style("+").cyan().bold(),
                    style(&file.name).bold()
                );
                staged.push(file);
            }
            Err(e) => {
                eprintln!(
                    "  {} Could not read {}: {e}",
                    style("!").red().bold(),
                    path.display()
                );
            }
        }
    }

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let event = chat_input.read_line().await;
        match event {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!(
                    "\n  {}",
                    style("Press Ctrl+D to exit, or keep chatting.").dim()
                );
                continue;
            }
            InputEvent::Message(text) => {
                if text.is_empty() {
                    continue;
                }

                // Slash commands
                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => {
                            commands::print_help();
                            continue;
                        }
                        ChatCommand::Clear => {
                            chat_input.clear();
                            continue;
                        }
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Session ended.").dim());
                            break;
                        }
                        ChatCommand::New => {
                            controller.reset();
                            println!(
                                "\n  {} Started a new conversation.\n",
                                style("*").cyan().bold()
                            );
                            continue;
                        }
                        ChatCommand::History => {
                            if controller.turns().is_empty() {
                                println!(
                                    "\n  {} No messages yet.\n",
                                    style("i").blue().bold()
                                );
                                continue;
                            }
                            println!();
                            for turn in controller.turns() {
                                let role_label = match turn.role {
                                    Role::User => format!("{}", style("You").green()),
                                    Role::Model => format!("{}", style("Laichat").cyan()),
                                };
                                println!(
                                    "  {} {}",
                                    style(role_label).bold(),
                                    preview(&turn.text)
                                );
                            }
                            println!();
                            continue;
                        }
                        ChatCommand::Retry => {
                            if controller.phase() != TurnPhase::Errored {
                                println!(
                                    "\n  {} Nothing to retry.\n",
                                    style("i").blue().bold()
                                );
                                continue;
                            }
                            let Some(last) = controller.retry_text().map(str::to_string)
                            else {
                                println!(
                                    "\n  {} Nothing to retry.\n",
                                    style("i").blue().bold()
                                );
                                continue;
                            };
                            run_turn(&mut controller, &mut chat_input, last, Vec::new())
                                .await;
                            continue;
                        }
                        ChatCommand::Attach(path) => {
                            match load_attachment(Path::new(&path)).await {
                                Ok(file) => {
                                    println!(
                                        "\n  {} Staged {} for the next message.\n",
                                        style("+").cyan().bold(),
                                        style(&file.name).bold()
                                    );
                                    staged.push(file);
                                }
                                Err(e) => {
                                    eprintln!(
                                        "\n  {} Could not read {path}: {e}\n",
                                        style("!").red().bold()
                                    );
                                }
                            }
                            continue;
                        }
                        ChatCommand::Unknown(cmd_name) => {
                            println!(
                                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                                style("?").yellow().bold(),
                                style(cmd_name).dim()
                            );
                            continue;
                        }
                    }
                }

                let files = std::mem::take(&mut staged);
                run_turn(&mut controller, &mut chat_input, text, files).await;
            }
        }
    }

    Ok(())
}

/// Drive one turn to completion: spinner, streamed tokens, Ctrl+C
/// cancellation, and the error affordance.
async fn run_turn<T, R>(
    controller: &mut SessionController<T, R>,
    chat_input: &mut ChatInput,
    text: String,
    files: Vec<FileAttachment>,
) where
    T: CompletionTransport,
    R: ConversationRepository + Send + Sync + 'static,
{
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    chat_input.suspend_prompt();
    let cancel = controller.cancel_token();
    let start_time = Instant::now();

    // Shared with the delta closure while the submit future is pinned.
    let first_token = Cell::new(false);

    let submit = controller.submit(text, files, |delta| {
        if !first_token.get() {
            spinner.finish_and_clear();
            first_token.set(true);
            print!("\n  {} ", style("Laichat >").cyan().bold());
        }
        print!("{delta}");
        let _ = std::io::stdout().flush();
    });
    tokio::pin!(submit);

    // Keep the reader polled while the turn streams so Ctrl+C cancels
    // it in real time. Lines submitted mid-stream are discarded.
    let result = loop {
        tokio::select! {
            result = &mut submit => break result,
            event = chat_input.read_line() => match event {
                InputEvent::Interrupted | InputEvent::Eof => cancel.cancel(),
                InputEvent::Message(_) => {}
            },
        }
    };

    if !first_token.get() {
        spinner.finish_and_clear();
    }
    chat_input.restore_prompt();

    match result {
        Ok(()) => {
            println!();
            println!(
                "  {}",
                style(format!("({:.1}s)", start_time.elapsed().as_secs_f32())).dim()
            );
            println!();
        }
        Err(SessionError::Cancelled) => {
            println!("\n  {}\n", style("Cancelled.").dim());
        }
        Err(err) => {
            eprintln!("\n  {} {}", style("!").red().bold(), err.localized_message());
            eprintln!(
                "  {}",
                style("Type /retry to try again, /exit to quit.").dim()
            );
            println!();
        }
    }
}

// --- Attachment helpers ---

/// Read a file from disk into an inline attachment.
async fn load_attachment(path: &Path) -> anyhow::Result<FileAttachment> {
    let bytes = tokio::fs::read(path).await?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("attachment")
        .to_string();
    Ok(FileAttachment {
        name,
        mime_type: Some(mime_for(path).to_string()),
        data: Some(base64::engine::general_purpose::STANDARD.encode(&bytes)),
    })
}

/// Guess a MIME type from the file extension.
fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        Some("txt") | Some("md") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// One-line preview of a turn for the /history listing.
fn preview(text: &str) -> String {
    const MAX_CHARS: usize = 100;
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > MAX_CHARS {
        let cut: String = flat.chars().take(MAX_CHARS - 3).collect();
        format!("{cut}...")
    } else {
        flat
    }
}
