//! Slash command parsing and execution for the chat loop.
//!
//! Commands start with `/` and provide in-chat controls for the
//! conversation, error recovery, and file attachments.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Leave the current conversation and start a fresh one.
    New,
    /// Show the transcript of the current conversation.
    History,
    /// Resubmit the last message after a failed turn.
    Retry,
    /// Stage a file to send with the next message.
    Attach(String),
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let arg = parts.get(1).map(|s| s.trim().to_string());

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        "/new" => Some(ChatCommand::New),
        "/history" => Some(ChatCommand::History),
        "/retry" => Some(ChatCommand::Retry),
        "/attach" => {
            if let Some(path) = arg.filter(|a| !a.is_empty()) {
                Some(ChatCommand::Attach(path))
            } else {
                Some(ChatCommand::Unknown("/attach requires a path".to_string()))
            }
        }
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!(
        "  {}    {}",
        style("/help").cyan(),
        "Show this help message"
    );
    println!(
        "  {}   {}",
        style("/clear").cyan(),
        "Clear the screen"
    );
    println!(
        "  {}    {}",
        style("/exit").cyan(),
        "End the chat session"
    );
    println!(
        "  {}     {}",
        style("/new").cyan(),
        "Start a new conversation"
    );
    println!(
        "  {} {}",
        style("/history").cyan(),
        "Show the current transcript"
    );
    println!(
        "  {}   {}",
        style("/retry").cyan(),
        "Resend the last message after an error"
    );
    println!(
        "  {}  {}",
        style("/attach").cyan(),
        "Stage a file for the next message (/attach photo.png)"
    );
    println!();
    println!(
        "  {}",
        style("Ctrl+C cancels a streaming answer, Ctrl+D exits").dim()
    );
    println!();
}
