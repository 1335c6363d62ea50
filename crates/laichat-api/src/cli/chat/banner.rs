//! Welcome banner display for chat sessions.
//!
//! Prints a styled banner when a chat session starts, showing the
//! gateway address, the conversation being resumed (or "new"), and the
//! quote of the day when the ticker setting is on.

use console::style;
use laichat_types::quote::Quote;

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(server_url: &str, conversation_id: Option<&str>, quote: Option<&Quote>) {
    println!();
    println!("  {}", style("Laichat").cyan().bold());
    println!(
        "  {}",
        style("Chat in Lai Hakha with an AI companion").dim()
    );
    println!();
    println!(
        "  {}        {}",
        style("Server:").bold(),
        style(server_url).dim()
    );
    let conversation = match conversation_id {
        Some(id) => &id[..8.min(id.len())],
        None => "new",
    };
    println!(
        "  {}  {}",
        style("Conversation:").bold(),
        style(conversation).dim()
    );

    if let Some(quote) = quote {
        println!();
        println!("  {}", style(format!("\"{}\"", quote.translation)).cyan());
        println!("  {}", style(&quote.text).dim());
        println!("  {}", style(format!("- {}", quote.author)).dim());
    }

    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
