//! Conversation listing CLI command.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use crate::state::AppState;

/// List saved conversations in a colored table, newest first,
/// optionally filtered by a title search term.
pub async fn list_conversations(
    state: &AppState,
    search: Option<String>,
    json: bool,
) -> Result<()> {
    let user_id = state.local_state.ensure_user_id().await?;

    let conversations = match &search {
        Some(term) => {
            state
                .conversations
                .search_conversations(&user_id, term)
                .await
        }
        None => state.conversations.conversations(&user_id).await,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&conversations)?);
        return Ok(());
    }

    if conversations.is_empty() {
        println!();
        match &search {
            Some(term) => println!(
                "  {} No conversations match '{term}'.",
                style("i").blue().bold()
            ),
            None => println!(
                "  {} No conversations yet. Start one with: {}",
                style("i").blue().bold(),
                style("laichat chat").yellow()
            ),
        }
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Title").fg(Color::White),
        Cell::new("Updated").fg(Color::White),
        Cell::new("ID").fg(Color::White),
    ]);

    for conversation in &conversations {
        table.add_row(vec![
            Cell::new(&conversation.title).fg(Color::Cyan),
            Cell::new(format_relative_time(&conversation.updated_at)).fg(Color::White),
            Cell::new(conversation.id.to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} conversation{}",
        style(conversations.len()).bold(),
        if conversations.len() == 1 { "" } else { "s" }
    );
    println!(
        "  {}",
        style("Resume one with: laichat chat --resume <id>").dim()
    );
    println!();

    Ok(())
}

fn format_relative_time(dt: &chrono::DateTime<chrono::Utc>) -> String {
    let now = chrono::Utc::now();
    let diff = now - *dt;

    if diff.num_minutes() < 1 {
        "just now".to_string()
    } else if diff.num_hours() < 1 {
        format!("{}m ago", diff.num_minutes())
    } else if diff.num_days() < 1 {
        format!("{}h ago", diff.num_hours())
    } else if diff.num_days() < 30 {
        format!("{}d ago", diff.num_days())
    } else {
        dt.format("%Y-%m-%d").to_string()
    }
}
