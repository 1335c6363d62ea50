//! History sanitization for the completion gateway.
//!
//! The completion service enforces strict user/model alternation and the
//! gateway always appends a synthesized user turn after the history, so
//! the history it forwards must not contain two adjacent user turns and
//! must not end with one. The client is not trusted to guarantee this
//! after edits, retries, or interrupted attempts.

use laichat_types::conversation::Role;
use laichat_types::turn::Turn;

/// Enforce role alternation over a turn history.
///
/// Single pass. When two user turns are adjacent the earlier one is
/// dropped (last-user-wins: a later duplicate supersedes an abandoned
/// attempt). A trailing user turn is trimmed afterwards. Pure and total:
/// empty input yields empty output, and sanitizing an already-valid
/// sequence returns it unchanged.
pub fn sanitize_history(history: Vec<Turn>) -> Vec<Turn> {
    let mut out: Vec<Turn> = Vec::with_capacity(history.len());

    for turn in history {
        if turn.role == Role::User
            && out.last().map(|t| t.role) == Some(Role::User)
        {
            out.pop();
        }
        out.push(turn);
    }

    if out.last().map(|t| t.role) == Some(Role::User) {
        out.pop();
    }

    out
}
