use anyhow::{Context, Result};
use helpdesk_core::{QueueSnapshot, Ticket};

use crate::reply::Reply;
use crate::OutputFormat;

pub fn render(reply: &Reply, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(reply)),
        OutputFormat::Json => serde_json::to_string(reply).with_context(|| "serialize reply"),
    }
}

pub fn render_text(reply: &Reply) -> String {
    match reply {
        Reply::Submitted(t) => format!("Submitted: {}", t.text),
        Reply::Assisted(t) => format!("Assisting: {}", t.text),
        Reply::Peeked(t) => format!("Next: {}", t.text),
        Reply::Resolved(t) => format!("Resolved: {}", t.text),
        Reply::Pending(list) => numbered(list, "(no pending tickets)"),
        Reply::ResolvedList(list) => numbered(list, "(no resolved tickets)"),
        Reply::Count(n) => n.to_string(),
        Reply::Empty(b) => b.to_string(),
        Reply::Board(snap) => render_board(snap),
        Reply::Notice(n) => n.message.clone(),
    }
}

/// Both lists, pending first, the way the desk page shows them.
pub fn render_board(snap: &QueueSnapshot) -> String {
    let mut s = String::new();
    s.push_str(&format!("Pending ({}):\n", snap.pending.len()));
    for (i, t) in snap.pending.iter().enumerate() {
        s.push_str(&format!("  [{}] {}\n", i, t.text));
    }
    s.push_str(&format!("Resolved ({}):", snap.resolved.len()));
    for t in &snap.resolved {
        s.push_str(&format!("\n  - {}", t.text));
    }
    s
}

fn numbered(list: &[Ticket], empty: &str) -> String {
    if list.is_empty() {
        return empty.to_string();
    }
    list.iter()
        .enumerate()
        .map(|(i, t)| format!("[{}] {}", i, t.text))
        .collect::<Vec<_>>()
        .join("\n")
}
