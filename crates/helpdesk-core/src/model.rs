use serde::{Deserialize, Serialize};

use crate::TicketId;

/// A single help request. Immutable once submitted; the queue only ever
/// moves tickets between its pending and resolved collections.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub text: String,
    pub submitted_at_unix: i64,
}

impl Ticket {
    /// Builds a ticket with a fresh id stamped with the current time.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: TicketId::new(),
            text: text.into(),
            submitted_at_unix: now_unix(),
        }
    }

    pub fn with_id(id: TicketId, text: impl Into<String>, submitted_at_unix: i64) -> Self {
        Self {
            id,
            text: text.into(),
            submitted_at_unix,
        }
    }
}

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

pub fn now_unix() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ticket_gets_id_and_timestamp() {
        let t = Ticket::new("Student A: Help with math homework");
        assert!(!t.id.as_str().is_empty());
        assert!(t.submitted_at_unix > 0);
        assert_eq!(t.to_string(), "Student A: Help with math homework");
    }

    #[test]
    fn serializes_id_as_plain_string() {
        let t = Ticket::with_id(TicketId::from_str("t1"), "hello", 42);
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v["id"], "t1");
        assert_eq!(v["text"], "hello");
        assert_eq!(v["submitted_at_unix"], 42);
    }
}
