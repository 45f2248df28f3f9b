use serde::{Deserialize, Serialize};

use crate::Ticket;

/// Owned copy of both collections, taken at one point in time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSnapshot {
    pub pending: Vec<Ticket>,
    pub resolved: Vec<Ticket>,
}

impl QueueSnapshot {
    pub fn pending_texts(&self) -> Vec<&str> {
        self.pending.iter().map(|t| t.text.as_str()).collect()
    }

    pub fn resolved_texts(&self) -> Vec<&str> {
        self.resolved.iter().map(|t| t.text.as_str()).collect()
    }
}
