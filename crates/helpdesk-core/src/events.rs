use serde::Serialize;

use crate::Ticket;

/// Emitted after every successful mutation. Sizes are taken after the change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum QueueEvent {
    Submitted { ticket: Ticket, pending: usize },
    Assisted { ticket: Ticket, pending: usize },
    Resolved { ticket: Ticket, index: usize, pending: usize, resolved: usize },
}

impl QueueEvent {
    pub fn ticket(&self) -> &Ticket {
        match self {
            QueueEvent::Submitted { ticket, .. }
            | QueueEvent::Assisted { ticket, .. }
            | QueueEvent::Resolved { ticket, .. } => ticket,
        }
    }
}

/// Listener attached to a queue from outside, e.g. a renderer that redraws
/// the board. Called synchronously, in subscription order.
pub trait QueueObserver: Send {
    fn on_change(&mut self, event: &QueueEvent);
}

impl<F> QueueObserver for F
where
    F: FnMut(&QueueEvent) + Send,
{
    fn on_change(&mut self, event: &QueueEvent) {
        self(event)
    }
}

/// Handle returned by `subscribe`, used to detach the observer again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(pub u64);
