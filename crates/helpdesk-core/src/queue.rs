use std::collections::VecDeque;

use tracing::debug;

use crate::{ObserverId, QueueError, QueueEvent, QueueObserver, QueueSnapshot, Ticket, TicketId};

/// FIFO queue of pending tickets plus an append-only record of resolved ones.
///
/// A submitted ticket lives in exactly one of the two collections until it is
/// handed back to the caller by [`TicketQueue::assist_next`]. Read operations
/// return owned copies so callers cannot reach the backing storage.
#[derive(Default)]
pub struct TicketQueue {
    pending: VecDeque<Ticket>,
    resolved: Vec<Ticket>,
    observers: Vec<(ObserverId, Box<dyn QueueObserver>)>,
    next_observer: u64,
}

impl TicketQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a ticket to the back of the pending queue.
    pub fn submit(&mut self, ticket: Ticket) {
        debug!(ticket_id = %ticket.id, "submit");
        self.pending.push_back(ticket);
        let pending = self.pending.len();
        self.notify(|q| QueueEvent::Submitted {
            ticket: q.pending[pending - 1].clone(),
            pending,
        });
    }

    pub fn submit_text(&mut self, text: impl Into<String>) -> TicketId {
        let ticket = Ticket::new(text);
        let id = ticket.id.clone();
        self.submit(ticket);
        id
    }

    /// Removes and returns the earliest pending ticket. The resolved
    /// collection is not touched; ownership passes to the caller.
    pub fn assist_next(&mut self) -> Result<Ticket, QueueError> {
        let ticket = self.pending.pop_front().ok_or(QueueError::EmptyQueue)?;
        debug!(ticket_id = %ticket.id, remaining = self.pending.len(), "assist next");
        let pending = self.pending.len();
        self.notify(|_| QueueEvent::Assisted {
            ticket: ticket.clone(),
            pending,
        });
        Ok(ticket)
    }

    /// Moves the pending ticket at `index` (zero-based, not necessarily the
    /// front) to the end of the resolved collection.
    pub fn resolve(&mut self, index: usize) -> Result<&Ticket, QueueError> {
        let len = self.pending.len();
        let ticket = self
            .pending
            .remove(index)
            .ok_or(QueueError::OutOfRange { index, len })?;
        debug!(ticket_id = %ticket.id, index, "resolve");
        self.resolved.push(ticket);
        let (pending, resolved) = (self.pending.len(), self.resolved.len());
        self.notify(|q| QueueEvent::Resolved {
            ticket: q.resolved[resolved - 1].clone(),
            index,
            pending,
            resolved,
        });
        Ok(&self.resolved[self.resolved.len() - 1])
    }

    pub fn resolve_id(&mut self, id: &TicketId) -> Result<&Ticket, QueueError> {
        let index = self
            .position(id)
            .ok_or_else(|| QueueError::UnknownTicket(id.clone()))?;
        self.resolve(index)
    }

    pub fn peek_next(&self) -> Result<&Ticket, QueueError> {
        self.pending.front().ok_or(QueueError::EmptyQueue)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of pending tickets. Resolved tickets are not counted.
    pub fn count(&self) -> usize {
        self.pending.len()
    }

    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }

    pub fn position(&self, id: &TicketId) -> Option<usize> {
        self.pending.iter().position(|t| &t.id == id)
    }

    pub fn list_pending(&self) -> Vec<Ticket> {
        self.pending.iter().cloned().collect()
    }

    pub fn list_resolved(&self) -> Vec<Ticket> {
        self.resolved.clone()
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            pending: self.list_pending(),
            resolved: self.list_resolved(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn QueueObserver>) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, observer));
        id
    }

    /// Detaches an observer. Returns false if it was not attached.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn notify(&mut self, make: impl FnOnce(&Self) -> QueueEvent) {
        if self.observers.is_empty() {
            return;
        }
        let event = make(self);
        for (_, observer) in self.observers.iter_mut() {
            observer.on_change(&event);
        }
    }
}

impl std::fmt::Debug for TicketQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketQueue")
            .field("pending", &self.pending)
            .field("resolved", &self.resolved)
            .field("observers", &self.observers.len())
            .finish()
    }
}
