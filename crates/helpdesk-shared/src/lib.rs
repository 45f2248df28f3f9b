use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, TryLockError};

use helpdesk_core::{
    ObserverId, QueueError, QueueEvent, QueueObserver, QueueSnapshot, Ticket, TicketId, TicketQueue,
};
use tracing::warn;

type Observers = Vec<Box<dyn QueueObserver>>;

/// Cloneable handle to one [`TicketQueue`] for callers on several threads.
///
/// Both collections sit behind a single lock and every operation holds it for
/// its whole duration, so a ticket is never observed in both or neither.
///
/// Observers subscribed here run after the lock is released, so they may call
/// back into the handle (e.g. `list_pending` to redraw a board, or `resolve`).
/// Events are queued under the lock and delivered in mutation order; an event
/// raised from inside an observer is delivered once the current one finishes.
#[derive(Clone)]
pub struct SharedTicketQueue {
    inner: Arc<Mutex<TicketQueue>>,
    outbox: Arc<Mutex<VecDeque<QueueEvent>>>,
    observers: Arc<Mutex<Observers>>,
    incoming: Arc<Mutex<Observers>>,
    forwarder: ObserverId,
}

impl SharedTicketQueue {
    pub fn new() -> Self {
        Self::from_queue(TicketQueue::new())
    }

    /// Observers already attached to `queue` keep running under the lock.
    pub fn from_queue(mut queue: TicketQueue) -> Self {
        let outbox = Arc::new(Mutex::new(VecDeque::new()));
        let sink = Arc::clone(&outbox);
        let forwarder = queue.subscribe(Box::new(move |event: &QueueEvent| {
            relock(&sink).push_back(event.clone());
        }));
        Self {
            inner: Arc::new(Mutex::new(queue)),
            outbox,
            observers: Arc::new(Mutex::new(Vec::new())),
            incoming: Arc::new(Mutex::new(Vec::new())),
            forwarder,
        }
    }

    pub fn submit(&self, ticket: Ticket) {
        self.lock().submit(ticket);
        self.dispatch();
    }

    pub fn submit_text(&self, text: impl Into<String>) -> TicketId {
        let id = self.lock().submit_text(text);
        self.dispatch();
        id
    }

    pub fn assist_next(&self) -> Result<Ticket, QueueError> {
        let res = self.lock().assist_next();
        self.dispatch();
        res
    }

    pub fn resolve(&self, index: usize) -> Result<Ticket, QueueError> {
        let res = self.lock().resolve(index).cloned();
        self.dispatch();
        res
    }

    pub fn resolve_id(&self, id: &TicketId) -> Result<Ticket, QueueError> {
        let res = self.lock().resolve_id(id).cloned();
        self.dispatch();
        res
    }

    pub fn peek_next(&self) -> Result<Ticket, QueueError> {
        self.lock().peek_next().cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn count(&self) -> usize {
        self.lock().count()
    }

    pub fn resolved_count(&self) -> usize {
        self.lock().resolved_count()
    }

    pub fn list_pending(&self) -> Vec<Ticket> {
        self.lock().list_pending()
    }

    pub fn list_resolved(&self) -> Vec<Ticket> {
        self.lock().list_resolved()
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        self.lock().snapshot()
    }

    /// Attaches an observer. It sees events from the next delivery on.
    pub fn subscribe(&self, observer: Box<dyn QueueObserver>) {
        relock(&self.incoming).push(observer);
    }

    /// Runs `f` on a snapshot of both lists taken under one lock, for reads
    /// that must agree with each other. The lock is released before `f` runs.
    pub fn with<R>(&self, f: impl FnOnce(&QueueSnapshot) -> R) -> R {
        let snap = self.snapshot();
        f(&snap)
    }

    /// Consumes the handle if it is the last one. Undelivered events are dropped.
    pub fn into_inner(self) -> Result<TicketQueue, Self> {
        let Self {
            inner,
            outbox,
            observers,
            incoming,
            forwarder,
        } = self;
        match Arc::try_unwrap(inner) {
            Ok(mutex) => {
                let mut queue = mutex.into_inner().unwrap_or_else(|e| e.into_inner());
                queue.unsubscribe(forwarder);
                Ok(queue)
            }
            Err(inner) => Err(Self {
                inner,
                outbox,
                observers,
                incoming,
                forwarder,
            }),
        }
    }

    // Delivers queued events with no queue lock held. Whoever holds the
    // observer list drains the outbox; a caller that finds it busy (another
    // thread, or an observer re-entering) leaves its events to the holder,
    // which re-checks the outbox after letting go.
    fn dispatch(&self) {
        loop {
            let mut observers = match self.observers.try_lock() {
                Ok(guard) => guard,
                Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
                Err(TryLockError::WouldBlock) => return,
            };
            observers.append(&mut relock(&self.incoming));
            loop {
                let next = relock(&self.outbox).pop_front();
                let Some(event) = next else { break };
                for observer in observers.iter_mut() {
                    observer.on_change(&event);
                }
            }
            drop(observers);
            let drained = relock(&self.outbox).is_empty();
            if drained {
                return;
            }
        }
    }

    // Each queue operation completes its mutation before anything that can
    // panic, so a poisoned lock still guards a valid queue.
    fn lock(&self) -> MutexGuard<'_, TicketQueue> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            warn!("ticket queue lock poisoned; recovering");
            poisoned.into_inner()
        })
    }
}

impl Default for SharedTicketQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SharedTicketQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedTicketQueue")
            .field("inner", &self.inner)
            .field("queued_events", &relock(&self.outbox).len())
            .finish()
    }
}

fn relock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
