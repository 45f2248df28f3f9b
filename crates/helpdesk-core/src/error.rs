use thiserror::Error;

use crate::TicketId;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    #[error("no tickets waiting")]
    EmptyQueue,
    #[error("ticket index {index} out of range (pending: {len})")]
    OutOfRange { index: usize, len: usize },
    #[error("ticket {0} is not pending")]
    UnknownTicket(TicketId),
}
