use helpdesk_core::{QueueSnapshot, Ticket};
use serde::Serialize;

/// Result of applying one command, ready to be rendered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "reply", content = "data", rename_all = "snake_case")]
pub enum Reply {
    Submitted(Ticket),
    Assisted(Ticket),
    Peeked(Ticket),
    Resolved(Ticket),
    Pending(Vec<Ticket>),
    ResolvedList(Vec<Ticket>),
    Count(usize),
    Empty(bool),
    Board(QueueSnapshot),
    Notice(Notice),
}

impl Reply {
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Reply::Notice(n) => Some(n),
            _ => None,
        }
    }
}

/// An expected, recoverable condition reported back to the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    EmptyQueue,
    OutOfRange,
    UnknownTicket,
    EmptyInput,
    TooLong,
}
