use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use helpdesk_core::{ObserverId, QueueError, QueueEvent, QueueObserver, Ticket, TicketQueue};
use tracing::{info, warn};

use crate::command::{parse_line, DeskCommand};
use crate::intake::{validate_ticket_text, IntakeError};
use crate::render::render;
use crate::reply::{Notice, NoticeKind, Reply};
use crate::Config;

/// Logs every queue mutation.
pub struct TracingObserver {
    desk: String,
}

impl TracingObserver {
    pub fn new(desk: impl Into<String>) -> Self {
        Self { desk: desk.into() }
    }
}

impl QueueObserver for TracingObserver {
    fn on_change(&mut self, event: &QueueEvent) {
        match event {
            QueueEvent::Submitted { ticket, pending } => {
                info!(desk = %self.desk, ticket_id = %ticket.id, pending, "ticket submitted")
            }
            QueueEvent::Assisted { ticket, pending } => {
                info!(desk = %self.desk, ticket_id = %ticket.id, pending, "ticket assisted")
            }
            QueueEvent::Resolved { ticket, index, pending, resolved } => {
                info!(desk = %self.desk, ticket_id = %ticket.id, index, pending, resolved, "ticket resolved")
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptStats {
    pub commands: usize,
    /// Kind of every notice raised, in order.
    pub notices: Vec<NoticeKind>,
    pub parse_errors: usize,
}

/// Headless driver around a caller-owned queue.
#[derive(Debug)]
pub struct Session {
    queue: TicketQueue,
    config: Config,
    logger: ObserverId,
}

impl Session {
    pub fn new(mut queue: TicketQueue, config: Config) -> Self {
        let logger = queue.subscribe(Box::new(TracingObserver::new(config.desk.name.clone())));
        Self { queue, config, logger }
    }

    pub fn queue(&self) -> &TicketQueue {
        &self.queue
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Hands the queue back without the session's logging observer.
    pub fn into_queue(mut self) -> TicketQueue {
        self.queue.unsubscribe(self.logger);
        self.queue
    }

    pub fn apply(&mut self, cmd: DeskCommand) -> Reply {
        match cmd {
            DeskCommand::Submit(raw) => match validate_ticket_text(&raw, self.config.desk.max_ticket_len) {
                Ok(text) => {
                    let ticket = Ticket::new(text);
                    self.queue.submit(ticket.clone());
                    Reply::Submitted(ticket)
                }
                Err(e) => self.intake_notice(e),
            },
            DeskCommand::Next => match self.queue.assist_next() {
                Ok(t) => Reply::Assisted(t),
                Err(e) => self.queue_notice(e, &self.config.desk.empty_queue_message),
            },
            DeskCommand::Peek => match self.queue.peek_next().cloned() {
                Ok(t) => Reply::Peeked(t),
                Err(e) => self.queue_notice(e, &self.config.desk.empty_peek_message),
            },
            DeskCommand::Resolve(index) => match self.queue.resolve(index).cloned() {
                Ok(t) => Reply::Resolved(t),
                Err(e) => self.queue_notice(e, &self.config.desk.empty_queue_message),
            },
            DeskCommand::List => Reply::Pending(self.queue.list_pending()),
            DeskCommand::Resolved => Reply::ResolvedList(self.queue.list_resolved()),
            DeskCommand::Count => Reply::Count(self.queue.count()),
            DeskCommand::Empty => Reply::Empty(self.queue.is_empty()),
            DeskCommand::Board => Reply::Board(self.queue.snapshot()),
        }
    }

    /// Applies each line of `input`, writing rendered replies to `out`. Bad
    /// lines are reported inline and skipped.
    pub fn run_script<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<ScriptStats> {
        let mut stats = ScriptStats::default();
        for (n, line) in input.lines().enumerate() {
            let line = line.with_context(|| format!("read line {}", n + 1))?;
            let cmd = match parse_line(&line) {
                Ok(Some(cmd)) => cmd,
                Ok(None) => continue,
                Err(e) => {
                    warn!(line = n + 1, error = %e, "skipping bad command");
                    writeln!(out, "error: line {}: {}", n + 1, e)?;
                    stats.parse_errors += 1;
                    continue;
                }
            };
            self.step(cmd, out, &mut stats)?;
        }
        Ok(stats)
    }

    /// Applies one command and writes its rendering, plus the board when
    /// configured and the command changed the queue.
    pub fn step<W: Write>(&mut self, cmd: DeskCommand, out: &mut W, stats: &mut ScriptStats) -> Result<Reply> {
        let mutating = cmd.is_mutating();
        let reply = self.apply(cmd);
        stats.commands += 1;
        if let Some(notice) = reply.notice() {
            stats.notices.push(notice.kind);
        }
        let format = self.config.output.format;
        writeln!(out, "{}", render(&reply, format)?)?;
        if mutating && reply.notice().is_none() && self.config.output.board_after_change {
            writeln!(out, "{}", render(&Reply::Board(self.queue.snapshot()), format)?)?;
        }
        out.flush()?;
        Ok(reply)
    }

    fn queue_notice(&self, err: QueueError, empty_message: &str) -> Reply {
        let (kind, message) = match &err {
            QueueError::EmptyQueue => (NoticeKind::EmptyQueue, empty_message.to_string()),
            QueueError::OutOfRange { .. } if self.queue.is_empty() => {
                (NoticeKind::OutOfRange, empty_message.to_string())
            }
            QueueError::OutOfRange { .. } => (NoticeKind::OutOfRange, format!("No such ticket: {}", err)),
            QueueError::UnknownTicket(_) => (NoticeKind::UnknownTicket, err.to_string()),
        };
        Reply::Notice(Notice { kind, message })
    }

    fn intake_notice(&self, err: IntakeError) -> Reply {
        let (kind, message) = match &err {
            IntakeError::EmptyInput => (NoticeKind::EmptyInput, self.config.desk.empty_input_message.clone()),
            IntakeError::TooLong { .. } => (NoticeKind::TooLong, format!("Ticket rejected: {}", err)),
        };
        Reply::Notice(Notice { kind, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(TicketQueue::new(), Config::default())
    }

    fn notice_kind(reply: &Reply) -> Option<NoticeKind> {
        reply.notice().map(|n| n.kind)
    }

    #[test]
    fn submit_validates_before_queueing() {
        let mut s = session();
        let reply = s.apply(DeskCommand::Submit("   ".to_string()));
        assert_eq!(notice_kind(&reply), Some(NoticeKind::EmptyInput));
        assert_eq!(reply.notice().unwrap().message, "Please enter a ticket.");
        assert!(s.queue().is_empty());

        match s.apply(DeskCommand::Submit("  Student A  ".to_string())) {
            Reply::Submitted(t) => assert_eq!(t.text, "Student A"),
            other => panic!("unexpected reply {:?}", other),
        }
        assert_eq!(s.queue().count(), 1);
    }

    #[test]
    fn empty_queue_uses_configured_messages() {
        let mut s = session();
        let next = s.apply(DeskCommand::Next);
        assert_eq!(next.notice().unwrap().message, "No students in line for help.");
        let peek = s.apply(DeskCommand::Peek);
        assert_eq!(peek.notice().unwrap().message, "No students in line.");
        assert_eq!(notice_kind(&peek), Some(NoticeKind::EmptyQueue));
    }

    #[test]
    fn resolve_out_of_range_is_a_notice() {
        let mut s = session();
        s.apply(DeskCommand::Submit("A".to_string()));
        let reply = s.apply(DeskCommand::Resolve(3));
        assert_eq!(notice_kind(&reply), Some(NoticeKind::OutOfRange));
        assert_eq!(reply.notice().unwrap().message, "No such ticket: ticket index 3 out of range (pending: 1)");
        assert_eq!(s.queue().count(), 1);
    }

    #[test]
    fn length_limit_from_config() {
        let mut cfg = Config::default();
        cfg.desk.max_ticket_len = Some(5);
        let mut s = Session::new(TicketQueue::new(), cfg);
        let reply = s.apply(DeskCommand::Submit("way too long".to_string()));
        assert_eq!(notice_kind(&reply), Some(NoticeKind::TooLong));
        assert!(s.queue().is_empty());
    }

    #[test]
    fn run_script_reports_bad_lines_and_continues() {
        let mut s = session();
        let script = "submit A\nfly away\nsubmit B\nresolve 1\ncount\n";
        let mut out = Vec::new();
        let stats = s.run_script(script.as_bytes(), &mut out).unwrap();
        assert_eq!(stats, ScriptStats { commands: 4, notices: vec![], parse_errors: 1 });
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("error: line 2: unknown command `fly`"));
        assert!(text.ends_with("1\n"));
        assert_eq!(s.queue().resolved_count(), 1);
    }

    #[test]
    fn board_after_change_renders_both_lists() {
        let mut cfg = Config::default();
        cfg.output.board_after_change = true;
        let mut s = Session::new(TicketQueue::new(), cfg);
        let mut out = Vec::new();
        s.run_script("submit A\npeek\n".as_bytes(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Pending (").count(), 1);
        assert!(text.contains("Resolved (0)"));
    }

    #[test]
    fn session_uses_injected_queue() {
        let mut q = TicketQueue::new();
        q.submit_text("already waiting");
        let mut s = Session::new(q, Config::default());
        assert_eq!(s.apply(DeskCommand::Count), Reply::Count(1));
        let q = s.into_queue();
        assert_eq!(q.peek_next().unwrap().text, "already waiting");
    }

    #[test]
    fn handing_the_queue_on_does_not_stack_loggers() {
        let first = session();
        assert_eq!(first.queue().observer_count(), 1);
        let q = first.into_queue();
        assert_eq!(q.observer_count(), 0);

        let second = Session::new(q, Config::default());
        assert_eq!(second.queue().observer_count(), 1);
        assert_eq!(second.into_queue().observer_count(), 0);
    }

    #[test]
    fn stats_record_notice_kinds_in_order() {
        let mut s = session();
        let mut out = Vec::new();
        let stats = s.run_script("next
submit
resolve 4
".as_bytes(), &mut out).unwrap();
        assert_eq!(
            stats.notices,
            vec![NoticeKind::EmptyQueue, NoticeKind::EmptyInput, NoticeKind::OutOfRange]
        );
    }
}
