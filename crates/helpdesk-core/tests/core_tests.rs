use helpdesk_core::{QueueError, QueueEvent, Ticket, TicketId, TicketQueue};

fn texts(tickets: &[Ticket]) -> Vec<String> {
    tickets.iter().map(|t| t.text.clone()).collect()
}

#[test]
fn test_fifo_order_is_preserved() {
    let mut q = TicketQueue::new();
    let input: Vec<String> = (0..50).map(|i| format!("Student {}", i)).collect();
    for t in &input {
        q.submit_text(t.clone());
    }
    assert_eq!(texts(&q.list_pending()), input);
    for t in &input {
        assert_eq!(&q.assist_next().unwrap().text, t);
    }
    assert!(q.is_empty());
}

#[test]
fn test_submit_on_empty_then_peek() {
    let mut q = TicketQueue::new();
    let t = Ticket::with_id(TicketId::from_str("t1"), "Student A: Help with math homework", 1);
    q.submit(t.clone());
    assert_eq!(q.peek_next(), Ok(&t));
    assert_eq!(q.count(), 1);
}

#[test]
fn test_headless_example_usage() {
    let mut q = TicketQueue::new();
    q.submit_text("Student A: Help with math homework");
    q.submit_text("Student B: Help with science project");
    q.submit_text("Student C: Help with coding assignment");

    assert_eq!(
        texts(&q.list_pending()),
        vec![
            "Student A: Help with math homework",
            "Student B: Help with science project",
            "Student C: Help with coding assignment",
        ]
    );
    assert_eq!(q.peek_next().unwrap().text, "Student A: Help with math homework");
    assert_eq!(q.assist_next().unwrap().text, "Student A: Help with math homework");
    assert_eq!(q.count(), 2);
}

#[test]
fn test_each_ticket_in_exactly_one_collection() {
    let mut q = TicketQueue::new();
    let ids: Vec<TicketId> = (0..6).map(|i| q.submit_text(format!("t{}", i))).collect();
    q.resolve(4).unwrap();
    q.resolve(0).unwrap();
    q.resolve(1).unwrap();

    let pending = q.list_pending();
    let resolved = q.list_resolved();
    assert_eq!(pending.len() + resolved.len(), ids.len());
    for id in &ids {
        let in_pending = pending.iter().any(|t| &t.id == id);
        let in_resolved = resolved.iter().any(|t| &t.id == id);
        assert!(in_pending ^ in_resolved, "ticket {} misplaced", id);
    }
    assert_eq!(texts(&resolved), vec!["t4", "t0", "t2"]);
    assert_eq!(texts(&pending), vec!["t1", "t3", "t5"]);
}

#[test]
fn test_failed_resolve_changes_nothing() {
    let mut q = TicketQueue::new();
    q.submit_text("A");
    let before = q.snapshot();
    let err = q.resolve(7).unwrap_err();
    assert_eq!(err, QueueError::OutOfRange { index: 7, len: 1 });
    assert_eq!(err.to_string(), "ticket index 7 out of range (pending: 1)");
    assert_eq!(q.snapshot(), before);
}

#[test]
fn test_event_serializes_with_tag() {
    let event = QueueEvent::Submitted {
        ticket: Ticket::with_id(TicketId::from_str("t1"), "A", 0),
        pending: 1,
    };
    let v = serde_json::to_value(&event).unwrap();
    assert_eq!(v["event"], "submitted");
    assert_eq!(v["ticket"]["text"], "A");
    assert_eq!(v["pending"], 1);
}
