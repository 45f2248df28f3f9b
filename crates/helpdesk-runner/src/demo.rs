use std::io::Write;

use anyhow::Result;
use helpdesk_core::TicketQueue;

use crate::{Config, ScriptStats, Session};

/// Three students line up; the desk lists, peeks, helps the first and counts.
pub const DEMO_SCRIPT: &str = "\
submit Student A: Help with math homework
submit Student B: Help with science project
submit Student C: Help with coding assignment
list
peek
next
list
count
";

pub fn run_demo<W: Write>(config: Config, out: &mut W) -> Result<ScriptStats> {
    let mut session = Session::new(TicketQueue::new(), config);
    session.run_script(DEMO_SCRIPT.as_bytes(), out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_prints_the_walkthrough() {
        let mut out = Vec::new();
        let stats = run_demo(Config::default(), &mut out).unwrap();
        assert_eq!(stats.commands, 8);
        assert!(stats.notices.is_empty());
        let text = String::from_utf8(out).unwrap();
        let expected = "\
Submitted: Student A: Help with math homework
Submitted: Student B: Help with science project
Submitted: Student C: Help with coding assignment
[0] Student A: Help with math homework
[1] Student B: Help with science project
[2] Student C: Help with coding assignment
Next: Student A: Help with math homework
Assisting: Student A: Help with math homework
[0] Student B: Help with science project
[1] Student C: Help with coding assignment
2
";
        assert_eq!(text, expected);
    }
}
