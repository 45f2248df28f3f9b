use thiserror::Error;

/// Raised before the queue is ever called; the queue accepts any text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IntakeError {
    #[error("ticket text is empty")]
    EmptyInput,
    #[error("ticket text is {len} characters; limit is {max}")]
    TooLong { len: usize, max: usize },
}

/// Trims raw input and rejects blank or over-long text.
pub fn validate_ticket_text(raw: &str, max_len: Option<usize>) -> Result<String, IntakeError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(IntakeError::EmptyInput);
    }
    if let Some(max) = max_len {
        let len = text.chars().count();
        if len > max {
            return Err(IntakeError::TooLong { len, max });
        }
    }
    Ok(text.to_string())
}
