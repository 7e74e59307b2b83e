use crate::ports::email::SendEmailError;

#[derive(Debug, Clone, PartialEq)]
pub enum BatchEvent {
    Sent {
        row: usize,
        recipient: String,
    },
    Skipped {
        row: usize,
    },
    Failed {
        row: usize,
        recipient: String,
        error: SendEmailError,
    },
}

pub trait BatchReportPort {
    fn report(&self, event: &BatchEvent);
}
