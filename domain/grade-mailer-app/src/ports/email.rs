use thiserror::Error;

use crate::domain::message::{EmailMessage, SenderCredentials};

pub trait EmailPort {
    fn send_email(
        &self,
        credentials: &SenderCredentials,
        message: &EmailMessage,
    ) -> Result<(), SendEmailError>;
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SendEmailError {
    #[error("invalid address '{address}': {message}")]
    InvalidAddress { address: String, message: String },
    #[error("failed to build email: {0}")]
    Build(String),
    #[error("failed to send email: {0}")]
    Transport(String),
}
