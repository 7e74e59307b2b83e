use std::{str::FromStr, time::Duration};

use grade_mailer_app::{
    domain::message::{EmailMessage, SenderCredentials},
    ports::email::{EmailPort, SendEmailError},
};
use lettre::{
    Message, SmtpTransport, Transport,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use log::{debug, info};

pub const DEFAULT_SMTP_HOST: &str = "smtp.office365.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_SMTP_TIMEOUT: Duration = Duration::from_secs(60);

// Mail submission server of the deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct SmtpEndpoint {
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
}

impl Default for SmtpEndpoint {
    fn default() -> Self {
        Self {
            host: DEFAULT_SMTP_HOST.to_string(),
            port: DEFAULT_SMTP_PORT,
            timeout: DEFAULT_SMTP_TIMEOUT,
        }
    }
}

// Sends each message over its own STARTTLS session. The transport is built
// per call and dropped when the call returns.
pub struct LettreEmailAdapter {
    endpoint: SmtpEndpoint,
}

impl LettreEmailAdapter {
    pub fn new(endpoint: SmtpEndpoint) -> Self {
        Self { endpoint }
    }

    fn transport(&self, credentials: &SenderCredentials) -> Result<SmtpTransport, SendEmailError> {
        let transport = SmtpTransport::starttls_relay(&self.endpoint.host)
            .map_err(|e| {
                SendEmailError::Transport(format!("Failed to create SMTP transport: {}", e))
            })?
            .port(self.endpoint.port)
            .timeout(Some(self.endpoint.timeout))
            .credentials(Credentials::new(
                credentials.address.clone(),
                credentials.password.clone(),
            ))
            .build();
        Ok(transport)
    }
}

impl EmailPort for LettreEmailAdapter {
    fn send_email(
        &self,
        credentials: &SenderCredentials,
        message: &EmailMessage,
    ) -> Result<(), SendEmailError> {
        let email = build_message(message)?;
        let transport = self.transport(credentials)?;
        debug!(
            "Submitting message to {} via {}:{}",
            message.to, self.endpoint.host, self.endpoint.port
        );
        transport
            .send(&email)
            .map_err(|e| SendEmailError::Transport(e.to_string()))?;
        Ok(())
    }
}

// Builds the message exactly as it would be sent, but never opens a
// connection.
pub struct DryRunEmailAdapter;

impl EmailPort for DryRunEmailAdapter {
    fn send_email(
        &self,
        _credentials: &SenderCredentials,
        message: &EmailMessage,
    ) -> Result<(), SendEmailError> {
        let email = build_message(message)?;
        info!(
            "Dry run: {} bytes for {}\n{}",
            email.formatted().len(),
            message.to,
            message.body
        );
        Ok(())
    }
}

pub fn build_message(message: &EmailMessage) -> Result<Message, SendEmailError> {
    Message::builder()
        .from(parse_mailbox(&message.from)?)
        .to(parse_mailbox(&message.to)?)
        .subject(message.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(message.body.clone())
        .map_err(|e| SendEmailError::Build(e.to_string()))
}

fn parse_mailbox(address: &str) -> Result<Mailbox, SendEmailError> {
    Mailbox::from_str(address.trim()).map_err(|e| SendEmailError::InvalidAddress {
        address: address.to_string(),
        message: e.to_string(),
    })
}
