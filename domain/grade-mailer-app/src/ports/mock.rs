use std::{
    collections::HashSet,
    path::Path,
    sync::{Arc, Mutex},
};

use crate::{
    domain::{
        message::{EmailMessage, SenderCredentials},
        table::Table,
    },
    ports::{
        email::{EmailPort, SendEmailError},
        report::{BatchEvent, BatchReportPort},
        table_source::{LoadTableError, TableSourcePort},
    },
};

pub struct MockTableSource {
    result: Result<Table, LoadTableError>,
}

impl MockTableSource {
    pub fn with_table(table: Table) -> Self {
        Self { result: Ok(table) }
    }

    pub fn with_error(error: LoadTableError) -> Self {
        Self { result: Err(error) }
    }
}

impl TableSourcePort for MockTableSource {
    fn load_table(&self, _path: &Path) -> Result<Table, LoadTableError> {
        self.result.clone()
    }
}

#[derive(Clone, Default)]
pub struct MockEmailPort {
    pub sent: Arc<Mutex<Vec<EmailMessage>>>,
    failing_recipients: HashSet<String>,
}

impl MockEmailPort {
    pub fn failing_for(recipients: &[&str]) -> Self {
        Self {
            sent: Arc::default(),
            failing_recipients: recipients.iter().map(|r| r.to_string()).collect(),
        }
    }

    pub fn attempts(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl EmailPort for MockEmailPort {
    fn send_email(
        &self,
        _credentials: &SenderCredentials,
        message: &EmailMessage,
    ) -> Result<(), SendEmailError> {
        self.sent.lock().unwrap().push(message.clone());
        if self.failing_recipients.contains(&message.to) {
            return Err(SendEmailError::Transport("connection refused".to_string()));
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockReportPort {
    pub events: Arc<Mutex<Vec<BatchEvent>>>,
}

impl MockReportPort {
    pub fn events(&self) -> Vec<BatchEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl BatchReportPort for MockReportPort {
    fn report(&self, event: &BatchEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
