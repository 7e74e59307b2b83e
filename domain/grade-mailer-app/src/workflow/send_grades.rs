use std::sync::Arc;

use log::{debug, info, warn};
use thiserror::Error;

use crate::{
    domain::{
        compose::{MessageTemplate, compose_body, compose_subject, data_columns},
        config::BatchConfig,
        message::EmailMessage,
    },
    ports::{
        email::EmailPort,
        report::{BatchEvent, BatchReportPort},
        table_source::{LoadTableError, TableSourcePort},
    },
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BatchError {
    #[error(transparent)]
    LoadTable(#[from] LoadTableError),
    #[error("The column '{0}' does not exist in the file.")]
    MissingColumn(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub sent: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn record(&mut self, event: &BatchEvent) {
        match event {
            BatchEvent::Sent { .. } => self.sent += 1,
            BatchEvent::Skipped { .. } => self.skipped += 1,
            BatchEvent::Failed { .. } => self.failed += 1,
        }
    }
}

pub trait SendGradesWorkflow {
    fn run(&self, config: &BatchConfig) -> Result<BatchSummary, BatchError>;
}

pub struct SendGradesWorkflowImpl<T: TableSourcePort, E: EmailPort, R: BatchReportPort> {
    table_source: Arc<T>,
    email_port: Arc<E>,
    report_port: Arc<R>,
    template: MessageTemplate,
}

impl<T: TableSourcePort, E: EmailPort, R: BatchReportPort> SendGradesWorkflowImpl<T, E, R> {
    pub fn new(
        table_source: Arc<T>,
        email_port: Arc<E>,
        report_port: Arc<R>,
        template: MessageTemplate,
    ) -> Self {
        Self {
            table_source,
            email_port,
            report_port,
            template,
        }
    }
}

impl<T: TableSourcePort, E: EmailPort, R: BatchReportPort> SendGradesWorkflow
    for SendGradesWorkflowImpl<T, E, R>
{
    fn run(&self, config: &BatchConfig) -> Result<BatchSummary, BatchError> {
        let table = self.table_source.load_table(&config.file_path)?;
        info!(
            "Loaded {} rows from {}",
            table.row_count(),
            config.file_path.display()
        );

        if !table.has_column(&config.email_column) {
            return Err(BatchError::MissingColumn(config.email_column.clone()));
        }

        let columns = data_columns(&table, &config.email_column);
        let subject = compose_subject(&config.course_name);
        let mut summary = BatchSummary::default();

        for row in table.rows() {
            let event = match row.get(&config.email_column) {
                Some(cell) if !cell.is_missing() => {
                    let message = EmailMessage {
                        from: config.credentials.address.clone(),
                        to: cell.to_string().trim().to_string(),
                        subject: subject.clone(),
                        body: compose_body(
                            &row,
                            &columns,
                            config.comments.as_deref(),
                            &self.template,
                        ),
                    };
                    debug!("Sending row {} to {}", row.index(), message.to);

                    match self
                        .email_port
                        .send_email(&config.credentials, &message)
                    {
                        Ok(()) => BatchEvent::Sent {
                            row: row.index(),
                            recipient: message.to,
                        },
                        Err(error) => {
                            warn!("Send failed for row {}: {}", row.index(), error);
                            BatchEvent::Failed {
                                row: row.index(),
                                recipient: message.to,
                                error,
                            }
                        }
                    }
                }
                _ => BatchEvent::Skipped { row: row.index() },
            };

            summary.record(&event);
            self.report_port.report(&event);
        }

        info!(
            "Batch finished: {} sent, {} skipped, {} failed",
            summary.sent, summary.skipped, summary.failed
        );
        Ok(summary)
    }
}
