use grade_mailer_app::ports::report::{BatchEvent, BatchReportPort};

// Prints one status line per processed row to stdout.
pub struct StdoutReportAdapter {
    dry_run: bool,
}

impl StdoutReportAdapter {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    pub fn format_event(&self, event: &BatchEvent) -> String {
        match event {
            BatchEvent::Sent { recipient, .. } if self.dry_run => {
                format!("Dry run: email to {} composed, not sent", recipient)
            }
            BatchEvent::Sent { recipient, .. } => format!("Email sent to {}", recipient),
            BatchEvent::Skipped { row } => format!("Skipping row {}: no email address.", row),
            BatchEvent::Failed {
                recipient, error, ..
            } => format!("Error sending email to {}: {}", recipient, error),
        }
    }
}

impl BatchReportPort for StdoutReportAdapter {
    fn report(&self, event: &BatchEvent) {
        println!("{}", self.format_event(event));
    }
}

#[cfg(test)]
mod tests {
    use grade_mailer_app::ports::email::SendEmailError;

    use super::*;

    #[test]
    fn test_status_lines() {
        let reporter = StdoutReportAdapter::new(false);

        assert_eq!(
            reporter.format_event(&BatchEvent::Sent {
                row: 0,
                recipient: "a@b.com".to_string()
            }),
            "Email sent to a@b.com"
        );
        assert_eq!(
            reporter.format_event(&BatchEvent::Skipped { row: 4 }),
            "Skipping row 4: no email address."
        );
        assert_eq!(
            reporter.format_event(&BatchEvent::Failed {
                row: 2,
                recipient: "c@d.com".to_string(),
                error: SendEmailError::Transport("connection refused".to_string()),
            }),
            "Error sending email to c@d.com: failed to send email: connection refused"
        );
    }

    #[test]
    fn test_dry_run_line() {
        let reporter = StdoutReportAdapter::new(true);
        assert_eq!(
            reporter.format_event(&BatchEvent::Sent {
                row: 0,
                recipient: "a@b.com".to_string()
            }),
            "Dry run: email to a@b.com composed, not sent"
        );
    }
}
