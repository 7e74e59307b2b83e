use std::{path::PathBuf, time::Duration};

use clap::Parser;
use grade_mailer_app::domain::{
    compose::{DEFAULT_SIGNATURE, MessageTemplate},
    config::{BatchConfig, InvalidConfiguration},
    message::SenderCredentials,
};
use grade_mailer_email_lettre::{
    DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT, DEFAULT_SMTP_TIMEOUT, SmtpEndpoint,
};

/// Automatically send emails with available data.
#[derive(Parser, Debug)]
#[command(name = "grade-mailer", version)]
pub struct Args {
    /// Path to the file containing the data (.csv, .xlsx or .xls)
    #[arg(long = "file_path", visible_alias = "file-path")]
    pub file_path: PathBuf,

    /// Name of the column containing email addresses
    #[arg(long = "email_column", visible_alias = "email-column")]
    pub email_column: String,

    /// Email address to send messages from
    #[arg(long = "sender_email", visible_alias = "sender-email")]
    pub sender_email: String,

    /// Password for the sender account (use an app password)
    #[arg(
        long = "sender_password",
        visible_alias = "sender-password",
        env = "GRADE_MAILER_SENDER_PASSWORD",
        hide_env_values = true
    )]
    pub sender_password: String,

    /// The name of your course
    #[arg(long = "course_name", visible_alias = "course-name")]
    pub course_name: String,

    /// Comments appended to every email
    #[arg(long)]
    pub comments: Option<String>,

    /// Closing signature; "\n" starts a new line
    #[arg(long, env = "GRADE_MAILER_SIGNATURE")]
    pub signature: Option<String>,

    #[arg(
        long = "smtp_host",
        visible_alias = "smtp-host",
        env = "GRADE_MAILER_SMTP_HOST",
        default_value = DEFAULT_SMTP_HOST
    )]
    pub smtp_host: String,

    #[arg(
        long = "smtp_port",
        visible_alias = "smtp-port",
        env = "GRADE_MAILER_SMTP_PORT",
        default_value_t = DEFAULT_SMTP_PORT
    )]
    pub smtp_port: u16,

    #[arg(
        long = "smtp_timeout_secs",
        visible_alias = "smtp-timeout-secs",
        env = "GRADE_MAILER_SMTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_SMTP_TIMEOUT.as_secs()
    )]
    pub smtp_timeout_secs: u64,

    /// Compose and report every message without sending anything
    #[arg(long = "dry-run", visible_alias = "dry_run")]
    pub dry_run: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn batch_config(&self) -> Result<BatchConfig, InvalidConfiguration> {
        BatchConfig::new(
            self.file_path.clone(),
            self.email_column.clone(),
            SenderCredentials::new(self.sender_email.clone(), self.sender_password.clone()),
            self.course_name.clone(),
            self.comments.clone(),
        )
    }

    pub fn smtp_endpoint(&self) -> SmtpEndpoint {
        SmtpEndpoint {
            host: self.smtp_host.clone(),
            port: self.smtp_port,
            timeout: Duration::from_secs(self.smtp_timeout_secs),
        }
    }

    pub fn message_template(&self) -> MessageTemplate {
        let signature = self
            .signature
            .as_deref()
            .map(|s| s.replace("\\n", "\n"))
            .unwrap_or_else(|| DEFAULT_SIGNATURE.to_string());
        MessageTemplate::with_signature(signature)
    }
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    const REQUIRED: &[&str] = &[
        "grade-mailer",
        "--file_path",
        "grades.csv",
        "--email_column",
        "email",
        "--sender_email",
        "prof@uni.edu",
        "--sender_password",
        "secret",
        "--course_name",
        "CS101",
    ];

    fn parse(extra: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(REQUIRED.iter().chain(extra).copied())
    }

    #[test]
    fn test_required_arguments() {
        let args = parse(&[]).unwrap();
        let config = args.batch_config().unwrap();

        assert_eq!(config.file_path, PathBuf::from("grades.csv"));
        assert_eq!(config.email_column, "email");
        assert_eq!(config.credentials.address, "prof@uni.edu");
        assert_eq!(config.course_name, "CS101");
        assert_eq!(config.comments, None);
        assert!(!args.dry_run);
    }

    #[test]
    fn test_missing_required_argument_is_rejected() {
        let result = Args::try_parse_from([
            "grade-mailer",
            "--file_path",
            "grades.csv",
            "--email_column",
            "email",
            "--sender_email",
            "prof@uni.edu",
            "--sender_password",
            "secret",
        ]);

        assert_eq!(
            result.unwrap_err().kind(),
            ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_kebab_case_aliases() {
        let args = Args::try_parse_from([
            "grade-mailer",
            "--file-path",
            "grades.xlsx",
            "--email-column",
            "Email",
            "--sender-email",
            "prof@uni.edu",
            "--sender-password",
            "secret",
            "--course-name",
            "Algebra",
            "--comments",
            "Great work!",
        ])
        .unwrap();

        assert_eq!(args.file_path, PathBuf::from("grades.xlsx"));
        assert_eq!(args.comments.as_deref(), Some("Great work!"));
    }

    #[test]
    fn test_blank_course_name_is_invalid() {
        let args = Args::try_parse_from([
            "grade-mailer",
            "--file_path",
            "grades.csv",
            "--email_column",
            "email",
            "--sender_email",
            "prof@uni.edu",
            "--sender_password",
            "secret",
            "--course_name",
            "  ",
        ])
        .unwrap();

        assert_eq!(
            args.batch_config(),
            Err(InvalidConfiguration("course_name"))
        );
    }

    #[test]
    fn test_smtp_overrides() {
        let args = parse(&["--smtp_host", "mail.uni.edu", "--smtp_port", "2525"]).unwrap();
        let endpoint = args.smtp_endpoint();

        assert_eq!(endpoint.host, "mail.uni.edu");
        assert_eq!(endpoint.port, 2525);
    }

    #[test]
    fn test_default_endpoint_matches_adapter_defaults() {
        let endpoint = parse(&[]).unwrap().smtp_endpoint();

        assert_eq!(endpoint, SmtpEndpoint::default());
        assert_eq!(endpoint.timeout, DEFAULT_SMTP_TIMEOUT);
    }

    #[test]
    fn test_signature_escapes() {
        let args = parse(&["--signature", "Cheers,\\nThe TAs"]).unwrap();
        assert_eq!(args.message_template().signature, "Cheers,\nThe TAs");
    }
}
