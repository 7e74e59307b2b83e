use std::{process::ExitCode, sync::Arc};

use clap::Parser;
use grade_mailer_app::{
    domain::{
        compose::MessageTemplate,
        config::{BatchConfig, InvalidConfiguration},
    },
    ports::email::EmailPort,
    workflow::send_grades::{BatchError, BatchSummary, SendGradesWorkflow, SendGradesWorkflowImpl},
};
use grade_mailer_email_lettre::{DryRunEmailAdapter, LettreEmailAdapter};
use grade_mailer_table_files::FileTableAdapter;
use log::{error, info};
use thiserror::Error;

use crate::{
    cli::Args,
    logs::{LogSettings, init_logger},
    report::StdoutReportAdapter,
};

mod cli;
mod logs;
mod report;

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] InvalidConfiguration),
    #[error(transparent)]
    Batch(#[from] BatchError),
}

fn run_batch<E: EmailPort>(
    config: &BatchConfig,
    template: MessageTemplate,
    email_adapter: E,
    dry_run: bool,
) -> Result<BatchSummary, BatchError> {
    let workflow = SendGradesWorkflowImpl::new(
        Arc::new(FileTableAdapter),
        Arc::new(email_adapter),
        Arc::new(StdoutReportAdapter::new(dry_run)),
        template,
    );
    workflow.run(config)
}

fn run(args: &Args) -> Result<BatchSummary, AppError> {
    let config = args.batch_config()?;
    let template = args.message_template();

    let summary = if args.dry_run {
        info!("Dry run: no email will be sent");
        run_batch(&config, template, DryRunEmailAdapter, true)?
    } else {
        let endpoint = args.smtp_endpoint();
        info!("Using SMTP server {}:{}", endpoint.host, endpoint.port);
        run_batch(&config, template, LettreEmailAdapter::new(endpoint), false)?
    };
    Ok(summary)
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    if let Err(e) = init_logger(&LogSettings::from_env(args.verbose)) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
