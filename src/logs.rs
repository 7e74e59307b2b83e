use std::path::PathBuf;

use log::LevelFilter;
use log4rs::{
    Config,
    append::{
        console::{ConsoleAppender, Target},
        rolling_file::{
            RollingFileAppender,
            policy::compound::{
                CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
            },
        },
    },
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};
use thiserror::Error;

const LOG_SIZE_LIMIT: u64 = 10 * 1024 * 1024; // 10 MB

const LOG_FILE_COUNT: u32 = 3;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} - {m}{n}";

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("invalid log archive pattern: {0}")]
    Archive(String),
    #[error("failed to open log file {}: {message}", path.display())]
    File { path: PathBuf, message: String },
    #[error("invalid logger configuration: {0}")]
    Config(String),
    #[error("failed to install logger: {0}")]
    Install(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    pub stderr_level: LevelFilter,
    pub file: Option<LogFile>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogFile {
    pub path: PathBuf,
    pub archive_pattern: String,
}

impl LogSettings {
    // Reads `LOG_FILE_PATH` and `LOG_ARCHIVE_PATTERN`; without a file path
    // only stderr is logged to.
    pub fn from_env(verbose: bool) -> Self {
        let file = std::env::var("LOG_FILE_PATH")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(|path| {
                let archive_pattern = std::env::var("LOG_ARCHIVE_PATTERN")
                    .unwrap_or_else(|_| format!("{}.{{}}.gz", path));
                LogFile {
                    path: PathBuf::from(path),
                    archive_pattern,
                }
            });

        Self {
            stderr_level: if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
            file,
        }
    }
}

pub fn logger_config(settings: &LogSettings) -> Result<Config, LoggerError> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    let mut config = Config::builder().appender(
        Appender::builder()
            .filter(Box::new(ThresholdFilter::new(settings.stderr_level)))
            .build("stderr", Box::new(stderr)),
    );
    let mut root = Root::builder().appender("stderr");

    if let Some(file) = &settings.file {
        let trigger = SizeTrigger::new(LOG_SIZE_LIMIT);
        let roller = FixedWindowRoller::builder()
            .build(&file.archive_pattern, LOG_FILE_COUNT)
            .map_err(|e| LoggerError::Archive(e.to_string()))?;
        let policy = CompoundPolicy::new(Box::new(trigger), Box::new(roller));

        let logfile = RollingFileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build(&file.path, Box::new(policy))
            .map_err(|e| LoggerError::File {
                path: file.path.clone(),
                message: e.to_string(),
            })?;

        config = config.appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("logfile", Box::new(logfile)),
        );
        root = root.appender("logfile");
    }

    config
        .build(root.build(LevelFilter::Trace))
        .map_err(|e| LoggerError::Config(e.to_string()))
}

pub fn init_logger(settings: &LogSettings) -> Result<(), LoggerError> {
    let config = logger_config(settings)?;
    let _handle =
        log4rs::init_config(config).map_err(|e| LoggerError::Install(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stderr_only_config() {
        let settings = LogSettings {
            stderr_level: LevelFilter::Info,
            file: None,
        };
        let config = logger_config(&settings).unwrap();
        assert_eq!(config.appenders().len(), 1);
    }

    #[test]
    fn test_file_config_adds_appender() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grade-mailer.log");
        let settings = LogSettings {
            stderr_level: LevelFilter::Debug,
            file: Some(LogFile {
                archive_pattern: format!("{}.{{}}.gz", path.display()),
                path,
            }),
        };

        let config = logger_config(&settings).unwrap();

        assert_eq!(config.appenders().len(), 2);
        assert_eq!(config.root().appenders(), ["stderr", "logfile"]);
    }

    #[test]
    fn test_archive_pattern_needs_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grade-mailer.log");
        let settings = LogSettings {
            stderr_level: LevelFilter::Info,
            file: Some(LogFile {
                archive_pattern: "no-placeholder.log".to_string(),
                path,
            }),
        };

        assert!(matches!(
            logger_config(&settings),
            Err(LoggerError::Archive(_))
        ));
    }
}
