use std::path::PathBuf;

use thiserror::Error;

use crate::domain::message::SenderCredentials;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid configuration: '{0}' must not be empty")]
pub struct InvalidConfiguration(pub &'static str);

#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    pub file_path: PathBuf,
    pub email_column: String,
    pub credentials: SenderCredentials,
    pub course_name: String,
    pub comments: Option<String>,
}

impl BatchConfig {
    pub fn new(
        file_path: impl Into<PathBuf>,
        email_column: impl Into<String>,
        credentials: SenderCredentials,
        course_name: impl Into<String>,
        comments: Option<String>,
    ) -> Result<Self, InvalidConfiguration> {
        let file_path = file_path.into();
        let email_column = email_column.into();
        let course_name = course_name.into();

        if file_path.as_os_str().is_empty() {
            return Err(InvalidConfiguration("file_path"));
        }
        require("email_column", &email_column)?;
        require("sender_email", &credentials.address)?;
        require("sender_password", &credentials.password)?;
        require("course_name", &course_name)?;

        Ok(Self {
            file_path,
            email_column,
            credentials,
            course_name,
            comments,
        })
    }
}

fn require(name: &'static str, value: &str) -> Result<(), InvalidConfiguration> {
    if value.trim().is_empty() {
        Err(InvalidConfiguration(name))
    } else {
        Ok(())
    }
}
