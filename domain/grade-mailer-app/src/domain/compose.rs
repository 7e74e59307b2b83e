use crate::domain::table::{Row, Table};

pub const DEFAULT_GREETING: &str =
    "Hello,\n\nHere is your updated information about the course:\n\n";
pub const DEFAULT_SIGNATURE: &str = "Best regards,\nJorge Zapata.";

const MISSING_VALUE_TEXT: &str = "no data";

#[derive(Debug, Clone, PartialEq)]
pub struct MessageTemplate {
    pub greeting: String,
    pub signature: String,
}

impl MessageTemplate {
    pub fn with_signature(signature: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            ..Self::default()
        }
    }
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self {
            greeting: DEFAULT_GREETING.to_string(),
            signature: DEFAULT_SIGNATURE.to_string(),
        }
    }
}

pub fn compose_subject(course_name: &str) -> String {
    format!("Grading Notification for {}", course_name)
}

pub fn data_columns<'a>(table: &'a Table, email_column: &str) -> Vec<&'a str> {
    table
        .column_names()
        .filter(|name| *name != email_column)
        .collect()
}

pub fn compose_body(
    row: &Row<'_>,
    data_columns: &[&str],
    comment: Option<&str>,
    template: &MessageTemplate,
) -> String {
    let mut body = template.greeting.clone();

    for column in data_columns {
        match row.get(column) {
            Some(value) if !value.is_missing() => {
                body.push_str(&format!("- {}: {}\n", column, value));
            }
            _ => body.push_str(&format!("- {}: {}\n", column, MISSING_VALUE_TEXT)),
        }
    }

    if let Some(comment) = comment.filter(|c| !c.trim().is_empty()) {
        body.push('\n');
        body.push_str(comment);
    }

    body.push_str("\n\n");
    body.push_str(&template.signature);
    body
}
