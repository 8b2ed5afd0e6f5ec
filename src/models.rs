use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const NO_DATE: &str = "No date";
const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// A single to-do entry.
///
/// Field names double as the persisted JSON layout, so they must not be renamed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub text: String,
    #[serde(default)]
    pub due: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Builds an incomplete task from user input. `text` is trimmed and must be non-empty.
    pub fn new(fields: TaskFields<'_>) -> Result<Self, ValidationError> {
        let text = validate_text(fields.text)?;
        Ok(Self {
            text,
            due: fields.due.unwrap_or_default().to_string(),
            priority: fields.priority.to_string(),
            category: fields.category.to_string(),
            completed: false,
        })
    }

    /// Overwrites the editable fields, leaving `completed` alone.
    pub(crate) fn apply(&mut self, fields: TaskFields<'_>) -> Result<(), ValidationError> {
        let text = validate_text(fields.text)?;
        self.text = text;
        self.due = fields.due.unwrap_or_default().to_string();
        self.priority = fields.priority.to_string();
        self.category = fields.category.to_string();
        Ok(())
    }

    pub fn due(&self) -> Option<&str> {
        let due = self.due.trim();
        if due.is_empty() {
            None
        } else {
            Some(due)
        }
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due()
            .and_then(|due| NaiveDate::parse_from_str(due, DUE_DATE_FORMAT).ok())
    }

    /// `"<category> | Priority: <priority> | Due: <due>"`, shown under the title.
    pub fn meta_line(&self) -> String {
        format!(
            "{} | Priority: {} | Due: {}",
            self.category,
            self.priority,
            self.due().unwrap_or(NO_DATE)
        )
    }
}

/// The user-editable part of a [`Task`], as handed over by the presentation layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskFields<'a> {
    pub text: &'a str,
    pub due: Option<&'a str>,
    pub priority: &'a str,
    pub category: &'a str,
}

impl<'a> TaskFields<'a> {
    pub fn new(text: &'a str, due: Option<&'a str>, priority: &'a str, category: &'a str) -> Self {
        Self {
            text,
            due,
            priority,
            category,
        }
    }
}

fn validate_text(text: &str) -> Result<String, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyText);
    }
    Ok(text.to_string())
}
