//! Compile event log for promptc.
//!
//! When `events_log` is configured, every `compile`, `payload`, and `init`
//! appends one event to an append-only NDJSON file (one JSON object per line).
//!
//! # Event Format
//!
//! Each event is a JSON object with the following fields:
//! - `ts`: RFC3339 timestamp
//! - `action`: The command that ran (compile, payload, init)
//! - `actor`: The owner string (e.g., `user@HOST`)
//! - `template`: Optional template path
//! - `details`: Freeform object with action-specific details

use crate::error::{PromptcError, Result};
use crate::template::CompileReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Default template and config written
    Init,
    /// Template compiled to a prompt
    Compile,
    /// Request body assembled
    Payload,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::Init => write!(f, "init"),
            EventAction::Compile => write!(f, "compile"),
            EventAction::Payload => write!(f, "payload"),
        }
    }
}

/// An event record for the compile log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The action that was performed.
    pub action: EventAction,

    /// The actor who performed the action (e.g., `user@HOST`).
    pub actor: String,

    /// Template the action operated on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Freeform details object with action-specific information.
    pub details: Value,
}

impl Event {
    /// Create a new event with the given action.
    ///
    /// The timestamp is set to the current time, and the actor is
    /// determined from the environment (USER@HOSTNAME).
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: get_actor_string(),
            template: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Set the template path for this event.
    pub fn with_template(mut self, path: &Path) -> Self {
        self.template = Some(path.display().to_string());
        self
    }

    /// Set the details object for this event.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Record the outcome of a compilation.
    pub fn with_report(self, report: &CompileReport, selector_value: Option<String>) -> Self {
        self.with_details(json!({
            "selector": selector_value,
            "branches": report.branches,
            "unresolved": report.unresolved,
            "output_chars": report.output.chars().count(),
        }))
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            PromptcError::UserError(format!("failed to serialize event to JSON: {}", e))
        })
    }
}

/// Get the actor string for event metadata.
fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append an event to the log at `log_path`.
///
/// The file and its parent directory are created if missing. Each append
/// writes exactly one line with a trailing newline.
pub fn append_event(log_path: &Path, event: &Event) -> Result<()> {
    let json_line = event.to_ndjson_line()?;

    if let Some(parent) = log_path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            PromptcError::UserError(format!(
                "failed to create events directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|e| {
            PromptcError::UserError(format!(
                "failed to open events file '{}': {}",
                log_path.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        PromptcError::UserError(format!(
            "failed to write event to '{}': {}",
            log_path.display(),
            e
        ))
    })?;

    Ok(())
}

/// Append an event if logging is enabled, downgrading failures to a warning.
///
/// A broken log must not fail a compile whose output was already produced.
pub fn record(log_path: Option<&Path>, event: Event) {
    let Some(path) = log_path else {
        return;
    };
    if let Err(e) = append_event(path, &event) {
        eprintln!("Warning: failed to record {} event: {}", event.action, e);
    }
}
