//! Audit log entries.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of action recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
    /// A command sent while in admin mode.
    Command,
    /// A creative inventory interaction made while in admin mode.
    CreativeInventory,
}

impl AuditEventType {
    /// Returns the event name used in config and serialized entries.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::CreativeInventory => "creative_inventory",
        }
    }

    /// Returns the upper-case label written to the log file.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Command => "COMMAND",
            Self::CreativeInventory => "CREATIVE_INVENTORY",
        }
    }

    /// Returns all event types.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Command, Self::CreativeInventory]
    }
}

impl fmt::Display for AuditEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded action. Entries are never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub player_name: String,
    pub event_type: AuditEventType,
    pub text: String,
}

impl LogEntry {
    /// Create an entry stamped with the current time.
    pub fn new(
        player_name: impl Into<String>,
        event_type: AuditEventType,
        text: impl Into<String>,
    ) -> Self {
        Self::at(Utc::now(), player_name, event_type, text)
    }

    /// Create an entry with an explicit timestamp.
    pub fn at(
        timestamp: DateTime<Utc>,
        player_name: impl Into<String>,
        event_type: AuditEventType,
        text: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            player_name: player_name.into(),
            event_type,
            text: text.into(),
        }
    }
}

/// Log file line: `timestamp,player,TYPE,text`
impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.timestamp.format("%a %b %d %H:%M:%S UTC %Y"),
            self.player_name,
            self.event_type.label(),
            self.text
        )
    }
}
