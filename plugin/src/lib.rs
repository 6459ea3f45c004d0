//! `AdminMode` Plugin
//!
//! Lets trusted players toggle a bundle of elevated permissions on and off,
//! announces the change to the server, and keeps an audit trail of what
//! they do while elevated.

pub mod admin;
pub mod audit;
pub mod color;
pub mod config;
pub mod console;
pub mod events;
pub mod host;
pub mod permissions;
pub mod plugin;

pub use admin::{AdminModeController, CommandError, CommandOutcome, ToggleOutcome};
pub use audit::{AuditError, AuditEventType, AuditLog, LogEntry};
pub use config::PluginConfig;
pub use events::{Clicker, CommandPreprocessEvent, CreativeInventoryEvent};
pub use host::{CommandSender, Host, Player};
pub use plugin::AdminModePlugin;
