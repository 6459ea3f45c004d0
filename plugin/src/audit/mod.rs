//! Audit Module
//!
//! Records what players do while in admin mode:
//! - Commands they send
//! - Creative inventory interactions

pub mod entry;
pub mod log;

pub use entry::{AuditEventType, LogEntry};
pub use log::{AuditError, AuditLog};
