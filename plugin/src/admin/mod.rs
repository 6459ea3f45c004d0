//! Admin Mode Module
//!
//! - Membership set and permission grants
//! - The `adminmode` command

pub mod commands;
pub mod controller;
pub mod types;

pub use controller::AdminModeController;
pub use types::{AdminSession, CommandError, CommandOutcome, ToggleOutcome};
