//! Admin module types.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::host::Player;

/// A player currently in admin mode.
#[derive(Debug, Clone)]
pub struct AdminSession<A> {
    pub player: Player,
    pub reason: String,
    pub entered_at: DateTime<Utc>,
    /// Host handle for the granted permissions.
    pub(crate) attachment: A,
}

/// Result of flipping a player's admin mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The player is now in admin mode.
    Entered,
    /// The player is back to normal.
    Left,
}

impl ToggleOutcome {
    /// Whether the player ended up in admin mode.
    #[must_use]
    pub const fn is_admin_mode(self) -> bool {
        matches!(self, Self::Entered)
    }
}

/// Reasons the `adminmode` command refuses to run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Invoked from the console or another non-player sender.
    #[error("This command must be executed in-game.")]
    NotInGame,

    /// Sender lacks the toggle permission.
    #[error("You do not have permission to run this command.")]
    MissingPermission,
}

/// What the command dispatcher should do after `adminmode` ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Not our command.
    Ignored,
    /// Admin mode was toggled.
    Toggled(ToggleOutcome),
    /// Bad invocation; the host should show this usage line.
    Usage(&'static str),
    /// Refused, sender was told why.
    Rejected(CommandError),
}
