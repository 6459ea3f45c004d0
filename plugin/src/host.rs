//! Host Platform Interface
//!
//! The game server owns players, chat and permission attachments. The plugin
//! only talks to it through the [`Host`] trait.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A connected player, as identified by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    /// Stable player id.
    pub id: Uuid,
    /// Current in-game name.
    pub name: String,
}

impl Player {
    #[must_use]
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Whoever invoked a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSender {
    /// An in-game player.
    Player(Player),
    /// The server console or another non-interactive caller.
    Console,
}

impl CommandSender {
    /// Returns the player behind this sender, if any.
    #[must_use]
    pub const fn as_player(&self) -> Option<&Player> {
        match self {
            Self::Player(player) => Some(player),
            Self::Console => None,
        }
    }
}

/// Operations the plugin needs from the game server.
///
/// Implementations are driven from the host's single dispatch thread, so
/// every method takes `&mut self` where it mutates host state and no
/// synchronization is expected.
pub trait Host {
    /// Opaque handle for a permission attachment issued by the host.
    type Attachment;

    /// Send a message to every connected player and the console.
    fn broadcast(&mut self, message: &str);

    /// Send a message to a single command sender.
    fn send_message(&mut self, recipient: &CommandSender, message: &str);

    /// Whether the player currently holds `permission`.
    fn has_permission(&self, player: &Player, permission: &str) -> bool;

    /// Attach `permissions` (all set to `true`) to the player and return the
    /// handle that revokes them again.
    fn add_attachment(&mut self, player: &Player, permissions: &[String]) -> Self::Attachment;

    /// Revoke an attachment previously returned by [`Host::add_attachment`].
    fn remove_attachment(&mut self, player: &Player, attachment: Self::Attachment);
}
