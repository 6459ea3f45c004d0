//! Events delivered by the host.

use crate::host::Player;

/// A player is about to run a command. Delivered before dispatch.
#[derive(Debug, Clone)]
pub struct CommandPreprocessEvent {
    pub player: Player,
    /// Raw command line including the leading slash.
    pub message: String,
}

/// Who clicked in a creative inventory.
#[derive(Debug, Clone)]
pub enum Clicker {
    Player(Player),
    /// Some other entity; never audited.
    Other(String),
}

/// A click in the creative-mode inventory.
#[derive(Debug, Clone)]
pub struct CreativeInventoryEvent {
    pub who_clicked: Clicker,
    /// Item type under the cursor, e.g. `DIAMOND` (`AIR` when empty).
    pub cursor: String,
}
