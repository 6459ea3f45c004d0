//! Admin mode membership and permission grants.

use std::collections::HashMap;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use super::types::{AdminSession, ToggleOutcome};
use crate::config::PluginConfig;
use crate::host::{Host, Player};

/// Tracks who is in admin mode and the attachment each of them holds.
///
/// Every member owns exactly one host attachment; leaving admin mode revokes
/// it. `A` is the host's attachment handle type.
#[derive(Debug)]
pub struct AdminModeController<A> {
    sessions: HashMap<Uuid, AdminSession<A>>,
}

impl<A> Default for AdminModeController<A> {
    fn default() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }
}

impl<A> AdminModeController<A> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `player` is in admin mode.
    #[must_use]
    pub fn is_admin_mode(&self, player: &Player) -> bool {
        self.sessions.contains_key(&player.id)
    }

    /// The session for `player`, if in admin mode.
    #[must_use]
    pub fn session(&self, player: &Player) -> Option<&AdminSession<A>> {
        self.sessions.get(&player.id)
    }

    /// Players currently in admin mode, in no particular order.
    pub fn members(&self) -> impl Iterator<Item = &AdminSession<A>> {
        self.sessions.values()
    }

    /// Number of players in admin mode.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Flip admin mode for `player`.
    ///
    /// Entering announces (if enabled), then attaches the configured
    /// permissions. Leaving announces (if enabled), then revokes them.
    #[tracing::instrument(skip(self, host, config, player), fields(player = %player.name))]
    pub fn toggle_admin_mode<H>(
        &mut self,
        host: &mut H,
        config: &PluginConfig,
        player: &Player,
        reason: &str,
    ) -> ToggleOutcome
    where
        H: Host<Attachment = A>,
    {
        if self.is_admin_mode(player) {
            if let Some(message) = config.leave_announcement(&player.name, reason) {
                host.broadcast(&message);
            }
            self.revoke(host, player);
            info!(reason, "Player left admin mode");
            ToggleOutcome::Left
        } else {
            if let Some(message) = config.enter_announcement(&player.name, reason) {
                host.broadcast(&message);
            }
            let attachment = host.add_attachment(player, &config.admin_mode_permissions);
            self.sessions.insert(
                player.id,
                AdminSession {
                    player: player.clone(),
                    reason: reason.to_string(),
                    entered_at: Utc::now(),
                    attachment,
                },
            );
            info!(
                reason,
                permissions = config.admin_mode_permissions.len(),
                "Player entered admin mode"
            );
            ToggleOutcome::Entered
        }
    }

    /// Drop `player` from admin mode and revoke the attachment.
    ///
    /// Returns `false` when the player was not a member; nothing is revoked
    /// in that case.
    pub fn revoke<H>(&mut self, host: &mut H, player: &Player) -> bool
    where
        H: Host<Attachment = A>,
    {
        match self.sessions.remove(&player.id) {
            Some(session) => {
                host.remove_attachment(&session.player, session.attachment);
                true
            }
            None => {
                debug!(player = %player.name, "No admin mode grant to revoke");
                false
            }
        }
    }

    /// Revoke every grant and empty the membership set.
    ///
    /// Returns how many players were dropped.
    pub fn revoke_all<H>(&mut self, host: &mut H) -> usize
    where
        H: Host<Attachment = A>,
    {
        let count = self.sessions.len();
        for (_, session) in self.sessions.drain() {
            host.remove_attachment(&session.player, session.attachment);
        }
        if count > 0 {
            info!(count, "Revoked all admin mode grants");
        }
        count
    }
}
