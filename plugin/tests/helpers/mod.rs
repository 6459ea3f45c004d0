//! Reusable test helpers for plugin integration tests.
//!
//! Provides `RecordingHost`, a [`Host`] that remembers every broadcast,
//! direct message and attachment so tests can assert on host-side effects.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use adminmode::{AdminModePlugin, CommandSender, Host, Player, PluginConfig};
use uuid::Uuid;

/// Attachment handle issued by [`RecordingHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(pub u32);

#[derive(Debug, Default)]
pub struct RecordingHost {
    next: u32,
    pub attachments: HashMap<Handle, (Uuid, Vec<String>)>,
    pub removed: Vec<Handle>,
    pub broadcasts: Vec<String>,
    pub messages: Vec<(CommandSender, String)>,
    pub toggle_allowed: HashSet<Uuid>,
}

impl RecordingHost {
    /// Permissions attached to `player`, across all live attachments.
    pub fn attached_permissions(&self, player: &Player) -> Vec<String> {
        self.attachments
            .values()
            .filter(|(owner, _)| *owner == player.id)
            .flat_map(|(_, perms)| perms.iter().cloned())
            .collect()
    }

    pub fn attachment_count(&self, player: &Player) -> usize {
        self.attachments
            .values()
            .filter(|(owner, _)| *owner == player.id)
            .count()
    }
}

impl Host for RecordingHost {
    type Attachment = Handle;

    fn broadcast(&mut self, message: &str) {
        self.broadcasts.push(message.to_string());
    }

    fn send_message(&mut self, recipient: &CommandSender, message: &str) {
        self.messages.push((recipient.clone(), message.to_string()));
    }

    fn has_permission(&self, player: &Player, permission: &str) -> bool {
        (permission == "adminmode.toggle" && self.toggle_allowed.contains(&player.id))
            || self.attached_permissions(player).iter().any(|p| p == permission)
    }

    fn add_attachment(&mut self, player: &Player, permissions: &[String]) -> Handle {
        self.next += 1;
        let handle = Handle(self.next);
        self.attachments
            .insert(handle, (player.id, permissions.to_vec()));
        handle
    }

    fn remove_attachment(&mut self, _player: &Player, attachment: Handle) {
        self.attachments.remove(&attachment);
        self.removed.push(attachment);
    }
}

/// A fresh player with a random id.
pub fn player(name: &str) -> Player {
    Player::new(Uuid::new_v4(), name)
}

/// Config granting two permissions, with both logs switched on.
pub fn test_config() -> PluginConfig {
    PluginConfig {
        admin_mode_permissions: vec![
            "minecraft.command.gamemode".to_string(),
            "essentials.fly".to_string(),
        ],
        ..PluginConfig::default()
    }
}

/// Plugin over a `RecordingHost`, not yet enabled.
pub fn plugin_with(
    config: PluginConfig,
    log_path: &std::path::Path,
) -> AdminModePlugin<RecordingHost> {
    AdminModePlugin::new(RecordingHost::default(), config, log_path)
}

/// Allow `player` to run `/adminmode`.
pub fn allow_toggle(plugin: &mut AdminModePlugin<RecordingHost>, player: &Player) {
    plugin.host_mut().toggle_allowed.insert(player.id);
}
