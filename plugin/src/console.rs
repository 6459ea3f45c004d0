//! Console Host
//!
//! A minimal stand-in for a game server, driven by text lines. It keeps the
//! online players and their permission attachments in memory and feeds
//! commands and events into the plugin the way a real server would.
//!
//! Lines understood by [`dispatch`]:
//! - `join <name>` / `leave <name>`
//! - `op <name>` / `deop <name>`: grant or remove `adminmode.toggle`
//! - `as <name> <text>`: the player sends a chat line or `/command`
//! - `creative <name> <ITEM>`: the player clicks in the creative inventory
//! - `list`
//! - `stop`
//! - anything starting with `/` is run as the console

use std::collections::{HashMap, HashSet};
use std::ops::ControlFlow;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::admin::commands::split_command_line;
use crate::admin::CommandOutcome;
use crate::color::strip_color_codes;
use crate::events::{Clicker, CommandPreprocessEvent, CreativeInventoryEvent};
use crate::host::{CommandSender, Host, Player};
use crate::permissions::PluginPermission;
use crate::plugin::AdminModePlugin;

/// Namespace for offline-style player ids derived from names.
const PLAYER_NAMESPACE: Uuid = Uuid::from_u128(0x6ba7_b812_9dad_11d1_80b4_00c0_4fd4_30c8);

/// Attachment handle issued by [`ConsoleHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttachmentId(u64);

/// In-memory host backing the console binary.
#[derive(Debug, Default)]
pub struct ConsoleHost {
    online: HashMap<String, Player>,
    base_permissions: HashMap<Uuid, HashSet<String>>,
    attachments: HashMap<AttachmentId, (Uuid, Vec<String>)>,
    next_attachment: u64,
    outbox: Vec<String>,
}

impl ConsoleHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring a player online. Ids are derived from the name, so a player
    /// who rejoins keeps the same identity.
    pub fn join(&mut self, name: &str) -> Player {
        let key = name.to_lowercase();
        self.online
            .entry(key)
            .or_insert_with(|| {
                Player::new(Uuid::new_v5(&PLAYER_NAMESPACE, name.to_lowercase().as_bytes()), name)
            })
            .clone()
    }

    /// Take a player offline.
    pub fn leave(&mut self, name: &str) -> Option<Player> {
        self.online.remove(&name.to_lowercase())
    }

    /// Look up an online player by name, case-insensitively.
    #[must_use]
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.online.get(&name.to_lowercase())
    }

    /// Online players, sorted by name.
    #[must_use]
    pub fn online_players(&self) -> Vec<&Player> {
        let mut players: Vec<&Player> = self.online.values().collect();
        players.sort_by(|a, b| a.name.cmp(&b.name));
        players
    }

    /// Give a player a permission outside of any attachment.
    pub fn grant(&mut self, player: &Player, permission: &str) {
        self.base_permissions
            .entry(player.id)
            .or_default()
            .insert(permission.to_string());
    }

    /// Remove a permission granted with [`ConsoleHost::grant`].
    pub fn revoke(&mut self, player: &Player, permission: &str) {
        if let Some(perms) = self.base_permissions.get_mut(&player.id) {
            perms.remove(permission);
        }
    }

    /// Number of live attachments held by `player`.
    #[must_use]
    pub fn attachment_count(&self, player: &Player) -> usize {
        self.attachments
            .values()
            .filter(|(owner, _)| *owner == player.id)
            .count()
    }

    /// Messages produced since the last call, in order.
    pub fn drain_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.outbox)
    }

    fn say(&mut self, line: String) {
        self.outbox.push(line);
    }
}

impl Host for ConsoleHost {
    type Attachment = AttachmentId;

    fn broadcast(&mut self, message: &str) {
        self.say(format!("[broadcast] {}", strip_color_codes(message)));
    }

    fn send_message(&mut self, recipient: &CommandSender, message: &str) {
        let target = match recipient {
            CommandSender::Player(player) => player.name.clone(),
            CommandSender::Console => "console".to_string(),
        };
        self.say(format!("[to {target}] {}", strip_color_codes(message)));
    }

    fn has_permission(&self, player: &Player, permission: &str) -> bool {
        let base = self
            .base_permissions
            .get(&player.id)
            .is_some_and(|perms| perms.contains(permission));
        base || self
            .attachments
            .values()
            .any(|(owner, perms)| *owner == player.id && perms.iter().any(|p| p == permission))
    }

    fn add_attachment(&mut self, player: &Player, permissions: &[String]) -> AttachmentId {
        self.next_attachment += 1;
        let id = AttachmentId(self.next_attachment);
        self.attachments
            .insert(id, (player.id, permissions.to_vec()));
        debug!(player = %player.name, attachment = id.0, "Attachment added");
        id
    }

    fn remove_attachment(&mut self, player: &Player, attachment: AttachmentId) {
        if self.attachments.remove(&attachment).is_none() {
            debug!(player = %player.name, attachment = attachment.0, "Attachment already gone");
        }
    }
}

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleLine<'a> {
    Join(&'a str),
    Leave(&'a str),
    Op(&'a str),
    Deop(&'a str),
    Chat { player: &'a str, text: &'a str },
    Creative { player: &'a str, item: &'a str },
    ConsoleCommand(&'a str),
    List,
    Stop,
    Empty,
    Unknown(&'a str),
}

/// Parse one console line.
#[must_use]
pub fn parse_line(line: &str) -> ConsoleLine<'_> {
    let line = line.trim();
    if line.is_empty() {
        return ConsoleLine::Empty;
    }
    if line.starts_with('/') {
        return ConsoleLine::ConsoleCommand(line);
    }

    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    match (verb.to_lowercase().as_str(), rest.is_empty()) {
        ("list", _) => ConsoleLine::List,
        ("stop", _) => ConsoleLine::Stop,
        ("join", false) => ConsoleLine::Join(rest),
        ("leave", false) => ConsoleLine::Leave(rest),
        ("op", false) => ConsoleLine::Op(rest),
        ("deop", false) => ConsoleLine::Deop(rest),
        ("as", false) => match rest.split_once(char::is_whitespace) {
            Some((player, text)) => ConsoleLine::Chat {
                player,
                text: text.trim(),
            },
            None => ConsoleLine::Unknown(line),
        },
        ("creative", false) => match rest.split_once(char::is_whitespace) {
            Some((player, item)) => ConsoleLine::Creative {
                player,
                item: item.trim(),
            },
            None => ConsoleLine::Unknown(line),
        },
        _ => ConsoleLine::Unknown(line),
    }
}

/// Run one console line against the plugin.
///
/// Output for the operator is queued on the host; read it with
/// [`ConsoleHost::drain_output`].
pub fn dispatch(plugin: &mut AdminModePlugin<ConsoleHost>, line: &str) -> ControlFlow<()> {
    match parse_line(line) {
        ConsoleLine::Empty => {}
        ConsoleLine::Stop => return ControlFlow::Break(()),
        ConsoleLine::Join(name) => {
            let player = plugin.host_mut().join(name);
            plugin.host_mut().say(format!("{} joined the game", player.name));
        }
        ConsoleLine::Leave(name) => match plugin.host_mut().leave(name) {
            Some(player) => plugin.host_mut().say(format!("{} left the game", player.name)),
            None => not_online(plugin.host_mut(), name),
        },
        ConsoleLine::Op(name) => with_player(plugin, name, |plugin, player| {
            plugin.host_mut().grant(&player, PluginPermission::Toggle.node());
            plugin.host_mut().say(format!("Made {} a server operator", player.name));
        }),
        ConsoleLine::Deop(name) => with_player(plugin, name, |plugin, player| {
            plugin.host_mut().revoke(&player, PluginPermission::Toggle.node());
            plugin.host_mut().say(format!("Made {} no longer a server operator", player.name));
        }),
        ConsoleLine::Chat { player, text } => with_player(plugin, player, |plugin, player| {
            player_line(plugin, &player, text);
        }),
        ConsoleLine::Creative { player, item } => with_player(plugin, player, |plugin, player| {
            plugin.on_creative_inventory(&CreativeInventoryEvent {
                who_clicked: Clicker::Player(player),
                cursor: item.to_uppercase(),
            });
        }),
        ConsoleLine::ConsoleCommand(command) => {
            run_command(plugin, &CommandSender::Console, command);
        }
        ConsoleLine::List => {
            let summary: Vec<String> = plugin
                .host()
                .online_players()
                .into_iter()
                .map(|p| {
                    if plugin.is_admin_mode(p) {
                        format!("{} (admin mode)", p.name)
                    } else {
                        p.name.clone()
                    }
                })
                .collect();
            let line = format!("{} online: {}", summary.len(), summary.join(", "));
            plugin.host_mut().say(line);
        }
        ConsoleLine::Unknown(text) => {
            warn!(line = text, "Unknown console line");
            plugin.host_mut().say(format!("Unknown command: {text}"));
        }
    }
    ControlFlow::Continue(())
}

fn with_player(
    plugin: &mut AdminModePlugin<ConsoleHost>,
    name: &str,
    f: impl FnOnce(&mut AdminModePlugin<ConsoleHost>, Player),
) {
    match plugin.host().player(name).cloned() {
        Some(player) => f(plugin, player),
        None => not_online(plugin.host_mut(), name),
    }
}

fn not_online(host: &mut ConsoleHost, name: &str) {
    host.say(format!("{name} is not online"));
}

/// A player typed a line: commands go through preprocess, then dispatch.
fn player_line(plugin: &mut AdminModePlugin<ConsoleHost>, player: &Player, text: &str) {
    if !text.starts_with('/') {
        let line = format!("<{}> {text}", player.name);
        plugin.host_mut().say(line);
        return;
    }
    plugin.on_command_preprocess(&CommandPreprocessEvent {
        player: player.clone(),
        message: text.to_string(),
    });
    run_command(plugin, &CommandSender::Player(player.clone()), text);
}

fn run_command(plugin: &mut AdminModePlugin<ConsoleHost>, sender: &CommandSender, line: &str) {
    let Some((name, args)) = split_command_line(line) else {
        return;
    };
    match plugin.on_command(sender, name, &args) {
        CommandOutcome::Usage(usage) => plugin
            .host_mut()
            .send_message(sender, &format!("Usage: {usage}")),
        CommandOutcome::Ignored => {
            debug!(command = name, "Command not handled by AdminMode");
        }
        CommandOutcome::Toggled(_) | CommandOutcome::Rejected(_) => {}
    }
}
