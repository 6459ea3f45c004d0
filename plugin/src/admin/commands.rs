//! `adminmode` command handling.
//!
//! The host parses and dispatches commands; these helpers decide whether an
//! invocation is ours, who may run it and what the reason text is.

use super::types::CommandError;
use crate::host::{CommandSender, Host, Player};
use crate::permissions::PluginPermission;

/// Name the command is registered under.
pub const COMMAND_NAME: &str = "adminmode";

/// Usage line shown when no reason is given.
pub const USAGE: &str = "/adminmode <reason>";

/// Whether `name` refers to the `adminmode` command.
#[must_use]
pub fn is_adminmode_command(name: &str) -> bool {
    name.eq_ignore_ascii_case(COMMAND_NAME)
}

/// Check that `sender` is an in-game player allowed to toggle admin mode.
pub fn authorize<'a, H: Host>(
    host: &H,
    sender: &'a CommandSender,
) -> Result<&'a Player, CommandError> {
    let player = sender.as_player().ok_or(CommandError::NotInGame)?;
    if !host.has_permission(player, PluginPermission::Toggle.node()) {
        return Err(CommandError::MissingPermission);
    }
    Ok(player)
}

/// Join the command arguments into the reason text.
///
/// Returns `None` when there are no arguments.
#[must_use]
pub fn parse_reason(args: &[&str]) -> Option<String> {
    if args.is_empty() {
        None
    } else {
        Some(args.join(" "))
    }
}

/// Split a raw command line (`/name arg arg`) into its name and arguments.
///
/// Returns `None` for lines that are not commands.
#[must_use]
pub fn split_command_line(line: &str) -> Option<(&str, Vec<&str>)> {
    let rest = line.strip_prefix('/')?;
    let mut parts = rest.split_whitespace();
    let name = parts.next()?;
    Some((name, parts.collect()))
}
