//! Plugin state and lifecycle.
//!
//! [`AdminModePlugin`] owns everything the plugin keeps between events. The
//! host constructs it, calls [`AdminModePlugin::on_enable`] once, routes
//! commands and events into the handlers from its dispatch thread, and calls
//! [`AdminModePlugin::on_disable`] on shutdown.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, error, info};

use crate::admin::commands::{authorize, is_adminmode_command, parse_reason, USAGE};
use crate::admin::{AdminModeController, CommandOutcome, ToggleOutcome};
use crate::audit::{AuditError, AuditEventType, AuditLog};
use crate::color::RED;
use crate::config::{DataPaths, PluginConfig};
use crate::events::{Clicker, CommandPreprocessEvent, CreativeInventoryEvent};
use crate::host::{CommandSender, Host, Player};

/// Admin mode plugin state.
pub struct AdminModePlugin<H: Host> {
    host: H,
    config: PluginConfig,
    log_path: PathBuf,
    controller: AdminModeController<H::Attachment>,
    audit: AuditLog,
}

impl<H: Host> AdminModePlugin<H> {
    /// Create the plugin. Nothing touches the disk until `on_enable`.
    pub fn new(host: H, config: PluginConfig, log_path: impl Into<PathBuf>) -> Self {
        Self {
            host,
            config,
            log_path: log_path.into(),
            controller: AdminModeController::new(),
            audit: AuditLog::in_memory(),
        }
    }

    /// Create the plugin from its data folder, writing the default config
    /// file first if there is none.
    pub fn load(host: H, paths: &DataPaths) -> Result<Self> {
        if PluginConfig::save_default(&paths.config_file)? {
            info!(path = %paths.config_file.display(), "Wrote default config");
        }
        let config = PluginConfig::load(&paths.config_file)?;
        Ok(Self::new(host, config, paths.log_file()))
    }

    /// Open the audit log file. Entries recorded before enable are kept.
    /// Failure leaves logging memory-only.
    pub fn on_enable(&mut self) {
        self.audit.attach_file(&self.log_path);
        info!(
            persistent = self.audit.is_persistent(),
            log_commands = self.config.log_commands,
            log_creative = self.config.log_creative_inventory_actions,
            "AdminMode enabled"
        );
    }

    /// Revoke every outstanding grant, then flush the audit log.
    pub fn on_disable(&mut self) -> Result<usize, AuditError> {
        self.controller.revoke_all(&mut self.host);
        match self.audit.save_logs() {
            Ok(written) => {
                info!(written, "AdminMode disabled");
                Ok(written)
            }
            Err(e) => {
                error!(error = %e, "Audit log entries lost");
                Err(e)
            }
        }
    }

    /// Handle an invocation of a command registered by this plugin.
    #[tracing::instrument(skip(self, sender, args))]
    pub fn on_command(
        &mut self,
        sender: &CommandSender,
        command: &str,
        args: &[&str],
    ) -> CommandOutcome {
        if !is_adminmode_command(command) {
            return CommandOutcome::Ignored;
        }

        let player = match authorize(&self.host, sender) {
            Ok(player) => player,
            Err(e) => {
                debug!(error = %e, "adminmode rejected");
                self.host.send_message(sender, &format!("{RED}{e}"));
                return CommandOutcome::Rejected(e);
            }
        };

        let Some(reason) = parse_reason(args) else {
            return CommandOutcome::Usage(USAGE);
        };

        CommandOutcome::Toggled(self.toggle_admin_mode(player, &reason))
    }

    /// Audit commands sent by players in admin mode.
    pub fn on_command_preprocess(&mut self, event: &CommandPreprocessEvent) {
        if self.config.log_commands && self.controller.is_admin_mode(&event.player) {
            self.audit
                .log_event(&event.player, AuditEventType::Command, &event.message);
        }
    }

    /// Audit creative inventory clicks by players in admin mode.
    pub fn on_creative_inventory(&mut self, event: &CreativeInventoryEvent) {
        let Clicker::Player(player) = &event.who_clicked else {
            return;
        };
        if self.config.log_creative_inventory_actions && self.controller.is_admin_mode(player) {
            self.audit
                .log_event(player, AuditEventType::CreativeInventory, &event.cursor);
        }
    }

    /// Flip admin mode for `player`.
    pub fn toggle_admin_mode(&mut self, player: &Player, reason: &str) -> ToggleOutcome {
        self.controller
            .toggle_admin_mode(&mut self.host, &self.config, player, reason)
    }

    #[must_use]
    pub fn is_admin_mode(&self, player: &Player) -> bool {
        self.controller.is_admin_mode(player)
    }

    pub const fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub const fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub const fn controller(&self) -> &AdminModeController<H::Attachment> {
        &self.controller
    }

    pub const fn audit_log(&self) -> &AuditLog {
        &self.audit
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}
