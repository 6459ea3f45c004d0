//! Plugin Configuration
//!
//! `config.yml` in the plugin's data folder holds the behavior switches and
//! announcement templates. The console host finds the data folder through
//! environment variables.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::color::translate_color_codes;

/// Shipped `config.yml`, written on first enable.
pub const DEFAULT_CONFIG: &str = r"# Log every command a player runs while in admin mode.
log-commands: true

# Log creative inventory interactions made while in admin mode.
log-creative-inventory-actions: true

# Broadcast a message when a player enters or leaves admin mode.
announce-enter: true
announce-leave: true

# Placeholders: {name}, {reason}. Color codes use '&'.
announce-enter-message: '&c{name} has entered admin mode: &f{reason}'
announce-leave-message: '&a{name} has left admin mode.'

# Permissions granted while in admin mode.
admin-mode-permissions: []
";

/// Prefix for color codes in announcement templates.
const COLOR_PREFIX: char = '&';

/// Settings read from `config.yml`. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PluginConfig {
    /// Log commands sent by players in admin mode.
    pub log_commands: bool,

    /// Log creative inventory clicks by players in admin mode.
    pub log_creative_inventory_actions: bool,

    /// Broadcast when a player enters admin mode.
    pub announce_enter: bool,

    /// Broadcast when a player leaves admin mode.
    pub announce_leave: bool,

    /// Enter template (`{name}`, `{reason}`, `&` color codes)
    pub announce_enter_message: String,

    /// Leave template (`{name}`, `{reason}`, `&` color codes)
    pub announce_leave_message: String,

    /// Permission nodes granted as one attachment while in admin mode.
    pub admin_mode_permissions: Vec<String>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            log_commands: true,
            log_creative_inventory_actions: true,
            announce_enter: true,
            announce_leave: true,
            announce_enter_message: "&c{name} has entered admin mode: &f{reason}".into(),
            announce_leave_message: "&a{name} has left admin mode.".into(),
            admin_mode_permissions: Vec::new(),
        }
    }
}

impl PluginConfig {
    /// Parse a config document.
    pub fn from_yaml(source: &str) -> Result<Self> {
        // An empty document is `null` to serde_yaml, treat it as all-defaults.
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source).context("invalid plugin config")
    }

    /// Load the config file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        Self::from_yaml(&source).with_context(|| format!("parsing config: {}", path.display()))
    }

    /// Write [`DEFAULT_CONFIG`] to `path` unless a file is already there.
    ///
    /// Returns `true` when the file was created.
    pub fn save_default(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating config directory: {}", parent.display()))?;
        }
        fs::write(path, DEFAULT_CONFIG)
            .with_context(|| format!("writing default config: {}", path.display()))?;
        Ok(true)
    }

    /// Rendered enter announcement, or `None` when disabled.
    #[must_use]
    pub fn enter_announcement(&self, name: &str, reason: &str) -> Option<String> {
        self.announce_enter
            .then(|| render_template(&self.announce_enter_message, name, reason))
    }

    /// Rendered leave announcement, or `None` when disabled.
    #[must_use]
    pub fn leave_announcement(&self, name: &str, reason: &str) -> Option<String> {
        self.announce_leave
            .then(|| render_template(&self.announce_leave_message, name, reason))
    }
}

/// Substitute placeholders, then translate color codes.
fn render_template(template: &str, name: &str, reason: &str) -> String {
    let text = template.replace("{name}", name).replace("{reason}", reason);
    translate_color_codes(COLOR_PREFIX, &text)
}

/// Where the console host keeps plugin files.
#[derive(Debug, Clone)]
pub struct DataPaths {
    /// Plugin data folder (holds `logs.txt`)
    pub data_dir: PathBuf,

    /// Config file (default: `<data_dir>/config.yml`)
    pub config_file: PathBuf,
}

impl DataPaths {
    /// Name of the audit log inside the data folder.
    pub const LOG_FILE: &'static str = "logs.txt";

    /// Paths rooted at `data_dir` with the default file names.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let config_file = data_dir.join("config.yml");
        Self {
            data_dir,
            config_file,
        }
    }

    /// Load paths from environment variables.
    ///
    /// - `ADMIN_MODE_DATA_DIR`: data folder (default: `plugins/AdminMode`)
    /// - `ADMIN_MODE_CONFIG`: config file override
    #[must_use]
    pub fn from_env() -> Self {
        let mut paths = Self::new(
            env::var("ADMIN_MODE_DATA_DIR").unwrap_or_else(|_| "plugins/AdminMode".into()),
        );
        if let Ok(config_file) = env::var("ADMIN_MODE_CONFIG") {
            paths.config_file = PathBuf::from(config_file);
        }
        paths
    }

    /// Path of the audit log.
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join(Self::LOG_FILE)
    }
}
