//! Permissions checked by the plugin itself.
//!
//! The permissions granted while in admin mode come from configuration; the
//! ones here gate the plugin's own commands.

/// Permission node checked by the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginPermission {
    /// Toggle admin mode for oneself.
    Toggle,
}

impl PluginPermission {
    /// Returns the dotted permission node as the host knows it.
    ///
    /// # Examples
    ///
    /// ```
    /// use adminmode::permissions::PluginPermission;
    ///
    /// assert_eq!(PluginPermission::Toggle.node(), "adminmode.toggle");
    /// ```
    #[must_use]
    pub const fn node(&self) -> &'static str {
        match self {
            Self::Toggle => "adminmode.toggle",
        }
    }

    /// Returns all plugin permissions.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Toggle]
    }

    /// Returns a human-readable description of the permission.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Toggle => "Enter and leave admin mode",
        }
    }
}
