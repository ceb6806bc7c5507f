//! Configuration type definitions

use heapless::Vec;

use crate::flavor::{Flavor, FlavorSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum configured flavors
pub const MAX_FLAVORS: usize = 16;

/// HEX auto-creation budget when enabled without an explicit count
pub const DEFAULT_HEX_AUTO_CREATE_LIMIT: u16 = 100;

/// TEXT auto-creation budget when enabled without an explicit count
pub const DEFAULT_TEXT_AUTO_CREATE_LIMIT: u16 = 32;

/// Seconds between liveness pings
pub const DEFAULT_PING_TIMEOUT_S: u32 = 60;

/// Silence after which the link is considered down
pub const DEFAULT_LINK_TIMEOUT_MS: u32 = 5000;

/// Link manager configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ManagerConfig {
    /// Device families; their dependencies are added automatically
    pub flavors: Vec<Flavor, MAX_FLAVORS>,
    /// Liveness ping interval, 0 disables it
    pub ping_timeout_s: u32,
    /// Response deadline for requests
    pub command_timeout_ms: u32,
    /// Silence before the link is considered down
    pub link_timeout_ms: u32,
    /// Entities created for unbound HEX registers, 0 disables
    pub hex_auto_create_limit: u16,
    /// Entities created for unbound TEXT labels, 0 disables
    pub text_auto_create_limit: u16,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        let mut flavors = Vec::new();
        // Capacity is never zero
        let _ = flavors.push(Flavor::All);
        Self {
            flavors,
            ping_timeout_s: DEFAULT_PING_TIMEOUT_S,
            command_timeout_ms: crate::session::command::DEFAULT_COMMAND_TIMEOUT_MS,
            link_timeout_ms: DEFAULT_LINK_TIMEOUT_MS,
            hex_auto_create_limit: 0,
            text_auto_create_limit: DEFAULT_TEXT_AUTO_CREATE_LIMIT,
        }
    }
}

impl ManagerConfig {
    /// Configured flavors, not inflated
    pub fn flavor_set(&self) -> FlavorSet {
        self.flavors.iter().copied().collect()
    }
}

/// Auto-creation setting for one frame kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AutoCreate {
    /// On with the default budget, or off
    Enabled(bool),
    /// Explicit budget, 0 is off
    Limit(u16),
}

impl AutoCreate {
    /// Entity budget for the given default
    pub fn limit(self, default: u16) -> u16 {
        match self {
            AutoCreate::Enabled(true) => default,
            AutoCreate::Enabled(false) => 0,
            AutoCreate::Limit(limit) => limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ManagerConfig::default();
        assert_eq!(config.flavors.as_slice(), &[Flavor::All]);
        assert_eq!(config.ping_timeout_s, 60);
        assert_eq!(config.command_timeout_ms, 1000);
        assert_eq!(config.link_timeout_ms, 5000);
        assert_eq!(config.hex_auto_create_limit, 0);
        assert_eq!(config.text_auto_create_limit, 32);
    }

    #[test]
    fn test_auto_create_limit() {
        assert_eq!(AutoCreate::Enabled(true).limit(100), 100);
        assert_eq!(AutoCreate::Enabled(false).limit(100), 0);
        assert_eq!(AutoCreate::Limit(7).limit(100), 7);
    }
}
