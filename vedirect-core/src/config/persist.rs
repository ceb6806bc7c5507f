//! Configuration persistence
//!
//! Binary form uses postcard, text form uses TOML with the field names as
//! keys and flavors by their protocol names.

#[cfg(feature = "serde")]
use crate::error::ConfigError;
#[cfg(feature = "serde")]
use super::types::ManagerConfig;

#[cfg(feature = "serde")]
impl ManagerConfig {
    /// Serialize into `buffer`, returning the used part
    pub fn to_slice<'a>(&self, buffer: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buffer).map_err(|_| ConfigError::Parse)
    }

    /// Deserialize postcard binary data
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        postcard::from_bytes(bytes).map_err(|_| {
            log::warn!("invalid binary configuration");
            ConfigError::Parse
        })
    }
}

#[cfg(feature = "toml")]
impl ManagerConfig {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|e| {
            log::warn!("TOML parse error: {}", e);
            ConfigError::Parse
        })
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use crate::flavor::Flavor;

    #[test]
    fn test_postcard_round_trip() {
        let mut config = ManagerConfig::default();
        config.flavors.clear();
        config.flavors.push(Flavor::MpptRs).unwrap();
        config.hex_auto_create_limit = 12;

        let mut buffer = [0u8; 64];
        let bytes = config.to_slice(&mut buffer).unwrap();
        assert_eq!(ManagerConfig::from_bytes(bytes).unwrap(), config);
    }

    #[test]
    fn test_truncated_bytes() {
        assert_eq!(ManagerConfig::from_bytes(&[0x01]), Err(ConfigError::Parse));
    }
}
