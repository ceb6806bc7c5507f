//! Error types
//!
//! Runtime errors ([`RequestError`], [`SendError`], frame errors) never stop
//! the link. [`ConfigError`] is raised while lowering the configuration and
//! aborts startup.

use core::fmt;

use vedirect_protocol::FrameError;

use crate::flavor::{Flavor, FlavorError};
use crate::registers::LookupError;

/// Outcome of a request that did not complete successfully
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RequestError {
    /// No response before the deadline, or the link dropped
    Timeout,
    /// Response does not match the pending request
    Unexpected,
    /// Device answered with `Error`, `Unknown` or an unclassified command
    Remote,
    /// Response carried non-zero flags
    Flags,
}

/// Reasons a request could not be sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendError {
    /// Another request is awaiting its response
    Busy,
    /// The request could not be encoded as a HEX frame
    Encoding,
    /// Writing to the serial link failed
    Link,
}

/// Configuration errors, fatal at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Address or TEXT label already has a bound entity
    DuplicateBinding,
    /// Register flavor is not among the active flavors
    FlavorUnavailable(Flavor),
    /// Symbol not found in the register catalog
    UnknownRegister,
    /// TEXT label is empty or too long
    UnknownTextLabel,
    /// Flavor graph contains a cycle through this flavor
    FlavorCycle(Flavor),
    /// Lookup table values are not strictly ascending at this index
    UnsortedLookup { index: usize },
    /// Serialized configuration could not be decoded
    Parse,
}

impl From<FlavorError> for ConfigError {
    fn from(error: FlavorError) -> Self {
        match error {
            FlavorError::Cycle(flavor) => ConfigError::FlavorCycle(flavor),
        }
    }
}

impl From<LookupError> for ConfigError {
    fn from(error: LookupError) -> Self {
        match error {
            LookupError::Unsorted { index } => ConfigError::UnsortedLookup { index },
        }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Timeout => f.write_str("timeout"),
            RequestError::Unexpected => f.write_str("unexpected"),
            RequestError::Remote => f.write_str("remote"),
            RequestError::Flags => f.write_str("flags"),
        }
    }
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendError::Busy => f.write_str("request pending"),
            SendError::Encoding => f.write_str("wrong encoding"),
            SendError::Link => f.write_str("link write failed"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::DuplicateBinding => f.write_str("duplicate binding"),
            ConfigError::FlavorUnavailable(flavor) => {
                write!(f, "flavor {} not available", flavor.name())
            }
            ConfigError::UnknownRegister => f.write_str("unknown register"),
            ConfigError::UnknownTextLabel => f.write_str("invalid TEXT label"),
            ConfigError::FlavorCycle(flavor) => {
                write!(f, "flavor graph cycle through {}", flavor.name())
            }
            ConfigError::UnsortedLookup { index } => {
                write!(f, "lookup values not ascending at index {}", index)
            }
            ConfigError::Parse => f.write_str("configuration parse error"),
        }
    }
}

/// Any error raised by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    Frame(FrameError),
    Request(RequestError),
    Send(SendError),
    Config(ConfigError),
}

impl From<FrameError> for Error {
    fn from(error: FrameError) -> Self {
        Error::Frame(error)
    }
}

impl From<RequestError> for Error {
    fn from(error: RequestError) -> Self {
        Error::Request(error)
    }
}

impl From<SendError> for Error {
    fn from(error: SendError) -> Self {
        Error::Send(error)
    }
}

impl From<ConfigError> for Error {
    fn from(error: ConfigError) -> Self {
        Error::Config(error)
    }
}

impl From<FlavorError> for Error {
    fn from(error: FlavorError) -> Self {
        Error::Config(error.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Frame(e) => write!(f, "frame: {}", e),
            Error::Request(e) => write!(f, "request: {}", e),
            Error::Send(e) => write!(f, "send: {}", e),
            Error::Config(e) => write!(f, "config: {}", e),
        }
    }
}
