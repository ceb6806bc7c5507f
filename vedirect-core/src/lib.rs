//! Board-agnostic VE.Direct protocol engine
//!
//! This crate holds everything above the wire codec that does not depend on
//! a specific platform:
//!
//! - Register catalog with enum/bitmask lookup tables
//! - Flavor (device family) dependency graph
//! - Single in-flight command session with timeouts
//! - Dispatcher decoding register values into bound entities
//! - Configuration types and the lowering registry
//! - [`Manager`], tying the link, session and dispatcher together

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod config;
pub mod dispatch;
pub mod error;
pub mod flavor;
pub mod manager;
pub mod registers;
pub mod session;
pub mod traits;

#[cfg(test)]
pub(crate) mod mock;

pub use error::{ConfigError, Error, RequestError, SendError};
pub use flavor::{Flavor, FlavorGraph, FlavorSet};
pub use manager::Manager;
pub use registers::{RegisterCatalog, RegisterDef};
