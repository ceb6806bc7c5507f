//! Configuration types and lowering
//!
//! [`ManagerConfig`] holds the link settings, stored as postcard binary
//! data or read from TOML. [`ConfigRegistry`] turns entity declarations into
//! the [`crate::dispatch::Dispatcher`] binding table.

pub mod lowering;
pub mod persist;
pub mod types;

pub use lowering::{ConfigRegistry, RegisterRef};
pub use types::*;
