//! Entity abstraction traits
//!
//! These traits define the interface between the protocol engine and the
//! host-specific entities that consume decoded values.

pub mod sink;

pub use sink::{EntityFactory, EntitySink};
