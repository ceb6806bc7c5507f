//! Register value decoding and routing
//!
//! The [`Dispatcher`] owns every [`EntityBinding`] and hands decoded values
//! from HEX registers and TEXT records to their sinks.

pub mod binding;
pub mod dispatcher;
pub mod value;

pub use binding::EntityBinding;
pub use dispatcher::Dispatcher;
pub use value::{
    encode_numeric, AppVersion, BitmaskValue, EnumValue, HexData, RegisterValue, Release,
};
