//! Register metadata: definitions, lookup tables and the catalog

mod catalog;
mod def;
mod lookup;
pub mod tables;
mod text;

pub use catalog::RegisterCatalog;
pub use def::{
    Access, NumericDef, RegisterClass, RegisterDef, Scale, Unit, APP_VER, REGISTER_UNDEFINED,
};
pub use lookup::{Label, LookupDef, LookupEntry, LookupError};
pub use text::{TextDef, TEXT_DEFS};
