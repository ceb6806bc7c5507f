//! Single in-flight command session
//!
//! At most one request awaits its response on a link. Further sends fail
//! fast with [`crate::SendError::Busy`].

pub mod command;
pub mod machine;

pub use command::{Callback, CommandSession, Completion};
pub use machine::{SessionEvent, SessionState};
