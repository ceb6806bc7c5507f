//! Entity sinks and factories

use alloc::boxed::Box;

use crate::dispatch::RegisterValue;
use crate::registers::RegisterDef;

/// Consumer of decoded register values
///
/// Sinks run on the same loop that services the link, so `publish` must
/// return promptly.
pub trait EntitySink {
    /// Receive a freshly decoded value
    fn publish(&mut self, value: &RegisterValue<'_>);

    /// The link went down; the last published value is stale
    fn link_disconnected(&mut self) {}
}

/// Builds sinks for registers or TEXT labels seen without a binding
pub trait EntityFactory {
    /// Create a sink for `def`
    ///
    /// `text_label` is set when the value arrived in a TEXT block. Returning
    /// `None` declines the register; it will be offered again next time.
    fn create(&mut self, def: &RegisterDef, text_label: Option<&str>)
        -> Option<Box<dyn EntitySink>>;
}

impl<F> EntitySink for F
where
    F: FnMut(&RegisterValue<'_>),
{
    fn publish(&mut self, value: &RegisterValue<'_>) {
        self(value)
    }
}
