//! Entity bindings

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use super::value::RegisterValue;
use crate::registers::RegisterDef;
use crate::traits::EntitySink;

/// A sink attached to a register and/or a TEXT label
pub struct EntityBinding {
    pub(crate) def: RegisterDef,
    /// Derives a boolean from integer payloads
    pub(crate) mask: Option<u32>,
    pub(crate) text_label: Option<String>,
    pub(crate) sink: Box<dyn EntitySink>,
}

impl EntityBinding {
    pub fn new(def: RegisterDef, sink: Box<dyn EntitySink>) -> Self {
        Self {
            def,
            mask: None,
            text_label: None,
            sink,
        }
    }

    pub fn with_mask(mut self, mask: u32) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn with_text_label(mut self, label: &str) -> Self {
        self.text_label = Some(String::from(label));
        self
    }

    pub fn def(&self) -> &RegisterDef {
        &self.def
    }

    pub fn mask(&self) -> Option<u32> {
        self.mask
    }

    pub fn text_label(&self) -> Option<&str> {
        self.text_label.as_deref()
    }

    pub(crate) fn publish_hex(&mut self, data: &[u8]) {
        let value = RegisterValue::decode_hex(&self.def, data, self.mask);
        self.sink.publish(&value);
    }

    pub(crate) fn publish_text(&mut self, text: &str) {
        let value = RegisterValue::decode_text(&self.def, text, self.mask);
        self.sink.publish(&value);
    }

    pub(crate) fn link_disconnected(&mut self) {
        self.sink.link_disconnected();
    }
}

impl fmt::Debug for EntityBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityBinding")
            .field("address", &self.def.address)
            .field("name", &self.def.name)
            .field("mask", &self.mask)
            .field("text_label", &self.text_label)
            .finish_non_exhaustive()
    }
}
