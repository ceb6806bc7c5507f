//! Dispatcher: routes decoded values to bound entities
//!
//! Bindings are indexed by HEX register address and by TEXT label. Unbound
//! registers or labels can be bound lazily through an [`EntityFactory`]
//! while the per-kind auto-creation budget lasts.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use log::{debug, trace, warn};
use vedirect_protocol::{FrameKind, HexFrame, TextBlock};

use super::binding::EntityBinding;
use crate::error::ConfigError;
use crate::flavor::FlavorSet;
use crate::registers::{RegisterCatalog, RegisterDef};
use crate::traits::EntityFactory;

/// Binding table and lazy entity creation
pub struct Dispatcher {
    catalog: RegisterCatalog,
    active: FlavorSet,
    bindings: Vec<EntityBinding>,
    by_address: BTreeMap<u16, usize>,
    by_label: BTreeMap<String, usize>,
    factory: Option<Box<dyn EntityFactory>>,
    /// Remaining lazy creations for HEX registers
    hex_auto_create: u16,
    /// Remaining lazy creations for TEXT labels
    text_auto_create: u16,
}

impl Dispatcher {
    /// Create an empty dispatcher for the given active flavors
    ///
    /// Auto-creation is disabled until [`Self::set_auto_create`] grants a
    /// budget and a factory is installed.
    pub fn new(catalog: RegisterCatalog, active: FlavorSet) -> Self {
        Self {
            catalog,
            active,
            bindings: Vec::new(),
            by_address: BTreeMap::new(),
            by_label: BTreeMap::new(),
            factory: None,
            hex_auto_create: 0,
            text_auto_create: 0,
        }
    }

    pub fn catalog(&self) -> RegisterCatalog {
        self.catalog
    }

    pub fn active_flavors(&self) -> FlavorSet {
        self.active
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn bindings(&self) -> impl Iterator<Item = &EntityBinding> {
        self.bindings.iter()
    }

    /// Add a binding
    ///
    /// Fails with [`ConfigError::DuplicateBinding`] if its address or TEXT
    /// label already has a sink.
    pub fn bind(&mut self, binding: EntityBinding) -> Result<(), ConfigError> {
        if binding.def.has_address() && self.by_address.contains_key(&binding.def.address) {
            return Err(ConfigError::DuplicateBinding);
        }
        if let Some(label) = &binding.text_label {
            if self.by_label.contains_key(label.as_str()) {
                return Err(ConfigError::DuplicateBinding);
            }
        }
        self.insert(binding);
        Ok(())
    }

    pub fn set_factory(&mut self, factory: Box<dyn EntityFactory>) {
        self.factory = Some(factory);
    }

    /// Set the number of entities that may still be created lazily
    ///
    /// A limit of 0 disables auto-creation for that frame kind.
    pub fn set_auto_create(&mut self, kind: FrameKind, limit: u16) {
        match kind {
            FrameKind::Hex => self.hex_auto_create = limit,
            FrameKind::Text => self.text_auto_create = limit,
        }
    }

    pub fn auto_create_remaining(&self, kind: FrameKind) -> u16 {
        match kind {
            FrameKind::Hex => self.hex_auto_create,
            FrameKind::Text => self.text_auto_create,
        }
    }

    pub fn is_bound(&self, address: u16) -> bool {
        self.by_address.contains_key(&address)
    }

    pub fn is_label_bound(&self, label: &str) -> bool {
        self.by_label.contains_key(label)
    }

    /// Addresses with a bound entity, ascending
    pub fn bound_addresses(&self) -> impl Iterator<Item = u16> + '_ {
        self.by_address.keys().copied()
    }

    /// Route a `Get`, `Set` or `Async` frame
    pub fn on_hex_frame(&mut self, frame: &HexFrame) {
        match frame.register_id() {
            Some(address) if !frame.data().is_empty() => {
                self.on_decoded_value(address, frame.data())
            }
            _ => warn!("inconsistent frame: {}", frame),
        }
    }

    /// Decode a register payload and publish it to its entity
    pub fn on_decoded_value(&mut self, address: u16, data: &[u8]) {
        let index = match self.by_address.get(&address) {
            Some(&index) => index,
            None => match self.auto_create_hex(address) {
                Some(index) => index,
                None => {
                    trace!("no entity for register 0x{:04X}", address);
                    return;
                }
            },
        };
        self.bindings[index].publish_hex(data);
    }

    /// Publish every record of a validated TEXT block
    pub fn on_text_block(&mut self, block: &TextBlock) {
        for record in block {
            let label = record.name.as_str();
            let index = match self.by_label.get(label) {
                Some(&index) => index,
                None => match self.auto_create_text(label) {
                    Some(index) => index,
                    None => {
                        trace!("no entity for TEXT label {}", label);
                        continue;
                    }
                },
            };
            self.bindings[index].publish_text(record.value.as_str());
        }
    }

    /// Tell every entity its value is stale
    pub fn link_disconnected(&mut self) {
        for binding in &mut self.bindings {
            binding.link_disconnected();
        }
    }

    fn insert(&mut self, binding: EntityBinding) -> usize {
        let index = self.bindings.len();
        if binding.def.has_address() {
            self.by_address.entry(binding.def.address).or_insert(index);
        }
        if let Some(label) = &binding.text_label {
            self.by_label.entry(label.clone()).or_insert(index);
        }
        self.bindings.push(binding);
        index
    }

    fn auto_create_hex(&mut self, address: u16) -> Option<usize> {
        if self.hex_auto_create == 0 {
            return None;
        }
        let def = match self.catalog.by_address(address) {
            Some(def) if self.active.contains(def.flavor) => def.clone(),
            _ => RegisterDef::opaque(address),
        };
        let sink = self.factory.as_mut()?.create(&def, None)?;
        self.hex_auto_create -= 1;
        debug!("created entity for register 0x{:04X} {}", address, def.name);
        Some(self.insert(EntityBinding::new(def, sink)))
    }

    fn auto_create_text(&mut self, label: &str) -> Option<usize> {
        if self.text_auto_create == 0 {
            return None;
        }
        let known = self
            .catalog
            .by_text_label(label)
            .filter(|def| self.active.contains(def.flavor));

        // Same value already reported by a HEX entity, no budget consumed
        if let Some(&index) = known.and_then(|def| self.by_address.get(&def.address)) {
            self.by_label.insert(String::from(label), index);
            return Some(index);
        }

        let def = match known {
            Some(def) => def.clone(),
            None => RegisterDef::text_only(label),
        };
        let sink = self.factory.as_mut()?.create(&def, Some(label))?;
        self.text_auto_create -= 1;
        debug!("created entity for TEXT label {} {}", label, def.name);
        Some(self.insert(EntityBinding::new(def, sink).with_text_label(label)))
    }
}
