//! Configuration lowering
//!
//! [`ConfigRegistry`] validates entity declarations against the active
//! flavors and builds the [`Dispatcher`] binding table. It only lives for
//! the duration of startup; [`ConfigRegistry::finish`] hands over the
//! result.

use alloc::boxed::Box;

use log::debug;
use vedirect_protocol::{FrameKind, MAX_NAME_LEN};

use super::types::ManagerConfig;
use crate::dispatch::{Dispatcher, EntityBinding};
use crate::error::ConfigError;
use crate::flavor::{FlavorGraph, FlavorSet};
use crate::registers::{RegisterCatalog, RegisterDef};
use crate::traits::{EntityFactory, EntitySink};

/// Register targeted by an entity declaration
#[derive(Debug, Clone)]
pub enum RegisterRef<'a> {
    /// Catalog symbol, e.g. `BAT_TEMPERATURE`
    Symbol(&'a str),
    /// Custom definition
    Definition(RegisterDef),
    /// TEXT record label, e.g. `SOC`
    Text(&'a str),
}

/// Startup registry for entity declarations
pub struct ConfigRegistry {
    catalog: RegisterCatalog,
    configured: FlavorSet,
    active: FlavorSet,
    dispatcher: Dispatcher,
}

impl ConfigRegistry {
    /// Validate the flavor set and prepare an empty binding table
    ///
    /// Fails with [`ConfigError::FlavorCycle`] if `graph` is cyclic.
    pub fn new(
        config: &ManagerConfig,
        catalog: RegisterCatalog,
        graph: &FlavorGraph,
    ) -> Result<Self, ConfigError> {
        graph.validate()?;
        let configured = config.flavor_set();
        let active = graph.inflate_all(configured)?;
        debug!("active flavors {}", active);

        let mut dispatcher = Dispatcher::new(catalog, active);
        dispatcher.set_auto_create(FrameKind::Hex, config.hex_auto_create_limit);
        dispatcher.set_auto_create(FrameKind::Text, config.text_auto_create_limit);
        Ok(Self {
            catalog,
            configured,
            active,
            dispatcher,
        })
    }

    /// Inflated flavor set
    pub fn active_flavors(&self) -> FlavorSet {
        self.active
    }

    /// Configured flavors reduced to the smallest generating set
    pub fn minimal_flavors(&self, graph: &FlavorGraph) -> Result<FlavorSet, ConfigError> {
        Ok(graph.deflate(self.configured)?)
    }

    /// Look up the definition of `target`
    pub fn resolve(&self, target: &RegisterRef<'_>) -> Result<RegisterDef, ConfigError> {
        let def = match target {
            RegisterRef::Symbol(symbol) => self
                .catalog
                .by_symbol(symbol)
                .cloned()
                .ok_or(ConfigError::UnknownRegister)?,
            RegisterRef::Definition(def) => def.clone(),
            RegisterRef::Text(label) => {
                check_label(label)?;
                self.catalog
                    .by_text_label(label)
                    .cloned()
                    .unwrap_or_else(|| RegisterDef::text_only(label))
            }
        };
        self.check_flavor(&def)?;
        Ok(def)
    }

    /// Bind `sink` to a register and optionally a TEXT label
    ///
    /// A catalog symbol with a known TEXT counterpart also receives that
    /// label's values unless the label is already taken.
    pub fn init_register(
        &mut self,
        sink: Box<dyn EntitySink>,
        target: RegisterRef<'_>,
        text_label: Option<&str>,
    ) -> Result<(), ConfigError> {
        let def = self.resolve(&target)?;
        let label = match (text_label, &target) {
            (Some(label), _) => Some(label),
            (None, RegisterRef::Text(label)) => Some(*label),
            (None, RegisterRef::Symbol(symbol)) => self
                .catalog
                .text_label_of(symbol)
                .filter(|label| !self.dispatcher.is_label_bound(label)),
            (None, RegisterRef::Definition(_)) => None,
        };

        let mut binding = EntityBinding::new(def, sink);
        if let Some(label) = label {
            check_label(label)?;
            binding = binding.with_text_label(label);
        }
        self.dispatcher.bind(binding)
    }

    /// Add a fully built binding, e.g. one carrying a mask
    pub fn bind(&mut self, binding: EntityBinding) -> Result<(), ConfigError> {
        self.check_flavor(binding.def())?;
        if let Some(label) = binding.text_label() {
            check_label(label)?;
        }
        self.dispatcher.bind(binding)
    }

    pub fn set_factory(&mut self, factory: Box<dyn EntityFactory>) {
        self.dispatcher.set_factory(factory);
    }

    /// Finish lowering
    pub fn finish(self) -> Dispatcher {
        debug!("{} entities bound", self.dispatcher.len());
        self.dispatcher
    }

    fn check_flavor(&self, def: &RegisterDef) -> Result<(), ConfigError> {
        if self.active.contains(def.flavor) {
            Ok(())
        } else {
            Err(ConfigError::FlavorUnavailable(def.flavor))
        }
    }
}

fn check_label(label: &str) -> Result<(), ConfigError> {
    if label.is_empty() || label.len() > MAX_NAME_LEN {
        Err(ConfigError::UnknownTextLabel)
    } else {
        Ok(())
    }
}
