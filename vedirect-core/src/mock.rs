//! Test doubles shared by the unit tests

use std::boxed::Box;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::string::{String, ToString};
use std::vec::Vec;

use vedirect_hal::UartTx;

use crate::dispatch::RegisterValue;
use crate::registers::RegisterDef;
use crate::traits::{EntityFactory, EntitySink};

/// Transmit side that records every line written
#[derive(Clone, Default)]
pub struct MockUart {
    written: Rc<RefCell<Vec<u8>>>,
    flushed: Rc<Cell<usize>>,
    pub fail: bool,
}

impl MockUart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames written so far, without the trailing newline
    pub fn frames(&self) -> Vec<String> {
        let written = self.written.borrow();
        String::from_utf8_lossy(&written)
            .split_terminator('\n')
            .map(|line| line.to_string())
            .collect()
    }

    pub fn flushes(&self) -> usize {
        self.flushed.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

impl UartTx for MockUart {
    type Error = MockError;

    fn write_blocking(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        if self.fail {
            return Err(MockError);
        }
        self.written.borrow_mut().extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushed.set(self.flushed.get() + 1);
        Ok(())
    }
}

/// What a recording sink saw
#[derive(Debug, Clone, PartialEq)]
pub enum Published {
    Numeric(f64),
    Boolean(bool),
    Unknown,
    /// Any other value, rendered
    Rendered(String),
    Disconnected,
}

pub struct RecordingSink(Rc<RefCell<Vec<Published>>>);

impl EntitySink for RecordingSink {
    fn publish(&mut self, value: &RegisterValue<'_>) {
        let published = match value {
            RegisterValue::Numeric { value, .. } => Published::Numeric(*value),
            RegisterValue::Boolean(value) => Published::Boolean(*value),
            RegisterValue::Unknown => Published::Unknown,
            other => Published::Rendered(other.to_string()),
        };
        self.0.borrow_mut().push(published);
    }

    fn link_disconnected(&mut self) {
        self.0.borrow_mut().push(Published::Disconnected);
    }
}

pub fn recording_sink() -> (Box<dyn EntitySink>, Rc<RefCell<Vec<Published>>>) {
    let published = Rc::new(RefCell::new(Vec::new()));
    (Box::new(RecordingSink(published.clone())), published)
}

/// Created entities as `(register name, TEXT label)`
pub type Created = Rc<RefCell<Vec<(String, Option<String>)>>>;

pub struct RecordingFactory {
    created: Created,
    /// Refuse every request after recording it
    pub decline: bool,
}

impl RecordingFactory {
    pub fn new() -> (Self, Created) {
        let created = Created::default();
        let factory = Self {
            created: created.clone(),
            decline: false,
        };
        (factory, created)
    }
}

impl EntityFactory for RecordingFactory {
    fn create(
        &mut self,
        def: &RegisterDef,
        text_label: Option<&str>,
    ) -> Option<Box<dyn EntitySink>> {
        self.created
            .borrow_mut()
            .push((def.name.to_string(), text_label.map(|l| l.to_string())));
        if self.decline {
            return None;
        }
        Some(recording_sink().0)
    }
}
