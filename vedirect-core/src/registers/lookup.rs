//! Enum and bitmask lookup tables

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Lookup table construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LookupError {
    /// Entry at `index` is not greater than its predecessor
    Unsorted { index: usize },
}

/// One `(value, label)` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupEntry {
    pub value: u32,
    pub label: Cow<'static, str>,
}

impl LookupEntry {
    pub const fn new(value: u32, label: &'static str) -> Self {
        Self {
            value,
            label: Cow::Borrowed(label),
        }
    }
}

/// Value to label table, sorted by strictly ascending value
///
/// Enum registers look up a single value. Bitmask registers look up the
/// position of every set bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupDef {
    entries: Cow<'static, [LookupEntry]>,
}

impl LookupDef {
    /// Build a table from runtime data, rejecting unsorted or duplicate values
    pub fn new<L: Into<String>>(entries: Vec<(u32, L)>) -> Result<Self, LookupError> {
        let entries: Vec<LookupEntry> = entries
            .into_iter()
            .map(|(value, label)| LookupEntry {
                value,
                label: Cow::Owned(label.into()),
            })
            .collect();
        if let Some(index) = entries
            .windows(2)
            .position(|pair| pair[0].value >= pair[1].value)
        {
            return Err(LookupError::Unsorted { index: index + 1 });
        }
        Ok(Self {
            entries: Cow::Owned(entries),
        })
    }

    /// Wrap a built-in table
    ///
    /// The table must already be sorted; this is checked by the catalog
    /// tests rather than at runtime.
    pub const fn from_static(entries: &'static [LookupEntry]) -> Self {
        Self {
            entries: Cow::Borrowed(entries),
        }
    }

    pub fn entries(&self) -> &[LookupEntry] {
        &self.entries
    }

    pub fn is_sorted(&self) -> bool {
        self.entries.windows(2).all(|pair| pair[0].value < pair[1].value)
    }

    /// Label of `value`, if defined
    pub fn find(&self, value: u32) -> Option<&str> {
        self.entries
            .binary_search_by_key(&value, |entry| entry.value)
            .ok()
            .map(|index| self.entries[index].label.as_ref())
    }

    /// Label of `value`, falling back to its hex rendering
    pub fn label(&self, value: u32) -> Label<'_> {
        match self.find(value) {
            Some(label) => Label::Known(label),
            None => Label::Unknown(value),
        }
    }

    /// Value carrying `label`
    pub fn value_of(&self, label: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.value)
    }
}

/// Result of a table lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label<'a> {
    Known(&'a str),
    /// No entry for this value; renders as `0xNN`
    Unknown(u32),
}

impl fmt::Display for Label<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Known(label) => f.write_str(label),
            Label::Unknown(value) => write!(f, "0x{:02X}", value),
        }
    }
}
