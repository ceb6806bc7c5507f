//! Register definitions

use alloc::borrow::Cow;
use alloc::string::String;

use vedirect_protocol::DataType;

use super::lookup::LookupDef;
use crate::flavor::Flavor;

/// Address used by definitions that only exist in TEXT frames
pub const REGISTER_UNDEFINED: u16 = 0x0000;

/// Address of the firmware version register
pub const APP_VER: u16 = 0x0102;

/// Register access rights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access {
    /// Fixed read-only value
    Constant,
    /// Measurement
    ReadOnly,
    /// Configuration setting
    ReadWrite,
}

/// Engineering unit of numeric registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Unit {
    None,
    /// Measurement with undocumented meaning
    Unknown,
    A,
    V,
    VA,
    W,
    Ah,
    KWh,
    SocPercentage,
    Minute,
    Celsius,
    /// Raw value in 0.01 K, reported in °C
    Kelvin,
    Hour,
    Percentage,
}

impl Unit {
    pub const fn symbol(self) -> Option<&'static str> {
        match self {
            Unit::None | Unit::Unknown => None,
            Unit::A => Some("A"),
            Unit::V => Some("V"),
            Unit::VA => Some("VA"),
            Unit::W => Some("W"),
            Unit::Ah => Some("Ah"),
            Unit::KWh => Some("kWh"),
            Unit::SocPercentage | Unit::Percentage => Some("%"),
            Unit::Minute => Some("min"),
            Unit::Celsius | Unit::Kelvin => Some("°C"),
            Unit::Hour => Some("h"),
        }
    }
}

/// Resolution of a numeric register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Scale {
    S1,
    S0_1,
    S0_01,
    S0_001,
    S0_25,
}

impl Scale {
    /// Raw counts per engineering unit
    pub const fn divisor(self) -> f64 {
        match self {
            Scale::S1 => 1.0,
            Scale::S0_1 => 10.0,
            Scale::S0_01 => 100.0,
            Scale::S0_001 => 1000.0,
            Scale::S0_25 => 4.0,
        }
    }

    /// Engineering units per raw count
    pub fn factor(self) -> f64 {
        1.0 / self.divisor()
    }

    /// Decimal digits needed to display a scaled value
    pub const fn decimals(self) -> u8 {
        match self {
            Scale::S1 => 0,
            Scale::S0_1 => 1,
            Scale::S0_01 | Scale::S0_25 => 2,
            Scale::S0_001 => 3,
        }
    }
}

/// Unit and scales of a numeric register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NumericDef {
    pub unit: Unit,
    /// Resolution of HEX values
    pub scale: Scale,
    /// Resolution of the matching TEXT record
    pub text_scale: Scale,
}

/// Data semantics of a register
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterClass {
    /// Untyped payload, rendered as hex
    Void,
    /// Zero is false, anything else true
    Boolean,
    /// Set of flags; lookup values are bit positions
    Bitmask(LookupDef),
    /// Enumerated value
    Enum(LookupDef),
    Numeric(NumericDef),
    /// Text payload
    String,
}

impl RegisterClass {
    pub fn lookup(&self) -> Option<&LookupDef> {
        match self {
            RegisterClass::Bitmask(lookup) | RegisterClass::Enum(lookup) => Some(lookup),
            _ => None,
        }
    }

    pub fn numeric(&self) -> Option<&NumericDef> {
        match self {
            RegisterClass::Numeric(numeric) => Some(numeric),
            _ => None,
        }
    }
}

/// Static description of a register
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterDef {
    pub address: u16,
    /// Symbolic name, e.g. `BAT_TEMPERATURE`
    pub name: Cow<'static, str>,
    pub class: RegisterClass,
    pub access: Access,
    /// Wire encoding; `Variadic` means inferred from the payload
    pub data_type: DataType,
    pub flavor: Flavor,
}

impl RegisterDef {
    pub const fn void(flavor: Flavor, address: u16, name: &'static str, access: Access) -> Self {
        Self {
            address,
            name: Cow::Borrowed(name),
            class: RegisterClass::Void,
            access,
            data_type: DataType::Variadic,
            flavor,
        }
    }

    pub const fn boolean(flavor: Flavor, address: u16, name: &'static str, access: Access) -> Self {
        Self {
            address,
            name: Cow::Borrowed(name),
            class: RegisterClass::Boolean,
            access,
            data_type: DataType::Un8,
            flavor,
        }
    }

    pub const fn string(flavor: Flavor, address: u16, name: &'static str, access: Access) -> Self {
        Self {
            address,
            name: Cow::Borrowed(name),
            class: RegisterClass::String,
            access,
            data_type: DataType::Variadic,
            flavor,
        }
    }

    pub const fn bitmask(
        flavor: Flavor,
        address: u16,
        name: &'static str,
        access: Access,
        data_type: DataType,
        lookup: LookupDef,
    ) -> Self {
        Self {
            address,
            name: Cow::Borrowed(name),
            class: RegisterClass::Bitmask(lookup),
            access,
            data_type,
            flavor,
        }
    }

    pub const fn enumeration(
        flavor: Flavor,
        address: u16,
        name: &'static str,
        access: Access,
        lookup: LookupDef,
    ) -> Self {
        Self {
            address,
            name: Cow::Borrowed(name),
            class: RegisterClass::Enum(lookup),
            access,
            data_type: DataType::Un8,
            flavor,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub const fn numeric(
        flavor: Flavor,
        address: u16,
        name: &'static str,
        access: Access,
        data_type: DataType,
        unit: Unit,
        scale: Scale,
        text_scale: Scale,
    ) -> Self {
        Self {
            address,
            name: Cow::Borrowed(name),
            class: RegisterClass::Numeric(NumericDef {
                unit,
                scale,
                text_scale,
            }),
            access,
            data_type,
            flavor,
        }
    }

    /// Opaque read-only definition for an address missing from the catalog
    pub fn opaque(address: u16) -> Self {
        Self::void(Flavor::Any, address, "", Access::ReadOnly)
    }

    /// Text-rendered definition for a TEXT label missing from the catalog
    pub fn text_only(label: &str) -> Self {
        Self {
            address: REGISTER_UNDEFINED,
            name: Cow::Owned(String::from(label)),
            class: RegisterClass::String,
            access: Access::ReadOnly,
            data_type: DataType::Variadic,
            flavor: Flavor::Any,
        }
    }

    /// False for definitions that only exist in TEXT frames
    pub fn has_address(&self) -> bool {
        self.address != REGISTER_UNDEFINED
    }

    pub fn is_writable(&self) -> bool {
        self.access == Access::ReadWrite
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_values() {
        assert_eq!(Scale::S0_01.divisor(), 100.0);
        assert_eq!(Scale::S0_25.factor(), 0.25);
        assert_eq!(Scale::S0_001.decimals(), 3);
        assert_eq!(Scale::S0_25.decimals(), 2);
    }

    #[test]
    fn test_unit_symbols() {
        assert_eq!(Unit::KWh.symbol(), Some("kWh"));
        assert_eq!(Unit::Kelvin.symbol(), Some("°C"));
        assert_eq!(Unit::None.symbol(), None);
    }

    #[test]
    fn test_fallback_definitions() {
        let opaque = RegisterDef::opaque(0x1234);
        assert_eq!(opaque.class, RegisterClass::Void);
        assert_eq!(opaque.access, Access::ReadOnly);
        assert!(opaque.has_address());

        let text = RegisterDef::text_only("XYZ");
        assert_eq!(text.class, RegisterClass::String);
        assert!(!text.has_address());
        assert_eq!(text.name, "XYZ");
    }
}
