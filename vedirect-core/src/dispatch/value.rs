//! Register value decoding
//!
//! Converts raw HEX payloads and TEXT record values into engineering
//! values, following the register's class.

use core::fmt;

use heapless::String;
use vedirect_protocol::DataType;

use crate::registers::{Label, LookupDef, NumericDef, RegisterClass, RegisterDef, Unit, APP_VER};

/// Offset between the raw Kelvin encoding (0.01 K) and 0 °C
const KELVIN_OFFSET: i64 = 27316;

/// A decoded register value, borrowing from the definition and payload
#[derive(Debug, Clone, PartialEq)]
pub enum RegisterValue<'a> {
    /// Device reported "not available", or the payload was unusable
    Unknown,
    Boolean(bool),
    /// Engineering value and the decimals its resolution supports
    Numeric { value: f64, decimals: u8 },
    Enum(EnumValue<'a>),
    Bitmask(BitmaskValue<'a>),
    Text(&'a str),
    Version(AppVersion),
    Bytes(HexData<'a>),
}

impl<'a> RegisterValue<'a> {
    /// Decode a HEX register payload
    ///
    /// `mask` derives a boolean from integer classes.
    pub fn decode_hex(def: &'a RegisterDef, data: &'a [u8], mask: Option<u32>) -> Self {
        match &def.class {
            RegisterClass::Void if def.address == APP_VER => AppVersion::from_hex(data)
                .map(RegisterValue::Version)
                .unwrap_or(RegisterValue::Bytes(HexData(data))),
            RegisterClass::Void => RegisterValue::Bytes(HexData(data)),
            RegisterClass::String => {
                let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
                match core::str::from_utf8(&data[..end]) {
                    Ok(text) => RegisterValue::Text(text),
                    Err(_) => RegisterValue::Bytes(HexData(data)),
                }
            }
            RegisterClass::Boolean => match read_raw(def.data_type, data) {
                Some(raw) => RegisterValue::Boolean(truthy(raw as u32, mask)),
                None => RegisterValue::Unknown,
            },
            RegisterClass::Enum(lookup) => match data.first() {
                Some(&raw) => Self::enumeration(lookup, raw as u32, mask),
                None => RegisterValue::Unknown,
            },
            RegisterClass::Bitmask(lookup) => {
                let data_type = effective_type(def.data_type, data);
                match read_u32(data) {
                    Some(raw) if !is_unknown(data_type, raw as i64) => {
                        Self::bitmask(lookup, raw, mask)
                    }
                    _ => RegisterValue::Unknown,
                }
            }
            RegisterClass::Numeric(numeric) => {
                let data_type = effective_type(def.data_type, data);
                match data_type.and_then(|ty| ty.read(data)) {
                    Some(raw) if !is_unknown(data_type, raw) => {
                        RegisterValue::Numeric {
                            value: numeric.scale_raw(raw),
                            decimals: numeric.scale.decimals(),
                        }
                    }
                    _ => RegisterValue::Unknown,
                }
            }
        }
    }

    /// Decode a TEXT record value
    pub fn decode_text(def: &'a RegisterDef, text: &'a str, mask: Option<u32>) -> Self {
        match &def.class {
            RegisterClass::Void if def.address == APP_VER => AppVersion::from_text(text)
                .map(RegisterValue::Version)
                .unwrap_or(RegisterValue::Text(text)),
            RegisterClass::Void | RegisterClass::String => RegisterValue::Text(text),
            RegisterClass::Boolean => match text {
                "ON" => RegisterValue::Boolean(true),
                "OFF" => RegisterValue::Boolean(false),
                _ => match parse_integer(text) {
                    Some(raw) => RegisterValue::Boolean(truthy(raw, mask)),
                    None => RegisterValue::Text(text),
                },
            },
            RegisterClass::Enum(lookup) => match parse_integer(text) {
                Some(raw) => Self::enumeration(lookup, raw, mask),
                None => RegisterValue::Text(text),
            },
            RegisterClass::Bitmask(lookup) => match parse_integer(text) {
                Some(raw) => Self::bitmask(lookup, raw, mask),
                None => RegisterValue::Text(text),
            },
            RegisterClass::Numeric(numeric) => match text.parse::<f64>() {
                Ok(value) => RegisterValue::Numeric {
                    value: value / numeric.text_scale.divisor(),
                    decimals: numeric.text_scale.decimals(),
                },
                Err(_) => RegisterValue::Unknown,
            },
        }
    }

    fn enumeration(lookup: &'a LookupDef, raw: u32, mask: Option<u32>) -> Self {
        match mask {
            Some(_) => RegisterValue::Boolean(truthy(raw, mask)),
            None => RegisterValue::Enum(EnumValue {
                raw,
                label: lookup.label(raw),
            }),
        }
    }

    fn bitmask(lookup: &'a LookupDef, raw: u32, mask: Option<u32>) -> Self {
        match mask {
            Some(_) => RegisterValue::Boolean(truthy(raw, mask)),
            None => RegisterValue::Bitmask(BitmaskValue { raw, lookup }),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RegisterValue::Numeric { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RegisterValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, RegisterValue::Unknown)
    }
}

impl fmt::Display for RegisterValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterValue::Unknown => f.write_str("unknown"),
            RegisterValue::Boolean(true) => f.write_str("ON"),
            RegisterValue::Boolean(false) => f.write_str("OFF"),
            RegisterValue::Numeric { value, decimals } => {
                write!(f, "{:.*}", *decimals as usize, value)
            }
            RegisterValue::Enum(value) => write!(f, "{}", value.label),
            RegisterValue::Bitmask(value) => write!(f, "{}", value),
            RegisterValue::Text(text) => f.write_str(text),
            RegisterValue::Version(version) => write!(f, "{}", version),
            RegisterValue::Bytes(data) => write!(f, "{}", data),
        }
    }
}

/// Enumerated value with its label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumValue<'a> {
    pub raw: u32,
    pub label: Label<'a>,
}

/// Set of flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmaskValue<'a> {
    pub raw: u32,
    lookup: &'a LookupDef,
}

impl<'a> BitmaskValue<'a> {
    pub fn contains(&self, bit: u32) -> bool {
        bit < 32 && self.raw & (1 << bit) != 0
    }

    /// Labels of the set bits, lowest first
    pub fn labels(&self) -> impl Iterator<Item = Label<'a>> + 'a {
        let raw = self.raw;
        let lookup = self.lookup;
        (0..32u32)
            .filter(move |bit| raw & (1 << bit) != 0)
            .map(move |bit| lookup.label(bit))
    }
}

impl fmt::Display for BitmaskValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, label) in self.labels().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", label)?;
        }
        Ok(())
    }
}

/// Untyped payload, displayed most significant byte first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexData<'a>(pub &'a [u8]);

impl fmt::Display for HexData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for byte in self.0.iter().rev() {
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

/// Firmware release channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Release {
    Official,
    Beta,
    Tester,
    Bootloader,
    /// Pre-release with a build tag, from TEXT frames
    BetaBuild(String<2>),
}

/// Decoded firmware version (`APP_VER`, `FW`, `FWE`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppVersion {
    pub major: u8,
    pub minor: u8,
    pub release: Release,
}

impl AppVersion {
    /// Decode the `APP_VER` register payload
    ///
    /// The release channel sits in the top two bits of the major byte.
    pub fn from_hex(data: &[u8]) -> Option<Self> {
        let minor = *data.get(1)?;
        let major = *data.get(2)?;
        let release = match major & 0xC0 {
            0x40 => Release::Official,
            0xC0 => Release::Beta,
            0x80 => Release::Tester,
            _ => Release::Bootloader,
        };
        Some(Self {
            major: major & 0x3F,
            minor,
            release,
        })
    }

    /// Decode a `FW`/`FWE` TEXT value
    ///
    /// - `208`: 2.08
    /// - `C208`: 2.08, beta build C
    /// - `208FF` / `0208FF`: 2.08, `FF` marks an official release
    /// - `1208FF`: 12.08
    pub fn from_text(text: &str) -> Option<Self> {
        if !text.is_ascii() {
            return None;
        }
        match text.len() {
            3 => Self::from_digits(&text[..1], &text[1..], Release::Official),
            4 => Self::from_digits(&text[1..2], &text[2..], Release::BetaBuild(tag(&text[..1])?)),
            5 => Self::from_digits(&text[..1], &text[1..3], release_of(&text[3..])?),
            6 if text.starts_with('0') => Self::from_text(&text[1..]),
            6 => Self::from_digits(&text[..2], &text[2..4], release_of(&text[4..])?),
            _ => None,
        }
    }

    fn from_digits(major: &str, minor: &str, release: Release) -> Option<Self> {
        Some(Self {
            major: major.parse().ok()?,
            minor: minor.parse().ok()?,
            release,
        })
    }
}

fn release_of(suffix: &str) -> Option<Release> {
    if suffix == "FF" {
        Some(Release::Official)
    } else {
        tag(suffix).map(Release::BetaBuild)
    }
}

fn tag(text: &str) -> Option<String<2>> {
    let mut tag = String::new();
    tag.push_str(text).ok()?;
    Some(tag)
}

impl fmt::Display for AppVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.major, self.minor)?;
        match &self.release {
            Release::Official => Ok(()),
            Release::Beta => f.write_str("-beta"),
            Release::Tester => f.write_str("-tester"),
            Release::Bootloader => f.write_str("-bootloader"),
            Release::BetaBuild(tag) => write!(f, "-beta-{}", tag),
        }
    }
}

impl NumericDef {
    /// Engineering value of a raw HEX integer
    pub fn scale_raw(&self, raw: i64) -> f64 {
        let raw = match self.unit {
            Unit::Kelvin => raw - KELVIN_OFFSET,
            _ => raw,
        };
        raw as f64 / self.scale.divisor()
    }

    /// Raw HEX integer for an engineering value, rounded to the nearest count
    pub fn unscale(&self, value: f64) -> i64 {
        let scaled = value * self.scale.divisor();
        // core has no f64::round
        let raw = if scaled >= 0.0 {
            (scaled + 0.5) as i64
        } else {
            (scaled - 0.5) as i64
        };
        match self.unit {
            Unit::Kelvin => raw + KELVIN_OFFSET,
            _ => raw,
        }
    }
}

/// Encode an engineering value for a `Set` request
///
/// Returns the payload length, or `None` when the register is not numeric
/// or the value is not finite or does not fit its data type.
pub fn encode_numeric(def: &RegisterDef, value: f64, buffer: &mut [u8]) -> Option<usize> {
    let numeric = def.class.numeric()?;
    if !value.is_finite() {
        return None;
    }
    let raw = numeric.unscale(value);
    if !fits(def.data_type, raw) {
        return None;
    }
    def.data_type.write(raw, buffer)
}

fn fits(data_type: DataType, raw: i64) -> bool {
    let (min, max) = match data_type {
        DataType::Variadic => return false,
        DataType::Un8 => (0, u8::MAX as i64),
        DataType::Un16 => (0, u16::MAX as i64),
        DataType::Un32 => (0, u32::MAX as i64),
        DataType::Sn8 => (i8::MIN as i64, i8::MAX as i64),
        DataType::Sn16 => (i16::MIN as i64, i16::MAX as i64),
        DataType::Sn32 => (i32::MIN as i64, i32::MAX as i64),
    };
    (min..=max).contains(&raw)
}

/// Declared type, or an unsigned type inferred from the payload width
fn effective_type(data_type: DataType, data: &[u8]) -> Option<DataType> {
    match data_type {
        DataType::Variadic => DataType::infer(data.len()),
        declared => Some(declared),
    }
}

fn read_raw(data_type: DataType, data: &[u8]) -> Option<i64> {
    effective_type(data_type, data)?.read(data)
}

fn is_unknown(data_type: Option<DataType>, raw: i64) -> bool {
    data_type.is_some_and(|ty| ty.is_unknown(raw))
}

/// Little-endian payload of 1 to 4 bytes
fn read_u32(data: &[u8]) -> Option<u32> {
    if data.is_empty() {
        return None;
    }
    let mut bytes = [0u8; 4];
    let len = data.len().min(4);
    bytes[..len].copy_from_slice(&data[..len]);
    Some(u32::from_le_bytes(bytes))
}

fn truthy(raw: u32, mask: Option<u32>) -> bool {
    match mask {
        Some(mask) => raw & mask != 0,
        None => raw != 0,
    }
}

/// Decimal or `0x` prefixed hex integer, as found in TEXT records
fn parse_integer(text: &str) -> Option<u32> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::{RegisterCatalog, Scale};

    fn def(symbol: &str) -> &'static RegisterDef {
        RegisterCatalog::builtin().by_symbol(symbol).unwrap()
    }

    #[test]
    fn test_numeric_scaling() {
        let yield_today = def("YIELD_TODAY");
        assert_eq!(
            RegisterValue::decode_hex(yield_today, &[0xFA, 0x00], None),
            RegisterValue::Numeric {
                value: 2.5,
                decimals: 2
            }
        );
        // H20 is reported in 0.01 kWh as well
        assert_eq!(
            RegisterValue::decode_text(yield_today, "250", None).as_f64(),
            Some(2.5)
        );
    }

    #[test]
    fn test_numeric_signed_and_unknown() {
        let current = def("DC_CHANNEL1_CURRENT");
        assert_eq!(
            RegisterValue::decode_hex(current, &[0xF6, 0xFF], None).as_f64(),
            Some(-1.0)
        );
        assert_eq!(
            RegisterValue::decode_hex(current, &[0xFF, 0x7F], None),
            RegisterValue::Unknown
        );
        assert_eq!(
            RegisterValue::decode_hex(def("YIELD_TODAY"), &[0xFF, 0xFF], None),
            RegisterValue::Unknown
        );
        // I is reported in mA
        assert_eq!(
            RegisterValue::decode_text(current, "-1500", None).as_f64(),
            Some(-1.5)
        );
        assert_eq!(
            RegisterValue::decode_text(current, "---", None),
            RegisterValue::Unknown
        );
    }

    #[test]
    fn test_numeric_display_uses_resolution() {
        let yield_today = def("YIELD_TODAY");
        assert_eq!(
            RegisterValue::decode_hex(yield_today, &[0x2C, 0x01], None).to_string(),
            "3.00"
        );
        let current = def("DC_CHANNEL1_CURRENT");
        assert_eq!(
            RegisterValue::decode_hex(current, &[0xF6, 0xFF], None).to_string(),
            "-1.0"
        );
        assert_eq!(
            RegisterValue::decode_text(current, "-1500", None).to_string(),
            "-1.500"
        );
    }

    #[test]
    fn test_kelvin_offset() {
        let numeric = NumericDef {
            unit: Unit::Kelvin,
            scale: Scale::S0_01,
            text_scale: Scale::S0_01,
        };
        assert_eq!(numeric.scale_raw(29816), 25.0);
        assert_eq!(numeric.unscale(25.0), 29816);
    }

    #[test]
    fn test_enum_labels() {
        let state = def("DEVICE_STATE");
        let value = RegisterValue::decode_hex(state, &[0x03], None);
        assert_eq!(value.to_string(), "BULK");
        assert_eq!(
            RegisterValue::decode_hex(state, &[0x42], None).to_string(),
            "0x42"
        );
        assert_eq!(
            RegisterValue::decode_text(state, "5", None).to_string(),
            "FLOAT"
        );
        assert_eq!(
            RegisterValue::decode_text(state, "0xF4", None).to_string(),
            "SUSTAIN"
        );
    }

    #[test]
    fn test_bitmask_labels() {
        let warning = def("WARNING_REASON");
        let value = RegisterValue::decode_hex(warning, &[0x05, 0x00], None);
        assert_eq!(value.to_string(), "LOW_BATTERY_VOLTAGE,LOW_SOC");
        match value {
            RegisterValue::Bitmask(bits) => {
                assert!(bits.contains(2));
                assert!(!bits.contains(1));
            }
            other => panic!("unexpected {:?}", other),
        }
        let unknown_bit = RegisterValue::decode_hex(warning, &[0x00, 0x40], None);
        assert_eq!(unknown_bit.to_string(), "0x0E");
        assert_eq!(
            RegisterValue::decode_hex(warning, &[0xFF, 0xFF], None),
            RegisterValue::Unknown
        );
    }

    #[test]
    fn test_mask_derives_boolean() {
        let warning = def("WARNING_REASON");
        assert_eq!(
            RegisterValue::decode_hex(warning, &[0x04, 0x00], Some(0x04)),
            RegisterValue::Boolean(true)
        );
        assert_eq!(
            RegisterValue::decode_hex(warning, &[0x04, 0x00], Some(0x01)),
            RegisterValue::Boolean(false)
        );
        assert_eq!(
            RegisterValue::decode_text(warning, "4", Some(0x04)),
            RegisterValue::Boolean(true)
        );
    }

    #[test]
    fn test_boolean() {
        let relay = def("RELAY_CONTROL");
        assert_eq!(
            RegisterValue::decode_hex(relay, &[0x01], None),
            RegisterValue::Boolean(true)
        );
        assert_eq!(
            RegisterValue::decode_hex(relay, &[0x00], None),
            RegisterValue::Boolean(false)
        );
        assert_eq!(
            RegisterValue::decode_text(relay, "ON", None),
            RegisterValue::Boolean(true)
        );
        assert_eq!(
            RegisterValue::decode_text(relay, "OFF", None),
            RegisterValue::Boolean(false)
        );
        assert_eq!(
            RegisterValue::decode_hex(relay, &[], None),
            RegisterValue::Unknown
        );
    }

    #[test]
    fn test_string_and_void() {
        assert_eq!(
            RegisterValue::decode_hex(def("SERIAL_NUMBER"), b"HQ2132ABCDE\0\0", None),
            RegisterValue::Text("HQ2132ABCDE")
        );
        let product = RegisterValue::decode_hex(def("PRODUCT_ID"), &[0x00, 0x53, 0xA0], None);
        assert_eq!(product.to_string(), "0xA05300");
        assert_eq!(
            RegisterValue::decode_text(def("PRODUCT_ID"), "0xA053", None),
            RegisterValue::Text("0xA053")
        );
    }

    #[test]
    fn test_app_version_hex() {
        let app_ver = def("APP_VER");
        let release = RegisterValue::decode_hex(app_ver, &[0x00, 0x08, 0x42], None);
        assert_eq!(release.to_string(), "2.08");
        let beta = RegisterValue::decode_hex(app_ver, &[0x00, 0x15, 0xC3], None);
        assert_eq!(beta.to_string(), "3.21-beta");
        let boot = RegisterValue::decode_hex(app_ver, &[0x00, 0x01, 0x01], None);
        assert_eq!(boot.to_string(), "1.01-bootloader");
        assert!(matches!(
            RegisterValue::decode_hex(app_ver, &[0x00, 0x01], None),
            RegisterValue::Bytes(_)
        ));
    }

    #[test]
    fn test_app_version_text() {
        let cases = [
            ("208", "2.08"),
            ("C208", "2.08-beta-C"),
            ("208FF", "2.08"),
            ("20801", "2.08-beta-01"),
            ("0208FF", "2.08"),
            ("1208FF", "12.08"),
            ("1208B2", "12.08-beta-B2"),
        ];
        for (text, expected) in cases {
            assert_eq!(
                AppVersion::from_text(text).map(|v| v.to_string()).as_deref(),
                Some(expected),
                "{}",
                text
            );
        }
        assert_eq!(AppVersion::from_text("1.2.3.4"), None);
        assert_eq!(
            RegisterValue::decode_text(def("APP_VER"), "v1", None),
            RegisterValue::Text("v1")
        );
    }

    #[test]
    fn test_encode_numeric_range() {
        let mut buf = [0u8; 4];
        let voltage = def("BAT_FLOAT_VOLTAGE");
        assert_eq!(encode_numeric(voltage, 13.8, &mut buf), Some(2));
        assert_eq!(u16::from_le_bytes([buf[0], buf[1]]), 1380);
        assert_eq!(encode_numeric(voltage, -1.0, &mut buf), None);
        assert_eq!(encode_numeric(def("RELAY_CONTROL"), 1.0, &mut buf), None);
    }

    #[test]
    fn test_encode_numeric_not_finite() {
        let mut buf = [0u8; 4];
        let voltage = def("BAT_FLOAT_VOLTAGE");
        assert_eq!(encode_numeric(voltage, f64::NAN, &mut buf), None);
        assert_eq!(encode_numeric(voltage, f64::INFINITY, &mut buf), None);
        assert_eq!(encode_numeric(voltage, f64::NEG_INFINITY, &mut buf), None);
        assert_eq!(buf, [0; 4]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::registers::Scale;
    use proptest::prelude::*;

    const SCALES: [Scale; 5] = [Scale::S1, Scale::S0_1, Scale::S0_01, Scale::S0_001, Scale::S0_25];

    proptest! {
        #[test]
        fn prop_numeric_round_trip(raw in i32::MIN as i64..=u32::MAX as i64, index in 0..SCALES.len()) {
            let numeric = NumericDef {
                unit: Unit::V,
                scale: SCALES[index],
                text_scale: SCALES[index],
            };
            prop_assert_eq!(numeric.unscale(numeric.scale_raw(raw)), raw);
        }

        #[test]
        fn prop_kelvin_round_trip(raw in 0i64..=u16::MAX as i64) {
            let numeric = NumericDef {
                unit: Unit::Kelvin,
                scale: Scale::S0_01,
                text_scale: Scale::S0_01,
            };
            prop_assert_eq!(numeric.unscale(numeric.scale_raw(raw)), raw);
        }
    }
}
