//! Built-in register catalog tables
//!
//! Rows are sorted by address; [`super::RegisterCatalog`] binary searches
//! them.

use vedirect_protocol::DataType;

use super::def::{Access, RegisterDef, Scale, Unit};
use super::lookup::{LookupDef, LookupEntry};
use crate::flavor::Flavor;

macro_rules! lookup {
    ($($value:literal => $label:literal),* $(,)?) => {
        &[$(LookupEntry::new($value, $label)),*]
    };
}

macro_rules! register {
    ($flavor:ident, VOID, $address:literal, $name:ident, $access:ident) => {
        RegisterDef::void(Flavor::$flavor, $address, stringify!($name), Access::$access)
    };
    ($flavor:ident, BOOLEAN, $address:literal, $name:ident, $access:ident) => {
        RegisterDef::boolean(Flavor::$flavor, $address, stringify!($name), Access::$access)
    };
    ($flavor:ident, STRING, $address:literal, $name:ident, $access:ident) => {
        RegisterDef::string(Flavor::$flavor, $address, stringify!($name), Access::$access)
    };
    ($flavor:ident, BITMASK, $address:literal, $name:ident, $access:ident, $ty:ident, $table:ident) => {
        RegisterDef::bitmask(
            Flavor::$flavor,
            $address,
            stringify!($name),
            Access::$access,
            DataType::$ty,
            LookupDef::from_static($table),
        )
    };
    ($flavor:ident, ENUM, $address:literal, $name:ident, $access:ident, $table:ident) => {
        RegisterDef::enumeration(
            Flavor::$flavor,
            $address,
            stringify!($name),
            Access::$access,
            LookupDef::from_static($table),
        )
    };
    (
        $flavor:ident, NUMERIC, $address:literal, $name:ident, $access:ident,
        $ty:ident, $unit:ident, $scale:ident, $text_scale:ident
    ) => {
        RegisterDef::numeric(
            Flavor::$flavor,
            $address,
            stringify!($name),
            Access::$access,
            DataType::$ty,
            Unit::$unit,
            Scale::$scale,
            Scale::$text_scale,
        )
    };
}

/// Bit positions
pub const BLE_MODE: &[LookupEntry] = lookup![
    0 => "ENABLED",
];

/// Bit positions
pub const CAPABILITIES: &[LookupEntry] = lookup![
    0 => "LOAD_OUTPUT", 1 => "ROTARY_ENCODER", 2 => "HISTORY", 3 => "BATTERYSAFE",
    4 => "ADAPTIVE", 5 => "MANUAL_EQUALISE", 6 => "AUTOMATIC_EQUALISE", 7 => "STORAGE",
    8 => "REMOTE_ON_OFF", 16 => "SYNCHRONIZED_CHARGING", 17 => "RELAY", 27 => "PAYGO",
    28 => "HYBERNATE",
];

/// Bit positions
pub const CAPABILITIES_BLE: &[LookupEntry] = lookup![
    0 => "BLE_MODE", 1 => "PERMANENT_OFF",
];

pub const DEVICE_MODE: &[LookupEntry] = lookup![
    0x00 => "OFF", 0x01 => "CHARGER_ON", 0x02 => "INVERTER_ON", 0x03 => "DEVICE_ON",
    0x04 => "DEVICE_OFF", 0x05 => "ECO", 0xFD => "HIBERNATE",
];

pub const DEVICE_STATE: &[LookupEntry] = lookup![
    0x00 => "OFF", 0x01 => "LOW_POWER", 0x02 => "FAULT", 0x03 => "BULK", 0x04 => "ABSORPTION",
    0x05 => "FLOAT", 0x06 => "STORAGE", 0x07 => "EQUALIZE_MANUAL", 0x08 => "PASSTHRU",
    0x09 => "INVERTING", 0x0A => "ASSISTING", 0x0B => "POWER_SUPPLY", 0xF4 => "SUSTAIN",
    0xF5 => "STARTING_UP", 0xF6 => "REPEATED_ABSORPTION", 0xF7 => "AUTO_EQUALIZE",
    0xF8 => "BATTERY_SAFE", 0xFC => "EXTERNAL_CONTROL", 0xFF => "UNKNOWN",
];

/// Bit positions
pub const DEVICE_OFF_REASON_2: &[LookupEntry] = lookup![
    0 => "NO_INPUT_POWER", 1 => "PHYSICAL_POWER_SWITCH", 2 => "SOFT_POWER_SWITCH",
    3 => "REMOTE_INPUT", 4 => "INTERNAL_ALARM", 5 => "PAYGO", 6 => "BMS_SHUTDOWN",
    7 => "ENGINE", 8 => "INPUT_VOLTAGE", 9 => "BATTERY_TEMPERATURE",
];

/// Bit positions
pub const WARNING_REASON: &[LookupEntry] = lookup![
    0 => "LOW_BATTERY_VOLTAGE", 1 => "HIGH_BATTERY_VOLTAGE", 2 => "LOW_SOC",
    3 => "LOW_STARTER_VOLTAGE", 4 => "HIGH_STARTER_VOLTAGE", 5 => "LOW_TEMPERATURE",
    6 => "HIGH_TEMPERATURE", 7 => "MID_BATTERY_VOLTAGE", 8 => "OVERLOAD", 9 => "DC_RIPPLE",
    10 => "LOW_AC_OUT_VOLTAGE", 11 => "HIGH_AC_OUT_VOLTAGE", 12 => "SHORT_CIRCUIT",
    13 => "BMS_LOCKOUT",
];

pub const RELAY_MODE: &[LookupEntry] = lookup![
    0 => "WARNINGS", 2 => "REMOTE", 3 => "DISABLED", 4 => "NORMAL", 5 => "BATTERY_LOW",
    6 => "FAN",
];

pub const MPPT_TRACKER_MODE: &[LookupEntry] = lookup![
    0x00 => "OFF", 0x01 => "V_I_LIMITED", 0x02 => "MPPT",
];

pub const CHR_ERROR_CODE: &[LookupEntry] = lookup![
    0 => "NO_ERROR", 1 => "BATTERY_TEMPERATURE_HIGH", 2 => "BATTERY_VOLTAGE_HIGH",
    3 => "REMOTE_TEMPERATURE_A", 4 => "REMOTE_TEMPERATURE_B", 5 => "REMOTE_TEMPERATURE_C",
    6 => "REMOTE_VOLTAGE_A", 7 => "REMOTE_VOLTAGE_B", 8 => "REMOTE_VOLTAGE_C",
    11 => "HIGH_RIPPLE", 14 => "BATTERY_TEMPERATURE_LOW", 17 => "CHARGER_TEMPERATURE_HIGH",
    18 => "OVER_CURRENT", 20 => "BULK_TIME", 21 => "CURRENT_SENSOR",
    22 => "INTERNAL_TEMPERATURE_A", 23 => "INTERNAL_TEMPERATURE_B", 24 => "FAN",
    26 => "OVERHEATED", 27 => "SHORT_CIRCUIT", 28 => "CONVERTER_ISSUE", 29 => "OVER_CHARGE",
    33 => "INPUT_VOLTAGE", 34 => "INPUT_CURRENT", 35 => "INPUT_POWER",
    38 => "INPUT_SHUTDOWN_VOLTAGE", 39 => "INPUT_SHUTDOWN_CURRENT",
    40 => "INPUT_SHUTDOWN_FAILURE", 41 => "INVERTER_SHUTDOWN_41", 42 => "INVERTER_SHUTDOWN_42",
    43 => "INVERTER_SHUTDOWN_43", 50 => "INVERTER_OVERLOAD", 51 => "INVERTER_TEMPERATURE",
    52 => "INVERTER_PEAK_CURRENT", 53 => "INVERTER_OUPUT_VOLTAGE_A",
    54 => "INVERTER_OUPUT_VOLTAGE_B", 55 => "INVERTER_SELF_TEST_A",
    56 => "INVERTER_SELF_TEST_B", 57 => "INVERTER_AC", 58 => "INVERTER_SELF_TEST_C",
    65 => "COMMUNICATION", 66 => "SYNCHRONISATION", 67 => "BMS", 68 => "NETWORK_A",
    69 => "NETWORK_B", 70 => "NETWORK_C", 71 => "NETWORK_D", 80 => "PV_INPUT_SHUTDOWN_80",
    81 => "PV_INPUT_SHUTDOWN_81", 82 => "PV_INPUT_SHUTDOWN_82", 83 => "PV_INPUT_SHUTDOWN_83",
    84 => "PV_INPUT_SHUTDOWN_84", 85 => "PV_INPUT_SHUTDOWN_85", 86 => "PV_INPUT_SHUTDOWN_86",
    87 => "PV_INPUT_SHUTDOWN_87", 114 => "CPU_TEMPERATURE_HIGH", 116 => "CALIBRATION_LOST",
    117 => "INVALID_FIRMWARE", 119 => "SETTINGS_LOST", 121 => "TESTER_FAIL",
    200 => "INTERNAL_DC_VOLTAGE_A", 201 => "INTERNAL_DC_VOLTAGE_B", 202 => "SELF_TEST",
    203 => "INTERNAL_SUPPLY_VOLTAGE_A", 205 => "INTERNAL_SUPPLY_VOLTAGE_B",
    212 => "INTERNAL_SUPPLY_VOLTAGE_C", 215 => "INTERNAL_SUPPLY_VOLTAGE_D", 0xFF => "UNKNOWN",
];

/// Bit positions
pub const TWO_WIRE_BMS_INPUT_STATE: &[LookupEntry] = lookup![
    0 => "ALLOWED_TO_CHARGE", 1 => "ALLOWED_TO_DISCHARGE",
];

pub const REMOTE_INPUT_MODE_CONFIG: &[LookupEntry] = lookup![
    0x00 => "REMOTE_ON_OFF", 0x01 => "TWO_WIRE_BMS",
];

pub const BAT_VOLTAGE_SETTING: &[LookupEntry] = lookup![
    0 => "AUTO", 12 => "12V", 24 => "24V", 36 => "36V", 48 => "48V",
];

pub const BAT_TYPE: &[LookupEntry] = lookup![
    1 => "TYPE_1", 2 => "TYPE_2", 3 => "TYPE_3", 4 => "TYPE_4", 5 => "TYPE_5", 6 => "TYPE_6",
    7 => "TYPE_7", 8 => "TYPE_8", 0xFF => "USER_DEFINED",
];

/// Common VE.Direct registers
pub static REGISTERS: &[RegisterDef] = &[
    register!(Any, BITMASK, 0x0090, BLE_MODE, ReadWrite, Un8, BLE_MODE),
    register!(Any, VOID, 0x0100, PRODUCT_ID, Constant),
    register!(Any, VOID, 0x0102, APP_VER, Constant),
    register!(Any, STRING, 0x010A, SERIAL_NUMBER, Constant),
    register!(Any, STRING, 0x010B, MODEL_NAME, Constant),
    register!(Any, BITMASK, 0x0140, CAPABILITIES, Constant, Un32, CAPABILITIES),
    register!(Any, BITMASK, 0x0150, CAPABILITIES_BLE, Constant, Un32, CAPABILITIES_BLE),
    register!(Any, ENUM, 0x0200, DEVICE_MODE, ReadWrite, DEVICE_MODE),
    register!(Any, ENUM, 0x0201, DEVICE_STATE, ReadOnly, DEVICE_STATE),
    register!(Any, BITMASK, 0x0205, DEVICE_OFF_REASON, ReadOnly, Un8, DEVICE_OFF_REASON_2),
    register!(Any, BITMASK, 0x0207, DEVICE_OFF_REASON_2, ReadOnly, Un32, DEVICE_OFF_REASON_2),
    register!(Inv, ENUM, 0x0209, INVERTER_DEVICE_STATE, ReadOnly, DEVICE_STATE),
    register!(Chg, ENUM, 0x020A, CHARGER_DEVICE_STATE, ReadOnly, DEVICE_STATE),
    register!(Inv, NUMERIC, 0x0230, AC_OUT_VOLTAGE_SETPOINT, ReadWrite, Un16, V, S0_01, S0_01),
    register!(MpptRs, NUMERIC, 0x0244, MPPT_TRACKERS, Constant, Un8, None, S1, S1),
    register!(MultiRs, NUMERIC, 0x0305, UNKNOWN_0305, ReadOnly, Un32, KWh, S0_001, S0_001),
    register!(MultiRs, NUMERIC, 0x0310, U_OUTPUT_YIELD, ReadOnly, Un32, KWh, S0_001, S0_001),
    register!(MultiRs, NUMERIC, 0x0311, U_USER_YIELD, ReadOnly, Un32, KWh, S0_001, S0_001),
    register!(Any, BITMASK, 0x031C, WARNING_REASON, ReadOnly, Un16, WARNING_REASON),
    register!(Any, BITMASK, 0x031E, ALARM_REASON, ReadOnly, Un16, WARNING_REASON),
    register!(Inv, NUMERIC, 0x0320, ALARM_LOW_VOLTAGE_SET, ReadWrite, Un16, V, S0_01, S0_01),
    register!(Inv, NUMERIC, 0x0321, ALARM_LOW_VOLTAGE_CLEAR, ReadWrite, Un16, V, S0_01, S0_01),
    register!(Any, BOOLEAN, 0x034E, RELAY_CONTROL, ReadWrite),
    register!(Any, ENUM, 0x034F, RELAY_MODE, ReadWrite, RELAY_MODE),
    register!(MultiRs, NUMERIC, 0x0FFC, UNKNOWN_0FFC, ReadOnly, Un32, Unknown, S1, S1),
    register!(Bmv, NUMERIC, 0x0FFE, TTG, ReadOnly, Un16, Minute, S1, S1),
    register!(Bmv, NUMERIC, 0x0FFF, SOC, ReadOnly, Un16, SocPercentage, S0_01, S0_1),
    register!(Mppt, BOOLEAN, 0x2030, SOLAR_ACTIVITY, ReadOnly),
    register!(Mppt, NUMERIC, 0x2031, TIME_OF_DAY, ReadOnly, Un16, Minute, S1, S1),
    register!(Inv, NUMERIC, 0x2200, AC_OUT_VOLTAGE, ReadOnly, Sn16, V, S0_01, S0_01),
    register!(Inv, NUMERIC, 0x2201, AC_OUT_CURRENT, ReadOnly, Sn16, A, S0_1, S0_1),
    register!(Inv, NUMERIC, 0x2205, AC_OUT_APPARENT_POWER, ReadOnly, Sn32, VA, S1, S1),
    register!(Inv, NUMERIC, 0x2210, SHUTDOWN_LOW_VOLTAGE_SET, ReadWrite, Un16, V, S0_01, S0_01),
    register!(Inv, NUMERIC, 0x2211, VOLTAGE_RANGE_MIN, Constant, Un16, V, S0_01, S0_01),
    register!(Inv, NUMERIC, 0x2212, VOLTAGE_RANGE_MAX, Constant, Un16, V, S0_01, S0_01),
    register!(MultiRs, NUMERIC, 0x2213, U_AC_OUT_VOLTAGE, ReadOnly, Sn16, V, S0_01, S0_01),
    register!(MultiRs, NUMERIC, 0x2214, U_AC_OUT_CURRENT, ReadOnly, Sn16, A, S0_01, S0_01),
    register!(MultiRs, NUMERIC, 0x2215, U_AC_OUT_REAL_POWER, ReadOnly, Sn32, W, S1, S1),
    register!(MultiRs, NUMERIC, 0x2216, U_AC_OUT_APPARENT_POWER, ReadOnly, Sn32, VA, S1, S1),
    register!(MultiRs, NUMERIC, 0x2250, UNKNOWN_2250, ReadOnly, Sn16, Unknown, S1, S1),
    register!(MultiRs, NUMERIC, 0x2251, UNKNOWN_2251, ReadOnly, Sn16, Unknown, S1, S1),
    register!(MpptRs, BITMASK, 0xD01F, TWO_WIRE_BMS_INPUT_STATE, ReadOnly, Un8, TWO_WIRE_BMS_INPUT_STATE),
    register!(MpptRs, ENUM, 0xD0C0, REMOTE_INPUT_MODE_CONFIG, ReadWrite, REMOTE_INPUT_MODE_CONFIG),
    register!(MultiRs, NUMERIC, 0xD3A1, U_AC_OUT_CURRENT_MA, ReadOnly, Sn32, A, S0_001, S0_001),
    register!(MultiRs, NUMERIC, 0xD5C8, UNKNOWN_D5C8, ReadOnly, Un32, Unknown, S1, S1),
    register!(MultiRs, NUMERIC, 0xD5CA, UNKNOWN_D5CA, ReadOnly, Un32, Unknown, S1, S1),
    register!(MultiRs, NUMERIC, 0xD5CB, UNKNOWN_D5CB, ReadOnly, Un32, Unknown, S1, S1),
    register!(MpptRs, ENUM, 0xECC3, MPPT_TRACKER_MODE_1, ReadOnly, MPPT_TRACKER_MODE),
    register!(MpptRs, NUMERIC, 0xECCB, PANEL_VOLTAGE_1, ReadOnly, Un16, V, S0_01, S0_001),
    register!(MpptRs, NUMERIC, 0xECCC, PANEL_POWER_1, ReadOnly, Un32, W, S0_01, S1),
    register!(MpptRs, NUMERIC, 0xECCD, PANEL_CURRENT_1, ReadOnly, Un16, A, S0_1, S0_1),
    register!(MpptRs, ENUM, 0xECD3, MPPT_TRACKER_MODE_2, ReadOnly, MPPT_TRACKER_MODE),
    register!(MpptRs, NUMERIC, 0xECDB, PANEL_VOLTAGE_2, ReadOnly, Un16, V, S0_01, S0_001),
    register!(MpptRs, NUMERIC, 0xECDC, PANEL_POWER_2, ReadOnly, Un32, W, S0_01, S1),
    register!(MpptRs, NUMERIC, 0xECDD, PANEL_CURRENT_2, ReadOnly, Un16, A, S0_1, S0_1),
    register!(MpptRs, ENUM, 0xECE3, MPPT_TRACKER_MODE_3, ReadOnly, MPPT_TRACKER_MODE),
    register!(MpptRs, NUMERIC, 0xECEB, PANEL_VOLTAGE_3, ReadOnly, Un16, V, S0_01, S0_001),
    register!(MpptRs, NUMERIC, 0xECEC, PANEL_POWER_3, ReadOnly, Un32, W, S0_01, S1),
    register!(MpptRs, NUMERIC, 0xECED, PANEL_CURRENT_3, ReadOnly, Un16, A, S0_1, S0_1),
    register!(MpptRs, ENUM, 0xECF3, MPPT_TRACKER_MODE_4, ReadOnly, MPPT_TRACKER_MODE),
    register!(MpptRs, NUMERIC, 0xECFB, PANEL_VOLTAGE_4, ReadOnly, Un16, V, S0_01, S0_001),
    register!(MpptRs, NUMERIC, 0xECFC, PANEL_POWER_4, ReadOnly, Un32, W, S0_01, S1),
    register!(MpptRs, NUMERIC, 0xECFD, PANEL_CURRENT_4, ReadOnly, Un16, A, S0_1, S0_1),
    register!(MpptRs, NUMERIC, 0xED8B, BATTERY_RIPPLE_VOLTAGE, ReadOnly, Un16, V, S0_01, S0_001),
    register!(Any, NUMERIC, 0xED8D, DC_CHANNEL1_VOLTAGE, ReadOnly, Sn16, V, S0_01, S0_001),
    register!(Bmv, NUMERIC, 0xED8E, DC_CHANNEL1_POWER, ReadOnly, Sn16, W, S1, S1),
    register!(Any, NUMERIC, 0xED8F, DC_CHANNEL1_CURRENT, ReadOnly, Sn16, A, S0_1, S0_001),
    register!(Mppt, BOOLEAN, 0xEDA8, LOAD_OUTPUT_STATE, ReadOnly),
    register!(Mppt, NUMERIC, 0xEDAD, LOAD_CURRENT, ReadOnly, Un16, A, S0_1, S0_001),
    register!(Mppt, ENUM, 0xEDB3, MPPT_TRACKER_MODE, ReadOnly, MPPT_TRACKER_MODE),
    register!(Mppt, NUMERIC, 0xEDB8, PANEL_MAXIMUM_VOLTAGE, Constant, Un16, V, S0_01, S0_01),
    register!(Mppt, NUMERIC, 0xEDBB, PANEL_VOLTAGE, ReadOnly, Un16, V, S0_01, S0_001),
    register!(Mppt, NUMERIC, 0xEDBC, PANEL_POWER, ReadOnly, Un32, W, S0_01, S1),
    register!(Mppt, NUMERIC, 0xEDBD, PANEL_CURRENT, ReadOnly, Un16, A, S0_1, S0_1),
    register!(MpptRs, NUMERIC, 0xEDBF, PANEL_MAXIMUM_CURRENT, Constant, Un16, A, S0_1, S0_1),
    register!(Mppt, NUMERIC, 0xEDCA, VOLTAGE_COMPENSATION, ReadWrite, Un16, V, S0_01, S0_01),
    register!(Mppt, NUMERIC, 0xEDD0, MAXIMUM_POWER_YESTERDAY, ReadOnly, Un16, W, S1, S1),
    register!(Mppt, NUMERIC, 0xEDD1, YIELD_YESTERDAY, ReadOnly, Un16, KWh, S0_01, S0_01),
    register!(Mppt, NUMERIC, 0xEDD2, MAXIMUM_POWER_TODAY, ReadOnly, Un16, W, S1, S1),
    register!(Mppt, NUMERIC, 0xEDD3, YIELD_TODAY, ReadOnly, Un16, KWh, S0_01, S0_01),
    register!(Chg, NUMERIC, 0xEDD5, CHARGER_VOLTAGE, ReadOnly, Un16, V, S0_01, S0_001),
    register!(Chg, NUMERIC, 0xEDD7, CHARGER_CURRENT, ReadOnly, Un16, A, S0_1, S0_001),
    register!(Chg, ENUM, 0xEDDA, CHR_ERROR_CODE, ReadOnly, CHR_ERROR_CODE),
    register!(Chg, NUMERIC, 0xEDDB, CHR_INTERNAL_TEMPERATURE, ReadOnly, Sn16, Celsius, S0_01, S0_01),
    register!(Mppt, NUMERIC, 0xEDDC, USER_YIELD, ReadOnly, Un32, KWh, S0_01, S0_01),
    register!(Mppt, NUMERIC, 0xEDDD, SYSTEM_YIELD, ReadOnly, Un32, KWh, S0_01, S0_01),
    register!(Mppt, NUMERIC, 0xEDE0, BAT_LOW_TEMP_LEVEL, ReadWrite, Sn16, Celsius, S0_01, S0_01),
    register!(Mppt, NUMERIC, 0xEDE2, REBULK_VOLTAGE_OFFSET, ReadWrite, Un16, V, S0_01, S0_01),
    register!(Mppt, NUMERIC, 0xEDE3, EQUALISATION_DURATION, ReadWrite, Un16, Hour, S0_01, S0_01),
    register!(Mppt, NUMERIC, 0xEDE4, EQUALISATION_CURRENT_LEVEL, ReadWrite, Un8, Percentage, S1, S1),
    register!(Mppt, BOOLEAN, 0xEDE5, AUTO_EQUALISE_STOP_ON_VOLTAGE, ReadWrite),
    register!(Mppt, NUMERIC, 0xEDE6, LOW_TEMP_CHARGE_CURRENT, ReadWrite, Un16, A, S0_1, S0_1),
    register!(Mppt, BOOLEAN, 0xEDE8, BMS_PRESENT, ReadWrite),
    register!(Mppt, ENUM, 0xEDEA, BAT_VOLTAGE_SETTING, ReadWrite, BAT_VOLTAGE_SETTING),
    register!(Any, NUMERIC, 0xEDEC, BAT_TEMPERATURE, ReadOnly, Un16, Celsius, S0_01, S1),
    register!(Mppt, NUMERIC, 0xEDEF, BAT_VOLTAGE, ReadOnly, Un8, V, S1, S1),
    register!(Mppt, NUMERIC, 0xEDF0, BAT_MAX_CURRENT, ReadWrite, Un16, A, S0_1, S0_1),
    register!(Mppt, ENUM, 0xEDF1, BAT_TYPE, ReadWrite, BAT_TYPE),
    register!(Mppt, NUMERIC, 0xEDF2, BAT_TEMPERATURE_COMPENSATION, ReadWrite, Sn16, None, S0_01, S0_01),
    register!(Mppt, NUMERIC, 0xEDF4, BAT_EQUALISATION_VOLTAGE, ReadWrite, Un16, V, S0_01, S0_01),
    register!(Mppt, NUMERIC, 0xEDF6, BAT_FLOAT_VOLTAGE, ReadWrite, Un16, V, S0_01, S0_01),
    register!(Mppt, NUMERIC, 0xEDF7, BAT_ABSORPTION_VOLTAGE, ReadWrite, Un16, V, S0_01, S0_01),
    register!(Mppt, NUMERIC, 0xEDFB, BAT_ABSORPTION_LIMIT, ReadWrite, Un16, Hour, S0_01, S0_01),
    register!(Mppt, NUMERIC, 0xEDFC, BAT_BULK_LIMIT, ReadWrite, Un16, Hour, S0_01, S0_01),
    register!(Mppt, NUMERIC, 0xEDFD, AUTOMATIC_EQUALISATION_MODE, ReadWrite, Un8, None, S1, S1),
    register!(Mppt, BOOLEAN, 0xEDFE, ADAPTIVE_MODE, ReadWrite),
    register!(Bmv71, NUMERIC, 0xEEB8, DC_MONITOR_MODE, ReadOnly, Sn16, None, S1, S1),
    register!(Bmv, BOOLEAN, 0xEEFC, ALARM_BUZZER, ReadWrite),
];
