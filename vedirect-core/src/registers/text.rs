//! TEXT record labels and the registers they report

/// Mapping from a TEXT record label to a catalog register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextDef {
    pub label: &'static str,
    /// Catalog symbol of the register carrying the same value
    pub symbol: &'static str,
}

const fn text(label: &'static str, symbol: &'static str) -> TextDef {
    TextDef { label, symbol }
}

/// Known TEXT labels, sorted bytewise
pub static TEXT_DEFS: &[TextDef] = &[
    text("AC_OUT_I", "AC_OUT_CURRENT"),
    text("AC_OUT_S", "AC_OUT_APPARENT_POWER"),
    text("AC_OUT_V", "AC_OUT_VOLTAGE"),
    text("AR", "ALARM_REASON"),
    text("CS", "DEVICE_STATE"),
    text("ERR", "CHR_ERROR_CODE"),
    text("FW", "APP_VER"),
    text("FWE", "APP_VER"),
    text("H19", "USER_YIELD"),
    text("H20", "YIELD_TODAY"),
    text("H21", "MAXIMUM_POWER_TODAY"),
    text("H22", "YIELD_YESTERDAY"),
    text("H23", "MAXIMUM_POWER_YESTERDAY"),
    text("I", "DC_CHANNEL1_CURRENT"),
    text("IL", "LOAD_CURRENT"),
    text("LOAD", "LOAD_OUTPUT_STATE"),
    text("MODE", "DEVICE_MODE"),
    text("MON", "DC_MONITOR_MODE"),
    text("MPPT", "MPPT_TRACKER_MODE"),
    text("OR", "DEVICE_OFF_REASON_2"),
    text("P", "DC_CHANNEL1_POWER"),
    text("PID", "PRODUCT_ID"),
    text("PPV", "PANEL_POWER"),
    text("Relay", "RELAY_CONTROL"),
    text("SER#", "SERIAL_NUMBER"),
    text("SOC", "SOC"),
    text("T", "BAT_TEMPERATURE"),
    text("TTG", "TTG"),
    text("V", "DC_CHANNEL1_VOLTAGE"),
    text("VPV", "PANEL_VOLTAGE"),
    text("WARN", "WARNING_REASON"),
];
