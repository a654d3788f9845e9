use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

pub const DEFAULT_UNIT: &str = "unit-count";

/// Units offered to selection widgets. Stored products carry the unit as free
/// text, so a data file may contain units outside this list.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum KnownUnit {
    #[default]
    #[strum(serialize = "unit-count")]
    UnitCount,
    #[strum(serialize = "metre")]
    Metre,
}

/// Blank units fall back to [`DEFAULT_UNIT`]; anything else is trimmed.
pub fn normalize_unit(unit: &str) -> String {
    let trimmed = unit.trim();
    if trimmed.is_empty() {
        DEFAULT_UNIT.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Counted units render quantities with integer-leaning formatting.
pub fn is_unit_count(unit: &str) -> bool {
    unit.trim().eq_ignore_ascii_case(DEFAULT_UNIT)
}

/// Maximum fractional digits shown for a quantity in `unit`.
pub fn quantity_fraction_digits(unit: &str) -> u32 {
    if is_unit_count(unit) {
        2
    } else {
        3
    }
}
