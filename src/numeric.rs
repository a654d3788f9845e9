//! Locale-aware decimal parsing and display formatting.
//!
//! Input is accepted with either `,` or `.` as the fractional separator. A
//! value is parsed by trying [`PARSE_STRATEGIES`] in order and keeping the
//! first success. Display formatting rounds half away from zero, drops
//! trailing zeros and never emits grouping separators.

use std::{fmt, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::ServiceError;
use crate::models::unit::quantity_fraction_digits;

/// Fractional digits shown for prices.
pub const PRICE_FRACTION_DIGITS: u32 = 2;

/// Decimal and digit-group separators of a display locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
    tag: &'static str,
    decimal: char,
    group: char,
}

impl NumberLocale {
    pub const TURKISH: Self = Self::new("tr-TR", ',', '.');
    pub const GERMAN: Self = Self::new("de-DE", ',', '.');
    pub const US_ENGLISH: Self = Self::new("en-US", '.', ',');
    pub const INVARIANT: Self = Self::new("invariant", '.', ',');

    pub const SUPPORTED: [Self; 4] = [Self::TURKISH, Self::GERMAN, Self::US_ENGLISH, Self::INVARIANT];

    const fn new(tag: &'static str, decimal: char, group: char) -> Self {
        Self {
            tag,
            decimal,
            group,
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::SUPPORTED
            .into_iter()
            .find(|locale| locale.tag.eq_ignore_ascii_case(tag))
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn decimal_separator(&self) -> char {
        self.decimal
    }

    /// Parses `input` with the ordered strategy list.
    pub fn parse(&self, input: &str) -> Option<Decimal> {
        PARSE_STRATEGIES
            .iter()
            .find_map(|strategy| strategy.attempt(input, *self))
    }

    pub fn format(&self, value: Decimal, max_fraction_digits: u32) -> String {
        let rounded = value
            .round_dp_with_strategy(max_fraction_digits, RoundingStrategy::MidpointAwayFromZero)
            .normalize();
        let text = rounded.to_string();
        if self.decimal == '.' {
            text
        } else {
            text.replace('.', &self.decimal.to_string())
        }
    }

    pub fn format_quantity(&self, qty: Decimal, unit: &str) -> String {
        self.format(qty, quantity_fraction_digits(unit))
    }

    pub fn format_price(&self, price: Decimal) -> String {
        self.format(price, PRICE_FRACTION_DIGITS)
    }
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::TURKISH
    }
}

impl fmt::Display for NumberLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag)
    }
}

impl FromStr for NumberLocale {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| {
            ServiceError::ValidationError(format!(
                "unsupported locale '{}'; expected one of: {}",
                s,
                Self::SUPPORTED.map(|l| l.tag).join(", ")
            ))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    /// The locale's own separators.
    Locale,
    /// The other common separator rewritten to the locale's decimal separator.
    NormalizedSeparators,
    /// `.` decimal, `,` group.
    Invariant,
}

pub const PARSE_STRATEGIES: [ParseStrategy; 3] = [
    ParseStrategy::Locale,
    ParseStrategy::NormalizedSeparators,
    ParseStrategy::Invariant,
];

impl ParseStrategy {
    pub fn attempt(self, input: &str, locale: NumberLocale) -> Option<Decimal> {
        match self {
            Self::Locale => parse_with(input, locale.decimal, locale.group),
            Self::NormalizedSeparators => {
                let foreign = if locale.decimal == ',' { '.' } else { ',' };
                let rewritten = input.replace(foreign, &locale.decimal.to_string());
                parse_with(&rewritten, locale.decimal, locale.group)
            }
            Self::Invariant => parse_with(input, '.', ','),
        }
    }
}

/// Parses a user-entered number for `field`, rejecting anything that no
/// strategy accepts.
pub fn parse_decimal(field: &str, input: &str, locale: NumberLocale) -> Result<Decimal, ServiceError> {
    locale.parse(input).ok_or_else(|| {
        ServiceError::ValidationError(format!(
            "{} must be a number (e.g. 25 or 25{}50), got '{}'",
            field,
            locale.decimal,
            input.trim()
        ))
    })
}

fn parse_with(input: &str, decimal: char, group: char) -> Option<Decimal> {
    let text = input.trim();
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let (int_part, frac_part) = match body.split_once(decimal) {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (body, ""),
    };
    if !frac_part.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let digits = grouped_digits(int_part, group)?;
    if digits.is_empty() && frac_part.is_empty() {
        return None;
    }

    let canonical = format!(
        "{}{}.{}",
        if negative { "-" } else { "" },
        if digits.is_empty() { "0" } else { digits.as_str() },
        if frac_part.is_empty() { "0" } else { frac_part }
    );
    Decimal::from_str(&canonical).ok().map(|d| d.normalize())
}

/// Strips group separators, requiring every group after the first to hold
/// exactly three digits.
fn grouped_digits(int_part: &str, group: char) -> Option<String> {
    let mut groups = int_part.split(group);
    let first = groups.next().unwrap_or_default();
    let rest: Vec<&str> = groups.collect();

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(first) {
        return None;
    }
    if rest.is_empty() {
        return Some(first.to_string());
    }
    if first.is_empty() || first.len() > 3 {
        return None;
    }
    if !rest.iter().all(|g| g.len() == 3 && all_digits(g)) {
        return None;
    }

    let mut digits = first.to_string();
    rest.iter().for_each(|g| digits.push_str(g));
    Some(digits)
}
