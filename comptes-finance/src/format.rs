//! Locale-aware display of amounts, percentages and ratios
//!
//! Rounding is half away from zero on the exact binary value, the same way
//! `toFixed` and `toLocaleString` behave, so `1.005` shows as `1.00` while
//! `0.125` shows as `0.13`.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number locales the analysis views render in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum NumberLocale {
    #[default]
    #[serde(rename = "ca")]
    Catalan,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "en")]
    English,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported locale '{0}' (expected ca, es or en)")]
pub struct UnknownLocale(pub String);

impl NumberLocale {
    fn group_separator(&self) -> char {
        match self {
            NumberLocale::Catalan | NumberLocale::Spanish => '.',
            NumberLocale::English => ',',
        }
    }

    fn decimal_separator(&self) -> char {
        match self {
            NumberLocale::Catalan | NumberLocale::Spanish => ',',
            NumberLocale::English => '.',
        }
    }

    /// Digits required in front of the first separator. Spanish leaves
    /// four-digit integers ungrouped (`1234,00` but `12.345,00`).
    fn min_grouping_digits(&self) -> usize {
        match self {
            NumberLocale::Spanish => 2,
            NumberLocale::Catalan | NumberLocale::English => 1,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            NumberLocale::Catalan => "ca",
            NumberLocale::Spanish => "es",
            NumberLocale::English => "en",
        }
    }
}

impl FromStr for NumberLocale {
    type Err = UnknownLocale;

    /// Accepts `ca`, `es-ES`, `en_US`, ... (region ignored, case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lang = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        match lang.as_str() {
            "ca" => Ok(NumberLocale::Catalan),
            "es" => Ok(NumberLocale::Spanish),
            "en" => Ok(NumberLocale::English),
            _ => Err(UnknownLocale(s.to_string())),
        }
    }
}

impl fmt::Display for NumberLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Render-time switches, passed explicitly instead of living in UI state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DisplayOptions {
    /// Show amounts in thousands
    #[serde(default)]
    pub thousands: bool,
    #[serde(default)]
    pub locale: NumberLocale,
}

impl DisplayOptions {
    pub fn new(thousands: bool, locale: NumberLocale) -> Self {
        Self { thousands, locale }
    }
}

/// Currency amount with two decimals, divided by 1000 in thousands mode.
pub fn format_amount(value: f64, opts: &DisplayOptions) -> String {
    let scaled = if opts.thousands { value / 1000.0 } else { value };
    format_fixed(scaled, 2, opts.locale)
}

/// Percentage with one decimal and a trailing `%`. Never scaled.
pub fn format_percent(value: f64, opts: &DisplayOptions) -> String {
    format!("{}%", format_fixed(value, 1, opts.locale))
}

/// Unitless ratio with two decimals. Never scaled.
pub fn format_ratio(value: f64, opts: &DisplayOptions) -> String {
    format_fixed(value, 2, opts.locale)
}

/// `value` rounded to `decimals` places with locale separators.
pub fn format_fixed(value: f64, decimals: u32, locale: NumberLocale) -> String {
    if !value.is_finite() {
        return format_fixed(0.0, decimals, locale);
    }
    let (negative, plain) = round_half_away(value, decimals);

    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain.as_str(), None),
    };

    let mut out = String::with_capacity(plain.len() + plain.len() / 3 + 2);
    if negative {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, locale));
    if let Some(frac) = frac_part {
        out.push(locale.decimal_separator());
        out.push_str(frac);
    }
    out
}

/// Returns the sign and the unsigned digits (`.` as decimal point).
/// Negative zero after rounding reports as positive.
fn round_half_away(value: f64, decimals: u32) -> (bool, String) {
    let dp = decimals as usize;
    match Decimal::from_f64_retain(value) {
        Some(d) => {
            let rounded = d.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
            let negative = rounded.is_sign_negative() && !rounded.is_zero();
            (negative, format!("{:.*}", dp, rounded.abs()))
        }
        // beyond Decimal's range; no fractional digits left to round
        None => {
            let negative = value < 0.0;
            (negative, format!("{:.*}", dp, value.abs()))
        }
    }
}

fn group_digits(digits: &str, locale: NumberLocale) -> String {
    let len = digits.len();
    if len < 3 + locale.min_grouping_digits() {
        return digits.to_string();
    }
    let sep = locale.group_separator();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const CA: DisplayOptions = DisplayOptions {
        thousands: false,
        locale: NumberLocale::Catalan,
    };
    const EN: DisplayOptions = DisplayOptions {
        thousands: false,
        locale: NumberLocale::English,
    };

    #[test]
    fn test_amount_grouping() {
        assert_eq!(format_amount(1234567.891, &CA), "1.234.567,89");
        assert_eq!(format_amount(1234567.891, &EN), "1,234,567.89");
        assert_eq!(format_amount(999.5, &CA), "999,50");
        assert_eq!(format_amount(1000.0, &CA), "1.000,00");
        assert_eq!(format_amount(0.0, &CA), "0,00");
    }

    #[test]
    fn test_spanish_min_grouping() {
        let es = DisplayOptions::new(false, NumberLocale::Spanish);
        assert_eq!(format_amount(1234.0, &es), "1234,00");
        assert_eq!(format_amount(12345.0, &es), "12.345,00");
    }

    #[test]
    fn test_thousands_toggle() {
        let k = DisplayOptions::new(true, NumberLocale::Catalan);
        assert_eq!(format_amount(1_550_000.0, &k), "1.550,00");
        assert_eq!(format_amount(1234.0, &k), "1,23");
        // percentages and ratios are never scaled
        assert_eq!(format_percent(25.0, &k), "25,0%");
        assert_eq!(format_ratio(0.516129, &k), "0,52");
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(format_amount(-1234.5, &CA), "-1.234,50");
        assert_eq!(format_amount(-0.001, &CA), "0,00");
        assert_eq!(format_percent(-12.34, &EN), "-12.3%");
    }

    #[test]
    fn test_rounding_matches_to_fixed() {
        assert_eq!(format_fixed(0.125, 2, NumberLocale::English), "0.13");
        assert_eq!(format_fixed(0.25, 1, NumberLocale::English), "0.3");
        assert_eq!(format_fixed(1.005, 2, NumberLocale::English), "1.00");
        assert_eq!(format_fixed(-2.5, 0, NumberLocale::English), "-3");
    }

    #[test]
    fn test_non_finite_renders_zero() {
        assert_eq!(format_amount(f64::NAN, &CA), "0,00");
        assert_eq!(format_percent(f64::INFINITY, &CA), "0,0%");
    }

    #[test]
    fn test_huge_values() {
        assert_eq!(format_fixed(1e30, 0, NumberLocale::English).len(), 31 + 10);
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!("ca".parse::<NumberLocale>(), Ok(NumberLocale::Catalan));
        assert_eq!("es-ES".parse::<NumberLocale>(), Ok(NumberLocale::Spanish));
        assert_eq!("EN_us".parse::<NumberLocale>(), Ok(NumberLocale::English));
        assert!("fr".parse::<NumberLocale>().is_err());
        assert_eq!(NumberLocale::Spanish.to_string(), "es");
    }
}
