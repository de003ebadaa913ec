use chrono::{DateTime, Utc};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats a value with the shortest representation that round-trips
/// (`20` rather than `20.0`, `0.25` rather than `2.5e-1`).
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // also folds negative zero
        return "0".to_owned();
    }
    format!("{value}")
}

fn round_with(value: f64, digits: u32, strategy: RoundingStrategy) -> Option<Decimal> {
    Decimal::from_f64(value).map(|decimal| {
        decimal
            .round_dp_with_strategy(digits, strategy)
            .normalize()
    })
}

fn decimal_to_string(decimal: Decimal) -> String {
    if decimal.is_zero() {
        "0".to_owned()
    } else {
        decimal.to_string()
    }
}

/// Rounds `value` half away from zero to `digits` fractional digits and
/// returns it as a number.
#[must_use]
pub fn round_to_digits(value: f64, digits: u32) -> f64 {
    round_with(value, digits, RoundingStrategy::MidpointAwayFromZero)
        .and_then(|decimal| decimal.to_f64())
        .unwrap_or(value)
}

/// Rounds to `digits` fractional digits and drops trailing zeros.
#[must_use]
pub fn drop_zeros(value: f64, digits: u32) -> String {
    match round_with(value, digits, RoundingStrategy::MidpointAwayFromZero) {
        Some(decimal) => decimal_to_string(decimal),
        None => format_number(value),
    }
}

fn truncate_zeros(value: f64, digits: u32) -> String {
    match round_with(value, digits, RoundingStrategy::ToZero) {
        Some(decimal) => decimal_to_string(decimal),
        None => format_number(value),
    }
}

/// Abbreviates large magnitudes: `1500 -> "1.5k"`, `2_340_000 -> "2.3m"`.
///
/// The abbreviated mantissa is truncated to one decimal place.
#[must_use]
pub fn cut_large(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }

    let magnitude = value.abs();
    if magnitude >= 1_000_000.0 {
        format!("{}m", truncate_zeros(value / 1_000_000.0, 1))
    } else if magnitude >= 1_000.0 {
        format!("{}k", truncate_zeros(value / 1_000.0, 1))
    } else {
        format_number(value)
    }
}

/// Groups the integer part in thousands: `1234567.891 -> "1,234,567.89"`.
#[must_use]
pub fn comma_separated(value: f64) -> String {
    let formatted = if value.abs() < 1.0 {
        format_number(value)
    } else {
        drop_zeros(value, 2)
    };

    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let digits = integer.as_bytes();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.iter().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(char::from(*digit));
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

fn format_stamp(stamp_ms: f64, pattern: &str) -> String {
    if !stamp_ms.is_finite() {
        return format_number(stamp_ms);
    }
    match DateTime::<Utc>::from_timestamp_millis(stamp_ms.floor() as i64) {
        Some(date) => date.format(pattern).to_string(),
        None => format_number(stamp_ms),
    }
}

/// `2019`
#[must_use]
pub fn format_year(stamp_ms: f64) -> String {
    format_stamp(stamp_ms, "%Y")
}

/// `Apr 2019`
#[must_use]
pub fn format_month(stamp_ms: f64) -> String {
    format_stamp(stamp_ms, "%b %Y")
}

/// `Apr 03`
#[must_use]
pub fn format_day(stamp_ms: f64) -> String {
    format_stamp(stamp_ms, "%b %d")
}

/// `14:00`
#[must_use]
pub fn format_hour(stamp_ms: f64) -> String {
    format_stamp(stamp_ms, "%H:00")
}

/// `14:05`
#[must_use]
pub fn format_minute(stamp_ms: f64) -> String {
    format_stamp(stamp_ms, "%H:%M")
}

/// `14:05:09`
#[must_use]
pub fn format_second(stamp_ms: f64) -> String {
    format_stamp(stamp_ms, "%H:%M:%S")
}

/// `14:05:09:250`
#[must_use]
pub fn format_millisecond(stamp_ms: f64) -> String {
    format_stamp(stamp_ms, "%H:%M:%S:%3f")
}

/// Tooltip header: `Sat, Apr 13`.
#[must_use]
pub fn format_tooltip_date(stamp_ms: f64) -> String {
    format_stamp(stamp_ms, "%a, %b %-d")
}

#[cfg(test)]
mod tests {
    use super::{
        comma_separated, cut_large, drop_zeros, format_day, format_millisecond, format_month,
        format_number, format_tooltip_date, round_to_digits,
    };

    // 2019-04-13T14:05:09.250Z
    const STAMP: f64 = 1_555_164_309_250.0;

    #[test]
    fn numbers_print_without_trailing_zeros() {
        assert_eq!(format_number(20.0), "20");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(drop_zeros(1.50, 2), "1.5");
        assert_eq!(drop_zeros(2.005, 1), "2");
        assert_eq!(round_to_digits(0.123456, 3), 0.123);
    }

    #[test]
    fn large_values_are_abbreviated_and_truncated() {
        assert_eq!(cut_large(0.0), "0");
        assert_eq!(cut_large(999.0), "999");
        assert_eq!(cut_large(1_000.0), "1k");
        assert_eq!(cut_large(1_290.0), "1.2k");
        assert_eq!(cut_large(2_340_000.0), "2.3m");
        assert_eq!(cut_large(-45_000.0), "-45k");
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(comma_separated(1_234_567.891), "1,234,567.89");
        assert_eq!(comma_separated(999.0), "999");
        assert_eq!(comma_separated(-12_000.5), "-12,000.5");
        assert_eq!(comma_separated(0.5), "0.5");
    }

    #[test]
    fn dates_use_utc_calendar_fields() {
        assert_eq!(format_month(STAMP), "Apr 2019");
        assert_eq!(format_day(STAMP), "Apr 13");
        assert_eq!(format_millisecond(STAMP), "14:05:09:250");
        assert_eq!(format_tooltip_date(STAMP), "Sat, Apr 13");
    }
}
