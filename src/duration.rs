//! Duration tokens as they appear in activity logs
//!
//! A token is an optional sign followed by one or more `<number><unit>`
//! components, e.g. `0h50m`, `1.5h`, `30.5m`. Units are `h`, `m` and `s`.
//! The bare literal `0` is accepted as a zero duration.

use chrono::TimeDelta;

use crate::error::{FormatError, Result};

const NANOS_PER_SECOND: i64 = 1_000_000_000;
const NANOS_PER_MINUTE: i64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MINUTE;

/// Longest fraction that still fits an i64 numerator
const MAX_FRACTION_DIGITS: usize = 18;

/// Parse a duration token into a signed [`TimeDelta`]
///
/// Sign is only permitted at the very start; `1h-30m` is malformed.
/// Negative and zero results are returned as-is, rejecting them is up to
/// the caller.
pub fn parse_duration(token: &str) -> Result<TimeDelta> {
    let invalid = |reason: String| FormatError::InvalidDuration {
        value: token.to_string(),
        reason,
    };

    let (negative, body) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };

    if body == "0" {
        return Ok(TimeDelta::zero());
    }
    if body.is_empty() {
        return Err(invalid("empty duration".to_string()).into());
    }

    let mut total: i64 = 0;
    let mut rest = body;
    while !rest.is_empty() {
        let (nanos, tail) = parse_component(rest).map_err(invalid)?;
        total = total
            .checked_add(nanos)
            .ok_or_else(|| invalid("duration out of range".to_string()))?;
        rest = tail;
    }

    Ok(TimeDelta::nanoseconds(if negative { -total } else { total }))
}

/// Consume one `<number><unit>` component, returning its length in
/// nanoseconds and the unparsed remainder.
fn parse_component(input: &str) -> std::result::Result<(i64, &str), String> {
    let number_len = input
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(input.len());
    let (number, rest) = input.split_at(number_len);

    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if fraction.contains('.') {
        return Err(format!("malformed number {:?}", number));
    }
    if whole.is_empty() && fraction.is_empty() {
        return Err(format!("expected a number before {:?}", rest));
    }

    let unit_len = rest
        .find(|c: char| c.is_ascii_digit() || c == '.')
        .unwrap_or(rest.len());
    let (unit, tail) = rest.split_at(unit_len);
    if unit.is_empty() {
        return Err(format!("missing unit after {:?}", number));
    }
    let scale = unit_nanos(unit).ok_or_else(|| format!("unknown unit {:?}", unit))?;

    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| "duration out of range".to_string())?
    };
    let mut nanos = whole
        .checked_mul(scale)
        .ok_or_else(|| "duration out of range".to_string())?;

    if !fraction.is_empty() {
        let digits = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
        let numerator: i64 = digits
            .parse()
            .map_err(|_| format!("malformed number {:?}", number))?;
        let denominator = 10f64.powi(digits.len() as i32);
        let fractional = (numerator as f64 * scale as f64 / denominator) as i64;
        nanos = nanos
            .checked_add(fractional)
            .ok_or_else(|| "duration out of range".to_string())?;
    }

    Ok((nanos, tail))
}

fn unit_nanos(unit: &str) -> Option<i64> {
    match unit {
        "h" => Some(NANOS_PER_HOUR),
        "m" => Some(NANOS_PER_MINUTE),
        "s" => Some(NANOS_PER_SECOND),
        _ => None,
    }
}

/// Fractional views of a [`TimeDelta`] used by the metric formulas
pub trait DurationExt {
    fn hours_f64(&self) -> f64;
    fn minutes_f64(&self) -> f64;
    fn is_positive(&self) -> bool;
    /// Render as `1h30m0s`, the same shape the grammar accepts
    fn to_compact_string(&self) -> String;
}

impl DurationExt for TimeDelta {
    fn hours_f64(&self) -> f64 {
        match self.num_nanoseconds() {
            Some(nanos) => nanos as f64 / NANOS_PER_HOUR as f64,
            None => self.num_milliseconds() as f64 / 3_600_000.0,
        }
    }

    fn minutes_f64(&self) -> f64 {
        match self.num_nanoseconds() {
            Some(nanos) => nanos as f64 / NANOS_PER_MINUTE as f64,
            None => self.num_milliseconds() as f64 / 60_000.0,
        }
    }

    fn is_positive(&self) -> bool {
        *self > TimeDelta::zero()
    }

    fn to_compact_string(&self) -> String {
        if self.is_zero() {
            return "0s".to_string();
        }

        let sign = if *self < TimeDelta::zero() { "-" } else { "" };
        let total = self.abs().num_seconds();
        let (hours, minutes, seconds) = (total / 3600, total % 3600 / 60, total % 60);

        if hours > 0 {
            format!("{}{}h{}m{}s", sign, hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}{}m{}s", sign, minutes, seconds)
        } else {
            format!("{}{}s", sign, seconds)
        }
    }
}
