//! Cache duration parsing.
//!
//! Cache durations are written in the standard time-span notation
//! `[-][d.]hh:mm[:ss[.fffffff]]`, e.g. `"00:00:03.000"` for three seconds or
//! `"1.00:00:00"` for a day. A bare integer is read as a number of days.
//!
//! Anything that does not parse, and any zero or negative span, disables
//! caching: [`parse_cache_duration`] returns `None` for all of those.

use std::time::Duration;

/// Parse a cache duration.
///
/// # Examples
///
/// ```
/// use declaro_core::parse_cache_duration;
/// use std::time::Duration;
///
/// assert_eq!(parse_cache_duration("00:00:03.000"), Some(Duration::from_secs(3)));
/// assert_eq!(parse_cache_duration("00:00:00"), None);
/// assert_eq!(parse_cache_duration("soon"), None);
/// ```
pub fn parse_cache_duration(input: &str) -> Option<Duration> {
    let input = input.trim();
    if input.is_empty() || input.starts_with('-') {
        return None;
    }

    let duration = if input.contains(':') {
        parse_clock(input)?
    } else {
        let days: u64 = input.parse().ok()?;
        Duration::from_secs(days.checked_mul(86_400)?)
    };

    (!duration.is_zero()).then_some(duration)
}

fn parse_clock(input: &str) -> Option<Duration> {
    let parts: Vec<&str> = input.split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return None;
    }

    let (days, hours) = match parts[0].split_once('.') {
        Some((days, hours)) => (parse_number(days, u64::MAX)?, parse_number(hours, 23)?),
        None => (0, parse_number(parts[0], 23)?),
    };
    let minutes = parse_number(parts[1], 59)?;

    let (seconds, nanos) = match parts.get(2) {
        Some(part) => match part.split_once('.') {
            Some((seconds, fraction)) => (parse_number(seconds, 59)?, parse_fraction(fraction)?),
            None => (parse_number(part, 59)?, 0),
        },
        None => (0, 0),
    };

    let total = days
        .checked_mul(86_400)?
        .checked_add(hours * 3_600 + minutes * 60 + seconds)?;
    Some(Duration::new(total, nanos))
}

fn parse_number(part: &str, max: u64) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok().filter(|value| *value <= max)
}

/// Up to seven fractional digits (100ns ticks), scaled to nanoseconds.
fn parse_fraction(fraction: &str) -> Option<u32> {
    if fraction.is_empty() || fraction.len() > 7 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let digits: u32 = fraction.parse().ok()?;
    Some(digits * 10u32.pow(9 - fraction.len() as u32))
}
