use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::KaraokeError;
use crate::karaoke::model::Centiseconds;

// @const: ASS timestamp regex (H:MM:SS.ff)
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+):(\d{1,2}):(\d{1,2})(?:\.(\d{1,9}))?\s*$").unwrap()
});

/// Parse an ASS timestamp into centiseconds since midnight.
///
/// The fraction is read as a decimal fraction of a second, so the usual two
/// digits are taken as hundredths directly and longer fractions are rounded
/// to the nearest centisecond.
pub fn parse_centiseconds(timestamp: &str) -> Result<Centiseconds, KaraokeError> {
    let invalid = || KaraokeError::TimestampInvalid(timestamp.to_string());
    let caps = TIMESTAMP_REGEX.captures(timestamp).ok_or_else(invalid)?;

    let hours: i64 = caps[1].parse().map_err(|_| invalid())?;
    let minutes: i64 = caps[2].parse().map_err(|_| invalid())?;
    let seconds: i64 = caps[3].parse().map_err(|_| invalid())?;
    if minutes >= 60 || seconds >= 60 {
        return Err(invalid());
    }

    let fraction = match caps.get(4) {
        Some(m) => fraction_to_centiseconds(m.as_str()).ok_or_else(invalid)?,
        None => 0,
    };

    hours
        .checked_mul(60)
        .and_then(|m| m.checked_add(minutes))
        .and_then(|m| m.checked_mul(60))
        .and_then(|s| s.checked_add(seconds))
        .and_then(|s| s.checked_mul(100))
        .and_then(|cs| cs.checked_add(fraction))
        .ok_or_else(invalid)
}

fn fraction_to_centiseconds(digits: &str) -> Option<Centiseconds> {
    let value: i64 = digits.parse().ok()?;
    let len = digits.len() as u32;
    if len <= 2 {
        Some(value * 10_i64.pow(2 - len))
    } else {
        let scale = 10_i64.pow(len - 2);
        Some((value + scale / 2) / scale)
    }
}

/// Format centiseconds back into an ASS timestamp, mainly for log output
pub fn format_centiseconds(cs: Centiseconds) -> String {
    let sign = if cs < 0 { "-" } else { "" };
    let cs = cs.abs();
    let hours = cs / 360_000;
    let minutes = (cs % 360_000) / 6_000;
    let seconds = (cs % 6_000) / 100;
    let hundredths = cs % 100;
    format!("{}{}:{:02}:{:02}.{:02}", sign, hours, minutes, seconds, hundredths)
}
