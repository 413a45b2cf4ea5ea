//! Departure time label comparison.
//!
//! SNCF Connect provides departure times as zero-padded 24-hour "HH:MM"
//! labels. Filtering compares a proposal's label against the configured
//! minimum departure time. Labels that conform to the format are parsed
//! into a real time type; anything else falls back to plain string
//! comparison, which is what the format-conformant case is equivalent to
//! anyway for same-day labels.

use chrono::NaiveTime;

/// Parse a zero-padded 24-hour "HH:MM" label.
///
/// Returns `None` for anything that is not exactly five characters of
/// `digit digit ':' digit digit` within valid ranges.
///
/// # Examples
///
/// ```
/// use sncf_watch::domain::parse_hhmm;
///
/// assert!(parse_hhmm("06:30").is_some());
/// assert!(parse_hhmm("23:59").is_some());
/// assert!(parse_hhmm("6:30").is_none());
/// assert!(parse_hhmm("25:00").is_none());
/// ```
pub fn parse_hhmm(label: &str) -> Option<NaiveTime> {
    let bytes = label.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return None;
    }

    let hour = parse_two_digits(&bytes[0..2])?;
    let minute = parse_two_digits(&bytes[3..5])?;

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Whether a departure-time label is earlier than the configured minimum.
///
/// When both labels parse as "HH:MM" the comparison uses the parsed times.
/// Otherwise it falls back to lexicographic string order, matching the
/// historical behavior for non-conformant labels.
pub fn departs_before(label: &str, minimum: &str) -> bool {
    match (parse_hhmm(label), parse_hhmm(minimum)) {
        (Some(time), Some(min)) => time < min,
        _ => label < minimum,
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}
