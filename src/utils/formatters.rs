use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt;

/// Date-time layout used for French output (`14/10/2026 09:05:03`)
pub const FRENCH_DATETIME: &str = "%d/%m/%Y %H:%M:%S";

/// Formats an epoch-milliseconds timestamp in `tz`, French style.
///
/// Values outside chrono's representable range yield an empty string.
#[must_use]
pub fn format_epoch_millis_in<Tz>(millis: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    tz.timestamp_millis_opt(millis)
        .single()
        .map_or_else(String::new, |dt| dt.format(FRENCH_DATETIME).to_string())
}

/// Formats an LDAP generalized time (`20240131084500.0Z`) in `tz`.
///
/// The value is 14 digits `YYYYMMDDhhmmss`, optionally followed by `.0Z` or
/// `Z`, and is always UTC. Anything else yields an empty string.
#[must_use]
pub fn format_ldap_timestamp_in<Tz>(ts: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let digits = ts
        .strip_suffix(".0Z")
        .or_else(|| ts.strip_suffix('Z'))
        .unwrap_or(ts);

    parse_generalized_time(digits).map_or_else(String::new, |naive| {
        Utc.from_utc_datetime(&naive)
            .with_timezone(tz)
            .format(FRENCH_DATETIME)
            .to_string()
    })
}

/// Parses `YYYYMMDDhhmmss`
fn parse_generalized_time(digits: &str) -> Option<NaiveDateTime> {
    if digits.len() != 14 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let field = |range: std::ops::Range<usize>| digits[range].parse::<u32>().ok();
    let year = digits[0..4].parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(year, field(4..6)?, field(6..8)?)?.and_hms_opt(
        field(8..10)?,
        field(10..12)?,
        field(12..14)?,
    )
}
