//! Encode/decode SAML `dateTime` values.
//!
//! SAML instants come in two shapes: an integer-second form and a
//! fractional-second form. Which one a given IdP emits is not fixed ahead
//! of time, so decoding dispatches on the presence of a `.`. Sub-microsecond
//! digits are truncated, never rounded, which matters for the millisecond
//! boundary checks some IdPs (Azure AD in particular) rely on.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Timelike, Utc};

use crate::error::{SamlError, SamlResult};

/// Parses a SAML `dateTime` string into a UTC instant at microsecond
/// precision.
///
/// SAML instants are always suffixed with a literal `Z` (Zulu/UTC) rather
/// than carrying an explicit offset, so this parses as a naive local time
/// and then attaches the `Utc` zone directly instead of going through
/// `DateTime::parse_from_str`, which requires a `%z`/`%:z` offset field
/// the input never has.
pub fn saml_to_datetime(s: &str) -> SamlResult<DateTime<Utc>> {
    let naive = if s.contains('.') {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.fZ")
    } else {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%SZ")
    }
    .map_err(|_| SamlError::MalformedSamlResponse(format!("invalid SAML dateTime: {s}")))?;

    let utc = naive.and_utc();
    // Truncate to microsecond precision so comparisons match the
    // precision IdPs actually emit; chrono parses nanoseconds, so we
    // round-trip through microseconds explicitly rather than relying on
    // the parser to stop early.
    let micros = utc.timestamp_subsec_micros();
    Ok(utc
        .with_nanosecond(micros * 1_000)
        .expect("microseconds fit within a second"))
}

/// Formats a UTC instant as a SAML `dateTime` in integer-second form.
pub fn datetime_to_saml(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn decodes_integer_second_form() {
        let t = saml_to_datetime("2020-01-16T14:32:32Z").unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2020, 1, 16, 14, 32, 32).unwrap());
    }

    #[test]
    fn decodes_fractional_form_and_truncates() {
        let t = saml_to_datetime("2013-03-18T08:48:15.1280001Z").unwrap();
        let expected = Utc
            .with_ymd_and_hms(2013, 3, 18, 8, 48, 15)
            .unwrap()
            .with_nanosecond(128_000_000)
            .unwrap();
        assert_eq!(t, expected);
    }

    #[test]
    fn encode_is_integer_second_form() {
        let t = Utc.with_ymd_and_hms(2020, 9, 14, 14, 20, 11).unwrap();
        assert_eq!(datetime_to_saml(t), "2020-09-14T14:20:11Z");
    }

    #[test]
    fn rejects_garbage() {
        assert!(saml_to_datetime("not-a-date").is_err());
    }
}
