pub mod ai;
pub mod api_keys;
pub mod media;
pub mod post;
pub mod taxonomy;
pub mod webhook;

use crate::domain::value_objects::timestamps::Timestamp;
use time::OffsetDateTime;

/// Parse an optional RFC 3339 field, naming the field in the error.
pub fn parse_timestamp(
    raw: Option<&str>,
    field: &str,
) -> Result<Option<OffsetDateTime>, String> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(value) => Timestamp::parse_rfc3339(value)
            .map(|ts| Some(ts.into_inner()))
            .ok_or_else(|| format!("{field} must be an RFC 3339 timestamp")),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_timestamp;

    #[test]
    fn given_valid_and_invalid_timestamps_when_parsed_should_map_errors() {
        assert!(parse_timestamp(Some("2024-05-01T10:00:00Z"), "x").unwrap().is_some());
        assert_eq!(parse_timestamp(None, "x"), Ok(None));
        assert_eq!(parse_timestamp(Some(" "), "x"), Ok(None));
        assert_eq!(
            parse_timestamp(Some("tomorrow"), "scheduled_at"),
            Err("scheduled_at must be an RFC 3339 timestamp".to_string())
        );
    }
}
