use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Timestamp(pub OffsetDateTime);

impl Timestamp {
    pub fn now_utc() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    pub fn from(dt: OffsetDateTime) -> Self {
        Self(dt.to_offset(UtcOffset::UTC))
    }

    /// Parses an RFC 3339 string and normalizes it to UTC.
    pub fn parse_rfc3339(raw: &str) -> Option<Self> {
        OffsetDateTime::parse(raw, &Rfc3339).ok().map(Self::from)
    }

    /// Returns the inner UTC `OffsetDateTime` without consuming the wrapper.
    pub fn as_inner(&self) -> OffsetDateTime {
        self.0
    }

    /// Consumes the wrapper and returns the inner UTC `OffsetDateTime`.
    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }

    pub fn to_rfc3339(&self) -> String {
        format_rfc3339(self.0)
    }
}

/// RFC 3339 rendering used in every JSON body and webhook envelope.
pub fn format_rfc3339(dt: OffsetDateTime) -> String {
    dt.to_offset(UtcOffset::UTC)
        .format(&Rfc3339)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::UtcOffset;

    #[test]
    fn given_now_utc_when_called_should_return_utc_offset() {
        let result = Timestamp::now_utc();
        assert_eq!(result.as_inner().offset(), UtcOffset::UTC);
    }

    #[test]
    fn given_from_with_non_utc_offset_when_called_should_store_same_instant_in_utc() {
        let offset = UtcOffset::from_hms(-3, 0, 0).expect("valid offset");
        let dt = OffsetDateTime::now_utc().to_offset(offset);
        let result = Timestamp::from(dt);
        assert_eq!(result.as_inner().offset(), UtcOffset::UTC);
        assert_eq!(result.as_inner().unix_timestamp(), dt.unix_timestamp());
    }

    #[test]
    fn given_rfc3339_string_when_parsed_should_round_trip_the_instant() {
        let parsed = Timestamp::parse_rfc3339("2024-05-01T12:30:00-03:00").expect("valid");
        assert_eq!(parsed.to_rfc3339(), "2024-05-01T15:30:00Z");
    }

    #[test]
    fn given_garbage_when_parsed_should_return_none() {
        assert!(Timestamp::parse_rfc3339("yesterday").is_none());
    }
}
