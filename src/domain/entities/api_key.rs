use time::OffsetDateTime;

/// Permission tags stored on a key. They are recorded but the gate does not branch on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Read,
    Write,
    Delete,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Read => "read",
            Permission::Write => "write",
            Permission::Delete => "delete",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "read" => Some(Permission::Read),
            "write" => Some(Permission::Write),
            "delete" => Some(Permission::Delete),
            _ => None,
        }
    }
}

/// Why a presented key was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRejection {
    Inactive,
    Expired,
}

/// A key is usable while active and strictly before its expiry.
pub fn check_usable(
    is_active: bool,
    expires_at: Option<OffsetDateTime>,
    now: OffsetDateTime,
) -> Result<(), KeyRejection> {
    if !is_active {
        return Err(KeyRejection::Inactive);
    }
    match expires_at {
        Some(expiry) if expiry <= now => Err(KeyRejection::Expired),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    #[test]
    fn given_active_key_without_expiry_should_be_usable() {
        let now = OffsetDateTime::now_utc();
        assert_eq!(check_usable(true, None, now), Ok(()));
    }

    #[test]
    fn given_inactive_key_should_be_rejected() {
        let now = OffsetDateTime::now_utc();
        assert_eq!(
            check_usable(false, Some(now + Duration::days(1)), now),
            Err(KeyRejection::Inactive)
        );
    }

    #[test]
    fn given_past_expiry_should_be_rejected() {
        let now = OffsetDateTime::now_utc();
        assert_eq!(
            check_usable(true, Some(now - Duration::seconds(1)), now),
            Err(KeyRejection::Expired)
        );
        assert_eq!(check_usable(true, Some(now + Duration::hours(1)), now), Ok(()));
    }

    #[test]
    fn given_permission_strings_when_parsed_should_accept_known_tags_only() {
        assert_eq!(Permission::parse("write"), Some(Permission::Write));
        assert_eq!(Permission::parse("admin"), None);
        assert_eq!(Permission::Delete.as_str(), "delete");
    }
}
