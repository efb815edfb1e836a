use chrono::{DateTime, Utc};

/// A Mattermost user row flagged as soft-deleted (`DeleteAt > 0`).
///
/// Read-only: the store hands these out and nothing in the crate mutates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateUser {
    pub id: String,
    pub username: String,
    /// LDAP identity the account was created from. NULL for non-LDAP accounts.
    pub auth_data: Option<String>,
    /// Milliseconds since the epoch, 0 for active accounts.
    pub delete_at: i64,
}

impl CandidateUser {
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        auth_data: Option<&str>,
        delete_at: i64,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            auth_data: auth_data.map(str::to_string),
            delete_at,
        }
    }

    pub fn is_soft_deleted(&self) -> bool {
        self.delete_at > 0
    }

    /// The directory uid to look up, verbatim. `None` for NULL or empty `AuthData`.
    pub fn directory_uid(&self) -> Option<&str> {
        self.auth_data.as_deref().filter(|uid| !uid.is_empty())
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        if !self.is_soft_deleted() {
            return None;
        }
        DateTime::from_timestamp_millis(self.delete_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_uid() {
        let user = CandidateUser::new("u1", "jdoe", Some("jdoe"), 1000);
        assert_eq!(user.directory_uid(), Some("jdoe"));

        let user = CandidateUser::new("u2", "local", None, 1000);
        assert_eq!(user.directory_uid(), None);

        let user = CandidateUser::new("u3", "blank", Some(""), 1000);
        assert_eq!(user.directory_uid(), None);

        let user = CandidateUser::new("u4", "padded", Some(" jdoe"), 1000);
        assert_eq!(user.directory_uid(), Some(" jdoe"));
    }

    #[test]
    fn test_deleted_at() {
        let user = CandidateUser::new("u1", "jdoe", Some("jdoe"), 1_700_000_000_000);
        let ts = user.deleted_at().unwrap();
        assert_eq!(ts.timestamp(), 1_700_000_000);

        let active = CandidateUser::new("u2", "active", Some("active"), 0);
        assert!(!active.is_soft_deleted());
        assert!(active.deleted_at().is_none());
    }
}
