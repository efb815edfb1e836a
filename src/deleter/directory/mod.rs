//! # Directory Service
//!
//! The directory is the authority on which accounts still exist. The purge
//! loop only ever asks it one question: does an entry match this filter
//! anywhere under the base DN?
//!
//! - [`ldap::LdapDirectory`]: Production implementation, one bound connection.
//! - [`memory::InMemoryDirectory`]: Set of known uids, for testing.

use crate::error::Result;
use std::fmt;

pub mod ldap;
pub mod memory;

const UID_ATTRIBUTE: &str = "uid";

/// An equality filter `attribute=value` with the value escaped per RFC 4515.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LdapFilter {
    attribute: String,
    value: String,
    rendered: String,
}

impl LdapFilter {
    pub fn equality(attribute: &str, value: &str) -> Self {
        Self {
            attribute: attribute.to_string(),
            value: value.to_string(),
            rendered: format!("{}={}", attribute, ldap3::ldap_escape(value)),
        }
    }

    /// Filter matching a Mattermost user's `AuthData`.
    pub fn uid(value: &str) -> Self {
        Self::equality(UID_ATTRIBUTE, value)
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// The unescaped value being matched.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn as_str(&self) -> &str {
        &self.rendered
    }

    /// Parenthesized form sent to the server.
    pub fn to_query(&self) -> String {
        format!("({})", self.rendered)
    }
}

impl fmt::Display for LdapFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

/// Lookup capability against the authoritative directory.
pub trait Directory {
    /// Whether at least one entry matches `filter` in a subtree search.
    fn contains(&mut self, filter: &LdapFilter) -> Result<bool>;
}
