use super::{Directory, LdapFilter};
use crate::error::{DeleterError, Result};
use std::collections::HashSet;

/// A directory holding a fixed set of uids. Records every lookup.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDirectory {
    uids: HashSet<String>,
    lookups: Vec<String>,
    fail_on: Option<String>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_uid(mut self, uid: &str) -> Self {
        self.uids.insert(uid.to_string());
        self
    }

    /// Make the lookup for `uid` fail, as if the server went away mid-run.
    pub fn failing_on(mut self, uid: &str) -> Self {
        self.fail_on = Some(uid.to_string());
        self
    }

    /// Filters searched so far, in order.
    pub fn lookups(&self) -> &[String] {
        &self.lookups
    }
}

impl Directory for InMemoryDirectory {
    fn contains(&mut self, filter: &LdapFilter) -> Result<bool> {
        self.lookups.push(filter.to_string());
        if self.fail_on.as_deref() == Some(filter.value()) {
            return Err(DeleterError::directory("server unavailable"));
        }
        Ok(filter.attribute() == "uid" && self.uids.contains(filter.value()))
    }
}
