use super::UserStore;
use crate::error::Result;
use crate::model::CandidateUser;

/// Holds every user, active or not, and applies the same filter as the SQL query.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    users: Vec<CandidateUser>,
    queries: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: CandidateUser) -> Self {
        self.users.push(user);
        self
    }

    pub fn with_users<I: IntoIterator<Item = CandidateUser>>(mut self, users: I) -> Self {
        self.users.extend(users);
        self
    }

    /// Number of times the store has been queried.
    pub fn queries(&self) -> usize {
        self.queries
    }
}

impl UserStore for InMemoryStore {
    fn soft_deleted_users(&mut self) -> Result<Vec<CandidateUser>> {
        self.queries += 1;
        Ok(self
            .users
            .iter()
            .filter(|user| user.is_soft_deleted())
            .cloned()
            .collect())
    }
}
