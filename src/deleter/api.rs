//! # API Facade
//!
//! [`DeleterApi`] owns the three adapters a run needs and dispatches to the
//! command layer. It is generic over each seam so tests can swap in the
//! in-memory store, directory and deleter:
//!
//! - Production: `DeleterApi<MySqlStore, LdapDirectory, MattermostCli>`
//! - Testing: `DeleterApi<InMemoryStore, InMemoryDirectory, RecordingDeleter>`
//!
//! Like the commands it calls, the API never prints and never exits.

use crate::commands;
use crate::directory::Directory;
use crate::error::Result;
use crate::mattermost::UserDeleter;
use crate::model::CandidateUser;
use crate::store::UserStore;

pub struct DeleterApi<S: UserStore, D: Directory, X: UserDeleter> {
    store: S,
    directory: D,
    deleter: X,
}

impl<S: UserStore, D: Directory, X: UserDeleter> DeleterApi<S, D, X> {
    pub fn new(store: S, directory: D, deleter: X) -> Self {
        Self {
            store,
            directory,
            deleter,
        }
    }

    /// Soft-deleted users as the store returns them, without any directory lookup.
    pub fn candidates(&mut self) -> Result<Vec<CandidateUser>> {
        self.store.soft_deleted_users()
    }

    /// Delete every soft-deleted user the directory no longer knows about.
    pub fn purge(&mut self, dry_run: bool) -> Result<commands::CmdResult> {
        commands::purge::run(
            &mut self.store,
            &mut self.directory,
            &mut self.deleter,
            dry_run,
        )
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn deleter(&self) -> &X {
        &self.deleter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::memory::InMemoryDirectory;
    use crate::mattermost::RecordingDeleter;
    use crate::store::memory::InMemoryStore;

    fn api(
        dir: InMemoryDirectory,
    ) -> DeleterApi<InMemoryStore, InMemoryDirectory, RecordingDeleter> {
        let store = InMemoryStore::new().with_users([
            CandidateUser::new("u1", "jdoe", Some("jdoe"), 1000),
            CandidateUser::new("u2", "asmith", Some("asmith"), 0),
        ]);
        DeleterApi::new(store, dir, RecordingDeleter::new())
    }

    #[test]
    fn candidates_lists_soft_deleted_users_without_lookups() {
        let mut api = api(InMemoryDirectory::new());
        let ids: Vec<String> = api
            .candidates()
            .unwrap()
            .into_iter()
            .map(|u| u.id)
            .collect();

        assert_eq!(ids, vec!["u1"]);
        assert!(api.directory().lookups().is_empty());
        assert!(api.deleter().deleted().is_empty());
    }

    #[test]
    fn purge_dispatches_to_the_deleter() {
        let mut api = api(InMemoryDirectory::new());
        let result = api.purge(false).unwrap();

        assert_eq!(api.store().queries(), 1);
        assert_eq!(api.directory().lookups(), ["uid=jdoe"]);
        assert_eq!(api.deleter().deleted(), ["u1"]);
        assert_eq!(result.summary().deleted, 1);
    }

    #[test]
    fn purge_passes_dry_run_through() {
        let mut api = api(InMemoryDirectory::new());
        let result = api.purge(true).unwrap();

        assert!(api.deleter().deleted().is_empty());
        assert_eq!(result.summary().absent, 1);
        assert_eq!(result.summary().deleted, 0);
    }
}
