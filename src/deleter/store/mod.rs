//! # Relational Store
//!
//! The [`UserStore`] trait is the read side of Mattermost's own database: it
//! hands out every user row that has been soft-deleted (`DeleteAt > 0`).
//! Rows with `DeleteAt = 0` never leave the store, so active accounts are
//! never looked up in the directory, let alone deleted.
//!
//! ## Implementations
//!
//! - [`mysql::MySqlStore`]: Production store. One connection, one fixed query.
//! - [`memory::InMemoryStore`]: For testing the purge logic without a database.
//!
//! The store never writes. Removing a user goes through the Mattermost CLI
//! (see [`crate::mattermost`]) so Mattermost can clean up posts, channels and
//! sessions itself.

use crate::error::Result;
use crate::model::CandidateUser;

pub mod memory;
pub mod mysql;

/// Read access to soft-deleted Mattermost users.
pub trait UserStore {
    /// All users with a non-zero `DeleteAt`, in store order.
    fn soft_deleted_users(&mut self) -> Result<Vec<CandidateUser>>;
}
