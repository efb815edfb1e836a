//! # Mattermost User Deleter
//!
//! Mattermost deactivates LDAP users by setting `DeleteAt` on their row, but
//! never removes them. This crate finds those soft-deleted users, confirms
//! each one is really gone from the LDAP directory, and deletes it for good
//! through the Mattermost CLI.
//!
//! A user is only deleted after the directory answered that it has no such
//! entry. Any failure talking to the database, the directory or the CLI ends
//! the run, so an unreachable directory can never be mistaken for an empty one.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs)                                     │
//! │  - Parses flags, sets up logging, maps errors to exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Owns the adapters, dispatches to commands                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/purge.rs)                               │
//! │  - The per-candidate decision, returns the decision trail   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Adapters                                                   │
//! │  - store/      UserStore: MySQL or in-memory                │
//! │  - directory/  Directory: LDAP or in-memory                 │
//! │  - mattermost  UserDeleter: Mattermost CLI or recording     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward returns `Result` and logs through
//! `tracing`. Only `main.rs` writes the fatal error and exits.
//!
//! ## Module Overview
//!
//! - [`api`]: Facade over the commands
//! - [`commands`]: The purge pass and its result types
//! - [`config`]: Reading the Mattermost `config.json`
//! - [`store`]: Soft-deleted users from the Mattermost database
//! - [`directory`]: Presence checks against LDAP
//! - [`mattermost`]: Deleting users through the Mattermost CLI
//! - [`model`]: `CandidateUser`
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod directory;
pub mod error;
pub mod mattermost;
pub mod model;
pub mod store;
