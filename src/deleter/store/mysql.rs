use super::UserStore;
use crate::config::DatabaseSettings;
use crate::error::{DeleterError, Result};
use crate::model::CandidateUser;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::{Connection, Row};
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

/// Every soft-deleted user. Column names follow the Mattermost `Users` table.
pub const SOFT_DELETED_USERS: &str = r#"
SELECT Id, Username, AuthData, DeleteAt
FROM Users
WHERE DeleteAt > 0
"#;

/// A single MySQL connection driven from synchronous code.
///
/// sqlx is async only, so the store carries its own current-thread runtime
/// and blocks on each call.
pub struct MySqlStore {
    // Dropped before the runtime it was registered with.
    conn: MySqlConnection,
    runtime: Runtime,
}

impl MySqlStore {
    pub fn connect(settings: &DatabaseSettings) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(DeleterError::Io)?;

        let options = connect_options(settings);
        let conn = runtime
            .block_on(MySqlConnection::connect_with(&options))
            .map_err(DeleterError::database_connect)?;

        debug!(
            "connected database: {}/{} as user {}",
            settings.host, settings.database, settings.user
        );

        Ok(Self { conn, runtime })
    }
}

impl UserStore for MySqlStore {
    fn soft_deleted_users(&mut self) -> Result<Vec<CandidateUser>> {
        let rows = self
            .runtime
            .block_on(sqlx::query(SOFT_DELETED_USERS).fetch_all(&mut self.conn))
            .map_err(DeleterError::database)?;

        rows.iter().map(parse_user_row).collect()
    }
}

fn connect_options(settings: &DatabaseSettings) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.user)
        .password(&settings.password)
        .database(&settings.database)
}

fn parse_user_row(row: &MySqlRow) -> Result<CandidateUser> {
    Ok(CandidateUser {
        id: row.try_get("Id").map_err(DeleterError::database)?,
        username: row.try_get("Username").map_err(DeleterError::database)?,
        auth_data: row.try_get("AuthData").map_err(DeleterError::database)?,
        delete_at: row.try_get("DeleteAt").map_err(DeleterError::database)?,
    })
}
