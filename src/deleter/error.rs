use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeleterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("cannot connect to database: {0}")]
    DatabaseConnect(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("cannot connect to LDAP: {0}")]
    DirectoryConnect(String),

    #[error("LDAP error: {0}")]
    Directory(String),

    #[error("Command error: {0}")]
    Command(String),
}

impl DeleterError {
    pub fn database_connect<E: std::fmt::Display>(err: E) -> Self {
        Self::DatabaseConnect(err.to_string())
    }

    pub fn database<E: std::fmt::Display>(err: E) -> Self {
        Self::Database(err.to_string())
    }

    pub fn directory_connect<E: std::fmt::Display>(err: E) -> Self {
        Self::DirectoryConnect(err.to_string())
    }

    pub fn directory<E: std::fmt::Display>(err: E) -> Self {
        Self::Directory(err.to_string())
    }

    /// True for failures that happen before the first candidate is examined.
    pub fn is_connection_failure(&self) -> bool {
        matches!(
            self,
            DeleterError::DatabaseConnect(_) | DeleterError::DirectoryConnect(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DeleterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_failures_are_flagged() {
        assert!(DeleterError::database_connect("refused").is_connection_failure());
        assert!(DeleterError::directory_connect("invalid credentials").is_connection_failure());
        assert!(!DeleterError::directory("no such object").is_connection_failure());
        assert!(!DeleterError::Command("exit status 1".into()).is_connection_failure());
    }

    #[test]
    fn test_connect_messages() {
        let err = DeleterError::database_connect("connection refused");
        assert_eq!(
            err.to_string(),
            "cannot connect to database: connection refused"
        );

        let err = DeleterError::directory_connect("bind failed");
        assert_eq!(err.to_string(), "cannot connect to LDAP: bind failed");
    }
}
