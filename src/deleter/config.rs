//! Reading the Mattermost `config.json`.
//!
//! Only the `SqlSettings` and `LdapSettings` sections are consumed. Both are
//! decoded into owned `String`s once, here, so the rest of the crate works on
//! plain text.

use crate::error::{DeleterError, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

const DEFAULT_MYSQL_PORT: u16 = 3306;
const DEFAULT_MYSQL_HOST: &str = "127.0.0.1";
const MYSQL_DRIVER: &str = "mysql";

/// The subset of the Mattermost server configuration this tool reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MattermostConfig {
    pub sql_settings: SqlSettings,
    pub ldap_settings: LdapSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SqlSettings {
    #[serde(default)]
    pub driver_name: Option<String>,
    pub data_source: String,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LdapSettings {
    pub ldap_server: String,
    pub ldap_port: PortValue,
    #[serde(default)]
    pub connection_security: String,
    #[serde(default)]
    pub skip_certificate_verification: bool,
    pub bind_username: String,
    pub bind_password: String,
    #[serde(rename = "BaseDN")]
    pub base_dn: String,
}

impl fmt::Debug for LdapSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LdapSettings")
            .field("ldap_server", &self.ldap_server)
            .field("ldap_port", &self.ldap_port)
            .field("connection_security", &self.connection_security)
            .field(
                "skip_certificate_verification",
                &self.skip_certificate_verification,
            )
            .field("bind_username", &self.bind_username)
            .field("bind_password", &"***")
            .field("base_dn", &self.base_dn)
            .finish()
    }
}

/// Mattermost writes `LdapPort` as a number, older hand-edited configs as a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PortValue {
    Number(u16),
    Text(String),
}

impl PortValue {
    fn to_port(&self) -> Result<u16> {
        match self {
            PortValue::Number(n) => Ok(*n),
            PortValue::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| DeleterError::Config(format!("invalid LdapPort: {:?}", s))),
        }
    }
}

/// Transport security for the directory connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionSecurity {
    None,
    Tls,
    StartTls,
}

impl ConnectionSecurity {
    fn parse(value: &str) -> Result<Self> {
        match value.trim() {
            "" => Ok(ConnectionSecurity::None),
            "TLS" => Ok(ConnectionSecurity::Tls),
            "STARTTLS" => Ok(ConnectionSecurity::StartTls),
            other => Err(DeleterError::Config(format!(
                "unsupported LDAP ConnectionSecurity: {:?}",
                other
            ))),
        }
    }

    fn scheme(self) -> &'static str {
        match self {
            ConnectionSecurity::Tls => "ldaps://",
            ConnectionSecurity::None | ConnectionSecurity::StartTls => "ldap://",
        }
    }
}

/// MySQL connection parameters extracted from `SqlSettings.DataSource`.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database: String,
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("user", &self.user)
            .field("password", &"***")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .finish()
    }
}

impl DatabaseSettings {
    /// Parse a Go MySQL driver DSN: `user:password@tcp(host:port)/dbname?params`.
    pub fn from_data_source(dsn: &str) -> Result<Self> {
        let invalid = |reason: &str| DeleterError::Config(format!("invalid DataSource: {}", reason));

        // The database name follows the last '/', credentials end at the last '@' before it.
        let slash = dsn
            .rfind('/')
            .ok_or_else(|| invalid("missing database name"))?;
        let (head, path) = dsn.split_at(slash);

        let (credentials, location) = head
            .rsplit_once('@')
            .ok_or_else(|| invalid("missing '@' between credentials and address"))?;

        let (user, password) = match credentials.split_once(':') {
            Some((user, password)) => (user, password),
            None => (credentials, ""),
        };
        if user.is_empty() {
            return Err(invalid("missing user"));
        }

        let address = if let Some(rest) = location.strip_prefix("tcp(") {
            rest.strip_suffix(')')
                .ok_or_else(|| invalid("unterminated tcp(...) address"))?
        } else if location.starts_with("unix(") {
            return Err(invalid("unix socket addresses are not supported"));
        } else {
            location
        };

        let database = path[1..].split('?').next().unwrap_or_default();
        if database.is_empty() {
            return Err(invalid("missing database name"));
        }

        let (host, port) = match address.rsplit_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse()
                    .map_err(|_| invalid(&format!("bad port {:?}", port)))?;
                (host, port)
            }
            None => (address, DEFAULT_MYSQL_PORT),
        };
        let host = if host.is_empty() {
            DEFAULT_MYSQL_HOST
        } else {
            host
        };

        Ok(Self {
            user: user.to_string(),
            password: password.to_string(),
            host: host.to_string(),
            port,
            database: database.to_string(),
        })
    }
}

/// LDAP connection parameters extracted from `LdapSettings`.
#[derive(Clone, PartialEq, Eq)]
pub struct DirectorySettings {
    pub url: String,
    pub security: ConnectionSecurity,
    pub skip_certificate_verification: bool,
    pub bind_dn: String,
    pub bind_password: String,
    pub base_dn: String,
}

impl fmt::Debug for DirectorySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectorySettings")
            .field("url", &self.url)
            .field("security", &self.security)
            .field(
                "skip_certificate_verification",
                &self.skip_certificate_verification,
            )
            .field("bind_dn", &self.bind_dn)
            .field("bind_password", &"***")
            .field("base_dn", &self.base_dn)
            .finish()
    }
}

impl DirectorySettings {
    pub fn from_ldap_settings(ldap: &LdapSettings) -> Result<Self> {
        let security = ConnectionSecurity::parse(&ldap.connection_security)?;
        let server = ldap.ldap_server.trim();
        if server.is_empty() {
            return Err(DeleterError::Config("LdapServer is empty".to_string()));
        }
        let url = format!("{}{}:{}", security.scheme(), server, ldap.ldap_port.to_port()?);

        Ok(Self {
            url,
            security,
            skip_certificate_verification: ldap.skip_certificate_verification,
            bind_dn: ldap.bind_username.clone(),
            bind_password: ldap.bind_password.clone(),
            base_dn: ldap.base_dn.clone(),
        })
    }

    pub fn uses_starttls(&self) -> bool {
        self.security == ConnectionSecurity::StartTls
    }
}

/// Everything the deleter needs from the Mattermost configuration.
#[derive(Debug, Clone)]
pub struct DeleterConfig {
    pub database: DatabaseSettings,
    pub directory: DirectorySettings,
}

impl DeleterConfig {
    /// Load and validate the Mattermost configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(DeleterError::Io)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: MattermostConfig =
            serde_json::from_str(content).map_err(DeleterError::Serialization)?;
        Self::from_mattermost(&config)
    }

    pub fn from_mattermost(config: &MattermostConfig) -> Result<Self> {
        if let Some(driver) = config.sql_settings.driver_name.as_deref() {
            if !driver.eq_ignore_ascii_case(MYSQL_DRIVER) {
                return Err(DeleterError::Config(format!(
                    "unsupported database driver {:?}, only {} is supported",
                    driver, MYSQL_DRIVER
                )));
            }
        }

        Ok(Self {
            database: DatabaseSettings::from_data_source(&config.sql_settings.data_source)?,
            directory: DirectorySettings::from_ldap_settings(&config.ldap_settings)?,
        })
    }
}
