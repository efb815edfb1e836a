use super::{Directory, LdapFilter};
use crate::config::DirectorySettings;
use crate::error::{DeleterError, Result};
use ldap3::{LdapConn, LdapConnSettings, Scope};
use tracing::debug;

/// Request no attributes back, presence is all we need.
const NO_ATTRIBUTES: &str = "1.1";

/// A bound LDAP connection searching under a fixed base DN.
pub struct LdapDirectory {
    conn: LdapConn,
    base_dn: String,
}

impl LdapDirectory {
    /// Connect and simple-bind. Any failure, including a rejected bind, is a
    /// connection failure.
    pub fn connect(settings: &DirectorySettings) -> Result<Self> {
        let conn_settings = LdapConnSettings::new()
            .set_starttls(settings.uses_starttls())
            .set_no_tls_verify(settings.skip_certificate_verification);

        let mut conn = LdapConn::with_settings(conn_settings, &settings.url)
            .map_err(DeleterError::directory_connect)?;
        conn.simple_bind(&settings.bind_dn, &settings.bind_password)
            .and_then(|res| res.success())
            .map_err(DeleterError::directory_connect)?;

        debug!(
            "connected LDAP server: {} as user {}",
            settings.url, settings.bind_dn
        );

        Ok(Self {
            conn,
            base_dn: settings.base_dn.clone(),
        })
    }
}

impl Directory for LdapDirectory {
    fn contains(&mut self, filter: &LdapFilter) -> Result<bool> {
        let (entries, _) = self
            .conn
            .search(
                &self.base_dn,
                Scope::Subtree,
                &filter.to_query(),
                vec![NO_ATTRIBUTES],
            )
            .and_then(|res| res.success())
            .map_err(DeleterError::directory)?;

        Ok(!entries.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConnectionSecurity;
    use std::net::TcpListener;
    use std::thread;

    fn settings(url: String, security: ConnectionSecurity) -> DirectorySettings {
        DirectorySettings {
            url,
            security,
            skip_certificate_verification: false,
            bind_dn: "cn=reader,dc=example,dc=com".to_string(),
            bind_password: "pw".to_string(),
            base_dn: "dc=example,dc=com".to_string(),
        }
    }

    #[test]
    fn test_connect_refused_is_a_connection_failure() {
        let settings = settings(
            "ldap://127.0.0.1:1".to_string(),
            ConnectionSecurity::None,
        );

        let err = LdapDirectory::connect(&settings).err().unwrap();
        assert!(err.is_connection_failure());
        assert!(err.to_string().starts_with("cannot connect to LDAP"));
    }

    #[test]
    fn test_ldaps_to_closing_server_is_a_connection_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            drop(stream);
        });

        let settings = settings(
            format!("ldaps://127.0.0.1:{}", port),
            ConnectionSecurity::Tls,
        );
        let err = LdapDirectory::connect(&settings).err().unwrap();
        server.join().unwrap();

        assert!(err.is_connection_failure());
        assert!(matches!(err, DeleterError::DirectoryConnect(_)));
    }
}
