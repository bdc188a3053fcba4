//! Raw connection settings as supplied by the user.
//!
//! `ConnectionFields` is a flat record: every mechanism's fields sit side by
//! side and nothing is checked until the record is turned into a
//! [`ConnectionModel`](super::ConnectionModel).

use crate::models::{AuthenticationKind, ReadPreference, SslMode};
use crate::security::mask;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// Default host when none is given.
pub const DEFAULT_HOSTNAME: &str = "localhost";
/// Default MongoDB port.
pub const DEFAULT_PORT: u16 = 27017;

/// User-supplied connection settings.
///
/// Field names match configuration records, so a JSON document such as
/// `{"authentication": "KERBEROS", "kerberos_principal": "lucas@kerb.mongodb.parts"}`
/// deserializes directly. Unknown keys are rejected. Passwords are never
/// serialized back out.
///
/// # Example
/// ```rust
/// use mongodb_connection_model::ConnectionFields;
///
/// let fields = ConnectionFields::mongodb("arlo", "woof").with_hostname("db.example.com");
/// assert_eq!(fields.hostname, "db.example.com");
/// assert_eq!(fields.port, 27017);
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConnectionFields {
    /// Server host name
    pub hostname: String,
    /// Server port
    pub port: u16,
    /// Replica set name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replica_set_name: Option<String>,
    /// Read preference for the driver
    pub read_preference: ReadPreference,

    /// Active authentication mechanism
    pub authentication: AuthenticationKind,

    /// MONGODB username
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mongodb_username: Option<String>,
    /// MONGODB password
    #[serde(skip_serializing)]
    pub mongodb_password: Option<String>,
    /// MONGODB auth source, `admin` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mongodb_database_name: Option<String>,

    /// KERBEROS service name, `mongodb` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kerberos_service_name: Option<String>,
    /// KERBEROS principal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kerberos_principal: Option<String>,
    /// KERBEROS password
    #[serde(skip_serializing)]
    pub kerberos_password: Option<String>,

    /// LDAP username
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ldap_username: Option<String>,
    /// LDAP password
    #[serde(skip_serializing)]
    pub ldap_password: Option<String>,

    /// X509 subject DN
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x509_username: Option<String>,

    /// TLS mode
    pub ssl: SslMode,
    /// CA bundle paths; a single path string is accepted in records
    #[serde(
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub ssl_ca: Vec<PathBuf>,
    /// Client certificate path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_certificate: Option<PathBuf>,
    /// Client private key path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_private_key: Option<PathBuf>,
    /// Passphrase for the private key
    #[serde(skip_serializing)]
    pub ssl_private_key_password: Option<String>,
}

impl Default for ConnectionFields {
    fn default() -> Self {
        Self {
            hostname: DEFAULT_HOSTNAME.to_string(),
            port: DEFAULT_PORT,
            replica_set_name: None,
            read_preference: ReadPreference::default(),
            authentication: AuthenticationKind::default(),
            mongodb_username: None,
            mongodb_password: None,
            mongodb_database_name: None,
            kerberos_service_name: None,
            kerberos_principal: None,
            kerberos_password: None,
            ldap_username: None,
            ldap_password: None,
            x509_username: None,
            ssl: SslMode::default(),
            ssl_ca: Vec::new(),
            ssl_certificate: None,
            ssl_private_key: None,
            ssl_private_key_password: None,
        }
    }
}

impl std::fmt::Debug for ConnectionFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionFields")
            .field("hostname", &self.hostname)
            .field("port", &self.port)
            .field("replica_set_name", &self.replica_set_name)
            .field("read_preference", &self.read_preference)
            .field("authentication", &self.authentication)
            .field("mongodb_username", &self.mongodb_username)
            .field("mongodb_password", &mask(self.mongodb_password.as_ref()))
            .field("mongodb_database_name", &self.mongodb_database_name)
            .field("kerberos_service_name", &self.kerberos_service_name)
            .field("kerberos_principal", &self.kerberos_principal)
            .field("kerberos_password", &mask(self.kerberos_password.as_ref()))
            .field("ldap_username", &self.ldap_username)
            .field("ldap_password", &mask(self.ldap_password.as_ref()))
            .field("x509_username", &self.x509_username)
            .field("ssl", &self.ssl)
            .field("ssl_ca", &self.ssl_ca)
            .field("ssl_certificate", &self.ssl_certificate)
            .field("ssl_private_key", &self.ssl_private_key)
            .field(
                "ssl_private_key_password",
                &mask(self.ssl_private_key_password.as_ref()),
            )
            .finish()
    }
}

impl ConnectionFields {
    /// Creates fields with every setting at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fields for MONGODB username/password authentication.
    pub fn mongodb(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            authentication: AuthenticationKind::MongoDb,
            mongodb_username: Some(username.into()),
            mongodb_password: Some(password.into()),
            ..Self::default()
        }
    }

    /// Fields for LDAP authentication.
    pub fn ldap(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            authentication: AuthenticationKind::Ldap,
            ldap_username: Some(username.into()),
            ldap_password: Some(password.into()),
            ..Self::default()
        }
    }

    /// Fields for X509 authentication with the given subject DN.
    pub fn x509(distinguished_name: impl Into<String>) -> Self {
        Self {
            authentication: AuthenticationKind::X509,
            x509_username: Some(distinguished_name.into()),
            ..Self::default()
        }
    }

    /// Fields for KERBEROS authentication of `principal`.
    pub fn kerberos(principal: impl Into<String>) -> Self {
        Self {
            authentication: AuthenticationKind::Kerberos,
            kerberos_principal: Some(principal.into()),
            ..Self::default()
        }
    }

    /// Builder method to set the host name.
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    /// Builder method to set the port.
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Builder method to set the replica set name.
    pub fn with_replica_set_name(mut self, name: impl Into<String>) -> Self {
        self.replica_set_name = Some(name.into());
        self
    }

    /// Builder method to set the read preference.
    pub const fn with_read_preference(mut self, read_preference: ReadPreference) -> Self {
        self.read_preference = read_preference;
        self
    }

    /// Builder method to set the MONGODB auth source.
    pub fn with_mongodb_database_name(mut self, database_name: impl Into<String>) -> Self {
        self.mongodb_database_name = Some(database_name.into());
        self
    }

    /// Builder method to set the KERBEROS password.
    pub fn with_kerberos_password(mut self, password: impl Into<String>) -> Self {
        self.kerberos_password = Some(password.into());
        self
    }

    /// Builder method to set the KERBEROS service name.
    pub fn with_kerberos_service_name(mut self, service_name: impl Into<String>) -> Self {
        self.kerberos_service_name = Some(service_name.into());
        self
    }

    /// Builder method to select a TLS mode.
    pub const fn with_ssl(mut self, ssl: SslMode) -> Self {
        self.ssl = ssl;
        self
    }

    /// Builder method for `ssl = ALL` with its required files.
    pub fn with_client_tls(
        mut self,
        ca: impl IntoIterator<Item = impl Into<PathBuf>>,
        certificate: impl Into<PathBuf>,
        private_key: impl Into<PathBuf>,
    ) -> Self {
        self.ssl = SslMode::All;
        self.ssl_ca = ca.into_iter().map(Into::into).collect();
        self.ssl_certificate = Some(certificate.into());
        self.ssl_private_key = Some(private_key.into());
        self
    }

    /// Builder method to set the private key passphrase.
    pub fn with_ssl_private_key_password(mut self, passphrase: impl Into<String>) -> Self {
        self.ssl_private_key_password = Some(passphrase.into());
        self
    }
}

/// Treats an empty string the same as an absent field.
pub(crate) fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(PathBuf),
        Many(Vec<PathBuf>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(path) => vec![path],
        OneOrMany::Many(paths) => paths,
    })
}
