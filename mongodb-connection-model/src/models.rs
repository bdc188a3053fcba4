//! Enumerated settings shared by the connection model and driver options.
//!
//! The string forms match the values accepted in configuration records
//! (`"KERBEROS"`, `"ALL"`, `"secondaryPreferred"`, ...).

use serde::{Deserialize, Serialize};

/// Authentication mechanism selected for a connection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthenticationKind {
    /// No credentials
    #[default]
    None,
    /// Username/password checked by the server (SCRAM)
    #[serde(rename = "MONGODB")]
    MongoDb,
    /// Username/password proxied to a directory service
    Ldap,
    /// Client certificate subject
    X509,
    /// Kerberos ticket for a principal
    Kerberos,
}

impl AuthenticationKind {
    /// Every mechanism.
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::MongoDb,
        Self::Kerberos,
        Self::Ldap,
        Self::X509,
    ];

    /// Configuration spelling of the mechanism.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::MongoDb => "MONGODB",
            Self::Ldap => "LDAP",
            Self::X509 => "X509",
            Self::Kerberos => "KERBEROS",
        }
    }

    /// Auth mechanism tag sent to the driver, if any.
    pub const fn driver_mechanism(self) -> Option<AuthMechanism> {
        match self {
            Self::None | Self::MongoDb => None,
            Self::Ldap => Some(AuthMechanism::Plain),
            Self::X509 => Some(AuthMechanism::MongoDbX509),
            Self::Kerberos => Some(AuthMechanism::Gssapi),
        }
    }
}

impl std::fmt::Display for AuthenticationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AuthenticationKind {
    type Err = crate::error::ConnectionModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                crate::error::ConnectionModelError::configuration(format!(
                    "Unknown authentication '{}'",
                    s
                ))
            })
    }
}

/// TLS mode for a connection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SslMode {
    /// Plain TCP
    #[default]
    None,
    /// TLS without validating the server certificate
    Unvalidated,
    /// TLS validating the server certificate
    Server,
    /// TLS validating the server with a client certificate and CA bundle
    All,
}

impl SslMode {
    /// Every mode.
    pub const ALL: [Self; 4] = [Self::None, Self::Unvalidated, Self::Server, Self::All];

    /// Configuration spelling of the mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Unvalidated => "UNVALIDATED",
            Self::Server => "SERVER",
            Self::All => "ALL",
        }
    }
}

impl std::fmt::Display for SslMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SslMode {
    type Err = crate::error::ConnectionModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                crate::error::ConnectionModelError::configuration(format!(
                    "Unknown ssl mode '{}'",
                    s
                ))
            })
    }
}

/// Read preference passed through to the driver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReadPreference {
    /// Read from primary only
    #[default]
    Primary,
    /// Primary, falling back to a secondary
    PrimaryPreferred,
    /// Secondary only
    Secondary,
    /// Secondary, falling back to the primary
    SecondaryPreferred,
    /// Lowest latency member
    Nearest,
}

impl ReadPreference {
    /// Connection string spelling of the preference.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::PrimaryPreferred => "primaryPreferred",
            Self::Secondary => "secondary",
            Self::SecondaryPreferred => "secondaryPreferred",
            Self::Nearest => "nearest",
        }
    }
}

impl std::fmt::Display for ReadPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReadPreference {
    type Err = crate::error::ConnectionModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Self::Primary,
            Self::PrimaryPreferred,
            Self::Secondary,
            Self::SecondaryPreferred,
            Self::Nearest,
        ]
        .into_iter()
        .find(|pref| pref.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| {
            crate::error::ConnectionModelError::configuration(format!(
                "Unknown read preference '{}'",
                s
            ))
        })
    }
}

/// Protocol-level auth mechanism tag understood by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthMechanism {
    /// SASL PLAIN, used for LDAP
    #[serde(rename = "PLAIN")]
    Plain,
    /// Client certificate authentication
    #[serde(rename = "MONGODB-X509")]
    MongoDbX509,
    /// Kerberos
    #[serde(rename = "GSSAPI")]
    Gssapi,
}

impl AuthMechanism {
    /// Value of the `authMechanism` connection string option.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "PLAIN",
            Self::MongoDbX509 => "MONGODB-X509",
            Self::Gssapi => "GSSAPI",
        }
    }
}

impl std::fmt::Display for AuthMechanism {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AuthMechanism {
    type Err = crate::error::ConnectionModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Plain, Self::MongoDbX509, Self::Gssapi]
            .into_iter()
            .find(|mechanism| mechanism.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                crate::error::ConnectionModelError::configuration(format!(
                    "Unsupported authMechanism '{}'",
                    s
                ))
            })
    }
}
