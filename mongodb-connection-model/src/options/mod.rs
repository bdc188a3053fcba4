//! Structured driver options derived from a validated model.
//!
//! Module structure:
//! - `loader`: reads TLS material from disk and assembles [`DriverOptions`]
//!
//! TLS fields sit under [`DriverOptions::server`], the shape the driver's
//! server-scoped options expect.

mod loader;

pub use loader::{CredentialReader, FsCredentialReader, OptionsLoader, load_options};

use crate::models::{AuthMechanism, ReadPreference};
use crate::security::mask;
use zeroize::Zeroizing;

/// Options handed to the driver alongside the driver URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverOptions {
    /// Seed list as `hostname:port`
    pub hosts: Vec<String>,
    /// Replica set name
    pub replica_set: Option<String>,
    /// Read preference
    pub read_preference: ReadPreference,
    /// Auth mechanism tag, unset for MONGODB and NONE
    pub auth_mechanism: Option<AuthMechanism>,
    /// Server-scoped TLS options
    pub server: ServerOptions,
}

/// Server-scoped TLS options.
///
/// With `ssl = NONE` everything is unset; `ssl_ca`, `ssl_cert`, `ssl_key`
/// and `ssl_pass` are only populated for `ssl = ALL`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ServerOptions {
    /// Whether TLS is used at all
    pub ssl: bool,
    /// Whether the server certificate is validated
    pub ssl_validate: Option<bool>,
    /// CA bundles, one buffer per file
    pub ssl_ca: Vec<Vec<u8>>,
    /// Client certificate
    pub ssl_cert: Option<Vec<u8>>,
    /// Client private key
    pub ssl_key: Option<Zeroizing<Vec<u8>>>,
    /// Private key passphrase
    pub ssl_pass: Option<Zeroizing<String>>,
}

impl std::fmt::Debug for ServerOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerOptions")
            .field("ssl", &self.ssl)
            .field("ssl_validate", &self.ssl_validate)
            .field(
                "ssl_ca",
                &self.ssl_ca.iter().map(Vec::len).collect::<Vec<_>>(),
            )
            .field("ssl_cert", &self.ssl_cert.as_ref().map(Vec::len))
            .field("ssl_key", &mask(self.ssl_key.as_ref()))
            .field("ssl_pass", &mask(self.ssl_pass.as_ref()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_options_default_is_plain_tcp() {
        let server = ServerOptions::default();
        assert!(!server.ssl);
        assert_eq!(server.ssl_validate, None);
        assert!(server.ssl_ca.is_empty());
        assert!(server.ssl_cert.is_none());
        assert!(server.ssl_key.is_none());
        assert!(server.ssl_pass.is_none());
    }

    #[test]
    fn test_server_options_debug_hides_key_material() {
        let server = ServerOptions {
            ssl: true,
            ssl_validate: Some(true),
            ssl_ca: vec![b"CA-BYTES".to_vec()],
            ssl_cert: Some(b"CERT-BYTES".to_vec()),
            ssl_key: Some(Zeroizing::new(b"KEY-BYTES".to_vec())),
            ssl_pass: Some(Zeroizing::new("hunter2".to_string())),
        };
        let debug = format!("{:?}", server);

        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("ssl_key: Some(\"****\")"));
        assert!(debug.contains("ssl_ca: [8]"));
        assert!(debug.contains("ssl_validate: Some(true)"));
    }
}
