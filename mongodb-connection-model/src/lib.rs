//! Validated MongoDB connection settings for driver clients.
//!
//! This crate turns a flat set of user-supplied connection fields into the
//! two things a MongoDB driver needs: a canonical `mongodb://` URL and a
//! structured options object carrying TLS material loaded from disk.
//!
//! # Guarantees
//! - Validation is synchronous, deterministic and reports the first broken rule
//! - Fields of an inactive authentication mechanism are rejected, never ignored
//! - Passwords, passphrases and private keys are zeroized and never shown in
//!   `Debug` output or error messages
//! - The filesystem is only read, and only for `ssl = ALL`
//!
//! # Example
//! ```rust
//! use mongodb_connection_model::{AuthMechanism, ConnectionFields, ConnectionModel};
//!
//! let model = ConnectionModel::new(ConnectionFields::x509(
//!     "CN=client,OU=arlo,O=MongoDB,L=Philadelphia,ST=Pennsylvania,C=US",
//! ));
//! assert_eq!(model.driver_auth_mechanism(), Some(AuthMechanism::MongoDbX509));
//! assert!(model.driver_url()?.ends_with("?slaveOk=true&authMechanism=MONGODB-X509"));
//! # Ok::<(), mongodb_connection_model::ConnectionModelError>(())
//! ```

pub mod connection;
pub mod error;
pub mod models;
pub mod options;
pub mod security;

// Re-export commonly used types
pub use connection::{
    AuthConfig, ConnectionFields, ConnectionModel, ResolvedConnection, TlsConfig,
    parse_driver_url,
};
pub use error::{ConnectionModelError, ErrorKind, Result, ValidationError, redact_driver_url};
pub use models::{AuthMechanism, AuthenticationKind, ReadPreference, SslMode};
pub use options::{
    CredentialReader, DriverOptions, FsCredentialReader, OptionsLoader, ServerOptions,
    load_options,
};
