//! Connection settings, validation and driver URL derivation.
//!
//! # Module Structure
//! - `fields`: raw, user-supplied settings (`ConnectionFields`)
//! - `model`: validation into per-mechanism and per-TLS-mode variants
//! - `url`: driver URL construction and parsing

mod fields;
mod model;
mod url;

pub use fields::{ConnectionFields, DEFAULT_HOSTNAME, DEFAULT_PORT};
pub use model::{
    AuthConfig, ConnectionModel, DEFAULT_AUTH_SOURCE, DEFAULT_KERBEROS_SERVICE_NAME,
    ResolvedConnection, TlsConfig,
};
pub use self::url::{KERBEROS_PATH, SCHEME, parse_driver_url};
