//! Secure credential container with automatic memory zeroing.
//!
//! # Security
//! - Credentials are stored in `Zeroizing<T>` containers
//! - Memory is cleared when credentials go out of scope
//! - Secrets are never exposed in debug output

use zeroize::{Zeroize, Zeroizing};

/// Identity and optional secret for one authentication mechanism.
///
/// The identity is a username, a DN or a Kerberos principal depending on the
/// mechanism it was validated for.
///
/// # Example
///
/// ```rust
/// use mongodb_connection_model::security::Credentials;
///
/// let creds = Credentials::new("arlo".to_string(), Some("woof".to_string()));
/// assert_eq!(creds.username(), "arlo");
/// assert_eq!(creds.password(), Some("woof"));
/// ```
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct Credentials {
    username: Zeroizing<String>,
    password: Zeroizing<Option<String>>,
}

impl Credentials {
    /// Creates new credentials with automatic memory zeroing.
    pub fn new(username: String, password: Option<String>) -> Self {
        Self {
            username: Zeroizing::new(username),
            password: Zeroizing::new(password),
        }
    }

    /// Gets the username, DN or principal.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Gets the password, if one was supplied.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Checks if password is present without exposing it.
    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username())
            .field("password", &super::mask(self.password()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_new() {
        let creds = Credentials::new("arlo".to_string(), Some("woof".to_string()));
        assert_eq!(creds.username(), "arlo");
        assert_eq!(creds.password(), Some("woof"));
        assert!(creds.has_password());
    }

    #[test]
    fn test_credentials_no_password() {
        let creds = Credentials::new("lucas@kerb.mongodb.parts".to_string(), None);
        assert_eq!(creds.username(), "lucas@kerb.mongodb.parts");
        assert_eq!(creds.password(), None);
        assert!(!creds.has_password());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("arlo".to_string(), Some("w@@f".to_string()));
        let debug = format!("{:?}", creds);

        assert!(debug.contains("arlo"));
        assert!(debug.contains("****"));
        assert!(!debug.contains("w@@f"));
    }

    #[test]
    fn test_credentials_clone() {
        let creds1 = Credentials::new("user".to_string(), Some("pass".to_string()));
        let creds2 = creds1.clone();
        assert_eq!(creds1.username(), creds2.username());
        assert_eq!(creds1.password(), creds2.password());
    }
}
