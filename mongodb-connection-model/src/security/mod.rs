//! Secret handling for validated credentials and loaded TLS material.
//!
//! # Security Guarantees
//! - Passwords, passphrases and private keys live in `Zeroizing` containers
//! - `Debug` output masks every secret as `****`
//! - Driver URLs are redacted with [`crate::error::redact_driver_url`] before display

mod credentials;

pub use credentials::Credentials;

/// Placeholder written wherever a secret would otherwise be shown.
pub const REDACTED: &str = "****";

/// Formats an optional secret for debug output without exposing it.
pub(crate) fn mask<T: ?Sized>(secret: Option<&T>) -> Option<&'static str> {
    secret.map(|_| REDACTED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_zeroization() {
        let creds = Credentials::new("user".to_string(), Some("password".to_string()));
        assert_eq!(creds.username(), "user");
        assert!(creds.has_password());
        // Credentials will be automatically zeroized on drop
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask(Some(&"secret")), Some(REDACTED));
        assert_eq!(mask::<String>(None), None);
    }
}
