//! Asynchronous assembly of [`DriverOptions`].
//!
//! Only `ssl = ALL` touches the filesystem: every CA bundle, the client
//! certificate and the private key are read concurrently and joined before
//! the options are returned. The first failed read ends the load; no partial
//! options are ever produced.

use super::{DriverOptions, ServerOptions};
use crate::connection::{ConnectionModel, TlsConfig};
use crate::error::{ConnectionModelError, Result};
use async_trait::async_trait;
use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Source of credential file contents.
///
/// # Object Safety
/// This trait is object-safe, allowing `Box<dyn CredentialReader>`.
#[async_trait]
pub trait CredentialReader: Send + Sync {
    /// Reads the whole file at `path`.
    ///
    /// # Errors
    /// Returns the underlying I/O error if the file cannot be read.
    async fn read(&self, path: &Path) -> std::io::Result<Vec<u8>>;
}

/// Reads credential files from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsCredentialReader;

#[async_trait]
impl CredentialReader for FsCredentialReader {
    async fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }
}

#[async_trait]
impl<R: CredentialReader + ?Sized> CredentialReader for Box<R> {
    async fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        (**self).read(path).await
    }
}

/// Builds [`DriverOptions`] for validated models.
///
/// The loader holds no state besides its reader, so concurrent loads of
/// different models never interfere.
///
/// # Example
/// ```rust,no_run
/// use mongodb_connection_model::{ConnectionFields, ConnectionModel, OptionsLoader};
///
/// # async fn example() -> mongodb_connection_model::Result<()> {
/// let model = ConnectionModel::new(
///     ConnectionFields::new().with_client_tls(["/etc/ssl/ca.pem"], "/etc/ssl/client.pem", "/etc/ssl/client.key"),
/// );
/// let options = OptionsLoader::new().load(&model).await?;
/// assert_eq!(options.server.ssl_validate, Some(true));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct OptionsLoader<R = FsCredentialReader> {
    reader: R,
}

impl OptionsLoader {
    /// Creates a loader that reads from the filesystem.
    pub const fn new() -> Self {
        Self {
            reader: FsCredentialReader,
        }
    }
}

impl<R: CredentialReader> OptionsLoader<R> {
    /// Creates a loader that reads credential files through `reader`.
    pub const fn with_reader(reader: R) -> Self {
        Self { reader }
    }

    /// Assembles driver options for `model`.
    ///
    /// # Errors
    /// Returns the model's validation error if it is invalid, or an I/O
    /// error naming the field whose file could not be read.
    pub async fn load(&self, model: &ConnectionModel) -> Result<DriverOptions> {
        let resolved = model.resolved()?;
        let fields = model.fields();

        let server = match resolved.tls() {
            TlsConfig::None => ServerOptions::default(),
            TlsConfig::Unvalidated => ServerOptions {
                ssl: true,
                ssl_validate: Some(false),
                ..ServerOptions::default()
            },
            TlsConfig::Server => ServerOptions {
                ssl: true,
                ssl_validate: Some(true),
                ..ServerOptions::default()
            },
            TlsConfig::All {
                ca,
                certificate,
                private_key,
                passphrase,
            } => {
                self.load_client_tls(ca, certificate, private_key, passphrase.as_ref())
                    .await?
            }
        };

        Ok(DriverOptions {
            hosts: vec![model.instance_id()],
            replica_set: fields
                .replica_set_name
                .clone()
                .filter(|name| !name.is_empty()),
            read_preference: fields.read_preference,
            auth_mechanism: model.driver_auth_mechanism(),
            server,
        })
    }

    async fn load_client_tls(
        &self,
        ca: &[PathBuf],
        certificate: &Path,
        private_key: &Path,
        passphrase: Option<&Zeroizing<String>>,
    ) -> Result<ServerOptions> {
        tracing::debug!(
            files = ca.len().saturating_add(2),
            "Loading client TLS material"
        );

        let ca_reads = try_join_all(ca.iter().map(|path| self.read_field("ssl_ca", path)));
        let (ssl_ca, ssl_cert, ssl_key) = tokio::try_join!(
            ca_reads,
            self.read_field("ssl_certificate", certificate),
            self.read_field("ssl_private_key", private_key),
        )?;

        Ok(ServerOptions {
            ssl: true,
            ssl_validate: Some(true),
            ssl_ca,
            ssl_cert: Some(ssl_cert),
            ssl_key: Some(Zeroizing::new(ssl_key)),
            ssl_pass: passphrase.cloned(),
        })
    }

    async fn read_field(&self, field: &'static str, path: &Path) -> Result<Vec<u8>> {
        let bytes = self
            .reader
            .read(path)
            .await
            .map_err(|e| ConnectionModelError::credential_file(field, path, e))?;
        tracing::trace!(field, bytes = bytes.len(), "Read credential file");
        Ok(bytes)
    }
}

/// Assembles driver options for `model`, reading TLS files from disk.
///
/// # Errors
/// See [`OptionsLoader::load`].
pub async fn load_options(model: &ConnectionModel) -> Result<DriverOptions> {
    OptionsLoader::new().load(model).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::{AuthMechanism, ReadPreference, SslMode};
    use crate::ConnectionFields;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory reader that records every path it is asked for.
    #[derive(Default)]
    struct MemoryReader {
        files: HashMap<PathBuf, Vec<u8>>,
        reads: Mutex<Vec<PathBuf>>,
    }

    impl MemoryReader {
        fn with_file(mut self, path: &str, contents: &[u8]) -> Self {
            self.files.insert(PathBuf::from(path), contents.to_vec());
            self
        }

        fn reads(&self) -> Vec<PathBuf> {
            self.reads.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CredentialReader for MemoryReader {
        async fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
            self.reads.lock().unwrap().push(path.to_path_buf());
            self.files.get(path).cloned().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file")
            })
        }
    }

    fn tls_reader() -> MemoryReader {
        MemoryReader::default()
            .with_file("/tls/ca-1.pem", b"ca one")
            .with_file("/tls/ca-2.pem", b"ca two")
            .with_file("/tls/client.pem", b"certificate")
            .with_file("/tls/client.key", b"private key")
    }

    #[tokio::test]
    async fn test_load_ssl_none_reads_nothing() {
        let loader = OptionsLoader::with_reader(tls_reader());
        let model = ConnectionModel::default();

        let options = loader.load(&model).await.unwrap();

        assert_eq!(options.server, ServerOptions::default());
        assert_eq!(options.hosts, vec!["localhost:27017".to_string()]);
        assert_eq!(options.auth_mechanism, None);
        assert!(loader.reader.reads().is_empty());
    }

    #[tokio::test]
    async fn test_load_ssl_unvalidated() {
        let loader = OptionsLoader::with_reader(tls_reader());
        let model = ConnectionModel::new(ConnectionFields::new().with_ssl(SslMode::Unvalidated));

        let options = loader.load(&model).await.unwrap();

        assert!(options.server.ssl);
        assert_eq!(options.server.ssl_validate, Some(false));
        assert!(options.server.ssl_ca.is_empty());
        assert!(loader.reader.reads().is_empty());
    }

    #[tokio::test]
    async fn test_load_ssl_server() {
        let loader = OptionsLoader::with_reader(tls_reader());
        let model = ConnectionModel::new(ConnectionFields::new().with_ssl(SslMode::Server));

        let options = loader.load(&model).await.unwrap();

        assert!(options.server.ssl);
        assert_eq!(options.server.ssl_validate, Some(true));
        assert!(options.server.ssl_cert.is_none());
        assert!(options.server.ssl_key.is_none());
        assert!(loader.reader.reads().is_empty());
    }

    #[tokio::test]
    async fn test_load_ssl_all_reads_every_file() {
        let loader = OptionsLoader::with_reader(tls_reader());
        let model = ConnectionModel::new(ConnectionFields::new().with_client_tls(
            ["/tls/ca-1.pem", "/tls/ca-2.pem"],
            "/tls/client.pem",
            "/tls/client.key",
        ));

        let options = loader.load(&model).await.unwrap();
        let server = &options.server;

        assert!(server.ssl);
        assert_eq!(server.ssl_validate, Some(true));
        assert_eq!(server.ssl_ca, vec![b"ca one".to_vec(), b"ca two".to_vec()]);
        assert_eq!(server.ssl_cert.as_deref(), Some(&b"certificate"[..]));
        assert_eq!(
            server.ssl_key.as_ref().map(|key| key.as_slice()),
            Some(&b"private key"[..])
        );
        assert!(server.ssl_pass.is_none());
        assert_eq!(loader.reader.reads().len(), 4);
    }

    #[tokio::test]
    async fn test_load_ssl_all_with_passphrase() {
        let loader = OptionsLoader::with_reader(tls_reader());
        let model = ConnectionModel::new(
            ConnectionFields::new()
                .with_client_tls(["/tls/ca-1.pem"], "/tls/client.pem", "/tls/client.key")
                .with_ssl_private_key_password("hunter2"),
        );

        let options = loader.load(&model).await.unwrap();

        assert_eq!(
            options.server.ssl_pass.as_deref().map(String::as_str),
            Some("hunter2")
        );
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let loader = OptionsLoader::with_reader(tls_reader());
        let model = ConnectionModel::new(ConnectionFields::new().with_client_tls(
            ["/tls/ca-1.pem"],
            "/tls/client.pem",
            "/tls/missing.key",
        ));

        let err = loader.load(&model).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("ssl_private_key"));
        assert!(err.to_string().contains("/tls/missing.key"));
    }

    #[tokio::test]
    async fn test_load_invalid_model_returns_validation_error() {
        let loader = OptionsLoader::with_reader(tls_reader());
        let model = ConnectionModel::new(ConnectionFields {
            ssl: SslMode::All,
            ..ConnectionFields::default()
        });

        let err = loader.load(&model).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.as_validation(), model.validation_error());
        assert!(loader.reader.reads().is_empty());
    }

    #[tokio::test]
    async fn test_load_passes_topology_through() {
        let loader = OptionsLoader::with_reader(tls_reader());
        let model = ConnectionModel::new(
            ConnectionFields::ldap("arlo", "w@of")
                .with_hostname("db.example.com")
                .with_port(27018)
                .with_replica_set_name("rs0")
                .with_read_preference(ReadPreference::Nearest),
        );

        let options = loader.load(&model).await.unwrap();

        assert_eq!(options.hosts, vec!["db.example.com:27018".to_string()]);
        assert_eq!(options.replica_set.as_deref(), Some("rs0"));
        assert_eq!(options.read_preference, ReadPreference::Nearest);
        assert_eq!(options.auth_mechanism, Some(AuthMechanism::Plain));
    }

    #[tokio::test]
    async fn test_boxed_reader() {
        let reader: Box<dyn CredentialReader> = Box::new(tls_reader());
        let loader = OptionsLoader::with_reader(reader);
        let model = ConnectionModel::new(ConnectionFields::new().with_client_tls(
            ["/tls/ca-1.pem"],
            "/tls/client.pem",
            "/tls/client.key",
        ));

        let options = loader.load(&model).await.unwrap();
        assert_eq!(options.server.ssl_ca.len(), 1);
    }
}
