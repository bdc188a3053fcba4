//! Driver URL construction and parsing.
//!
//! URLs have the shape
//! `mongodb://[credentials@]hostname:port/[kerberos]?slaveOk=true[&mechanism options]`.
//! Values are percent-encoded with `urlencoding`. The X509 DN and the
//! KERBEROS principal are encoded twice: the driver decodes them once while
//! splitting the authority and once more when building the credential.

use super::fields::{ConnectionFields, DEFAULT_HOSTNAME, DEFAULT_PORT};
use super::model::{AuthConfig, ConnectionModel, ResolvedConnection};
use crate::error::{ConnectionModelError, Result, redact_driver_url};
use crate::models::{AuthMechanism, AuthenticationKind};
use std::borrow::Cow;
use url::Url;

/// Scheme every driver URL starts with.
pub const SCHEME: &str = "mongodb";
/// Path segment the KERBEROS mechanism requires.
pub const KERBEROS_PATH: &str = "/kerberos";

/// Percent-encodes everything except `A-Z a-z 0-9 - . _ ~`.
///
/// Unlike JavaScript's `encodeURIComponent` this also encodes `!'()*`, so a
/// value such as `o'neil` is spelled differently (`o%27neil`). Both forms
/// decode to the same value.
fn encode(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

fn double_encode(value: &str) -> String {
    urlencoding::encode(&urlencoding::encode(value)).into_owned()
}

fn decode(field: &str, value: &str) -> Result<String> {
    urlencoding::decode(value)
        .map(Cow::into_owned)
        .map_err(|_| {
            ConnectionModelError::configuration(format!(
                "{} is not valid percent-encoded UTF-8",
                field
            ))
        })
}

fn double_decode(field: &str, value: &str) -> Result<String> {
    decode(field, &decode(field, value)?)
}

/// Builds the driver URL for a validated model.
pub(crate) fn build_driver_url(fields: &ConnectionFields, resolved: &ResolvedConnection) -> String {
    let mut url = format!("{}://", SCHEME);

    match resolved.auth() {
        AuthConfig::None => {}
        AuthConfig::MongoDb { credentials, .. } | AuthConfig::Ldap { credentials } => {
            url.push_str(&format!(
                "{}:{}@",
                encode(credentials.username()),
                encode(credentials.password().unwrap_or_default())
            ));
        }
        AuthConfig::X509 { username } => {
            url.push_str(&format!("{}@", double_encode(username)));
        }
        AuthConfig::Kerberos { credentials, .. } => {
            url.push_str(&format!(
                "{}:{}@",
                double_encode(credentials.username()),
                credentials.password().map(encode).unwrap_or_default()
            ));
        }
    }

    url.push_str(&format!("{}:{}", fields.hostname, fields.port));

    if matches!(resolved.auth(), AuthConfig::Kerberos { .. }) {
        url.push_str(KERBEROS_PATH);
    } else {
        url.push('/');
    }

    url.push_str("?slaveOk=true");

    match resolved.auth() {
        AuthConfig::None => {}
        AuthConfig::MongoDb { database_name, .. } => {
            url.push_str(&format!("&authSource={}", encode(database_name)));
        }
        AuthConfig::Ldap { .. } => {
            url.push_str(&format!("&authMechanism={}", AuthMechanism::Plain));
        }
        AuthConfig::X509 { .. } => {
            url.push_str(&format!("&authMechanism={}", AuthMechanism::MongoDbX509));
        }
        AuthConfig::Kerberos { service_name, .. } => {
            url.push_str(&format!(
                "&gssapiServiceName={}&authMechanism={}",
                encode(service_name),
                AuthMechanism::Gssapi
            ));
        }
    }

    url
}

/// Query options understood when reading a driver URL back.
#[derive(Default)]
struct UrlOptions {
    auth_mechanism: Option<String>,
    auth_source: Option<String>,
    gssapi_service_name: Option<String>,
    replica_set: Option<String>,
    read_preference: Option<String>,
}

impl UrlOptions {
    fn from_url(url: &Url) -> Self {
        let mut options = Self::default();
        for (key, value) in url.query_pairs() {
            let value = Some(value.into_owned()).filter(|v| !v.is_empty());
            match key.as_ref() {
                "authMechanism" => options.auth_mechanism = value,
                "authSource" => options.auth_source = value,
                "gssapiServiceName" => options.gssapi_service_name = value,
                "replicaSet" => options.replica_set = value,
                "readPreference" => options.read_preference = value,
                _ => {} // slaveOk and driver tuning options carry no model state
            }
        }
        options
    }
}

/// Reconstructs connection fields from a driver URL.
///
/// # Errors
/// Returns a configuration error if the URL cannot be parsed, does not use
/// the `mongodb` scheme, names an unsupported mechanism, or holds
/// credentials that are not valid percent-encoded UTF-8.
pub fn parse_driver_url(connection_string: &str) -> Result<ConnectionFields> {
    let url = Url::parse(connection_string).map_err(|e| {
        ConnectionModelError::configuration(format!(
            "Invalid MongoDB connection string format: {}",
            e
        ))
    })?;

    if url.scheme() != SCHEME {
        return Err(ConnectionModelError::configuration(format!(
            "Unsupported scheme '{}': expected {}",
            url.scheme(),
            SCHEME
        )));
    }

    let options = UrlOptions::from_url(&url);

    let mut fields = ConnectionFields {
        hostname: url
            .host_str()
            .filter(|h| !h.is_empty())
            .unwrap_or(DEFAULT_HOSTNAME)
            .to_string(),
        port: url.port().unwrap_or(DEFAULT_PORT),
        replica_set_name: options.replica_set,
        ..ConnectionFields::default()
    };

    if let Some(read_preference) = options.read_preference.as_deref() {
        fields.read_preference = read_preference.parse()?;
    }

    let username = Some(url.username()).filter(|u| !u.is_empty());
    let password = url.password().filter(|p| !p.is_empty());
    let mechanism = options
        .auth_mechanism
        .as_deref()
        .map(str::parse::<AuthMechanism>)
        .transpose()?;

    match (mechanism, username) {
        (Some(AuthMechanism::Plain), _) => {
            fields.authentication = AuthenticationKind::Ldap;
            fields.ldap_username = username.map(|u| decode("ldap_username", u)).transpose()?;
            fields.ldap_password = password.map(|p| decode("ldap_password", p)).transpose()?;
        }
        (Some(AuthMechanism::MongoDbX509), _) => {
            fields.authentication = AuthenticationKind::X509;
            fields.x509_username = username
                .map(|u| double_decode("x509_username", u))
                .transpose()?;
        }
        (Some(AuthMechanism::Gssapi), _) => {
            fields.authentication = AuthenticationKind::Kerberos;
            fields.kerberos_principal = username
                .map(|u| double_decode("kerberos_principal", u))
                .transpose()?;
            fields.kerberos_password = password
                .map(|p| decode("kerberos_password", p))
                .transpose()?;
            fields.kerberos_service_name = options.gssapi_service_name;
        }
        (None, Some(username)) => {
            fields.authentication = AuthenticationKind::MongoDb;
            fields.mongodb_username = Some(decode("mongodb_username", username)?);
            fields.mongodb_password = password
                .map(|p| decode("mongodb_password", p))
                .transpose()?;
            fields.mongodb_database_name = options.auth_source;
        }
        (None, None) => {}
    }

    tracing::debug!(
        url = %redact_driver_url(connection_string),
        authentication = %fields.authentication,
        "Parsed driver URL"
    );

    Ok(fields)
}

impl ConnectionModel {
    /// Builds a model from a driver URL, decoding credentials the way
    /// [`ConnectionModel::driver_url`] encoded them.
    ///
    /// # Errors
    /// Returns a configuration error if the URL cannot be understood.
    /// Validation problems are reported by the returned model.
    ///
    /// # Example
    /// ```rust
    /// use mongodb_connection_model::{AuthenticationKind, ConnectionModel};
    ///
    /// let model = ConnectionModel::from_url(
    ///     "mongodb://lucas%2540kerb.mongodb.parts:@localhost:27017/kerberos\
    ///      ?slaveOk=true&gssapiServiceName=mongodb&authMechanism=GSSAPI",
    /// )?;
    /// assert_eq!(model.authentication(), AuthenticationKind::Kerberos);
    /// assert_eq!(
    ///     model.fields().kerberos_principal.as_deref(),
    ///     Some("lucas@kerb.mongodb.parts")
    /// );
    /// # Ok::<(), mongodb_connection_model::ConnectionModelError>(())
    /// ```
    pub fn from_url(connection_string: &str) -> Result<Self> {
        parse_driver_url(connection_string).map(Self::new)
    }
}
