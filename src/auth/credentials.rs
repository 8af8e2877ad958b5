//! Vendor credentials for the Paddle API.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

use crate::models::VendorId;
use crate::{Error, Result};

/// Vendor ID and auth code pair.
///
/// Either half may be missing. Only a complete pair authenticates the
/// client; a zero vendor ID or an empty auth code counts as missing.
///
/// The auth code is a private API key. It is kept in a [`SecretString`] and
/// never shows up in `Debug` output or logs.
///
/// # Example
///
/// ```
/// use paddle_rs::Credentials;
///
/// let creds = Credentials::new(100000, "vendor_auth_code");
/// assert!(creds.is_authenticated());
///
/// let partial = Credentials::from_parts(Some(100000), None);
/// assert!(!partial.is_authenticated());
/// ```
#[derive(Default)]
pub struct Credentials {
    vendor_id: Option<VendorId>,
    vendor_auth_code: Option<SecretString>,
}

impl Credentials {
    /// A complete credential pair.
    pub fn new(vendor_id: u64, vendor_auth_code: impl Into<String>) -> Self {
        Self::from_parts(Some(vendor_id), Some(vendor_auth_code.into()))
    }

    /// No credentials. Such a client can only call checkout endpoints.
    pub fn none() -> Self {
        Self::default()
    }

    /// Credentials from optional halves, dropping empty values.
    pub fn from_parts(vendor_id: Option<u64>, vendor_auth_code: Option<String>) -> Self {
        Self {
            vendor_id: vendor_id.filter(|id| *id != 0).map(VendorId::new),
            vendor_auth_code: vendor_auth_code
                .filter(|code| !code.is_empty())
                .map(SecretString::from),
        }
    }

    /// Read `PADDLE_VENDOR_ID` and `PADDLE_VENDOR_AUTH_CODE`.
    ///
    /// Missing variables leave the corresponding half empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `PADDLE_VENDOR_ID` is set but is not an
    /// unsigned integer.
    pub fn from_env() -> Result<Self> {
        let vendor_id = match std::env::var("PADDLE_VENDOR_ID") {
            Ok(raw) if !raw.trim().is_empty() => Some(raw.trim().parse::<u64>().map_err(|_| {
                Error::Config(format!("PADDLE_VENDOR_ID must be an integer, got {raw:?}"))
            })?),
            _ => None,
        };
        let vendor_auth_code = std::env::var("PADDLE_VENDOR_AUTH_CODE").ok();

        Ok(Self::from_parts(vendor_id, vendor_auth_code))
    }

    /// `true` iff both the vendor ID and the auth code are set.
    pub fn is_authenticated(&self) -> bool {
        self.vendor_id.is_some() && self.vendor_auth_code.is_some()
    }

    /// The vendor ID, if set.
    pub fn vendor_id(&self) -> Option<VendorId> {
        self.vendor_id
    }

    /// The complete pair with the auth code exposed, for request signing.
    pub(crate) fn pair(&self) -> Option<(VendorId, &str)> {
        match (&self.vendor_id, &self.vendor_auth_code) {
            (Some(id), Some(code)) => Some((*id, code.expose_secret())),
            _ => None,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("vendor_id", &self.vendor_id)
            .field(
                "vendor_auth_code",
                &self.vendor_auth_code.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}
