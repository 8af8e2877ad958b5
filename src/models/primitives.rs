//! Primitive types and newtypes for type-safe API interactions.
//!
//! Paddle identifies most things with bare integers. The wrappers here keep
//! a vendor ID from being passed where a product ID is expected.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::enums::Currency;
use crate::{Error, Result};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw numeric identifier.
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Get the raw numeric identifier.
            pub const fn get(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

numeric_id!(
    /// A Paddle seller account ID (Developer Tools > Authentication).
    ///
    /// # Example
    ///
    /// ```
    /// use paddle_rs::VendorId;
    ///
    /// let vendor = VendorId::new(100000);
    /// assert_eq!(vendor.to_string(), "100000");
    /// ```
    VendorId
);

numeric_id!(
    /// A product or subscription plan ID.
    ///
    /// Paddle uses the same ID space for one-time products and plans.
    ProductId
);

numeric_id!(
    /// A user subscription ID.
    SubscriptionId
);

numeric_id!(
    /// A subscription price modifier ID.
    ModifierId
);

numeric_id!(
    /// An upcoming or past subscription payment ID.
    PaymentId
);

/// An order ID.
///
/// One-time orders are plain integers, subscription orders are hyphenated
/// (`123456-7890`), so the ID is kept as text. Both JSON forms are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Create a new order ID.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the order ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for OrderId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => Ok(Self(s)),
            serde_json::Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(serde::de::Error::custom(format!("invalid order id: {other}"))),
        }
    }
}

/// Environment configuration for the Paddle API.
///
/// Determines which base URLs are used for the two API families.
///
/// # Example
///
/// ```
/// use paddle_rs::Environment;
///
/// let env = Environment::Sandbox;
/// assert_eq!(env.vendor_base_url(), "https://sandbox-vendors.paddle.com/api");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Environment {
    /// Live payments.
    #[default]
    Production,
    /// Paddle's sandbox for integration testing.
    Sandbox,
}

impl Environment {
    /// Base URL for the Checkout API family (GET endpoints).
    pub fn checkout_base_url(&self) -> &'static str {
        match self {
            Environment::Production => "https://checkout.paddle.com/api",
            Environment::Sandbox => "https://sandbox-vendors.paddle.com/api",
        }
    }

    /// Base URL for the Product, Subscription and Alert APIs (POST endpoints).
    pub fn vendor_base_url(&self) -> &'static str {
        match self {
            Environment::Production => "https://vendors.paddle.com/api",
            Environment::Sandbox => "https://sandbox-vendors.paddle.com/api",
        }
    }

    /// Returns `true` if this is the sandbox environment.
    pub fn is_sandbox(&self) -> bool {
        matches!(self, Environment::Sandbox)
    }

    /// Pick an environment from a sandbox flag.
    pub fn from_sandbox_flag(sandbox: bool) -> Self {
        if sandbox {
            Environment::Sandbox
        } else {
            Environment::Production
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Sandbox => write!(f, "sandbox"),
        }
    }
}

/// Resolved base URLs for both API families.
///
/// Normally derived from an [`Environment`]; [`Endpoints::custom`] points the
/// client somewhere else, such as a local mock server or a proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    checkout: String,
    vendor: String,
}

impl Endpoints {
    /// The stock base URLs for an environment.
    pub fn for_environment(env: Environment) -> Self {
        Self {
            checkout: env.checkout_base_url().to_string(),
            vendor: env.vendor_base_url().to_string(),
        }
    }

    /// Custom base URLs. Both must be absolute URLs; a trailing slash is
    /// dropped so that paths can be appended verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UrlParse`] if either URL is invalid.
    pub fn custom(checkout: &str, vendor: &str) -> Result<Self> {
        url::Url::parse(checkout)?;
        url::Url::parse(vendor)?;
        Ok(Self {
            checkout: checkout.trim_end_matches('/').to_string(),
            vendor: vendor.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL for the Checkout API family.
    pub fn checkout(&self) -> &str {
        &self.checkout
    }

    /// Base URL for the vendor API family.
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// The base URL serving requests of the given method.
    pub fn base_for(&self, method: HttpMethod) -> &str {
        match method {
            HttpMethod::Get => &self.checkout,
            HttpMethod::Post => &self.vendor,
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

/// The two HTTP methods Paddle's classic API uses.
///
/// Parsing is case-insensitive:
///
/// ```
/// use paddle_rs::HttpMethod;
///
/// assert_eq!("post".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
/// assert_eq!("Get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
/// assert!("DELETE".parse::<HttpMethod>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Query-string request against the checkout base URL.
    Get,
    /// Form-encoded request against the vendor base URL.
    Post,
}

impl HttpMethod {
    /// Whether this method requires vendor credentials.
    pub fn requires_credentials(&self) -> bool {
        matches!(self, HttpMethod::Post)
    }

    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("get") {
            Ok(HttpMethod::Get)
        } else if s.eq_ignore_ascii_case("post") {
            Ok(HttpMethod::Post)
        } else {
            Err(Error::InvalidInput(format!("Unsupported HTTP method: {s}")))
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// A price in a specific currency, sent to Paddle as `CUR:amount`.
///
/// # Example
///
/// ```
/// use paddle_rs::models::{Currency, Price};
/// use rust_decimal::Decimal;
///
/// let price = Price::new(Currency::Usd, Decimal::new(1999, 2));
/// assert_eq!(price.to_string(), "USD:19.99");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price {
    /// Currency of the amount
    pub currency: Currency,
    /// Amount in major units
    pub amount: Decimal,
}

impl Price {
    /// Create a new price.
    pub fn new(currency: Currency, amount: Decimal) -> Self {
        Self { currency, amount }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.currency, self.amount)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
