//! HTTP client implementation for the Paddle API.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{instrument, Span};

use crate::api::{AlertService, CheckoutService, ProductService, SubscriptionService};
use crate::auth::Credentials;
use crate::models::{Environment, HttpMethod};
use crate::{Error, Result};

use super::config::ClientConfig;
use super::params::RequestParams;

/// The main client for interacting with the Paddle API.
///
/// The client hands out one service per API family. Cloning is cheap and
/// all clones share the same connection handle. Configuration and
/// credentials never change after construction; switching environment or
/// credentials produces a new client.
///
/// # Example
///
/// ```no_run
/// use paddle_rs::{ClientConfig, Credentials, PaddleClient};
///
/// # async fn example() -> paddle_rs::Result<()> {
/// let client = PaddleClient::new(
///     Credentials::new(100000, "vendor_auth_code"),
///     ClientConfig::default().with_sandbox(true),
/// )?;
///
/// let products = client.product().list_products().await?;
/// println!("{} products", products.total);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PaddleClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) credentials: Arc<Credentials>,
    pub(crate) config: ClientConfig,
}

impl PaddleClient {
    /// Create a client with the given credentials and configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the HTTP client cannot be constructed.
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                credentials: Arc::new(credentials),
                config,
            }),
        })
    }

    /// Create a client without credentials. Only checkout (GET) endpoints
    /// will succeed.
    pub fn unauthenticated(config: ClientConfig) -> Result<Self> {
        Self::new(Credentials::none(), config)
    }

    /// Create a sandbox client with default settings.
    pub fn sandbox(vendor_id: u64, vendor_auth_code: impl Into<String>) -> Result<Self> {
        Self::new(
            Credentials::new(vendor_id, vendor_auth_code),
            ClientConfig::default().with_environment(Environment::Sandbox),
        )
    }

    /// Create a client from `PADDLE_VENDOR_ID`, `PADDLE_VENDOR_AUTH_CODE`,
    /// `PADDLE_SANDBOX` and `PADDLE_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::new(Credentials::from_env()?, ClientConfig::from_env()?)
    }

    /// A client for another environment, sharing credentials and the
    /// connection handle with this one.
    pub fn with_environment(&self, environment: Environment) -> Self {
        self.derive(
            self.inner.credentials.clone(),
            self.inner.config.clone().with_environment(environment),
        )
    }

    /// A client using different credentials in the same environment.
    pub fn with_credentials(&self, credentials: Credentials) -> Self {
        self.derive(Arc::new(credentials), self.inner.config.clone())
    }

    fn derive(&self, credentials: Arc<Credentials>, config: ClientConfig) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                http: self.inner.http.clone(),
                credentials,
                config,
            }),
        }
    }

    /// `true` iff both a vendor ID and an auth code are configured.
    pub fn is_authenticated(&self) -> bool {
        self.inner.credentials.is_authenticated()
    }

    /// The configured environment.
    pub fn environment(&self) -> Environment {
        self.inner.config.environment()
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Get the Checkout API service.
    pub fn checkout(&self) -> CheckoutService {
        CheckoutService::new(self.inner.clone())
    }

    /// Get the Product API service.
    pub fn product(&self) -> ProductService {
        ProductService::new(self.inner.clone())
    }

    /// Get the Subscription API service.
    pub fn subscription(&self) -> SubscriptionService {
        SubscriptionService::new(self.inner.clone())
    }

    /// Get the Alert API service.
    pub fn alert(&self) -> AlertService {
        AlertService::new(self.inner.clone())
    }

    /// Call any endpoint directly.
    ///
    /// GET requests go to the checkout base URL with `params` in the query
    /// string; POST requests go to the vendor base URL with `params` as a
    /// form body. Use `serde_json::Value` as `T` to get the raw payload.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use paddle_rs::HttpMethod;
    ///
    /// # async fn example(client: paddle_rs::PaddleClient) -> paddle_rs::Result<()> {
    /// let plans: serde_json::Value = client
    ///     .execute(HttpMethod::Post, "/2.0/subscription/plans", &serde_json::json!({ "plan": 9 }))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn execute<T, P>(&self, method: HttpMethod, path: &str, params: &P) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.inner.execute(method, path, params).await
    }
}

impl ClientInner {
    /// Make a GET request against the checkout API family.
    pub(crate) async fn get<T, P>(&self, path: &str, params: &P) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.execute(HttpMethod::Get, path, params).await
    }

    /// Make a POST request against the vendor API family.
    pub(crate) async fn post<T, P>(&self, path: &str, params: &P) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.execute(HttpMethod::Post, path, params).await
    }

    /// Build the full URL for a request.
    pub(crate) fn url_for(&self, method: HttpMethod, path: &str) -> Result<url::Url> {
        let base = self.config.endpoints().base_for(method);
        let url = if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        };
        Ok(url::Url::parse(&url)?)
    }

    /// Add `vendor_id` and `vendor_auth_code` unless the caller set them.
    pub(crate) fn sign(&self, params: &mut RequestParams) {
        if let Some((vendor_id, auth_code)) = self.credentials.pair() {
            let added_id = params.insert_if_absent("vendor_id", vendor_id.get());
            let added_code = params.insert_if_absent("vendor_auth_code", auth_code);
            tracing::debug!(added_id, added_code, "injected vendor credentials");
        }
    }

    /// Send one request and decode the response envelope.
    #[instrument(
        name = "paddle_request",
        skip_all,
        fields(
            http.method = %method,
            http.path = %path,
            http.status_code = tracing::field::Empty,
        )
    )]
    pub(crate) async fn execute<T, P>(&self, method: HttpMethod, path: &str, params: &P) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        if method.requires_credentials() && !self.credentials.is_authenticated() {
            return Err(Error::AuthenticationRequired);
        }

        let mut params = RequestParams::from_serialize(params)?;
        self.sign(&mut params);

        let url = self.url_for(method, path)?;
        let pairs = params.to_pairs();

        let request = self.http.request(method.to_reqwest(), url);
        let request = match method {
            HttpMethod::Get => request.query(&pairs),
            HttpMethod::Post => request.form(&pairs),
        };

        let response = request.send().await.map_err(Error::Transport)?;

        let status = response.status().as_u16();
        Span::current().record("http.status_code", status);
        check_status(status)?;

        let body = response.text().await.map_err(Error::Transport)?;
        let payload = unwrap_envelope(&body)?;

        Ok(serde_json::from_value(payload)?)
    }
}

/// Anything but exactly 200 is a failure, including other 2xx codes.
fn check_status(status: u16) -> Result<()> {
    if status == 200 {
        Ok(())
    } else {
        tracing::warn!(status, "unexpected HTTP status from Paddle");
        Err(Error::Http { status })
    }
}

/// Interpret a 200 response body.
///
/// Returns `response` from the envelope when present, otherwise the whole
/// body.
pub(crate) fn unwrap_envelope(body: &str) -> Result<Value> {
    let parsed: Value = match serde_json::from_str(body) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => value,
        _ => {
            return Err(Error::MalformedResponse {
                body: body.to_string(),
            })
        }
    };

    if parsed.get("success") == Some(&Value::Bool(false)) {
        let err = Error::from_envelope(&parsed);
        tracing::warn!(error = %err, "Paddle rejected request");
        return Err(err);
    }

    match parsed {
        Value::Object(mut map) => match map.remove("response") {
            Some(response) if !response.is_null() => {
                tracing::debug!("unwrapped response envelope");
                Ok(response)
            }
            _ => Ok(Value::Object(map)),
        },
        other => Ok(other),
    }
}

impl std::fmt::Debug for PaddleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaddleClient")
            .field("config", &self.inner.config)
            .field("credentials", &self.inner.credentials)
            .finish()
    }
}
