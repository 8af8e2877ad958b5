//! HTTP client and request execution for the Paddle API.
//!
//! [`PaddleClient`] is the entry point. Every call goes through one
//! executor that signs the request with vendor credentials, routes it to
//! the checkout or vendor host and unwraps Paddle's response envelope.
//!
//! # Example
//!
//! ```no_run
//! use paddle_rs::{ClientConfig, Credentials, PaddleClient};
//! use paddle_rs::models::Environment;
//!
//! # async fn example() -> paddle_rs::Result<()> {
//! let client = PaddleClient::new(
//!     Credentials::new(100000, "vendor_auth_code"),
//!     ClientConfig::default().with_environment(Environment::Sandbox),
//! )?;
//!
//! let plans = client.subscription().list_plans(None).await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
pub mod params;

pub use config::{ClientConfig, DEFAULT_TIMEOUT_SECS};
pub use http::PaddleClient;
pub use params::RequestParams;
pub(crate) use http::ClientInner;
