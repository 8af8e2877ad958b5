//! Vendor authentication for the Paddle API.
//!
//! Paddle's classic API authenticates with a vendor ID and a vendor auth
//! code sent as ordinary request parameters. Both are found in the seller
//! dashboard under Developer Tools > Authentication.
//!
//! Checkout endpoints work without credentials; every vendor endpoint
//! (products, coupons, subscriptions, alerts) requires them.
//!
//! ```
//! use paddle_rs::{Credentials, PaddleClient, ClientConfig};
//!
//! # fn example() -> paddle_rs::Result<()> {
//! let client = PaddleClient::new(
//!     Credentials::new(100000, "vendor_auth_code"),
//!     ClientConfig::default(),
//! )?;
//! assert!(client.is_authenticated());
//! # Ok(())
//! # }
//! ```

mod credentials;

pub use credentials::Credentials;
