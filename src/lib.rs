//! # paddle-rs
//!
//! An async Rust client for the Paddle Classic payment APIs.
//!
//! Every Paddle endpoint is exposed as a method on one of four services.
//! Calls serialize typed parameters, send them over HTTP and decode
//! Paddle's JSON envelope into a typed result or an [`Error`].
//!
//! ## Features
//!
//! - **Checkout**: order details, purchase history and localised prices,
//!   available without credentials
//! - **Product**: coupons, products, licenses, pay links, transactions and refunds
//! - **Subscription**: plans, subscribers, modifiers, payments and one-off charges
//! - **Alert**: webhook delivery history
//! - **Sandbox support**: switch environments without rebuilding the HTTP client
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use paddle_rs::{ClientConfig, Credentials, PaddleClient};
//! use paddle_rs::models::{Currency, PayLinkBuilder, Price};
//! use rust_decimal_macros::dec;
//!
//! #[tokio::main]
//! async fn main() -> paddle_rs::Result<()> {
//!     let client = PaddleClient::new(
//!         Credentials::new(100000, "vendor_auth_code"),
//!         ClientConfig::default(),
//!     )?;
//!
//!     let link = PayLinkBuilder::custom("Consulting hour", "https://example.com/hook")
//!         .price(Price::new(Currency::Usd, dec!(150.00)))
//!         .build()?;
//!
//!     let url = client.product().generate_pay_link(&link).await?;
//!     println!("Send the buyer to {}", url.url);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Endpoints without a wrapper
//!
//! ```rust,no_run
//! use paddle_rs::{HttpMethod, PaddleClient};
//! use serde_json::{json, Value};
//!
//! # async fn example(client: PaddleClient) -> paddle_rs::Result<()> {
//! let payload: Value = client
//!     .execute(HttpMethod::Post, "/2.0/product/list_coupons", &json!({ "product_id": 12345 }))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;

pub use auth::Credentials;
pub use client::{ClientConfig, PaddleClient};
pub use error::{Error, Result};
pub use models::{
    Endpoints, Environment, HttpMethod, OrderId, ProductId, SubscriptionId, VendorId,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use paddle_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{PaymentsQuery, PricesQuery, UsersQuery, WebhookHistoryQuery};
    pub use crate::auth::Credentials;
    pub use crate::client::{ClientConfig, PaddleClient};
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        // Primitives
        Endpoints, Environment, HttpMethod, ModifierId, OrderId, PaymentId, Price, ProductId,
        SubscriptionId, VendorId,
        // Enums
        BillingType, CouponType, Currency, DiscountType, SubscriptionState, TransactionEntity,
        // Builders
        CouponSelector, CouponUpdate, NewCouponBuilder, NewModifier, NewPlanBuilder,
        PayLinkBuilder, UserUpdate,
    };
}
