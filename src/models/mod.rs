//! Data models for the Paddle Classic API.
//!
//! Models are organized by API family:
//!
//! - [`primitives`] - IDs, environments, endpoints and prices
//! - [`enums`] - Currencies, coupon and discount kinds, subscription states
//! - [`checkout`] - Orders, purchase history and localised prices
//! - [`product`] - Coupons, products, licenses, pay links and transactions
//! - [`subscription`] - Plans, subscribers, modifiers and payments
//! - [`alert`] - Webhook history

pub mod primitives;
pub mod enums;
pub mod checkout;
pub mod product;
pub mod subscription;
pub mod alert;
pub(crate) mod serde_helpers;

pub use primitives::*;
pub use enums::*;
pub use checkout::*;
pub use product::*;
pub use subscription::*;
pub use alert::*;
