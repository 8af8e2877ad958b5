//! API service modules for Paddle endpoints.
//!
//! Each service covers one Paddle API family. Checkout endpoints are
//! public GETs; Product, Subscription and Alert endpoints are
//! vendor-authenticated POSTs.

mod alert;
mod checkout;
mod product;
mod subscription;

pub use alert::{AlertService, WebhookHistoryQuery, DEFAULT_ALERTS_PER_PAGE};
pub use checkout::{CheckoutService, PricesQuery};
pub use product::ProductService;
pub use subscription::{PaymentsQuery, SubscriptionService, UsersQuery, MAX_RESULTS_PER_PAGE};
