//! Checkout service: public order, history and price lookups.

use std::sync::Arc;

use serde::Serialize;

use crate::client::ClientInner;
use crate::models::serde_helpers::comma_list;
use crate::models::{OrderDetails, Prices, ProductId, UserHistory, VendorId};
use crate::Result;

/// Service for the Checkout API family.
///
/// These endpoints are read over GET and do not need vendor credentials,
/// so an unauthenticated client can use them.
///
/// # Example
///
/// ```no_run
/// use paddle_rs::api::PricesQuery;
/// use paddle_rs::{ClientConfig, PaddleClient, ProductId};
///
/// # async fn example() -> paddle_rs::Result<()> {
/// let client = PaddleClient::unauthenticated(ClientConfig::default())?;
///
/// let prices = client
///     .checkout()
///     .prices(&PricesQuery::new([ProductId::new(12345)]).customer_country("GB"))
///     .await?;
/// for product in prices.products {
///     println!("{}: {} {}", product.product_title, product.price.gross, product.currency);
/// }
/// # Ok(())
/// # }
/// ```
pub struct CheckoutService {
    inner: Arc<ClientInner>,
}

/// Query for localised product prices.
#[derive(Debug, Clone, Serialize)]
pub struct PricesQuery {
    #[serde(serialize_with = "comma_list")]
    product_ids: Vec<ProductId>,
    /// Two-letter country code to localise for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_country: Option<String>,
    /// Customer IP address, used to infer the country
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_ip: Option<String>,
    /// Coupon codes to apply, comma-separated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupons: Option<String>,
}

impl PricesQuery {
    /// Prices for the given products or plans.
    pub fn new(product_ids: impl IntoIterator<Item = ProductId>) -> Self {
        Self {
            product_ids: product_ids.into_iter().collect(),
            customer_country: None,
            customer_ip: None,
            coupons: None,
        }
    }

    /// Localise for a country.
    pub fn customer_country(mut self, country: impl Into<String>) -> Self {
        self.customer_country = Some(country.into());
        self
    }

    /// Localise for the country of an IP address.
    pub fn customer_ip(mut self, ip: impl Into<String>) -> Self {
        self.customer_ip = Some(ip.into());
        self
    }

    /// Apply coupons to the returned prices.
    pub fn coupons<I, S>(mut self, coupons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = coupons
            .into_iter()
            .map(|c| c.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.coupons = Some(joined);
        self
    }
}

impl CheckoutService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get the order created by a checkout.
    pub async fn order_details(&self, checkout_id: &str) -> Result<OrderDetails> {
        #[derive(Serialize)]
        struct Params<'a> {
            checkout_id: &'a str,
        }

        self.inner.get("/1.0/order", &Params { checkout_id }).await
    }

    /// Ask Paddle to email a customer their purchase history.
    ///
    /// `vendor_id` and `product_id` narrow the history to one vendor or
    /// product.
    pub async fn user_history(
        &self,
        email: &str,
        vendor_id: Option<VendorId>,
        product_id: Option<ProductId>,
    ) -> Result<UserHistory> {
        #[derive(Serialize)]
        struct Params<'a> {
            email: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            vendor_id: Option<VendorId>,
            #[serde(skip_serializing_if = "Option::is_none")]
            product_id: Option<ProductId>,
        }

        self.inner
            .get(
                "/2.0/user/history",
                &Params {
                    email,
                    vendor_id,
                    product_id,
                },
            )
            .await
    }

    /// Get localised prices for products or plans.
    pub async fn prices(&self, query: &PricesQuery) -> Result<Prices> {
        self.inner.get("/2.0/prices", query).await
    }
}
