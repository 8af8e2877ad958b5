//! Checkout API models: orders, purchase history and localised prices.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::primitives::OrderId;
use super::serde_helpers::flexible_bool;

/// Details of a completed (or still processing) checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetails {
    /// `processing`, `incomplete` or `processed`
    pub state: String,
    /// The checkout the order came from
    pub checkout: CheckoutSummary,
    /// Order information, once the checkout is processed
    #[serde(default)]
    pub order: Option<OrderSummary>,
    /// Delivered items such as license codes and downloads
    #[serde(default)]
    pub lockers: Vec<Locker>,
}

impl OrderDetails {
    /// Returns `true` once Paddle has finished processing the order.
    pub fn is_processed(&self) -> bool {
        self.state == "processed"
    }
}

/// Basic checkout information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSummary {
    /// Checkout identifier
    pub checkout_id: String,
    /// Product image shown on the checkout
    #[serde(default)]
    pub image_url: Option<String>,
    /// Checkout title
    #[serde(default)]
    pub title: Option<String>,
}

/// The order created by a checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Order identifier
    pub order_id: OrderId,
    /// Total charged, including tax
    #[serde(default)]
    pub total: Option<Decimal>,
    /// Tax portion of the total
    #[serde(default)]
    pub total_tax: Option<Decimal>,
    /// Three-letter currency code
    #[serde(default)]
    pub currency: Option<String>,
    /// Buyer's email address
    #[serde(default)]
    pub customer_email: Option<String>,
    /// Whether the buyer opted in to marketing
    #[serde(default, deserialize_with = "flexible_bool")]
    pub customer_marketing_consent: bool,
    /// Coupon applied to the order
    #[serde(default)]
    pub coupon_code: Option<String>,
    /// Link to the receipt
    #[serde(default)]
    pub receipt_url: Option<String>,
    /// Subscription ID for subscription orders
    #[serde(default)]
    pub subscription_id: Option<u64>,
    /// Whether this order started a subscription
    #[serde(default, deserialize_with = "flexible_bool")]
    pub is_subscription: bool,
    /// Whether the order has delivered items
    #[serde(default, deserialize_with = "flexible_bool")]
    pub has_locker: bool,
}

/// An item delivered with an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Locker {
    /// Locker identifier
    pub locker_id: u64,
    /// Product the locker belongs to
    pub product_id: u64,
    /// Product name
    pub product_name: String,
    /// License code, for license-delivering products
    #[serde(default)]
    pub license_code: Option<String>,
    /// Fulfilment instructions
    #[serde(default)]
    pub instructions: Option<String>,
    /// Download URL
    #[serde(default)]
    pub download: Option<String>,
}

/// Acknowledgement of a purchase history request. Paddle emails the
/// history to the customer; it is not returned in the response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserHistory {
    /// Confirmation message
    pub message: String,
}

/// Localised prices for one or more products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prices {
    /// Country the prices were localised for
    pub customer_country: String,
    /// One entry per requested product
    pub products: Vec<ProductPrice>,
}

/// Localised price of a product or plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPrice {
    /// Product or plan ID
    pub product_id: u64,
    /// Product title
    pub product_title: String,
    /// Three-letter currency code
    pub currency: String,
    /// Whether the vendor-set prices already include tax
    #[serde(default, deserialize_with = "flexible_bool")]
    pub vendor_set_prices_included_tax: bool,
    /// Price after discounts
    pub price: PriceBreakdown,
    /// Price before discounts
    pub list_price: PriceBreakdown,
    /// Recurring price details, for plans
    #[serde(default)]
    pub subscription: Option<SubscriptionPrice>,
}

/// A price split into net, tax and gross.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Price including tax
    pub gross: Decimal,
    /// Price excluding tax
    pub net: Decimal,
    /// Tax amount
    pub tax: Decimal,
}

/// Recurring pricing of a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionPrice {
    /// Trial length in days
    #[serde(default)]
    pub trial_days: u32,
    /// Billing interval unit
    pub interval: String,
    /// Number of intervals between payments
    pub frequency: u32,
    /// Recurring price after discounts
    pub price: PriceBreakdown,
    /// Recurring price before discounts
    pub list_price: PriceBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_details_deserialize() {
        let details: OrderDetails = serde_json::from_value(json!({
            "state": "processed",
            "checkout": { "checkout_id": "219233-chre53d41f940e0-58aqh94971", "title": "Test" },
            "order": {
                "order_id": 123456,
                "total": "12.00",
                "currency": "USD",
                "customer_email": "test@example.com",
                "customer_marketing_consent": 1,
                "is_subscription": false,
                "has_locker": true
            },
            "lockers": [{
                "locker_id": 1,
                "product_id": 2,
                "product_name": "App",
                "license_code": "ABC-123"
            }]
        }))
        .unwrap();

        assert!(details.is_processed());
        let order = details.order.unwrap();
        assert_eq!(order.order_id.as_str(), "123456");
        assert_eq!(order.total, Some(Decimal::new(1200, 2)));
        assert!(order.customer_marketing_consent);
        assert!(order.has_locker);
        assert_eq!(details.lockers[0].license_code.as_deref(), Some("ABC-123"));
    }

    #[test]
    fn test_prices_deserialize() {
        let prices: Prices = serde_json::from_value(json!({
            "customer_country": "GB",
            "products": [{
                "product_id": 12345,
                "product_title": "Pro",
                "currency": "GBP",
                "vendor_set_prices_included_tax": true,
                "price": { "gross": 12.0, "net": 10.0, "tax": 2.0 },
                "list_price": { "gross": 12.0, "net": 10.0, "tax": 2.0 },
                "subscription": {
                    "trial_days": 7,
                    "interval": "month",
                    "frequency": 1,
                    "price": { "gross": 6, "net": 5, "tax": 1 },
                    "list_price": { "gross": 6, "net": 5, "tax": 1 }
                }
            }]
        }))
        .unwrap();

        let product = &prices.products[0];
        assert_eq!(product.price.net, Decimal::new(10, 0));
        assert_eq!(product.subscription.as_ref().unwrap().trial_days, 7);
    }
}
