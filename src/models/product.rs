//! Product API models: coupons, products, licenses, pay links,
//! transactions and refunds.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{CouponType, Currency, DiscountType, SubscriptionState};
use super::primitives::{OrderId, Price, ProductId, VendorId};
use super::serde_helpers::{flexible_bool, optional_comma_list};
use crate::{Error, Result};

/// Default number of uses Paddle allows on a new coupon.
pub const DEFAULT_COUPON_USES: u64 = 999_999;

/// A coupon valid for a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    /// Coupon code
    pub coupon: String,
    /// Dashboard description
    #[serde(default)]
    pub description: Option<String>,
    /// Flat or percentage discount
    pub discount_type: DiscountType,
    /// Discount amount (currency amount or percentage)
    pub discount_amount: Decimal,
    /// Currency of a flat discount
    #[serde(default)]
    pub discount_currency: Option<String>,
    /// Number of uses allowed
    pub allowed_uses: u64,
    /// Number of times used so far
    #[serde(default)]
    pub times_used: u64,
    /// Whether the discount applies to recurring payments
    #[serde(default, deserialize_with = "flexible_bool")]
    pub is_recurring: bool,
    /// Expiry date
    #[serde(default)]
    pub expires: Option<String>,
}

/// Parameters for creating one or more coupons.
///
/// Use [`NewCouponBuilder`] to construct.
#[derive(Debug, Clone, Serialize)]
pub struct NewCoupon {
    #[serde(skip_serializing_if = "Option::is_none")]
    coupon_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    coupon_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_coupons: Option<u32>,
    description: String,
    coupon_type: CouponType,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "optional_comma_list"
    )]
    product_ids: Option<Vec<ProductId>>,
    discount_type: DiscountType,
    discount_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    currency: Option<Currency>,
    allowed_uses: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recurring: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<String>,
}

/// Builder for [`NewCoupon`] with validation.
///
/// # Example
///
/// ```
/// use paddle_rs::models::{CouponType, Currency, DiscountType, NewCouponBuilder};
/// use paddle_rs::ProductId;
/// use rust_decimal::Decimal;
///
/// let coupon = NewCouponBuilder::new(CouponType::Product, DiscountType::Flat, Decimal::new(500, 2))
///     .product(ProductId::new(12345))
///     .currency(Currency::Usd)
///     .coupon_code("SPRING5")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct NewCouponBuilder {
    inner: NewCoupon,
}

impl NewCouponBuilder {
    /// Start a coupon with the three required fields.
    pub fn new(coupon_type: CouponType, discount_type: DiscountType, discount_amount: Decimal) -> Self {
        Self {
            inner: NewCoupon {
                coupon_code: None,
                coupon_prefix: None,
                num_coupons: None,
                description: String::new(),
                coupon_type,
                product_ids: None,
                discount_type,
                discount_amount,
                currency: None,
                allowed_uses: DEFAULT_COUPON_USES,
                expires: None,
                recurring: None,
                group: None,
            },
        }
    }

    /// Use a fixed code instead of a generated one.
    pub fn coupon_code(mut self, code: impl Into<String>) -> Self {
        self.inner.coupon_code = Some(code.into());
        self
    }

    /// Prefix for generated codes.
    pub fn coupon_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.inner.coupon_prefix = Some(prefix.into());
        self
    }

    /// Number of codes to generate.
    pub fn num_coupons(mut self, count: u32) -> Self {
        self.inner.num_coupons = Some(count);
        self
    }

    /// Dashboard description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.inner.description = description.into();
        self
    }

    /// Add a product the coupon is valid for.
    pub fn product(mut self, product_id: ProductId) -> Self {
        self.inner.product_ids.get_or_insert_with(Vec::new).push(product_id);
        self
    }

    /// Currency of a flat discount.
    pub fn currency(mut self, currency: Currency) -> Self {
        self.inner.currency = Some(currency);
        self
    }

    /// Number of times the coupon can be used (default 999,999).
    pub fn allowed_uses(mut self, uses: u64) -> Self {
        self.inner.allowed_uses = uses;
        self
    }

    /// Last valid day (the coupon expires at 00:00:00 UTC on that date).
    pub fn expires(mut self, date: NaiveDate) -> Self {
        self.inner.expires = Some(date);
        self
    }

    /// Whether the discount applies to recurring subscription payments.
    pub fn recurring(mut self, recurring: bool) -> Self {
        self.inner.recurring = Some(recurring);
        self
    }

    /// Coupon group name.
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.inner.group = Some(group.into());
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<NewCoupon> {
        let coupon = self.inner;

        if coupon.coupon_type == CouponType::Product
            && coupon.product_ids.as_ref().map_or(true, Vec::is_empty)
        {
            return Err(Error::InvalidInput(
                "Product coupons require at least one product".to_string(),
            ));
        }

        match (coupon.discount_type, coupon.currency) {
            (DiscountType::Flat, None) => {
                return Err(Error::InvalidInput(
                    "Flat discounts require a currency".to_string(),
                ))
            }
            (DiscountType::Flat, Some(currency)) if !currency.is_balance_currency() => {
                return Err(Error::InvalidInput(format!(
                    "Flat discounts must be in USD, EUR or GBP, got {currency}"
                )))
            }
            _ => {}
        }

        if coupon.coupon_code.is_some()
            && (coupon.coupon_prefix.is_some() || coupon.num_coupons.is_some())
        {
            return Err(Error::InvalidInput(
                "coupon_prefix and num_coupons cannot be combined with coupon_code".to_string(),
            ));
        }

        Ok(coupon)
    }
}

/// Codes created by a create-coupon call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedCoupons {
    /// The new coupon codes
    pub coupon_code: Vec<String>,
}

/// Which coupons an update applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CouponSelector {
    /// A single coupon by code
    Code(String),
    /// Every coupon in a group
    Group(String),
}

/// Parameters for updating a coupon or a group of coupons.
#[derive(Debug, Clone, Serialize)]
pub struct CouponUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    coupon_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_coupon_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_group: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "optional_comma_list"
    )]
    product_ids: Option<Vec<ProductId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    allowed_uses: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    currency: Option<Currency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    discount_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recurring: Option<bool>,
}

impl CouponUpdate {
    /// Start an update for the selected coupon(s).
    ///
    /// Selecting by code or by group is exclusive, which the enum enforces.
    pub fn new(selector: CouponSelector) -> Self {
        let (coupon_code, group) = match selector {
            CouponSelector::Code(code) => (Some(code), None),
            CouponSelector::Group(group) => (None, Some(group)),
        };
        Self {
            coupon_code,
            group,
            new_coupon_code: None,
            new_group: None,
            product_ids: None,
            expires: None,
            allowed_uses: None,
            currency: None,
            discount_amount: None,
            recurring: None,
        }
    }

    /// Rename the coupon.
    pub fn new_coupon_code(mut self, code: impl Into<String>) -> Self {
        self.new_coupon_code = Some(code.into());
        self
    }

    /// Move the coupon(s) to another group.
    pub fn new_group(mut self, group: impl Into<String>) -> Self {
        self.new_group = Some(group.into());
        self
    }

    /// Replace the associated products. An empty list removes them all.
    pub fn product_ids(mut self, ids: Vec<ProductId>) -> Self {
        self.product_ids = Some(ids);
        self
    }

    /// New expiry date.
    pub fn expires(mut self, date: NaiveDate) -> Self {
        self.expires = Some(date);
        self
    }

    /// New number of allowed uses per coupon.
    pub fn allowed_uses(mut self, uses: u64) -> Self {
        self.allowed_uses = Some(uses);
        self
    }

    /// New flat discount, with its currency.
    pub fn flat_discount(mut self, amount: Decimal, currency: Currency) -> Self {
        self.discount_amount = Some(amount);
        self.currency = Some(currency);
        self
    }

    /// New percentage discount.
    pub fn percentage_discount(mut self, percent: Decimal) -> Self {
        self.discount_amount = Some(percent);
        self.currency = None;
        self
    }

    /// Whether the discount applies to recurring payments.
    pub fn recurring(mut self, recurring: bool) -> Self {
        self.recurring = Some(recurring);
        self
    }
}

/// Result of a coupon update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatedCoupons {
    /// Number of coupons changed
    pub updated: u64,
}

/// Published one-time products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductList {
    /// Total number of products
    pub total: u64,
    /// Number of products in this response
    pub count: u64,
    /// The products
    pub products: Vec<Product>,
}

/// A one-time product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Product ID
    pub id: u64,
    /// Product name
    pub name: String,
    /// Product description
    #[serde(default)]
    pub description: Option<String>,
    /// List price
    pub base_price: Decimal,
    /// Sale price, if on sale
    #[serde(default)]
    pub sale_price: Option<Decimal>,
    /// Three-letter currency code of the prices
    pub currency: String,
    /// Product icon URL
    #[serde(default)]
    pub icon: Option<String>,
}

/// A generated Paddle-framework license.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct License {
    /// License code
    pub license_code: String,
    /// Expiry date, if any
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// Parameters for generating a custom checkout link.
///
/// Use [`PayLinkBuilder`] to construct.
#[derive(Debug, Clone, Serialize)]
pub struct PayLink {
    #[serde(skip_serializing_if = "Option::is_none")]
    product_id: Option<ProductId>,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    webhook_url: Option<String>,
    prices: Vec<Price>,
    recurring_prices: Vec<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trial_days: Option<u32>,
    custom_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    coupon_code: Option<String>,
    discountable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    return_url: Option<String>,
    quantity_variable: bool,
    quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires: Option<NaiveDate>,
    affiliates: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recurring_affiliate_limit: Option<u32>,
    marketing_consent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_postcode: Option<String>,
    passthrough: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    vat_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vat_company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vat_street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vat_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vat_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vat_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vat_postcode: Option<String>,
}

/// Company details that pre-fill the sales tax fields of a checkout.
#[derive(Debug, Clone, Default)]
pub struct VatDetails {
    /// VAT number
    pub number: String,
    /// Company name
    pub company_name: String,
    /// Street address
    pub street: String,
    /// Town or city
    pub city: String,
    /// State, where applicable
    pub state: Option<String>,
    /// Two-letter country code
    pub country: String,
    /// Postcode, where the country requires one
    pub postcode: Option<String>,
}

/// Builder for [`PayLink`] with validation.
///
/// # Example
///
/// ```
/// use paddle_rs::models::{Currency, PayLinkBuilder, Price};
/// use rust_decimal::Decimal;
///
/// // A custom one-off product without a dashboard product behind it
/// let link = PayLinkBuilder::custom("Consulting hour", "https://example.com/paddle-hook")
///     .price(Price::new(Currency::Usd, Decimal::new(15000, 2)))
///     .customer_email("buyer@example.com")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct PayLinkBuilder {
    inner: PayLink,
}

impl PayLinkBuilder {
    fn empty() -> Self {
        Self {
            inner: PayLink {
                product_id: None,
                title: String::new(),
                webhook_url: None,
                prices: Vec::new(),
                recurring_prices: Vec::new(),
                trial_days: None,
                custom_message: String::new(),
                coupon_code: None,
                discountable: true,
                image_url: None,
                return_url: None,
                quantity_variable: true,
                quantity: 1,
                expires: None,
                affiliates: Vec::new(),
                recurring_affiliate_limit: None,
                marketing_consent: false,
                customer_email: None,
                customer_country: None,
                customer_postcode: None,
                passthrough: String::new(),
                vat_number: None,
                vat_company_name: None,
                vat_street: None,
                vat_city: None,
                vat_state: None,
                vat_country: None,
                vat_postcode: None,
            },
        }
    }

    /// A checkout for an existing product or plan.
    pub fn for_product(product_id: ProductId) -> Self {
        let mut builder = Self::empty();
        builder.inner.product_id = Some(product_id);
        builder
    }

    /// A checkout for a custom one-time product. At least one price is
    /// required before building.
    pub fn custom(title: impl Into<String>, webhook_url: impl Into<String>) -> Self {
        let mut builder = Self::empty();
        builder.inner.title = title.into();
        builder.inner.webhook_url = Some(webhook_url.into());
        builder
    }

    /// Checkout title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.inner.title = title.into();
        self
    }

    /// Add a one-time (or initial) price.
    pub fn price(mut self, price: Price) -> Self {
        self.inner.prices.push(price);
        self
    }

    /// Add a recurring price, for subscription plans.
    pub fn recurring_price(mut self, price: Price) -> Self {
        self.inner.recurring_prices.push(price);
        self
    }

    /// Override the plan's trial length.
    pub fn trial_days(mut self, days: u32) -> Self {
        self.inner.trial_days = Some(days);
        self
    }

    /// Short message shown under the product name.
    pub fn custom_message(mut self, message: impl Into<String>) -> Self {
        self.inner.custom_message = message.into();
        self
    }

    /// Pre-apply a coupon.
    pub fn coupon_code(mut self, code: impl Into<String>) -> Self {
        self.inner.coupon_code = Some(code.into());
        self
    }

    /// Whether buyers may apply a coupon (default `true`).
    pub fn discountable(mut self, discountable: bool) -> Self {
        self.inner.discountable = discountable;
        self
    }

    /// Product image URL.
    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.inner.image_url = Some(url.into());
        self
    }

    /// Redirect target after purchase. `{checkout_hash}` is substituted.
    pub fn return_url(mut self, url: impl Into<String>) -> Self {
        self.inner.return_url = Some(url.into());
        self
    }

    /// Whether buyers may change the quantity (default `true`).
    pub fn quantity_variable(mut self, variable: bool) -> Self {
        self.inner.quantity_variable = variable;
        self
    }

    /// Pre-filled quantity. Values outside 1..=100 fall back to 1.
    pub fn quantity(mut self, quantity: u32) -> Self {
        self.inner.quantity = if (1..=100).contains(&quantity) { quantity } else { 1 };
        self
    }

    /// Date after which the link stops working.
    pub fn expires(mut self, date: NaiveDate) -> Self {
        self.inner.expires = Some(date);
        self
    }

    /// Split revenue with another vendor, as `vendor_id:commission`.
    pub fn affiliate(mut self, vendor_id: VendorId, commission: Decimal) -> Self {
        self.inner.affiliates.push(format!("{vendor_id}:{commission}"));
        self
    }

    /// Cap on recurring payments shared with affiliates.
    pub fn recurring_affiliate_limit(mut self, limit: u32) -> Self {
        self.inner.recurring_affiliate_limit = Some(limit);
        self
    }

    /// Record that marketing consent was gathered.
    pub fn marketing_consent(mut self, consent: bool) -> Self {
        self.inner.marketing_consent = consent;
        self
    }

    /// Pre-fill the customer email.
    pub fn customer_email(mut self, email: impl Into<String>) -> Self {
        self.inner.customer_email = Some(email.into());
        self
    }

    /// Pre-fill the customer country and, where required, postcode.
    pub fn customer_location(mut self, country: impl Into<String>, postcode: Option<String>) -> Self {
        self.inner.customer_country = Some(country.into());
        self.inner.customer_postcode = postcode;
        self
    }

    /// Metadata sent back with every webhook for the order.
    pub fn passthrough(mut self, passthrough: impl Into<String>) -> Self {
        self.inner.passthrough = passthrough.into();
        self
    }

    /// Pre-fill sales tax details.
    pub fn vat(mut self, vat: VatDetails) -> Self {
        self.inner.vat_number = Some(vat.number);
        self.inner.vat_company_name = Some(vat.company_name);
        self.inner.vat_street = Some(vat.street);
        self.inner.vat_city = Some(vat.city);
        self.inner.vat_state = vat.state;
        self.inner.vat_country = Some(vat.country);
        self.inner.vat_postcode = vat.postcode;
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<PayLink> {
        let link = self.inner;

        if link.product_id.is_none() {
            if link.title.is_empty() {
                return Err(Error::InvalidInput(
                    "Custom pay links require a title".to_string(),
                ));
            }
            if link.webhook_url.as_deref().map_or(true, str::is_empty) {
                return Err(Error::InvalidInput(
                    "Custom pay links require a webhook_url".to_string(),
                ));
            }
            if link.prices.is_empty() {
                return Err(Error::InvalidInput(
                    "Custom pay links require at least one price".to_string(),
                ));
            }
        }

        if link.vat_number.is_some()
            && [&link.vat_company_name, &link.vat_street, &link.vat_city, &link.vat_country]
                .iter()
                .any(|field| field.as_deref().map_or(true, str::is_empty))
        {
            return Err(Error::InvalidInput(
                "A VAT number requires company name, street, city and country".to_string(),
            ));
        }

        Ok(link)
    }
}

/// The generated checkout URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayLinkUrl {
    /// Checkout URL
    pub url: String,
}

/// A payment transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Order ID
    pub order_id: OrderId,
    /// Checkout ID
    pub checkout_id: String,
    /// Amount charged
    pub amount: Decimal,
    /// Three-letter currency code
    pub currency: String,
    /// Transaction status
    pub status: String,
    /// Creation timestamp
    pub created_at: String,
    /// Passthrough metadata from the checkout
    #[serde(default)]
    pub passthrough: Option<String>,
    /// Product ID
    #[serde(default)]
    pub product_id: Option<u64>,
    /// Whether the transaction belongs to a subscription
    #[serde(default, deserialize_with = "flexible_bool")]
    pub is_subscription: bool,
    /// Whether this is a one-off charge
    #[serde(default, deserialize_with = "flexible_bool")]
    pub is_one_off: bool,
    /// Subscription details
    #[serde(default)]
    pub subscription: Option<TransactionSubscription>,
    /// Buyer details
    #[serde(default)]
    pub user: Option<TransactionUser>,
    /// Link to the receipt
    #[serde(default)]
    pub receipt_url: Option<String>,
}

/// Subscription a transaction belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionSubscription {
    /// Subscription ID
    pub subscription_id: u64,
    /// Subscription state
    pub status: SubscriptionState,
}

/// Buyer of a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionUser {
    /// Paddle user ID
    pub user_id: u64,
    /// Buyer email
    pub email: String,
    /// Whether the buyer opted in to marketing
    #[serde(default, deserialize_with = "flexible_bool")]
    pub marketing_consent: bool,
}

/// A pending refund request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundRequest {
    /// ID of the refund request
    pub refund_request_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RequestParams;
    use rust_decimal_macros::dec;

    fn pairs(params: &impl Serialize) -> Vec<(String, String)> {
        RequestParams::from_serialize(params).unwrap().to_pairs()
    }

    #[test]
    fn test_coupon_defaults() {
        let coupon = NewCouponBuilder::new(CouponType::Checkout, DiscountType::Percentage, dec!(10))
            .build()
            .unwrap();
        let pairs = pairs(&coupon);

        assert!(pairs.contains(&("allowed_uses".to_string(), "999999".to_string())));
        assert!(pairs.contains(&("coupon_type".to_string(), "checkout".to_string())));
        assert!(pairs.contains(&("discount_amount".to_string(), "10".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k == "currency" || k == "coupon_code"));
    }

    #[test]
    fn test_product_coupon_requires_products() {
        let result =
            NewCouponBuilder::new(CouponType::Product, DiscountType::Percentage, dec!(10)).build();
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_flat_coupon_requires_balance_currency() {
        let base = NewCouponBuilder::new(CouponType::Checkout, DiscountType::Flat, dec!(5));
        assert!(base.clone().build().is_err());
        assert!(base.clone().currency(Currency::Jpy).build().is_err());
        assert!(base.currency(Currency::Gbp).build().is_ok());
    }

    #[test]
    fn test_coupon_code_excludes_generation_options() {
        let result = NewCouponBuilder::new(CouponType::Checkout, DiscountType::Percentage, dec!(5))
            .coupon_code("FIXED")
            .num_coupons(3)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_coupon_product_ids_joined() {
        let coupon = NewCouponBuilder::new(CouponType::Product, DiscountType::Percentage, dec!(15))
            .product(ProductId::new(1))
            .product(ProductId::new(2))
            .recurring(true)
            .build()
            .unwrap();
        let pairs = pairs(&coupon);
        assert!(pairs.contains(&("product_ids".to_string(), "1,2".to_string())));
        assert!(pairs.contains(&("recurring".to_string(), "1".to_string())));
    }

    #[test]
    fn test_coupon_update_selector() {
        let by_group = CouponUpdate::new(CouponSelector::Group("spring".into()))
            .percentage_discount(dec!(20));
        let pairs = pairs(&by_group);
        assert!(pairs.contains(&("group".to_string(), "spring".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k == "coupon_code"));
        assert!(!pairs.iter().any(|(k, _)| k == "currency"));
    }

    #[test]
    fn test_pay_link_quantity_clamped() {
        let link = PayLinkBuilder::for_product(ProductId::new(9))
            .quantity(500)
            .build()
            .unwrap();
        assert_eq!(link.quantity, 1);

        let link = PayLinkBuilder::for_product(ProductId::new(9))
            .quantity(100)
            .build()
            .unwrap();
        assert_eq!(link.quantity, 100);
    }

    #[test]
    fn test_custom_pay_link_validation() {
        assert!(PayLinkBuilder::custom("Title", "https://hook").build().is_err());
        assert!(PayLinkBuilder::custom("", "https://hook")
            .price(Price::new(Currency::Usd, dec!(1)))
            .build()
            .is_err());
        assert!(PayLinkBuilder::custom("Title", "https://hook")
            .price(Price::new(Currency::Usd, dec!(1)))
            .build()
            .is_ok());
    }

    #[test]
    fn test_pay_link_encoding() {
        let link = PayLinkBuilder::for_product(ProductId::new(9))
            .price(Price::new(Currency::Usd, dec!(9.99)))
            .price(Price::new(Currency::Eur, dec!(8.99)))
            .discountable(false)
            .affiliate(VendorId::new(12345), dec!(0.25))
            .build()
            .unwrap();
        let pairs = pairs(&link);

        assert!(pairs.contains(&("product_id".to_string(), "9".to_string())));
        assert!(pairs.contains(&("prices[0]".to_string(), "USD:9.99".to_string())));
        assert!(pairs.contains(&("prices[1]".to_string(), "EUR:8.99".to_string())));
        assert!(pairs.contains(&("discountable".to_string(), "0".to_string())));
        assert!(pairs.contains(&("quantity_variable".to_string(), "1".to_string())));
        assert!(pairs.contains(&("affiliates[0]".to_string(), "12345:0.25".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k.starts_with("recurring_prices")));
        assert!(!pairs.iter().any(|(k, _)| k == "webhook_url"));
    }

    #[test]
    fn test_pay_link_vat_requires_company() {
        let result = PayLinkBuilder::for_product(ProductId::new(9))
            .vat(VatDetails {
                number: "GB123".into(),
                ..Default::default()
            })
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_transaction_deserialize() {
        let tx: Transaction = serde_json::from_value(serde_json::json!({
            "order_id": "1042907-384786",
            "checkout_id": "4795118-chre8a807e9d8ee-b86e4ca3c4",
            "amount": "5.00",
            "currency": "USD",
            "status": "completed",
            "created_at": "2017-12-07 23:28:07",
            "passthrough": null,
            "product_id": 12345,
            "is_subscription": true,
            "is_one_off": false,
            "subscription": { "subscription_id": 502198, "status": "active" },
            "user": { "user_id": 1, "email": "a@b.c", "marketing_consent": 1 },
            "receipt_url": "https://my.paddle.com/receipt/..."
        }))
        .unwrap();

        assert_eq!(tx.order_id.as_str(), "1042907-384786");
        assert_eq!(tx.amount, dec!(5.00));
        assert_eq!(
            tx.subscription.unwrap().status,
            SubscriptionState::Active
        );
        assert!(tx.user.unwrap().marketing_consent);
    }
}
