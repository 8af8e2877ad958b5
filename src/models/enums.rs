//! Enumeration types for the Paddle API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO 4217 currency codes supported by Paddle checkouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// Pound Sterling
    Gbp,
    /// Argentine Peso
    Ars,
    /// Australian Dollar
    Aud,
    /// Brazilian Real
    Brl,
    /// Canadian Dollar
    Cad,
    /// Swiss Franc
    Chf,
    /// Chinese Yuan
    Cny,
    /// Czech Koruna
    Czk,
    /// Danish Krone
    Dkk,
    /// Hong Kong Dollar
    Hkd,
    /// Hungarian Forint
    Huf,
    /// Indian Rupee
    Inr,
    /// Japanese Yen
    Jpy,
    /// South Korean Won
    Krw,
    /// Mexican Peso
    Mxn,
    /// Norwegian Krone
    Nok,
    /// New Zealand Dollar
    Nzd,
    /// Polish Zloty
    Pln,
    /// Russian Ruble
    Rub,
    /// Swedish Krona
    Sek,
    /// Singapore Dollar
    Sgd,
    /// Thai Baht
    Thb,
    /// New Taiwan Dollar
    Twd,
    /// South African Rand
    Zar,
}

impl Currency {
    /// The three-letter code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Ars => "ARS",
            Currency::Aud => "AUD",
            Currency::Brl => "BRL",
            Currency::Cad => "CAD",
            Currency::Chf => "CHF",
            Currency::Cny => "CNY",
            Currency::Czk => "CZK",
            Currency::Dkk => "DKK",
            Currency::Hkd => "HKD",
            Currency::Huf => "HUF",
            Currency::Inr => "INR",
            Currency::Jpy => "JPY",
            Currency::Krw => "KRW",
            Currency::Mxn => "MXN",
            Currency::Nok => "NOK",
            Currency::Nzd => "NZD",
            Currency::Pln => "PLN",
            Currency::Rub => "RUB",
            Currency::Sek => "SEK",
            Currency::Sgd => "SGD",
            Currency::Thb => "THB",
            Currency::Twd => "TWD",
            Currency::Zar => "ZAR",
        }
    }

    /// Returns `true` for the currencies a vendor balance can be held in.
    ///
    /// Flat coupons and plan prices are restricted to these.
    pub fn is_balance_currency(&self) -> bool {
        matches!(self, Currency::Usd | Currency::Eur | Currency::Gbp)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a coupon can be redeemed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponType {
    /// Valid for the listed products or plans only
    Product,
    /// Valid for any checkout
    Checkout,
}

/// How a coupon discount is calculated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// A fixed currency amount
    Flat,
    /// A percentage of the price
    Percentage,
}

/// Entity types that transactions can be listed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionEntity {
    /// A Paddle user
    User,
    /// A user subscription
    Subscription,
    /// An order
    Order,
    /// A checkout
    Checkout,
    /// A product
    Product,
}

impl TransactionEntity {
    /// The path segment used in `/2.0/{entity}/{id}/transactions`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionEntity::User => "user",
            TransactionEntity::Subscription => "subscription",
            TransactionEntity::Order => "order",
            TransactionEntity::Checkout => "checkout",
            TransactionEntity::Product => "product",
        }
    }
}

impl fmt::Display for TransactionEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a user subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionState {
    /// Billing normally
    Active,
    /// A payment failed and is being retried
    PastDue,
    /// In a trial period
    Trialing,
    /// Billing suspended
    Paused,
    /// Cancelled
    Deleted,
    /// State not known to this crate
    #[serde(other)]
    Unknown,
}

/// Length unit of a plan's billing period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingType {
    /// Daily billing
    Day,
    /// Weekly billing
    Week,
    /// Monthly billing
    Month,
    /// Yearly billing
    Year,
}
