//! Subscription API models: plans, users, modifiers, payments and
//! one-off charges.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::enums::{BillingType, Currency, SubscriptionState};
use super::primitives::{PaymentId, ProductId, SubscriptionId};
use super::serde_helpers::{flexible_bool, price_map};
use crate::{Error, Result};

/// A subscription plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// Plan ID
    pub id: u64,
    /// Plan name
    pub name: String,
    /// Billing interval unit
    pub billing_type: BillingType,
    /// Number of intervals between payments
    pub billing_period: u32,
    /// Initial price per currency
    #[serde(default, deserialize_with = "price_map")]
    pub initial_price: BTreeMap<String, Decimal>,
    /// Recurring price per currency
    #[serde(default, deserialize_with = "price_map")]
    pub recurring_price: BTreeMap<String, Decimal>,
    /// Trial length in days
    #[serde(default)]
    pub trial_days: u32,
}

/// Parameters for creating a plan.
///
/// Use [`NewPlanBuilder`] to construct.
#[derive(Debug, Clone, Serialize)]
pub struct NewPlan {
    plan_name: String,
    plan_trial_days: u32,
    plan_length: u32,
    plan_type: BillingType,
    main_currency_code: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    initial_price_usd: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    initial_price_gbp: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    initial_price_eur: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recurring_price_usd: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recurring_price_gbp: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recurring_price_eur: Option<Decimal>,
}

/// Builder for [`NewPlan`].
///
/// Plans are priced in USD, GBP and EUR only. The main currency must
/// have a recurring price.
#[derive(Debug, Clone)]
pub struct NewPlanBuilder {
    inner: NewPlan,
}

impl NewPlanBuilder {
    /// Start a plan billed every `length` units of `billing`.
    pub fn new(name: impl Into<String>, billing: BillingType, length: u32) -> Self {
        Self {
            inner: NewPlan {
                plan_name: name.into(),
                plan_trial_days: 0,
                plan_length: length,
                plan_type: billing,
                main_currency_code: Currency::Usd,
                initial_price_usd: None,
                initial_price_gbp: None,
                initial_price_eur: None,
                recurring_price_usd: None,
                recurring_price_gbp: None,
                recurring_price_eur: None,
            },
        }
    }

    /// Trial length in days.
    pub fn trial_days(mut self, days: u32) -> Self {
        self.inner.plan_trial_days = days;
        self
    }

    /// Currency the plan is primarily priced in (default USD).
    pub fn main_currency(mut self, currency: Currency) -> Self {
        self.inner.main_currency_code = currency;
        self
    }

    /// First-payment price in one currency.
    pub fn initial_price(mut self, currency: Currency, amount: Decimal) -> Self {
        match currency {
            Currency::Usd => self.inner.initial_price_usd = Some(amount),
            Currency::Gbp => self.inner.initial_price_gbp = Some(amount),
            Currency::Eur => self.inner.initial_price_eur = Some(amount),
            _ => {}
        }
        self
    }

    /// Recurring price in one currency.
    pub fn recurring_price(mut self, currency: Currency, amount: Decimal) -> Self {
        match currency {
            Currency::Usd => self.inner.recurring_price_usd = Some(amount),
            Currency::Gbp => self.inner.recurring_price_gbp = Some(amount),
            Currency::Eur => self.inner.recurring_price_eur = Some(amount),
            _ => {}
        }
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<NewPlan> {
        let plan = self.inner;

        if plan.plan_name.trim().is_empty() {
            return Err(Error::InvalidInput("Plan name is required".to_string()));
        }
        if plan.plan_length == 0 {
            return Err(Error::InvalidInput(
                "Plan length must be at least 1".to_string(),
            ));
        }

        let main_recurring = match plan.main_currency_code {
            Currency::Usd => plan.recurring_price_usd,
            Currency::Gbp => plan.recurring_price_gbp,
            Currency::Eur => plan.recurring_price_eur,
            other => {
                return Err(Error::InvalidInput(format!(
                    "Plans must be priced in USD, EUR or GBP, got {other}"
                )))
            }
        };
        if main_recurring.is_none() {
            return Err(Error::InvalidInput(format!(
                "A recurring price in the main currency ({}) is required",
                plan.main_currency_code
            )));
        }

        Ok(plan)
    }
}

/// The created plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedPlan {
    /// ID of the new plan
    pub product_id: u64,
}

/// A subscriber of a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionUser {
    /// Subscription ID
    pub subscription_id: u64,
    /// Plan ID
    pub plan_id: u64,
    /// Paddle user ID
    pub user_id: u64,
    /// Subscriber email
    pub user_email: String,
    /// Whether the subscriber opted in to marketing
    #[serde(default, deserialize_with = "flexible_bool")]
    pub marketing_consent: bool,
    /// Subscription state
    pub state: SubscriptionState,
    /// When the subscription was created
    pub signup_date: String,
    /// Most recent payment
    #[serde(default)]
    pub last_payment: Option<PaymentSummary>,
    /// Next scheduled payment
    #[serde(default)]
    pub next_payment: Option<PaymentSummary>,
    /// Link to update the payment method
    #[serde(default)]
    pub update_url: Option<String>,
    /// Link to cancel the subscription
    #[serde(default)]
    pub cancel_url: Option<String>,
    /// When a paused subscription was paused
    #[serde(default)]
    pub paused_at: Option<String>,
    /// When a pause takes effect
    #[serde(default)]
    pub paused_from: Option<String>,
}

/// A payment attached to a subscriber listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSummary {
    /// Amount
    pub amount: Decimal,
    /// Three-letter currency code
    pub currency: String,
    /// Payment date
    pub date: String,
}

/// Parameters for changing a subscription.
#[derive(Debug, Clone, Serialize)]
pub struct UserUpdate {
    subscription_id: SubscriptionId,
    #[serde(skip_serializing_if = "Option::is_none")]
    quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    currency: Option<Currency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recurring_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bill_immediately: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    plan_id: Option<ProductId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prorate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    keep_modifiers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    passthrough: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pause: Option<bool>,
}

impl UserUpdate {
    /// Start an update of one subscription. Only the fields that are set
    /// are sent.
    pub fn new(subscription_id: SubscriptionId) -> Self {
        Self {
            subscription_id,
            quantity: None,
            currency: None,
            recurring_price: None,
            bill_immediately: None,
            plan_id: None,
            prorate: None,
            keep_modifiers: None,
            passthrough: None,
            pause: None,
        }
    }

    /// New seat quantity.
    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// New recurring price, with the currency it is expressed in.
    pub fn recurring_price(mut self, amount: Decimal, currency: Currency) -> Self {
        self.recurring_price = Some(amount);
        self.currency = Some(currency);
        self
    }

    /// Charge the difference now rather than at the next renewal.
    pub fn bill_immediately(mut self, bill: bool) -> Self {
        self.bill_immediately = Some(bill);
        self
    }

    /// Move the subscriber to another plan.
    pub fn plan(mut self, plan_id: ProductId) -> Self {
        self.plan_id = Some(plan_id);
        self
    }

    /// Whether to prorate the change.
    pub fn prorate(mut self, prorate: bool) -> Self {
        self.prorate = Some(prorate);
        self
    }

    /// Whether existing modifiers survive a plan change.
    pub fn keep_modifiers(mut self, keep: bool) -> Self {
        self.keep_modifiers = Some(keep);
        self
    }

    /// Replace the passthrough metadata.
    pub fn passthrough(mut self, passthrough: impl Into<String>) -> Self {
        self.passthrough = Some(passthrough.into());
        self
    }

    /// Pause (`true`) or resume (`false`) the subscription.
    pub fn pause(mut self, pause: bool) -> Self {
        self.pause = Some(pause);
        self
    }
}

/// State of a subscription after an update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatedSubscription {
    /// Subscription ID
    pub subscription_id: u64,
    /// Paddle user ID
    pub user_id: u64,
    /// Plan ID
    pub plan_id: u64,
    /// Next scheduled payment
    #[serde(default)]
    pub next_payment: Option<PaymentSummary>,
}

/// A recurring price adjustment on a subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Modifier {
    /// Modifier ID
    pub modifier_id: u64,
    /// Subscription it applies to
    pub subscription_id: u64,
    /// Amount added to (or, when negative, removed from) each payment
    pub amount: Decimal,
    /// Three-letter currency code
    pub currency: String,
    /// Whether it applies to every payment or only the next one
    #[serde(default, deserialize_with = "flexible_bool")]
    pub is_recurring: bool,
    /// Description shown to the subscriber
    #[serde(default)]
    pub description: Option<String>,
}

/// Parameters for adding a modifier.
#[derive(Debug, Clone, Serialize)]
pub struct NewModifier {
    subscription_id: SubscriptionId,
    modifier_amount: Decimal,
    modifier_recurring: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    modifier_description: Option<String>,
}

impl NewModifier {
    /// A recurring modifier of `amount` in the subscription's currency.
    pub fn new(subscription_id: SubscriptionId, amount: Decimal) -> Self {
        Self {
            subscription_id,
            modifier_amount: amount,
            modifier_recurring: true,
            modifier_description: None,
        }
    }

    /// Apply to the next payment only.
    pub fn one_time(mut self) -> Self {
        self.modifier_recurring = false;
        self
    }

    /// Description shown to the subscriber.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.modifier_description = Some(description.into());
        self
    }
}

/// The created modifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedModifier {
    /// Subscription the modifier was added to
    pub subscription_id: u64,
    /// ID of the new modifier
    pub modifier_id: u64,
}

/// A past or upcoming subscription payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Payment ID
    pub id: u64,
    /// Subscription ID
    pub subscription_id: u64,
    /// Amount
    pub amount: Decimal,
    /// Three-letter currency code
    pub currency: String,
    /// Payout date
    pub payout_date: String,
    /// Whether the payment has been collected
    #[serde(default, deserialize_with = "flexible_bool")]
    pub is_paid: bool,
    /// Whether this is a one-off charge
    #[serde(default, deserialize_with = "flexible_bool")]
    pub is_one_off_charge: bool,
    /// Receipt link, for collected payments
    #[serde(default)]
    pub receipt_url: Option<String>,
}

impl Payment {
    /// Typed ID, for rescheduling.
    pub fn payment_id(&self) -> PaymentId {
        PaymentId::new(self.id)
    }
}

/// Result of an immediate one-off charge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneOffCharge {
    /// Invoice ID
    pub invoice_id: u64,
    /// Subscription charged
    pub subscription_id: u64,
    /// Amount charged
    pub amount: Decimal,
    /// Three-letter currency code
    pub currency: String,
    /// Payment date
    pub payment_date: String,
    /// Receipt link
    #[serde(default)]
    pub receipt_url: Option<String>,
    /// Order ID
    #[serde(default)]
    pub order_id: Option<String>,
    /// `success` or `pending`
    pub status: String,
}
