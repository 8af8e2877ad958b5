//! Subscription service: plans, subscribers, modifiers and payments.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::client::ClientInner;
use crate::models::{
    CreatedModifier, CreatedPlan, Modifier, ModifierId, NewModifier, NewPlan, OneOffCharge,
    Payment, PaymentId, Plan, ProductId, SubscriptionId, SubscriptionState, SubscriptionUser,
    UpdatedSubscription, UserUpdate,
};
use crate::Result;

/// Largest page size the users endpoint accepts.
pub const MAX_RESULTS_PER_PAGE: u32 = 200;

/// Service for the Subscription API family.
///
/// # Example
///
/// ```no_run
/// use paddle_rs::api::UsersQuery;
/// use paddle_rs::models::SubscriptionState;
/// use paddle_rs::ProductId;
///
/// # async fn example(client: paddle_rs::PaddleClient) -> paddle_rs::Result<()> {
/// let query = UsersQuery::default()
///     .plan(ProductId::new(9092))
///     .state(SubscriptionState::Active)
///     .results_per_page(50);
///
/// for user in client.subscription().list_users(&query).await? {
///     println!("{} -> {:?}", user.user_email, user.next_payment);
/// }
/// # Ok(())
/// # }
/// ```
pub struct SubscriptionService {
    inner: Arc<ClientInner>,
}

/// Filters for listing subscribers.
///
/// Paging is always sent, starting at page 1 with one result per page.
/// Out-of-range paging values are coerced rather than rejected: a page
/// below 1 becomes 1, and a page size outside `1..=200` becomes 1.
#[derive(Debug, Clone, Serialize)]
pub struct UsersQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    subscription_id: Option<SubscriptionId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    plan_id: Option<ProductId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<SubscriptionState>,
    page: u32,
    results_per_page: u32,
}

impl Default for UsersQuery {
    fn default() -> Self {
        Self {
            subscription_id: None,
            plan_id: None,
            state: None,
            page: 1,
            results_per_page: 1,
        }
    }
}

impl UsersQuery {
    /// Only this subscription.
    pub fn subscription(mut self, id: SubscriptionId) -> Self {
        self.subscription_id = Some(id);
        self
    }

    /// Only subscribers of this plan.
    pub fn plan(mut self, id: ProductId) -> Self {
        self.plan_id = Some(id);
        self
    }

    /// Only subscriptions in this state.
    pub fn state(mut self, state: SubscriptionState) -> Self {
        self.state = Some(state);
        self
    }

    /// Page number, starting at 1.
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Page size, at most 200.
    pub fn results_per_page(mut self, count: u32) -> Self {
        self.results_per_page = if (1..=MAX_RESULTS_PER_PAGE).contains(&count) {
            count
        } else {
            1
        };
        self
    }
}

/// Filters for listing subscription payments.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PaymentsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    subscription_id: Option<SubscriptionId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    plan: Option<ProductId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_paid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_one_off_charge: Option<bool>,
}

impl PaymentsQuery {
    /// Only payments of this subscription.
    pub fn subscription(mut self, id: SubscriptionId) -> Self {
        self.subscription_id = Some(id);
        self
    }

    /// Only payments of this plan.
    pub fn plan(mut self, id: ProductId) -> Self {
        self.plan = Some(id);
        self
    }

    /// Only collected (`true`) or upcoming (`false`) payments.
    pub fn paid(mut self, paid: bool) -> Self {
        self.is_paid = Some(paid);
        self
    }

    /// Only payments dated within `from..=to`.
    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    /// Only one-off charges (`true`) or only regular payments (`false`).
    pub fn one_off_charges(mut self, one_off: bool) -> Self {
        self.is_one_off_charge = Some(one_off);
        self
    }
}

impl SubscriptionService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List plans, or fetch a single plan.
    pub async fn list_plans(&self, plan_id: Option<ProductId>) -> Result<Vec<Plan>> {
        #[derive(Serialize)]
        struct Params {
            #[serde(skip_serializing_if = "Option::is_none")]
            plan: Option<ProductId>,
        }

        self.inner
            .post("/2.0/subscription/plans", &Params { plan: plan_id })
            .await
    }

    /// Create a plan.
    pub async fn create_plan(&self, plan: &NewPlan) -> Result<CreatedPlan> {
        self.inner
            .post("/2.0/subscription/plans_create", plan)
            .await
    }

    /// List subscribers.
    pub async fn list_users(&self, query: &UsersQuery) -> Result<Vec<SubscriptionUser>> {
        self.inner.post("/2.0/subscription/users", query).await
    }

    /// Change a subscription's plan, quantity, price or pause state.
    pub async fn update_user(&self, update: &UserUpdate) -> Result<UpdatedSubscription> {
        self.inner
            .post("/2.0/subscription/users/update", update)
            .await
    }

    /// Cancel a subscription.
    pub async fn cancel_user(&self, subscription_id: SubscriptionId) -> Result<()> {
        #[derive(Serialize)]
        struct Params {
            subscription_id: SubscriptionId,
        }

        let _: Value = self
            .inner
            .post(
                "/2.0/subscription/users_cancel",
                &Params { subscription_id },
            )
            .await?;
        Ok(())
    }

    /// List modifiers, optionally for one subscription or plan.
    pub async fn list_modifiers(
        &self,
        subscription_id: Option<SubscriptionId>,
        plan_id: Option<ProductId>,
    ) -> Result<Vec<Modifier>> {
        #[derive(Serialize)]
        struct Params {
            #[serde(skip_serializing_if = "Option::is_none")]
            subscription_id: Option<SubscriptionId>,
            #[serde(skip_serializing_if = "Option::is_none")]
            plan_id: Option<ProductId>,
        }

        self.inner
            .post(
                "/2.0/subscription/modifiers",
                &Params {
                    subscription_id,
                    plan_id,
                },
            )
            .await
    }

    /// Add a modifier to a subscription.
    pub async fn create_modifier(&self, modifier: &NewModifier) -> Result<CreatedModifier> {
        self.inner
            .post("/2.0/subscription/modifiers/create", modifier)
            .await
    }

    /// Remove a modifier.
    pub async fn delete_modifier(&self, modifier_id: ModifierId) -> Result<()> {
        #[derive(Serialize)]
        struct Params {
            modifier_id: ModifierId,
        }

        let _: Value = self
            .inner
            .post("/2.0/subscription/modifiers/delete", &Params { modifier_id })
            .await?;
        Ok(())
    }

    /// List past and upcoming payments.
    pub async fn list_payments(&self, query: &PaymentsQuery) -> Result<Vec<Payment>> {
        self.inner.post("/2.0/subscription/payments", query).await
    }

    /// Move an upcoming payment to another date.
    pub async fn reschedule_payment(&self, payment_id: PaymentId, date: NaiveDate) -> Result<()> {
        #[derive(Serialize)]
        struct Params {
            payment_id: PaymentId,
            date: NaiveDate,
        }

        let _: Value = self
            .inner
            .post(
                "/2.0/subscription/payments_reschedule",
                &Params { payment_id, date },
            )
            .await?;
        Ok(())
    }

    /// Charge a subscriber immediately, outside the billing cycle.
    pub async fn create_one_off_charge(
        &self,
        subscription_id: SubscriptionId,
        amount: Decimal,
        charge_name: &str,
    ) -> Result<OneOffCharge> {
        #[derive(Serialize)]
        struct Params<'a> {
            amount: Decimal,
            charge_name: &'a str,
        }

        let path = format!("/2.0/subscription/{subscription_id}/charge");
        self.inner
            .post(
                &path,
                &Params {
                    amount,
                    charge_name,
                },
            )
            .await
    }
}
