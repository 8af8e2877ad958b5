//! Subscription management example.
//!
//! Lists plans and their active subscribers, shows upcoming payments and
//! recent webhook alerts.
//!
//! Run with:
//! PADDLE_VENDOR_ID=... PADDLE_VENDOR_AUTH_CODE=... PADDLE_SANDBOX=1 \
//!     cargo run --example subscriptions

use paddle_rs::api::{PaymentsQuery, UsersQuery, WebhookHistoryQuery};
use paddle_rs::models::SubscriptionState;
use paddle_rs::{PaddleClient, ProductId, SubscriptionId};

#[tokio::main]
async fn main() -> paddle_rs::Result<()> {
    tracing_subscriber::fmt::init();

    let client = PaddleClient::from_env()?;
    let subscriptions = client.subscription();

    let plans = subscriptions.list_plans(None).await?;
    println!("Found {} plan(s):", plans.len());

    for plan in &plans {
        println!(
            "  - {} [{}] every {} {:?}, recurring {:?}",
            plan.name, plan.id, plan.billing_period, plan.billing_type, plan.recurring_price
        );

        let query = UsersQuery::default()
            .plan(ProductId::new(plan.id))
            .state(SubscriptionState::Active)
            .results_per_page(20);
        for user in subscriptions.list_users(&query).await? {
            println!("      {} since {}", user.user_email, user.signup_date);

            let upcoming = subscriptions
                .list_payments(
                    &PaymentsQuery::default()
                        .subscription(SubscriptionId::new(user.subscription_id))
                        .paid(false),
                )
                .await?;
            if let Some(next) = upcoming.first() {
                println!("        next: {} {} on {}", next.amount, next.currency, next.payout_date);
            }
        }
    }

    let history = client
        .alert()
        .webhook_history(&WebhookHistoryQuery::default().alerts_per_page(5))
        .await?;
    println!("\nLatest {} of {} alert(s):", history.data.len(), history.total_alerts);
    for alert in history.data {
        println!("  - {} {} ({})", alert.created_at, alert.alert_name, alert.status);
    }

    Ok(())
}
