//! Pay link example.
//!
//! Generates a checkout link for a custom one-off item and a coupon buyers
//! can apply to it.
//!
//! Run with:
//! PADDLE_VENDOR_ID=... PADDLE_VENDOR_AUTH_CODE=... PADDLE_SANDBOX=1 \
//!     cargo run --example pay_link

use paddle_rs::models::{
    CouponType, Currency, DiscountType, NewCouponBuilder, PayLinkBuilder, Price,
};
use paddle_rs::PaddleClient;
use rust_decimal_macros::dec;

#[tokio::main]
async fn main() -> paddle_rs::Result<()> {
    tracing_subscriber::fmt::init();

    let client = PaddleClient::from_env()?;

    let coupon = NewCouponBuilder::new(CouponType::Checkout, DiscountType::Percentage, dec!(10))
        .description("Ten percent off any checkout")
        .coupon_prefix("DEMO")
        .num_coupons(1)
        .allowed_uses(5)
        .build()?;
    let created = client.product().create_coupon(&coupon).await?;
    println!("Created coupon(s): {}", created.coupon_code.join(", "));

    let mut link = PayLinkBuilder::custom("Consulting hour", "https://example.com/paddle/webhook")
        .price(Price::new(Currency::Usd, dec!(150.00)))
        .price(Price::new(Currency::Eur, dec!(140.00)))
        .quantity_variable(false)
        .custom_message("One hour of remote consulting")
        .return_url("https://example.com/thanks?checkout={checkout_hash}")
        .passthrough(r#"{"customer":"demo"}"#);
    if let Some(code) = created.coupon_code.first() {
        link = link.coupon_code(code.clone());
    }

    let url = client.product().generate_pay_link(&link.build()?).await?;
    println!("Checkout URL: {}", url.url);

    Ok(())
}
