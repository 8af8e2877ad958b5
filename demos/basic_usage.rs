//! Basic usage example.
//!
//! Builds a client from the environment, looks up localised prices without
//! credentials, then lists products and coupons with them.
//!
//! Run with:
//! PADDLE_VENDOR_ID=... PADDLE_VENDOR_AUTH_CODE=... PADDLE_SANDBOX=1 \
//!     cargo run --example basic_usage

use paddle_rs::api::PricesQuery;
use paddle_rs::{ClientConfig, PaddleClient, ProductId};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> paddle_rs::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Public checkout endpoints work without credentials
    let public = PaddleClient::unauthenticated(ClientConfig::from_env()?)?;
    println!("Connecting to Paddle ({})...", public.environment());

    let client = PaddleClient::from_env()?;
    if !client.is_authenticated() {
        println!("PADDLE_VENDOR_ID and PADDLE_VENDOR_AUTH_CODE are required for vendor calls");
        return Ok(());
    }

    let products = client.product().list_products().await?;
    println!("\nFound {} product(s):", products.total);

    for product in &products.products {
        println!(
            "  - {} [{}] {} {}",
            product.name, product.id, product.base_price, product.currency
        );

        let coupons = client
            .product()
            .list_coupons(ProductId::new(product.id))
            .await?;
        for coupon in coupons {
            println!(
                "      coupon {} ({:?} {}), used {}/{}",
                coupon.coupon,
                coupon.discount_type,
                coupon.discount_amount,
                coupon.times_used,
                coupon.allowed_uses
            );
        }
    }

    if let Some(first) = products.products.first() {
        let prices = public
            .checkout()
            .prices(&PricesQuery::new([ProductId::new(first.id)]).customer_country("GB"))
            .await?;
        for price in prices.products {
            println!(
                "\n{} in {}: {} gross ({} tax)",
                price.product_title, prices.customer_country, price.price.gross, price.price.tax
            );
        }
    }

    println!("\nDone!");
    Ok(())
}
