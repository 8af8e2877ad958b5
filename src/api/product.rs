//! Product service: coupons, products, licenses, pay links, transactions
//! and refunds.

use std::sync::Arc;

use chrono::NaiveDate;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::client::ClientInner;
use crate::models::{
    Coupon, CouponUpdate, CreatedCoupons, License, NewCoupon, OrderId, PayLink, PayLinkUrl,
    ProductId, ProductList, RefundRequest, Transaction, TransactionEntity, UpdatedCoupons,
};
use crate::{Error, Result};

/// Bytes left unescaped when an entity ID is placed in a URL path.
const ID_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

/// Escape `id` into a single path segment.
///
/// Empty and dot-only IDs are refused: URL parsing treats the latter
/// (escaped or not) as `.`/`..` segments.
fn id_segment(id: &str) -> Result<String> {
    if id.chars().all(|c| c == '.') {
        return Err(Error::InvalidInput(format!("Invalid entity id: {id:?}")));
    }
    Ok(utf8_percent_encode(id, ID_SEGMENT).to_string())
}

/// Service for the Product API family.
///
/// All calls are vendor-authenticated POSTs.
///
/// # Example
///
/// ```no_run
/// use paddle_rs::models::{CouponType, Currency, DiscountType, NewCouponBuilder};
/// use paddle_rs::ProductId;
/// use rust_decimal_macros::dec;
///
/// # async fn example(client: paddle_rs::PaddleClient) -> paddle_rs::Result<()> {
/// let coupon = NewCouponBuilder::new(CouponType::Product, DiscountType::Percentage, dec!(20))
///     .product(ProductId::new(12345))
///     .coupon_prefix("LAUNCH")
///     .num_coupons(5)
///     .build()?;
///
/// let created = client.product().create_coupon(&coupon).await?;
/// println!("Created: {:?}", created.coupon_code);
/// # Ok(())
/// # }
/// ```
pub struct ProductService {
    inner: Arc<ClientInner>,
}

impl ProductService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List the coupons valid for a product.
    pub async fn list_coupons(&self, product_id: ProductId) -> Result<Vec<Coupon>> {
        #[derive(Serialize)]
        struct Params {
            product_id: ProductId,
        }

        self.inner
            .post("/2.0/product/list_coupons", &Params { product_id })
            .await
    }

    /// Create one or more coupons.
    pub async fn create_coupon(&self, coupon: &NewCoupon) -> Result<CreatedCoupons> {
        self.inner.post("/2.1/product/create_coupon", coupon).await
    }

    /// Delete a coupon, optionally only for one product.
    pub async fn delete_coupon(
        &self,
        coupon_code: &str,
        product_id: Option<ProductId>,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct Params<'a> {
            coupon_code: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            product_id: Option<ProductId>,
        }

        let _: Value = self
            .inner
            .post(
                "/2.0/product/delete_coupon",
                &Params {
                    coupon_code,
                    product_id,
                },
            )
            .await?;
        Ok(())
    }

    /// Update a coupon or a coupon group.
    pub async fn update_coupon(&self, update: &CouponUpdate) -> Result<UpdatedCoupons> {
        self.inner.post("/2.1/product/update_coupon", update).await
    }

    /// List published one-time products.
    pub async fn list_products(&self) -> Result<ProductList> {
        self.inner.post("/2.0/product/get_products", &()).await
    }

    /// Generate a license for a Paddle-framework product.
    pub async fn generate_license(
        &self,
        product_id: ProductId,
        allowed_uses: u32,
        expires_at: Option<NaiveDate>,
    ) -> Result<License> {
        #[derive(Serialize)]
        struct Params {
            product_id: ProductId,
            allowed_uses: u32,
            #[serde(skip_serializing_if = "Option::is_none")]
            expires_at: Option<NaiveDate>,
        }

        self.inner
            .post(
                "/2.0/product/generate_license",
                &Params {
                    product_id,
                    allowed_uses,
                    expires_at,
                },
            )
            .await
    }

    /// Generate a checkout link for a product or a custom one-off item.
    pub async fn generate_pay_link(&self, link: &PayLink) -> Result<PayLinkUrl> {
        self.inner
            .post("/2.0/product/generate_pay_link", link)
            .await
    }

    /// List transactions for a user, subscription, order, checkout or
    /// product. Pages are numbered from 1; `None` requests the first page.
    pub async fn list_transactions(
        &self,
        entity: TransactionEntity,
        id: &str,
        page: Option<u32>,
    ) -> Result<Vec<Transaction>> {
        #[derive(Serialize)]
        struct Params {
            page: u32,
        }

        let id = id_segment(id)?;
        let path = format!("/2.0/{entity}/{id}/transactions");
        let page = page.filter(|p| *p >= 1).unwrap_or(1);

        self.inner.post(&path, &Params { page }).await
    }

    /// Request a full or partial refund of an order.
    ///
    /// `amount` of `None` refunds the whole order.
    pub async fn refund_payment(
        &self,
        order_id: &OrderId,
        amount: Option<Decimal>,
        reason: Option<&str>,
    ) -> Result<RefundRequest> {
        #[derive(Serialize)]
        struct Params<'a> {
            order_id: &'a OrderId,
            #[serde(skip_serializing_if = "Option::is_none")]
            amount: Option<Decimal>,
            #[serde(skip_serializing_if = "Option::is_none")]
            reason: Option<&'a str>,
        }

        self.inner
            .post(
                "/2.0/payment/refund",
                &Params {
                    order_id,
                    amount,
                    reason,
                },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_segment_keeps_plain_ids() {
        assert_eq!(id_segment("1042907-384786").unwrap(), "1042907-384786");
        assert_eq!(id_segment("chk_01").unwrap(), "chk_01");
    }

    #[test]
    fn test_id_segment_escapes_separators() {
        assert_eq!(
            id_segment("1/../../payment/refund?").unwrap(),
            "1%2F%2E%2E%2F%2E%2E%2Fpayment%2Frefund%3F"
        );
        assert_eq!(id_segment("a#b%c").unwrap(), "a%23b%25c");
    }

    #[test]
    fn test_id_segment_rejects_dot_segments() {
        for id in ["", ".", ".."] {
            assert!(matches!(id_segment(id), Err(Error::InvalidInput(_))));
        }
    }
}
