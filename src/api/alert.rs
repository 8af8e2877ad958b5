//! Alert service: webhook delivery history.

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::client::ClientInner;
use crate::models::serde_helpers::optional_datetime;
use crate::models::WebhookHistory;
use crate::Result;

/// Page size used when none is given.
pub const DEFAULT_ALERTS_PER_PAGE: u32 = 10;

/// Service for the Alert API family.
pub struct AlertService {
    inner: Arc<ClientInner>,
}

/// Query for past webhook alerts.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookHistoryQuery {
    page: u32,
    alerts_per_page: u32,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "optional_datetime"
    )]
    query_head: Option<NaiveDateTime>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "optional_datetime"
    )]
    query_tail: Option<NaiveDateTime>,
}

impl Default for WebhookHistoryQuery {
    fn default() -> Self {
        Self {
            page: 1,
            alerts_per_page: DEFAULT_ALERTS_PER_PAGE,
            query_head: None,
            query_tail: None,
        }
    }
}

impl WebhookHistoryQuery {
    /// Page number, starting at 1.
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Page size.
    pub fn alerts_per_page(mut self, count: u32) -> Self {
        self.alerts_per_page = if count == 0 { DEFAULT_ALERTS_PER_PAGE } else { count };
        self
    }

    /// Only alerts created at or after `head`.
    pub fn since(mut self, head: NaiveDateTime) -> Self {
        self.query_head = Some(head);
        self
    }

    /// Only alerts created at or before `tail`.
    pub fn until(mut self, tail: NaiveDateTime) -> Self {
        self.query_tail = Some(tail);
        self
    }
}

impl AlertService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Fetch a page of past webhook alerts.
    pub async fn webhook_history(&self, query: &WebhookHistoryQuery) -> Result<WebhookHistory> {
        self.inner.post("/2.0/alert/webhooks", query).await
    }
}
