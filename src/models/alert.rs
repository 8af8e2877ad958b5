//! Alert API models: webhook delivery history.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One page of past webhook alerts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookHistory {
    /// Page returned
    pub current_page: u32,
    /// Number of pages available
    pub total_pages: u32,
    /// Page size
    pub alerts_per_page: u32,
    /// Number of alerts matching the query
    pub total_alerts: u64,
    /// Earliest alert time covered by the query
    #[serde(default)]
    pub query_head: Option<String>,
    /// The alerts
    #[serde(default)]
    pub data: Vec<WebhookAlert>,
}

impl WebhookHistory {
    /// Whether a later page exists.
    pub fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// A single webhook alert and its delivery status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookAlert {
    /// Alert ID
    pub id: u64,
    /// Alert type, e.g. `payment_succeeded`
    pub alert_name: String,
    /// Delivery status
    pub status: String,
    /// When the alert was created
    pub created_at: String,
    /// When the alert was last attempted
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Number of delivery attempts
    #[serde(default)]
    pub attempts: u32,
    /// Alert payload; its shape depends on `alert_name`
    #[serde(default)]
    pub fields: Map<String, Value>,
}
