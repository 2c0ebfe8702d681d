use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Notification record published to the notifications topic when a
/// subscription matches newly announced availability.
///
/// Consumed downstream by the guest delivery service. Built once per match,
/// never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationMessage {
    /// Unique notification identifier (UUID v4 text).
    pub notification_id: String,

    /// Matched subscription id.
    pub subscription_id: i64,

    /// Guest the subscription belongs to.
    pub guest_id: String,

    /// Hotel property code (e.g. "FNLCO").
    pub property_code: String,

    /// Check-in date the guest subscribed for.
    pub check_in_date: NaiveDate,

    /// Number of nights the guest wants.
    pub nights: i64,

    /// Human-readable notification text.
    pub message: String,

    /// Creation timestamp.
    pub timestamp: DateTime<Utc>,
}
