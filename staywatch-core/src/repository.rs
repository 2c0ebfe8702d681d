use async_trait::async_trait;
use chrono::NaiveDate;

use crate::entity::{Property, StaySubscription};

/// Repository trait for property lookups.
///
/// Resolves the property code carried by inventory events to the property
/// row that subscriptions reference. "Not found" is a normal outcome.
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn find_by_property_code(
        &self,
        property_code: &str,
    ) -> Result<Option<Property>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for guest stay subscription queries.
#[async_trait]
pub trait StaySubscriptionRepository: Send + Sync {
    /// Active PROPERTY subscriptions for a property and check-in date.
    ///
    /// Length-of-stay filtering is the caller's responsibility; this only
    /// narrows by property, date, status and search type.
    async fn find_active_property_subscriptions(
        &self,
        property_id: i64,
        check_in_date: NaiveDate,
    ) -> Result<Vec<StaySubscription>, Box<dyn std::error::Error + Send + Sync>>;
}
