use async_trait::async_trait;

use staywatch_core::StaySubscription;
use staywatch_shared::AvailabilityEvent;

/// Strategy trait for matching availability events against subscriptions.
///
/// One implementation per subscription search type (property today, area
/// later); the orchestrator iterates every registered strategy without
/// knowing the concrete types, so new strategies slot in without touching
/// existing code.
#[async_trait]
pub trait MatchingStrategy: Send + Sync {
    /// Short strategy name used in logs.
    fn name(&self) -> &'static str;

    /// Cheap pre-filter. Strategies returning false are never asked to find
    /// matches for the event.
    fn supports(&self, event: &AvailabilityEvent) -> bool;

    /// Subscriptions satisfied by the given event.
    async fn find_matches(
        &self,
        event: &AvailabilityEvent,
    ) -> Result<Vec<StaySubscription>, Box<dyn std::error::Error + Send + Sync>>;
}
