use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use staywatch_core::{PropertyRepository, StaySubscription, StaySubscriptionRepository};
use staywatch_shared::AvailabilityEvent;

use crate::los;
use crate::strategy::MatchingStrategy;

/// Matching strategy for PROPERTY-type subscriptions.
///
/// Resolves the event's property code to a property id, queries active
/// PROPERTY subscriptions for that property and check-in date, then keeps
/// the candidates whose requested stay length the event's offers satisfy.
pub struct PropertyMatchingStrategy {
    properties: Arc<dyn PropertyRepository>,
    subscriptions: Arc<dyn StaySubscriptionRepository>,
}

impl PropertyMatchingStrategy {
    pub fn new(
        properties: Arc<dyn PropertyRepository>,
        subscriptions: Arc<dyn StaySubscriptionRepository>,
    ) -> Self {
        Self {
            properties,
            subscriptions,
        }
    }
}

#[async_trait]
impl MatchingStrategy for PropertyMatchingStrategy {
    fn name(&self) -> &'static str {
        "property"
    }

    fn supports(&self, event: &AvailabilityEvent) -> bool {
        // Handles every event that names a property; the area strategy will
        // sit alongside this one later.
        !event.property_code.is_empty()
    }

    async fn find_matches(
        &self,
        event: &AvailabilityEvent,
    ) -> Result<Vec<StaySubscription>, Box<dyn std::error::Error + Send + Sync>> {
        // Step 1: resolve property code → property id. An unknown code is a
        // normal outcome (the property is not registered yet).
        let Some(property) = self
            .properties
            .find_by_property_code(&event.property_code)
            .await?
        else {
            debug!(
                "No property found for property_code={}, skipping",
                event.property_code
            );
            return Ok(Vec::new());
        };

        // Step 2: active PROPERTY subscriptions for this property + date.
        let candidates = self
            .subscriptions
            .find_active_property_subscriptions(property.property_id, event.stay_date)
            .await?;

        if candidates.is_empty() {
            debug!(
                "No active subscriptions for property_id={} on date={}",
                property.property_id, event.stay_date
            );
            return Ok(Vec::new());
        }

        // Step 3: keep candidates whose stay length the offers can satisfy.
        let candidate_count = candidates.len();
        let matched: Vec<StaySubscription> = candidates
            .into_iter()
            .filter(|sub| {
                let nights = sub.nights();
                let available = los::is_available_for_nights(&event.room_offers, nights);
                if !available {
                    debug!(
                        "Subscription id={} wants {} nights but not available at property_code={}",
                        sub.id, nights, event.property_code
                    );
                }
                available
            })
            .collect();

        info!(
            "Matched {} subscription(s) for property_code={} on date={} (out of {} candidates)",
            matched.len(),
            event.property_code,
            event.stay_date,
            candidate_count
        );

        Ok(matched)
    }
}
