use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, error, info};

use staywatch_core::StaySubscription;
use staywatch_notify::NotificationDispatcher;
use staywatch_shared::{AvailabilityEvent, NotificationMessage};

use crate::strategy::MatchingStrategy;

/// Coordinates the full event processing pipeline: runs every registered
/// matching strategy over an event, merges their results and hands the
/// matched subscriptions to the notification dispatcher.
pub struct MatchingOrchestrator {
    strategies: Vec<Arc<dyn MatchingStrategy>>,
    dispatcher: NotificationDispatcher,
}

impl MatchingOrchestrator {
    pub fn new(
        strategies: Vec<Arc<dyn MatchingStrategy>>,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            strategies,
            dispatcher,
        }
    }

    /// Process one availability event end to end.
    ///
    /// Returns the notifications built for it; an empty vec means no
    /// subscription matched, which is a normal outcome.
    pub async fn process(&self, event: &AvailabilityEvent) -> Vec<NotificationMessage> {
        info!(
            "Processing inventory event: property_code={}, date={}",
            event.property_code, event.stay_date
        );

        let mut seen: HashSet<i64> = HashSet::new();
        let mut matched: Vec<StaySubscription> = Vec::new();

        // Strategies run in registration order. Results are deduplicated by
        // subscription id so a subscription matched twice notifies once.
        for strategy in &self.strategies {
            if !strategy.supports(event) {
                continue;
            }

            match strategy.find_matches(event).await {
                Ok(matches) => {
                    debug!(
                        "Strategy {} found {} match(es) for property_code={}",
                        strategy.name(),
                        matches.len(),
                        event.property_code
                    );
                    for subscription in matches {
                        if seen.insert(subscription.id) {
                            matched.push(subscription);
                        }
                    }
                }
                Err(e) => {
                    // One failing strategy must not take the event down for
                    // the others.
                    error!(
                        "Strategy {} failed for property_code={}: {}",
                        strategy.name(),
                        event.property_code,
                        e
                    );
                }
            }
        }

        if matched.is_empty() {
            info!(
                "No matching subscriptions for property_code={} on date={}",
                event.property_code, event.stay_date
            );
            return Vec::new();
        }

        self.dispatcher.dispatch(&matched, event).await
    }
}
