use std::sync::Arc;

use chrono::Utc;
use futures_util::future::join_all;
use tracing::{debug, error, info};
use uuid::Uuid;

use staywatch_core::StaySubscription;
use staywatch_shared::{AvailabilityEvent, NotificationMessage};

use crate::publisher::NotificationPublisher;

/// Builds notification messages for matched subscriptions and hands them to
/// the notification publisher.
///
/// Called after the matching pipeline has identified the subscriptions an
/// availability event satisfies.
pub struct NotificationDispatcher {
    publisher: Arc<dyn NotificationPublisher>,
}

impl NotificationDispatcher {
    pub fn new(publisher: Arc<dyn NotificationPublisher>) -> Self {
        Self { publisher }
    }

    /// Build and publish one notification per matched subscription.
    ///
    /// Send outcomes are independent: a failed publish is logged with the
    /// notification and subscription ids and does not stop the remaining
    /// sends. The built messages are returned regardless of publish outcome.
    pub async fn dispatch(
        &self,
        matches: &[StaySubscription],
        event: &AvailabilityEvent,
    ) -> Vec<NotificationMessage> {
        if matches.is_empty() {
            debug!(
                "No matched subscriptions to dispatch for property_code={}",
                event.property_code
            );
            return Vec::new();
        }

        let messages: Vec<NotificationMessage> = matches
            .iter()
            .map(|sub| build_notification(sub, event))
            .collect();

        // All sends are started together; awaiting the batch keeps one slow
        // or failing send from serializing the others.
        let sends = messages.iter().map(|message| {
            let publisher = Arc::clone(&self.publisher);
            async move {
                let key = message.subscription_id.to_string();
                if let Err(e) = publisher.publish(&key, message).await {
                    error!(
                        "Failed to publish notification id={} for subscription_id={}: {}",
                        message.notification_id, message.subscription_id, e
                    );
                }
            }
        });
        join_all(sends).await;

        info!(
            "Dispatched {} notification(s) for property_code={} on date={}",
            messages.len(),
            event.property_code,
            event.stay_date
        );

        messages
    }
}

/// Build a single notification from a matched subscription and the
/// triggering availability event.
fn build_notification(
    subscription: &StaySubscription,
    event: &AvailabilityEvent,
) -> NotificationMessage {
    let nights = subscription.nights();

    let message = NotificationMessage {
        notification_id: Uuid::new_v4().to_string(),
        subscription_id: subscription.id,
        guest_id: subscription.guest_id.clone(),
        property_code: event.property_code.clone(),
        check_in_date: subscription.check_in_date,
        nights,
        message: format!(
            "Availability found at property {} for {} night(s) starting {}",
            event.property_code, nights, subscription.check_in_date
        ),
        timestamp: Utc::now(),
    };

    debug!(
        "Built notification id={} for subscription_id={}, guest_id={}",
        message.notification_id, message.subscription_id, message.guest_id
    );

    message
}
