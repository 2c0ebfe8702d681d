use std::sync::Arc;

use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::message::Message;
use tracing::{error, info, warn};

use staywatch_matching::MatchingOrchestrator;
use staywatch_shared::{AvailabilityEvent, EventValidationError, InventoryEvent};

/// Decode failures for raw records from the inventory topic.
#[derive(Debug, thiserror::Error)]
pub enum EventDecodeError {
    #[error("empty payload")]
    EmptyPayload,

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("event has no value wrapper")]
    MissingValue,

    #[error("event value has no body")]
    MissingBody,

    #[error(transparent)]
    Validation(#[from] EventValidationError),
}

/// Decode and validate one raw record payload into an availability event.
///
/// This is the whole boundary guard: anything that fails here is dropped by
/// the listener and never reaches the matching pipeline.
pub fn decode_event(payload: &[u8]) -> Result<AvailabilityEvent, EventDecodeError> {
    if payload.is_empty() {
        return Err(EventDecodeError::EmptyPayload);
    }

    let event: InventoryEvent = serde_json::from_slice(payload)?;
    let value = event.value.ok_or(EventDecodeError::MissingValue)?;
    let body = value.body.ok_or(EventDecodeError::MissingBody)?;

    Ok(AvailabilityEvent::try_from(body)?)
}

/// Consume the inventory availability topic and feed each valid event to
/// the matching orchestrator. Malformed records are logged and dropped.
pub async fn run_inventory_listener(
    brokers: &str,
    group_id: &str,
    topic: &str,
    orchestrator: Arc<MatchingOrchestrator>,
) {
    let consumer: StreamConsumer = ClientConfig::new()
        .set("bootstrap.servers", brokers)
        .set("group.id", group_id)
        .set("enable.auto.commit", "true")
        .set("auto.offset.reset", "earliest")
        .create()
        .expect("Consumer creation failed");

    consumer.subscribe(&[topic]).expect("Can't subscribe");

    info!("Inventory listener started, consuming from {}", topic);

    loop {
        match consumer.recv().await {
            Err(e) => error!("Kafka error: {}", e),
            Ok(m) => match decode_event(m.payload().unwrap_or_default()) {
                Ok(event) => {
                    info!(
                        "Received inventory event: property_code={}, date={}, partition={}, offset={}",
                        event.property_code,
                        event.stay_date,
                        m.partition(),
                        m.offset()
                    );
                    orchestrator.process(&event).await;
                }
                Err(e) => {
                    warn!(
                        "Dropping malformed inventory event at partition={}, offset={}: {}",
                        m.partition(),
                        m.offset(),
                        e
                    );
                }
            },
        }
    }
}
