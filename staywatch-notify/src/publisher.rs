use std::time::Duration;

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::util::Timeout;
use tracing::info;

use staywatch_shared::NotificationMessage;

/// Outbound seam for notification publishing.
///
/// The dispatcher only depends on this trait; production wires in the Kafka
/// producer below, tests substitute an in-memory recorder. Implementations
/// must be safe for concurrent use.
#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    async fn publish(
        &self,
        key: &str,
        message: &NotificationMessage,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Publishes notification messages to the notifications topic.
///
/// The subscription id is used as the message key so every notification for
/// the same subscription lands on the same partition, preserving their
/// delivery order.
pub struct KafkaNotificationProducer {
    producer: FutureProducer,
    topic: String,
}

impl KafkaNotificationProducer {
    pub fn new(brokers: &str, topic: &str) -> Result<Self, rdkafka::error::KafkaError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "5000")
            .create()?;

        Ok(Self {
            producer,
            topic: topic.to_string(),
        })
    }
}

#[async_trait]
impl NotificationPublisher for KafkaNotificationProducer {
    async fn publish(
        &self,
        key: &str,
        message: &NotificationMessage,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let payload = serde_json::to_string(message)?;

        let record = FutureRecord::to(&self.topic).key(key).payload(&payload);

        match self
            .producer
            .send(record, Timeout::After(Duration::from_secs(0)))
            .await
        {
            Ok(delivery) => {
                info!(
                    "Published notification id={} key={} to {}: partition {} offset {}",
                    message.notification_id, key, self.topic, delivery.partition, delivery.offset
                );
                Ok(())
            }
            Err((e, _msg)) => Err(Box::new(e)),
        }
    }
}
