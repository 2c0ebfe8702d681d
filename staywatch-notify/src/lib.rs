pub mod dispatch;
pub mod publisher;

pub use dispatch::NotificationDispatcher;
pub use publisher::{KafkaNotificationProducer, NotificationPublisher};
