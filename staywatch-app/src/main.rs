use std::sync::Arc;

use staywatch_app::listener::run_inventory_listener;
use staywatch_matching::{MatchingOrchestrator, MatchingStrategy, PropertyMatchingStrategy};
use staywatch_notify::{KafkaNotificationProducer, NotificationDispatcher};
use staywatch_store::{
    app_config::Config, DbClient, PostgresPropertyRepository, PostgresStaySubscriptionRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "staywatch=debug,rdkafka=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().expect("Failed to load config");
    tracing::info!(
        "Starting staywatch: {} -> {}",
        config.kafka.inventory_topic,
        config.kafka.notifications_topic
    );

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");

    let properties = Arc::new(PostgresPropertyRepository {
        pool: db.pool.clone(),
    });
    let subscriptions = Arc::new(PostgresStaySubscriptionRepository {
        pool: db.pool.clone(),
    });

    let producer =
        KafkaNotificationProducer::new(&config.kafka.brokers, &config.kafka.notifications_topic)
            .expect("Failed to create Kafka producer");
    let dispatcher = NotificationDispatcher::new(Arc::new(producer));

    let strategies: Vec<Arc<dyn MatchingStrategy>> = vec![Arc::new(
        PropertyMatchingStrategy::new(properties, subscriptions),
    )];
    let orchestrator = Arc::new(MatchingOrchestrator::new(strategies, dispatcher));

    run_inventory_listener(
        &config.kafka.brokers,
        &config.kafka.group_id,
        &config.kafka.inventory_topic,
        orchestrator,
    )
    .await;
}
