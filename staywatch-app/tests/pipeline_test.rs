//! End-to-end pipeline tests: raw event payload → decode → matching →
//! notification dispatch, with in-memory repositories and publisher standing
//! in for Postgres and Kafka.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use staywatch_app::listener::decode_event;
use staywatch_core::{
    Property, PropertyRepository, StaySubscription, StaySubscriptionRepository,
    SubscriptionSearchType, SubscriptionStatus,
};
use staywatch_matching::{MatchingOrchestrator, MatchingStrategy, PropertyMatchingStrategy};
use staywatch_notify::{NotificationDispatcher, NotificationPublisher};
use staywatch_shared::NotificationMessage;

struct InMemoryPropertyRepository {
    properties: Vec<Property>,
}

#[async_trait]
impl PropertyRepository for InMemoryPropertyRepository {
    async fn find_by_property_code(
        &self,
        property_code: &str,
    ) -> Result<Option<Property>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self
            .properties
            .iter()
            .find(|p| p.prop_code.as_deref() == Some(property_code))
            .cloned())
    }
}

struct InMemorySubscriptionRepository {
    subscriptions: Vec<StaySubscription>,
    queries: AtomicUsize,
}

#[async_trait]
impl StaySubscriptionRepository for InMemorySubscriptionRepository {
    async fn find_active_property_subscriptions(
        &self,
        property_id: i64,
        check_in_date: NaiveDate,
    ) -> Result<Vec<StaySubscription>, Box<dyn std::error::Error + Send + Sync>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .subscriptions
            .iter()
            .filter(|s| {
                s.property_id == Some(property_id)
                    && s.check_in_date == check_in_date
                    && s.is_active()
                    && s.is_property_subscription()
            })
            .cloned()
            .collect())
    }
}

struct CapturingPublisher {
    sent: Mutex<Vec<(String, NotificationMessage)>>,
}

#[async_trait]
impl NotificationPublisher for CapturingPublisher {
    async fn publish(
        &self,
        key: &str,
        message: &NotificationMessage,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.sent
            .lock()
            .unwrap()
            .push((key.to_string(), message.clone()));
        Ok(())
    }
}

fn test_property() -> Property {
    Property {
        property_id: 1,
        title: "Test Hotel".into(),
        ctyhocn: "FNLCOHF".into(),
        brand: Some("HF".into()),
        prop_code: Some("FNLCO".into()),
        latitude: Some(40.0),
        longitude: Some(-74.0),
    }
}

fn test_subscription() -> StaySubscription {
    // 3 nights starting 2026-03-09
    StaySubscription {
        id: 100,
        guest_id: "guest-123".into(),
        search_type: SubscriptionSearchType::Property,
        property_id: Some(1),
        search_area: None,
        search_radius_km: None,
        search_latitude: None,
        search_longitude: None,
        check_in_date: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
        check_out_date: NaiveDate::from_ymd_opt(2026, 3, 12).unwrap(),
        max_price_per_night: 200.0,
        currency_code: "USD".into(),
        num_adults: 2,
        num_children: None,
        num_rooms: 1,
        status: SubscriptionStatus::Active,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

struct Pipeline {
    orchestrator: MatchingOrchestrator,
    publisher: Arc<CapturingPublisher>,
    subscriptions: Arc<InMemorySubscriptionRepository>,
}

fn pipeline(properties: Vec<Property>, subscriptions: Vec<StaySubscription>) -> Pipeline {
    let property_repo = Arc::new(InMemoryPropertyRepository { properties });
    let subscription_repo = Arc::new(InMemorySubscriptionRepository {
        subscriptions,
        queries: AtomicUsize::new(0),
    });
    let publisher = Arc::new(CapturingPublisher {
        sent: Mutex::new(Vec::new()),
    });

    let strategies: Vec<Arc<dyn MatchingStrategy>> = vec![Arc::new(
        PropertyMatchingStrategy::new(property_repo, subscription_repo.clone()),
    )];
    let orchestrator = MatchingOrchestrator::new(
        strategies,
        NotificationDispatcher::new(publisher.clone()),
    );

    Pipeline {
        orchestrator,
        publisher,
        subscriptions: subscription_repo,
    }
}

fn inventory_payload(pattern: &str) -> Vec<u8> {
    format!(
        r#"{{
            "key": "FNLCO::NG7BCD",
            "value": {{
                "context": {{ "publisher": "inventory-service", "messageId": "m-1" }},
                "body": {{
                    "recommendationId": 1,
                    "propertyCode": "FNLCO",
                    "stayDate": "2026-03-09",
                    "endDate": "2026-03-09",
                    "ratePlanCode": "NG7BCD",
                    "roomOffers": [
                        {{ "roomTypeCode": "KING", "losPattern": ["{pattern}"] }}
                    ]
                }}
            }}
        }}"#
    )
    .into_bytes()
}

#[tokio::test]
async fn matching_event_produces_exactly_one_notification() {
    let pipeline = pipeline(vec![test_property()], vec![test_subscription()]);

    let event = decode_event(&inventory_payload("YYYNNNN")).unwrap();
    let result = pipeline.orchestrator.process(&event).await;

    assert_eq!(result.len(), 1);
    let msg = &result[0];
    assert_eq!(msg.subscription_id, 100);
    assert_eq!(msg.guest_id, "guest-123");
    assert_eq!(msg.property_code, "FNLCO");
    assert_eq!(msg.nights, 3);
    assert_eq!(
        msg.check_in_date,
        NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()
    );
    assert!(msg.message.contains("FNLCO"));
    assert!(msg.message.contains("3 night(s)"));

    let sent = pipeline.publisher.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "100", "keyed by subscription id");
}

#[tokio::test]
async fn one_night_only_pattern_matches_nothing() {
    let pipeline = pipeline(vec![test_property()], vec![test_subscription()]);

    let event = decode_event(&inventory_payload("YNNNNNN")).unwrap();
    let result = pipeline.orchestrator.process(&event).await;

    assert!(result.is_empty());
    assert!(pipeline.publisher.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_property_emits_nothing_and_never_queries_subscriptions() {
    let pipeline = pipeline(Vec::new(), vec![test_subscription()]);

    let event = decode_event(&inventory_payload("YYYNNNN")).unwrap();
    let result = pipeline.orchestrator.process(&event).await;

    assert!(result.is_empty());
    assert_eq!(pipeline.subscriptions.queries.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn notifications_for_distinct_subscriptions_get_distinct_ids() {
    let mut second = test_subscription();
    second.id = 101;
    second.guest_id = "guest-456".into();
    second.check_out_date = NaiveDate::from_ymd_opt(2026, 3, 11).unwrap(); // 2 nights

    let pipeline = pipeline(vec![test_property()], vec![test_subscription(), second]);

    let event = decode_event(&inventory_payload("YYYNNNN")).unwrap();
    let result = pipeline.orchestrator.process(&event).await;

    assert_eq!(result.len(), 2);
    assert_ne!(result[0].notification_id, result[1].notification_id);
}

#[tokio::test]
async fn reprocessing_the_same_event_matches_the_same_subscriptions() {
    let pipeline = pipeline(vec![test_property()], vec![test_subscription()]);
    let event = decode_event(&inventory_payload("YYYNNNN")).unwrap();

    let first: Vec<i64> = pipeline
        .orchestrator
        .process(&event)
        .await
        .iter()
        .map(|m| m.subscription_id)
        .collect();
    let second: Vec<i64> = pipeline
        .orchestrator
        .process(&event)
        .await
        .iter()
        .map(|m| m.subscription_id)
        .collect();

    assert_eq!(first, second);
}

#[tokio::test]
async fn paused_subscription_is_not_matched() {
    let mut paused = test_subscription();
    paused.status = SubscriptionStatus::Paused;

    let pipeline = pipeline(vec![test_property()], vec![paused]);

    let event = decode_event(&inventory_payload("YYYNNNN")).unwrap();
    let result = pipeline.orchestrator.process(&event).await;

    assert!(result.is_empty());
}
