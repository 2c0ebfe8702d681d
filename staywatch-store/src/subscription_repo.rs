use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use staywatch_core::{
    StaySubscription, StaySubscriptionRepository, SubscriptionSearchType, SubscriptionStatus,
};

/// Read-only queries against the stay_subscriptions table.
///
/// The table is owned by the subscription service; this side only filters
/// for candidates an incoming availability event could satisfy.
pub struct PostgresStaySubscriptionRepository {
    pub pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct StaySubscriptionRow {
    id: i64,
    guest_id: String,
    search_type: String,
    property_id: Option<i64>,
    search_area: Option<String>,
    search_radius_km: Option<i32>,
    search_latitude: Option<f64>,
    search_longitude: Option<f64>,
    check_in_date: NaiveDate,
    check_out_date: NaiveDate,
    max_price_per_night: f64,
    currency_code: String,
    num_adults: i32,
    num_children: Option<i32>,
    num_rooms: i32,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<StaySubscriptionRow> for StaySubscription {
    fn from(row: StaySubscriptionRow) -> Self {
        StaySubscription {
            id: row.id,
            guest_id: row.guest_id,
            search_type: row
                .search_type
                .parse()
                .unwrap_or(SubscriptionSearchType::Property),
            property_id: row.property_id,
            search_area: row.search_area,
            search_radius_km: row.search_radius_km,
            search_latitude: row.search_latitude,
            search_longitude: row.search_longitude,
            check_in_date: row.check_in_date,
            check_out_date: row.check_out_date,
            max_price_per_night: row.max_price_per_night,
            currency_code: row.currency_code,
            num_adults: row.num_adults,
            num_children: row.num_children,
            num_rooms: row.num_rooms,
            status: row.status.parse().unwrap_or(SubscriptionStatus::Active),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl StaySubscriptionRepository for PostgresStaySubscriptionRepository {
    async fn find_active_property_subscriptions(
        &self,
        property_id: i64,
        check_in_date: NaiveDate,
    ) -> Result<Vec<StaySubscription>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, StaySubscriptionRow>(
            r#"
            SELECT id, guest_id, search_type, property_id,
                   search_area, search_radius_km, search_latitude, search_longitude,
                   check_in_date, check_out_date,
                   max_price_per_night::float8 AS max_price_per_night,
                   currency_code, num_adults, num_children, num_rooms,
                   status, created_at, updated_at
            FROM stay_subscriptions
            WHERE property_id = $1
              AND check_in_date = $2
              AND status = $3
              AND search_type = $4
            ORDER BY id
            "#,
        )
        .bind(property_id)
        .bind(check_in_date)
        .bind(SubscriptionStatus::Active.to_string())
        .bind(SubscriptionSearchType::Property.to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(StaySubscription::from).collect())
    }
}
