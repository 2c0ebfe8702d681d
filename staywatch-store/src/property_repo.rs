use async_trait::async_trait;
use sqlx::PgPool;

use staywatch_core::{Property, PropertyRepository};

/// Read-only lookup of property rows.
///
/// Resolves the property code carried by inventory events to the internal
/// property id that subscriptions reference.
pub struct PostgresPropertyRepository {
    pub pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct PropertyRow {
    property_id: i64,
    title: String,
    ctyhocn: String,
    brand: Option<String>,
    prop_code: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl From<PropertyRow> for Property {
    fn from(row: PropertyRow) -> Self {
        Property {
            property_id: row.property_id,
            title: row.title,
            ctyhocn: row.ctyhocn,
            brand: row.brand,
            prop_code: row.prop_code,
            latitude: row.latitude,
            longitude: row.longitude,
        }
    }
}

#[async_trait]
impl PropertyRepository for PostgresPropertyRepository {
    async fn find_by_property_code(
        &self,
        property_code: &str,
    ) -> Result<Option<Property>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, PropertyRow>(
            r#"
            SELECT property_id, title, ctyhocn, brand, prop_code, latitude, longitude
            FROM property
            WHERE prop_code = $1
            "#,
        )
        .bind(property_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Property::from))
    }
}
