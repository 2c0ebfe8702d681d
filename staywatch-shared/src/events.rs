use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Top-level envelope for records on the inventory availability topic.
///
/// Example key: "FNLCO::NG7BCD" (property code :: rate plan code).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct InventoryEvent {
    pub key: Option<String>,
    pub value: Option<InventoryEventValue>,
}

/// Value wrapper carrying envelope metadata and the availability body.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct InventoryEventValue {
    pub context: Option<EventContext>,
    pub body: Option<InventoryEventBody>,
}

/// Standard event envelope metadata. Carried through, never matched on.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventContext {
    pub timestamp: Option<String>,
    pub publisher: Option<String>,
    pub message_id: Option<String>,
    pub operation_id: Option<String>,
    pub application_id: Option<String>,
}

/// Raw availability body for one property + rate plan on a stay date.
///
/// The feed can omit almost anything, so every field stays optional here;
/// [`AvailabilityEvent`] is the validated form the pipeline works with.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct InventoryEventBody {
    pub recommendation_id: Option<i64>,
    pub property_code: Option<String>,
    pub stay_date: Option<String>,
    pub end_date: Option<String>,
    pub rate_plan_code: Option<String>,
    #[serde(default)]
    pub room_offers: Vec<RoomOffer>,
}

/// A single room type offer within an inventory event.
///
/// `los_pattern` holds 7-character strings where position N (1-indexed)
/// says whether an N-night stay is bookable: 'Y' = available, 'N' = not.
/// Example: "YYYNNNN" → 1, 2 or 3 nights.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RoomOffer {
    #[serde(default)]
    pub room_type_code: String,
    #[serde(default)]
    pub los_pattern: Vec<String>,
}

/// Validation failures for inbound availability events.
#[derive(Debug, thiserror::Error)]
pub enum EventValidationError {
    #[error("event body has no property code")]
    MissingPropertyCode,

    #[error("event body has no stay date")]
    MissingStayDate,

    #[error("invalid stay date '{0}'")]
    InvalidStayDate(String),
}

/// A validated availability event as seen by the matching pipeline.
///
/// Built from a raw [`InventoryEventBody`] at the consumer boundary, so the
/// property code is always present and the stay date already parsed.
#[derive(Debug, Clone)]
pub struct AvailabilityEvent {
    pub property_code: String,
    pub stay_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub rate_plan_code: Option<String>,
    pub recommendation_id: Option<i64>,
    pub room_offers: Vec<RoomOffer>,
}

impl TryFrom<InventoryEventBody> for AvailabilityEvent {
    type Error = EventValidationError;

    fn try_from(body: InventoryEventBody) -> Result<Self, Self::Error> {
        let property_code = match body.property_code {
            Some(code) if !code.trim().is_empty() => code,
            _ => return Err(EventValidationError::MissingPropertyCode),
        };

        let raw_date = body.stay_date.ok_or(EventValidationError::MissingStayDate)?;
        let stay_date = raw_date
            .parse::<NaiveDate>()
            .map_err(|_| EventValidationError::InvalidStayDate(raw_date.clone()))?;

        // endDate is informational; a bad value does not invalidate the event
        let end_date = body.end_date.and_then(|d| d.parse().ok());

        Ok(Self {
            property_code,
            stay_date,
            end_date,
            rate_plan_code: body.rate_plan_code,
            recommendation_id: body.recommendation_id,
            room_offers: body.room_offers,
        })
    }
}
