use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Subscription lifecycle status.
///
/// Matching only ever queries ACTIVE rows; the remaining states exist
/// because the table is shared with the subscription service that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionStatus {
    Active,
    Paused,
    Cancelled,
    Expired,
    Notified,
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SubscriptionStatus::Active => "ACTIVE",
            SubscriptionStatus::Paused => "PAUSED",
            SubscriptionStatus::Cancelled => "CANCELLED",
            SubscriptionStatus::Expired => "EXPIRED",
            SubscriptionStatus::Notified => "NOTIFIED",
        };
        f.write_str(s)
    }
}

impl FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(SubscriptionStatus::Active),
            "PAUSED" => Ok(SubscriptionStatus::Paused),
            "CANCELLED" => Ok(SubscriptionStatus::Cancelled),
            "EXPIRED" => Ok(SubscriptionStatus::Expired),
            "NOTIFIED" => Ok(SubscriptionStatus::Notified),
            other => Err(format!("unknown subscription status: {other}")),
        }
    }
}

/// What a subscription is watching: a single property, or a geographic area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionSearchType {
    /// Watch one specific property.
    Property,
    /// Watch properties within a geographic radius.
    Area,
}

impl fmt::Display for SubscriptionSearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SubscriptionSearchType::Property => "PROPERTY",
            SubscriptionSearchType::Area => "AREA",
        };
        f.write_str(s)
    }
}

impl FromStr for SubscriptionSearchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PROPERTY" => Ok(SubscriptionSearchType::Property),
            "AREA" => Ok(SubscriptionSearchType::Area),
            other => Err(format!("unknown subscription search type: {other}")),
        }
    }
}

/// Read-only snapshot of a guest stay subscription.
///
/// The stay_subscriptions table is owned by the subscription service; this
/// system only reads it to match incoming availability events and never
/// mutates a row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaySubscription {
    pub id: i64,
    pub guest_id: String,
    pub search_type: SubscriptionSearchType,

    /// Set for PROPERTY subscriptions.
    pub property_id: Option<i64>,

    /// Area search fields, read by the area strategy.
    pub search_area: Option<String>,
    pub search_radius_km: Option<i32>,
    pub search_latitude: Option<f64>,
    pub search_longitude: Option<f64>,

    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub max_price_per_night: f64,
    pub currency_code: String,
    pub num_adults: i32,
    pub num_children: Option<i32>,
    pub num_rooms: i32,

    pub status: SubscriptionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StaySubscription {
    /// Number of nights from check-in to check-out.
    pub fn nights(&self) -> i64 {
        (self.check_out_date - self.check_in_date).num_days()
    }

    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }

    pub fn is_property_subscription(&self) -> bool {
        self.search_type == SubscriptionSearchType::Property && self.property_id.is_some()
    }

    pub fn is_area_subscription(&self) -> bool {
        self.search_type == SubscriptionSearchType::Area
    }
}

/// Read-only snapshot of a property row.
///
/// Resolves the property code carried by inventory events to the internal
/// property id that subscriptions reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub property_id: i64,
    pub title: String,

    /// Property code + brand suffix (e.g. "FNLCOHF" = "FNLCO" + "HF").
    pub ctyhocn: String,
    pub brand: Option<String>,

    /// Property code used in inventory events (e.g. "FNLCO").
    pub prop_code: Option<String>,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
