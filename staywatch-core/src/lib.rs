pub mod entity;
pub mod repository;

pub use entity::{Property, StaySubscription, SubscriptionSearchType, SubscriptionStatus};
pub use repository::{PropertyRepository, StaySubscriptionRepository};
