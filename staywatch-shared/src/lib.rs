pub mod events;
pub mod notification;

pub use events::{
    AvailabilityEvent, EventContext, EventValidationError, InventoryEvent, InventoryEventBody,
    InventoryEventValue, RoomOffer,
};
pub use notification::NotificationMessage;
