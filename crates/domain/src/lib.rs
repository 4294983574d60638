mod adoption_request;
mod care;
mod carnet;
pub mod date;
mod notification;
mod pet;
mod reminder;
mod shared;
mod user;

pub use adoption_request::{
    AdoptionRequest, AdoptionRequestStatus, ApplicantDetails, InvalidStatusError,
    InvalidTransitionError, StatusChange, CASCADE_REJECTION_NOTE,
};
pub use care::{find_due_care_events, DueCareEvent};
pub use carnet::{CareType, CarnetRecord};
pub use notification::{Notification, NotificationKind};
pub use pet::{Pet, PetAvailability};
pub use reminder::{Reminder, ReminderKey, ReminderSettings, ReminderSettingsUpdate};
pub use shared::entity::{Entity, ID};
pub use user::User;
