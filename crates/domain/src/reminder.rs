use crate::{
    carnet::CareType,
    shared::entity::{Entity, ID},
};
use chrono::NaiveDate;

/// A `Reminder` tells the adopter of a `Pet` that a care event from the
/// carnet is coming up.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    pub pet_id: ID,
    /// The `User` who adopted the `Pet` and receives the `Reminder`
    pub user_id: ID,
    pub reminder_type: CareType,
    pub title: String,
    pub message: String,
    /// Date of the care event the `Reminder` is about
    pub due_date: NaiveDate,
    /// Days between the creation of the `Reminder` and `due_date`.
    /// Together with pet, type and due date it makes up the `ReminderKey`,
    /// so one event is reminded once per lead time (e.g. 7, 3 and 1 days before).
    pub days_before: i64,
    pub read: bool,
    pub email_sent: bool,
    pub created: i64,
}

/// Uniqueness key of a `Reminder`. No two `Reminder`s share the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReminderKey {
    pub pet_id: ID,
    pub reminder_type: CareType,
    pub due_date: NaiveDate,
    pub days_before: i64,
}

impl Reminder {
    pub fn key(&self) -> ReminderKey {
        ReminderKey {
            pet_id: self.pet_id.clone(),
            reminder_type: self.reminder_type,
            due_date: self.due_date,
            days_before: self.days_before,
        }
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

pub const DEFAULT_VACCINE_DAYS_BEFORE: i64 = 7;
pub const DEFAULT_DEWORMING_DAYS_BEFORE: i64 = 5;
pub const DEFAULT_BATH_DAYS_BEFORE: i64 = 3;
pub const DEFAULT_MEDICATION_DAYS_BEFORE: i64 = 3;
pub const DEFAULT_BATH_FREQUENCY_DAYS: i64 = 30;

const MAX_DAYS_BEFORE: i64 = 60;
const MAX_BATH_FREQUENCY_DAYS: i64 = 365;

/// Per user configuration of the care reminders
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderSettings {
    pub user_id: ID,
    pub email_enabled: bool,
    pub vaccine_days_before: i64,
    pub deworming_days_before: i64,
    pub bath_days_before: i64,
    pub medication_days_before: i64,
    pub bath_frequency_days: i64,
}

impl ReminderSettings {
    pub fn new(user_id: ID) -> Self {
        Self {
            user_id,
            email_enabled: true,
            vaccine_days_before: DEFAULT_VACCINE_DAYS_BEFORE,
            deworming_days_before: DEFAULT_DEWORMING_DAYS_BEFORE,
            bath_days_before: DEFAULT_BATH_DAYS_BEFORE,
            medication_days_before: DEFAULT_MEDICATION_DAYS_BEFORE,
            bath_frequency_days: DEFAULT_BATH_FREQUENCY_DAYS,
        }
    }

    /// Lookahead window in days for the given care type
    pub fn days_before(&self, care_type: CareType) -> i64 {
        match care_type {
            CareType::Vaccine => self.vaccine_days_before,
            CareType::Deworming => self.deworming_days_before,
            CareType::Bath => self.bath_days_before,
            CareType::Medication => self.medication_days_before,
        }
    }

    /// Applies the given changes if all of them are valid, otherwise
    /// returns the names of the invalid fields and leaves `self` untouched.
    pub fn update(&mut self, update: ReminderSettingsUpdate) -> Result<(), Vec<&'static str>> {
        let days_fields = [
            ("vaccineDaysBefore", update.vaccine_days_before),
            ("dewormingDaysBefore", update.deworming_days_before),
            ("bathDaysBefore", update.bath_days_before),
            ("medicationDaysBefore", update.medication_days_before),
        ];
        let mut invalid = days_fields
            .iter()
            .filter(|(_, value)| matches!(value, Some(days) if !(0..=MAX_DAYS_BEFORE).contains(days)))
            .map(|(name, _)| *name)
            .collect::<Vec<_>>();
        if matches!(update.bath_frequency_days, Some(days) if !(1..=MAX_BATH_FREQUENCY_DAYS).contains(&days))
        {
            invalid.push("bathFrequencyDays");
        }
        if !invalid.is_empty() {
            return Err(invalid);
        }

        if let Some(email_enabled) = update.email_enabled {
            self.email_enabled = email_enabled;
        }
        if let Some(days) = update.vaccine_days_before {
            self.vaccine_days_before = days;
        }
        if let Some(days) = update.deworming_days_before {
            self.deworming_days_before = days;
        }
        if let Some(days) = update.bath_days_before {
            self.bath_days_before = days;
        }
        if let Some(days) = update.medication_days_before {
            self.medication_days_before = days;
        }
        if let Some(days) = update.bath_frequency_days {
            self.bath_frequency_days = days;
        }
        Ok(())
    }
}

/// Partial update of `ReminderSettings`, `None` fields are left as they are
#[derive(Debug, Clone, Default)]
pub struct ReminderSettingsUpdate {
    pub email_enabled: Option<bool>,
    pub vaccine_days_before: Option<i64>,
    pub deworming_days_before: Option<i64>,
    pub bath_days_before: Option<i64>,
    pub medication_days_before: Option<i64>,
    pub bath_frequency_days: Option<i64>,
}
