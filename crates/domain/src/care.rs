use crate::{
    carnet::{CareType, CarnetRecord},
    date::{days_between, describe_days_remaining, format_date},
    pet::Pet,
    reminder::{Reminder, ReminderSettings},
    shared::entity::ID,
};
use chrono::{Duration, NaiveDate};

/// A care event from the carnet that falls inside its lookahead window
#[derive(Debug, Clone, PartialEq)]
pub struct DueCareEvent {
    pub care_type: CareType,
    pub item_name: String,
    pub due_date: NaiveDate,
    /// Whole calendar days from today until `due_date`
    pub days_remaining: i64,
    /// Only set for baths, the date the next bath is derived from
    pub last_applied_on: Option<NaiveDate>,
}

/// Finds the carnet events of a single `Pet` that should be reminded about `today`.
///
/// Vaccines, dewormings and medications are due when their next dose / end
/// date lies in `[today, today + window]`. Baths are due when the most recent
/// bath plus the bath frequency lies in that range. A `Pet` without any bath
/// never gets a bath reminder.
pub fn find_due_care_events(
    records: &[CarnetRecord],
    settings: &ReminderSettings,
    today: NaiveDate,
) -> Vec<DueCareEvent> {
    let mut due_events = Vec::new();

    for care_type in [CareType::Vaccine, CareType::Deworming, CareType::Medication] {
        let window = settings.days_before(care_type);
        let window_end = today + Duration::days(window);
        due_events.extend(
            records
                .iter()
                .filter(|r| r.record_type == care_type)
                .filter_map(|r| r.due_on.map(|due_on| (r, due_on)))
                .filter(|(_, due_on)| *due_on >= today && *due_on <= window_end)
                .map(|(r, due_on)| DueCareEvent {
                    care_type,
                    item_name: r.name.clone(),
                    due_date: due_on,
                    days_remaining: days_between(today, due_on),
                    last_applied_on: None,
                }),
        );
    }

    if let Some(bath) = find_due_bath(records, settings, today) {
        due_events.push(bath);
    }

    due_events
}

fn find_due_bath(
    records: &[CarnetRecord],
    settings: &ReminderSettings,
    today: NaiveDate,
) -> Option<DueCareEvent> {
    let last_bath = records
        .iter()
        .filter(|r| r.record_type == CareType::Bath)
        .max_by_key(|r| r.applied_on)?;

    let days_since_last_bath = days_between(last_bath.applied_on, today);
    let days_until_next = settings.bath_frequency_days - days_since_last_bath;
    if days_until_next < 0 || days_until_next > settings.days_before(CareType::Bath) {
        return None;
    }

    let item_name = if last_bath.name.trim().is_empty() {
        "Bath".to_string()
    } else {
        last_bath.name.clone()
    };

    Some(DueCareEvent {
        care_type: CareType::Bath,
        item_name,
        due_date: today + Duration::days(days_until_next),
        days_remaining: days_until_next,
        last_applied_on: Some(last_bath.applied_on),
    })
}

impl DueCareEvent {
    pub fn title(&self, pet_name: &str) -> String {
        match self.care_type {
            CareType::Vaccine => format!("Vaccine due for {}", pet_name),
            CareType::Deworming => format!("Deworming due for {}", pet_name),
            CareType::Bath => format!("Bath time for {}", pet_name),
            CareType::Medication => format!("Medication ending for {}", pet_name),
        }
    }

    pub fn message(&self, pet_name: &str) -> String {
        let when = describe_days_remaining(self.days_remaining);
        let due = format_date(&self.due_date);
        match self.care_type {
            CareType::Vaccine => format!(
                "{}'s {} vaccine is due {} ({}).",
                pet_name, self.item_name, when, due
            ),
            CareType::Deworming => format!(
                "{}'s deworming with {} is due {} ({}).",
                pet_name, self.item_name, when, due
            ),
            CareType::Bath => {
                let last = self
                    .last_applied_on
                    .map(|d| format!(" Last bath was on {}.", format_date(&d)))
                    .unwrap_or_default();
                format!("{}'s next bath is due {} ({}).{}", pet_name, when, due, last)
            }
            CareType::Medication => format!(
                "{}'s {} treatment ends {} ({}).",
                pet_name, self.item_name, when, due
            ),
        }
    }

    pub fn into_reminder(self, pet: &Pet, user_id: &ID, now: i64) -> Reminder {
        Reminder {
            id: Default::default(),
            pet_id: pet.id.clone(),
            user_id: user_id.clone(),
            reminder_type: self.care_type,
            title: self.title(&pet.name),
            message: self.message(&pet.name),
            due_date: self.due_date,
            days_before: self.days_remaining,
            read: false,
            email_sent: false,
            created: now,
        }
    }
}
