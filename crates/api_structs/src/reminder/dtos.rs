use chrono::NaiveDate;
use pawhome_domain::{CareType, Reminder, ReminderSettings, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub pet_id: ID,
    #[serde(rename = "type")]
    pub reminder_type: CareType,
    pub title: String,
    pub message: String,
    pub due_date: NaiveDate,
    pub days_before: i64,
    pub read: bool,
    pub email_sent: bool,
    pub created: i64,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            pet_id: reminder.pet_id,
            reminder_type: reminder.reminder_type,
            title: reminder.title,
            message: reminder.message,
            due_date: reminder.due_date,
            days_before: reminder.days_before,
            read: reminder.read,
            email_sent: reminder.email_sent,
            created: reminder.created,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSettingsDTO {
    pub email_enabled: bool,
    pub vaccine_days_before: i64,
    pub deworming_days_before: i64,
    pub bath_days_before: i64,
    pub medication_days_before: i64,
    pub bath_frequency_days: i64,
}

impl ReminderSettingsDTO {
    pub fn new(settings: ReminderSettings) -> Self {
        Self {
            email_enabled: settings.email_enabled,
            vaccine_days_before: settings.vaccine_days_before,
            deworming_days_before: settings.deworming_days_before,
            bath_days_before: settings.bath_days_before,
            medication_days_before: settings.medication_days_before,
            bath_frequency_days: settings.bath_frequency_days,
        }
    }
}
