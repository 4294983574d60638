use crate::dtos::{ReminderDTO, ReminderSettingsDTO};
use pawhome_domain::{Reminder, ReminderSettings, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminder: ReminderDTO,
}

impl ReminderResponse {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            reminder: ReminderDTO::new(reminder),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSettingsResponse {
    pub settings: ReminderSettingsDTO,
}

impl ReminderSettingsResponse {
    pub fn new(settings: ReminderSettings) -> Self {
        Self {
            settings: ReminderSettingsDTO::new(settings),
        }
    }
}

pub mod run_reminder_scan {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub pets_processed: usize,
        pub reminders_created: usize,
        pub emails_sent: usize,
        pub errors: usize,
        pub error_messages: Vec<String>,
    }
}

pub mod get_unread_reminders {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<Reminder>) -> Self {
            Self {
                reminders: reminders.into_iter().map(ReminderDTO::new).collect(),
            }
        }
    }
}

pub mod mark_reminder_read {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod mark_all_reminders_read {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub updated: u64,
    }
}

pub mod get_reminder_settings {
    use super::*;

    pub type APIResponse = ReminderSettingsResponse;
}

pub mod update_reminder_settings {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub email_enabled: Option<bool>,
        #[serde(default)]
        pub vaccine_days_before: Option<i64>,
        #[serde(default)]
        pub deworming_days_before: Option<i64>,
        #[serde(default)]
        pub bath_days_before: Option<i64>,
        #[serde(default)]
        pub medication_days_before: Option<i64>,
        #[serde(default)]
        pub bath_frequency_days: Option<i64>,
    }

    pub type APIResponse = ReminderSettingsResponse;
}
