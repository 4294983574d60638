use super::IReminderSettingsRepo;
use crate::repos::shared::inmemory_repo::*;
use pawhome_domain::{ReminderSettings, ID};

pub struct InMemoryReminderSettingsRepo {
    settings: std::sync::Mutex<Vec<ReminderSettings>>,
}

impl InMemoryReminderSettingsRepo {
    pub fn new() -> Self {
        Self {
            settings: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderSettingsRepo for InMemoryReminderSettingsRepo {
    async fn insert(&self, settings: &ReminderSettings) -> anyhow::Result<()> {
        let user_id = &settings.user_id;
        if !insert_unless(settings, &self.settings, |s| s.user_id == *user_id) {
            return Err(anyhow::Error::msg(format!(
                "Reminder settings for user {} already exist",
                user_id
            )));
        }
        Ok(())
    }

    async fn save(&self, settings: &ReminderSettings) -> anyhow::Result<()> {
        update_many(
            &self.settings,
            |s| s.user_id == settings.user_id,
            |s| *s = settings.clone(),
        );
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<ReminderSettings> {
        find_by(&self.settings, |s| s.user_id == *user_id).pop()
    }
}
