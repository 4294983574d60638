mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderSettingsRepo;
use pawhome_domain::{ReminderSettings, ID};
pub use postgres::PostgresReminderSettingsRepo;

#[async_trait::async_trait]
pub trait IReminderSettingsRepo: Send + Sync {
    async fn insert(&self, settings: &ReminderSettings) -> anyhow::Result<()>;
    async fn save(&self, settings: &ReminderSettings) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> Option<ReminderSettings>;
}

#[cfg(test)]
mod tests {
    use crate::repos::tests::create_contexts;
    use pawhome_domain::{ReminderSettings, ID};

    #[tokio::test]
    async fn insert_and_save() {
        for ctx in create_contexts().await {
            let user_id = ID::new();
            assert!(ctx.repos.reminder_settings.find(&user_id).await.is_none());

            let mut settings = ReminderSettings::new(user_id.clone());
            ctx.repos
                .reminder_settings
                .insert(&settings)
                .await
                .expect("To insert");

            settings.email_enabled = false;
            settings.bath_frequency_days = 21;
            ctx.repos
                .reminder_settings
                .save(&settings)
                .await
                .expect("To save");

            let found = ctx
                .repos
                .reminder_settings
                .find(&user_id)
                .await
                .expect("To find");
            assert_eq!(found, settings);
        }
    }
}
