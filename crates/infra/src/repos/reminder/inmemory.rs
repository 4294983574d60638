use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use pawhome_domain::{Reminder, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert_if_absent(&self, reminder: &Reminder) -> anyhow::Result<bool> {
        let key = reminder.key();
        Ok(insert_unless(reminder, &self.reminders, |r| r.key() == key))
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        find(reminder_id, &self.reminders)
    }

    async fn find_by_pet(&self, pet_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r| r.pet_id == *pet_id))
    }

    async fn find_unread_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let mut reminders = find_by(&self.reminders, |r| r.user_id == *user_id && !r.read);
        reminders.sort_by_key(|r| (r.due_date, r.created));
        Ok(reminders)
    }

    async fn mark_read(&self, reminder_id: &ID) -> anyhow::Result<()> {
        update_many(&self.reminders, |r| r.id == *reminder_id, |r| r.read = true);
        Ok(())
    }

    async fn mark_all_read(&self, user_id: &ID) -> anyhow::Result<u64> {
        Ok(update_many(
            &self.reminders,
            |r| r.user_id == *user_id && !r.read,
            |r| r.read = true,
        ))
    }

    async fn mark_email_sent(&self, reminder_ids: &[ID]) -> anyhow::Result<()> {
        update_many(
            &self.reminders,
            |r| reminder_ids.contains(&r.id),
            |r| r.email_sent = true,
        );
        Ok(())
    }
}
