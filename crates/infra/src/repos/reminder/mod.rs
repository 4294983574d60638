mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderRepo;
use pawhome_domain::{Reminder, ID};
pub use postgres::PostgresReminderRepo;

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    /// Stores the `Reminder` unless one with the same `ReminderKey` exists.
    /// Returns whether it was stored.
    async fn insert_if_absent(&self, reminder: &Reminder) -> anyhow::Result<bool>;
    async fn find(&self, reminder_id: &ID) -> Option<Reminder>;
    async fn find_by_pet(&self, pet_id: &ID) -> anyhow::Result<Vec<Reminder>>;
    /// Unread reminders of the `User`, soonest due first
    async fn find_unread_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>>;
    async fn mark_read(&self, reminder_id: &ID) -> anyhow::Result<()>;
    /// Returns the number of reminders that were unread
    async fn mark_all_read(&self, user_id: &ID) -> anyhow::Result<u64>;
    async fn mark_email_sent(&self, reminder_ids: &[ID]) -> anyhow::Result<()>;
}
