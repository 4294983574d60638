mod inmemory;
mod postgres;

pub use inmemory::InMemoryNotificationRepo;
use pawhome_domain::{Notification, ID};
pub use postgres::PostgresNotificationRepo;

#[async_trait::async_trait]
pub trait INotificationRepo: Send + Sync {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()>;
    async fn find(&self, notification_id: &ID) -> Option<Notification>;
    /// Newest first
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Notification>>;
    async fn mark_read(&self, notification_id: &ID) -> anyhow::Result<()>;
    async fn mark_email_sent(&self, notification_id: &ID, email: &str) -> anyhow::Result<()>;
}
