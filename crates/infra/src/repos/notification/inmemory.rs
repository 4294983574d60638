use super::INotificationRepo;
use crate::repos::shared::inmemory_repo::*;
use pawhome_domain::{Notification, ID};
use std::cmp::Reverse;

/// Inserts for recipients registered with `fail_for` are rejected
pub struct InMemoryNotificationRepo {
    notifications: std::sync::Mutex<Vec<Notification>>,
    failing_users: std::sync::Mutex<Vec<ID>>,
}

impl InMemoryNotificationRepo {
    pub fn new() -> Self {
        Self {
            notifications: std::sync::Mutex::new(Vec::new()),
            failing_users: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn fail_for(&self, user_id: &ID) {
        self.failing_users
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(user_id.clone());
    }

    fn is_failing(&self, user_id: &ID) -> bool {
        self.failing_users
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(user_id)
    }
}

#[async_trait::async_trait]
impl INotificationRepo for InMemoryNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        if self.is_failing(&notification.user_id) {
            anyhow::bail!("Unable to store notification for user {}", notification.user_id);
        }
        insert(notification, &self.notifications);
        Ok(())
    }

    async fn find(&self, notification_id: &ID) -> Option<Notification> {
        find(notification_id, &self.notifications)
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Notification>> {
        let mut notifications = find_by(&self.notifications, |n| n.user_id == *user_id);
        // Latest inserted first among equal timestamps
        notifications.reverse();
        notifications.sort_by_key(|n| Reverse(n.created));
        Ok(notifications)
    }

    async fn mark_read(&self, notification_id: &ID) -> anyhow::Result<()> {
        update_many(
            &self.notifications,
            |n| n.id == *notification_id,
            |n| n.read = true,
        );
        Ok(())
    }

    async fn mark_email_sent(&self, notification_id: &ID, email: &str) -> anyhow::Result<()> {
        update_many(
            &self.notifications,
            |n| n.id == *notification_id,
            |n| {
                n.email_sent = true;
                n.email = Some(email.to_string());
            },
        );
        Ok(())
    }
}
