use pawhome_domain::{Notification, NotificationKind, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDTO {
    pub id: ID,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub adoption_request_id: Option<ID>,
    pub read: bool,
    pub email_sent: bool,
    pub created: i64,
}

impl NotificationDTO {
    pub fn new(notification: Notification) -> Self {
        Self {
            id: notification.id,
            kind: notification.kind,
            title: notification.title,
            message: notification.message,
            adoption_request_id: notification.adoption_request_id,
            read: notification.read,
            email_sent: notification.email_sent,
            created: notification.created,
        }
    }
}
