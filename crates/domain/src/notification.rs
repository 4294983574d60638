use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    AdoptionRequestReceived,
    AdoptionRequestApproved,
    AdoptionRequestRejected,
    AdoptionRequestContacted,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AdoptionRequestReceived => "adoption_request_received",
            Self::AdoptionRequestApproved => "adoption_request_approved",
            Self::AdoptionRequestRejected => "adoption_request_rejected",
            Self::AdoptionRequestContacted => "adoption_request_contacted",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "adoption_request_received" => Some(Self::AdoptionRequestReceived),
            "adoption_request_approved" => Some(Self::AdoptionRequestApproved),
            "adoption_request_rejected" => Some(Self::AdoptionRequestRejected),
            "adoption_request_contacted" => Some(Self::AdoptionRequestContacted),
            _ => None,
        }
    }
}

/// In-app `Notification` for a `User`. Only the read and email flags
/// change after it has been created.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: ID,
    pub user_id: ID,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub adoption_request_id: Option<ID>,
    pub read: bool,
    pub email_sent: bool,
    /// Address the email copy was addressed to
    pub email: Option<String>,
    pub created: i64,
}

impl Notification {
    pub fn new(
        user_id: ID,
        kind: NotificationKind,
        title: String,
        message: String,
        adoption_request_id: Option<ID>,
        now: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            user_id,
            kind,
            title,
            message,
            adoption_request_id,
            read: false,
            email_sent: false,
            email: None,
            created: now,
        }
    }
}

impl Entity for Notification {
    fn id(&self) -> &ID {
        &self.id
    }
}
