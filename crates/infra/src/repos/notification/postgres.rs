use super::INotificationRepo;
use pawhome_domain::{Notification, NotificationKind, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresNotificationRepo {
    pool: PgPool,
}

impl PostgresNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationRaw {
    notification_uid: Uuid,
    user_uid: Uuid,
    kind: String,
    title: String,
    message: String,
    request_uid: Option<Uuid>,
    is_read: bool,
    email_sent: bool,
    email: Option<String>,
    created: i64,
}

impl TryFrom<NotificationRaw> for Notification {
    type Error = anyhow::Error;

    fn try_from(raw: NotificationRaw) -> anyhow::Result<Self> {
        let kind = NotificationKind::parse(&raw.kind).ok_or_else(|| {
            anyhow::Error::msg(format!("Unknown notification kind: {}", raw.kind))
        })?;
        Ok(Self {
            id: raw.notification_uid.into(),
            user_id: raw.user_uid.into(),
            kind,
            title: raw.title,
            message: raw.message,
            adoption_request_id: raw.request_uid.map(|id| id.into()),
            read: raw.is_read,
            email_sent: raw.email_sent,
            email: raw.email,
            created: raw.created,
        })
    }
}

#[async_trait::async_trait]
impl INotificationRepo for PostgresNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications
            (notification_uid, user_uid, kind, title, message, request_uid, is_read, email_sent, email, created)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(notification.id.inner_ref())
        .bind(notification.user_id.inner_ref())
        .bind(notification.kind.as_str())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.adoption_request_id.as_ref().map(|id| *id.inner_ref()))
        .bind(notification.read)
        .bind(notification.email_sent)
        .bind(&notification.email)
        .bind(notification.created)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, notification_id: &ID) -> Option<Notification> {
        let res = sqlx::query_as::<_, NotificationRaw>(
            r#"
            SELECT * FROM notifications AS n
            WHERE n.notification_uid = $1
            "#,
        )
        .bind(notification_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(anyhow::Error::new)
        .and_then(|raw| raw.map(Notification::try_from).transpose());

        match res {
            Ok(notification) => notification,
            Err(e) => {
                error!("Unable to find notification {}: {:?}", notification_id, e);
                None
            }
        }
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, NotificationRaw>(
            r#"
            SELECT * FROM notifications AS n
            WHERE n.user_uid = $1
            ORDER BY n.created DESC
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        notifications
            .into_iter()
            .map(Notification::try_from)
            .collect()
    }

    async fn mark_read(&self, notification_id: &ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE notification_uid = $1
            "#,
        )
        .bind(notification_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn mark_email_sent(&self, notification_id: &ID, email: &str) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE notifications
            SET email_sent = TRUE,
            email = $2
            WHERE notification_uid = $1
            "#,
        )
        .bind(notification_id.inner_ref())
        .bind(email)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
