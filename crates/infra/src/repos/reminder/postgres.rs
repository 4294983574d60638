use super::IReminderRepo;
use chrono::NaiveDate;
use pawhome_domain::{Reminder, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    pet_uid: Uuid,
    user_uid: Uuid,
    reminder_type: String,
    title: String,
    message: String,
    due_date: NaiveDate,
    days_before: i64,
    is_read: bool,
    email_sent: bool,
    created: i64,
}

impl TryFrom<ReminderRaw> for Reminder {
    type Error = anyhow::Error;

    fn try_from(raw: ReminderRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.reminder_uid.into(),
            pet_id: raw.pet_uid.into(),
            user_id: raw.user_uid.into(),
            reminder_type: raw.reminder_type.parse()?,
            title: raw.title,
            message: raw.message,
            due_date: raw.due_date,
            days_before: raw.days_before,
            read: raw.is_read,
            email_sent: raw.email_sent,
            created: raw.created,
        })
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert_if_absent(&self, reminder: &Reminder) -> anyhow::Result<bool> {
        // The unique index on (pet_uid, reminder_type, due_date, days_before)
        // turns a duplicate into a no-op
        let res = sqlx::query(
            r#"
            INSERT INTO reminders
            (reminder_uid, pet_uid, user_uid, reminder_type, title, message, due_date, days_before, is_read, email_sent, created)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (pet_uid, reminder_type, due_date, days_before) DO NOTHING
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.pet_id.inner_ref())
        .bind(reminder.user_id.inner_ref())
        .bind(reminder.reminder_type.as_str())
        .bind(&reminder.title)
        .bind(&reminder.message)
        .bind(reminder.due_date)
        .bind(reminder.days_before)
        .bind(reminder.read)
        .bind(reminder.email_sent)
        .bind(reminder.created)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() == 1)
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        let res = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(anyhow::Error::new)
        .and_then(|raw| raw.map(Reminder::try_from).transpose());

        match res {
            Ok(reminder) => reminder,
            Err(e) => {
                error!("Unable to find reminder {}: {:?}", reminder_id, e);
                None
            }
        }
    }

    async fn find_by_pet(&self, pet_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.pet_uid = $1
            ORDER BY r.due_date, r.created
            "#,
        )
        .bind(pet_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        reminders.into_iter().map(Reminder::try_from).collect()
    }

    async fn find_unread_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.user_uid = $1 AND r.is_read = FALSE
            ORDER BY r.due_date, r.created
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        reminders.into_iter().map(Reminder::try_from).collect()
    }

    async fn mark_read(&self, reminder_id: &ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminders
            SET is_read = TRUE
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn mark_all_read(&self, user_id: &ID) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            UPDATE reminders
            SET is_read = TRUE
            WHERE user_uid = $1 AND is_read = FALSE
            "#,
        )
        .bind(user_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected())
    }

    async fn mark_email_sent(&self, reminder_ids: &[ID]) -> anyhow::Result<()> {
        let ids = reminder_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();
        sqlx::query(
            r#"
            UPDATE reminders
            SET email_sent = TRUE
            WHERE reminder_uid = ANY($1)
            "#,
        )
        .bind(ids)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
