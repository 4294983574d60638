use super::IReminderSettingsRepo;
use pawhome_domain::{ReminderSettings, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresReminderSettingsRepo {
    pool: PgPool,
}

impl PostgresReminderSettingsRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderSettingsRaw {
    user_uid: Uuid,
    email_enabled: bool,
    vaccine_days_before: i64,
    deworming_days_before: i64,
    bath_days_before: i64,
    medication_days_before: i64,
    bath_frequency_days: i64,
}

impl From<ReminderSettingsRaw> for ReminderSettings {
    fn from(raw: ReminderSettingsRaw) -> Self {
        Self {
            user_id: raw.user_uid.into(),
            email_enabled: raw.email_enabled,
            vaccine_days_before: raw.vaccine_days_before,
            deworming_days_before: raw.deworming_days_before,
            bath_days_before: raw.bath_days_before,
            medication_days_before: raw.medication_days_before,
            bath_frequency_days: raw.bath_frequency_days,
        }
    }
}

#[async_trait::async_trait]
impl IReminderSettingsRepo for PostgresReminderSettingsRepo {
    async fn insert(&self, settings: &ReminderSettings) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminder_settings
            (user_uid, email_enabled, vaccine_days_before, deworming_days_before, bath_days_before, medication_days_before, bath_frequency_days)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(settings.user_id.inner_ref())
        .bind(settings.email_enabled)
        .bind(settings.vaccine_days_before)
        .bind(settings.deworming_days_before)
        .bind(settings.bath_days_before)
        .bind(settings.medication_days_before)
        .bind(settings.bath_frequency_days)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, settings: &ReminderSettings) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminder_settings
            SET email_enabled = $2,
            vaccine_days_before = $3,
            deworming_days_before = $4,
            bath_days_before = $5,
            medication_days_before = $6,
            bath_frequency_days = $7
            WHERE user_uid = $1
            "#,
        )
        .bind(settings.user_id.inner_ref())
        .bind(settings.email_enabled)
        .bind(settings.vaccine_days_before)
        .bind(settings.deworming_days_before)
        .bind(settings.bath_days_before)
        .bind(settings.medication_days_before)
        .bind(settings.bath_frequency_days)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<ReminderSettings> {
        match sqlx::query_as::<_, ReminderSettingsRaw>(
            r#"
            SELECT * FROM reminder_settings AS s
            WHERE s.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        {
            Ok(settings) => settings.map(|s| s.into()),
            Err(e) => {
                error!("Unable to find reminder settings of user {}: {:?}", user_id, e);
                None
            }
        }
    }
}
