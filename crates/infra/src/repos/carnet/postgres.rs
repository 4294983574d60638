use super::ICarnetRepo;
use chrono::NaiveDate;
use pawhome_domain::{CarnetRecord, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresCarnetRepo {
    pool: PgPool,
}

impl PostgresCarnetRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CarnetRecordRaw {
    record_uid: Uuid,
    pet_uid: Uuid,
    record_type: String,
    name: String,
    applied_on: NaiveDate,
    due_on: Option<NaiveDate>,
}

impl TryFrom<CarnetRecordRaw> for CarnetRecord {
    type Error = anyhow::Error;

    fn try_from(raw: CarnetRecordRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.record_uid.into(),
            pet_id: raw.pet_uid.into(),
            record_type: raw.record_type.parse()?,
            name: raw.name,
            applied_on: raw.applied_on,
            due_on: raw.due_on,
        })
    }
}

#[async_trait::async_trait]
impl ICarnetRepo for PostgresCarnetRepo {
    async fn insert(&self, record: &CarnetRecord) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO carnet_records(record_uid, pet_uid, record_type, name, applied_on, due_on)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id.inner_ref())
        .bind(record.pet_id.inner_ref())
        .bind(record.record_type.as_str())
        .bind(&record.name)
        .bind(record.applied_on)
        .bind(record.due_on)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_pet(&self, pet_id: &ID) -> anyhow::Result<Vec<CarnetRecord>> {
        let records = sqlx::query_as::<_, CarnetRecordRaw>(
            r#"
            SELECT * FROM carnet_records AS c
            WHERE c.pet_uid = $1
            ORDER BY c.applied_on DESC
            "#,
        )
        .bind(pet_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        records.into_iter().map(CarnetRecord::try_from).collect()
    }
}
