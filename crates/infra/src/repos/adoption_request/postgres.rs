use super::IAdoptionRequestRepo;
use pawhome_domain::{AdoptionRequest, AdoptionRequestStatus, ApplicantDetails, ID};
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};
use tracing::error;

pub struct PostgresAdoptionRequestRepo {
    pool: PgPool,
}

impl PostgresAdoptionRequestRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_many_where(
        &self,
        condition: &str,
        value: Uuid,
    ) -> anyhow::Result<Vec<AdoptionRequest>> {
        let query = format!(
            "SELECT * FROM adoption_requests AS r WHERE {} = $1 ORDER BY r.created, r.request_uid",
            condition
        );
        let requests = sqlx::query_as::<_, AdoptionRequestRaw>(&query)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;
        requests.into_iter().map(AdoptionRequest::try_from).collect()
    }
}

#[derive(Debug, FromRow)]
struct AdoptionRequestRaw {
    request_uid: Uuid,
    pet_uid: Uuid,
    foundation_uid: Uuid,
    user_uid: Option<Uuid>,
    applicant: Json<ApplicantDetails>,
    status: String,
    notes: Option<String>,
    created: i64,
    updated: i64,
}

impl TryFrom<AdoptionRequestRaw> for AdoptionRequest {
    type Error = anyhow::Error;

    fn try_from(raw: AdoptionRequestRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.request_uid.into(),
            pet_id: raw.pet_uid.into(),
            foundation_id: raw.foundation_uid.into(),
            user_id: raw.user_uid.map(|id| id.into()),
            applicant: raw.applicant.0,
            status: raw.status.parse()?,
            notes: raw.notes,
            created: raw.created,
            updated: raw.updated,
        })
    }
}

#[async_trait::async_trait]
impl IAdoptionRequestRepo for PostgresAdoptionRequestRepo {
    async fn insert(&self, request: &AdoptionRequest) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO adoption_requests
            (request_uid, pet_uid, foundation_uid, user_uid, applicant, status, notes, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(request.id.inner_ref())
        .bind(request.pet_id.inner_ref())
        .bind(request.foundation_id.inner_ref())
        .bind(request.user_id.as_ref().map(|id| *id.inner_ref()))
        .bind(Json(&request.applicant))
        .bind(request.status.as_str())
        .bind(&request.notes)
        .bind(request.created)
        .bind(request.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, request: &AdoptionRequest) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE adoption_requests
            SET applicant = $2,
            status = $3,
            notes = $4,
            updated = $5
            WHERE request_uid = $1
            "#,
        )
        .bind(request.id.inner_ref())
        .bind(Json(&request.applicant))
        .bind(request.status.as_str())
        .bind(&request.notes)
        .bind(request.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, request_id: &ID) -> Option<AdoptionRequest> {
        let res = sqlx::query_as::<_, AdoptionRequestRaw>(
            r#"
            SELECT * FROM adoption_requests AS r
            WHERE r.request_uid = $1
            "#,
        )
        .bind(request_id.inner_ref())
        .fetch_optional(&self.pool)
        .await;

        let request = res
            .map_err(anyhow::Error::new)
            .and_then(|raw| raw.map(AdoptionRequest::try_from).transpose());
        match request {
            Ok(request) => request,
            Err(e) => {
                error!("Unable to find adoption request {}: {:?}", request_id, e);
                None
            }
        }
    }

    async fn delete(&self, request_id: &ID) -> Option<AdoptionRequest> {
        let res = sqlx::query_as::<_, AdoptionRequestRaw>(
            r#"
            DELETE FROM adoption_requests AS r
            WHERE r.request_uid = $1
            RETURNING *
            "#,
        )
        .bind(request_id.inner_ref())
        .fetch_optional(&self.pool)
        .await;

        let request = res
            .map_err(anyhow::Error::new)
            .and_then(|raw| raw.map(AdoptionRequest::try_from).transpose());
        match request {
            Ok(request) => request,
            Err(e) => {
                error!("Unable to delete adoption request {}: {:?}", request_id, e);
                None
            }
        }
    }

    async fn find_by_pet(&self, pet_id: &ID) -> anyhow::Result<Vec<AdoptionRequest>> {
        self.find_many_where("r.pet_uid", *pet_id.inner_ref()).await
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<AdoptionRequest>> {
        self.find_many_where("r.user_uid", *user_id.inner_ref()).await
    }

    async fn find_by_foundation(
        &self,
        foundation_id: &ID,
    ) -> anyhow::Result<Vec<AdoptionRequest>> {
        self.find_many_where("r.foundation_uid", *foundation_id.inner_ref())
            .await
    }

    async fn find_by_status(
        &self,
        status: AdoptionRequestStatus,
    ) -> anyhow::Result<Vec<AdoptionRequest>> {
        let requests = sqlx::query_as::<_, AdoptionRequestRaw>(
            r#"
            SELECT * FROM adoption_requests AS r
            WHERE r.status = $1
            ORDER BY r.created, r.request_uid
            "#,
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;
        requests.into_iter().map(AdoptionRequest::try_from).collect()
    }
}
