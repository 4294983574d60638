mod adoption_request;
mod carnet;
mod notification;
mod pet;
mod reminder;
mod reminder_settings;
mod shared;
mod user;

pub use adoption_request::InMemoryAdoptionRequestRepo;
use adoption_request::{IAdoptionRequestRepo, PostgresAdoptionRequestRepo};
use carnet::{ICarnetRepo, InMemoryCarnetRepo, PostgresCarnetRepo};
pub use notification::InMemoryNotificationRepo;
use notification::{INotificationRepo, PostgresNotificationRepo};
use pet::{IPetRepo, InMemoryPetRepo, PostgresPetRepo};
use reminder::{IReminderRepo, InMemoryReminderRepo, PostgresReminderRepo};
use reminder_settings::{
    IReminderSettingsRepo, InMemoryReminderSettingsRepo, PostgresReminderSettingsRepo,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use user::{IUserRepo, InMemoryUserRepo, PostgresUserRepo};

#[derive(Clone)]
pub struct Repos {
    pub pets: Arc<dyn IPetRepo>,
    pub users: Arc<dyn IUserRepo>,
    pub adoption_requests: Arc<dyn IAdoptionRequestRepo>,
    pub carnet: Arc<dyn ICarnetRepo>,
    pub reminders: Arc<dyn IReminderRepo>,
    pub reminder_settings: Arc<dyn IReminderSettingsRepo>,
    pub notifications: Arc<dyn INotificationRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        info!("DB EXECUTING MIGRATION ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB EXECUTING MIGRATION ... [done]");

        Ok(Self {
            pets: Arc::new(PostgresPetRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            adoption_requests: Arc::new(PostgresAdoptionRequestRepo::new(pool.clone())),
            carnet: Arc::new(PostgresCarnetRepo::new(pool.clone())),
            reminders: Arc::new(PostgresReminderRepo::new(pool.clone())),
            reminder_settings: Arc::new(PostgresReminderSettingsRepo::new(pool.clone())),
            notifications: Arc::new(PostgresNotificationRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            pets: Arc::new(InMemoryPetRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
            adoption_requests: Arc::new(InMemoryAdoptionRequestRepo::new()),
            carnet: Arc::new(InMemoryCarnetRepo::new()),
            reminders: Arc::new(InMemoryReminderRepo::new()),
            reminder_settings: Arc::new(InMemoryReminderSettingsRepo::new()),
            notifications: Arc::new(InMemoryNotificationRepo::new()),
        }
    }
}
