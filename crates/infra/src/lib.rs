mod config;
mod repos;
mod services;
mod system;

use chrono::NaiveDate;
pub use config::{Config, EmailConfig};
use pawhome_domain::date::date_at;
pub use repos::{InMemoryAdoptionRequestRepo, InMemoryNotificationRepo, Repos};
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::info;

#[derive(Clone)]
pub struct PawContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub email: Arc<dyn IEmailService>,
}

impl PawContext {
    /// Context with inmemory repositories, the real clock and emails
    /// recorded in an inmemory outbox
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            email: Arc::new(InMemoryEmailService::new()),
        }
    }

    /// The current calendar date in the configured reminder timezone
    pub fn today(&self) -> NaiveDate {
        date_at(self.sys.get_timestamp_millis(), &self.config.timezone)
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<PawContext> {
    let config = Config::new();

    let repos = match &config.database_url {
        Some(connection_string) => Repos::create_postgres(connection_string).await?,
        None => {
            info!("DATABASE_URL is not set. Using inmemory repositories.");
            Repos::create_inmemory()
        }
    };

    let email: Arc<dyn IEmailService> = match &config.email {
        Some(email) => Arc::new(HttpEmailService::new(
            email.api_url.clone(),
            email.api_key.clone(),
            email.from.clone(),
        )),
        None => Arc::new(DisabledEmailService {}),
    };

    Ok(PawContext {
        repos,
        config,
        sys: Arc::new(RealSys {}),
        email,
    })
}
