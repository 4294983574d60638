use chrono_tz::Tz;
use pawhome_utils::{create_random_secret, mask_secret};
use std::str::FromStr;
use tracing::{info, warn};

const DEFAULT_PORT: usize = 5000;
const DEFAULT_SCAN_HOUR: u32 = 8;

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_url: String,
    pub api_key: String,
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Postgres connection string. Inmemory repositories are used when missing.
    pub database_url: Option<String>,
    /// Secret required to trigger a reminder scan manually
    pub admin_secret: String,
    /// HS256 secret used to verify the tokens identifying users
    pub jwt_secret: String,
    /// Timezone in which the current calendar date is computed for reminders
    pub timezone: Tz,
    /// Local hour of the day at which the scheduled reminder scan runs
    pub scan_hour: u32,
    /// Email provider settings. Email delivery is disabled when missing.
    pub email: Option<EmailConfig>,
}

impl Config {
    pub fn new() -> Self {
        let admin_secret = secret_from_env("PAWHOME_ADMIN_SECRET");
        let jwt_secret = secret_from_env("PAWHOME_JWT_SECRET");

        let port = std::env::var("PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, DEFAULT_PORT
                );
                DEFAULT_PORT
            }
        };

        let timezone = parse_timezone(std::env::var("REMINDER_TIMEZONE").ok());
        let scan_hour = parse_scan_hour(std::env::var("REMINDER_SCAN_HOUR").ok());

        let email = match (
            std::env::var("EMAIL_API_URL"),
            std::env::var("EMAIL_API_KEY"),
        ) {
            (Ok(api_url), Ok(api_key)) => Some(EmailConfig {
                api_url,
                api_key,
                from: std::env::var("EMAIL_FROM")
                    .unwrap_or_else(|_| "PawHome <no-reply@pawhome.app>".into()),
            }),
            _ => {
                info!("EMAIL_API_URL or EMAIL_API_KEY is not set. Emails will not be delivered.");
                None
            }
        };

        Self {
            port,
            database_url: std::env::var("DATABASE_URL").ok(),
            admin_secret,
            jwt_secret,
            timezone,
            scan_hour,
            email,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_timezone(value: Option<String>) -> Tz {
    match value {
        Some(tz) => match Tz::from_str(&tz) {
            Ok(tz) => tz,
            Err(_) => {
                warn!(
                    "The given REMINDER_TIMEZONE: {} is not valid, falling back to UTC.",
                    tz
                );
                Tz::UTC
            }
        },
        None => Tz::UTC,
    }
}

fn parse_scan_hour(value: Option<String>) -> u32 {
    match value {
        Some(hour) => match hour.parse::<u32>() {
            Ok(hour) if hour < 24 => hour,
            _ => {
                warn!(
                    "The given REMINDER_SCAN_HOUR: {} is not valid, falling back to: {}.",
                    hour, DEFAULT_SCAN_HOUR
                );
                DEFAULT_SCAN_HOUR
            }
        },
        None => DEFAULT_SCAN_HOUR,
    }
}

fn secret_from_env(var: &str) -> String {
    match std::env::var(var) {
        Ok(secret) => secret,
        Err(_) => {
            info!(
                "Did not find {} environment variable. Going to create one.",
                var
            );
            let secret = create_random_secret(32);
            info!("{} was generated and set to: {}", var, mask_secret(&secret));
            secret
        }
    }
}
