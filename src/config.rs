use std::env;
use std::time::Duration;

use anyhow::Context;
use chrono::NaiveTime;

use crate::scheduler::Schedule;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,

    // Cleanup job cadence
    pub cleanup_schedule: Schedule,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .context("PORT must be a number")?;

        let cleanup_schedule = match env::var("CLEANUP_AT").ok().filter(|s| !s.is_empty()) {
            Some(at) => Schedule::DailyAt(
                NaiveTime::parse_from_str(&at, "%H:%M")
                    .with_context(|| format!("CLEANUP_AT must be HH:MM, got {at:?}"))?,
            ),
            None => {
                let secs: u64 = env::var("CLEANUP_INTERVAL_SECS")
                    .unwrap_or_else(|_| "86400".into()) // 24 hours
                    .parse()
                    .context("CLEANUP_INTERVAL_SECS must be a number")?;
                anyhow::ensure!(secs > 0, "CLEANUP_INTERVAL_SECS must be positive");
                Schedule::Every(Duration::from_secs(secs))
            }
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://progress_tracker.db".into()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
            cleanup_schedule,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
