use anyhow::{anyhow, Context, Result};
use chrono::{FixedOffset, Local, Offset};
use std::env;

/// Window sizes offered by the analytics page
pub const STANDARD_WINDOWS: [i64; 3] = [7, 30, 90];

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    /// Offset used for every calendar-day decision, in minutes east of UTC
    pub utc_offset_minutes: i32,
    pub default_window_days: i64,
}

impl AppConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .context("PORT must be a port number")?;
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let utc_offset_minutes = match lookup("FITTRACK_UTC_OFFSET_MINUTES") {
            Some(raw) => raw
                .parse()
                .context("FITTRACK_UTC_OFFSET_MINUTES must be an integer")?,
            None => Local::now().offset().fix().local_minus_utc() / 60,
        };

        let default_window_days: i64 = lookup("FITTRACK_DEFAULT_WINDOW_DAYS")
            .unwrap_or_else(|| "7".to_string())
            .parse()
            .context("FITTRACK_DEFAULT_WINDOW_DAYS must be an integer")?;
        if default_window_days <= 0 {
            return Err(anyhow!(
                "FITTRACK_DEFAULT_WINDOW_DAYS must be positive, got {}",
                default_window_days
            ));
        }

        let config = Self {
            host,
            port,
            log_level,
            utc_offset_minutes,
            default_window_days,
        };
        config.bucket_zone()?;

        Ok(config)
    }

    /// Time zone all day buckets are cut in
    pub fn bucket_zone(&self) -> Result<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| anyhow!("UTC offset out of range: {} minutes", self.utc_offset_minutes))
    }

    /// Get server address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
