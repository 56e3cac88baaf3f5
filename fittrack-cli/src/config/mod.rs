use anyhow::{anyhow, Context, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{FixedOffset, Local, NaiveDate, Offset, Utc};
use fittrack::models::day_key;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the config file location
pub const CONFIG_ENV: &str = "FITTRACK_CONFIG";
/// Overrides the directory holding the record files
pub const DATA_DIR_ENV: &str = "FITTRACK_DATA_DIR";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileConfig,

    #[serde(default)]
    pub analytics: AnalyticsConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Identity every local record is stored under
    #[serde(default = "default_owner_id")]
    pub owner_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_window_days")]
    pub default_window_days: i64,

    /// Minutes east of UTC; the machine's current offset when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_owner_id() -> String {
    "local".to_string()
}

fn default_window_days() -> i64 {
    7
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            owner_id: default_owner_id(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            default_window_days: default_window_days(),
            utc_offset_minutes: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
        }
    }
}

impl Config {
    /// Get config directory path (~/.fittrack/)
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".fittrack"))
    }

    /// Config file path: `FITTRACK_CONFIG`, else ~/.fittrack/config.toml
    pub fn config_file() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Record directory: `FITTRACK_DATA_DIR`, else ~/.fittrack/
    pub fn data_dir() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(DATA_DIR_ENV) {
            return Ok(PathBuf::from(path));
        }
        Self::config_dir()
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file()?)
    }

    /// Load configuration from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.profile.owner_id.trim().is_empty() {
            return Err(anyhow!("profile.owner_id must not be empty"));
        }
        if self.analytics.default_window_days <= 0 {
            return Err(anyhow!(
                "analytics.default_window_days must be positive, got {}",
                self.analytics.default_window_days
            ));
        }
        self.bucket_zone()?;
        check_date_format(&self.ui.date_format)?;
        Ok(())
    }

    /// Render a calendar day with `ui.date_format`, falling back to the day key
    pub fn format_day(&self, date: NaiveDate) -> String {
        render_day(date, &self.ui.date_format)
            .unwrap_or_else(|_| day_key(date))
    }

    /// Time zone all day buckets are cut in
    pub fn bucket_zone(&self) -> Result<FixedOffset> {
        let minutes = self
            .analytics
            .utc_offset_minutes
            .unwrap_or_else(|| Local::now().offset().fix().local_minus_utc() / 60);

        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| anyhow!("UTC offset out of range: {} minutes", minutes))
    }
}

fn render_day(date: NaiveDate, format: &str) -> std::result::Result<String, std::fmt::Error> {
    let mut rendered = String::new();
    write!(rendered, "{}", date.format(format))?;
    Ok(rendered)
}

/// Only date specifiers are accepted; time fields cannot be rendered for a day
fn check_date_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(anyhow!("ui.date_format has an unknown specifier: {:?}", format));
    }
    render_day(Utc::now().date_naive(), format)
        .map_err(|_| anyhow!("ui.date_format must only use date fields: {:?}", format))?;
    Ok(())
}
