use crate::core::policy::FailurePolicy;
use crate::errors::{AppError, AppResult};
use crate::utils::date::today;
use crate::widget::snapshot::SnapshotFormat;
use crate::widget::timeline::step_from_secs;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_hourly_rate")]
    pub hourly_rate: f64,
    /// Next pay date (YYYY-MM-DD). Empty means today.
    #[serde(default)]
    pub next_paycheck: String,
    #[serde(default = "default_snapshot_file")]
    pub snapshot_file: String,
    #[serde(default)]
    pub snapshot_format: SnapshotFormat,
    #[serde(default = "default_checkin_failure")]
    pub checkin_failure: FailurePolicy,
    #[serde(default = "default_checkout_failure")]
    pub checkout_failure: FailurePolicy,
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
    #[serde(default = "default_widget_entries")]
    pub widget_entries: usize,
    #[serde(default = "default_widget_interval_secs")]
    pub widget_interval_secs: i64,
}

pub const DEFAULT_HOURLY_RATE: f64 = 15.3;

fn default_hourly_rate() -> f64 {
    DEFAULT_HOURLY_RATE
}
fn default_snapshot_file() -> String {
    Config::snapshot_file_default().to_string_lossy().to_string()
}
fn default_checkin_failure() -> FailurePolicy {
    FailurePolicy::Fatal
}
fn default_checkout_failure() -> FailurePolicy {
    FailurePolicy::Warn
}
fn default_refresh_secs() -> u64 {
    5
}
fn default_widget_entries() -> usize {
    60
}
fn default_widget_interval_secs() -> i64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            hourly_rate: default_hourly_rate(),
            next_paycheck: String::new(),
            snapshot_file: default_snapshot_file(),
            snapshot_format: SnapshotFormat::default(),
            checkin_failure: default_checkin_failure(),
            checkout_failure: default_checkout_failure(),
            refresh_secs: default_refresh_secs(),
            widget_entries: default_widget_entries(),
            widget_interval_secs: default_widget_interval_secs(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rpaytracker")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rpaytracker.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rpaytracker.sqlite")
    }

    /// Shared file the widget snapshot is handed over through.
    pub fn snapshot_file_default() -> PathBuf {
        Self::config_dir().join("widget.json")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let cfg: Config =
            serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> AppResult<()> {
        if !self.hourly_rate.is_finite() {
            return Err(AppError::Config(format!(
                "hourly_rate must be a number, got {}",
                self.hourly_rate
            )));
        }
        if self.refresh_secs == 0 {
            return Err(AppError::Config("refresh_secs must be at least 1".into()));
        }
        step_from_secs(self.widget_interval_secs)?;
        if !self.next_paycheck.trim().is_empty() {
            self.paycheck_day()?;
        }
        Ok(())
    }

    /// The injected next pay date, today when unset.
    pub fn paycheck_day(&self) -> AppResult<NaiveDate> {
        let raw = self.next_paycheck.trim();
        if raw.is_empty() {
            return Ok(today());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| AppError::InvalidDate(raw.to_string()))
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> io::Result<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Self::with_database(db_path.clone());

        if !is_test {
            let yaml = serde_yaml::to_string(&config).map_err(io::Error::other)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(config)
    }
}
