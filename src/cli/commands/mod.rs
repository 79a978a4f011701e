pub mod checkin;
pub mod checkout;
pub mod config;
pub mod db;
pub mod init;
pub mod list;
pub mod log;
pub mod status;
pub mod widget;

use crate::config::Config;
use crate::core::checkin::{CheckInOutController, PaySettings};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::date::local_midnight_utc;
use crate::utils::path::expand_str;
use crate::widget::sink::FileSink;

/// Settings for the controller and aggregations, taken from `cfg`.
pub fn pay_settings(cfg: &Config) -> AppResult<PaySettings> {
    Ok(PaySettings {
        hourly_rate: cfg.hourly_rate,
        paycheck_day: local_midnight_utc(cfg.paycheck_day()?),
        snapshot_format: cfg.snapshot_format,
    })
}

/// Controller over the configured database and snapshot file.
pub fn open_controller(cfg: &Config) -> AppResult<CheckInOutController<DbPool, FileSink>> {
    let pool = DbPool::open_initialized(&expand_str(&cfg.database))?;
    let sink = FileSink::new(expand_str(&cfg.snapshot_file));
    CheckInOutController::new(pool, sink, pay_settings(cfg)?)
}
