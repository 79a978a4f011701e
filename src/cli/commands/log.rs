use crate::config::Config;
use crate::core::log::LogLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::path::expand_str;

/// Handle the `log` command
pub fn handle(print: bool, cfg: &Config) -> AppResult<()> {
    if print {
        let mut pool = DbPool::open_initialized(&expand_str(&cfg.database))?;
        LogLogic::print_log(&mut pool)?;
    }

    Ok(())
}
