use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use crate::utils::colors::{RESET, color_for_days, color_for_state};
use crate::utils::date::format_local;
use crate::utils::formatting::money;
use crate::utils::path::expand_tilde;
use crate::widget::timeline::{Timeline, WidgetEntry, step_from_secs};
use chrono::Utc;

/// Handle the `widget` command: expand the published snapshot into a display schedule.
pub fn handle(
    entries: Option<usize>,
    interval: Option<i64>,
    file: Option<&String>,
    json: bool,
    cfg: &Config,
) -> AppResult<()> {
    let path = expand_tilde(file.unwrap_or(&cfg.snapshot_file));
    let count = entries.unwrap_or(cfg.widget_entries);
    let step = step_from_secs(interval.unwrap_or(cfg.widget_interval_secs))?;

    let timeline = Timeline::load(&path, cfg.snapshot_format, Utc::now(), count, step);
    if timeline.is_error() {
        warning(format!("No readable snapshot at {}", path.display()));
    }

    if json {
        let all: Vec<WidgetEntry> = timeline.collect();
        println!("{}", serde_json::to_string_pretty(&all)?);
        return Ok(());
    }

    for entry in timeline {
        println!("{}", render_entry(&entry));
    }
    Ok(())
}

fn render_entry(e: &WidgetEntry) -> String {
    if e.error {
        return format!("{}  Error  Gross: {}", format_local(&e.date), money(0.0));
    }

    let state = if e.checked_in {
        format!("Current Shift {}", money(e.session_pay))
    } else {
        "Checked out".to_string()
    };

    format!(
        "{}  {}{:<22}{}  Gross: {:>10}  Next Paycheck: {}{} Days{}",
        format_local(&e.date),
        color_for_state(e.checked_in),
        state,
        RESET,
        money(e.gross_pay),
        color_for_days(e.days_until_paycheck),
        e.days_until_paycheck,
        RESET
    )
}
