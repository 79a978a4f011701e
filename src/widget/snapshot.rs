use crate::config::DEFAULT_HOURLY_RATE;
use crate::core::calculator::time_math::{elapsed_minutes, pay};
use crate::errors::{AppError, AppResult};
use crate::models::pay_summary::PaySummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};

/// Which snapshot encoding a producer writes, and which one a reader tries first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    /// Raw inputs; the reader recomputes pay at read time.
    #[default]
    Live,
    /// Pay figures computed by the writer.
    Precomputed,
}

impl SnapshotFormat {
    pub fn other(self) -> Self {
        match self {
            SnapshotFormat::Live => SnapshotFormat::Precomputed,
            SnapshotFormat::Precomputed => SnapshotFormat::Live,
        }
    }
}

fn default_rate() -> f64 {
    DEFAULT_HOURLY_RATE
}

/// Unix time of 2001-01-01T00:00:00Z, the epoch of numeric dates written by
/// the mobile app.
const REFERENCE_EPOCH: i64 = 978_307_200;

#[derive(Deserialize)]
#[serde(untagged)]
enum WireDate {
    Text(DateTime<Utc>),
    Reference(f64),
}

fn from_reference_secs(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() || secs.abs() > 1e15 {
        return None;
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp((whole as i64).checked_add(REFERENCE_EPOCH)?, nanos)
}

/// RFC 3339 text, or seconds since 2001-01-01 as the mobile app encodes dates.
fn wire_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    match WireDate::deserialize(deserializer)? {
        WireDate::Text(dt) => Ok(dt),
        WireDate::Reference(secs) => from_reference_secs(secs)
            .ok_or_else(|| de::Error::custom(format!("date out of range: {}", secs))),
    }
}

/// `{checkedIn, startDate, historyMinutes, paycheckDay}` plus the rate it was
/// produced with. Older writers omit `hourlyRate` and write dates as numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LiveSnapshot {
    pub checked_in: bool,
    #[serde(deserialize_with = "wire_date")]
    pub start_date: DateTime<Utc>,
    pub history_minutes: f64,
    #[serde(deserialize_with = "wire_date")]
    pub paycheck_day: DateTime<Utc>,
    #[serde(default = "default_rate")]
    pub hourly_rate: f64,
}

/// `{currentSessionPay, grossTotal, paycheckDay, checkedIn}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PrecomputedSnapshot {
    pub current_session_pay: f64,
    pub gross_total: f64,
    #[serde(deserialize_with = "wire_date")]
    pub paycheck_day: DateTime<Utc>,
    pub checked_in: bool,
}

/// Point-in-time pay state. Never mutated, only replaced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WidgetSnapshot {
    Live(LiveSnapshot),
    Precomputed(PrecomputedSnapshot),
}

impl WidgetSnapshot {
    /// Build a snapshot in `format` for a transition that happened at `at`.
    ///
    /// `summary` must be computed over the store contents after the transition.
    pub fn capture(
        format: SnapshotFormat,
        checked_in: bool,
        at: DateTime<Utc>,
        summary: &PaySummary,
        hourly_rate: f64,
        paycheck_day: DateTime<Utc>,
    ) -> Self {
        match format {
            SnapshotFormat::Live => WidgetSnapshot::Live(LiveSnapshot {
                checked_in,
                start_date: at,
                history_minutes: summary.historical_minutes,
                paycheck_day,
                hourly_rate,
            }),
            SnapshotFormat::Precomputed => WidgetSnapshot::Precomputed(PrecomputedSnapshot {
                current_session_pay: summary.current_session_pay,
                gross_total: summary.gross_pay,
                paycheck_day,
                checked_in,
            }),
        }
    }

    pub fn format(&self) -> SnapshotFormat {
        match self {
            WidgetSnapshot::Live(_) => SnapshotFormat::Live,
            WidgetSnapshot::Precomputed(_) => SnapshotFormat::Precomputed,
        }
    }

    pub fn checked_in(&self) -> bool {
        match self {
            WidgetSnapshot::Live(s) => s.checked_in,
            WidgetSnapshot::Precomputed(s) => s.checked_in,
        }
    }

    pub fn paycheck_day(&self) -> DateTime<Utc> {
        match self {
            WidgetSnapshot::Live(s) => s.paycheck_day,
            WidgetSnapshot::Precomputed(s) => s.paycheck_day,
        }
    }

    /// Pay accrued by the open session as seen at `now`.
    pub fn session_pay_at(&self, now: DateTime<Utc>) -> f64 {
        match self {
            WidgetSnapshot::Live(s) if s.checked_in => {
                pay(s.hourly_rate, elapsed_minutes(s.start_date, now))
            }
            WidgetSnapshot::Live(_) => 0.0,
            WidgetSnapshot::Precomputed(s) => s.current_session_pay,
        }
    }

    /// Banked pay plus the open session's accrued pay as seen at `now`.
    pub fn gross_pay_at(&self, now: DateTime<Utc>) -> f64 {
        match self {
            WidgetSnapshot::Live(s) => {
                pay(s.hourly_rate, s.history_minutes) + self.session_pay_at(now)
            }
            WidgetSnapshot::Precomputed(s) => s.gross_total,
        }
    }

    /// Whole days until the paycheck, rounded down. Zero or negative once past.
    pub fn days_until_paycheck(&self, now: DateTime<Utc>) -> i64 {
        days_until(self.paycheck_day(), now)
    }

    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode `raw`, trying `canonical` first and then the other encoding.
    ///
    /// A document carrying fields of both encodings is rejected.
    pub fn decode(raw: &str, canonical: SnapshotFormat) -> AppResult<Self> {
        Self::decode_as(raw, canonical)
            .or_else(|first| Self::decode_as(raw, canonical.other()).map_err(|_| first))
            .map_err(|e| AppError::Snapshot(e.to_string()))
    }

    fn decode_as(raw: &str, format: SnapshotFormat) -> Result<Self, serde_json::Error> {
        match format {
            SnapshotFormat::Live => serde_json::from_str(raw).map(WidgetSnapshot::Live),
            SnapshotFormat::Precomputed => {
                serde_json::from_str(raw).map(WidgetSnapshot::Precomputed)
            }
        }
    }
}

pub fn days_until(day: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (day - now).num_seconds().div_euclid(86_400)
}
