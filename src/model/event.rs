/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Countdown events and their progress math

use crate::application::table::TableRecord;
use crate::error::AppError;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Event counted down to, with the date counting started from
#[derive(DebugPretty, DisplaySimple, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DaleEvent {
    /// Record id
    pub id: String,
    /// Owning user id
    pub owner_id: String,
    /// Title
    pub title: String,
    /// Date counted down to, as sent by the server
    pub target_date: String,
    /// Date the countdown started, as sent by the server
    pub start_date: String,
    /// Creation timestamp as sent by the server
    #[serde(default)]
    pub created: String,
    /// Last update timestamp as sent by the server
    #[serde(default)]
    pub updated: String,
}

/// Day counts and completion of a countdown at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventProgress {
    /// Whole days between start and target, at least one
    pub total_days: i64,
    /// Days elapsed since start, clamped to `0..=total_days`
    pub elapsed_days: i64,
    /// Days remaining
    pub days_left: i64,
    /// Completion, `0..=100`
    pub percent: u8,
}

impl EventProgress {
    /// Computes progress between `start` and `target` as of `now`
    #[must_use]
    pub fn between(start: DateTime<Utc>, target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let total_ms = (target - start).num_milliseconds();
        let elapsed_ms = (now - start).num_milliseconds();
        let total_days = ceil_days(total_ms).max(1);
        let elapsed_days = ceil_days(elapsed_ms).clamp(0, total_days);
        let days_left = (total_days - elapsed_days).max(0);
        let percent = ((elapsed_days as f64 / total_days as f64) * 100.0)
            .round()
            .min(100.0) as u8;
        Self {
            total_days,
            elapsed_days,
            days_left,
            percent,
        }
    }
}

fn ceil_days(ms: i64) -> i64 {
    ms.div_euclid(MS_PER_DAY) + i64::from(ms.rem_euclid(MS_PER_DAY) != 0)
}

/// Parses a server timestamp, RFC 3339 or `YYYY-MM-DD HH:MM:SS[.fff]` in UTC
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Parses a `YYYY-MM-DD` form input as local midnight
///
/// Exactly three `-` separated integer parts forming a real calendar date;
/// `2025-02-30` is rejected rather than rolled over.
#[must_use]
pub fn parse_date_input(input: &str) -> Option<DateTime<Utc>> {
    let parts: Vec<&str> = input.split('-').collect();
    let [y, m, d] = parts.as_slice() else {
        return None;
    };
    let year: i32 = y.trim().parse().ok()?;
    let month: u32 = m.trim().parse().ok()?;
    let day: u32 = d.trim().parse().ok()?;
    let midnight = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?;
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

impl DaleEvent {
    /// Parsed target date
    #[must_use]
    pub fn target(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.target_date)
    }

    /// Parsed start date
    #[must_use]
    pub fn start(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.start_date)
    }

    /// Countdown progress as of `now`, `None` when a date is unreadable
    #[must_use]
    pub fn progress(&self, now: DateTime<Utc>) -> Option<EventProgress> {
        Some(EventProgress::between(self.start()?, self.target()?, now))
    }
}

/// Values of an event to create; the owner is filled in by the client
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewEvent {
    /// Title
    pub title: String,
    /// Date counted down to
    pub target_date: DateTime<Utc>,
    /// Date the countdown starts from
    pub start_date: DateTime<Utc>,
}

impl NewEvent {
    /// Creates an event draft, trimming the title
    pub fn new(
        title: impl Into<String>,
        target_date: DateTime<Utc>,
        start_date: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into().trim().to_string(),
            target_date,
            start_date,
        }
    }

    /// Builds a draft from form inputs in `YYYY-MM-DD` form
    ///
    /// # Returns
    /// * `Ok(NewEvent)` - Validated draft
    /// * `Err(AppError::Precondition)` - Naming the first invalid input
    pub fn from_inputs(title: &str, target: &str, start: &str) -> Result<Self, AppError> {
        let target_date = parse_date_input(target).ok_or_else(|| {
            AppError::Precondition("Please enter a valid target date (YYYY-MM-DD)".to_string())
        })?;
        let start_date = parse_date_input(start).ok_or_else(|| {
            AppError::Precondition("Please enter a valid start date (YYYY-MM-DD)".to_string())
        })?;
        let draft = Self::new(title, target_date, start_date);
        draft.validate()?;
        Ok(draft)
    }

    /// Checks the title is present and the target follows the start
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Precondition(
                "Please enter an event name".to_string(),
            ));
        }
        if self.target_date <= self.start_date {
            return Err(AppError::Precondition(
                "Target date must be after start date".to_string(),
            ));
        }
        Ok(())
    }
}

/// Partial update of an event, unset fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EventUpdate {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New target date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<DateTime<Utc>>,
    /// New start date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
}

impl TableRecord for DaleEvent {
    const TABLE: &'static str = "events";
    const LABEL: &'static str = "event";
    type Draft = NewEvent;
    type Patch = EventUpdate;

    fn check_draft(draft: &NewEvent) -> Result<(), AppError> {
        draft.validate()
    }

    fn check_patch(patch: &EventUpdate) -> Result<(), AppError> {
        match (patch.start_date, patch.target_date) {
            (Some(start), Some(target)) if target <= start => Err(AppError::Precondition(
                "Target date must be after start date".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
