//! Schedule documents: a TOML file holding an optional grid and a list of days.
//!
//! ```toml
//! [grid]
//! slot_start = "9:00"
//! slot_length = "0:30"
//! slots = 16
//!
//! [[days]]
//! date = "2026-10-19"
//!
//! [[days.events]]
//! start = "9:00"
//! end = "10:00"
//! body = """
//! Standup
//! Daily sync
//! """
//! ```

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{ScheduleError, ScheduleResult};
use crate::event::{Event, split_body};
use crate::grid::SlotGridConfig;
use crate::schedule::{Day, DayEvent, MalformedEvent, Schedule};
use crate::settings::GridOverrides;
use crate::time::TimeValue;

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    grid: GridOverrides,

    #[serde(default)]
    days: Vec<RawDay>,
}

#[derive(Debug, Deserialize)]
struct RawDay {
    date: Option<String>,

    #[serde(default)]
    events: Vec<RawEvent>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    start: String,
    end: String,
    title: Option<String>,
    description: Option<String>,
    body: Option<String>,
}

/// A parsed schedule document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDocument {
    /// Grid attributes set by the document itself.
    pub grid: GridOverrides,
    pub days: Vec<Day>,
}

impl ScheduleDocument {
    /// Read and parse a document. A leading `~` is expanded.
    pub fn load(path: &Path) -> ScheduleResult<Self> {
        let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
        let content = std::fs::read_to_string(&expanded)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> ScheduleResult<Self> {
        let raw: RawDocument =
            toml::from_str(content).map_err(|e| ScheduleError::Document(e.to_string()))?;

        let days = raw
            .days
            .into_iter()
            .enumerate()
            .map(|(d, day)| parse_day(d, day))
            .collect::<ScheduleResult<Vec<_>>>()?;

        Ok(ScheduleDocument {
            grid: raw.grid,
            days,
        })
    }

    pub fn into_schedule(self, config: SlotGridConfig) -> Schedule {
        Schedule::new(config, self.days)
    }
}

fn parse_day(d: usize, raw: RawDay) -> ScheduleResult<Day> {
    let date = raw
        .date
        .as_deref()
        .map(|s| parse_date(d, s))
        .transpose()?;

    let events = raw
        .events
        .into_iter()
        .enumerate()
        .map(|(e, event)| parse_event(event, &format!("days[{}].events[{}]", d, e)))
        .collect();

    Ok(Day { date, events })
}

/// Parse YYYY-MM-DD
fn parse_date(d: usize, s: &str) -> ScheduleResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        ScheduleError::Document(format!(
            "days[{}].date: invalid date format '{}'. Expected YYYY-MM-DD",
            d, s
        ))
    })
}

/// Resolve an event's text, then its times. Bad times leave a
/// [`MalformedEvent`] in the event's slot of the day.
fn parse_event(raw: RawEvent, path: &str) -> DayEvent {
    let (title, description) = match (raw.title, raw.body) {
        (Some(title), _) => (
            title.trim().to_string(),
            raw.description.unwrap_or_default().trim().to_string(),
        ),
        (None, Some(body)) => split_body(&body),
        (None, None) => (
            String::new(),
            raw.description.unwrap_or_default().trim().to_string(),
        ),
    };

    let start = TimeValue::parse(&raw.start).map_err(|source| MalformedEvent {
        title: title.clone(),
        field: format!("{}.start", path),
        source,
    })?;
    let end = TimeValue::parse(&raw.end).map_err(|source| MalformedEvent {
        title: title.clone(),
        field: format!("{}.end", path),
        source,
    })?;

    Ok(Event::new(start, end, title, description))
}
