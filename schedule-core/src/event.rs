//! Events shown on a schedule day.

use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};
use crate::time::TimeValue;

/// A time-bounded event within a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub start: TimeValue,
    pub end: TimeValue,
    pub title: String,
    pub description: String,
}

impl Event {
    pub fn new(
        start: TimeValue,
        end: TimeValue,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Event {
            start,
            end,
            title: title.into(),
            description: description.into(),
        }
    }

    /// Build an event from time strings and a free-text body whose first line
    /// is the title.
    pub fn parse(start: &str, end: &str, body: &str) -> ScheduleResult<Self> {
        let (title, description) = split_body(body);
        Self::with_text(start, end, title, description)
    }

    /// Build an event from time strings and an explicit title and description.
    pub fn with_text(
        start: &str,
        end: &str,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> ScheduleResult<Self> {
        let start = TimeValue::parse(start).map_err(|e| ScheduleError::parse("start", e))?;
        let end = TimeValue::parse(end).map_err(|e| ScheduleError::parse("end", e))?;
        Ok(Event::new(start, end, title, description))
    }

    /// Signed length of the event. Non-positive for events that end before they start.
    pub fn duration_minutes(&self) -> i64 {
        self.end.total_minutes() - self.start.total_minutes()
    }

    /// "9:00 AM–10:30 AM"
    pub fn time_range_label(&self) -> String {
        format!("{}\u{2013}{}", self.start, self.end)
    }
}

/// Split free text into a title (first line) and a description (the remaining
/// lines, each trimmed).
pub fn split_body(body: &str) -> (String, String) {
    let lines: Vec<&str> = body.trim().split('\n').map(str::trim).collect();

    let title = lines.first().copied().unwrap_or_default().to_string();
    let description = lines
        .get(1..)
        .map(|rest| rest.join("\n"))
        .unwrap_or_default()
        .trim()
        .to_string();

    (title, description)
}
