//! A schedule: one grid shared by several days.

use chrono::NaiveDate;
use tracing::info;

use crate::error::{ScheduleError, ScheduleResult, TimeParseError};
use crate::event::Event;
use crate::grid::SlotGridConfig;
use crate::legend::legend_labels;
use crate::placement::{Layout, place_entries};

/// An event whose times could not be read. It keeps its place in the day and
/// shows up as a rejected entry in the day's layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedEvent {
    pub title: String,
    pub field: String,
    pub source: TimeParseError,
}

impl MalformedEvent {
    pub fn to_error(&self) -> ScheduleError {
        ScheduleError::parse(self.field.clone(), self.source.clone())
    }
}

pub type DayEvent = Result<Event, MalformedEvent>;

/// Title of a day entry, parsed or not.
pub fn entry_title(entry: &DayEvent) -> &str {
    match entry {
        Ok(event) => &event.title,
        Err(malformed) => &malformed.title,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Day {
    pub date: Option<NaiveDate>,
    pub events: Vec<DayEvent>,
}

impl Day {
    pub fn new(date: Option<NaiveDate>, events: Vec<Event>) -> Self {
        Day {
            date,
            events: events.into_iter().map(Ok).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Schedule {
    pub config: SlotGridConfig,
    pub days: Vec<Day>,
}

/// Output of one render pass over a [`Schedule`].
#[derive(Debug)]
pub struct RenderPass {
    pub legend: Vec<String>,
    pub days: Vec<DayLayout>,
}

#[derive(Debug)]
pub struct DayLayout {
    pub date: Option<NaiveDate>,
    pub layout: Layout,
}

impl Schedule {
    pub fn new(config: SlotGridConfig, days: Vec<Day>) -> Self {
        Schedule { config, days }
    }

    /// Lay out the legend and every day against the same grid.
    ///
    /// Fails only when the grid itself is unusable; rejected events are
    /// reported inside each day's layout.
    pub fn render_pass(&self) -> ScheduleResult<RenderPass> {
        self.config.validate()?;
        self.config.check_renderable()?;

        let days = self
            .days
            .iter()
            .map(|day| -> ScheduleResult<DayLayout> {
                let events = day
                    .events
                    .iter()
                    .map(|entry| entry.as_ref().map_err(MalformedEvent::to_error))
                    .collect();
                Ok(DayLayout {
                    date: day.date,
                    layout: place_entries(&self.config, events)?,
                })
            })
            .collect::<ScheduleResult<Vec<_>>>()?;

        let rejected: usize = days.iter().map(|d| d.layout.rejected().count()).sum();
        info!(days = days.len(), rejected, "render pass complete");

        Ok(RenderPass {
            legend: legend_labels(&self.config),
            days,
        })
    }
}
