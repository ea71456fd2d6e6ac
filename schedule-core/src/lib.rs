//! Core types for schedule day views.
//!
//! This crate turns a slot grid configuration and a day's events into
//! per-event geometry:
//! - `time` and `grid` for hour/minute values and slot quantization
//! - `placement` for offset, length, priority and stacking depth
//! - `legend` for the tick labels beside the grid
//! - `document` and `settings` for loading schedules and default grids

pub mod document;
pub mod error;
pub mod event;
pub mod grid;
pub mod legend;
pub mod placement;
pub mod schedule;
pub mod settings;
pub mod time;

pub use error::{ScheduleError, ScheduleResult, TimeParseError};
pub use event::Event;
pub use grid::{SlotGridConfig, generate_ticks};
pub use placement::{Layout, PlacementRecord, place};
pub use time::TimeValue;
