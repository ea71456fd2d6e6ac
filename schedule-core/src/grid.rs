//! Slot grid configuration and tick generation.

use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};
use crate::time::TimeValue;

/// Largest grid whose ticks and rows are materialized for display.
pub const MAX_RENDERED_SLOTS: i64 = 10_000;

/// Quantization parameters for one schedule: where the grid starts, how long
/// each slot is, and how many slots are shown.
///
/// Shared read-only by the legend and every day for the length of a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotGridConfig {
    pub slot_start: TimeValue,
    pub slot_length: TimeValue,
    pub slots: i64,
}

impl SlotGridConfig {
    pub fn new(slot_start: TimeValue, slot_length: TimeValue, slots: i64) -> Self {
        SlotGridConfig {
            slot_start,
            slot_length,
            slots,
        }
    }

    /// Build a config from its textual attributes.
    pub fn parse(slot_start: &str, slot_length: &str, slots: i64) -> ScheduleResult<Self> {
        Ok(SlotGridConfig {
            slot_start: TimeValue::parse(slot_start)
                .map_err(|e| ScheduleError::parse("slot-start", e))?,
            slot_length: TimeValue::parse(slot_length)
                .map_err(|e| ScheduleError::parse("slot-length", e))?,
            slots,
        })
    }

    pub fn minutes_per_slot(&self) -> i64 {
        self.slot_length.total_minutes()
    }

    /// Minute of the day at which slot 0 begins.
    pub fn minutes_top(&self) -> i64 {
        self.slot_start.total_minutes()
    }

    /// Number of slot indices that exist, treating a non-positive count as none.
    pub fn slot_count(&self) -> usize {
        usize::try_from(self.slots).unwrap_or(0)
    }

    /// Reject configs whose slot arithmetic would divide by zero.
    pub fn validate(&self) -> ScheduleResult<()> {
        if self.minutes_per_slot() <= 0 {
            return Err(ScheduleError::InvalidConfig(format!(
                "slot length must be a positive duration (got {}:{:02})",
                self.slot_length.hours, self.slot_length.minutes
            )));
        }
        Ok(())
    }

    /// Reject grids too large to draw. Placement itself has no such limit.
    pub fn check_renderable(&self) -> ScheduleResult<()> {
        if self.slots > MAX_RENDERED_SLOTS {
            return Err(ScheduleError::InvalidConfig(format!(
                "{} slots is more than the {} that can be rendered",
                self.slots, MAX_RENDERED_SLOTS
            )));
        }
        Ok(())
    }

    /// Start time of every slot, in order.
    pub fn ticks(&self) -> Ticks {
        Ticks {
            next: self.slot_start,
            step: self.slot_length,
            remaining: self.slot_count(),
        }
    }
}

/// Iterator over slot start times. Bounded by the slot count, never by time,
/// so a zero slot length yields `slots` copies of the grid start.
#[derive(Debug, Clone)]
pub struct Ticks {
    next: TimeValue,
    step: TimeValue,
    remaining: usize,
}

impl Iterator for Ticks {
    type Item = TimeValue;

    fn next(&mut self) -> Option<TimeValue> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next;
        self.next = current + self.step;
        self.remaining -= 1;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Ticks {}

/// Collect the start time of every slot in the grid.
pub fn generate_ticks(config: &SlotGridConfig) -> Vec<TimeValue> {
    config.ticks().collect()
}
