//! Clock times and durations as hour/minute pairs.
//!
//! A `TimeValue` is used both for clock times ("9:30") and for durations
//! ("0:30" as a slot length). Minutes are allowed to exceed 59: grid
//! arithmetic adds hours to hours and minutes to minutes, and only
//! formatting carries whole hours out of the minute component.

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TimeParseError;

/// Separator placed between the clock digits and the meridian.
pub const MERIDIAN_SEPARATOR: char = '\u{00A0}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TimeValue {
    pub hours: u32,
    pub minutes: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridian {
    Am,
    Pm,
}

impl fmt::Display for Meridian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Meridian::Am => write!(f, "AM"),
            Meridian::Pm => write!(f, "PM"),
        }
    }
}

impl TimeValue {
    pub const fn new(hours: u32, minutes: u32) -> Self {
        TimeValue { hours, minutes }
    }

    /// Parse either "H:MM" or a bare minute count ("90" is 0 hours, 90 minutes).
    pub fn parse(text: &str) -> Result<Self, TimeParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TimeParseError::Empty);
        }

        let parts: Vec<&str> = text.split(':').collect();
        match parts.as_slice() {
            [hours, minutes] => Ok(TimeValue {
                hours: parse_component("hours", hours)?,
                minutes: parse_component("minutes", minutes)?,
            }),
            [minutes] => Ok(TimeValue {
                hours: 0,
                minutes: parse_component("minutes", minutes)?,
            }),
            _ => Err(TimeParseError::TooManyParts(text.to_string())),
        }
    }

    /// Both components flattened onto a single minute scale.
    pub fn total_minutes(&self) -> i64 {
        i64::from(self.hours) * 60 + i64::from(self.minutes)
    }

    /// Carry whole hours out of the minute component.
    pub fn normalized(&self) -> Self {
        TimeValue {
            hours: self.hours.saturating_add(self.minutes / 60),
            minutes: self.minutes % 60,
        }
    }

    pub fn meridian(&self) -> Meridian {
        if self.normalized().hours >= 12 {
            Meridian::Pm
        } else {
            Meridian::Am
        }
    }

    /// Hour shown on a 12-hour clock. Noon stays 12 and midnight stays 0.
    pub fn display_hours(&self) -> u32 {
        let hours = self.normalized().hours;
        if hours > 12 { hours - 12 } else { hours }
    }
}

fn parse_component(component: &'static str, value: &str) -> Result<u32, TimeParseError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| TimeParseError::InvalidComponent {
            component,
            value: value.to_string(),
        })
}

/// Component-wise addition, no carry.
impl Add for TimeValue {
    type Output = TimeValue;

    fn add(self, rhs: TimeValue) -> TimeValue {
        TimeValue {
            hours: self.hours.saturating_add(rhs.hours),
            minutes: self.minutes.saturating_add(rhs.minutes),
        }
    }
}

impl FromStr for TimeValue {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeValue::parse(s)
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let normalized = self.normalized();
        write!(
            f,
            "{}:{:02}{}{}",
            self.display_hours(),
            normalized.minutes,
            MERIDIAN_SEPARATOR,
            self.meridian()
        )
    }
}
