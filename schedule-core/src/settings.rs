//! Global schedule settings and grid resolution.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ScheduleError, ScheduleResult};
use crate::grid::SlotGridConfig;

static DEFAULT_SLOT_START: &str = "9:00";
static DEFAULT_SLOT_LENGTH: &str = "1:00";
const DEFAULT_SLOTS: i64 = 8;

fn default_slot_start() -> String {
    DEFAULT_SLOT_START.to_string()
}

fn default_slot_length() -> String {
    DEFAULT_SLOT_LENGTH.to_string()
}

fn default_slots() -> i64 {
    DEFAULT_SLOTS
}

/// Grid attributes in their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSettings {
    #[serde(default = "default_slot_start")]
    pub slot_start: String,

    #[serde(default = "default_slot_length")]
    pub slot_length: String,

    #[serde(default = "default_slots")]
    pub slots: i64,
}

impl Default for GridSettings {
    fn default() -> Self {
        GridSettings {
            slot_start: default_slot_start(),
            slot_length: default_slot_length(),
            slots: default_slots(),
        }
    }
}

impl GridSettings {
    /// Replace every attribute the overrides provide.
    pub fn apply(&self, overrides: &GridOverrides) -> GridSettings {
        GridSettings {
            slot_start: overrides
                .slot_start
                .clone()
                .unwrap_or_else(|| self.slot_start.clone()),
            slot_length: overrides
                .slot_length
                .clone()
                .unwrap_or_else(|| self.slot_length.clone()),
            slots: overrides.slots.unwrap_or(self.slots),
        }
    }

    pub fn to_config(&self) -> ScheduleResult<SlotGridConfig> {
        SlotGridConfig::parse(&self.slot_start, &self.slot_length, self.slots)
    }
}

/// Partial grid attributes from a schedule document or the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GridOverrides {
    pub slot_start: Option<String>,
    pub slot_length: Option<String>,
    pub slots: Option<i64>,
}

impl GridOverrides {
    /// Layer `other` on top of `self`; values set in `other` win.
    pub fn merge(self, other: GridOverrides) -> GridOverrides {
        GridOverrides {
            slot_start: other.slot_start.or(self.slot_start),
            slot_length: other.slot_length.or(self.slot_length),
            slots: other.slots.or(self.slots),
        }
    }
}

/// Global configuration at ~/.config/schedule/config.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSettings {
    #[serde(default)]
    pub grid: GridSettings,
}

impl ScheduleSettings {
    pub fn config_path() -> ScheduleResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ScheduleError::Settings("Could not determine config directory".into()))?
            .join("schedule");

        Ok(config_dir.join("config.toml"))
    }

    /// Load settings from the default location, writing a template there first
    /// if nothing exists yet.
    pub fn load() -> ScheduleResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load settings from `path` (optional) with `SCHEDULE_*` environment
    /// variables layered on top, e.g. `SCHEDULE_GRID__SLOTS=12`.
    pub fn load_from(path: &Path) -> ScheduleResult<Self> {
        debug!(path = %path.display(), "loading settings");

        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("SCHEDULE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| ScheduleError::Settings(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ScheduleError::Settings(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> ScheduleResult<()> {
        let contents = format!(
            "\
# schedule configuration

# Default grid used when a schedule file has no [grid] table:
# [grid]
# slot_start = \"{}\"
# slot_length = \"{}\"
# slots = {}
",
            DEFAULT_SLOT_START, DEFAULT_SLOT_LENGTH, DEFAULT_SLOTS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ScheduleError::Settings(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ScheduleError::Settings(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Resolve the grid for one render: these settings, then each layer of
    /// overrides in turn.
    pub fn resolve_grid(&self, overrides: &GridOverrides) -> ScheduleResult<SlotGridConfig> {
        self.grid.apply(overrides).to_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::TimeValue;

    #[test]
    fn defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ScheduleSettings::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(settings.grid, GridSettings::default());
    }

    #[test]
    fn default_template_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");
        ScheduleSettings::create_default_config(&path).unwrap();

        let settings = ScheduleSettings::load_from(&path).unwrap();
        assert_eq!(settings.grid.slots, 8);
        assert_eq!(settings.grid.slot_start, "9:00");
    }

    #[test]
    fn file_values_fill_partial_grid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[grid]\nslot_length = \"0:15\"\n").unwrap();

        let settings = ScheduleSettings::load_from(&path).unwrap();
        assert_eq!(settings.grid.slot_length, "0:15");
        assert_eq!(settings.grid.slot_start, "9:00");
    }

    #[test]
    fn overrides_layer_in_order() {
        let document = GridOverrides {
            slot_start: Some("8:00".into()),
            slots: Some(10),
            ..Default::default()
        };
        let flags = GridOverrides {
            slots: Some(4),
            ..Default::default()
        };

        let config = ScheduleSettings::default()
            .resolve_grid(&document.merge(flags))
            .unwrap();
        assert_eq!(config.slot_start, TimeValue::new(8, 0));
        assert_eq!(config.slot_length, TimeValue::new(1, 0));
        assert_eq!(config.slots, 4);
    }

    #[test]
    fn bad_override_names_field() {
        let overrides = GridOverrides {
            slot_start: Some("noon".into()),
            ..Default::default()
        };
        let err = ScheduleSettings::default()
            .resolve_grid(&overrides)
            .unwrap_err();
        assert!(matches!(err, ScheduleError::Parse { ref field, .. } if field == "slot-start"));
    }
}
