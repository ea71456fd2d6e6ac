pub mod config;
pub mod legend;
pub mod place;
pub mod show;

use std::path::Path;

use anyhow::{Context, Result};
use schedule_core::document::ScheduleDocument;
use schedule_core::schedule::Schedule;
use schedule_core::settings::{GridOverrides, ScheduleSettings};
use tracing::debug;

/// Load a schedule file and resolve its grid: global settings, then the
/// file's [grid] table, then command-line flags.
pub fn load_schedule(file: &Path, flags: GridOverrides) -> Result<Schedule> {
    let settings = ScheduleSettings::load()?;
    let document = ScheduleDocument::load(file)
        .with_context(|| format!("Failed to load schedule file at {}", file.display()))?;

    let overrides = document.grid.clone().merge(flags);
    let config = settings.resolve_grid(&overrides)?;
    debug!(?config, days = document.days.len(), "resolved schedule grid");

    if document.days.is_empty() {
        anyhow::bail!(
            "No days found in {}.\n\n\
            Add a day with at least one event:\n  \
            [[days]]\n  \
            [[days.events]]\n  \
            start = \"9:00\"\n  \
            end = \"10:00\"\n  \
            body = \"Standup\"",
            file.display()
        );
    }

    Ok(document.into_schedule(config))
}
