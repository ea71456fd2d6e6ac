//! Tick labels for the time column beside the schedule days.

use crate::grid::SlotGridConfig;

/// One label per slot, e.g. "9:30 AM".
pub fn legend_labels(config: &SlotGridConfig) -> Vec<String> {
    config.ticks().map(|tick| tick.to_string()).collect()
}
