//! Terminal rendering for placements and day grids.

use chrono::NaiveDate;
use owo_colors::OwoColorize;
use schedule_core::placement::Layout;
use schedule_core::schedule::{DayEvent, entry_title};
use schedule_core::{PlacementRecord, ScheduleResult, SlotGridConfig};

/// Width of one stacking column in the text grid
const COLUMN_WIDTH: usize = 18;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for PlacementRecord {
    fn render(&self) -> String {
        let geometry = format!(
            "slot {:>3}  span {:>2}  prio {:>3}",
            self.offset_slots, self.length_slots, self.priority
        );
        match self.depth {
            Some(depth) => format!("{}  depth {}", geometry, depth.to_string().cyan()),
            None => format!("{}  {}", geometry, "outside grid".yellow()),
        }
    }
}

/// "MON 19" for dated days, "Day 2" otherwise.
pub fn day_header(date: Option<NaiveDate>, position: usize) -> String {
    let label = match date {
        Some(date) => date.format("%a %-d").to_string().to_uppercase(),
        None => format!("Day {}", position + 1),
    };
    label.bold().to_string()
}

/// One line describing an event and its placement or rejection.
pub fn placement_line(event: &DayEvent, entry: &ScheduleResult<PlacementRecord>) -> String {
    let title = entry_title(event);
    let time = match event {
        Ok(event) => event.time_range_label().replace('\u{00A0}', " "),
        Err(_) => String::new(),
    };
    match entry {
        Ok(record) => format!("{}  {} {}", record.render(), title, time.dimmed()),
        Err(e) => format!("{} {} {}", "✗".red(), title.red(), e.to_string().dimmed()),
    }
}

/// Draw a day as rows of slots: the legend label, then one cell per stacking
/// column holding the title of the event that starts there, or a bar where
/// an event continues. A cell claimed by more than one event is drawn with
/// `!` in place of the bar.
pub fn day_grid(
    legend: &[String],
    config: &SlotGridConfig,
    events: &[DayEvent],
    layout: &Layout,
) -> Vec<String> {
    let label_width = legend.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let columns = layout.columns().max(1);

    legend
        .iter()
        .enumerate()
        .map(|(slot, label)| {
            let cells: Vec<String> = (0..columns)
                .map(|column| render_cell(slot, column, config, events, layout))
                .collect();
            format!(
                "  {} {}",
                format!("{:>width$}", label, width = label_width).dimmed(),
                cells.join(" ")
            )
        })
        .collect()
}

/// Placed events covering `slot` at stacking `column`, in input order.
fn occupants<'a>(
    slot: usize,
    column: usize,
    config: &SlotGridConfig,
    layout: &'a Layout,
) -> Vec<(usize, &'a PlacementRecord)> {
    layout
        .placed()
        .filter(|(_, record)| {
            record.depth == Some(column) && record.grid_span(config.slots).contains(&slot)
        })
        .collect()
}

fn render_cell(
    slot: usize,
    column: usize,
    config: &SlotGridConfig,
    events: &[DayEvent],
    layout: &Layout,
) -> String {
    let occupants = occupants(slot, column, config, layout);
    let marker = if occupants.len() > 1 { "!" } else { "┃" };

    let starting = occupants
        .iter()
        .find(|(_, record)| record.grid_span(config.slots).start == slot);

    match (starting, occupants.is_empty()) {
        (Some((index, _)), _) => {
            let title = fit(entry_title(&events[*index]), COLUMN_WIDTH - 2);
            format!("{} {:<width$}", marker, title, width = COLUMN_WIDTH - 2)
                .green()
                .to_string()
        }
        (None, false) => format!("{}{:width$}", marker, "", width = COLUMN_WIDTH - 1)
            .green()
            .to_string(),
        (None, true) => format!("·{:width$}", "", width = COLUMN_WIDTH - 1)
            .dimmed()
            .to_string(),
    }
}

/// Placed events whose title never reaches the grid because an earlier event
/// starts in the same cell.
pub fn overdrawn(config: &SlotGridConfig, layout: &Layout) -> Vec<usize> {
    layout
        .placed()
        .filter_map(|(index, record)| {
            let column = record.depth?;
            let start = record.grid_span(config.slots).start;
            occupants(start, column, config, layout)
                .iter()
                .find(|(_, other)| other.grid_span(config.slots).start == start)
                .filter(|(first, _)| *first != index)
                .map(|_| index)
        })
        .collect()
}

/// Truncate to `width` characters, marking the cut with an ellipsis.
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
