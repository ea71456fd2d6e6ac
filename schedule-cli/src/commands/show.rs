use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use schedule_core::settings::GridOverrides;

use crate::render::{day_grid, day_header, overdrawn, placement_line};

pub fn run(file: &Path, flags: GridOverrides) -> Result<()> {
    let schedule = super::load_schedule(file, flags)?;
    let pass = schedule.render_pass()?;

    for (position, (day, day_layout)) in schedule.days.iter().zip(&pass.days).enumerate() {
        if position > 0 {
            println!();
        }
        println!("{}", day_header(day.date, position));

        for line in day_grid(&pass.legend, &schedule.config, &day.events, &day_layout.layout) {
            println!("{}", line);
        }

        // Events the grid cannot show, or whose title another event covers
        let covered = overdrawn(&schedule.config, &day_layout.layout);
        let hidden: Vec<String> = day
            .events
            .iter()
            .zip(&day_layout.layout.entries)
            .enumerate()
            .filter(|(index, (_, entry))| {
                covered.contains(index)
                    || !matches!(entry, Ok(record) if !record.is_out_of_grid())
            })
            .map(|(_, (event, entry))| format!("   {}", placement_line(event, entry)))
            .collect();

        if !hidden.is_empty() {
            println!("{}", "  Not shown:".dimmed());
            for line in hidden {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
