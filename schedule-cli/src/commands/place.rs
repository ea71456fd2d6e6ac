use std::path::Path;

use anyhow::Result;
use schedule_core::schedule::{RenderPass, Schedule, entry_title};
use schedule_core::settings::GridOverrides;
use serde_json::{Value, json};

use crate::render::{day_header, placement_line};

pub fn run(file: &Path, flags: GridOverrides, as_json: bool) -> Result<()> {
    let schedule = super::load_schedule(file, flags)?;
    let pass = schedule.render_pass()?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&placement_json(&schedule, &pass))?);
        return Ok(());
    }

    for (position, (day, day_layout)) in schedule.days.iter().zip(&pass.days).enumerate() {
        if position > 0 {
            println!();
        }
        println!("{}", day_header(day.date, position));

        for (event, entry) in day.events.iter().zip(&day_layout.layout.entries) {
            println!("  {}", placement_line(event, entry));
        }
    }

    Ok(())
}

/// Machine-readable form of a render pass.
fn placement_json(schedule: &Schedule, pass: &RenderPass) -> Value {
    let days: Vec<Value> = schedule
        .days
        .iter()
        .zip(&pass.days)
        .map(|(day, day_layout)| {
            let events: Vec<Value> = day
                .events
                .iter()
                .zip(&day_layout.layout.entries)
                .enumerate()
                .map(|(index, (event, entry))| {
                    let mut value = json!({
                        "index": index,
                        "title": entry_title(event),
                    });
                    if let Ok(event) = event {
                        value["description"] = json!(event.description);
                        value["time"] = json!(event.time_range_label());
                    }
                    match entry {
                        Ok(record) => value["placement"] = json!(record),
                        Err(e) => value["error"] = json!(e.to_string()),
                    }
                    value
                })
                .collect();

            json!({
                "date": day.date,
                "columns": day_layout.layout.columns(),
                "events": events,
            })
        })
        .collect();

    json!({
        "grid": schedule.config,
        "legend": pass.legend,
        "days": days,
    })
}
