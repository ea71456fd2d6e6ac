use anyhow::Result;
use owo_colors::OwoColorize;
use schedule_core::settings::ScheduleSettings;

pub fn run() -> Result<()> {
    let config_path = ScheduleSettings::config_path()?;
    let settings = ScheduleSettings::load()?;

    println!("{}", "Paths".bold());
    println!("  Config:       {}", config_path.display());
    println!();
    println!("{}", "Default grid".bold());
    println!("  slot_start:   {}", settings.grid.slot_start);
    println!("  slot_length:  {}", settings.grid.slot_length);
    println!("  slots:        {}", settings.grid.slots);

    Ok(())
}
