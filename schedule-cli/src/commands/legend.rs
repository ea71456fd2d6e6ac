use anyhow::Result;
use schedule_core::legend::legend_labels;
use schedule_core::settings::{GridOverrides, ScheduleSettings};

pub fn run(flags: GridOverrides) -> Result<()> {
    let settings = ScheduleSettings::load()?;

    for label in labels(&settings, &flags)? {
        println!("{}", label);
    }

    Ok(())
}

/// Legend for the resolved grid. No placement happens here, so any slot
/// length is accepted; only the slot count is bounded.
fn labels(settings: &ScheduleSettings, flags: &GridOverrides) -> Result<Vec<String>> {
    let config = settings.resolve_grid(flags)?;
    config.check_renderable()?;
    Ok(legend_labels(&config))
}
