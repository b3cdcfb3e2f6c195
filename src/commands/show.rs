use crate::core::system_monitor::JsonReport;
use crate::core::{Config, TelemetryContext};
use crate::ui;
use anyhow::Result;
use clap::ArgMatches;

pub fn execute(matches: &ArgMatches, config: Config) -> Result<()> {
    let filter = super::metric_filter(matches);
    let as_json = matches.get_flag("json");
    let compact = matches.get_flag("compact");

    if !as_json {
        println!("Collecting host telemetry...");
    }

    let context = TelemetryContext::with_config(config);
    let snapshot = context.snapshot_filtered(&filter);

    if as_json {
        println!("{}", snapshot.to_json(!compact));
    } else {
        ui::format_snapshot(&snapshot, &filter);
    }

    Ok(())
}
