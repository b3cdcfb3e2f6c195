use crate::core::{Config, TelemetryContext};
use crate::ui;
use anyhow::Result;
use chrono::Local;
use clap::ArgMatches;
use colored::Colorize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Poll step used to notice Ctrl+C between samples
const STOP_POLL: Duration = Duration::from_millis(50);

pub fn execute(matches: &ArgMatches, config: Config) -> Result<()> {
    let filter = super::metric_filter(matches);
    let interval = Duration::from_millis(*matches.get_one::<u64>("interval-ms").unwrap_or(&1000));

    let stop = Arc::new(AtomicBool::new(false));
    let stop_clone = stop.clone();

    ctrlc::set_handler(move || {
        stop_clone.store(true, Ordering::Relaxed);
    })
    .map_err(|e| anyhow::anyhow!("Failed to set Ctrl+C handler: {}", e))?;

    let context = TelemetryContext::with_config(config);

    println!("{}", "Watching host telemetry".cyan().bold());
    println!("{}", "Press Ctrl+C to stop".dimmed());
    println!();

    while !stop.load(Ordering::Relaxed) {
        let snapshot = context.snapshot_filtered(&filter);
        println!(
            "{} {}",
            Local::now().format("%H:%M:%S").to_string().dimmed(),
            ui::format_watch_line(&snapshot, &filter)
        );

        let mut waited = Duration::ZERO;
        while waited < interval && !stop.load(Ordering::Relaxed) {
            let step = STOP_POLL.min(interval - waited);
            std::thread::sleep(step);
            waited += step;
        }
    }

    let history = context.history();
    if let Some(latest) = history.latest_cpu() {
        log::debug!(
            "Stopped after {} CPU samples, last {:.1}%",
            history.cpu_load.len(),
            latest.usage_percent
        );
    }
    println!();
    println!("{}", "Stopped.".yellow());

    Ok(())
}
