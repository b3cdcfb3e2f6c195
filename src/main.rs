use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use colored::*;

use hostscope::commands;
use hostscope::core::config::Config;

/// Family selection flags shared by `show` and `watch`
fn family_args() -> Vec<Arg> {
    vec![
        Arg::new("cpu")
            .long("cpu")
            .help("Show CPU identity and usage")
            .action(ArgAction::SetTrue),
        Arg::new("gpu")
            .long("gpu")
            .help("Show GPU metrics")
            .action(ArgAction::SetTrue),
        Arg::new("ram")
            .long("ram")
            .help("Show memory usage")
            .action(ArgAction::SetTrue),
        Arg::new("disk")
            .long("disk")
            .help("Show disk partitions")
            .action(ArgAction::SetTrue),
        Arg::new("network")
            .long("network")
            .help("Show network interface counters")
            .action(ArgAction::SetTrue),
        Arg::new("host")
            .long("host")
            .help("Show host and OS details")
            .action(ArgAction::SetTrue),
    ]
}

fn build_cli() -> Command {
    Command::new("hostscope")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Local host telemetry: CPU, memory, disks, network and GPU")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .global(true)
                .help("Enable debug logging (RUST_LOG overrides)")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("show")
                .about("Collect and print one telemetry snapshot")
                .long_about("Collect and print one telemetry snapshot\n\nWith no family flags every family is shown.")
                .args(family_args())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the snapshot as JSON")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("compact")
                        .long("compact")
                        .requires("json")
                        .help("Single-line JSON instead of indented")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("watch")
                .about("Print a status line per interval until Ctrl+C")
                .args(family_args())
                .arg(
                    Arg::new("interval-ms")
                        .short('i')
                        .long("interval-ms")
                        .value_name("MS")
                        .help("Milliseconds between lines")
                        .value_parser(clap::value_parser!(u64).range(50..))
                        .default_value("1000"),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Show the effective configuration")
                .arg(
                    Arg::new("path")
                        .long("path")
                        .help("Only print the config file location")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("init")
                        .long("init")
                        .conflicts_with("path")
                        .help("Write the current settings if no config file exists")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    hostscope::init_logging(matches.get_flag("verbose"));

    let config = Config::load().unwrap_or_else(|e| {
        log::warn!("Could not load config, using defaults: {:#}", e);
        Config::default()
    });

    match matches.subcommand() {
        Some(("show", sub_matches)) => commands::show(sub_matches, config)?,
        Some(("watch", sub_matches)) => commands::watch(sub_matches, config)?,
        Some(("config", sub_matches)) => commands::config(sub_matches, &config)?,
        _ => {
            println!("{}", "Use 'hostscope --help' for more information.".dimmed());
        }
    }

    Ok(())
}
