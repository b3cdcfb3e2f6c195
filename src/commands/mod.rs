// Command handlers module
pub mod config;
pub mod show;
pub mod watch;

use crate::core::MetricFilter;
use clap::ArgMatches;

// Re-exports for cleaner imports
pub use config::execute as config;
pub use show::execute as show;
pub use watch::execute as watch;

/// Family flags shared by `show` and `watch`; none set selects all
pub(crate) fn metric_filter(matches: &ArgMatches) -> MetricFilter {
    MetricFilter {
        cpu: matches.get_flag("cpu"),
        gpu: matches.get_flag("gpu"),
        memory: matches.get_flag("ram"),
        disk: matches.get_flag("disk"),
        network: matches.get_flag("network"),
        host: matches.get_flag("host"),
    }
    .or_all()
}
