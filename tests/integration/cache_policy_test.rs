use super::fake_provider::{FakeProvider, FakeState};
use hostscope::core::system_monitor::{ManualClock, NullDiskClassifier, PartitionUsage};
use hostscope::core::{Config, MetricFilter, TelemetryContext};
use std::sync::{Arc, Barrier};
use std::time::{Duration, Instant};

fn context_with_clock() -> (TelemetryContext, Arc<FakeState>, Arc<ManualClock>) {
    let (provider, state) = FakeProvider::new();
    let clock = Arc::new(ManualClock::new());
    let context = TelemetryContext::builder(Box::new(provider))
        .classifier(Box::new(NullDiskClassifier))
        .clock(Box::new(Arc::clone(&clock)))
        .build();
    (context, state, clock)
}

#[test]
fn test_memory_is_cached_within_interval() {
    let (context, state, clock) = context_with_clock();

    assert!(context.memory().is_some());
    clock.advance(Duration::from_millis(500));
    assert!(context.memory().is_some());

    assert_eq!(FakeState::calls(&state.memory_calls), 1);
}

#[test]
fn test_memory_refetched_after_interval() {
    let (context, state, clock) = context_with_clock();

    context.memory();
    clock.advance(Duration::from_millis(1_001));
    context.memory();

    assert_eq!(FakeState::calls(&state.memory_calls), 2);
}

#[test]
fn test_unchanged_memory_keeps_same_instance() {
    let (context, state, clock) = context_with_clock();

    let first = context.memory().unwrap();
    clock.advance(Duration::from_secs(2));
    let second = context.memory().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(FakeState::calls(&state.memory_calls), 2);
}

#[test]
fn test_changed_memory_replaces_instance() {
    let (context, state, clock) = context_with_clock();

    let first = context.memory().unwrap();
    *state.memory_used_percent.lock() = 43.0;
    clock.advance(Duration::from_secs(2));
    let second = context.memory().unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(second.used_percent, 43.0);
}

#[test]
fn test_disks_use_sixty_second_interval() {
    let (context, state, clock) = context_with_clock();
    *state.partitions.lock() = vec![PartitionUsage {
        mount_point: "/".to_string(),
        device: "/dev/sda1".to_string(),
        fs_name: "EXT4".to_string(),
        total: 1_000,
        free: 250,
        used: 750,
    }];

    let disks = context.disks().unwrap();
    assert_eq!(disks[0].used_percent, 75.0);

    clock.advance(Duration::from_secs(30));
    context.disks();
    assert_eq!(FakeState::calls(&state.disk_calls), 1);

    clock.advance(Duration::from_secs(31));
    context.disks();
    assert_eq!(FakeState::calls(&state.disk_calls), 2);
}

#[test]
fn test_cpu_info_fetched_once() {
    let (context, state, clock) = context_with_clock();

    context.cpu_info();
    clock.advance(Duration::from_secs(3_600));
    let cpus = context.cpu_info().unwrap();

    assert_eq!(cpus[0].count_logical, 12);
    assert_eq!(FakeState::calls(&state.cpu_info_calls), 1);
    assert_eq!(context.cpu_model_name().unwrap(), "Intel i7-8700K @3.70GHz");
}

#[test]
fn test_cpu_load_feeds_history() {
    let (context, state, clock) = context_with_clock();

    context.cpu_load();
    *state.cpu_percent.lock() = 30.0;
    clock.advance(Duration::from_secs(1));
    context.cpu_load();

    let history: Vec<f64> = context
        .cpu_load_history()
        .iter()
        .map(|s| s.usage_percent)
        .collect();
    assert_eq!(history, vec![12.0, 30.0]);
}

#[test]
fn test_hostname_cached_after_host_fetch() {
    let (context, state, clock) = context_with_clock();

    assert_eq!(context.hostname().unwrap().as_str(), "build-box");
    clock.advance(Duration::from_secs(60));
    state.set_failing(true);

    assert_eq!(context.hostname().unwrap().as_str(), "build-box");
}

#[test]
fn test_failure_before_first_value_yields_none() {
    let (context, state, _clock) = context_with_clock();
    state.set_failing(true);

    assert!(context.memory().is_none());
    assert!(context.network().is_none());
    assert!(context.cpu_info().is_none());
}

#[test]
fn test_failure_keeps_last_good_value() {
    let (context, state, clock) = context_with_clock();

    let first = context.network().unwrap();
    state.set_failing(true);
    clock.advance(Duration::from_secs(5));
    let second = context.network().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(FakeState::calls(&state.network_calls), 2);
}

#[test]
fn test_families_refresh_independently() {
    let (context, state, clock) = context_with_clock();

    context.memory();
    context.disks();
    clock.advance(Duration::from_secs(2));
    context.memory();
    context.disks();

    assert_eq!(FakeState::calls(&state.memory_calls), 2);
    assert_eq!(FakeState::calls(&state.disk_calls), 1);
}

#[test]
fn test_configured_interval_is_honoured() {
    let (provider, state) = FakeProvider::new();
    let clock = Arc::new(ManualClock::new());
    let mut config = Config::default();
    config.intervals.memory_ms = 10_000;

    let context = TelemetryContext::builder(Box::new(provider))
        .classifier(Box::new(NullDiskClassifier))
        .clock(Box::new(Arc::clone(&clock)))
        .config(config)
        .build();

    context.memory();
    clock.advance(Duration::from_secs(5));
    context.memory();

    assert_eq!(FakeState::calls(&state.memory_calls), 1);
}

#[test]
fn test_snapshot_without_gpu() {
    let (context, _state, _clock) = context_with_clock();

    let snapshot = context.snapshot();

    assert_eq!(snapshot.hostname.as_deref(), Some("build-box"));
    assert!(snapshot.gpu.is_none());
    assert!(snapshot.gpu_samples.is_empty());
    assert_eq!(snapshot.network.len(), 1);
    assert!(!context.has_gpu());
}

#[test]
fn test_concurrent_readers_share_one_fetch() {
    let (context, state, _clock) = context_with_clock();
    *state.memory_delay.lock() = Duration::from_millis(100);
    let context = Arc::new(context);
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let context = Arc::clone(&context);
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                barrier.wait();
                context.memory().is_some()
            })
        })
        .collect();

    let start = Instant::now();
    for handle in handles {
        assert!(handle.join().unwrap());
    }

    assert_eq!(FakeState::calls(&state.memory_calls), 1);
    // One slow fetch, not eight in a row
    assert!(start.elapsed() < Duration::from_millis(800));
}

#[test]
fn test_filtered_snapshot_only_queries_selected_families() {
    let (context, state, _clock) = context_with_clock();
    let filter = MetricFilter {
        cpu: true,
        ..MetricFilter::none()
    };

    let snapshot = context.snapshot_filtered(&filter);

    assert!(snapshot.cpu_load.is_some());
    assert!(snapshot.memory.is_none());
    assert!(snapshot.disks.is_empty());
    assert!(snapshot.network.is_empty());
    assert!(snapshot.host.is_none());
    assert_eq!(FakeState::calls(&state.cpu_percent_calls), 1);
    assert_eq!(FakeState::calls(&state.memory_calls), 0);
    assert_eq!(FakeState::calls(&state.disk_calls), 0);
    assert_eq!(FakeState::calls(&state.network_calls), 0);
}
