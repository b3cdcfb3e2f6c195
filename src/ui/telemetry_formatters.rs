use colored::*;

use super::formatters::{format_gib, format_percent, format_size};
use crate::core::system_monitor::*;

pub fn format_snapshot(snapshot: &TelemetrySnapshot, filter: &MetricFilter) {
    let title = match &snapshot.hostname {
        Some(name) => format!("HOST TELEMETRY: {}", name),
        None => "HOST TELEMETRY".to_string(),
    };
    println!("\n{}", title.bold().bright_cyan());
    println!("{}", "=".repeat(80));

    if filter.host {
        if let Some(host) = &snapshot.host {
            print_host(host);
        }
    }

    if filter.cpu {
        print_cpu(&snapshot.cpu, snapshot.cpu_load.as_ref());
    }

    if filter.memory {
        if let Some(memory) = &snapshot.memory {
            print_memory(memory);
        }
    }

    if filter.gpu {
        print_gpu(snapshot.gpu.as_ref(), &snapshot.gpu_samples);
    }

    if filter.disk && !snapshot.disks.is_empty() {
        print_disks(&snapshot.disks);
    }

    if filter.network && !snapshot.network.is_empty() {
        print_network(&snapshot.network);
    }

    println!();
}

fn print_section_header(title: &str) {
    println!("\n{}", title.bold().green());
    println!("{}", "-".repeat(title.len()));
}

fn print_host(host: &HostRecord) {
    print_section_header("Host");
    println!("  Hostname: {}", host.hostname);
    println!("  OS: {} {}", host.os_name, host.os_version);
    println!("  Kernel: {} ({})", host.kernel_version, host.arch);
    println!("  Uptime: {}h {}m", host.uptime_secs / 3600, (host.uptime_secs % 3600) / 60);
}

fn print_cpu(cpus: &[CpuRecord], load: Option<&CpuLoadSample>) {
    print_section_header("CPU");
    for cpu in cpus {
        println!("  Model: {}", cpu.model_name());
        println!("  Vendor: {}", cpu.vendor);
        println!(
            "  Cores: {} physical, {} logical",
            cpu.count_physical, cpu.count_logical
        );
    }
    match load {
        Some(sample) => println!("  Usage: {}", format_percent(sample.usage_percent)),
        None => println!("  Usage: {}", "unavailable".dimmed()),
    }
}

fn print_memory(memory: &MemoryRecord) {
    print_section_header("Memory");
    println!(
        "  Used: {} / {} ({})",
        format_size(memory.used),
        format_gib(memory.total),
        format_percent(memory.used_percent)
    );
    println!("  Available: {}", format_size(memory.available));
    if memory.swap_total > 0 {
        println!(
            "  Swap: {} / {}",
            format_size(memory.swap_used),
            format_size(memory.swap_total)
        );
    }
}

fn print_gpu(identity: Option<&GpuIdentity>, samples: &[GpuSample]) {
    print_section_header("GPU");
    let Some(identity) = identity else {
        println!("  {}", "No supported GPU detected".dimmed());
        return;
    };
    println!("  {} ({})", identity.name, identity.vendor);
    for sample in samples {
        println!(
            "  #{}: load {}, memory {:.0}/{:.0} MiB, {:.1} W, {}°C",
            sample.card_id,
            format_percent(sample.load * 100.0),
            sample.memory_used,
            sample.memory_total,
            sample.power,
            sample.temperature
        );
    }
}

fn print_disks(disks: &[DiskRecord]) {
    print_section_header("Disks");
    for disk in disks {
        let kind = if disk.is_virtual_disk {
            " [virtual]".yellow().to_string()
        } else {
            String::new()
        };
        println!(
            "  {} ({}, {}){}: {} / {} ({})",
            disk.mount_point,
            disk.device,
            disk.fs_type,
            kind,
            format_size(disk.used),
            format_size(disk.total),
            format_percent(disk.used_percent)
        );
    }
}

fn print_network(interfaces: &[NetworkRecord]) {
    print_section_header("Network");
    for iface in interfaces {
        println!(
            "  {}: sent {}, received {}",
            iface.interface,
            format_size(iface.bytes_sent),
            format_size(iface.bytes_recv)
        );
    }
}

/// One status line for `watch` output
pub fn format_watch_line(snapshot: &TelemetrySnapshot, filter: &MetricFilter) -> String {
    let mut parts = Vec::new();

    if filter.cpu {
        if let Some(load) = &snapshot.cpu_load {
            parts.push(format!("cpu {:.1}%", load.usage_percent));
        }
    }
    if filter.memory {
        if let Some(memory) = &snapshot.memory {
            parts.push(format!("mem {:.1}%", memory.used_percent));
        }
    }
    if filter.gpu {
        for sample in &snapshot.gpu_samples {
            parts.push(format!(
                "gpu#{} {:.0}% {}°C",
                sample.card_id,
                sample.load * 100.0,
                sample.temperature
            ));
        }
    }
    if filter.disk {
        for disk in &snapshot.disks {
            parts.push(format!("{} {:.2}%", disk.mount_point, disk.used_percent));
        }
    }
    if filter.network {
        let (sent, recv) = snapshot
            .network
            .iter()
            .fold((0u64, 0u64), |(s, r), i| (s + i.bytes_sent, r + i.bytes_recv));
        parts.push(format!("net tx {} rx {}", format_size(sent), format_size(recv)));
    }
    if filter.host {
        if let Some(host) = &snapshot.host {
            parts.push(format!("up {}s", host.uptime_secs));
        }
    }

    parts.join(" | ")
}
