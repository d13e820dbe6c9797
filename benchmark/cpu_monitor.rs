// cpu_monitor.rs - CPU usage sampled while a transfer benchmark runs
use sysinfo::{CpuRefreshKind, ProcessRefreshKind, RefreshKind, System};
use std::sync::{Arc, atomic::{AtomicBool, Ordering}};
use std::thread;
use std::time::Duration;

const SAMPLE_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, Default)]
pub struct CpuStats {
    pub avg_cpu_percent: f32,
    pub peak_cpu_percent: f32,
    pub samples: usize,
}

/// Run `benchmark_fn` on the current thread while a sampler thread records
/// this process's CPU usage.
pub fn run_with_cpu_monitor<F, R>(name: &str, benchmark_fn: F) -> (R, CpuStats)
where
    F: FnOnce() -> R,
{
    tracing::debug!(case = name, "starting cpu monitor");

    let stop = Arc::new(AtomicBool::new(false));
    let stop_clone = Arc::clone(&stop);

    let monitor_handle = thread::spawn(move || {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => pid,
            Err(_) => return CpuStats::default(),
        };
        let mut sys = System::new_with_specifics(
            RefreshKind::new()
                .with_cpu(CpuRefreshKind::everything())
                .with_processes(ProcessRefreshKind::everything())
        );

        let mut samples = vec![];
        sys.refresh_cpu();
        sys.refresh_process(pid);

        while !stop_clone.load(Ordering::Relaxed) {
            thread::sleep(SAMPLE_INTERVAL);
            sys.refresh_cpu();
            if sys.refresh_process(pid) {
                if let Some(process) = sys.process(pid) {
                    samples.push(process.cpu_usage());
                }
            }
        }

        let avg = if !samples.is_empty() {
            samples.iter().sum::<f32>() / samples.len() as f32
        } else {
            0.0
        };

        let peak = samples.iter().copied().fold(0.0f32, f32::max);

        CpuStats {
            avg_cpu_percent: avg,
            peak_cpu_percent: peak,
            samples: samples.len(),
        }
    });

    let result = benchmark_fn();

    stop.store(true, Ordering::Relaxed);
    let cpu_stats = monitor_handle.join().unwrap_or_default();

    (result, cpu_stats)
}
