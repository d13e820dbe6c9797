// throughput.rs - Exact-transfer throughput over socket pairs and TCP loopback
use crate::cpu_monitor::{run_with_cpu_monitor, CpuStats};
use std::io::Result;
use std::net::{TcpListener, TcpStream};
use std::os::fd::AsFd;
use std::os::unix::net::UnixStream;
use std::thread;
use std::time::{Duration, Instant};

pub struct TransferResult {
    pub test_name: String,
    pub chunk_size: usize,
    pub total_bytes: usize,
    pub duration: Duration,
    pub mib_per_sec: f64,
    pub cpu: CpuStats,
}

fn payload(total_bytes: usize) -> Vec<u8> {
    (0..total_bytes).map(|i| (i % 251) as u8).collect()
}

/// Push `data` through `tx` in `chunk_size` writes while the current thread
/// reads it back from `rx` in matching chunks; verifies the bytes at the end.
fn pump<T, R>(tx: T, rx: R, data: Vec<u8>, chunk_size: usize) -> Duration
where
    T: AsFd + Send + 'static,
    R: AsFd,
{
    let total = data.len();
    let expected = data.clone();
    let start = Instant::now();

    let writer = thread::spawn(move || {
        for chunk in data.chunks(chunk_size) {
            eterm::write_all(&tx, chunk);
        }
        tx
    });

    let mut received = vec![0u8; total];
    for chunk in received.chunks_mut(chunk_size) {
        eterm::read_all(&rx, chunk);
    }
    let duration = start.elapsed();

    if writer.join().is_err() {
        eprintln!("writer thread panicked");
    }
    if received != expected {
        eprintln!("WARNING: payload mismatch over {} bytes", total);
    }

    duration
}

fn result(test_name: String, chunk_size: usize, total_bytes: usize, duration: Duration, cpu: CpuStats) -> TransferResult {
    TransferResult {
        test_name,
        chunk_size,
        total_bytes,
        duration,
        mib_per_sec: total_bytes as f64 / (1024.0 * 1024.0) / duration.as_secs_f64().max(f64::EPSILON),
        cpu,
    }
}

/// Benchmark a Unix socket pair with a single chunk size
pub fn bench_unix_pair(total_bytes: usize, chunk_size: usize) -> Result<TransferResult> {
    println!("\n=== Benchmarking Unix socket pair ({}B chunks) ===", chunk_size);

    let (a, b) = UnixStream::pair()?;
    let (duration, cpu) = run_with_cpu_monitor("unix-pair", || pump(a, b, payload(total_bytes), chunk_size));

    Ok(result("Unix pair".to_string(), chunk_size, total_bytes, duration, cpu))
}

/// Benchmark TCP over loopback
pub fn bench_tcp_loopback(total_bytes: usize, chunk_size: usize) -> Result<TransferResult> {
    println!("\n=== Benchmarking TCP loopback ({}B chunks) ===", chunk_size);

    let listener = TcpListener::bind("127.0.0.1:0")?;
    let client = TcpStream::connect(listener.local_addr()?)?;
    let (server, _) = listener.accept()?;
    client.set_nodelay(true)?;

    let (duration, cpu) = run_with_cpu_monitor("tcp-loopback", || pump(client, server, payload(total_bytes), chunk_size));

    Ok(result("TCP loopback".to_string(), chunk_size, total_bytes, duration, cpu))
}

/// Sweep chunk sizes on a Unix socket pair
pub fn bench_chunk_sizes(total_bytes: usize) -> Result<Vec<TransferResult>> {
    let mut results = vec![];
    for chunk_size in [64, 512, 4096, 65536, 1024 * 1024] {
        let mut r = bench_unix_pair(total_bytes, chunk_size)?;
        r.test_name = format!("Chunk {}B", chunk_size);
        results.push(r);
    }
    Ok(results)
}

/// Non-blocking writer with a tiny send buffer: every few KiB the writer hits
/// EAGAIN and sleeps for the configured backoff.
pub fn bench_backpressure(total_bytes: usize, send_buffer: usize) -> Result<TransferResult> {
    println!("\n=== Benchmarking backpressure (SO_SNDBUF={}, backoff={:?}) ===",
        send_buffer, eterm::retry_policy().write_backoff);

    let (a, b) = UnixStream::pair()?;
    let mut tx = eterm::UnixSocketTransport::from_stream(a.try_clone()?);
    tx.set_nonblocking(true)?;
    tx.set_send_buffer_size(send_buffer)?;
    drop(tx);

    let chunk_size = 64 * 1024;
    let (duration, cpu) = run_with_cpu_monitor("backpressure", || pump(a, b, payload(total_bytes), chunk_size));

    Ok(result("Backpressure".to_string(), chunk_size, total_bytes, duration, cpu))
}

fn cpu_summary(result: &TransferResult) -> String {
    format!(
        "{} CPU Stats: avg={:.1}%, peak={:.1}%, samples={}",
        result.test_name,
        result.cpu.avg_cpu_percent,
        result.cpu.peak_cpu_percent,
        result.cpu.samples
    )
}

pub fn print_transfer_results(title: &str, results: &[TransferResult]) {
    println!("\n╔═══════════════════════════════════════════════════════════════════════════════╗");
    println!("║ {:<77} ║", title);
    println!("╠═══════════════════════════════════════════════════════════════════════════════╣");
    println!("║ Test Name          │  Chunk  │ Duration │   Bytes    │   MiB/s    │  CPU avg ║");
    println!("╠═══════════════════════════════════════════════════════════════════════════════╣");

    for result in results {
        println!("║ {:<18} │ {:>7} │ {:>7.3}s │ {:>10} │ {:>10.1} │ {:>7.1}% ║",
            result.test_name,
            result.chunk_size,
            result.duration.as_secs_f64(),
            result.total_bytes,
            result.mib_per_sec,
            result.cpu.avg_cpu_percent,
        );
    }

    println!("╚═══════════════════════════════════════════════════════════════════════════════╝");

    for result in results {
        println!("{}", cpu_summary(result));
    }

    if let Some(best) = results.iter().max_by(|a, b| a.mib_per_sec.total_cmp(&b.mib_per_sec)) {
        println!("\nHighest throughput: {} ({:.1} MiB/s)", best.test_name, best.mib_per_sec);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_summary_reports_peak_and_sample_count() {
        let result = TransferResult {
            test_name: "throughput-unix".to_string(),
            chunk_size: 65536,
            total_bytes: 1024,
            duration: Duration::from_millis(10),
            mib_per_sec: 0.1,
            cpu: CpuStats {
                avg_cpu_percent: 12.5,
                peak_cpu_percent: 80.0,
                samples: 7,
            },
        };
        assert_eq!(
            cpu_summary(&result),
            "throughput-unix CPU Stats: avg=12.5%, peak=80.0%, samples=7"
        );
    }
}
