// eterm-bench: exact-transfer throughput benchmark suite
// Drives eterm::write_all / eterm::read_all over socket pairs and TCP loopback
mod cpu_monitor;
mod throughput;

use clap::{Parser, Subcommand};
use std::process;
use throughput::TransferResult;

const MIB: usize = 1024 * 1024;

#[derive(Parser)]
#[command(name = "eterm-bench")]
#[command(about = "eterm exact-transfer benchmark suite", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Run all benchmark cases
    #[arg(short, long)]
    all: bool,

    /// Run specific case (shorthand for 'case' subcommand)
    #[arg(short = 'c', long = "case", value_name = "NAME")]
    case: Option<String>,

    /// Megabytes moved per case
    #[arg(short = 's', long = "size-mib", default_value_t = 64, global = true)]
    size_mib: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Run specific benchmark case
    Case {
        /// Case name to run
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// List all available benchmark cases
    List,
}

fn print_banner() {
    println!("╔═══════════════════════════════════════════════════════════════════════════╗");
    println!("║                                                                           ║");
    println!("║                   ETERM EXACT-TRANSFER BENCHMARK SUITE                    ║");
    println!("║                                                                           ║");
    println!("║  Testing: write_all/read_all, readiness polling, EAGAIN backoff           ║");
    println!("║                                                                           ║");
    println!("╚═══════════════════════════════════════════════════════════════════════════╝");
}

fn list_cases() {
    println!("\n=== Available Benchmark Cases ===\n");

    println!("THROUGHPUT:");
    println!("  throughput-unix     - Unix socket pair, 64 KiB chunks");
    println!("  throughput-tcp      - TCP loopback, 64 KiB chunks");
    println!("  chunked             - Chunk size sweep (64B .. 1MiB)");
    println!();

    println!("BACKPRESSURE:");
    println!("  backpressure        - Non-blocking writer, 4 KiB SO_SNDBUF");
    println!("                        (tune the sleep with ETERM_WRITE_BACKOFF_MS)");
    println!();

    println!("COMPREHENSIVE:");
    println!("  quick               - Unix + TCP at 8 MiB");
    println!("  full                - Every case above");
    println!();

    println!("Usage:");
    println!("  eterm-bench -a                      # Run all benchmarks");
    println!("  eterm-bench -c chunked              # Run the chunk size sweep");
    println!("  eterm-bench case throughput-tcp -s 256");
    println!("  eterm-bench list                    # Show this list");
}

fn run_or_exit<T>(name: &str, result: std::io::Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Error: benchmark '{}' could not set up sockets: {}", name, e);
            process::exit(1);
        }
    }
}

fn run_throughput_unix(bytes: usize) -> Vec<TransferResult> {
    vec![run_or_exit("throughput-unix", throughput::bench_unix_pair(bytes, 64 * 1024))]
}

fn run_throughput_tcp(bytes: usize) -> Vec<TransferResult> {
    vec![run_or_exit("throughput-tcp", throughput::bench_tcp_loopback(bytes, 64 * 1024))]
}

fn run_chunked(bytes: usize) -> Vec<TransferResult> {
    run_or_exit("chunked", throughput::bench_chunk_sizes(bytes))
}

fn run_backpressure(bytes: usize) -> Vec<TransferResult> {
    vec![run_or_exit("backpressure", throughput::bench_backpressure(bytes, 4096))]
}

fn run_quick_suite() {
    println!("\n╔═══════════════════════════════════════════════════════════════════════════╗");
    println!("║                         QUICK BENCHMARK SUITE                             ║");
    println!("╚═══════════════════════════════════════════════════════════════════════════╝");

    let mut results = run_throughput_unix(8 * MIB);
    results.extend(run_throughput_tcp(8 * MIB));
    throughput::print_transfer_results("QUICK THROUGHPUT", &results);

    println!("\n✓ Quick benchmark suite completed!");
}

fn run_full_suite(bytes: usize) {
    println!("\n╔═══════════════════════════════════════════════════════════════════════════╗");
    println!("║                         FULL BENCHMARK SUITE                              ║");
    println!("╚═══════════════════════════════════════════════════════════════════════════╝");

    let mut results = run_throughput_unix(bytes);
    results.extend(run_throughput_tcp(bytes));
    throughput::print_transfer_results("THROUGHPUT", &results);
    println!("\n{}", "─".repeat(79));

    throughput::print_transfer_results("CHUNK SIZE SWEEP", &run_chunked(bytes));
    println!("\n{}", "─".repeat(79));

    throughput::print_transfer_results("BACKPRESSURE", &run_backpressure(bytes));

    println!("\n✓ Full benchmark suite completed!");
}

fn run_case(name: &str, bytes: usize) {
    match name {
        "throughput-unix" => throughput::print_transfer_results("UNIX SOCKET PAIR", &run_throughput_unix(bytes)),
        "throughput-tcp" => throughput::print_transfer_results("TCP LOOPBACK", &run_throughput_tcp(bytes)),
        "chunked" => throughput::print_transfer_results("CHUNK SIZE SWEEP", &run_chunked(bytes)),
        "backpressure" => throughput::print_transfer_results("BACKPRESSURE", &run_backpressure(bytes)),

        // Suites
        "quick" => run_quick_suite(),
        "full" => run_full_suite(bytes),

        _ => {
            eprintln!("Error: Unknown benchmark case '{}'", name);
            eprintln!("Run 'eterm-bench list' to see available cases");
            process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    eterm::init_logging();

    print_banner();

    let bytes = cli.size_mib.max(1) * MIB;
    tracing::info!(bytes, policy = ?eterm::retry_policy(), "benchmark configuration");

    if cli.all {
        run_full_suite(bytes);
    } else if let Some(case_name) = cli.case {
        run_case(&case_name, bytes);
    } else {
        match cli.command {
            Some(Commands::Case { name }) => {
                run_case(&name, bytes);
            }
            Some(Commands::List) => {
                list_cases();
            }
            None => {
                println!("\nNo benchmark specified. Use one of:");
                println!("  eterm-bench -a              # Run all benchmarks");
                println!("  eterm-bench -c <case>       # Run specific case");
                println!("  eterm-bench case <case>     # Run specific case");
                println!("  eterm-bench list            # List available cases");
                println!("  eterm-bench --help          # Show help");
                println!("\nFor a quick start, try: eterm-bench -c quick");
            }
        }
    }
}
