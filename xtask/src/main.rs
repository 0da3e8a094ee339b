use std::path::Path;
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the clinic simulation workspace",
    long_about = "A unified CLI for running clinic scenarios, experiments, benchmarks,\n\
                  and CI checks in the clinic simulation workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the reference scenario (225 patients/day, 30 replications)
    Run {
        /// ScenarioConfig JSON file to run instead of the reference scenario
        #[arg(long)]
        scenario: Option<String>,
    },
    /// Run with historical hourly arrival rates
    RunNonstationary {
        /// CSV of daily hourly arrival counts; the fallback table is used if omitted
        #[arg(long, env = "CLINIC_ARRIVALS_CSV")]
        rates: Option<String>,
    },
    /// Run the load x trauma-fraction scenario grid and export the results
    Sweep,
    /// Search for a smaller staffing plan that still meets service levels
    Optimize {
        /// Patients per day of the baseline scenario
        #[arg(long, default_value_t = 225)]
        load: u32,
        /// Use the relaxed service-level targets
        #[arg(long)]
        relaxed: bool,
    },
    /// Compare constant-rate and historical arrivals under the same staffing
    Compare {
        /// CSV of daily hourly arrival counts; the fallback table is used if omitted
        #[arg(long, env = "CLINIC_ARRIVALS_CSV")]
        rates: Option<String>,
    },
    /// Run Criterion benchmarks
    Bench,
    /// Compare benchmarks: stash changes, create baseline, restore, compare
    BenchCompare,
    /// Run CI checks (fmt, clippy, tests, examples, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Build and run example scenarios
    Examples,
    /// Run benchmarks
    Bench,
    /// Run check + examples + bench
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn spawn(program: &str, args: &[&str]) -> ExitStatus {
    eprintln!("+ {program} {}", args.join(" "));
    match Command::new(program).args(args).status() {
        Ok(status) => status,
        Err(error) => {
            eprintln!("failed to execute {program}: {error}");
            exit(1);
        }
    }
}

fn run_cargo(args: &[&str]) {
    let status = spawn("cargo", args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_git(args: &[&str]) {
    let status = spawn("git", args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

/// `cargo run --release` of a clinic_experiments example, forwarding `extra`
/// as program arguments.
fn run_example(example: &str, extra: &[&str]) {
    let mut args = vec![
        "run",
        "-p",
        "clinic_experiments",
        "--example",
        example,
        "--release",
    ];
    if !extra.is_empty() {
        args.push("--");
        args.extend_from_slice(extra);
    }
    run_cargo(&args);
}

fn run_bench(extra: &[&str]) {
    let mut args = vec!["bench", "--package", "clinic_core", "--bench", "performance"];
    if !extra.is_empty() {
        args.push("--");
        args.extend_from_slice(extra);
    }
    run_cargo(&args);
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test clinic_core");
    run_cargo(&["test", "-p", "clinic_core"]);

    step("Test clinic_experiments");
    run_cargo(&["test", "-p", "clinic_experiments"]);
}

fn ci_examples() {
    step("Run scenario_run (225 patients/day)");
    run_example("scenario_run", &[]);

    step("Run nonstationary_run (fallback rates)");
    run_example("nonstationary_run", &[]);

    step("Run staffing_optimizer (75 patients/day)");
    run_example("staffing_optimizer", &["75"]);
}

fn ci_bench() {
    step("Run benchmarks");
    run_bench(&[]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { scenario } => match scenario {
            Some(path) => run_example("scenario_run", &[path.as_str()]),
            None => run_example("scenario_run", &[]),
        },
        Commands::RunNonstationary { rates } => match rates {
            Some(path) => run_example("nonstationary_run", &[path.as_str()]),
            None => run_example("nonstationary_run", &[]),
        },
        Commands::Sweep => run_example("scenario_sweep", &[]),
        Commands::Optimize { load, relaxed } => {
            let load = load.to_string();
            let mut extra = vec![load.as_str()];
            if relaxed {
                extra.push("--relaxed");
            }
            run_example("staffing_optimizer", &extra);
        }
        Commands::Compare { rates } => match rates {
            Some(path) => run_example("arrival_comparison", &[path.as_str()]),
            None => run_example("arrival_comparison", &[]),
        },
        Commands::Bench => run_bench(&[]),
        Commands::BenchCompare => {
            let baseline_dir = Path::new("target/criterion");
            if baseline_dir.exists() {
                step("Removing existing benchmark data");
                if let Err(error) = std::fs::remove_dir_all(baseline_dir) {
                    eprintln!("failed to remove target/criterion: {error}");
                    exit(1);
                }
            }

            step("Stashing current changes");
            run_git(&[
                "stash",
                "push",
                "-m",
                "Temporary stash for benchmark comparison",
            ]);

            step("Running benchmark to create baseline");
            run_bench(&["--save-baseline", "main"]);

            step("Reapplying changes");
            run_git(&["stash", "pop"]);

            step("Running benchmark comparing against baseline");
            run_bench(&["--baseline", "main"]);

            eprintln!("\nDone! Check the output above to see performance comparison.");
        }
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Examples => ci_examples(),
                CiJob::Bench => ci_bench(),
                CiJob::All => {
                    ci_check();
                    ci_examples();
                    ci_bench();
                }
            }
            eprintln!("\nCI job passed.");
        }
    }
}
