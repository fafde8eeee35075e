//! Manor auto-play simulator CLI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                    # Default: 1000 runs, 9x5 manor
//!   cargo run --bin simulate -- -n 100 -s 42   # 100 reproducible runs
//!   cargo run --bin simulate -- --size 5 3     # Smaller manor

use manor::simulator::{run_simulation, SimConfig};
use std::env;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║                 MANOR AUTO-PLAY SIMULATOR                     ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!(
        "  Manor:          {}x{}",
        config.manor.rows, config.manor.cols
    );
    println!("  Steps:          {}", config.manor.resources.steps);
    println!("  Max Actions:    {}", config.max_actions_per_run);
    println!("  Rerolls:        {}", config.use_rerolls);
    println!("  Objects:        {}", config.collect_objects);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = match run_simulation(&config) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("Simulation failed: {}", err);
            std::process::exit(1);
        }
    };

    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "manor_sim_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, json) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(err) => eprintln!("Failed to write {}: {}", filename, err),
        }
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-a" | "--actions" => {
                if i + 1 < args.len() {
                    config.max_actions_per_run = args[i + 1].parse().unwrap_or(2_000);
                    i += 1;
                }
            }
            "--steps" => {
                if i + 1 < args.len() {
                    if let Ok(steps) = args[i + 1].parse::<u32>() {
                        config.manor.resources.steps = steps;
                        i += 1;
                    }
                }
            }
            "--size" => {
                if i + 2 < args.len() {
                    if let (Ok(rows), Ok(cols)) =
                        (args[i + 1].parse::<usize>(), args[i + 2].parse::<usize>())
                    {
                        let resources = config.manor.resources;
                        config.manor = manor::core::ManorConfig::small(rows, cols);
                        config.manor.resources = resources;
                        i += 2;
                    }
                }
            }
            "--no-rerolls" => {
                config.use_rerolls = false;
            }
            "--no-objects" => {
                config.collect_objects = false;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--quick" => {
                config = SimConfig::quick();
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Manor Auto-Play Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of runs (default: 1000)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -a, --actions <A>   Max intents per run (default: 2,000)");
    println!("    --steps <S>         Starting steps (default: 70)");
    println!("    --size <R> <C>      Manor rows and columns (default: 9 5)");
    println!("    --no-rerolls        Never spend dice on drafts");
    println!("    --no-objects        Ignore room objects and shops");
    println!("    -v, --verbose       Print every run");
    println!("    --json              Save JSON report");
    println!("    --quick             100 runs with seed 42");
    println!("    -h, --help          Show this help");
    println!();
    println!("Set RUST_LOG=manor=debug to trace door and draft decisions.");
}
