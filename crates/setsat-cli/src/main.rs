use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::Level;

use setsat_cli::batch::BatchRunner;
use setsat_cli::config::{BatchConfig, ResolvedOutputs};
use setsat_cli::logging::{init_logging, init_stderr_logging};
use setsat_cli::report::SolveReport;
use setsat_core::encoding::clauses::parse_descriptors;
use setsat_core::{Formula, VarisatBackend, enumerate_formula, solve_formula};

/// Finds Sets among cards by handing the puzzle to a SAT solver.
#[derive(Debug, Parser)]
#[command(
    name = "setsat",
    author,
    version,
    about = "Solve the Set card puzzle through boolean satisfiability"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Find a Set among the given card descriptors (e.g. `clg1 wdr2 rgv3`).
    Solve(SolveArgs),
    /// Run a seeded batch of random deals from a YAML configuration.
    Bench(BenchArgs),
}

#[derive(Debug, Args)]
struct SolveArgs {
    /// Four-symbol descriptors: shape, fill, colour, number.
    #[arg(value_name = "DESCRIPTOR", required = true)]
    cards: Vec<String>,

    /// List every Set instead of the first one found.
    #[arg(long)]
    all: bool,

    /// Print a JSON report.
    #[arg(long)]
    json: bool,

    /// Print the formula in DIMACS CNF and exit without solving.
    #[arg(long, conflicts_with_all = ["all", "json"])]
    dimacs: bool,
}

#[derive(Debug, Args)]
struct BenchArgs {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of rounds to deal.
    #[arg(long, value_name = "ROUNDS")]
    rounds: Option<usize>,

    /// Override the RNG seed for deal generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the number of cards per deal.
    #[arg(long, value_name = "COUNT")]
    cards: Option<usize>,

    /// Exit after validating the configuration (no deals are solved).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Solve(args) => solve(args),
        Command::Bench(args) => bench(args),
    }
}

fn solve(args: SolveArgs) -> anyhow::Result<()> {
    init_stderr_logging(Level::WARN);

    let cards = parse_descriptors(args.cards.as_slice())?;
    let formula = Formula::encode(&cards);

    if args.dimacs {
        print!("{}", formula.to_dimacs());
        return Ok(());
    }

    let mut backend = VarisatBackend::new();
    let report = if args.all {
        let enumeration = enumerate_formula(&mut backend, &formula)?;
        SolveReport::from_enumeration(&cards, &formula, &enumeration)
    } else {
        let outcome = solve_formula(&mut backend, &formula)?;
        SolveReport::from_outcome(&cards, &formula, &outcome)
    };

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("serializing solve report")?;
        println!("{json}");
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}

fn bench(args: BenchArgs) -> anyhow::Result<()> {
    let mut config = BatchConfig::from_path(&args.config)?;

    if let Some(run_id) = args.run_id {
        config.run_id = run_id;
    }

    if let Some(rounds) = args.rounds {
        config.deals.rounds = rounds;
    }

    if let Some(seed) = args.seed {
        config.deals.seed = Some(seed);
    }

    if let Some(cards) = args.cards {
        config.deals.cards_per_deal = cards;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let rounds = config.deals.rounds;
    let cards = config.deals.cards_per_deal;

    println!("Loaded configuration '{run_id}' ({rounds} rounds, {cards} cards per deal)");

    if args.validate_only {
        println!("Validation-only mode: batch execution skipped.");
        return Ok(());
    }

    let _logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = BatchRunner::new(config, outputs);
    let summary = runner.run()?;

    println!(
        "Batch complete for '{run_id}': {} rounds, {} found, {} without a set → {} rows at {}",
        summary.stats.rounds,
        summary.stats.found,
        summary.stats.no_solution(),
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!(
        "Mean solve latency: {:.1} µs",
        summary.stats.mean_elapsed_us()
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(telemetry_path) = summary.telemetry_path.as_ref() {
        println!("Telemetry log: {}", telemetry_path.display());
    }

    Ok(())
}
