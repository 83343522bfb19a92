mod summary;

pub use summary::BatchStats;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use setsat_core::model::deck::Deck;
use setsat_core::{
    CardDescriptor, Formula, SetSelection, SolveError, SolveOutcome, VarisatBackend,
    brute_force_sets, enumerate_formula, is_valid_selection, solve_formula,
};
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{BatchConfig, ResolvedOutputs};

/// Deals seeded rounds, solves each through the SAT pipeline and logs rows.
pub struct BatchRunner {
    config: BatchConfig,
    outputs: ResolvedOutputs,
    logging_enabled: bool,
}

/// Summary details returned after a run.
#[derive(Debug)]
pub struct RunSummary {
    pub stats: BatchStats,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub telemetry_path: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct DealLogRow {
    run_id: String,
    deal_id: String,
    round: usize,
    deal_seed: u64,
    cards: Vec<String>,
    outcome: &'static str,
    indices: Vec<usize>,
    sets_found: usize,
    variables: usize,
    clauses: usize,
    elapsed_us: u64,
    verified: Option<bool>,
}

struct RoundResult {
    outcome: SolveOutcome,
    sets: Vec<SetSelection>,
    elapsed_us: u64,
}

impl BatchRunner {
    pub fn new(config: BatchConfig, outputs: ResolvedOutputs) -> Self {
        Self {
            logging_enabled: config.logging.enable_structured,
            config,
            outputs,
        }
    }

    /// Execute every round, streaming JSONL rows to disk.
    ///
    /// Rows and the summary are written even when verification fails; the
    /// mismatch is reported afterwards as [`RunnerError::Verification`].
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.deals.seed.unwrap_or(0));
        let mut stats = BatchStats::default();
        let mut rows_written = 0usize;
        let mut first_failure: Option<String> = None;

        for round in 0..self.config.deals.rounds {
            let deal_seed = rng.next_u64();
            let deal_id = format!("D{round:05}");
            let cards = Deck::shuffled_with_seed(deal_seed).deal(self.config.deals.cards_per_deal);

            let formula = Formula::encode(&cards);
            let result = self
                .solve_round(&formula)
                .map_err(|source| RunnerError::Solve {
                    deal_id: deal_id.clone(),
                    source,
                })?;

            match result.outcome {
                SolveOutcome::Found(_) => stats.record_found(result.sets.len(), result.elapsed_us),
                SolveOutcome::NoSolution(reason) => {
                    stats.record_no_solution(reason, result.elapsed_us)
                }
            }

            let verified = if self.config.solver.verify {
                let ok = self.verify(&cards, &result);
                if !ok {
                    stats.record_verification_failure();
                    if first_failure.is_none() {
                        first_failure = Some(deal_id.clone());
                    }
                }
                Some(ok)
            } else {
                None
            };

            let row = DealLogRow {
                run_id: self.config.run_id.clone(),
                deal_id: deal_id.clone(),
                round,
                deal_seed,
                cards: cards.iter().map(ToString::to_string).collect(),
                outcome: result.outcome.label(),
                indices: result.outcome.indices().to_vec(),
                sets_found: result.sets.len(),
                variables: formula.variables().num_vars(),
                clauses: formula.clauses().len(),
                elapsed_us: result.elapsed_us,
                verified,
            };

            if self.logging_enabled && tracing::enabled!(Level::INFO) {
                event!(
                    target: "setsat_cli::batch",
                    Level::INFO,
                    run_id = %self.config.run_id,
                    deal_id = %deal_id,
                    outcome = row.outcome,
                    sets_found = row.sets_found,
                    elapsed_us = row.elapsed_us,
                );
            }

            serde_json::to_writer(&mut writer, &row)?;
            writer.write_all(b"\n")?;
            rows_written += 1;
        }

        writer.flush()?;
        stats.write_markdown(
            &self.outputs.summary_md,
            &self.config.run_id,
            self.config.deals.cards_per_deal,
        )?;

        if let Some(deal_id) = first_failure {
            return Err(RunnerError::Verification {
                failures: stats.verification_failures,
                deal_id,
            });
        }

        let telemetry_path = self
            .logging_enabled
            .then(|| self.outputs.summary_dir().join("telemetry.jsonl"));

        Ok(RunSummary {
            stats,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            telemetry_path,
        })
    }

    fn solve_round(&self, formula: &Formula) -> Result<RoundResult, SolveError> {
        let mut backend = VarisatBackend::new();
        let start = Instant::now();

        if self.config.solver.enumerate_all {
            let enumeration = enumerate_formula(&mut backend, formula)?;
            return Ok(RoundResult {
                outcome: enumeration.outcome(),
                sets: enumeration.sets,
                elapsed_us: start.elapsed().as_micros() as u64,
            });
        }

        let outcome = solve_formula(&mut backend, formula)?;
        Ok(RoundResult {
            outcome,
            sets: outcome.selection().into_iter().collect(),
            elapsed_us: start.elapsed().as_micros() as u64,
        })
    }

    fn verify(&self, cards: &[CardDescriptor], result: &RoundResult) -> bool {
        let reference = brute_force_sets(cards);
        let outcome_ok = match result.outcome {
            SolveOutcome::Found(selection) => is_valid_selection(cards, selection),
            SolveOutcome::NoSolution(_) => reference.is_empty(),
        };
        if !outcome_ok {
            return false;
        }

        if self.config.solver.enumerate_all {
            let mut found = result.sets.clone();
            found.sort();
            found == reference
        } else {
            true
        }
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("deal {deal_id} could not be solved: {source}")]
    Solve {
        deal_id: String,
        #[source]
        source: SolveError,
    },
    #[error("{failures} deal(s) disagreed with brute force, first at {deal_id}")]
    Verification { failures: usize, deal_id: String },
}
