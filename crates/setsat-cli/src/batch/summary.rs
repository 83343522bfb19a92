use std::fs;
use std::path::Path;

use setsat_core::NoSolutionReason;

/// Running totals for a batch, rendered as Markdown once the run ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchStats {
    pub rounds: usize,
    pub found: usize,
    pub unsatisfiable: usize,
    pub contradictions: usize,
    pub sets_found: usize,
    pub verification_failures: usize,
    total_elapsed_us: u64,
    max_elapsed_us: u64,
}

impl BatchStats {
    pub fn record_found(&mut self, sets: usize, elapsed_us: u64) {
        self.found += 1;
        self.sets_found += sets;
        self.record_latency(elapsed_us);
    }

    pub fn record_no_solution(&mut self, reason: NoSolutionReason, elapsed_us: u64) {
        match reason {
            NoSolutionReason::Unsatisfiable => self.unsatisfiable += 1,
            NoSolutionReason::Contradiction => self.contradictions += 1,
        }
        self.record_latency(elapsed_us);
    }

    pub fn record_verification_failure(&mut self) {
        self.verification_failures += 1;
    }

    fn record_latency(&mut self, elapsed_us: u64) {
        self.rounds += 1;
        self.total_elapsed_us += elapsed_us;
        self.max_elapsed_us = self.max_elapsed_us.max(elapsed_us);
    }

    pub fn no_solution(&self) -> usize {
        self.unsatisfiable + self.contradictions
    }

    pub fn mean_elapsed_us(&self) -> f64 {
        if self.rounds == 0 {
            0.0
        } else {
            self.total_elapsed_us as f64 / self.rounds as f64
        }
    }

    pub fn render_markdown(&self, run_id: &str, cards_per_deal: usize) -> String {
        let mut out = String::new();
        out.push_str(&format!("# Batch Summary: {run_id}\n\n"));
        out.push_str(&format!("Cards per deal: {cards_per_deal}\n\n"));
        out.push_str("| Rounds | Found | No set | Unsatisfiable | Contradiction | Sets found | Verification failures | Mean µs | Max µs |\n");
        out.push_str("|--------|-------|--------|---------------|---------------|------------|-----------------------|---------|--------|\n");
        out.push_str(&format!(
            "| {rounds} | {found} | {none} | {unsat} | {contra} | {sets} | {failures} | {mean:.1} | {max} |\n",
            rounds = self.rounds,
            found = self.found,
            none = self.no_solution(),
            unsat = self.unsatisfiable,
            contra = self.contradictions,
            sets = self.sets_found,
            failures = self.verification_failures,
            mean = self.mean_elapsed_us(),
            max = self.max_elapsed_us,
        ));
        out
    }

    pub fn write_markdown(
        &self,
        path: impl AsRef<Path>,
        run_id: &str,
        cards_per_deal: usize,
    ) -> std::io::Result<()> {
        fs::write(path, self.render_markdown(run_id, cards_per_deal))
    }
}
