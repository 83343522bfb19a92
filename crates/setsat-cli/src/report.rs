//! Output for the `solve` subcommand.

use serde::Serialize;
use setsat_core::{CardDescriptor, Enumeration, Formula, SetSelection, SolveOutcome};
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportedSet {
    pub indices: [usize; 3],
    pub cards: [String; 3],
}

impl ReportedSet {
    fn new(cards: &[CardDescriptor], selection: SetSelection) -> Self {
        let cards_at = selection
            .positions()
            .map(|position| cards.get(position).map(ToString::to_string).unwrap_or_default());
        Self {
            indices: selection.indices(),
            cards: cards_at,
        }
    }
}

/// What one `solve` invocation found, ready for text or JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolveReport {
    pub cards: Vec<String>,
    pub variables: usize,
    pub clauses: usize,
    pub outcome: &'static str,
    pub sets: Vec<ReportedSet>,
}

impl SolveReport {
    pub fn from_outcome(cards: &[CardDescriptor], formula: &Formula, outcome: &SolveOutcome) -> Self {
        Self {
            cards: cards.iter().map(ToString::to_string).collect(),
            variables: formula.variables().num_vars(),
            clauses: formula.clauses().len(),
            outcome: outcome.label(),
            sets: outcome
                .selection()
                .map(|selection| ReportedSet::new(cards, selection))
                .into_iter()
                .collect(),
        }
    }

    pub fn from_enumeration(
        cards: &[CardDescriptor],
        formula: &Formula,
        enumeration: &Enumeration,
    ) -> Self {
        Self {
            cards: cards.iter().map(ToString::to_string).collect(),
            variables: formula.variables().num_vars(),
            clauses: formula.clauses().len(),
            outcome: enumeration.outcome().label(),
            sets: enumeration
                .sets
                .iter()
                .map(|&set| ReportedSet::new(cards, set))
                .collect(),
        }
    }

    pub fn render_text(&self) -> String {
        if self.sets.is_empty() {
            return format!("no set found ({})\n", self.outcome);
        }

        let mut out = String::new();
        for set in &self.sets {
            let [a, b, c] = set.indices;
            let [x, y, z] = &set.cards;
            let _ = writeln!(out, "{a} {b} {c}: {x} {y} {z}");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use setsat_core::{NoSolutionReason, VarisatBackend, enumerate_formula};

    fn cards(symbols: &[&str]) -> Vec<CardDescriptor> {
        symbols.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn found_outcome_lists_indices_and_cards() {
        let deal = cards(&["clg1", "clg1", "clg1", "wdr2"]);
        let formula = Formula::encode(&deal);
        let selection = SetSelection::new([1, 2, 3]).unwrap();
        let report = SolveReport::from_outcome(&deal, &formula, &SolveOutcome::Found(selection));

        assert_eq!(report.outcome, "found");
        assert_eq!(report.variables, 16);
        assert_eq!(report.render_text(), "1 2 3: clg1 clg1 clg1\n");
    }

    #[test]
    fn missing_set_renders_reason() {
        let deal = cards(&["clg1", "clg1", "clg2"]);
        let formula = Formula::encode(&deal);
        let outcome = SolveOutcome::NoSolution(NoSolutionReason::Unsatisfiable);
        let report = SolveReport::from_outcome(&deal, &formula, &outcome);
        assert!(report.sets.is_empty());
        assert_eq!(report.render_text(), "no set found (unsatisfiable)\n");
    }

    #[test]
    fn empty_enumeration_of_two_cards_is_a_contradiction() {
        let deal = cards(&["clg1", "clg2"]);
        let formula = Formula::encode(&deal);
        let enumeration = enumerate_formula(&mut VarisatBackend::new(), &formula).unwrap();
        let report = SolveReport::from_enumeration(&deal, &formula, &enumeration);
        assert_eq!(report.outcome, "contradiction");
        assert_eq!(report.render_text(), "no set found (contradiction)\n");
    }

    #[test]
    fn json_shape_is_stable() {
        let deal = cards(&["clg1", "rgr2", "wdv3"]);
        let formula = Formula::encode(&deal);
        let enumeration = Enumeration {
            sets: vec![SetSelection::new([3, 1, 2]).unwrap()],
            exhausted: NoSolutionReason::Unsatisfiable,
        };
        let report = SolveReport::from_enumeration(&deal, &formula, &enumeration);
        let value = serde_json::to_value(&report).expect("serializes");
        assert_eq!(value["outcome"], "found");
        assert_eq!(value["sets"][0]["indices"], serde_json::json!([1, 2, 3]));
        assert_eq!(value["sets"][0]["cards"][2], "wdv3");
    }
}
