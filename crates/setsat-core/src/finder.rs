//! End-to-end search: encode, hand to a backend, decode.

use crate::encoding::clauses::{Formula, parse_descriptors};
use crate::encoding::decode::{NoSolutionReason, SetSelection, SolveError, SolveOutcome, decode};
use crate::model::card::{CardDescriptor, is_set};
use crate::solver::SatBackend;
use std::time::Instant;
use tracing::{Level, event};

/// Finds one Set among `cards` using `backend`.
///
/// `backend` should be fresh: the formula is added on top of whatever it
/// already holds.
pub fn find_set<B: SatBackend + ?Sized>(
    backend: &mut B,
    cards: &[CardDescriptor],
) -> Result<SolveOutcome, SolveError> {
    solve_formula(backend, &Formula::encode(cards))
}

/// [`find_set`] for a formula the caller already built.
pub fn solve_formula<B: SatBackend + ?Sized>(
    backend: &mut B,
    formula: &Formula,
) -> Result<SolveOutcome, SolveError> {
    let start = Instant::now();
    let verdict = formula.load_into(backend).and_then(|()| backend.solve());
    let outcome = decode(verdict, formula.variables());

    log_solve(formula, &outcome, start);
    outcome
}

/// Like [`find_set`] for raw descriptors; a malformed one fails before the
/// backend sees anything.
pub fn find_set_from_symbols<B, S>(backend: &mut B, symbols: &[S]) -> Result<SolveOutcome, SolveError>
where
    B: SatBackend + ?Sized,
    S: AsRef<str>,
{
    let cards = parse_descriptors(symbols)?;
    find_set(backend, &cards)
}

/// Every Set of a deal plus the answer that ended the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumeration {
    pub sets: Vec<SetSelection>,
    /// `Contradiction` only when the formula failed before any model.
    pub exhausted: NoSolutionReason,
}

impl Enumeration {
    /// The first Set found, or why there is none.
    pub fn outcome(&self) -> SolveOutcome {
        match self.sets.first() {
            Some(&first) => SolveOutcome::Found(first),
            None => SolveOutcome::NoSolution(self.exhausted),
        }
    }
}

/// Every Set among `cards`, in discovery order.
///
/// After each model the chosen triple is blocked and the backend re-solved,
/// so `backend` must support incremental solving.
pub fn find_all_sets<B: SatBackend + ?Sized>(
    backend: &mut B,
    cards: &[CardDescriptor],
) -> Result<Vec<SetSelection>, SolveError> {
    enumerate_formula(backend, &Formula::encode(cards)).map(|found| found.sets)
}

/// [`find_all_sets`] for a prebuilt formula, keeping the final answer.
pub fn enumerate_formula<B: SatBackend + ?Sized>(
    backend: &mut B,
    formula: &Formula,
) -> Result<Enumeration, SolveError> {
    let start = Instant::now();
    let variables = formula.variables();

    let mut sets = Vec::new();
    let mut verdict = formula.load_into(backend).and_then(|()| backend.solve());
    let exhausted = loop {
        match decode(verdict, variables)? {
            SolveOutcome::Found(selection) => {
                sets.push(selection);
                let blocking: Vec<_> = selection
                    .indices()
                    .iter()
                    .filter_map(|&index| variables.selection(index))
                    .map(|var| var.negative())
                    .collect();
                verdict = backend.add_clause(&blocking).and_then(|()| backend.solve());
            }
            SolveOutcome::NoSolution(reason) => break reason,
        }
    };

    event!(
        target: "setsat_core::solve",
        Level::DEBUG,
        cards = formula.num_cards(),
        sets = sets.len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "enumerated sets"
    );
    Ok(Enumeration { sets, exhausted })
}

/// Checks every triple directly. Reference for verifying solver answers.
pub fn brute_force_sets(cards: &[CardDescriptor]) -> Vec<SetSelection> {
    let mut sets = Vec::new();
    for i in 0..cards.len() {
        for j in i + 1..cards.len() {
            for k in j + 1..cards.len() {
                if is_set(cards[i], cards[j], cards[k]) {
                    sets.extend(SetSelection::new([i + 1, j + 1, k + 1]));
                }
            }
        }
    }
    sets
}

/// Whether `selection` names a genuine Set within `cards`.
pub fn is_valid_selection(cards: &[CardDescriptor], selection: SetSelection) -> bool {
    let [a, b, c] = selection.positions();
    match (cards.get(a), cards.get(b), cards.get(c)) {
        (Some(&a), Some(&b), Some(&c)) => is_set(a, b, c),
        _ => false,
    }
}

fn log_solve(formula: &Formula, outcome: &Result<SolveOutcome, SolveError>, start: Instant) {
    if !tracing::enabled!(target: "setsat_core::solve", Level::DEBUG) {
        return;
    }

    let (result, indices) = match outcome {
        Ok(outcome) => (outcome.label(), format!("{:?}", outcome.indices())),
        Err(SolveError::Timeout) => ("timeout", String::new()),
        Err(_) => ("error", String::new()),
    };

    event!(
        target: "setsat_core::solve",
        Level::DEBUG,
        cards = formula.num_cards(),
        variables = formula.variables().num_vars(),
        clauses = formula.clauses().len(),
        result,
        indices = %indices,
        elapsed_us = start.elapsed().as_micros() as u64,
    );
}

#[cfg(test)]
mod tests {
    use super::{
        brute_force_sets, enumerate_formula, find_all_sets, find_set, find_set_from_symbols,
        is_valid_selection, solve_formula,
    };
    use crate::encoding::clauses::Formula;
    use crate::encoding::clauses::EncodeError;
    use crate::encoding::decode::{NoSolutionReason, SetSelection, SolveError, SolveOutcome};
    use crate::encoding::literal::{Lit, Var};
    use crate::model::attribute::Attribute;
    use crate::model::card::{CardDescriptor, DescriptorError};
    use crate::solver::{BackendError, SatBackend, VarisatBackend, Verdict};

    fn cards(symbols: &[&str]) -> Vec<CardDescriptor> {
        symbols.iter().map(|s| s.parse().unwrap()).collect()
    }

    /// Records calls and answers `solve` with a canned result.
    struct ScriptedBackend {
        answer: Result<Verdict, BackendError>,
        clauses: usize,
        next: u32,
    }

    impl ScriptedBackend {
        fn answering(answer: Result<Verdict, BackendError>) -> Self {
            Self {
                answer,
                clauses: 0,
                next: 0,
            }
        }
    }

    impl SatBackend for ScriptedBackend {
        fn allocate(&mut self, count: usize) {
            self.next = self.next.max(count as u32);
        }

        fn fresh_var(&mut self) -> Var {
            self.next += 1;
            Var::new(self.next)
        }

        fn add_clause(&mut self, _literals: &[Lit]) -> Result<(), BackendError> {
            self.clauses += 1;
            Ok(())
        }

        fn solve(&mut self) -> Result<Verdict, BackendError> {
            self.answer.clone()
        }
    }

    #[test]
    fn three_identical_cards_form_the_set() {
        let mut backend = VarisatBackend::new();
        let outcome = find_set_from_symbols(&mut backend, &["clg1", "clg1", "clg1", "wdr2"]).unwrap();
        assert_eq!(outcome.indices(), &[1, 2, 3]);
    }

    #[test]
    fn five_card_sample_has_one_set() {
        let input = cards(&["clg1", "clg3", "clg3", "rdv3", "wgr2"]);
        let mut backend = VarisatBackend::new();
        let outcome = find_set(&mut backend, &input).unwrap();
        let selection = outcome.selection().expect("a set exists");
        assert!(is_valid_selection(&input, selection));
        assert_eq!(brute_force_sets(&input), vec![SetSelection::new([1, 4, 5]).unwrap()]);
    }

    #[test]
    fn empty_input_reports_no_solution() {
        let mut backend = VarisatBackend::new();
        let outcome = find_set(&mut backend, &[]).unwrap();
        assert!(matches!(outcome, SolveOutcome::NoSolution(_)));
        assert!(outcome.indices().is_empty());
    }

    #[test]
    fn two_cards_report_no_solution() {
        let mut backend = VarisatBackend::new();
        let outcome = find_set(&mut backend, &cards(&["clg1", "wdr2"])).unwrap();
        assert_eq!(
            outcome,
            SolveOutcome::NoSolution(NoSolutionReason::Contradiction)
        );
    }

    #[test]
    fn no_set_among_three_is_unsatisfiable() {
        let mut backend = VarisatBackend::new();
        let outcome = find_set(&mut backend, &cards(&["clg1", "clg1", "clg2"])).unwrap();
        assert_eq!(
            outcome,
            SolveOutcome::NoSolution(NoSolutionReason::Unsatisfiable)
        );
    }

    #[test]
    fn malformed_descriptor_never_reaches_backend() {
        let mut backend = ScriptedBackend::answering(Ok(Verdict::Unsat));
        let err = find_set_from_symbols(&mut backend, &["clg1", "xlg1", "wdr2"]).unwrap_err();
        assert!(matches!(
            err,
            SolveError::Descriptor(EncodeError::MalformedDescriptor { index: 2, .. })
        ));
        assert_eq!(backend.clauses, 0);
    }

    #[test]
    fn colour_symbol_in_fill_position_is_rejected_first() {
        let mut backend = ScriptedBackend::answering(Ok(Verdict::Unsat));
        let err = find_set_from_symbols(&mut backend, &["crg1", "crg1", "crg1", "wld2"]).unwrap_err();
        let SolveError::Descriptor(EncodeError::MalformedDescriptor {
            index,
            descriptor,
            source,
        }) = err
        else {
            panic!("expected a malformed descriptor, got {err:?}");
        };
        assert_eq!(index, 1);
        assert_eq!(descriptor, "crg1");
        assert!(matches!(
            source,
            DescriptorError::UnknownSymbol {
                attribute: Attribute::Fill,
                symbol: 'r',
                ..
            }
        ));
        assert_eq!(backend.clauses, 0);
        assert_eq!(backend.next, 0);
    }

    #[test]
    fn timeout_is_not_no_solution() {
        let mut backend = ScriptedBackend::answering(Err(BackendError::Timeout));
        let err = find_set(&mut backend, &cards(&["clg1", "clg1", "clg1"])).unwrap_err();
        assert_eq!(err, SolveError::Timeout);
    }

    #[test]
    fn backend_failure_is_classified() {
        let mut backend = ScriptedBackend::answering(Err(BackendError::Failed("io".into())));
        let err = find_set(&mut backend, &cards(&["clg1", "clg1", "clg1"])).unwrap_err();
        assert_eq!(err, SolveError::Backend("io".into()));
    }

    #[test]
    fn enumeration_matches_brute_force() {
        let input = cards(&[
            "clg1", "rgr2", "wdv3", "clr2", "clv3", "rgg3", "wdg2", "clg1", "wdr2",
        ]);
        let mut backend = VarisatBackend::new();
        let mut found = find_all_sets(&mut backend, &input).unwrap();
        found.sort();
        assert_eq!(found, brute_force_sets(&input));
        assert!(found.iter().all(|s| is_valid_selection(&input, *s)));
    }

    #[test]
    fn enumeration_keeps_the_reason_it_stopped() {
        let mut backend = VarisatBackend::new();
        let tiny = enumerate_formula(&mut backend, &Formula::encode(&cards(&["clg1", "wdr2"]))).unwrap();
        assert!(tiny.sets.is_empty());
        assert_eq!(
            tiny.outcome(),
            SolveOutcome::NoSolution(NoSolutionReason::Contradiction)
        );

        let mut backend = VarisatBackend::new();
        let none = enumerate_formula(&mut backend, &Formula::encode(&cards(&["clg1", "clg1", "clg2"]))).unwrap();
        assert_eq!(none.exhausted, NoSolutionReason::Unsatisfiable);

        let mut backend = VarisatBackend::new();
        let sample = cards(&["clg1", "clg3", "clg3", "rdv3", "wgr2"]);
        let found = enumerate_formula(&mut backend, &Formula::encode(&sample)).unwrap();
        assert_eq!(found.outcome().indices(), &[1, 4, 5]);
        assert_eq!(found.exhausted, NoSolutionReason::Unsatisfiable);
    }

    #[test]
    fn prebuilt_formula_solves_like_cards() {
        let input = cards(&["clg1", "clg1", "clg1", "wdr2"]);
        let formula = Formula::encode(&input);
        let mut backend = VarisatBackend::new();
        assert_eq!(
            solve_formula(&mut backend, &formula).unwrap(),
            find_set(&mut VarisatBackend::new(), &input).unwrap()
        );
    }

    #[test]
    fn selection_past_the_deal_is_not_valid() {
        let input = cards(&["clg1", "clg1", "clg1"]);
        assert!(is_valid_selection(&input, SetSelection::new([1, 2, 3]).unwrap()));
        assert!(!is_valid_selection(&input, SetSelection::new([1, 2, 4]).unwrap()));
    }

    #[test]
    fn enumeration_of_empty_input_is_empty() {
        let mut backend = VarisatBackend::new();
        assert!(find_all_sets(&mut backend, &[]).unwrap().is_empty());
    }
}
