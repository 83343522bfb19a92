use crate::encoding::clauses::{EncodeError, SELECTION_SIZE};
use crate::encoding::variables::VariableMap;
use crate::solver::{BackendError, Model, Verdict};
use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Three distinct 1-based card indices in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "[usize; 3]")]
pub struct SetSelection([usize; 3]);

impl SetSelection {
    /// Sorts the indices; `None` if any two coincide or one is zero.
    pub fn new(mut indices: [usize; 3]) -> Option<Self> {
        indices.sort_unstable();
        let [a, b, c] = indices;
        (a > 0 && a != b && b != c).then_some(Self(indices))
    }

    pub fn indices(&self) -> [usize; 3] {
        self.0
    }

    /// Zero-based positions for indexing the input slice.
    pub fn positions(&self) -> [usize; 3] {
        self.0.map(|index| index - 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{indices:?} is not three distinct 1-based card indices")]
pub struct InvalidSelection {
    pub indices: [usize; 3],
}

impl TryFrom<[usize; 3]> for SetSelection {
    type Error = InvalidSelection;

    fn try_from(indices: [usize; 3]) -> Result<Self, Self::Error> {
        Self::new(indices).ok_or(InvalidSelection { indices })
    }
}

impl fmt::Display for SetSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{a} {b} {c}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoSolutionReason {
    /// The solver finished and proved no Set exists.
    Unsatisfiable,
    /// The backend rejected the formula while it was being built.
    Contradiction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveOutcome {
    Found(SetSelection),
    NoSolution(NoSolutionReason),
}

impl SolveOutcome {
    /// Selected indices; empty for either kind of no-solution.
    pub fn indices(&self) -> &[usize] {
        match self {
            SolveOutcome::Found(selection) => &selection.0,
            SolveOutcome::NoSolution(_) => &[],
        }
    }

    pub fn selection(&self) -> Option<SetSelection> {
        match self {
            SolveOutcome::Found(selection) => Some(*selection),
            SolveOutcome::NoSolution(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SolveOutcome::Found(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            SolveOutcome::Found(_) => "found",
            SolveOutcome::NoSolution(NoSolutionReason::Unsatisfiable) => "unsatisfiable",
            SolveOutcome::NoSolution(NoSolutionReason::Contradiction) => "contradiction",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error(transparent)]
    Descriptor(#[from] EncodeError),
    /// The answer is unknown, not proven absent.
    #[error("solver timed out before deciding")]
    Timeout,
    #[error("solver failed: {0}")]
    Backend(String),
    #[error("model selects {selected} cards instead of 3")]
    InvalidModel { selected: usize },
    #[error("model does not assign selection variable {index}")]
    Unassigned { index: usize },
}

/// Classifies a backend answer for the cards numbered by `variables`.
pub fn decode(
    verdict: Result<Verdict, BackendError>,
    variables: &VariableMap,
) -> Result<SolveOutcome, SolveError> {
    match verdict {
        Ok(Verdict::Sat(model)) => selected_cards(&model, variables).map(SolveOutcome::Found),
        Ok(Verdict::Unsat) => Ok(SolveOutcome::NoSolution(NoSolutionReason::Unsatisfiable)),
        Err(BackendError::Contradiction) => {
            warn!(
                target: "setsat_core::solve",
                cards = variables.num_cards(),
                "formula contradictory while building; reporting no set"
            );
            Ok(SolveOutcome::NoSolution(NoSolutionReason::Contradiction))
        }
        Err(BackendError::Timeout) => Err(SolveError::Timeout),
        Err(BackendError::Failed(message)) => Err(SolveError::Backend(message)),
    }
}

/// The cards whose selection variable is true in `model`.
pub fn selected_cards(model: &Model, variables: &VariableMap) -> Result<SetSelection, SolveError> {
    let mut chosen = Vec::with_capacity(SELECTION_SIZE);
    for index in 1..=variables.num_cards() {
        let Some(var) = variables.selection(index) else {
            continue;
        };
        match model.value(var) {
            Some(true) => chosen.push(index),
            Some(false) => {}
            None => return Err(SolveError::Unassigned { index }),
        }
    }

    match chosen[..] {
        [a, b, c] => SetSelection::new([a, b, c]).ok_or(SolveError::InvalidModel { selected: 3 }),
        _ => Err(SolveError::InvalidModel {
            selected: chosen.len(),
        }),
    }
}
