//! Boundary with the satisfiability engine.
//!
//! The engine is owned by the caller and handed to the encoder as a
//! [`SatBackend`]; nothing in this crate keeps a process-wide solver.

pub mod backend;
pub mod cardinality;

use crate::encoding::literal::{Lit, Var};
use thiserror::Error;

pub use backend::VarisatBackend;

/// Failures reported by a backend while building or solving a formula.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The clause set became trivially unsatisfiable while it was being added.
    #[error("formula is contradictory at build time")]
    Contradiction,
    #[error("solver exceeded its time budget")]
    Timeout,
    #[error("solver failed: {0}")]
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Sat(Model),
    Unsat,
}

pub trait SatBackend {
    /// Reserve variables `1..=count`. Later [`fresh_var`](Self::fresh_var)
    /// calls return ids above every reserved one.
    fn allocate(&mut self, count: usize);

    fn fresh_var(&mut self) -> Var;

    fn add_clause(&mut self, literals: &[Lit]) -> Result<(), BackendError>;

    fn add_exactly_k(&mut self, vars: &[Var], k: usize) -> Result<(), BackendError> {
        let clauses = cardinality::exactly_k(vars, k, || self.fresh_var())
            .ok_or(BackendError::Contradiction)?;
        for clause in &clauses {
            self.add_clause(clause.literals())?;
        }
        Ok(())
    }

    /// May be called again after more clauses are added.
    fn solve(&mut self) -> Result<Verdict, BackendError>;
}

/// A truth assignment, indexed by variable id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    values: Vec<Option<bool>>,
}

impl Model {
    pub fn from_literals(literals: impl IntoIterator<Item = Lit>) -> Self {
        let mut values = Vec::new();
        for literal in literals {
            let slot = literal.var().id() as usize - 1;
            if values.len() <= slot {
                values.resize(slot + 1, None);
            }
            values[slot] = Some(!literal.is_negated());
        }
        Self { values }
    }

    /// Builds a model from signed DIMACS literals; zeros are skipped.
    pub fn from_dimacs(literals: &[i32]) -> Self {
        Self::from_literals(literals.iter().filter_map(|&value| Lit::from_dimacs(value)))
    }

    pub fn value(&self, var: Var) -> Option<bool> {
        self.values.get(var.id() as usize - 1).copied().flatten()
    }

    pub fn true_vars(&self) -> impl Iterator<Item = Var> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, value)| **value == Some(true))
            .map(|(slot, _)| Var::new(slot as u32 + 1))
    }

    pub fn len(&self) -> usize {
        self.values.iter().filter(|value| value.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::Model;
    use crate::encoding::literal::Var;

    #[test]
    fn model_reads_signed_literals() {
        let model = Model::from_dimacs(&[1, -2, 0, 4]);
        assert_eq!(model.value(Var::new(1)), Some(true));
        assert_eq!(model.value(Var::new(2)), Some(false));
        assert_eq!(model.value(Var::new(3)), None);
        assert_eq!(model.value(Var::new(4)), Some(true));
        assert_eq!(model.value(Var::new(40)), None);
        assert_eq!(model.len(), 3);
        let on: Vec<u32> = model.true_vars().map(|v| v.id()).collect();
        assert_eq!(on, vec![1, 4]);
    }
}
