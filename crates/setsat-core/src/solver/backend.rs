use crate::encoding::literal::{Lit, Var};
use crate::solver::{BackendError, Model, SatBackend, Verdict};
use tracing::{Level, event};
use varisat::ExtendFormula;

/// [`SatBackend`] over the varisat CDCL solver. Each value is one
/// independent solver instance.
///
/// varisat exposes no time or conflict budget, so `solve` runs to a verdict
/// and never returns [`BackendError::Timeout`]. Backends over engines with a
/// budget report it through that variant.
pub struct VarisatBackend {
    solver: varisat::Solver<'static>,
    highest_var: u32,
    clauses: usize,
}

impl VarisatBackend {
    pub fn new() -> Self {
        Self {
            solver: varisat::Solver::new(),
            highest_var: 0,
            clauses: 0,
        }
    }

    pub fn num_vars(&self) -> u32 {
        self.highest_var
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses
    }
}

impl Default for VarisatBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SatBackend for VarisatBackend {
    fn allocate(&mut self, count: usize) {
        self.highest_var = self.highest_var.max(count as u32);
    }

    fn fresh_var(&mut self) -> Var {
        self.highest_var += 1;
        Var::new(self.highest_var)
    }

    fn add_clause(&mut self, literals: &[Lit]) -> Result<(), BackendError> {
        if literals.is_empty() {
            return Err(BackendError::Contradiction);
        }
        let converted: Vec<varisat::Lit> = literals
            .iter()
            .map(|literal| {
                self.highest_var = self.highest_var.max(literal.var().id());
                varisat::Lit::from_dimacs(literal.to_dimacs() as isize)
            })
            .collect();
        self.solver.add_clause(&converted);
        self.clauses += 1;
        Ok(())
    }

    fn solve(&mut self) -> Result<Verdict, BackendError> {
        let satisfiable = self
            .solver
            .solve()
            .map_err(|err| BackendError::Failed(err.to_string()))?;

        if !satisfiable {
            return Ok(Verdict::Unsat);
        }

        let Some(assignment) = self.solver.model() else {
            return Err(BackendError::Failed(
                "solver reported satisfiable without a model".to_string(),
            ));
        };
        event!(
            target: "setsat_core::backend",
            Level::TRACE,
            vars = self.highest_var,
            clauses = self.clauses,
            assigned = assignment.len(),
        );
        Ok(Verdict::Sat(Model::from_dimacs(
            &assignment
                .iter()
                .map(|literal| literal.to_dimacs() as i32)
                .collect::<Vec<_>>(),
        )))
    }
}
