//! Translation between Set cards and boolean formulas.
//!
//! [`variables`] numbers the facts, [`clauses`] states the game rules over
//! them and [`decode`] reads the chosen cards back out of a solver verdict.

pub mod clauses;
pub mod decode;
pub mod literal;
pub mod variables;
pub mod witness;

pub use clauses::{Cardinality, EncodeError, Formula, SELECTION_SIZE};
pub use decode::{InvalidSelection, NoSolutionReason, SetSelection, SolveError, SolveOutcome, decode};
pub use literal::{Clause, Lit, Var};
pub use variables::VariableMap;
pub use witness::WitnessIndex;
