#![deny(warnings)]
pub mod encoding;
pub mod finder;
pub mod model;
pub mod solver;

pub use encoding::{
    Clause, EncodeError, Formula, Lit, NoSolutionReason, SetSelection, SolveError, SolveOutcome,
    Var, VariableMap,
};
pub use finder::{
    Enumeration, brute_force_sets, enumerate_formula, find_all_sets, find_set,
    find_set_from_symbols, is_valid_selection, solve_formula,
};
pub use model::card::CardDescriptor;
pub use solver::{BackendError, Model, SatBackend, VarisatBackend, Verdict};

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "setsat"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::AppInfo;

    #[test]
    fn exposes_static_metadata() {
        assert_eq!(AppInfo::name(), "setsat");
        assert!(!AppInfo::version().is_empty());
    }
}
