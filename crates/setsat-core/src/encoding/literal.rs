use crate::solver::Model;
use core::fmt;
use core::ops::Not;

/// A boolean variable, numbered from 1 as in DIMACS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Var(u32);

impl Var {
    pub const fn new(id: u32) -> Self {
        assert!(id > 0, "variable ids start at 1");
        Self(id)
    }

    pub const fn id(self) -> u32 {
        self.0
    }

    pub const fn positive(self) -> Lit {
        Lit::positive(self)
    }

    pub const fn negative(self) -> Lit {
        Lit::negative(self)
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// A variable or its negation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lit {
    var: Var,
    negated: bool,
}

impl Lit {
    pub const fn positive(var: Var) -> Self {
        Self {
            var,
            negated: false,
        }
    }

    pub const fn negative(var: Var) -> Self {
        Self { var, negated: true }
    }

    pub const fn var(self) -> Var {
        self.var
    }

    pub const fn is_negated(self) -> bool {
        self.negated
    }

    pub fn to_dimacs(self) -> i32 {
        let id = self.var.0 as i32;
        if self.negated { -id } else { id }
    }

    pub fn from_dimacs(value: i32) -> Option<Self> {
        if value == 0 {
            return None;
        }
        let var = Var(value.unsigned_abs());
        Some(if value < 0 {
            Lit::negative(var)
        } else {
            Lit::positive(var)
        })
    }

    /// Truth value under `model`, or `None` when the variable is unassigned.
    pub fn evaluate(self, model: &Model) -> Option<bool> {
        model.value(self.var).map(|value| value != self.negated)
    }
}

impl Not for Lit {
    type Output = Lit;

    fn not(self) -> Lit {
        Lit {
            var: self.var,
            negated: !self.negated,
        }
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

/// A disjunction of literals. Literal order is kept as built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Clause(Vec<Lit>);

impl Clause {
    pub fn new(literals: Vec<Lit>) -> Self {
        Self(literals)
    }

    pub fn unit(literal: Lit) -> Self {
        Self(vec![literal])
    }

    pub fn literals(&self) -> &[Lit] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_satisfied_by(&self, model: &Model) -> bool {
        self.0
            .iter()
            .any(|literal| literal.evaluate(model) == Some(true))
    }
}

impl From<Vec<Lit>> for Clause {
    fn from(literals: Vec<Lit>) -> Self {
        Self(literals)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for literal in &self.0 {
            write!(f, "{literal} ")?;
        }
        f.write_str("0")
    }
}
