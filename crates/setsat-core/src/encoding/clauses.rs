use crate::encoding::literal::{Clause, Var};
use crate::encoding::variables::VariableMap;
use crate::encoding::witness::WitnessIndex;
use crate::model::card::{CardDescriptor, DescriptorError};
use crate::solver::{BackendError, SatBackend, cardinality};
use std::fmt::Write as _;
use thiserror::Error;

/// Number of cards in a Set.
pub const SELECTION_SIZE: usize = 3;

/// "Exactly `k` of `vars` are true", left for the backend to encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cardinality {
    pub vars: Vec<Var>,
    pub k: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("malformed descriptor #{index} '{descriptor}': {source}")]
    MalformedDescriptor {
        /// 1-based position in the input.
        index: usize,
        descriptor: String,
        #[source]
        source: DescriptorError,
    },
}

/// The complete rule set for one list of cards.
///
/// Clauses are kept in build order: per-attribute exclusivity (shape, fill,
/// colour, number), then the selection implications card by card, then one
/// witness clause per attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    variables: VariableMap,
    selection: Cardinality,
    clauses: Vec<Clause>,
}

/// Parses every descriptor, failing on the first malformed one.
pub fn parse_descriptors<S: AsRef<str>>(symbols: &[S]) -> Result<Vec<CardDescriptor>, EncodeError> {
    symbols
        .iter()
        .enumerate()
        .map(|(position, text)| {
            let text = text.as_ref();
            text.parse::<CardDescriptor>()
                .map_err(|source| EncodeError::MalformedDescriptor {
                    index: position + 1,
                    descriptor: text.to_string(),
                    source,
                })
        })
        .collect()
}

impl Formula {
    pub fn encode(cards: &[CardDescriptor]) -> Self {
        let variables = VariableMap::new(cards.len());
        let witnesses = WitnessIndex::build(cards);

        let mut clauses = Vec::with_capacity(16 + cards.len() * 4 + 12);
        for group in variables.attribute_groups() {
            clauses.extend(exclusivity(group));
        }

        for (position, card) in cards.iter().enumerate() {
            let selected = Var::new(position as u32 + 1);
            for value in card.values() {
                clauses.push(Clause::new(vec![
                    selected.negative(),
                    variables.attribute(value).positive(),
                ]));
            }
        }

        for (value, holders) in witnesses.iter() {
            let mut literals = Vec::with_capacity(holders.len() + 1);
            literals.push(variables.attribute(value).negative());
            literals.extend(holders.iter().map(|&index| Var::new(index as u32).positive()));
            clauses.push(Clause::new(literals));
        }

        Self {
            selection: Cardinality {
                vars: variables.selection_vars(),
                k: SELECTION_SIZE,
            },
            variables,
            clauses,
        }
    }

    /// Parses then encodes. Nothing is built unless every descriptor parses.
    pub fn encode_symbols<S: AsRef<str>>(symbols: &[S]) -> Result<Self, EncodeError> {
        let cards = parse_descriptors(symbols)?;
        Ok(Self::encode(&cards))
    }

    pub fn variables(&self) -> &VariableMap {
        &self.variables
    }

    pub fn selection(&self) -> &Cardinality {
        &self.selection
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn num_cards(&self) -> usize {
        self.variables.num_cards()
    }

    /// Hands the formula to `backend`: variables, the selection constraint,
    /// then every clause in order. Stops at the first backend error.
    pub fn load_into<B: SatBackend + ?Sized>(&self, backend: &mut B) -> Result<(), BackendError> {
        backend.allocate(self.variables.num_vars());
        backend.add_exactly_k(&self.selection.vars, self.selection.k)?;
        for clause in &self.clauses {
            backend.add_clause(clause.literals())?;
        }
        Ok(())
    }

    /// DIMACS CNF text with the selection constraint expanded into clauses.
    /// An infeasible selection (fewer than three cards) becomes an empty clause.
    pub fn to_dimacs(&self) -> String {
        let base = self.variables.num_vars() as u32;
        let mut next = base;
        let selection = cardinality::exactly_k(&self.selection.vars, self.selection.k, || {
            next += 1;
            Var::new(next)
        });
        let selection_len = selection.as_ref().map_or(1, Vec::len);

        let mut out = String::new();
        let range = self.variables.attribute_range();
        let _ = writeln!(
            out,
            "c setsat: {} cards, attribute variables {}..={}",
            self.num_cards(),
            range.start(),
            range.end()
        );
        let _ = writeln!(out, "p cnf {} {}", next, selection_len + self.clauses.len());
        match selection {
            Some(clauses) => {
                for clause in clauses {
                    let _ = writeln!(out, "{clause}");
                }
            }
            None => out.push_str("0\n"),
        }
        for clause in &self.clauses {
            let _ = writeln!(out, "{clause}");
        }
        out
    }
}

/// One or all three of `a b c`: all three cards share a value, or the three
/// values are pairwise distinct. Never none, never exactly two.
fn exclusivity([a, b, c]: [Var; 3]) -> [Clause; 4] {
    [
        Clause::new(vec![a.positive(), b.positive(), c.positive()]),
        Clause::new(vec![a.positive(), b.negative(), c.negative()]),
        Clause::new(vec![a.negative(), b.positive(), c.negative()]),
        Clause::new(vec![a.negative(), b.negative(), c.positive()]),
    ]
}
