//! Sequential-counter encoding of "exactly k of these variables are true".

use crate::encoding::literal::{Clause, Var};

/// Clauses forcing exactly `k` of `vars` true, or `None` when `k > vars.len()`.
///
/// Register `r[i][j]` holds "at least `j + 1` of `vars[..=i]` are true" and is
/// defined in both directions, so every register is determined by the inputs.
/// Rows are truncated at `k + 1` counts. `fresh` hands out unused variables.
pub fn exactly_k<F>(vars: &[Var], k: usize, mut fresh: F) -> Option<Vec<Clause>>
where
    F: FnMut() -> Var,
{
    if k > vars.len() {
        return None;
    }
    if k == 0 {
        return Some(vars.iter().map(|var| Clause::unit(var.negative())).collect());
    }

    let mut clauses = Vec::new();
    let mut previous: Vec<Var> = Vec::new();

    for (i, &x) in vars.iter().enumerate() {
        let width = (i + 1).min(k + 1);
        let current: Vec<Var> = (0..width).map(|_| fresh()).collect();

        for (j, &r) in current.iter().enumerate() {
            let carried = previous.get(j).copied();

            if let Some(p) = carried {
                clauses.push(Clause::new(vec![p.negative(), r.positive()]));
            }

            if j == 0 {
                clauses.push(Clause::new(vec![x.negative(), r.positive()]));
                match carried {
                    Some(p) => clauses.push(Clause::new(vec![
                        r.negative(),
                        p.positive(),
                        x.positive(),
                    ])),
                    None => clauses.push(Clause::new(vec![r.negative(), x.positive()])),
                }
                continue;
            }

            // j <= i here, so the row above always has a register for j - 1.
            let below = previous[j - 1];
            clauses.push(Clause::new(vec![
                below.negative(),
                x.negative(),
                r.positive(),
            ]));
            clauses.push(Clause::new(vec![r.negative(), below.positive()]));
            match carried {
                Some(p) => clauses.push(Clause::new(vec![
                    r.negative(),
                    p.positive(),
                    x.positive(),
                ])),
                None => clauses.push(Clause::new(vec![r.negative(), x.positive()])),
            }
        }

        previous = current;
    }

    clauses.push(Clause::unit(previous[k - 1].positive()));
    if let Some(&over) = previous.get(k) {
        clauses.push(Clause::unit(over.negative()));
    }

    Some(clauses)
}
