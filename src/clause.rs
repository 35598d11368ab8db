use crate::literal::Literal;
use smallvec::SmallVec;
use std::collections::HashSet;
use std::fmt;

/// Identifier of a stored clause: its index in the `ClauseDatabase`.
pub type ClauseId = u32;

/// Most clauses in practice are short; inline the first few literals.
pub type Literals = SmallVec<[Literal; 4]>;

/// A CNF clause: an ordered, duplicate-free sequence of literals.
#[derive(Clone, Debug)]
pub struct Clause {
  literals: Literals,
  learnt: bool,
}

impl Clause {
  /// Builds a clause from literals that are already deduplicated and ordered.
  pub fn new(literals: Literals, learnt: bool) -> Self { Clause { literals, learnt } }

  pub fn literals(&self) -> &[Literal] { &self.literals }

  pub fn len(&self) -> usize { self.literals.len() }

  pub fn is_empty(&self) -> bool { self.literals.is_empty() }

  pub fn is_learnt(&self) -> bool { self.learnt }
}

impl fmt::Display for Clause {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "(")?;
    let mut first = true;
    for lit in &self.literals {
      if !first {
        write!(f, " | ")?;
      }
      write!(f, "{}", lit)?;
      first = false;
    }
    write!(f, ")")
  }
}

/// Removes duplicate literals, keeping the first occurrence and preserving order.
///
/// Order matters: the first two surviving literals become the clause's initial watch
/// pair, and scan order during BCP is part of the determinism contract.
pub fn dedup_preserve_order(lits: &[Literal]) -> Literals {
  let mut seen = HashSet::with_capacity(lits.len());
  lits.iter().copied().filter(|lit| seen.insert(*lit)).collect()
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::literal::Var;

  #[test]
  fn dedup_keeps_first_occurrence_order() {
    let n = 5;
    let a = Literal::positive(Var(1));
    let b = Literal::positive(Var(2));
    let c = Literal::negative(Var(3), n);
    let deduped = dedup_preserve_order(&[a, b, a, c, b]);
    assert_eq!(&deduped[..], &[a, b, c]);
  }
}
