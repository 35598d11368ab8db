use crate::clause::ClauseId;
use crate::literal::Literal;

/// Per-literal index of which clauses currently use that literal as one of their two
/// watched literals. Sized `2 * num_vars + 1`, matching the literal encoding.
#[derive(Debug, Default)]
pub struct WatchList {
  by_literal: Vec<Vec<ClauseId>>,
}

impl WatchList {
  pub fn new(num_vars: u32) -> Self { WatchList { by_literal: vec![Vec::new(); (2 * num_vars + 1) as usize] } }

  /// Registers `clause` as watching `lit`.
  pub fn register(&mut self, lit: Literal, clause: ClauseId) { self.by_literal[lit.index()].push(clause); }

  /// Takes a snapshot of every clause currently watching `lit`, in reverse of registration
  /// order, clearing the slot. Callers re-register each clause against whichever literal it
  /// ends up watching next (possibly `lit` again).
  pub fn take_watchers(&mut self, lit: Literal) -> Vec<ClauseId> {
    let mut watchers = std::mem::take(&mut self.by_literal[lit.index()]);
    watchers.reverse();
    watchers
  }

  pub fn watchers(&self, lit: Literal) -> &[ClauseId] { &self.by_literal[lit.index()] }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::literal::Var;

  #[test]
  fn take_watchers_clears_and_reverses() {
    let n = 4;
    let mut wl = WatchList::new(n);
    let lit = Literal::positive(Var(1));
    wl.register(lit, 0);
    wl.register(lit, 1);
    wl.register(lit, 2);
    let snapshot = wl.take_watchers(lit);
    assert_eq!(snapshot, vec![2, 1, 0]);
    assert!(wl.watchers(lit).is_empty());
  }
}
