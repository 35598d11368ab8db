use crate::literal::{Literal, Var};
use crate::solver::{AnalysisResult, Solver};
use crate::trail::AssignmentRecord;

/// Removes duplicates (keeping first occurrence) and both polarities of `var` from the
/// concatenation of two clauses being resolved on that variable.
fn binary_resolve(a: &[Literal], b: &[Literal], var: Var, num_vars: u32) -> Vec<Literal> {
  let pos = Literal::positive(var);
  let neg = Literal::negative(var, num_vars);
  let mut seen = std::collections::HashSet::with_capacity(a.len() + b.len());
  a.iter()
    .chain(b.iter())
    .copied()
    .filter(|&lit| lit != pos && lit != neg)
    .filter(|lit| seen.insert(*lit))
    .collect()
}

impl Solver {
  /// Finds, among `working`, how many literals are assigned at `conflict_level`, and the
  /// one among them assigned most recently (the resolution candidate).
  fn count_at_conflict_level(&self, working: &[Literal], conflict_level: usize) -> (usize, Var, usize) {
    let mut count = 0;
    let mut candidate_var = Var(0);
    let mut candidate_index = 0usize;
    for lit in working {
      let var = lit.var(self.num_vars);
      let idx = self.trail_index_of[var.index()].expect("literal in conflict clause must be assigned");
      if self.trail.get(idx).level == conflict_level {
        count += 1;
        if count == 1 || idx > candidate_index {
          candidate_index = idx;
          candidate_var = var;
        }
      }
    }
    (count, candidate_var, candidate_index)
  }

  /// First-UIP conflict analysis: resolves the conflicting clause against antecedents of
  /// the variables assigned at the conflict level until exactly one literal at that level
  /// remains, then computes the backjump level from the rest.
  pub(crate) fn analyze(&mut self, conflict_clause: crate::clause::ClauseId, conflict_level: usize) -> AnalysisResult {
    if conflict_level == 0 {
      return AnalysisResult::Unsat;
    }

    let mut working: Vec<Literal> = self.db.get(conflict_clause).literals().to_vec();
    loop {
      let (count, cand_var, cand_idx) = self.count_at_conflict_level(&working, conflict_level);
      if count == 1 {
        break;
      }
      let antecedent = self
        .trail
        .get(cand_idx)
        .antecedent
        .expect("non-UIP literal at the conflict level must have an antecedent clause");
      let other: Vec<Literal> = self.db.get(antecedent).literals().to_vec();
      working = binary_resolve(&working, &other, cand_var, self.num_vars);
    }

    let assert_lit = working
      .iter()
      .copied()
      .find(|lit| self.trail.get(self.trail_index_of[lit.var(self.num_vars).index()].unwrap()).level == conflict_level)
      .expect("exactly one literal at the conflict level after analysis");

    let backtrack_level = working
      .iter()
      .copied()
      .filter(|&lit| lit != assert_lit)
      .map(|lit| self.trail.get(self.trail_index_of[lit.var(self.num_vars).index()].unwrap()).level)
      .max()
      .unwrap_or(0);

    let var = assert_lit.var(self.num_vars);
    let value = assert_lit.polarity(self.num_vars);

    if working.len() > 1 {
      let clause_id = self.learn_clause(working);
      let asserting = AssignmentRecord { var, value, level: backtrack_level, antecedent: Some(clause_id) };
      AnalysisResult::Backjump { level: backtrack_level, asserting: Some(asserting) }
    } else {
      let asserting = AssignmentRecord { var, value, level: 0, antecedent: None };
      AnalysisResult::Backjump { level: 0, asserting: Some(asserting) }
    }
  }
}
