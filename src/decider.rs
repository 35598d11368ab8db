use crate::clause::Clause;
use crate::error::SolverError;
use crate::heap::IndexedMaxHeap;
use crate::literal::{Literal, Var};

/// Variable/literal selection heuristic used to pick the next decision.
#[derive(Debug)]
pub enum Decider {
  /// Always picks the smallest-numbered unassigned variable, assigned `true`.
  Ordered,
  /// VSIDS: tracks a score per literal, decides on the top-scoring literal.
  Vsids { num_vars: u32, lit_scores: Vec<f64>, queue: IndexedMaxHeap, incr: f64 },
  /// MiniSat-style: tracks a score per variable plus a remembered phase.
  Minisat { num_vars: u32, var_scores: Vec<f64>, phase: Vec<bool>, queue: IndexedMaxHeap, incr: f64 },
}

impl Decider {
  pub fn new(name: &str, num_vars: u32) -> Result<Self, SolverError> {
    match name {
      "ORDERED" => Ok(Decider::Ordered),
      "VSIDS" => Ok(Decider::Vsids {
        num_vars,
        lit_scores: vec![0.0; (2 * num_vars + 1) as usize],
        queue: IndexedMaxHeap::default(),
        incr: 1.0,
      }),
      "MINISAT" => Ok(Decider::Minisat {
        num_vars,
        var_scores: vec![0.0; (num_vars + 1) as usize],
        phase: vec![false; (num_vars + 1) as usize],
        queue: IndexedMaxHeap::default(),
        incr: 1.0,
      }),
      other => Err(SolverError::UnknownDecider(other.to_string())),
    }
  }

  /// Bumps scores for every literal in a clause read during ingest.
  pub fn on_initial_clause(&mut self, clause: &Clause) {
    match self {
      Decider::Ordered => {},
      Decider::Vsids { lit_scores, .. } => {
        for lit in clause.literals() {
          lit_scores[lit.index()] += 1.0;
        }
      },
      Decider::Minisat { num_vars, var_scores, .. } => {
        for lit in clause.literals() {
          var_scores[lit.var(*num_vars).index()] += 1.0;
        }
      },
    }
  }

  /// Builds the selection queue once ingest is complete, excluding variables already
  /// assigned (e.g. by level-0 unit clauses).
  pub fn build_queue(&mut self, assigned: &[Option<bool>]) {
    match self {
      Decider::Ordered => {},
      Decider::Vsids { num_vars, lit_scores, queue, .. } => {
        let n = *num_vars;
        *queue = IndexedMaxHeap::from_scores(lit_scores, |idx| {
          idx >= 1 && idx <= (2 * n) as usize && assigned[Literal::from_index(idx).var(n).index()].is_none()
        });
      },
      Decider::Minisat { var_scores, queue, .. } => {
        *queue = IndexedMaxHeap::from_scores(var_scores, |idx| idx >= 1 && assigned[idx].is_none());
      },
    }
  }

  /// Picks the next decision, or `None` if every variable is already assigned.
  pub fn decide(&mut self, assigned: &[Option<bool>]) -> Option<(Var, bool)> {
    match self {
      Decider::Ordered => {
        (1..assigned.len() as u32).find(|&v| assigned[v as usize].is_none()).map(|v| (Var(v), true))
      },
      Decider::Vsids { num_vars, queue, .. } => {
        let lit = Literal::from_index(queue.extract_max()?);
        let var = lit.var(*num_vars);
        let value = lit.polarity(*num_vars);
        queue.remove(lit.complement(*num_vars).index());
        Some((var, value))
      },
      Decider::Minisat { phase, queue, .. } => {
        let var_idx = queue.extract_max()?;
        Some((Var(var_idx as u32), phase[var_idx]))
      },
    }
  }

  /// Removes a variable from the selection queue once it has been assigned.
  pub fn on_assign(&mut self, var: Var, value: bool) {
    match self {
      Decider::Ordered => {},
      Decider::Vsids { num_vars, queue, .. } => {
        queue.remove(Literal::positive(var).index());
        queue.remove(Literal::negative(var, *num_vars).index());
      },
      Decider::Minisat { phase, queue, .. } => {
        queue.remove(var.index());
        phase[var.index()] = value;
      },
    }
  }

  /// Reinserts a variable into the selection queue after it is unassigned by backtracking.
  pub fn on_unassign(&mut self, var: Var) {
    match self {
      Decider::Ordered => {},
      Decider::Vsids { num_vars, lit_scores, queue, .. } => {
        for lit in [Literal::positive(var), Literal::negative(var, *num_vars)] {
          queue.add(lit.index());
          queue.increase(lit.index(), lit_scores[lit.index()]);
        }
      },
      Decider::Minisat { var_scores, queue, .. } => {
        queue.add(var.index());
        queue.increase(var.index(), var_scores[var.index()]);
      },
    }
  }

  /// Bumps the activity of every literal/variable touched by a freshly learned clause, then
  /// ages the bump increment. The MiniSat increment grows without bound over a long run, as
  /// in the source heuristic; nothing here renormalizes it.
  pub fn on_learned_clause(&mut self, clause: &Clause) {
    match self {
      Decider::Ordered => {},
      Decider::Vsids { lit_scores, queue, incr, .. } => {
        for lit in clause.literals() {
          lit_scores[lit.index()] += *incr;
          queue.increase(lit.index(), *incr);
        }
        *incr += 0.75;
      },
      Decider::Minisat { num_vars, var_scores, queue, incr, .. } => {
        for lit in clause.literals() {
          let v = lit.var(*num_vars).index();
          var_scores[v] += *incr;
          queue.increase(v, *incr);
        }
        *incr /= 0.85;
      },
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::clause::dedup_preserve_order;

  #[test]
  fn unknown_decider_name_is_rejected() {
    assert!(Decider::new("BOGUS", 3).is_err());
  }

  #[test]
  fn ordered_picks_smallest_unassigned_true() {
    let mut d = Decider::new("ORDERED", 3).unwrap();
    let assigned = vec![None, None, Some(true), None];
    assert_eq!(d.decide(&assigned), Some((Var(1), true)));
  }

  #[test]
  fn vsids_prefers_higher_scored_literal() {
    let n = 3;
    let mut d = Decider::new("VSIDS", n).unwrap();
    let c = Clause::new(dedup_preserve_order(&[Literal::negative(Var(2), n)]), false);
    d.on_initial_clause(&c);
    d.on_initial_clause(&c);
    let assigned = vec![None; 4];
    d.build_queue(&assigned);
    let (var, value) = d.decide(&assigned).unwrap();
    assert_eq!(var, Var(2));
    assert!(!value);
  }

  #[test]
  fn minisat_replays_remembered_phase() {
    let n = 2;
    let mut d = Decider::new("MINISAT", n).unwrap();
    let assigned = vec![None; 3];
    d.build_queue(&assigned);
    d.on_assign(Var(1), false);
    let bump = Clause::new(dedup_preserve_order(&[Literal::positive(Var(1))]), true);
    d.on_learned_clause(&bump);
    d.on_unassign(Var(1));
    let (var, value) = d.decide(&vec![None; 3]).unwrap();
    assert_eq!(var, Var(1));
    assert!(!value);
  }
}
