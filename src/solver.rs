use crate::clause::{dedup_preserve_order, Clause, ClauseId};
use crate::database::ClauseDatabase;
use crate::decider::Decider;
use crate::dimacs::ParsedCnf;
use crate::error::SolverError;
use crate::literal::{Literal, Var};
use crate::restart::Restarter;
use crate::stats::Stats;
use crate::trail::{AssignmentRecord, BcpOutcome, Trail};
use crate::watch_list::WatchList;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveResult {
  Sat,
  Unsat,
}

/// The CDCL solver state for a single instance.
pub struct Solver {
  pub(crate) num_vars: u32,
  pub(crate) db: ClauseDatabase,
  pub(crate) watch_list: WatchList,
  /// `watch_pairs[id]` are the two literals clause `id` is currently watching on.
  pub(crate) watch_pairs: Vec<(Literal, Literal)>,
  pub(crate) trail: Trail,
  pub(crate) assigned: Vec<Option<bool>>,
  /// `trail_index_of[var]` is this variable's position in the trail, when assigned.
  pub(crate) trail_index_of: Vec<Option<usize>>,
  pub(crate) level: usize,
  pub(crate) decider: Decider,
  pub(crate) restarter: Restarter,
  pub stats: Stats,
  ingest_conflict: bool,
}

impl Solver {
  /// Builds a solver from a parsed CNF instance, performing the ingest contract: unit
  /// clauses are resolved immediately at level 0, multi-literal clauses are stored with
  /// their first two literals as the initial watch pair, and heuristic state is primed
  /// for every variable left unassigned afterward.
  pub fn build(
    parsed: ParsedCnf,
    decider_name: &str,
    restarter_name: &str,
    input_file: String,
  ) -> Result<Self, SolverError> {
    let num_vars = parsed.num_vars;
    let mut db = ClauseDatabase::new();
    let mut watch_list = WatchList::new(num_vars);
    let mut watch_pairs = Vec::new();
    let mut trail = Trail::new();
    let mut assigned = vec![None; (num_vars + 1) as usize];
    let mut trail_index_of = vec![None; (num_vars + 1) as usize];
    let mut decider = Decider::new(decider_name, num_vars)?;
    let restarter = Restarter::new(restarter_name)?;
    let mut ingest_conflict = false;

    for clause in parsed.clauses {
      if clause.is_empty() {
        ingest_conflict = true;
        break;
      }
      if clause.len() == 1 {
        let lit = clause.literals()[0];
        let var = lit.var(num_vars);
        let value = lit.polarity(num_vars);
        match assigned[var.index()] {
          None => {
            assigned[var.index()] = Some(value);
            trail_index_of[var.index()] = Some(trail.len());
            trail.push(AssignmentRecord { var, value, level: 0, antecedent: None });
          },
          Some(existing) if existing != value => {
            ingest_conflict = true;
            break;
          },
          Some(_) => {},
        }
        continue;
      }
      decider.on_initial_clause(&clause);
      let w0 = clause.literals()[0];
      let w1 = clause.literals()[1];
      let id = db.add(clause);
      watch_pairs.push((w0, w1));
      debug_assert_eq!(id as usize, watch_pairs.len() - 1);
      watch_list.register(w0, id);
      watch_list.register(w1, id);
    }
    db.mark_ingest_complete();
    decider.build_queue(&assigned);

    let mut stats = Stats::new(input_file);
    stats.num_vars = num_vars;
    stats.num_orig_clauses = parsed.num_clauses_declared;

    Ok(Solver {
      num_vars,
      db,
      watch_list,
      watch_pairs,
      trail,
      assigned,
      trail_index_of,
      level: 0,
      decider,
      restarter,
      stats,
      ingest_conflict,
    })
  }

  pub fn assignment(&self) -> &[Option<bool>] { &self.assigned }

  #[inline]
  pub(crate) fn literal_value(&self, lit: Literal) -> Option<bool> {
    self.assigned[lit.var(self.num_vars).index()].map(|v| lit.is_true(v, self.num_vars))
  }

  #[inline]
  pub(crate) fn other_watch(&self, clause: ClauseId, lit: Literal) -> Literal {
    let (a, b) = self.watch_pairs[clause as usize];
    if a == lit { b } else { a }
  }

  #[inline]
  pub(crate) fn move_watch(&mut self, clause: ClauseId, from: Literal, to: Literal) {
    let pair = &mut self.watch_pairs[clause as usize];
    if pair.0 == from {
      pair.0 = to;
    } else {
      pair.1 = to;
    }
  }

  /// Assigns `lit` true as an implication of `clause` at `level`, recording it on the
  /// trail and notifying the decider.
  pub(crate) fn imply(&mut self, lit: Literal, clause: ClauseId, level: usize) {
    let var = lit.var(self.num_vars);
    let value = lit.polarity(self.num_vars);
    self.assigned[var.index()] = Some(value);
    self.trail_index_of[var.index()] = Some(self.trail.len());
    self.trail.push(AssignmentRecord { var, value, level, antecedent: Some(clause) });
    self.decider.on_assign(var, value);
    self.stats.num_implications += 1;
    log::trace!("imply: var {var} = {value} via clause {clause} at level {level}");
  }

  /// Learns `literals` as a new clause, registering its first two literals as the initial
  /// watch pair, and returns its id.
  pub(crate) fn learn_clause(&mut self, literals: Vec<Literal>) -> ClauseId {
    let lits = dedup_preserve_order(&literals);
    let clause = Clause::new(lits, true);
    self.decider.on_learned_clause(&clause);
    let w0 = clause.literals()[0];
    let w1 = clause.literals()[1];
    let id = self.db.add(clause);
    self.watch_pairs.push((w0, w1));
    self.watch_list.register(w0, id);
    self.watch_list.register(w1, id);
    self.stats.num_learned_clauses += 1;
    id
  }

  /// Picks the next decision literal and pushes it onto the trail as a new decision level.
  /// Returns `false` once every variable is assigned.
  pub(crate) fn decide_and_push(&mut self) -> bool {
    let Some((var, value)) = self.decider.decide(&self.assigned) else {
      return false;
    };
    self.level += 1;
    self.assigned[var.index()] = Some(value);
    self.trail_index_of[var.index()] = Some(self.trail.len());
    self.trail.push(AssignmentRecord { var, value, level: self.level, antecedent: None });
    self.decider.on_assign(var, value);
    self.stats.num_decisions += 1;
    log::debug!("decide: var {var} = {value} at level {}", self.level);
    true
  }

  /// Runs the solver to completion.
  pub fn solve(&mut self) -> SolveResult {
    self.stats.start();
    if self.ingest_conflict {
      self.stats.mark_complete("UNSAT");
      return SolveResult::Unsat;
    }
    self.stats.mark_read_done();

    let mut first_time = true;
    loop {
      loop {
        let t0 = Instant::now();
        let outcome = self.bcp(first_time);
        self.stats.add_bcp_time(t0.elapsed());
        first_time = false;
        match outcome {
          BcpOutcome::NoConflict => break,
          BcpOutcome::Restart => {
            self.backtrack(0, None);
            break;
          },
          BcpOutcome::Conflict { clause, level } => {
            let t1 = Instant::now();
            let analysis = self.analyze(clause, level);
            self.stats.add_analyze_time(t1.elapsed());
            match analysis {
              AnalysisResult::Unsat => {
                self.stats.mark_complete("UNSAT");
                log::debug!("result: UNSAT");
                return SolveResult::Unsat;
              },
              AnalysisResult::Backjump { level, asserting } => {
                let t2 = Instant::now();
                self.backtrack(level, asserting);
                self.stats.add_backtrack_time(t2.elapsed());
              },
            }
          },
        }
      }

      let t3 = Instant::now();
      let decided = self.decide_and_push();
      self.stats.add_decide_time(t3.elapsed());
      if !decided {
        self.stats.mark_complete("SAT");
        log::debug!("result: SAT");
        return SolveResult::Sat;
      }
    }
  }
}

/// The outcome of conflict analysis.
pub(crate) enum AnalysisResult {
  Unsat,
  Backjump { level: usize, asserting: Option<AssignmentRecord> },
}

#[cfg(test)]
mod test {
  use super::*;
  use std::io::BufReader;

  fn build(cnf: &str, decider: &str, restarter: &str) -> Solver {
    let parsed = crate::dimacs::parse_dimacs(BufReader::new(cnf.as_bytes())).unwrap();
    Solver::build(parsed, decider, restarter, "test.cnf".to_string()).unwrap()
  }

  #[test]
  fn trivial_unit_sat() {
    let mut s = build("p cnf 1 1\n1 0\n", "ORDERED", "None");
    assert_eq!(s.solve(), SolveResult::Sat);
    assert_eq!(s.assignment()[1], Some(true));
  }

  #[test]
  fn conflicting_units_are_unsat_at_ingest() {
    let mut s = build("p cnf 1 2\n1 0\n-1 0\n", "ORDERED", "None");
    assert_eq!(s.solve(), SolveResult::Unsat);
  }

  #[test]
  fn three_clause_sat_every_decider() {
    let cnf = "p cnf 3 3\n1 2 0\n-1 3 0\n-2 -3 0\n";
    for decider in ["ORDERED", "VSIDS", "MINISAT"] {
      let mut s = build(cnf, decider, "None");
      assert_eq!(s.solve(), SolveResult::Sat, "decider {decider}");
    }
  }

  #[test]
  fn forced_both_polarities_is_unsat() {
    let cnf = "p cnf 1 2\n1 0\n-1 0\n";
    for decider in ["ORDERED", "VSIDS", "MINISAT"] {
      let mut s = build(cnf, decider, "None");
      assert_eq!(s.solve(), SolveResult::Unsat, "decider {decider}");
    }
  }

  #[test]
  fn pigeonhole_php_3_2_is_unsat() {
    // 3 pigeons, 2 holes: vars 1..=6, var(p,h) = (p-1)*2+h
    let cnf = "\
p cnf 6 9
1 2 0
3 4 0
5 6 0
-1 -3 0
-1 -5 0
-3 -5 0
-2 -4 0
-2 -6 0
-4 -6 0
";
    for decider in ["ORDERED", "VSIDS", "MINISAT"] {
      for restarter in ["None", "GEOMETRIC", "LUBY"] {
        let mut s = build(cnf, decider, restarter);
        assert_eq!(s.solve(), SolveResult::Unsat, "decider {decider} restarter {restarter}");
      }
    }
  }

  #[test]
  fn satisfiable_horn_formula_needs_no_decisions() {
    // unit-propagates completely: 1 forces 2, 2 forces 3.
    let cnf = "p cnf 3 3\n1 0\n-1 2 0\n-2 3 0\n";
    let mut s = build(cnf, "ORDERED", "None");
    assert_eq!(s.solve(), SolveResult::Sat);
    assert_eq!(s.stats.num_decisions, 0);
  }

  #[test]
  fn result_is_independent_of_decider_and_restarter() {
    let cnf = "\
p cnf 6 9
1 2 0
3 4 0
5 6 0
-1 -3 0
-1 -5 0
-3 -5 0
-2 -4 0
-2 -6 0
-4 -6 0
";
    let mut results = Vec::new();
    for decider in ["ORDERED", "VSIDS", "MINISAT"] {
      for restarter in ["None", "GEOMETRIC", "LUBY"] {
        let mut s = build(cnf, decider, restarter);
        results.push(s.solve());
      }
    }
    assert!(results.iter().all(|&r| r == SolveResult::Unsat));
  }
}
