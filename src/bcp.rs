use crate::literal::Literal;
use crate::solver::Solver;
use crate::trail::BcpOutcome;

impl Solver {
  /// Propagates unit implications from the trail until either it is exhausted, a restart
  /// condition fires, or a clause becomes falsified.
  ///
  /// `first_time` selects where propagation resumes: from the very start of the trail (used
  /// on a fresh call after a decision was just pushed) or from only the most recently pushed
  /// entry (used when resuming after a non-restarting conflict backjump, where everything
  /// before the new assertion has already been fully propagated).
  pub(crate) fn bcp(&mut self, first_time: bool) -> BcpOutcome {
    let mut index = if first_time { 0 } else { self.trail.len().saturating_sub(1) };

    while index < self.trail.len() {
      let rec = self.trail.get(index);
      // The literal that became false as a result of this assignment.
      let false_lit = if rec.value {
        Literal::negative(rec.var, self.num_vars)
      } else {
        Literal::positive(rec.var)
      };

      let watchers = self.watch_list.take_watchers(false_lit);
      for clause_id in watchers {
        let other = self.other_watch(clause_id, false_lit);
        if self.literal_value(other) == Some(true) {
          self.watch_list.register(false_lit, clause_id);
          continue;
        }

        let clause_lits: Vec<Literal> = self.db.get(clause_id).literals().to_vec();
        let replacement = clause_lits
          .into_iter()
          .find(|&lit| lit != other && lit != false_lit && self.literal_value(lit) != Some(false));

        match replacement {
          Some(new_watch) => {
            self.move_watch(clause_id, false_lit, new_watch);
            self.watch_list.register(new_watch, clause_id);
          },
          None => {
            self.watch_list.register(false_lit, clause_id);
            match self.literal_value(other) {
              None => self.imply(other, clause_id, self.level),
              Some(false) => {
                if self.restarter.on_conflict() {
                  self.stats.restarts += 1;
                  log::debug!("restart at level {}", self.level);
                  return BcpOutcome::Restart;
                }
                log::debug!("conflict: clause {clause_id} at level {}", self.level);
                return BcpOutcome::Conflict { clause: clause_id, level: self.level };
              },
              Some(true) => unreachable!("other watch was already checked true above"),
            }
          },
        }
      }

      index += 1;
    }

    BcpOutcome::NoConflict
  }
}
