use crate::solver::Solver;
use crate::trail::AssignmentRecord;

impl Solver {
  /// Unwinds the trail to `level`, undoing every assignment made above it and reinstating
  /// the corresponding variables in the decider's selection queue, then optionally pushes
  /// one new asserting assignment (the result of conflict analysis).
  pub(crate) fn backtrack(&mut self, level: usize, asserting: Option<AssignmentRecord>) {
    self.level = level;
    for rec in self.trail.unwind_above(level) {
      self.assigned[rec.var.index()] = None;
      self.trail_index_of[rec.var.index()] = None;
      self.decider.on_unassign(rec.var);
    }

    if let Some(rec) = asserting {
      self.assigned[rec.var.index()] = Some(rec.value);
      self.trail_index_of[rec.var.index()] = Some(self.trail.len());
      self.trail.push(rec);
      self.decider.on_assign(rec.var, rec.value);
      self.stats.num_implications += 1;
    }
  }
}
