use std::fmt;
use std::time::{Duration, Instant};

/// Running counters and phase timings for a single solve, mirroring the fields the
/// reference statistics object tracks.
#[derive(Debug)]
pub struct Stats {
  pub input_file: String,
  pub result: String,
  pub num_vars: u32,
  pub num_orig_clauses: usize,
  pub num_learned_clauses: u32,
  pub num_decisions: u32,
  pub num_implications: u32,
  pub restarts: u32,

  start: Option<Instant>,
  read_time: Duration,
  bcp_time: Duration,
  decide_time: Duration,
  analyze_time: Duration,
  backtrack_time: Duration,
  complete_time: Duration,
}

impl Stats {
  pub fn new(input_file: String) -> Self {
    Stats {
      input_file,
      result: String::from("UNKNOWN"),
      num_vars: 0,
      num_orig_clauses: 0,
      num_learned_clauses: 0,
      num_decisions: 0,
      num_implications: 0,
      restarts: 0,
      start: None,
      read_time: Duration::ZERO,
      bcp_time: Duration::ZERO,
      decide_time: Duration::ZERO,
      analyze_time: Duration::ZERO,
      backtrack_time: Duration::ZERO,
      complete_time: Duration::ZERO,
    }
  }

  pub fn start(&mut self) { self.start = Some(Instant::now()); }

  pub fn mark_read_done(&mut self) { self.read_time = self.elapsed_since_start(); }

  pub fn mark_complete(&mut self, result: &str) {
    self.result = result.to_string();
    self.complete_time = self.elapsed_since_start();
  }

  pub fn add_bcp_time(&mut self, d: Duration) { self.bcp_time += d; }

  pub fn add_decide_time(&mut self, d: Duration) { self.decide_time += d; }

  pub fn add_analyze_time(&mut self, d: Duration) { self.analyze_time += d; }

  pub fn add_backtrack_time(&mut self, d: Duration) { self.backtrack_time += d; }

  fn elapsed_since_start(&self) -> Duration {
    self.start.map(|s| s.elapsed()).unwrap_or(Duration::ZERO)
  }
}

impl fmt::Display for Stats {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{:-<40}", "")?;
    writeln!(f, "Input file            : {}", self.input_file)?;
    writeln!(f, "Result                : {}", self.result)?;
    writeln!(f, "Number of variables   : {}", self.num_vars)?;
    writeln!(f, "Number of clauses     : {}", self.num_orig_clauses)?;
    writeln!(f, "Learned clauses       : {}", self.num_learned_clauses)?;
    writeln!(f, "Decisions             : {}", self.num_decisions)?;
    writeln!(f, "Implications          : {}", self.num_implications)?;
    writeln!(f, "Restarts              : {}", self.restarts)?;
    writeln!(f, "Read time             : {:.6}s", self.read_time.as_secs_f64())?;
    writeln!(f, "BCP time              : {:.6}s", self.bcp_time.as_secs_f64())?;
    writeln!(f, "Decide time           : {:.6}s", self.decide_time.as_secs_f64())?;
    writeln!(f, "Analyze time          : {:.6}s", self.analyze_time.as_secs_f64())?;
    writeln!(f, "Backtrack time        : {:.6}s", self.backtrack_time.as_secs_f64())?;
    writeln!(f, "Total time            : {:.6}s", self.complete_time.as_secs_f64())?;
    writeln!(f, "{:-<40}", "")
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn display_includes_result_and_counts() {
    let mut stats = Stats::new("test.cnf".to_string());
    stats.num_vars = 3;
    stats.num_orig_clauses = 5;
    stats.num_decisions = 2;
    stats.mark_complete("SAT");
    let rendered = stats.to_string();
    assert!(rendered.contains("test.cnf"));
    assert!(rendered.contains("SAT"));
    assert!(rendered.contains("Number of variables   : 3"));
  }
}
