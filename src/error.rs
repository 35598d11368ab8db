use crate::dimacs::ParserError;
use thiserror::Error;

/// Top-level error type surfaced by the CLI binaries.
#[derive(Debug, Error)]
pub enum SolverError {
  #[error("unknown decider heuristic: {0:?} (expected one of ORDERED, VSIDS, MINISAT)")]
  UnknownDecider(String),

  #[error("unknown restart strategy: {0:?} (expected None, GEOMETRIC, or LUBY)")]
  UnknownRestarter(String),

  #[error("expected log flag \"True\" or \"False\", got {0:?}")]
  InvalidLogFlag(String),

  #[error("malformed assignment line: {0:?}")]
  InvalidAssignmentLine(String),

  #[error(transparent)]
  Parse(#[from] ParserError),

  #[error(transparent)]
  Io(#[from] std::io::Error),
}
