use crate::error::SolverError;
use crate::luby::LubyGenerator;

const LUBY_BASE: u64 = 512;
const GEOMETRIC_BASE: u64 = 512;
const GEOMETRIC_MULTIPLIER: u64 = 2;

/// Restart policy consulted once per conflict, before the conflict is analyzed.
#[derive(Debug)]
pub enum Restarter {
  /// Never restarts.
  None,
  /// Doubles the conflict budget after each restart.
  Geometric { conflict_limit: u64, multiplier: u64, conflicts_since_restart: u64 },
  /// Scales the base budget by the Luby sequence after each restart.
  Luby { generator: LubyGenerator, base: u64, conflict_limit: u64, conflicts_since_restart: u64 },
}

impl Restarter {
  pub fn new(name: &str) -> Result<Self, SolverError> {
    match name {
      "None" => Ok(Restarter::None),
      "GEOMETRIC" => Ok(Restarter::Geometric {
        conflict_limit: GEOMETRIC_BASE,
        multiplier: GEOMETRIC_MULTIPLIER,
        conflicts_since_restart: 0,
      }),
      "LUBY" => {
        let mut generator = LubyGenerator::new();
        let conflict_limit = LUBY_BASE * generator.next_term();
        Ok(Restarter::Luby { generator, base: LUBY_BASE, conflict_limit, conflicts_since_restart: 0 })
      },
      other => Err(SolverError::UnknownRestarter(other.to_string())),
    }
  }

  /// Records a conflict and reports whether a restart should fire now. When it does, the
  /// internal budget is reset/advanced so the next call starts a fresh window.
  pub fn on_conflict(&mut self) -> bool {
    match self {
      Restarter::None => false,
      Restarter::Geometric { conflict_limit, multiplier, conflicts_since_restart } => {
        *conflicts_since_restart += 1;
        if *conflicts_since_restart >= *conflict_limit {
          *conflicts_since_restart = 0;
          *conflict_limit *= *multiplier;
          true
        } else {
          false
        }
      },
      Restarter::Luby { generator, base, conflict_limit, conflicts_since_restart } => {
        *conflicts_since_restart += 1;
        if *conflicts_since_restart >= *conflict_limit {
          *conflicts_since_restart = 0;
          *conflict_limit = *base * generator.next_term();
          true
        } else {
          false
        }
      },
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn unknown_restarter_name_is_rejected() {
    assert!(Restarter::new("BOGUS").is_err());
  }

  #[test]
  fn none_never_restarts() {
    let mut r = Restarter::new("None").unwrap();
    for _ in 0..10_000 {
      assert!(!r.on_conflict());
    }
  }

  #[test]
  fn geometric_restarts_after_its_budget_and_then_doubles() {
    let mut r = Restarter::new("GEOMETRIC").unwrap();
    for _ in 0..(GEOMETRIC_BASE - 1) {
      assert!(!r.on_conflict());
    }
    assert!(r.on_conflict());
    if let Restarter::Geometric { conflict_limit, .. } = r {
      assert_eq!(conflict_limit, GEOMETRIC_BASE * GEOMETRIC_MULTIPLIER);
    } else {
      unreachable!()
    }
  }
}
