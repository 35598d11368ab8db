use clap::Parser;
use cdcl_sat::dimacs::parse_dimacs_file;
use cdcl_sat::literal::Literal;
use cdcl_sat::SolverError;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Checks a variable assignment against a DIMACS CNF instance.
#[derive(Parser, Debug)]
struct Args {
  /// Path to the DIMACS CNF file.
  cnf_path: PathBuf,
  /// Path to an assignment file, one `var:true`/`var:false` pair per line.
  assignment_path: PathBuf,
}

fn parse_assignment(text: &str) -> Result<HashMap<u32, bool>, SolverError> {
  let mut assignment = HashMap::new();
  for line in text.lines() {
    let line = line.trim();
    if line.is_empty() {
      continue;
    }
    let (var, value) = line
      .split_once(':')
      .ok_or_else(|| SolverError::InvalidAssignmentLine(line.to_string()))?;
    let var: u32 = var
      .parse()
      .map_err(|_| SolverError::InvalidAssignmentLine(line.to_string()))?;
    let value: bool = value
      .parse()
      .map_err(|_| SolverError::InvalidAssignmentLine(line.to_string()))?;
    assignment.insert(var, value);
  }
  Ok(assignment)
}

fn is_valid(num_vars: u32, clauses: &[cdcl_sat::clause::Clause], assignment: &HashMap<u32, bool>) -> bool {
  clauses.iter().all(|clause| {
    clause.literals().iter().any(|&lit| {
      let var = lit.var(num_vars);
      match assignment.get(&var.0) {
        Some(&value) => lit.is_true(value, num_vars),
        None => false,
      }
    })
  })
}

fn run(args: Args) -> Result<bool, SolverError> {
  let parsed = parse_dimacs_file(&args.cnf_path)?;
  let text = fs::read_to_string(&args.assignment_path)?;
  let assignment = parse_assignment(&text)?;
  Ok(is_valid(parsed.num_vars, &parsed.clauses, &assignment))
}

fn main() -> ExitCode {
  let args = Args::parse();
  match run(args) {
    Ok(true) => {
      println!("YES!! The assignment is valid.");
      ExitCode::SUCCESS
    },
    Ok(false) => {
      println!("NO!! The assignment is not valid.");
      ExitCode::FAILURE
    },
    Err(err) => {
      eprintln!("error: {err}");
      ExitCode::FAILURE
    },
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use cdcl_sat::clause::dedup_preserve_order;
  use cdcl_sat::literal::Var;

  #[test]
  fn detects_a_falsified_clause() {
    let n = 2;
    let clauses =
      vec![cdcl_sat::clause::Clause::new(dedup_preserve_order(&[Literal::positive(Var(1)), Literal::negative(Var(2), n)]), false)];
    let mut assignment = HashMap::new();
    assignment.insert(1, false);
    assignment.insert(2, true);
    assert!(!is_valid(n, &clauses, &assignment));
    assignment.insert(2, false);
    assert!(is_valid(n, &clauses, &assignment));
  }

  #[test]
  fn parses_colon_separated_lines() {
    let parsed = parse_assignment("1:true\n2:false\n").unwrap();
    assert_eq!(parsed.get(&1), Some(&true));
    assert_eq!(parsed.get(&2), Some(&false));
  }
}
