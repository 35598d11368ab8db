use crate::clause::{dedup_preserve_order, Clause};
use crate::literal::Literal;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
  #[error(transparent)]
  Io(#[from] io::Error),

  #[error("no \"p cnf\" header found before the first clause")]
  MissingProblemLine,

  #[error("line {line}: {token:?} is not a valid literal")]
  InvalidLiteral { line: usize, token: String },

  #[error("line {line}: malformed \"p cnf\" header: {text:?}")]
  MalformedProblemLine { line: usize, text: String },
}

/// A fully parsed DIMACS CNF instance.
#[derive(Debug, Default)]
pub struct ParsedCnf {
  pub num_vars: u32,
  pub num_clauses_declared: usize,
  pub clauses: Vec<Clause>,
}

/// Parses a DIMACS CNF file, transparently decompressing it if its name ends in `.gz`.
pub fn parse_dimacs_file(path: impl AsRef<Path>) -> Result<ParsedCnf, ParserError> {
  let path = path.as_ref();
  let file = File::open(path)?;
  if path.extension().and_then(|e| e.to_str()) == Some("gz") {
    parse_dimacs(BufReader::new(GzDecoder::new(file)))
  } else {
    parse_dimacs(BufReader::new(file))
  }
}

/// Parses a DIMACS CNF instance from any buffered reader.
pub fn parse_dimacs<R: Read>(reader: BufReader<R>) -> Result<ParsedCnf, ParserError> {
  let mut num_vars = 0u32;
  let mut num_clauses_declared = 0usize;
  let mut clauses = Vec::new();
  let mut curr_tokens: Vec<Literal> = Vec::new();
  let mut seen_header = false;

  for (lineno, line) in reader.lines().enumerate() {
    let line = line?;
    let line = line.trim();
    if line.is_empty() || line.starts_with('c') {
      continue;
    }
    if line.starts_with("p cnf") || line.starts_with("p  cnf") {
      let fields: Vec<&str> = line.split_whitespace().collect();
      let (vars, clause_count) = match (fields.get(2), fields.get(3)) {
        (Some(v), Some(c)) => (v.parse::<u32>(), c.parse::<usize>()),
        _ => {
          return Err(ParserError::MalformedProblemLine { line: lineno + 1, text: line.to_string() })
        },
      };
      let (vars, clause_count) = match (vars, clause_count) {
        (Ok(v), Ok(c)) => (v, c),
        _ => {
          return Err(ParserError::MalformedProblemLine { line: lineno + 1, text: line.to_string() })
        },
      };
      num_vars = vars;
      num_clauses_declared = clause_count;
      clauses.reserve(clause_count);
      seen_header = true;
      continue;
    }
    if !seen_header {
      return Err(ParserError::MissingProblemLine);
    }
    for token in line.split_whitespace() {
      let value: i32 = token
        .parse()
        .map_err(|_| ParserError::InvalidLiteral { line: lineno + 1, token: token.to_string() })?;
      if value == 0 {
        let lits = dedup_preserve_order(&curr_tokens);
        curr_tokens.clear();
        clauses.push(Clause::new(lits, false));
      } else {
        curr_tokens.push(Literal::from_dimacs(value, num_vars));
      }
    }
  }

  Ok(ParsedCnf { num_vars, num_clauses_declared, clauses })
}

#[cfg(test)]
mod test {
  use super::*;

  fn parse_str(s: &str) -> ParsedCnf {
    parse_dimacs(BufReader::new(s.as_bytes())).unwrap()
  }

  #[test]
  fn parses_header_and_clauses() {
    let cnf = parse_str("c a comment\np cnf 3 2\n1 -2 0\n2 3 0\n");
    assert_eq!(cnf.num_vars, 3);
    assert_eq!(cnf.num_clauses_declared, 2);
    assert_eq!(cnf.clauses.len(), 2);
    assert_eq!(cnf.clauses[0].len(), 2);
  }

  #[test]
  fn clause_spanning_multiple_lines() {
    let cnf = parse_str("p cnf 3 1\n1 -2\n3 0\n");
    assert_eq!(cnf.clauses.len(), 1);
    assert_eq!(cnf.clauses[0].len(), 3);
  }

  #[test]
  fn missing_header_is_an_error() {
    let err = parse_dimacs(BufReader::new("1 2 0\n".as_bytes()));
    assert!(matches!(err, Err(ParserError::MissingProblemLine)));
  }

  #[test]
  fn invalid_literal_reports_line_number() {
    let err = parse_dimacs(BufReader::new("p cnf 2 1\n1 x 0\n".as_bytes()));
    match err {
      Err(ParserError::InvalidLiteral { line, .. }) => assert_eq!(line, 2),
      other => panic!("expected InvalidLiteral, got {other:?}"),
    }
  }
}
