use clap::Parser;
use cdcl_sat::dimacs::parse_dimacs_file;
use cdcl_sat::report::write_reports;
use cdcl_sat::solver::{SolveResult, Solver};
use cdcl_sat::SolverError;
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;

/// CDCL SAT solver: reads a DIMACS CNF instance and reports SAT/UNSAT.
#[derive(Parser, Debug)]
struct Args {
  /// "True" or "False" — whether to enable debug logging of decisions and implications.
  log_flag: String,
  /// One of ORDERED, VSIDS, MINISAT.
  decider: String,
  /// One of None, GEOMETRIC, LUBY.
  restarter: String,
  /// Path to a DIMACS CNF file, optionally gzip-compressed (`.gz`).
  input_path: PathBuf,
}

fn run(args: Args) -> Result<SolveResult, SolverError> {
  let log_flag = match args.log_flag.as_str() {
    "True" => true,
    "False" => false,
    other => return Err(SolverError::InvalidLogFlag(other.to_string())),
  };
  if log_flag {
    env_logger::Builder::new().filter_level(LevelFilter::Debug).init();
  }

  let parsed = parse_dimacs_file(&args.input_path)?;
  let input_file = args.input_path.display().to_string();
  let mut solver = Solver::build(parsed, &args.decider, &args.restarter, input_file)?;
  let result = solver.solve();

  println!("{}", solver.stats);
  match result {
    SolveResult::Sat => println!("SAT"),
    SolveResult::Unsat => println!("UNSAT"),
  }

  let assignment = matches!(result, SolveResult::Sat).then(|| solver.assignment());
  write_reports(&args.input_path, &solver.stats, assignment)?;

  Ok(result)
}

fn main() -> ExitCode {
  let args = Args::parse();
  match run(args) {
    Ok(_) => ExitCode::SUCCESS,
    Err(err) => {
      eprintln!("error: {err}");
      ExitCode::FAILURE
    },
  }
}
