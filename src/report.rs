use crate::literal::Var;
use crate::stats::Stats;
use std::fs;
use std::io;
use std::path::Path;

/// Writes `Results/stats_<basename>.txt` and, when an assignment is available,
/// `Results/assgn_<basename>.txt`, creating the `Results` directory if it doesn't exist.
pub fn write_reports(
  input_path: &Path,
  stats: &Stats,
  assignment: Option<&[Option<bool>]>,
) -> io::Result<()> {
  let results_dir = Path::new("Results");
  fs::create_dir_all(results_dir)?;

  let basename = input_path.file_stem().and_then(|s| s.to_str()).unwrap_or("input");

  let stats_path = results_dir.join(format!("stats_{basename}.txt"));
  fs::write(&stats_path, stats.to_string())?;

  if let Some(assignment) = assignment {
    let assgn_path = results_dir.join(format!("assgn_{basename}.txt"));
    let mut body = String::new();
    for (idx, value) in assignment.iter().enumerate().skip(1) {
      if let Some(value) = value {
        body.push_str(&format!("{}:{}\n", Var(idx as u32), value));
      }
    }
    fs::write(&assgn_path, body)?;
  }

  Ok(())
}
