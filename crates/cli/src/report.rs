//! Human summary printed after a successful run.

use std::fmt::Write;

use brier_recon::RunReport;

pub fn render_summary(report: &RunReport, brier_column: &str) -> String {
    let s = &report.summary;
    let mut out = String::new();
    let _ = writeln!(out, "Brier Scoring Summary");
    let _ = writeln!(out, "Repo root: {}", report.repo_root.display());
    let _ = writeln!(out, "Locked predictions: {}", s.locked);
    let _ = writeln!(out, "Outcome rows: {}", s.outcomes);
    let _ = writeln!(out, "Brier computed: {}", s.computed);
    let _ = writeln!(out, "Skipped (missing outcome): {}", s.missing_outcome);
    let _ = writeln!(out, "Rows with no locked match: {}", s.unmatched);
    let _ = writeln!(out, "Wrote: {}", report.scored_path);
    if let Some(ref path) = report.updated_outcomes_path {
        let _ = writeln!(out, "Updated: {path} ({brier_column} filled where computable)");
    }
    out
}
