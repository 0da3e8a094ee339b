//! Export of scenario results.
//!
//! CSV output is long format, one row per (scenario, metric); JSON output is
//! the full list of [`ScenarioResult`] values.

use std::path::Path;

use crate::error::ExperimentResult;
use crate::metrics::ScenarioResult;

#[path = "export/csv.rs"]
mod csv;
#[path = "export/json.rs"]
mod json;
#[path = "export/writer_utils.rs"]
mod writer_utils;

/// Write `results` as CSV with columns
/// `scenario,metric,mean,half_width,lower,upper`.
///
/// # Errors
///
/// Fails on empty input, or when the file cannot be created or written.
pub fn export_to_csv(results: &[ScenarioResult], path: impl AsRef<Path>) -> ExperimentResult<()> {
    writer_utils::ensure_not_empty(results)?;
    let file = writer_utils::create_output_file(path)?;
    csv::export_to_csv_impl(results, file)
}

/// Write `results` as a pretty-printed JSON array.
pub fn export_to_json(results: &[ScenarioResult], path: impl AsRef<Path>) -> ExperimentResult<()> {
    writer_utils::ensure_not_empty(results)?;
    let file = writer_utils::create_output_file(path)?;
    json::export_to_json_impl(results, file)
}
