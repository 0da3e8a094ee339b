use crate::error::ExperimentResult;
use crate::metrics::ScenarioResult;

pub(crate) fn export_to_csv_impl(
    results: &[ScenarioResult],
    file: std::fs::File,
) -> ExperimentResult<()> {
    let mut wtr = csv::Writer::from_writer(file);

    wtr.write_record(["scenario", "metric", "mean", "half_width", "lower", "upper"])?;

    for result in results {
        for (metric, interval) in result.metric_rows() {
            wtr.write_record([
                result.name.as_str(),
                metric.as_str(),
                &interval.mean.to_string(),
                &interval.half_width.to_string(),
                &interval.lower.to_string(),
                &interval.upper.to_string(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
