//! Historical arrival counts -> hourly arrival-rate table.
//!
//! Input is a CSV with one header row and one row per day holding 18 hourly
//! counts (6 AM to midnight). Rows that are short or hold anything other than
//! non-negative integers in the first 18 columns are skipped whole. The table
//! is the per-hour mean over the remaining rows; with none left the uniform
//! fallback rate is used.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use clinic_core::arrivals::{ArrivalRateTable, OPERATING_HOURS};
use tracing::{debug, warn};

use crate::error::ExperimentResult;

/// Load a rate table from a CSV file. A missing or unreadable file is an
/// error; bad rows inside a readable file are not.
pub fn load_arrival_rates(path: impl AsRef<Path>) -> ExperimentResult<ArrivalRateTable> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let table = arrival_rates_from_reader(file)?;
    debug!(path = %path.display(), "loaded arrival rates");
    Ok(table)
}

pub fn arrival_rates_from_reader<R: Read>(reader: R) -> ExperimentResult<ArrivalRateTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut totals = [0.0; OPERATING_HOURS];
    let mut valid_days = 0usize;
    let mut skipped = 0usize;
    for (line, record) in csv_reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        match parse_day(&record) {
            Some(counts) => {
                for (total, count) in totals.iter_mut().zip(counts) {
                    *total += count as f64;
                }
                valid_days += 1;
            }
            None => {
                debug!(row = line + 1, "skipping malformed arrival row");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!(skipped, valid_days, "skipped malformed arrival-count rows");
    }
    if valid_days == 0 {
        warn!("no valid arrival-count rows; using fallback hourly rate");
        return Ok(ArrivalRateTable::fallback());
    }
    Ok(ArrivalRateTable::new(
        totals.map(|total| total / valid_days as f64),
    ))
}

fn parse_day(record: &csv::StringRecord) -> Option<[u32; OPERATING_HOURS]> {
    if record.len() < OPERATING_HOURS {
        return None;
    }
    let mut counts = [0u32; OPERATING_HOURS];
    for (slot, field) in counts.iter_mut().zip(record.iter()) {
        *slot = field.parse().ok()?;
    }
    Some(counts)
}
