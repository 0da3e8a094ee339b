use std::fs::File;
use std::path::Path;

use crate::error::{ExperimentError, ExperimentResult};

pub(crate) fn ensure_not_empty<T>(items: &[T]) -> ExperimentResult<()> {
    if items.is_empty() {
        return Err(ExperimentError::Config("no results to export".to_string()));
    }

    Ok(())
}

pub(crate) fn create_output_file(path: impl AsRef<Path>) -> ExperimentResult<File> {
    Ok(File::create(path)?)
}
