use crate::domain::ResultsDocument;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Reads the harness results file. A missing file is not an error here: the
/// harness may have exited before writing it, and the workflow reports that as
/// its own step. A present file that fails to parse is an error.
pub fn load_results(path: &Path) -> Result<Option<ResultsDocument>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
    let document =
        serde_json::from_str(&content).with_context(|| format!("parse of {:?}", path))?;

    Ok(Some(document))
}
