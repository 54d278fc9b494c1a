use std::path::PathBuf;

use nexus_model::NormalizationOutcome;

#[derive(Debug)]
pub struct NormalizeResult {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub outcomes: Vec<NormalizationOutcome>,
    pub duplicates_removed: usize,
    pub has_errors: bool,
}

impl NormalizeResult {
    pub fn error_count(&self) -> usize {
        self.outcomes.iter().map(|o| o.errors.len()).sum()
    }

    pub fn gap_count(&self) -> usize {
        self.outcomes.iter().map(|o| o.gaps.len()).sum()
    }
}
