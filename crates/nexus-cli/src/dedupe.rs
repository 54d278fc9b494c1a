use std::collections::BTreeSet;

use nexus_model::NormalizationOutcome;

/// Drops outcomes whose canonical record has already been seen.
///
/// Records are compared by fingerprint; the first occurrence is kept and the
/// input order is preserved. Returns the kept outcomes and the number removed.
pub fn dedupe_by_fingerprint(
    outcomes: Vec<NormalizationOutcome>,
) -> (Vec<NormalizationOutcome>, usize) {
    let mut seen = BTreeSet::new();
    let before = outcomes.len();
    let kept: Vec<NormalizationOutcome> = outcomes
        .into_iter()
        .filter(|outcome| seen.insert(outcome.fingerprint()))
        .collect();
    let removed = before - kept.len();
    (kept, removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexus_model::{RawRecord, fields};
    use nexus_normalize::NormalizationPipeline;

    #[test]
    fn keeps_first_of_identical_records() {
        let pipeline = NormalizationPipeline::default();
        let raws = vec![
            RawRecord::new().with("nasa_id", "A").with("extra", 1.0),
            RawRecord::new().with("nasa_id", "B"),
            RawRecord::new().with("nasa_id", "A").with("extra", 2.0),
        ];
        let (kept, removed) = dedupe_by_fingerprint(pipeline.normalize_batch(&raws));

        assert_eq!(removed, 1);
        let ids: Vec<&str> = kept
            .iter()
            .filter_map(|o| o.record.text(fields::NASA_ID))
            .collect();
        assert_eq!(ids, vec!["A", "B"]);
    }
}
