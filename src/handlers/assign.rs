//! Reviewer selection for pull requests.
//!
//! Candidates come from the labels attached to the PR: each label that
//! appears in the configured mapping contributes its reviewer list, in
//! label order, and one of the remaining candidates is picked at random
//! after ineligible users (the PR author) are dropped. A reviewer mapped
//! from several matched labels appears once per label, which raises their
//! odds accordingly.

use std::collections::HashSet;

use parser::mapping::LabelMapping;
use rand::Rng;

/// Picks a reviewer for the given label set, or `None` when nobody is
/// eligible. `None` is a normal outcome, not a failure.
///
/// `pick_index` is handed the candidate count and must return an index in
/// `[0, count)`; injecting it keeps selection deterministic under test.
/// Production callers pass [`random_index`].
///
/// An empty `labels` slice yields `None` without consulting the mapping.
/// Labels missing from the mapping contribute no candidates.
pub fn select_reviewer(
    labels: &[String],
    mapping: &LabelMapping,
    exclude: &HashSet<String>,
    pick_index: impl FnOnce(usize) -> usize,
) -> Option<String> {
    if labels.is_empty() {
        return None;
    }

    let candidates: Vec<&str> = labels
        .iter()
        .filter_map(|label| mapping.get(label))
        .flatten()
        .map(String::as_str)
        .filter(|candidate| !exclude.contains(*candidate))
        .collect();
    if candidates.is_empty() {
        return None;
    }

    let index = pick_index(candidates.len());
    Some(candidates[index].to_string())
}

/// Uniform index in `[0, count)`.
pub fn random_index(count: usize) -> usize {
    rand::thread_rng().gen_range(0..count)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAPPINGS: &str = "label1:[reviewer1,reviewer2], label2:[reviewer3]";

    fn mapping() -> LabelMapping {
        parser::mapping::parse(MAPPINGS).unwrap()
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn exclude(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn empty_labels_fast_path() {
        // The mapping and the randomness source must not be touched.
        let picked =
            select_reviewer(&[], &mapping(), &exclude(&[]), |_| panic!("must not draw"));
        assert_eq!(picked, None);
    }

    #[test]
    fn picks_first_candidate() {
        let picked = select_reviewer(&labels(&["label1"]), &mapping(), &exclude(&[]), |_| 0);
        assert_eq!(picked.as_deref(), Some("reviewer1"));
    }

    #[test]
    fn concatenates_candidates_across_labels() {
        let picked = select_reviewer(
            &labels(&["label1", "label2"]),
            &mapping(),
            &exclude(&[]),
            |count| {
                assert_eq!(count, 3);
                2
            },
        );
        assert_eq!(picked.as_deref(), Some("reviewer3"));
    }

    #[test]
    fn exclusion_preserves_order() {
        let picked = select_reviewer(
            &labels(&["label1", "label2"]),
            &mapping(),
            &exclude(&["reviewer2"]),
            |count| {
                assert_eq!(count, 2);
                1
            },
        );
        assert_eq!(picked.as_deref(), Some("reviewer3"));
    }

    #[test]
    fn unknown_label_contributes_nothing() {
        let picked =
            select_reviewer(&labels(&["label-unknown"]), &mapping(), &exclude(&[]), |_| 0);
        assert_eq!(picked, None);
    }

    #[test]
    fn everyone_excluded() {
        let picked = select_reviewer(
            &labels(&["label2"]),
            &mapping(),
            &exclude(&["reviewer3"]),
            |_| 0,
        );
        assert_eq!(picked, None);
    }

    #[test]
    fn never_picks_an_excluded_user() {
        let excluded = exclude(&["reviewer1"]);
        for index in 0..2 {
            let picked = select_reviewer(
                &labels(&["label1", "label2"]),
                &mapping(),
                &excluded,
                |_| index,
            )
            .unwrap();
            assert!(!excluded.contains(&picked));
        }
    }

    #[test]
    fn duplicates_across_labels_raise_weight() {
        let mapping = parser::mapping::parse("a:[shared,other],b:[shared]").unwrap();
        let picked = select_reviewer(&labels(&["a", "b"]), &mapping, &exclude(&[]), |count| {
            assert_eq!(count, 3);
            2
        });
        assert_eq!(picked.as_deref(), Some("shared"));
    }

    #[test]
    fn random_index_in_bounds() {
        for _ in 0..64 {
            assert!(random_index(3) < 3);
        }
    }
}
