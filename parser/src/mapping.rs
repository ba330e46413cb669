//! The label mapping parser.
//!
//! Parses the compact `assign-mappings` configuration value into a map
//! from label name to the reviewers eligible for that label.
//!
//! The grammar is as follows:
//!
//! ```text
//! mappings: <pair> | <pair> , <mappings>
//! <pair>: <label> : [ <reviewer-list> ]
//!
//! <label>: any non-empty run of characters except `,`
//! <reviewer-list>: comma-separated reviewer names; anything except `]`
//! ```
//!
//! Whitespace around top-level commas and around reviewer names is
//! ignored. A label that appears more than once keeps its last reviewer
//! list.

use std::collections::HashMap;

use regex::Regex;

use crate::error::FormatError;

/// Label name -> ordered reviewer list.
///
/// Every value holds at least one reviewer. Looking up an unknown label
/// yields `None`, not an error.
pub type LabelMapping = HashMap<String, Vec<String>>;

pub fn parse(input: &str) -> Result<LabelMapping, FormatError> {
    // A pair is a maximal run up to and including its closing `]`, so a
    // reviewer list may contain anything except `]` (commas included).
    let pair = Regex::new(r"[^,]+:[^\]]+\]").unwrap();
    let pairs: Vec<&str> = pair.find_iter(input).map(|m| m.as_str()).collect();
    if pairs.is_empty() {
        return Err(FormatError::NoPairs);
    }

    let mut mapping = LabelMapping::new();
    for pair in pairs {
        let (label, reviewers) = parse_pair(pair)?;
        log::trace!("parsed pair: {} -> {:?}", label, reviewers);
        mapping.insert(label, reviewers);
    }
    Ok(mapping)
}

fn parse_pair(pair: &str) -> Result<(String, Vec<String>), FormatError> {
    let (label, reviewers) = match pair.split_once(':') {
        Some((label, reviewers)) if !label.is_empty() && !reviewers.is_empty() => {
            (label, reviewers)
        }
        _ => return Err(FormatError::MalformedPair),
    };

    let label = label.trim();
    if label.is_empty() {
        return Err(FormatError::EmptyLabel);
    }

    let inner = match reviewers
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        Some(inner) => inner,
        None => return Err(FormatError::MalformedPair),
    };

    let reviewers: Vec<String> = inner
        .split(',')
        .map(str::trim)
        .filter(|reviewer| !reviewer.is_empty())
        .map(str::to_owned)
        .collect();
    if reviewers.is_empty() {
        return Err(FormatError::EmptyReviewers);
    }

    Ok((label.to_owned(), reviewers))
}

#[test]
fn parse_two_pairs() {
    let mapping = parse("label1:[reviewer1,reviewer2],label2:[reviewer3]").unwrap();
    assert_eq!(mapping.len(), 2);
    assert_eq!(mapping["label1"], ["reviewer1", "reviewer2"]);
    assert_eq!(mapping["label2"], ["reviewer3"]);
}

#[test]
fn parse_tolerates_whitespace() {
    let mapping = parse("label1:[reviewer1, reviewer2], label2:[ reviewer3 ]").unwrap();
    assert_eq!(mapping["label1"], ["reviewer1", "reviewer2"]);
    assert_eq!(mapping["label2"], ["reviewer3"]);
}

#[test]
fn parse_unbracketed_value() {
    let err = parse("label1:reviewer1").unwrap_err();
    assert_eq!(err, FormatError::NoPairs);
    assert_eq!(
        err.to_string(),
        "Each pair must be in the format \"label1:[reviewer1,reviewer2]\"."
    );
}

#[test]
fn parse_unbracketed_value_before_valid_pair() {
    // The run up to the first `]` is taken as one pair, whose value does
    // not start with `[`.
    assert_eq!(
        parse("label1:reviewer1,label2:[reviewer3]"),
        Err(FormatError::MalformedPair)
    );
}

#[test]
fn parse_empty_reviewer_list() {
    let err = parse("label1:[],label2:[reviewer1]").unwrap_err();
    assert_eq!(err, FormatError::EmptyReviewers);
    assert!(err.to_string().starts_with("reviewers must not be empty."));
}

#[test]
fn parse_blank_reviewer_entries() {
    assert_eq!(parse("label1:[ , ,]"), Err(FormatError::EmptyReviewers));
}

#[test]
fn parse_blank_label() {
    let err = parse(" :[reviewer1]").unwrap_err();
    assert_eq!(err, FormatError::EmptyLabel);
    assert!(err.to_string().starts_with("label must not be empty."));
}

#[test]
fn parse_last_pair_wins() {
    let mapping = parse("label1:[reviewer1],label1:[reviewer2]").unwrap();
    assert_eq!(mapping["label1"], ["reviewer2"]);
}

#[test]
fn parse_no_pairs() {
    assert_eq!(parse(""), Err(FormatError::NoPairs));
    assert_eq!(parse("just some text"), Err(FormatError::NoPairs));
}

#[test]
fn parse_keeps_duplicate_reviewers() {
    let mapping = parse("label1:[reviewer1,reviewer1]").unwrap();
    assert_eq!(mapping["label1"], ["reviewer1", "reviewer1"]);
}

#[test]
fn parse_reviewer_with_inner_whitespace() {
    // Only leading/trailing whitespace is stripped.
    let mapping = parse("label1:[some reviewer]").unwrap();
    assert_eq!(mapping["label1"], ["some reviewer"]);
}
