// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

fn raw(value: Value) -> IndexMap<String, Value> {
    serde_json::from_value(value).unwrap()
}

#[test]
fn composite_keys_sum_without_bare_key() {
    let log = TimingLog::from_raw(&raw(json!({
        "critic_review_1": 2.0,
        "critic_review_2": 3.5,
    })));

    assert_eq!(log.duration(Phase::CriticReview), Some(5.5));
    assert_eq!(log.count(Phase::CriticReview), 2);
}

#[test]
fn bare_key_adds_to_composites() {
    let log = TimingLog::from_raw(&raw(json!({
        "critic_review": 1.0,
        "critic_review_1": 2.0,
    })));

    assert_eq!(log.duration(Phase::CriticReview), Some(3.0));
    assert_eq!(log.count(Phase::CriticReview), 2);
}

#[test]
fn non_reenterable_phases_ignore_composite_keys() {
    let log = TimingLog::from_raw(&raw(json!({
        "evaluation": 4.0,
        "evaluation_2": 9.0,
    })));

    assert_eq!(log.duration(Phase::Evaluation), Some(4.0));
    assert_eq!(log.count(Phase::Evaluation), 1);
}

#[test]
fn non_numeric_values_contribute_nothing() {
    let log = TimingLog::from_raw(&raw(json!({
        "critic_review_1": "2.0",
        "critic_review_2": null,
        "critic_review_3": 1.5,
        "model_training": {"seconds": 3},
    })));

    assert_eq!(log.duration(Phase::CriticReview), Some(1.5));
    assert_eq!(log.count(Phase::CriticReview), 1);
    assert_eq!(log.duration(Phase::ModelTraining), None);
}

#[yare::parameterized(
    unknown_phase   = { "tuning" },
    sentinel        = { "finalized" },
    other_prefix    = { "critic_reviewer_1" },
)]
fn unrecognized_keys_are_skipped(key: &str) {
    let mut map = IndexMap::new();
    map.insert(key.to_string(), json!(1.0));
    assert!(TimingLog::from_raw(&map).is_empty());
}

#[test]
fn non_numeric_suffixes_still_count_for_reenterable_phase() {
    let log = TimingLog::from_raw(&raw(json!({
        "critic_review_1": 1.0,
        "critic_review_final": 2.0,
    })));

    assert_eq!(log.duration(Phase::CriticReview), Some(3.0));
    assert_eq!(log.count(Phase::CriticReview), 2);
}

#[yare::parameterized(
    word      = { "critic_review_x",  Occurrence::Named("x".to_string()) },
    empty     = { "critic_review_",   Occurrence::Named(String::new()) },
    negative  = { "critic_review_-1", Occurrence::Named("-1".to_string()) },
    numbered  = { "critic_review_7",  Occurrence::Numbered(7) },
)]
fn composite_suffix_sets_occurrence(key: &str, expected: Occurrence) {
    let mut map = IndexMap::new();
    map.insert(key.to_string(), json!(1.0));
    let log = TimingLog::from_raw(&map);

    assert_eq!(log.entries().len(), 1);
    assert_eq!(log.entries()[0].occurrence, expected);
    assert_eq!(log.entries()[0].key(), key);
    assert_eq!(log.duration(Phase::CriticReview), Some(1.0));
}

#[test]
fn absent_phase_has_no_duration() {
    let log = TimingLog::from_raw(&IndexMap::new());
    for phase in Phase::ALL {
        assert_eq!(log.duration(phase), None);
        assert_eq!(log.count(phase), 0);
    }
}

#[test]
fn entries_follow_canonical_order_not_map_order() {
    let log = TimingLog::from_raw(&raw(json!({
        "critic_review_2": 1.0,
        "evaluation": 1.0,
        "critic_review_1": 1.0,
        "data_profiling": 1.0,
        "critic_review": 1.0,
        "critic_review_final": 1.0,
    })));

    let keys: Vec<String> = log.entries().iter().map(TimingEntry::key).collect();
    assert_eq!(
        keys,
        vec![
            "data_profiling",
            "evaluation",
            "critic_review",
            "critic_review_1",
            "critic_review_2",
            "critic_review_final",
        ]
    );
}
