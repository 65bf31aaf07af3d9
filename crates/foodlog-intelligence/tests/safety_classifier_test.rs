// ABOUTME: Tests for the negation-aware safety narrative classifier
// ABOUTME: Covers precedence, negation lookback, ambiguous defaults, and case handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use foodlog_intelligence::safety::{
    classify_allergen_alert, classify_interaction, classify_recall, is_phrase_negated,
    AlertDomain, ClassificationOutcome, LOOKBACK_CHARS,
};

#[test]
fn test_recall_negative_indicator() {
    assert!(!classify_recall("No active recalls found for romaine lettuce."));
}

#[test]
fn test_recall_voluntary_recall_detected() {
    assert!(classify_recall(
        "A voluntary recall was issued on January 10, 2026."
    ));
}

#[test]
fn test_interaction_may_interact_detected() {
    assert!(classify_interaction("Grapefruit may interact with statins."));
}

#[test]
fn test_interaction_no_evidence_is_negative() {
    assert!(!classify_interaction(
        "No evidence of interaction between spinach and aspirin."
    ));
}

#[test]
fn test_allergen_undeclared_detected() {
    assert!(classify_allergen_alert(
        "WARNING: Undeclared peanuts in chocolate bar."
    ));
}

#[test]
fn test_allergen_negative_wins_over_positive() {
    let text = "Product is properly labeled. Cross-contamination risk exists.";
    assert!(!classify_allergen_alert(text));
    assert_eq!(
        AlertDomain::Allergen.evaluate(text),
        ClassificationOutcome::NegativeIndicator("properly labeled")
    );
}

#[test]
fn test_recall_negative_wins_over_positive() {
    let text = "No active recalls. A voluntary recall was issued in 2019.";
    assert!(!classify_recall(text));
    assert_eq!(
        AlertDomain::Recall.evaluate(text),
        ClassificationOutcome::NegativeIndicator("no active recall")
    );
}

#[test]
fn test_interaction_negative_wins_over_positive() {
    let text = "No known interaction with warfarin, though grapefruit may interact with statins.";
    assert!(!classify_interaction(text));
    assert_eq!(
        AlertDomain::Interaction.evaluate(text),
        ClassificationOutcome::NegativeIndicator("no known interaction")
    );
}

#[test]
fn test_interaction_positive_without_root_needs_a_trigger() {
    assert!(!classify_interaction(
        "Combining grapefruit with simvastatin is contraindicated."
    ));
    assert!(classify_interaction(
        "Grapefruit affects simvastatin metabolism, so combining them is contraindicated."
    ));
}

#[test]
fn test_negated_positive_returns_false() {
    let text = "spinach does not inhibit the absorption of this medication.";
    assert!(!classify_interaction(text));
    assert_eq!(
        AlertDomain::Interaction.evaluate(text),
        ClassificationOutcome::AllPositivesNegated
    );
}

#[test]
fn test_negated_recall_positive_returns_false() {
    let text = "This brand was not expected to be under recall this season.";
    assert_eq!(
        AlertDomain::Recall.evaluate(text),
        ClassificationOutcome::AllPositivesNegated
    );
    assert!(!classify_recall(text));
}

#[test]
fn test_one_unnegated_occurrence_is_enough() {
    let text = "Kale is unlikely to interfere with warfarin, but vitamin K sources can interfere with it in large amounts.";
    assert!(classify_interaction(text));
}

#[test]
fn test_topic_absent_is_false_for_every_domain() {
    let text = "Fresh strawberries are in season.";
    for domain in AlertDomain::ALL {
        assert_eq!(domain.evaluate(text), ClassificationOutcome::TopicAbsent);
        assert!(!domain.classify(text));
    }
}

#[test]
fn test_empty_text_is_false() {
    assert!(!classify_recall(""));
    assert!(!classify_interaction(""));
    assert!(!classify_allergen_alert(""));
}

#[test]
fn test_ambiguous_mention_uses_domain_default() {
    let recall = "We searched the FDA recall database for this product.";
    assert_eq!(
        AlertDomain::Recall.evaluate(recall),
        ClassificationOutcome::Ambiguous
    );
    assert!(classify_recall(recall));

    let interaction = "Interactions between tea and iron supplements are a common question.";
    assert_eq!(
        AlertDomain::Interaction.evaluate(interaction),
        ClassificationOutcome::Ambiguous
    );
    assert!(!classify_interaction(interaction));

    let allergen = "People with allergies should always read the label.";
    assert_eq!(
        AlertDomain::Allergen.evaluate(allergen),
        ClassificationOutcome::Ambiguous
    );
    assert!(classify_allergen_alert(allergen));
}

#[test]
fn test_case_insensitive() {
    let samples = [
        "A voluntary recall was issued on January 10, 2026.",
        "No evidence of interaction between spinach and aspirin.",
        "WARNING: Undeclared peanuts in chocolate bar.",
    ];
    for sample in samples {
        for domain in AlertDomain::ALL {
            let expected = domain.classify(sample);
            assert_eq!(domain.classify(&sample.to_uppercase()), expected);
            assert_eq!(domain.classify(&sample.to_lowercase()), expected);
        }
    }
}

#[test]
fn test_classification_is_idempotent() {
    let text = "Grapefruit may interact with statins.";
    let first = classify_interaction(text);
    for _ in 0..10 {
        assert_eq!(classify_interaction(text), first);
    }
}

#[test]
fn test_is_phrase_negated_within_window() {
    let text = "this does not inhibit absorption";
    let offset = text.find("inhibit").unwrap();
    assert!(is_phrase_negated(text, "inhibit", offset));
}

#[test]
fn test_is_phrase_negated_outside_window() {
    let filler = "x".repeat(LOOKBACK_CHARS);
    let text = format!("does not {filler}inhibit");
    let offset = text.find("inhibit").unwrap();
    assert!(!is_phrase_negated(&text, "inhibit", offset));
}

#[test]
fn test_is_phrase_negated_at_offset_zero() {
    assert!(!is_phrase_negated("inhibit does not", "inhibit", 0));
}

#[test]
fn test_is_phrase_negated_counts_characters() {
    // 36 characters but 66 bytes: the window is measured in characters
    let padding = "é".repeat(30);
    let text = format!("won't{padding} inhibit");
    let offset = text.find("inhibit").unwrap();
    assert!(is_phrase_negated(&text, "inhibit", offset));
}

#[test]
fn test_is_phrase_negated_offset_past_end() {
    assert!(is_phrase_negated("cannot", "inhibit", 1_000));
}
