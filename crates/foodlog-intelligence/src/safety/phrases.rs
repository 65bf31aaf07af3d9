// ABOUTME: Phrase vocabularies for the recall, drug-food interaction, and allergen alert domains
// ABOUTME: Trigger roots, negative indicators, positive indicators, and shared negation markers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

//! Phrase tables consulted by the safety classifier.
//!
//! All phrases are lowercase and matched as plain substrings of the lowercased
//! narrative. Order matters only for logging: the first matching phrase is the
//! one reported.

/// Phrases that, found shortly before a positive indicator, neutralize it
pub const NEGATION_MARKERS: &[&str] = &[
    "does not",
    "doesn't",
    "will not",
    "won't",
    "cannot",
    "can't",
    "no evidence",
    "no proof",
    "unlikely to",
    "not expected to",
    "not known to",
];

/// Vocabulary for one alert domain
#[derive(Debug)]
pub struct PhraseTable {
    /// Topic roots; none present means the narrative is not about this domain
    pub triggers: &'static [&'static str],
    /// Authoritative "no alert" phrases
    pub negative_indicators: &'static [&'static str],
    /// "Alert present" phrases, subject to negation lookback. They are only
    /// consulted once a trigger root matched, so a phrase without a root
    /// counts only alongside one.
    pub positive_indicators: &'static [&'static str],
    /// Result when the topic is mentioned but no phrase matched
    pub ambiguous_default: bool,
}

/// Food recall vocabulary
pub static RECALL_PHRASES: PhraseTable = PhraseTable {
    triggers: &["recall"],
    negative_indicators: &[
        "no active recall",
        "no current recall",
        "no recent recall",
        "no known recall",
        "no outstanding recall",
        "no recalls",
        "no recall has",
        "no recall was",
        "not been recalled",
        "not currently recalled",
        "not subject to a recall",
        "not subject to any recall",
        "not under recall",
        "not part of any recall",
    ],
    positive_indicators: &[
        "has been recalled",
        "have been recalled",
        "was recalled",
        "were recalled",
        "is being recalled",
        "are being recalled",
        "recall was issued",
        "recall has been issued",
        "issued a recall",
        "announced a recall",
        "voluntary recall",
        "voluntarily recalled",
        "active recall",
        "recalled due to",
        "recalled because",
        "class i recall",
        "class ii recall",
        "under recall",
        "currently recalled",
        "recall notice",
    ],
    ambiguous_default: true,
};

/// Drug-food interaction vocabulary.
///
/// `reduce the effectiveness`, `increase the risk`, `increase blood levels`,
/// `contraindicated` and `avoid combining` contain no trigger root, so they
/// only decide narratives where a root also appears.
pub static INTERACTION_PHRASES: PhraseTable = PhraseTable {
    triggers: &["interact", "inhibit", "potentiate", "affect", "interfere"],
    negative_indicators: &[
        "no known interaction",
        "no significant interaction",
        "no clinically significant",
        "no documented interaction",
        "no reported interaction",
        "no interaction",
        "no evidence of interaction",
        "no evidence of an interaction",
        "not known to interact",
        "does not interact",
        "doesn't interact",
        "safe to take together",
        "safe to consume together",
    ],
    positive_indicators: &[
        "may interact",
        "can interact",
        "could interact",
        "might interact",
        "interacts with",
        "known to interact",
        "significant interaction",
        "interaction with",
        "inhibit",
        "potentiate",
        "interfere",
        "affect the absorption",
        "affects the absorption",
        "reduce the effectiveness",
        "reduces the effectiveness",
        "decrease the effectiveness",
        "increase the effect",
        "increases the effect",
        "increase the risk",
        "increases the risk",
        "increase blood levels",
        "increases blood levels",
        "contraindicated",
        "avoid combining",
    ],
    ambiguous_default: false,
};

/// Allergen alert vocabulary
pub static ALLERGEN_PHRASES: PhraseTable = PhraseTable {
    triggers: &["allerg", "undeclared", "recall", "cross-contamina"],
    negative_indicators: &[
        "properly labeled",
        "properly labelled",
        "correctly labeled",
        "correctly labelled",
        "accurately labeled",
        "no allergen alert",
        "no allergy alert",
        "no active allergen",
        "no known allergen",
        "no undeclared",
        "free from undeclared",
        "no allergen recall",
        "no allergen-related recall",
        "no active recall",
        "no recalls",
        "no cross-contamination",
        "no risk of cross-contamination",
    ],
    positive_indicators: &[
        "undeclared",
        "allergen alert",
        "allergy alert",
        "mislabeled",
        "mislabelled",
        "not declared on the label",
        "has been recalled",
        "was recalled",
        "recalled due to",
        "recalled because",
        "cross-contact",
        "cross-contamination",
    ],
    ambiguous_default: true,
};
