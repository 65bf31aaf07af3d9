// ABOUTME: Negation-aware phrase classifier for food recall, drug interaction, and allergen narratives
// ABOUTME: Decides whether an LLM safety narrative describes an active alert
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

//! # Safety Narrative Classifier
//!
//! The safety tools ask the LLM for a structured boolean (`has_active_recall`,
//! `has_interaction`, `has_alert`) next to a free-text narrative. When the
//! boolean is missing, the narrative is classified here.
//!
//! One algorithm serves all three [`AlertDomain`]s; only the phrase tables
//! differ:
//!
//! 1. Lowercase the narrative.
//! 2. No trigger root present: not about this domain, `false`.
//! 3. Any negative indicator: `false`. Negative indicators win over positive
//!    ones anywhere in the same text.
//! 4. Each positive indicator occurrence is checked with
//!    [`is_phrase_negated`]; the first un-negated occurrence yields `true`.
//! 5. Positive phrases that matched but were all negated yield `false`.
//! 6. Topic mentioned with no phrase match at all falls back to the domain's
//!    ambiguous default (`true` for recalls and allergens, `false` for
//!    interactions).
//!
//! Classification is pure and reads only static tables, so it is safe to call
//! from any number of tasks concurrently.

mod negation;
mod phrases;

pub use negation::{is_phrase_negated, LOOKBACK_CHARS};
pub use phrases::{
    PhraseTable, ALLERGEN_PHRASES, INTERACTION_PHRASES, NEGATION_MARKERS, RECALL_PHRASES,
};

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Safety domain whose narrative is being classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertDomain {
    /// Food recalls
    Recall,
    /// Drug-food interactions
    Interaction,
    /// Allergen alerts
    Allergen,
}

impl AlertDomain {
    /// All domains, in tool order
    pub const ALL: [Self; 3] = [Self::Recall, Self::Interaction, Self::Allergen];

    /// Phrase vocabulary for this domain
    #[must_use]
    pub fn phrase_table(self) -> &'static PhraseTable {
        match self {
            Self::Recall => &RECALL_PHRASES,
            Self::Interaction => &INTERACTION_PHRASES,
            Self::Allergen => &ALLERGEN_PHRASES,
        }
    }

    /// Stable identifier used in logs and persisted reports
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recall => "recall",
            Self::Interaction => "interaction",
            Self::Allergen => "allergen",
        }
    }

    /// Run the classifier and report which rule decided
    #[must_use]
    pub fn evaluate(self, text: &str) -> ClassificationOutcome {
        let table = self.phrase_table();
        let lowered = text.to_lowercase();

        if !table.triggers.iter().any(|root| lowered.contains(root)) {
            debug!(
                domain = self.as_str(),
                "No topic trigger in narrative, defaulting to false"
            );
            return ClassificationOutcome::TopicAbsent;
        }

        if let Some(phrase) = table
            .negative_indicators
            .iter()
            .find(|phrase| lowered.contains(*phrase))
        {
            return ClassificationOutcome::NegativeIndicator(*phrase);
        }

        let mut saw_negated = false;
        for phrase in table.positive_indicators {
            for (offset, _) in lowered.match_indices(phrase) {
                if is_phrase_negated(&lowered, phrase, offset) {
                    saw_negated = true;
                } else {
                    return ClassificationOutcome::PositiveIndicator(*phrase);
                }
            }
        }

        if saw_negated {
            debug!(
                domain = self.as_str(),
                "Every positive phrase was negated, defaulting to false"
            );
            return ClassificationOutcome::AllPositivesNegated;
        }

        debug!(
            domain = self.as_str(),
            default = table.ambiguous_default,
            "Topic mentioned without matching phrases, defaulted to {}",
            table.ambiguous_default
        );
        ClassificationOutcome::Ambiguous
    }

    /// Classify a narrative as describing an active alert or not
    #[must_use]
    pub fn classify(self, text: &str) -> bool {
        self.evaluate(text).is_active(self)
    }
}

impl fmt::Display for AlertDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which rule produced a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationOutcome {
    /// No trigger root for the domain appears in the text
    TopicAbsent,
    /// A negative indicator matched (carries the phrase)
    NegativeIndicator(&'static str),
    /// An un-negated positive indicator matched (carries the phrase)
    PositiveIndicator(&'static str),
    /// Positive indicators matched, but every occurrence was negated
    AllPositivesNegated,
    /// Topic mentioned, nothing matched
    Ambiguous,
}

impl ClassificationOutcome {
    /// Resolve the outcome to the alert flag for `domain`
    #[must_use]
    pub fn is_active(self, domain: AlertDomain) -> bool {
        match self {
            Self::PositiveIndicator(_) => true,
            Self::Ambiguous => domain.phrase_table().ambiguous_default,
            Self::TopicAbsent | Self::NegativeIndicator(_) | Self::AllPositivesNegated => false,
        }
    }
}

/// Does the narrative describe an active food recall?
#[must_use]
pub fn classify_recall(text: &str) -> bool {
    AlertDomain::Recall.classify(text)
}

/// Does the narrative describe a drug-food interaction?
#[must_use]
pub fn classify_interaction(text: &str) -> bool {
    AlertDomain::Interaction.classify(text)
}

/// Does the narrative describe an active allergen alert?
#[must_use]
pub fn classify_allergen_alert(text: &str) -> bool {
    AlertDomain::Allergen.classify(text)
}
