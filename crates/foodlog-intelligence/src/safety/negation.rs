// ABOUTME: Negation lookback for positive safety phrases ("does not inhibit", "unlikely to interfere")
// ABOUTME: Inspects a fixed character window before a phrase occurrence for negation markers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

use tracing::trace;

use super::phrases::NEGATION_MARKERS;

/// Number of characters inspected before a phrase occurrence
pub const LOOKBACK_CHARS: usize = 40;

/// Check whether the occurrence of `phrase` at byte offset `match_offset` in
/// `text` is negated.
///
/// The window is the `LOOKBACK_CHARS` characters immediately preceding the
/// occurrence. `text` is expected to be lowercased already. A marker that
/// starts further back than the window is not seen, and an occurrence at
/// offset 0 is never negated.
///
/// Offsets past the end of `text` or inside a multi-byte character are moved
/// down to the nearest character boundary.
#[must_use]
pub fn is_phrase_negated(text: &str, phrase: &str, match_offset: usize) -> bool {
    let end = floor_char_boundary(text, match_offset);
    let head = &text[..end];

    let start = head
        .char_indices()
        .rev()
        .nth(LOOKBACK_CHARS - 1)
        .map_or(0, |(index, _)| index);
    let window = &head[start..];

    let negated = NEGATION_MARKERS
        .iter()
        .find(|marker| window.contains(*marker));

    if let Some(marker) = negated {
        trace!(phrase, marker, window, "Positive phrase negated by lookback");
        return true;
    }
    false
}

fn floor_char_boundary(text: &str, offset: usize) -> usize {
    let mut index = offset.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
