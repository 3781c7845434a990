//! Grapheme cluster segmentation
//!
//! Tables are keyed by what a reader perceives as one character, so combining
//! marks must stay with their base. Extended grapheme clusters give exactly
//! that grouping.

use unicode_segmentation::UnicodeSegmentation;

/// For every code point of `text`, the code point index where its cluster ends
///
/// `ends[i]` is one past the last code point of the cluster containing `i`.
pub fn cluster_ends(text: &str) -> Vec<usize> {
    let mut ends = Vec::with_capacity(text.len());
    let mut pos = 0;

    for grapheme in text.graphemes(true) {
        let count = grapheme.chars().count();
        pos += count;
        ends.extend(std::iter::repeat(pos).take(count));
    }

    ends
}
