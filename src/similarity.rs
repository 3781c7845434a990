//! Fuzzy comparison of Roman spellings
//!
//! Learners type informal Romanizations ("bhai", "bhaai", "Bhai!"), so answers
//! are compared with a sequence-matching ratio instead of string equality.
//!
//! The ratio is the classic Ratcliff/Obershelp measure used by difflib:
//! `2 * M / (len(a) + len(b))` where `M` is the total length of the matching
//! blocks found by repeatedly taking the longest common substring. That
//! search breaks ties by position in the first argument, so the raw ratio is
//! not symmetric ("tide" vs "diet" gives 0.25 one way and 0.5 the other).
//! [`similarity`] takes the larger of both directions, which makes it
//! symmetric by construction.

use crate::config::Config;
use crate::translit::Transliterator;
use crate::{Language, Result};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Score an answer must reach to be accepted by default
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// Anything that is not a letter or a number, combining marks included
static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("Failed to compile normalization regex"));

/// Lowercase and drop everything that is not a letter or a number
pub fn normalize(s: &str) -> String {
    NON_ALPHANUMERIC.replace_all(&s.to_lowercase(), "").into_owned()
}

/// Directional difflib-style ratio of the normalized strings
///
/// Two empty strings score 1.0.
pub fn matching_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = normalize(a).chars().collect();
    let b: Vec<char> = normalize(b).chars().collect();
    ratio(&a, &b)
}

/// Symmetric similarity in [0.0, 1.0]
pub fn similarity(candidate: &str, reference: &str) -> f64 {
    let a: Vec<char> = normalize(candidate).chars().collect();
    let b: Vec<char> = normalize(reference).chars().collect();
    ratio(&a, &b).max(ratio(&b, &a))
}

fn ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matched_len(a, b) as f64 / total as f64
}

/// Total size of the matching blocks of `a` against `b`
fn matched_len(a: &[char], b: &[char]) -> usize {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &ch) in b.iter().enumerate() {
        b2j.entry(ch).or_default().push(j);
    }

    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }
    matched
}

/// Longest common substring of `a[alo..ahi]` and `b[blo..bhi]`
///
/// Returns `(i, j, size)`; among equally long matches the one starting
/// earliest in `a`, then earliest in `b`, wins.
fn longest_match(
    a: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    // j2len[j] = length of the match ending at a[i - 1], b[j]
    let mut j2len: HashMap<usize, usize> = HashMap::new();

    for (i, ch) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut new_j2len = HashMap::new();
        if let Some(positions) = b2j.get(ch) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = j
                    .checked_sub(1)
                    .and_then(|prev| j2len.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                new_j2len.insert(j, k);
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            }
        }
        j2len = new_j2len;
    }

    (best_i, best_j, best_size)
}

/// Accept/reject learner answers against a canonical answer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnswerMatcher {
    threshold: f64,
}

impl Default for AnswerMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl AnswerMatcher {
    /// Threshold is clamped to [0.0, 1.0]; NaN and infinities use the default
    pub fn new(threshold: f64) -> Self {
        let threshold = if threshold.is_finite() {
            threshold.clamp(0.0, 1.0)
        } else {
            warn!(
                "Invalid similarity threshold {}, using {}",
                threshold, DEFAULT_THRESHOLD
            );
            DEFAULT_THRESHOLD
        };
        Self { threshold }
    }

    /// Threshold from the `[similarity]` config section
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.similarity_threshold())
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Does the typed answer match the Roman reference closely enough?
    pub fn is_match(&self, candidate: &str, reference: &str) -> bool {
        similarity(candidate, reference) >= self.threshold
    }

    /// Score a Roman answer against the native-script canonical answer
    ///
    /// The canonical answer is transliterated first, so "paani" can be
    /// checked against "पानी" directly.
    pub fn score_against_native(
        &self,
        candidate: &str,
        native_answer: &str,
        language: Language,
    ) -> Result<f64> {
        let reference = Transliterator::new().transliterate(native_answer, language)?;
        let score = similarity(candidate, &reference);
        debug!(
            "Answer {:?} vs {:?} ({}) scored {:.3}",
            candidate, reference, language, score
        );
        Ok(score)
    }

    /// Accept or reject a Roman answer against the native-script answer
    pub fn accepts_native(
        &self,
        candidate: &str,
        native_answer: &str,
        language: Language,
    ) -> Result<bool> {
        Ok(self.score_against_native(candidate, native_answer, language)? >= self.threshold)
    }
}
