//! Lexing and syllable composition
//!
//! Text is lexed left to right with longest-match table lookup. Whatever the
//! table cannot cover is either copied verbatim (whitespace, ASCII) or handed
//! to the fallback policy one grapheme cluster at a time. The lexemes are then
//! composed into syllables: consonants take the inherent vowel unless a vowel
//! sign or virama follows, and word endings get the colloquial spelling rules
//! of the table.

use super::segment::cluster_ends;
use super::table::{FallbackPolicy, Mapping, ScriptTable, Unit};
use crate::language::Script;
use log::warn;

#[derive(Debug)]
enum Lexeme<'t> {
    Mapped(&'t Mapping),
    /// Whitespace and ASCII, copied unchanged
    Verbatim(char),
    /// Grapheme cluster (or its remainder) with no table entry
    Unmapped(String),
}

/// Per-word composition state
#[derive(Debug, Default)]
struct Word {
    syllables: usize,
    /// Output offset of an inherent vowel that may be dropped at word end
    trailing_schwa: Option<usize>,
    /// Output offset of a long "ee" that may be shortened at word end
    trailing_ee: Option<usize>,
    after_virama: bool,
    geminate: bool,
}

const LONG_EE: &str = "ee";

/// Transliterate `text` with `table`, never failing on unmapped characters
pub(crate) fn render(text: &str, table: &ScriptTable, fallback: &FallbackPolicy) -> String {
    let lexemes = lex(text, table);
    let mut out = String::with_capacity(text.len());
    let mut word = Word::default();

    for (idx, lexeme) in lexemes.iter().enumerate() {
        let next = match lexemes.get(idx + 1) {
            Some(Lexeme::Mapped(mapping)) => Some(*mapping),
            _ => None,
        };

        match lexeme {
            Lexeme::Mapped(mapping) => compose(&mut out, &mut word, mapping, next, table),
            Lexeme::Verbatim(ch) => {
                finish_word(&mut out, &mut word, table);
                out.push(*ch);
            }
            Lexeme::Unmapped(cluster) => {
                finish_word(&mut out, &mut word, table);
                match fallback {
                    FallbackPolicy::PassThrough => out.push_str(cluster),
                    FallbackPolicy::Placeholder(marker) => out.push_str(marker),
                }
            }
        }
    }
    finish_word(&mut out, &mut word, table);

    // Text made only of silent signs (a lone virama, joiners, addak)
    if out.is_empty() && !text.is_empty() {
        warn!(
            "{} text {:?} has no audible rendering ({})",
            table.name(),
            text,
            code_points(text)
        );
        return match fallback {
            FallbackPolicy::Placeholder(marker) if !marker.is_empty() => marker.clone(),
            _ => text.to_string(),
        };
    }

    out
}

fn lex<'t>(text: &str, table: &'t ScriptTable) -> Vec<Lexeme<'t>> {
    let chars: Vec<char> = text.chars().collect();
    let ends = cluster_ends(text);
    let mut lexemes = Vec::with_capacity(chars.len());
    let mut pos = 0;

    while pos < chars.len() {
        if let Some((len, mapping)) = table.longest_match(&chars[pos..]) {
            lexemes.push(Lexeme::Mapped(mapping));
            pos += len;
            continue;
        }

        let ch = chars[pos];
        if ch.is_whitespace() || ch.is_ascii() {
            lexemes.push(Lexeme::Verbatim(ch));
            pos += 1;
            continue;
        }

        let end = ends.get(pos).copied().unwrap_or(pos + 1).max(pos + 1);
        let cluster: String = chars[pos..end].iter().collect();
        let origin = match Script::of(ch) {
            Some(script) => format!("{:?} script", script),
            None => "no Indic script".to_string(),
        };
        warn!(
            "Unmapped character in {} text: {:?} ({}, {})",
            table.name(),
            cluster,
            code_points(&cluster),
            origin
        );
        lexemes.push(Lexeme::Unmapped(cluster));
        pos = end;
    }

    lexemes
}

fn compose(
    out: &mut String,
    word: &mut Word,
    mapping: &Mapping,
    next: Option<&Mapping>,
    table: &ScriptTable,
) {
    match mapping.unit {
        Unit::Consonant => {
            if word.geminate {
                if let Some(first) = mapping.roman.chars().next() {
                    out.push(first);
                }
            }
            out.push_str(&mapping.roman);

            let vowel_follows = matches!(
                next.map(|m| m.unit),
                Some(Unit::VowelSign) | Some(Unit::Virama)
            );
            if vowel_follows {
                word.trailing_schwa = None;
            } else {
                // A conjunct ending in a semivowel keeps its vowel: mitra, satya
                let keeps_vowel = word.after_virama
                    && mapping
                        .roman
                        .chars()
                        .next()
                        .is_some_and(|c| matches!(c, 'y' | 'r' | 'l' | 'v'));
                word.trailing_schwa = (!keeps_vowel).then_some(out.len());
                out.push_str(table.inherent_vowel());
                word.syllables += 1;
            }
            word.trailing_ee = None;
            word.after_virama = false;
            word.geminate = false;
        }
        Unit::Vowel | Unit::VowelSign => {
            word.trailing_ee = (mapping.roman == LONG_EE).then_some(out.len());
            out.push_str(&mapping.roman);
            word.syllables += 1;
            word.trailing_schwa = None;
            word.after_virama = false;
        }
        Unit::Virama => {
            word.after_virama = true;
            word.trailing_schwa = None;
        }
        Unit::Nasal => {
            let before_labial = next
                .filter(|m| m.unit == Unit::Consonant)
                .and_then(|m| m.roman.chars().next())
                .is_some_and(|c| matches!(c, 'p' | 'b' | 'm'));
            out.push_str(if before_labial { "m" } else { &mapping.roman });
            word.trailing_schwa = None;
            word.trailing_ee = None;
        }
        Unit::Gemination => word.geminate = true,
        Unit::Modifier => {
            // Joiners map to nothing and must not disturb the word state
            if !mapping.roman.is_empty() {
                out.push_str(&mapping.roman);
                word.trailing_schwa = None;
                word.trailing_ee = None;
            }
        }
        Unit::Syllable => {
            out.push_str(&mapping.roman);
            word.syllables += 1;
            word.trailing_schwa = None;
            word.trailing_ee = None;
            word.after_virama = false;
        }
        Unit::Symbol => {
            finish_word(out, word, table);
            out.push_str(&mapping.roman);
        }
    }
}

/// Apply word-final spelling rules and reset the word state
fn finish_word(out: &mut String, word: &mut Word, table: &ScriptTable) {
    if table.drops_final_schwa() && word.syllables > 1 {
        if let Some(pos) = word.trailing_schwa {
            out.truncate(pos);
        }
    }
    if table.shortens_final_ee() {
        if let Some(pos) = word.trailing_ee {
            out.replace_range(pos..pos + LONG_EE.len(), "i");
        }
    }
    *word = Word::default();
}

fn code_points(s: &str) -> String {
    s.chars()
        .map(|c| format!("U+{:04X}", c as u32))
        .collect::<Vec<_>>()
        .join(" ")
}
