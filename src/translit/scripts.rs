//! Built-in mapping tables for every supported language
//!
//! The Brahmic Unicode blocks share one layout, so the bulk of each table is
//! generated from a single inventory keyed by block offset. Script extras add
//! letters and decomposed vowel signs that only exist in one block; language
//! overrides adjust the Roman spelling where pronunciation differs.
//!
//! Tables are built once, on first use, and are read-only afterwards.

use super::table::{ScriptTable, Unit};
use crate::language::{Language, Script};
use once_cell::sync::Lazy;
use std::collections::HashMap;

const NUKTA: u32 = 0x3C;
const VIRAMA: u32 = 0x4D;

/// Independent vowels (block offset, roman)
const VOWELS: &[(u32, &str)] = &[
    (0x05, "a"),
    (0x06, "aa"),
    (0x07, "i"),
    (0x08, "ee"),
    (0x09, "u"),
    (0x0A, "oo"),
    (0x0B, "ri"),
    (0x0C, "lri"),
    (0x0D, "e"),
    (0x0E, "e"),
    (0x0F, "e"),
    (0x10, "ai"),
    (0x11, "o"),
    (0x12, "o"),
    (0x13, "o"),
    (0x14, "au"),
    (0x60, "ri"),
    (0x61, "lri"),
];

/// Consonants (block offset, root without inherent vowel)
const CONSONANTS: &[(u32, &str)] = &[
    (0x15, "k"),
    (0x16, "kh"),
    (0x17, "g"),
    (0x18, "gh"),
    (0x19, "ng"),
    (0x1A, "ch"),
    (0x1B, "chh"),
    (0x1C, "j"),
    (0x1D, "jh"),
    (0x1E, "ny"),
    (0x1F, "t"),
    (0x20, "th"),
    (0x21, "d"),
    (0x22, "dh"),
    (0x23, "n"),
    (0x24, "t"),
    (0x25, "th"),
    (0x26, "d"),
    (0x27, "dh"),
    (0x28, "n"),
    (0x29, "n"),
    (0x2A, "p"),
    (0x2B, "ph"),
    (0x2C, "b"),
    (0x2D, "bh"),
    (0x2E, "m"),
    (0x2F, "y"),
    (0x30, "r"),
    (0x31, "r"),
    (0x32, "l"),
    (0x33, "l"),
    (0x34, "zh"),
    (0x35, "v"),
    (0x36, "sh"),
    (0x37, "sh"),
    (0x38, "s"),
    (0x39, "h"),
];

/// Consonant + nukta readings that differ from the plain consonant
const NUKTA_FORMS: &[(u32, &str)] = &[
    (0x15, "q"),
    (0x16, "kh"),
    (0x17, "gh"),
    (0x1C, "z"),
    (0x21, "r"),
    (0x22, "rh"),
    (0x2B, "f"),
    (0x2F, "y"),
];

/// Dependent vowel signs (block offset, roman)
const VOWEL_SIGNS: &[(u32, &str)] = &[
    (0x3E, "aa"),
    (0x3F, "i"),
    (0x40, "ee"),
    (0x41, "u"),
    (0x42, "oo"),
    (0x43, "ri"),
    (0x44, "ri"),
    (0x45, "e"),
    (0x46, "e"),
    (0x47, "e"),
    (0x48, "ai"),
    (0x49, "o"),
    (0x4A, "o"),
    (0x4B, "o"),
    (0x4C, "au"),
    (0x62, "lri"),
    (0x63, "lri"),
];

/// Entry keyed by a sequence of block offsets
type Extra = (&'static [u32], Unit, &'static str);

const DEVANAGARI_EXTRAS: &[Extra] = &[
    (&[0x50], Unit::Syllable, "om"),
    (&[0x58], Unit::Consonant, "q"),
    (&[0x59], Unit::Consonant, "kh"),
    (&[0x5A], Unit::Consonant, "gh"),
    (&[0x5B], Unit::Consonant, "z"),
    (&[0x5C], Unit::Consonant, "r"),
    (&[0x5D], Unit::Consonant, "rh"),
    (&[0x5E], Unit::Consonant, "f"),
    (&[0x5F], Unit::Consonant, "y"),
    (&[0x72], Unit::Vowel, "e"),
];

const BENGALI_EXTRAS: &[Extra] = &[
    (&[0x4E], Unit::Syllable, "t"),
    (&[0x5C], Unit::Consonant, "r"),
    (&[0x5D], Unit::Consonant, "rh"),
    (&[0x5F], Unit::Consonant, "y"),
    (&[0x70], Unit::Consonant, "r"),
    (&[0x71], Unit::Consonant, "w"),
    (&[0x47, 0x3E], Unit::VowelSign, "o"),
    (&[0x47, 0x57], Unit::VowelSign, "au"),
];

const GURMUKHI_EXTRAS: &[Extra] = &[
    (&[0x59], Unit::Consonant, "kh"),
    (&[0x5A], Unit::Consonant, "gh"),
    (&[0x5B], Unit::Consonant, "z"),
    (&[0x5C], Unit::Consonant, "r"),
    (&[0x5E], Unit::Consonant, "f"),
    (&[0x70], Unit::Nasal, "n"),
    (&[0x71], Unit::Gemination, ""),
    // Vowel carriers ੲ and ੳ only ever appear under a vowel sign
    (&[0x72], Unit::Consonant, ""),
    (&[0x73], Unit::Consonant, ""),
];

const ORIYA_EXTRAS: &[Extra] = &[
    (&[0x5C], Unit::Consonant, "r"),
    (&[0x5D], Unit::Consonant, "rh"),
    (&[0x5F], Unit::Consonant, "y"),
    (&[0x71], Unit::Consonant, "w"),
    (&[0x47, 0x56], Unit::VowelSign, "ai"),
    (&[0x47, 0x3E], Unit::VowelSign, "o"),
    (&[0x47, 0x57], Unit::VowelSign, "au"),
];

const TAMIL_EXTRAS: &[Extra] = &[
    (&[0x46, 0x3E], Unit::VowelSign, "o"),
    (&[0x47, 0x3E], Unit::VowelSign, "o"),
    (&[0x46, 0x57], Unit::VowelSign, "au"),
    // ஸ்ரீ, the honorific
    (&[0x38, VIRAMA, 0x30, 0x40], Unit::Syllable, "sri"),
];

const TELUGU_EXTRAS: &[Extra] = &[
    (&[0x00], Unit::Nasal, "n"),
    (&[0x46, 0x56], Unit::VowelSign, "ai"),
    (&[0x58], Unit::Consonant, "ts"),
    (&[0x59], Unit::Consonant, "dz"),
    (&[0x5A], Unit::Consonant, "rr"),
];

const KANNADA_EXTRAS: &[Extra] = &[
    (&[0x3F, 0x55], Unit::VowelSign, "ee"),
    (&[0x46, 0x55], Unit::VowelSign, "e"),
    (&[0x46, 0x56], Unit::VowelSign, "ai"),
    (&[0x46, 0x42], Unit::VowelSign, "o"),
    (&[0x4A, 0x55], Unit::VowelSign, "o"),
    (&[0x46, 0x42, 0x55], Unit::VowelSign, "o"),
    (&[0x5E], Unit::Consonant, "zh"),
];

const MALAYALAM_EXTRAS: &[Extra] = &[
    (&[0x46, 0x3E], Unit::VowelSign, "o"),
    (&[0x47, 0x3E], Unit::VowelSign, "o"),
    (&[0x46, 0x57], Unit::VowelSign, "au"),
    (&[0x57], Unit::VowelSign, "au"),
    (&[0x4E], Unit::Syllable, "r"),
    // Chillu letters: final consonants with no vowel
    (&[0x7A], Unit::Syllable, "n"),
    (&[0x7B], Unit::Syllable, "n"),
    (&[0x7C], Unit::Syllable, "r"),
    (&[0x7D], Unit::Syllable, "l"),
    (&[0x7E], Unit::Syllable, "l"),
    (&[0x7F], Unit::Syllable, "k"),
];

const MARATHI_OVERRIDES: &[Extra] = &[(&[0x1C, VIRAMA, 0x1E], Unit::Consonant, "dny")];

const BENGALI_OVERRIDES: &[Extra] = &[(&[0x2F], Unit::Consonant, "j")];

const ODIA_OVERRIDES: &[Extra] = &[(&[0x2F], Unit::Consonant, "j")];

const TAMIL_OVERRIDES: &[Extra] = &[
    (&[0x03], Unit::Modifier, "h"),
    (&[0x1A], Unit::Consonant, "ch"),
    (&[0x1E], Unit::Consonant, "nj"),
    (&[0x24], Unit::Consonant, "th"),
];

const MALAYALAM_OVERRIDES: &[Extra] = &[(&[0x02], Unit::Nasal, "m")];

static TABLES: Lazy<HashMap<Language, ScriptTable>> = Lazy::new(|| {
    Language::ALL
        .iter()
        .map(|&language| (language, build_table(language)))
        .collect()
});

/// Built-in table for a language
pub fn table_for(language: Language) -> Option<&'static ScriptTable> {
    TABLES.get(&language)
}

fn is_dravidian(script: Script) -> bool {
    matches!(
        script,
        Script::Tamil | Script::Telugu | Script::Kannada | Script::Malayalam
    )
}

/// Build the key for a sequence of block offsets
fn key(script: Script, offsets: &[u32]) -> String {
    offsets
        .iter()
        .filter_map(|&offset| char::from_u32(script.block_start() + offset))
        .collect()
}

fn script_extras(script: Script) -> &'static [Extra] {
    match script {
        Script::Devanagari => DEVANAGARI_EXTRAS,
        Script::Bengali => BENGALI_EXTRAS,
        Script::Gurmukhi => GURMUKHI_EXTRAS,
        Script::Gujarati => &[],
        Script::Oriya => ORIYA_EXTRAS,
        Script::Tamil => TAMIL_EXTRAS,
        Script::Telugu => TELUGU_EXTRAS,
        Script::Kannada => KANNADA_EXTRAS,
        Script::Malayalam => MALAYALAM_EXTRAS,
    }
}

fn language_overrides(language: Language) -> &'static [Extra] {
    match language {
        Language::Marathi => MARATHI_OVERRIDES,
        Language::Bengali => BENGALI_OVERRIDES,
        Language::Odia => ODIA_OVERRIDES,
        Language::Tamil => TAMIL_OVERRIDES,
        Language::Malayalam => MALAYALAM_OVERRIDES,
        _ => &[],
    }
}

/// Build the table for one language
pub(crate) fn build_table(language: Language) -> ScriptTable {
    let script = language.script();
    let colloquial = !is_dravidian(script) && language != Language::Odia;

    let mut builder = ScriptTable::builder(language.name())
        .drops_final_schwa(colloquial)
        .shortens_final_ee(colloquial);

    builder.insert(&key(script, &[0x01]), Unit::Nasal, "n");
    builder.insert(&key(script, &[0x02]), Unit::Nasal, "n");
    builder.insert(&key(script, &[0x03]), Unit::Modifier, "h");
    builder.insert(&key(script, &[0x3D]), Unit::Modifier, "'");
    builder.insert(&key(script, &[VIRAMA]), Unit::Virama, "");

    for &(offset, roman) in VOWELS {
        builder.insert(&key(script, &[offset]), Unit::Vowel, roman);
    }
    for &(offset, roman) in VOWEL_SIGNS {
        builder.insert(&key(script, &[offset]), Unit::VowelSign, roman);
    }
    for &(offset, roman) in CONSONANTS {
        builder.insert(&key(script, &[offset]), Unit::Consonant, roman);

        // Decomposed nukta forms read like their precomposed letters
        let nukta_roman = NUKTA_FORMS
            .iter()
            .find(|(o, _)| *o == offset)
            .map_or(roman, |(_, r)| *r);
        builder.insert(&key(script, &[offset, NUKTA]), Unit::Consonant, nukta_roman);
    }

    for digit in 0..10u32 {
        if let Some(ascii) = char::from_digit(digit, 10) {
            builder.insert(&key(script, &[0x66 + digit]), Unit::Symbol, &ascii.to_string());
        }
    }

    // Conjuncts whose reading is not the sum of their parts
    builder.insert(&key(script, &[0x15, VIRAMA, 0x37]), Unit::Consonant, "ksh");
    builder.insert(
        &key(script, &[0x1C, VIRAMA, 0x1E]),
        Unit::Consonant,
        if is_dravidian(script) { "jn" } else { "gy" },
    );

    // Danda is shared by most Indic scripts; joiners only shape glyphs
    builder.insert("\u{0964}", Unit::Symbol, ".");
    builder.insert("\u{0965}", Unit::Symbol, ".");
    builder.insert("\u{200C}", Unit::Modifier, "");
    builder.insert("\u{200D}", Unit::Modifier, "");

    for &(offsets, unit, roman) in script_extras(script)
        .iter()
        .chain(language_overrides(language))
    {
        builder.insert(&key(script, offsets), unit, roman);
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_language_has_a_table() {
        for language in Language::ALL {
            let table = table_for(language).unwrap();
            assert_eq!(table.name(), language.name());
            assert!(table.len() > 100, "{} table too small", language);
        }
    }

    #[test]
    fn test_devanagari_entries() {
        let table = table_for(Language::Hindi).unwrap();
        assert_eq!(table.get("क").unwrap().roman, "k");
        assert_eq!(table.get("क्ष").unwrap().roman, "ksh");
        assert_eq!(table.get("ज्ञ").unwrap().roman, "gy");
        assert_eq!(table.get("क़").unwrap().roman, "q");
        assert_eq!(table.get("क\u{093C}").unwrap().roman, "q");
        assert_eq!(table.get("ि").unwrap().unit, Unit::VowelSign);
        assert_eq!(table.get("५").unwrap().roman, "5");
        assert!(table.drops_final_schwa());
    }

    #[test]
    fn test_language_overrides() {
        let marathi = table_for(Language::Marathi).unwrap();
        assert_eq!(marathi.get("ज्ञ").unwrap().roman, "dny");

        let tamil = table_for(Language::Tamil).unwrap();
        assert_eq!(tamil.get("த").unwrap().roman, "th");
        assert_eq!(tamil.get("ழ").unwrap().roman, "zh");
        assert_eq!(tamil.get("\u{0BC6}\u{0BBE}").unwrap().roman, "o");
        assert!(!tamil.drops_final_schwa());
    }

    #[test]
    fn test_scripts_do_not_leak() {
        let gujarati = table_for(Language::Gujarati).unwrap();
        assert!(gujarati.get("क").is_none());
        assert_eq!(gujarati.get("ક").unwrap().roman, "k");
    }
}
