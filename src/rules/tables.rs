//! Static phonetic rule tables.
//!
//! All tables are read-only process-lifetime data. Scoring correctness
//! depends on their content; the integration suite pins the entries that
//! the end-to-end scenarios rely on.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

pub type VariantSet = HashSet<&'static str>;
pub type VariantMap = HashMap<&'static str, VariantSet>;

fn variant_map(entries: &[(&'static str, &[&'static str])]) -> VariantMap {
    entries
        .iter()
        .map(|(key, values)| (*key, values.iter().copied().collect()))
        .collect()
}

/// First characters that mark a token as a vowel.
pub static VOWEL_ONSETS: Lazy<HashSet<char>> = Lazy::new(|| {
    [
        'a', 'e', 'i', 'o', 'u', 'ɪ', 'ʊ', 'ɛ', 'ɔ', 'æ', 'ʌ', 'ə', 'ɑ', 'ɒ', 'ɜ', 'ɝ', 'ɚ',
        'ᵻ', 'ɐ',
    ]
    .into_iter()
    .collect()
});

/// Phonemes whose deletion does not count against a word.
pub static UNIMPORTANT_PHONEMES: Lazy<VariantSet> =
    Lazy::new(|| ["ə", "ɚ", "ᵻ", "ʔ"].into_iter().collect());

/// True UK↔US phoneme-category identities. Lookups try both directions,
/// so each pair is listed once from its more marked member.
pub static CORE_EQUIVALENTS: Lazy<VariantMap> = Lazy::new(|| {
    variant_map(&[
        // GOAT
        ("əʊ", &["oʊ", "o", "ɔʊ", "oː"]),
        // LOT / PALM mergers
        ("ɒ", &["ɑː", "ɑ", "ɔ"]),
        ("ɑː", &["ɑ", "a", "ɒ"]),
        // TRAP notations
        ("æ", &["a"]),
        // STRUT / schwa notations
        ("ɐ", &["ʌ", "ə"]),
        ("ʌ", &["ɐ"]),
        ("ᵻ", &["ɪ", "ə"]),
        // DRESS notations
        ("e", &["ɛ"]),
        ("eə", &["ɛə", "ɛɹ", "eɹ"]),
        // NURSE notations
        ("ɝ", &["ɜː", "ɜ", "ɚ"]),
        ("ɚ", &["ə", "əɹ"]),
        // r-variants
        ("ɹ", &["r", "ɻ", "ɾ"]),
        // flap
        ("ɾ", &["t", "d"]),
        // glottal replacement
        ("ʔ", &["t"]),
        // length pairs
        ("iː", &["i"]),
        ("uː", &["u"]),
        ("ɔː", &["ɔ", "oː", "o"]),
        ("ɜː", &["ɜ"]),
        ("eː", &["e", "eɪ"]),
        // diphthong notations
        ("aɪ", &["ʌɪ", "äɪ"]),
        ("aʊ", &["æʊ", "äʊ"]),
        ("eɪ", &["ɛɪ"]),
        ("ɔɪ", &["oɪ"]),
        // affricate ligatures
        ("tʃ", &["ʧ"]),
        ("dʒ", &["ʤ"]),
        // script vs ascii g
        ("ɡ", &["g"]),
        // dark l, labialized w, velar fricative
        ("ɫ", &["l"]),
        ("ʍ", &["w"]),
        ("x", &["k"]),
        // syllabic consonants
        ("m̩", &["əm"]),
        ("n̩", &["ən"]),
        ("l̩", &["əl"]),
    ])
});

/// Looser cross-variety approximations; consulted only in lenient mode.
pub static GENERAL_EQUIVALENTS: Lazy<VariantMap> = Lazy::new(|| {
    variant_map(&[
        ("iː", &["ɪ", "i"]),
        ("ɪ", &["i", "iː", "e"]),
        ("uː", &["ʊ", "u"]),
        ("ʊ", &["u"]),
        ("ɛ", &["æ", "e", "ɪ"]),
        ("æ", &["ɛ", "ʌ"]),
        ("ʌ", &["ɑ", "ɒ", "ə"]),
        ("ɒ", &["ʌ", "ɔː"]),
        ("ɔː", &["ɒ", "ʌ", "əʊ"]),
        ("ə", &["ʌ", "ɪ", "ʊ"]),
        ("əʊ", &["ɔː", "ʊ"]),
        ("eɪ", &["e", "ɛ", "iː"]),
        ("aɪ", &["a", "ɑː"]),
        ("aʊ", &["æ", "ɑː"]),
        ("ɪə", &["iə", "iːə"]),
        ("ʊə", &["uə", "ɔː"]),
        // dental substitutions common across L2 varieties
        ("ð", &["d", "z", "v"]),
        ("θ", &["t", "s", "f"]),
        ("v", &["w", "b"]),
        ("w", &["v"]),
        ("ŋ", &["n"]),
        ("dʒ", &["ʒ", "z"]),
        ("tʃ", &["ʃ"]),
        ("ʒ", &["ʃ", "z"]),
        ("h", &["x"]),
        // voicing confusions, any position
        ("s", &["z"]),
        ("z", &["s"]),
        ("f", &["v"]),
        ("t", &["d"]),
        ("d", &["t"]),
        ("p", &["b"]),
        ("b", &["p"]),
        ("k", &["ɡ", "g"]),
        ("ɡ", &["k"]),
        ("g", &["k"]),
    ])
});

/// Rhotic vowel clusters: the non-rhotic citation form first, then the
/// r-colored realizations accepted for it.
pub static RHOTIC_PAIRS: Lazy<Vec<(&'static str, VariantSet)>> = Lazy::new(|| {
    let pairs: &[(&'static str, &[&'static str])] = &[
        // NORTH / FORCE
        ("ɔː", &["ɔːɹ", "ɔɹ", "ɔːr", "ɔr", "oːɹ", "oɹ", "ɔ˞"]),
        // START
        ("ɑː", &["ɑːɹ", "ɑɹ", "ɑːr", "ɑr", "aɹ", "ar"]),
        // NURSE
        ("ɜː", &["ɜːɹ", "ɜɹ", "ɜːr", "ɜr", "ɝ", "ɚ"]),
        ("ɜ", &["ɝ", "ɚ", "ɜɹ"]),
        // NEAR
        ("ɪə", &["ɪɹ", "ɪr", "iɹ", "ir", "ɪəɹ", "iːɹ"]),
        // SQUARE
        ("eə", &["eɹ", "er", "ɛɹ", "ɛr", "eəɹ", "ɛəɹ"]),
        // CURE
        ("ʊə", &["ʊɹ", "ʊr", "uɹ", "ur", "ʊəɹ", "ɔːɹ"]),
        // lettER
        ("ə", &["ɚ", "əɹ", "ər"]),
    ];
    pairs
        .iter()
        .map(|(plain, rhotics)| (*plain, rhotics.iter().copied().collect()))
        .collect()
});

/// Unstressed vowel reductions accepted anywhere.
///
/// Directional: the expected (target) vowel maps to the realizations a
/// speaker may substitute. A lax vowel offered where a long tense vowel
/// is expected is a mispronunciation, so `uː`/`u` do not map back to `ʊ`.
pub static REDUCTIONS: Lazy<VariantMap> = Lazy::new(|| {
    variant_map(&[
        ("ə", &["ɪ", "ʌ", "ɐ"]),
        ("ɪ", &["ə", "ᵻ"]),
        ("ɛ", &["ə", "ɪ"]),
        ("ʌ", &["ə", "ɐ"]),
        ("ʊ", &["u", "uː"]),
        ("ᵻ", &["ə", "ɪ"]),
    ])
});

/// Sibilant/fricative/stop/affricate voicing pairs, both directions.
pub static VOICING_PAIRS: Lazy<VariantMap> = Lazy::new(|| {
    variant_map(&[
        ("s", &["z"]),
        ("z", &["s"]),
        ("f", &["v"]),
        ("v", &["f"]),
        ("θ", &["ð"]),
        ("ð", &["θ"]),
        ("ʃ", &["ʒ"]),
        ("ʒ", &["ʃ"]),
        ("t", &["d"]),
        ("d", &["t"]),
        ("p", &["b"]),
        ("b", &["p"]),
        ("k", &["ɡ", "g"]),
        ("ɡ", &["k"]),
        ("g", &["k"]),
        ("tʃ", &["dʒ"]),
        ("dʒ", &["tʃ"]),
    ])
});

/// Voiced obstruents mapped to their voiceless partners; used to tell
/// word-final devoicing apart from the opposite substitution.
pub static VOICED_TO_VOICELESS: Lazy<VariantMap> = Lazy::new(|| {
    variant_map(&[
        ("b", &["p"]),
        ("d", &["t"]),
        ("ɡ", &["k"]),
        ("g", &["k"]),
        ("v", &["f"]),
        ("ð", &["θ"]),
        ("z", &["s"]),
        ("ʒ", &["ʃ"]),
        ("dʒ", &["tʃ"]),
    ])
});

/// Coalescence targets for `d/t/s/z` before a following `j`.
pub static COALESCENCE: Lazy<VariantMap> = Lazy::new(|| {
    variant_map(&[
        ("d", &["dʒ"]),
        ("t", &["tʃ"]),
        ("s", &["ʃ"]),
        ("z", &["ʒ"]),
    ])
});

/// Per-word acceptable substitutions for high-frequency function words.
///
/// Membership in this table also selects lenient scoring for the word;
/// every other word scores in strict mode.
pub static FUNCTION_WORDS: Lazy<HashMap<&'static str, VariantMap>> = Lazy::new(|| {
    let entries: &[(&'static str, &[(&'static str, &[&'static str])])] = &[
        // articles
        ("a", &[("eɪ", &["ə", "ɐ"]), ("æ", &["ə"])]),
        ("an", &[("æ", &["ə", "ɐ", "ɪ"]), ("eɪ", &["ə"])]),
        (
            "the",
            &[
                ("iː", &["ə", "ɪ", "i"]),
                ("i", &["ə", "ɪ"]),
                ("ə", &["ɪ", "i", "iː"]),
            ],
        ),
        // prepositions
        (
            "to",
            &[("uː", &["ə", "ʊ", "u"]), ("u", &["ə", "ʊ"])],
        ),
        (
            "of",
            &[
                ("ɒ", &["ə"]),
                ("ʌ", &["ə"]),
                ("ɑ", &["ə"]),
                ("v", &["f"]),
            ],
        ),
        (
            "for",
            &[
                ("ɔː", &["ə"]),
                ("ɔ", &["ə"]),
                ("ɔːɹ", &["ɚ", "əɹ", "fɚ"]),
                ("ɔɹ", &["ɚ", "əɹ"]),
            ],
        ),
        (
            "from",
            &[("ɒ", &["ə"]), ("ʌ", &["ə"]), ("ɑ", &["ə"])],
        ),
        ("at", &[("æ", &["ə", "ɐ"])]),
        ("in", &[("ɪ", &["ə", "ᵻ"])]),
        ("on", &[("ɒ", &["ə", "ɑ"]), ("ɑ", &["ə"])]),
        (
            "with",
            &[("ɪ", &["ə"]), ("θ", &["ð"]), ("ð", &["θ"])],
        ),
        ("up", &[("ʌ", &["ə"])]),
        ("into", &[("ɪ", &["ə"]), ("uː", &["ə", "ʊ"])]),
        ("onto", &[("uː", &["ə", "ʊ"])]),
        ("upon", &[("ɒ", &["ə", "ɑ"]), ("ɑː", &["ə"])]),
        (
            "before",
            &[("ɪ", &["ə"]), ("ɔːɹ", &["ɚ"]), ("ɔː", &["ə"])],
        ),
        ("between", &[("ɪ", &["ə"])]),
        (
            "because",
            &[
                ("ɪ", &["ə"]),
                ("ɒ", &["ə", "ʌ"]),
                ("ɑː", &["ə", "ʌ"]),
                ("z", &["s"]),
            ],
        ),
        ("until", &[("ə", &["ʌ"])]),
        ("unless", &[("ə", &["ʌ"])]),
        ("without", &[("ɪ", &["ə"]), ("ð", &["θ"])]),
        // conjunctions
        (
            "and",
            &[("æ", &["ə", "ɐ", "ɪ"]), ("a", &["ə"])],
        ),
        (
            "or",
            &[("ɔː", &["ə"]), ("ɔːɹ", &["ɚ", "əɹ"]), ("ɔɹ", &["ɚ"])],
        ),
        ("but", &[("ʌ", &["ə"])]),
        ("as", &[("æ", &["ə"]), ("z", &["s"])]),
        ("than", &[("æ", &["ə"])]),
        ("that", &[("æ", &["ə"])]),
        ("so", &[("əʊ", &["ə"]), ("oʊ", &["ə"])]),
        ("if", &[("ɪ", &["ə"])]),
        ("since", &[("ɪ", &["ə"])]),
        ("once", &[("ʌ", &["ə"])]),
        ("nor", &[("ɔː", &["ə"]), ("ɔːɹ", &["ɚ"])]),
        // auxiliaries
        ("am", &[("æ", &["ə"])]),
        ("is", &[("ɪ", &["ə"]), ("z", &["s"])]),
        (
            "are",
            &[("ɑː", &["ə"]), ("ɑːɹ", &["ɚ", "əɹ"]), ("ɑɹ", &["ɚ"])],
        ),
        (
            "was",
            &[
                ("ɒ", &["ə"]),
                ("ʌ", &["ə"]),
                ("ɑ", &["ə"]),
                ("z", &["s"]),
            ],
        ),
        (
            "were",
            &[("ɜː", &["ə"]), ("ɜːɹ", &["ɚ", "əɹ"]), ("ɝ", &["ɚ"])],
        ),
        ("be", &[("iː", &["ɪ", "i"])]),
        ("been", &[("iː", &["ɪ"]), ("ɪ", &["ə"])]),
        ("have", &[("æ", &["ə"]), ("v", &["f"])]),
        ("has", &[("æ", &["ə"]), ("z", &["s"])]),
        ("had", &[("æ", &["ə"])]),
        ("do", &[("uː", &["ə", "ʊ", "u"])]),
        ("does", &[("ʌ", &["ə"]), ("z", &["s"])]),
        ("did", &[("ɪ", &["ə"])]),
        ("not", &[("ɒ", &["ə", "ɑ"]), ("ɑ", &["ə"])]),
        ("may", &[("eɪ", &["e"])]),
        // modals
        ("can", &[("æ", &["ə", "ɪ"])]),
        ("could", &[("ʊ", &["ə"])]),
        ("should", &[("ʊ", &["ə"])]),
        ("would", &[("ʊ", &["ə"])]),
        ("will", &[("ɪ", &["ə"])]),
        ("shall", &[("æ", &["ə"])]),
        ("must", &[("ʌ", &["ə"])]),
        // pronouns
        ("you", &[("uː", &["ə", "ʊ", "u"])]),
        ("your", &[("ɔː", &["ə"]), ("ɔːɹ", &["ɚ", "jɚ"]), ("ʊə", &["ə"])]),
        ("he", &[("iː", &["ɪ", "i"])]),
        ("him", &[("ɪ", &["ə"])]),
        ("his", &[("ɪ", &["ə"]), ("z", &["s"])]),
        ("she", &[("iː", &["ɪ", "i"])]),
        (
            "her",
            &[("ɜː", &["ə"]), ("ɜːɹ", &["ɚ", "əɹ"]), ("ɝ", &["ɚ"])],
        ),
        ("we", &[("iː", &["ɪ", "i"])]),
        ("us", &[("ʌ", &["ə"])]),
        ("me", &[("iː", &["ɪ", "i"])]),
        ("my", &[("aɪ", &["ə", "ɪ"])]),
        ("i", &[("aɪ", &["ɑ", "a"])]),
        ("it", &[("ɪ", &["ə", "ᵻ"])]),
        ("its", &[("ɪ", &["ə"])]),
        (
            "them",
            &[("ɛ", &["ə"]), ("e", &["ə"]), ("ð", &["d"])],
        ),
        ("they", &[("eɪ", &["e"])]),
        (
            "their",
            &[("eə", &["ə"]), ("ɛɹ", &["ɚ"]), ("eəɹ", &["ɚ"])],
        ),
        ("our", &[("aʊə", &["ɑːɹ", "ɑː", "aʊɹ"]), ("aʊ", &["ɑː"])]),
        ("yours", &[("ɔːɹ", &["ɚ"]), ("ɔː", &["ə"])]),
        ("hers", &[("ɜːɹ", &["ɚ"]), ("ɜː", &["ə"])]),
        ("theirs", &[("eə", &["ə"]), ("ɛɹ", &["ɚ"])]),
        // contractions
        ("it's", &[("ɪ", &["ə"])]),
        ("that's", &[("æ", &["ə"])]),
        ("don't", &[("əʊ", &["oʊ", "ə"]), ("oʊ", &["ə"])]),
        ("can't", &[("ɑː", &["æ", "a"]), ("æ", &["ɑː"])]),
        ("you're", &[("ʊə", &["ɚ", "ə"]), ("ʊɹ", &["ɚ"])]),
        ("i'm", &[("aɪ", &["ɑ", "a"])]),
        ("i'll", &[("aɪ", &["ɑ", "a"])]),
        ("isn't", &[("ɪ", &["ə"])]),
        ("wasn't", &[("ɒ", &["ə"]), ("ʌ", &["ə"])]),
        ("won't", &[("əʊ", &["oʊ"]), ("oʊ", &["əʊ"])]),
        ("didn't", &[("ɪ", &["ə"]), ("ə", &["ɪ"])]),
        ("doesn't", &[("ʌ", &["ə"])]),
        ("haven't", &[("æ", &["ə"])]),
        ("hasn't", &[("æ", &["ə"])]),
        ("aren't", &[("ɑːɹ", &["ɚ"]), ("ɑː", &["ə"])]),
        ("weren't", &[("ɜːɹ", &["ɚ"]), ("ɜː", &["ə"])]),
        ("shouldn't", &[("ʊ", &["ə"])]),
        ("wouldn't", &[("ʊ", &["ə"])]),
        ("couldn't", &[("ʊ", &["ə"])]),
        ("he's", &[("iː", &["ɪ", "i"])]),
        ("she's", &[("iː", &["ɪ", "i"])]),
        ("we're", &[("ɪə", &["ɪɹ", "ə"]), ("ɪɹ", &["ɚ"])]),
        ("they're", &[("eə", &["ɛɹ", "ə"]), ("ɛɹ", &["ɚ"])]),
        ("i've", &[("aɪ", &["ɑ", "a"])]),
        ("we've", &[("iː", &["ɪ", "i"])]),
        ("you've", &[("uː", &["ə", "ʊ"])]),
        ("what's", &[("ɒ", &["ə", "ʌ"]), ("ʌ", &["ə"])]),
        ("who's", &[("uː", &["ʊ", "u"])]),
        ("let's", &[("ɛ", &["ə"]), ("e", &["ə"])]),
        // common adverbs
        ("just", &[("ʌ", &["ə", "ɪ"])]),
        ("there", &[("eə", &["ə"]), ("ɛɹ", &["ɚ"]), ("eəɹ", &["ɚ"])]),
        ("then", &[("ɛ", &["ə"]), ("e", &["ə"])]),
        ("when", &[("ɛ", &["ə"]), ("e", &["ə"])]),
        ("what", &[("ɒ", &["ə", "ʌ"]), ("ʌ", &["ə"]), ("ɑ", &["ə"])]),
        ("who", &[("uː", &["ʊ", "u"])]),
        ("some", &[("ʌ", &["ə"])]),
        ("there's", &[("eə", &["ə"]), ("ɛɹ", &["ɚ"])]),
    ];
    entries
        .iter()
        .map(|(word, pairs)| (*word, variant_map(pairs)))
        .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_equivalents_cover_goat_and_flap() {
        assert!(CORE_EQUIVALENTS["əʊ"].contains("oʊ"));
        assert!(CORE_EQUIVALENTS["ɾ"].contains("t"));
        assert!(CORE_EQUIVALENTS["ɾ"].contains("d"));
    }

    #[test]
    fn reductions_do_not_accept_lax_for_tense() {
        assert!(!REDUCTIONS.contains_key("uː"));
        assert!(REDUCTIONS["ʊ"].contains("uː"));
    }

    #[test]
    fn rhotic_clusters_include_near_and_letter() {
        let near = RHOTIC_PAIRS
            .iter()
            .find(|(plain, _)| *plain == "ɪə")
            .map(|(_, set)| set)
            .unwrap();
        assert!(near.contains("ɪɹ"));
        let letter = RHOTIC_PAIRS
            .iter()
            .find(|(plain, _)| *plain == "ə")
            .map(|(_, set)| set)
            .unwrap();
        assert!(letter.contains("ɚ"));
    }

    #[test]
    fn voicing_pairs_are_symmetric() {
        for (phoneme, partners) in VOICING_PAIRS.iter() {
            for partner in partners {
                assert!(
                    VOICING_PAIRS
                        .get(partner)
                        .is_some_and(|back| back.contains(phoneme)),
                    "voicing pair {phoneme}↔{partner} missing reverse entry"
                );
            }
        }
    }

    #[test]
    fn function_word_table_defines_lenient_set() {
        for word in ["a", "the", "to", "and", "would", "you're"] {
            assert!(FUNCTION_WORDS.contains_key(word), "missing {word}");
        }
        assert!(FUNCTION_WORDS["to"]["uː"].contains("ə"));
        assert!(FUNCTION_WORDS["the"]["iː"].contains("ə"));
    }
}
