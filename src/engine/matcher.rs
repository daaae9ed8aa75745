//! Answer normalization and matching.
//!
//! Comparison is exact after normalization, with no edit-distance
//! tolerance.
//! Lowercasing goes through the Turkish locale rules so the dotted and
//! dotless I pairs fold the way the language expects (`İ`→`i`, `I`→`ı`),
//! which a generic Unicode fold gets wrong.

use icu_casemap::CaseMapper;
use icu_locale_core::langid;
use icu_normalizer::ComposingNormalizer;

use crate::bank::VARIANT_DELIMITER;

/// Punctuation replaced by a space before comparison.
const PUNCTUATION: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`', '~',
    '(', ')', '\'', '"',
];

/// Canonical comparison form: NFC, Turkish lowercase, punctuation to
/// spaces, whitespace runs collapsed, ends trimmed.
pub fn normalize(text: &str) -> String {
    let composed = ComposingNormalizer::new_nfc().normalize(text);
    let lowered = CaseMapper::new().lowercase_to_string(&composed, &langid!("tr"));
    let spaced: String = lowered
        .chars()
        .map(|ch| if PUNCTUATION.contains(&ch) { ' ' } else { ch })
        .collect();
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True when the normalized answer equals any non-empty delimited variant
/// of `truth`. Variants that normalize to nothing never match, so an
/// all-delimiter truth accepts no answer at all.
pub fn is_correct(user_answer: &str, truth: &str) -> bool {
    let answer = normalize(user_answer);
    truth
        .split(VARIANT_DELIMITER)
        .map(normalize)
        .any(|variant| !variant.is_empty() && variant == answer)
}

/// Like [`is_correct`] but treats `truth` as one accepted spelling, never
/// splitting on the delimiter. Used for the reverse drill direction where
/// the `front` field is the expected answer.
pub fn is_correct_single(user_answer: &str, truth: &str) -> bool {
    let variant = normalize(truth);
    !variant.is_empty() && normalize(user_answer) == variant
}
