//! Progressive hint rendering.
//!
//! Hints operate on the display form of the answer, not the normalized
//! comparison form. Masking counts characters from the front and always
//! leaves spaces visible so the word shape stays readable.

/// Placeholder for a hidden character.
pub const MASK_CHAR: char = '.';

/// Vowels used for the syllable split. `y` counts as a vowel here because
/// splitting after it reads better for loanwords.
const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

/// Returns `answer` with every character at index `revealed` or beyond
/// replaced by [`MASK_CHAR`], except spaces which always show through.
///
/// Indexing is by character, not byte, so multibyte letters count as one.
pub fn mask(answer: &str, revealed: usize) -> String {
    answer
        .chars()
        .enumerate()
        .map(|(i, ch)| {
            if i < revealed || ch == ' ' {
                ch
            } else {
                MASK_CHAR
            }
        })
        .collect()
}

/// Inserts a hyphen after each vowel as a rough syllable guide, then
/// strips any trailing hyphen. Vowel detection is ASCII-insensitive to
/// case but deliberately naive; this is a study aid, not linguistics.
pub fn syllabify(answer: &str) -> String {
    let mut out = String::with_capacity(answer.len() * 2);
    for ch in answer.chars() {
        out.push(ch);
        if VOWELS.contains(&ch.to_ascii_lowercase()) {
            out.push('-');
        }
    }
    if out.ends_with('-') {
        out.pop();
    }
    out
}
