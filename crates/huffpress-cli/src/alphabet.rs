//! Input alphabet restriction.
//!
//! Compressed texts are limited to letters, space, period, newline and the
//! digits `1`-`9`. Everything else is dropped before counting.

/// Whether `c` belongs to the admitted alphabet.
pub fn is_admitted(c: char) -> bool {
    c.is_alphabetic() || matches!(c, ' ' | '.' | '\n' | '1'..='9')
}

/// Filter `raw` to the admitted alphabet, folding letters to lowercase.
pub fn filter_text(raw: &str) -> String {
    filter_text_with(raw, true)
}

/// Filter `raw` to the admitted alphabet.
///
/// With `fold_case` letters are lowercased (a letter may lowercase to more
/// than one char); otherwise they are kept as written.
pub fn filter_text_with(raw: &str, fold_case: bool) -> String {
    let admitted = raw.chars().filter(|&c| is_admitted(c));
    if fold_case {
        admitted.flat_map(char::to_lowercase).collect()
    } else {
        admitted.collect()
    }
}
