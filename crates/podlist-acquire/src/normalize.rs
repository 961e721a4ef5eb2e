use unicode_normalization::UnicodeNormalization;

/// Normalize text extracted from markup to NFC form and trim both ends.
///
/// Keeps accented titles comparable no matter how the page encoded them,
/// and drops the indentation whitespace that surrounds element text.
pub fn clean_text(input: &str) -> String {
    let nfc: String = input.nfc().collect();
    nfc.trim().to_string()
}

/// Like [`clean_text`], but also folds every internal whitespace run
/// (newlines included) into a single space. Used for one-line fields.
pub fn collapse_whitespace(input: &str) -> String {
    let nfc: String = input.nfc().collect();
    nfc.split_whitespace().collect::<Vec<_>>().join(" ")
}
