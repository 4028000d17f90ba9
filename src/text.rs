use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Canonical comparison form for all user-facing text: NFD decomposition,
/// combining marks stripped, lowercased, trimmed.
///
/// Every filter and scope comparison applies this to BOTH sides, so
/// "Não-Binário" and "nao-binario" compare equal.
pub fn normalize_text(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

/// Normalized exact equality.
pub fn eq_normalized(a: &str, b: &str) -> bool {
    normalize_text(a) == normalize_text(b)
}

/// Normalized substring test: does `haystack` contain `needle`?
pub fn contains_normalized(haystack: &str, needle: &str) -> bool {
    normalize_text(haystack).contains(&normalize_text(needle))
}

/// Machine-name slug: normalized text with every non-alphanumeric run
/// collapsed to a single underscore, leading/trailing underscores trimmed.
/// Returns an empty string when nothing alphanumeric survives.
pub fn slugify(input: &str) -> String {
    let normalized = normalize_text(input);
    let mut out = String::with_capacity(normalized.len());
    let mut last_was_sep = true;
    for c in normalized.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            last_was_sep = false;
        } else if !last_was_sep {
            out.push('_');
            last_was_sep = true;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}
