use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

const STRIPPED: &[char] = &['*', '+', '~', '.', '(', ')', '\'', '"', '!', ':', '@'];

/// Lowercase, URL-safe slug for a title.
///
/// Accents are folded to their base letters, the characters `*+~.()'"!:@` and any
/// other non-alphanumeric symbol are removed, and runs of whitespace or hyphens
/// become a single `-`.
pub fn slugify(title: &str) -> String {
    let folded: String = title
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(|c| !STRIPPED.contains(c))
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();

    folded
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
