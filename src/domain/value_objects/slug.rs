use unicode_normalization::UnicodeNormalization;

/// Derives a URL slug: lowercase, NFD, drop combining marks, collapse every
/// run outside `[a-z0-9]` into one hyphen, trim hyphens at both ends.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for ch in input.to_lowercase().nfd() {
        if is_combining_diacritic(ch) {
            continue;
        }
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

// Combining Diacritical Marks block only; other marks act as separators.
fn is_combining_diacritic(ch: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&ch)
}
