/// Characters that survive sanitization besides ASCII letters and digits.
const ALLOWED_PUNCTUATION: [char; 3] = ['-', '|', '.'];

/// Strip HTML tags from `value`. An unterminated tag swallows the rest.
fn strip_tags(value: &str) -> String {
    let mut stripped = String::with_capacity(value.len());
    let mut in_tag = false;
    for c in value.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => stripped.push(c),
            _ => {}
        }
    }
    stripped
}

/// Remove HTML tags and every character outside `[A-Za-z0-9-|.]`.
///
/// Lossy on purpose: unexpected characters are dropped, never rejected.
#[must_use]
pub fn clean(value: &str) -> String {
    strip_tags(value)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || ALLOWED_PUNCTUATION.contains(c))
        .collect()
}
