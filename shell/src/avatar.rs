//! Account avatar initials.

#[cfg(test)]
#[path = "avatar_test.rs"]
mod avatar_test;

const FALLBACK: &str = "U";

/// Two-letter initials for a display label or email address.
///
/// Emails use only the local part. Words split on whitespace, `.`, `_`, and
/// `-`; a single word contributes its first two letters.
#[must_use]
pub fn initials(label: &str) -> String {
    let cleaned = label.trim();
    if cleaned.is_empty() {
        return FALLBACK.to_owned();
    }

    let base = match cleaned.split_once('@') {
        Some((local, _)) => local,
        None => cleaned,
    };
    let mut parts = base
        .split(|c: char| c.is_whitespace() || matches!(c, '.' | '_' | '-'))
        .filter(|part| !part.is_empty());

    let Some(first) = parts.next() else {
        return FALLBACK.to_owned();
    };
    let mut first_chars = first.chars();
    let mut out = String::new();
    out.extend(first_chars.next());
    match parts.next().and_then(|second| second.chars().next()) {
        Some(c) => out.push(c),
        None => out.extend(first_chars.next()),
    }
    out.to_uppercase()
}
