//! Cookie string lookup.

/// Looks up a cookie by name in a `Cookie`-style string
/// (`"a=1; csrftoken=abc; b=2"`).
///
/// Entries are split on `;` and trimmed. The first entry that starts with
/// `name=` wins, and the rest of it is percent-decoded. Returns `None` if
/// no entry matches.
pub fn lookup(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|entry| entry.strip_prefix(name)?.strip_prefix('='))
        .map(decode)
}

// Lenient: a `%` that does not start a valid escape is kept as is.
fn decode(value: &str) -> String {
    match urlencoding::decode(value) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => {
            // Escapes that decode to invalid UTF-8.
            let bytes = urlencoding::decode_binary(value.as_bytes());
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }
}
