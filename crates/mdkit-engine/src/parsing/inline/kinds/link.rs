/// Link and image syntax: `[label](destination "title")`, `![alt](src)`.
pub struct Link;

impl Link {
    pub const IMAGE_OPEN: &'static [u8; 2] = b"![";
    pub const LABEL_OPEN: u8 = b'[';
    pub const LABEL_CLOSE: u8 = b']';
    pub const DEST_OPEN: u8 = b'(';
    pub const DEST_CLOSE: u8 = b')';
    pub const ESCAPE: u8 = b'\\';
}

/// Autolink syntax: `<https://example.com>` or `<me@example.com>`.
pub struct Autolink;

impl Autolink {
    pub const OPEN: u8 = b'<';
    pub const CLOSE: u8 = b'>';
    const MAX_SCHEME: usize = 32;

    /// Resolves the inner text of `<...>` to an href, if it is an autolink.
    pub fn href(inner: &str) -> Option<String> {
        if inner.is_empty() || inner.contains(|c: char| c.is_whitespace() || c == '<') {
            return None;
        }
        if let Some((scheme, _)) = inner.split_once(':') {
            let mut chars = scheme.chars();
            let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
                && (2..=Self::MAX_SCHEME).contains(&scheme.len());
            if valid {
                return Some(inner.to_string());
            }
        }
        let (local, domain) = inner.split_once('@')?;
        let email = !local.is_empty()
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.');
        email.then(|| format!("mailto:{inner}"))
    }
}
