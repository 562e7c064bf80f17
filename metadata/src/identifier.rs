//! Identifier escaping.

/// Wrap an identifier in brackets, doubling any closing bracket it contains.
pub fn escape_identifier(name: &str) -> String {
    format!("[{}]", name.replace(']', "]]"))
}

/// Escape each part of a multipart name and join them with `.`.
pub fn escape_multipart<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(|part| escape_identifier(part.as_ref()))
        .collect::<Vec<_>>()
        .join(".")
}
