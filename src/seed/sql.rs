//! Single-quoted SQL string literal helpers

/// Read the literal whose opening quote is at byte offset `start`
///
/// Returns the unescaped value and the offset just past the closing quote,
/// or `None` if `start` isn't a quote or the literal never closes.
pub fn read_quoted(text: &str, start: usize) -> Option<(String, usize)> {
    let bytes = text.as_bytes();
    if bytes.get(start) != Some(&b'\'') {
        return None;
    }

    let mut value = String::new();
    let mut segment = start + 1;
    let mut i = segment;
    while i < bytes.len() {
        if bytes[i] == b'\'' {
            value.push_str(&text[segment..i]);
            if bytes.get(i + 1) == Some(&b'\'') {
                value.push('\'');
                i += 2;
                segment = i;
                continue;
            }
            return Some((value, i + 1));
        }
        i += 1;
    }
    None
}

/// Undo `''` escaping inside a literal body
pub fn unescape(body: &str) -> String {
    body.replace("''", "'")
}

/// Escape a value for use inside a single-quoted literal
pub fn escape(value: &str) -> String {
    value.replace('\'', "''")
}

/// Quote a value as a SQL string literal
pub fn quote(value: &str) -> String {
    format!("'{}'", escape(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_simple_literal() {
        let text = "('docente', 'PB-01: Crear curso', 'x')";
        let (value, end) = read_quoted(text, 12).unwrap();
        assert_eq!(value, "PB-01: Crear curso");
        assert_eq!(&text[end..end + 1], ",");
    }

    #[test]
    fn test_read_escaped_quotes_and_accents() {
        let text = "'Hacer clic en ''Guardar'' — sesión' rest";
        let (value, end) = read_quoted(text, 0).unwrap();
        assert_eq!(value, "Hacer clic en 'Guardar' — sesión");
        assert_eq!(&text[end..], " rest");
    }

    #[test]
    fn test_unterminated_or_misplaced() {
        assert!(read_quoted("'never closes", 0).is_none());
        assert!(read_quoted("abc", 0).is_none());
        assert!(read_quoted("'a'", 5).is_none());
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("it's"), "'it''s'");
        assert_eq!(unescape(&escape("a'b''c")), "a'b''c");
    }
}
