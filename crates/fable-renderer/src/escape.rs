//! HTML escaping for generated markup.

/// Escape text for safe inclusion in HTML element content or attribute values.
///
/// # Examples
///
/// ```
/// use fable_renderer::escape_html;
///
/// assert_eq!(escape_html("<b>\"l'aigle\" & co</b>"), "&lt;b&gt;&quot;l&#x27;aigle&quot; &amp; co&lt;/b&gt;");
/// ```
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape_html("laigle-et-le-chapon"), "laigle-et-le-chapon");
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;"
        );
    }
}
