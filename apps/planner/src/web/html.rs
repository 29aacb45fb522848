/// Escapes text for insertion into HTML element content or attribute values.
///
/// Replaces `&`, `<`, `>`, `"` and `'` with entities, so model output and form input
/// can never break out of the surrounding markup.
pub fn escape_html(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#x27;"),
            _ => output.push(ch),
        }
    }
    output
}
