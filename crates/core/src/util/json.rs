//! Last-resort extraction of a structured object embedded in free-form
//! model output.

/// Returns the first balanced brace-delimited substring of `text`, or
/// `None` when no balanced object exists. Brace characters inside JSON
/// string literals (including escaped quotes) are ignored.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    // The delimiters are all ASCII, so byte positions are valid char
    // boundaries for slicing.
    for (i, &b) in text.as_bytes().iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_bare_object() {
        assert_eq!(extract_json_object(r#"{"a": 1}"#), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn extracts_object_surrounded_by_prose() {
        let text = r#"Here is the assessment you asked for:

{"overallScore": 81}

Let me know if you need anything else."#;
        assert_eq!(extract_json_object(text), Some(r#"{"overallScore": 81}"#));
    }

    #[test]
    fn balances_nested_objects() {
        let text = r#"result: {"a": {"b": {"c": 3}}} trailing"#;
        assert_eq!(extract_json_object(text), Some(r#"{"a": {"b": {"c": 3}}}"#));
    }

    #[test]
    fn ignores_braces_inside_strings() {
        let text = r#"{"note": "curly } brace { inside", "n": 1}"#;
        assert_eq!(extract_json_object(text), Some(text));
    }

    #[test]
    fn handles_escaped_quotes_inside_strings() {
        let text = r#"{"quote": "she said \"}\" loudly"}"#;
        assert_eq!(extract_json_object(text), Some(text));
    }

    #[test]
    fn returns_none_without_object() {
        assert_eq!(extract_json_object("no structured data here"), None);
    }

    #[test]
    fn returns_none_for_unbalanced_object() {
        assert_eq!(extract_json_object(r#"{"a": {"b": 1}"#), None);
    }

    #[test]
    fn stops_at_first_balanced_object() {
        let text = r#"{"first": 1} {"second": 2}"#;
        assert_eq!(extract_json_object(text), Some(r#"{"first": 1}"#));
    }
}
