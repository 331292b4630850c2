// ---------------------------------------------------------------------------
// Text normalisation: strip serialisation artefacts from raw tweet text
// ---------------------------------------------------------------------------

/// One cleaning step. Steps are pure and run in a fixed order.
pub type CleanStep = fn(&str) -> String;

/// The cleaning pipeline, in execution order.
///
/// Order matters: entity decoding must see the text after the literal
/// wrappers are removed, and whitespace collapsing must run last so that
/// unescaped `\n` / `\t` sequences are folded into single spaces.
pub const PIPELINE: [CleanStep; 4] = [
    unwrap_list_literal,
    unwrap_byte_literal,
    decode_entities,
    collapse_whitespace,
];

/// Clean a raw text cell into a display-ready string.
///
/// Best effort only: malformed input degrades to a partial clean, never an
/// error. `None` and the empty string both produce `""`.
pub fn normalize(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return String::new();
    };
    PIPELINE
        .iter()
        .fold(raw.to_string(), |text, step| step(&text))
}

/// Unwrap a stringified one-element list: `['text']` or `["text"]`.
///
/// When the inner text looks like several list elements (a comma and more
/// than two single quotes), only the first element is kept.
pub fn unwrap_list_literal(s: &str) -> String {
    let wrapped = (s.starts_with("['") && s.ends_with("']"))
        || (s.starts_with("[\"") && s.ends_with("\"]"));
    if !wrapped {
        return s.to_string();
    }

    // `[']` shares its quote between prefix and suffix; that quote remains.
    let inner = if s.len() >= 4 { &s[2..s.len() - 2] } else { &s[1..2] };

    if inner.contains(',') && inner.matches('\'').count() > 2 {
        let first = inner.split("',").next().unwrap_or(inner).trim();
        let first = first
            .strip_prefix(['\'', '"'])
            .unwrap_or(first);
        let first = first
            .strip_suffix(['\'', '"'])
            .unwrap_or(first);
        return first.to_string();
    }
    inner.to_string()
}

/// Unwrap a stringified byte literal: `b'text'` or `b"text"`, turning the
/// escaped `\n`, `\t` and `\r` sequences back into control characters.
pub fn unwrap_byte_literal(s: &str) -> String {
    let Some(body) = s.strip_prefix("b'").or_else(|| s.strip_prefix("b\"")) else {
        return s.to_string();
    };
    let body = body.strip_suffix(['\'', '"']).unwrap_or(body);
    body.replace("\\n", "\n")
        .replace("\\t", "\t")
        .replace("\\r", "\r")
}

/// Decode `&amp;`, `&lt;` and `&gt;`, one single pass each, in that order.
pub fn decode_entities(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
}

/// Collapse whitespace runs into single spaces and trim both ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_empty_input_is_empty() {
        assert_eq!(normalize(None), "");
        assert_eq!(normalize(Some("")), "");
        assert_eq!(normalize(Some("   \n\t")), "");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(normalize(Some("just a tweet")), "just a tweet");
    }

    #[test]
    fn single_element_list_is_unwrapped() {
        assert_eq!(normalize(Some("['hello']")), "hello");
        assert_eq!(normalize(Some("[\"hello\"]")), "hello");
    }

    #[test]
    fn comma_without_quotes_keeps_whole_element() {
        assert_eq!(normalize(Some("['hello, world']")), "hello, world");
    }

    #[test]
    fn multi_element_list_keeps_first_element() {
        assert_eq!(normalize(Some("['hello', 'world']")), "hello");
        assert_eq!(
            unwrap_list_literal("['first one', 'second', 'third']"),
            "first one"
        );
    }

    #[test]
    fn overlapping_list_delimiters_keep_shared_quote() {
        assert_eq!(unwrap_list_literal("[']"), "'");
        assert_eq!(unwrap_list_literal("['']"), "");
    }

    #[test]
    fn mismatched_list_delimiters_are_untouched() {
        assert_eq!(unwrap_list_literal("['hello\"]"), "['hello\"]");
        assert_eq!(unwrap_list_literal("[hello]"), "[hello]");
    }

    #[test]
    fn byte_literal_unescapes_control_sequences() {
        assert_eq!(unwrap_byte_literal("b'line1\\nline2'"), "line1\nline2");
        assert_eq!(unwrap_byte_literal("b\"a\\tb\\rc\""), "a\tb\rc");
    }

    #[test]
    fn byte_literal_newlines_collapse_in_full_pipeline() {
        assert_eq!(normalize(Some("b'line1\\nline2'")), "line1 line2");
    }

    #[test]
    fn byte_literal_accepts_either_closing_quote() {
        assert_eq!(unwrap_byte_literal("b'text\""), "text");
        assert_eq!(unwrap_byte_literal("b'unterminated"), "unterminated");
    }

    #[test]
    fn entity_decoding_is_single_pass_and_ordered() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;3 &gt;"), "<3 >");
        assert_eq!(decode_entities("&amp;amp;"), "&amp;");
        // `&amp;lt;` becomes `&lt;` first, which the `&lt;` pass then sees.
        assert_eq!(decode_entities("&amp;lt;"), "<");
    }

    #[test]
    fn entities_then_whitespace() {
        assert_eq!(normalize(Some("a  &amp;   b")), "a & b");
    }

    #[test]
    fn list_wrapping_a_byte_literal() {
        assert_eq!(
            normalize(Some("[\"b'RT @user: great &amp; sunny\\n day'\"]")),
            "RT @user: great & sunny day"
        );
    }
}
