/// How `\uXXXX` escapes inside a string value are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnicodeEscapes {
    /// Keep the escape as the literal text `\u` followed by its hex digits.
    Keep,
    /// Decode four hex digits into the code point they name.
    Decode,
}

/// Byte offset just past the first `"key":` in `fragment`. The fragment is
/// scanned as text, never parsed as JSON.
pub fn find_key(fragment: &str, key: &str) -> Option<usize> {
    if key.is_empty() {
        return None;
    }

    let mut from = 0;
    while let Some(pos) = fragment[from..].find(key) {
        let start = from + pos;
        let end = start + key.len();
        let quoted_before = start > 0 && fragment.as_bytes()[start - 1] == b'"';
        if quoted_before && fragment[end..].starts_with("\":") {
            return Some(end + 2);
        }
        from = end;
    }
    None
}

/// Extract the first string value of `key` in a JSON fragment.
///
/// Returns `None` when the key is absent, when its value is not a string
/// (e.g. `null`), or when the string is not terminated within the fragment.
pub fn extract_string_field(fragment: &str, key: &str, unicode: UnicodeEscapes) -> Option<String> {
    let value_start = find_key(fragment, key)?;
    let rest = fragment[value_start..].trim_start_matches([' ', ':', '\t']);
    let body = rest.strip_prefix('"')?;

    let mut out = String::with_capacity(body.len().min(256));
    let mut chars = body.char_indices();
    while let Some((idx, ch)) = chars.next() {
        match ch {
            '"' => return Some(out),
            '\\' => {
                let (_, escaped) = chars.next()?;
                match escaped {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    '"' => out.push('"'),
                    '\\' => out.push('\\'),
                    'u' => match unicode {
                        UnicodeEscapes::Keep => out.push_str("\\u"),
                        UnicodeEscapes::Decode => match decode_unicode_escape(body, idx + 2) {
                            Some(decoded) => {
                                out.push(decoded);
                                chars.nth(3);
                            }
                            None => out.push_str("\\u"),
                        },
                    },
                    other => out.push(other),
                }
            }
            other => out.push(other),
        }
    }

    None
}

/// Parse the unsigned integer following the first `"key":` in a fragment.
pub fn extract_u64_field(fragment: &str, key: &str) -> Option<u64> {
    let value_start = find_key(fragment, key)?;
    let rest = fragment[value_start..].trim_start();
    let digits_end = rest
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..digits_end].parse().ok()
}

/// Decode the four hex digits starting at `hex_start`.
///
/// Surrogate halves cannot stand alone as a `char`; pairs for code points
/// above U+FFFF are not recombined and become U+FFFD.
fn decode_unicode_escape(body: &str, hex_start: usize) -> Option<char> {
    let hex = body.get(hex_start..hex_start + 4)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let code = u32::from_str_radix(hex, 16).ok()?;
    Some(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELTA: &str = r#"{"id":"chatcmpl-1","choices":[{"index":0,"delta":{"content":"Hello"},"finish_reason":null}]}"#;

    #[test]
    fn test_find_key_requires_quoted_key_with_colon() {
        assert!(find_key(r#"{"contents":"x"}"#, "content").is_none());
        assert!(find_key(r#"{"text":"content"}"#, "content").is_none());
        let offset = find_key(r#"{"a":1,"content":"x"}"#, "content").unwrap();
        assert_eq!(&r#"{"a":1,"content":"x"}"#[offset..], r#""x"}"#);
        assert!(find_key("anything", "").is_none());
    }

    #[test]
    fn test_extracts_plain_content() {
        assert_eq!(
            extract_string_field(DELTA, "content", UnicodeEscapes::Keep).as_deref(),
            Some("Hello")
        );
    }

    #[test]
    fn test_skips_whitespace_after_key() {
        let fragment = "{\"content\": \t \"spaced\"}";
        assert_eq!(
            extract_string_field(fragment, "content", UnicodeEscapes::Keep).as_deref(),
            Some("spaced")
        );
    }

    #[test]
    fn test_maps_simple_escapes() {
        let fragment = r#"{"content":"a\nb\tc \"q\" back\\slash"}"#;
        assert_eq!(
            extract_string_field(fragment, "content", UnicodeEscapes::Keep).as_deref(),
            Some("a\nb\tc \"q\" back\\slash")
        );
    }

    #[test]
    fn test_other_escapes_pass_the_character_through() {
        let fragment = r#"{"content":"path\/to"}"#;
        assert_eq!(
            extract_string_field(fragment, "content", UnicodeEscapes::Keep).as_deref(),
            Some("path/to")
        );
    }

    #[test]
    fn test_unicode_escape_modes() {
        let fragment = r#"{"content":"caf\u00e9 \u20ac \u0041"}"#;
        assert_eq!(
            extract_string_field(fragment, "content", UnicodeEscapes::Keep).as_deref(),
            Some(r"caf\u00e9 \u20ac \u0041")
        );
        assert_eq!(
            extract_string_field(fragment, "content", UnicodeEscapes::Decode).as_deref(),
            Some("café € A")
        );
    }

    #[test]
    fn test_decoded_escapes_use_expected_utf8_widths() {
        let fragment = r#"{"content":"\u007a\u00e9\u4e2d"}"#;
        let decoded = extract_string_field(fragment, "content", UnicodeEscapes::Decode).unwrap();
        assert_eq!(decoded.as_bytes(), &[0x7a, 0xc3, 0xa9, 0xe4, 0xb8, 0xad]);
    }

    #[test]
    fn test_surrogates_and_short_escapes() {
        let surrogate = r#"{"content":"\ud83d\ude00"}"#;
        assert_eq!(
            extract_string_field(surrogate, "content", UnicodeEscapes::Decode).as_deref(),
            Some("\u{fffd}\u{fffd}")
        );

        let short = r#"{"content":"\u12"}"#;
        assert_eq!(
            extract_string_field(short, "content", UnicodeEscapes::Decode).as_deref(),
            Some(r"\u12")
        );
    }

    #[test]
    fn test_non_string_and_missing_values_yield_none() {
        let role_only = r#"{"choices":[{"delta":{"role":"assistant"}}]}"#;
        assert!(extract_string_field(role_only, "content", UnicodeEscapes::Keep).is_none());

        let null_content = r#"{"choices":[{"delta":{"content":null}}]}"#;
        assert!(extract_string_field(null_content, "content", UnicodeEscapes::Keep).is_none());
    }

    #[test]
    fn test_unterminated_string_yields_none() {
        assert!(extract_string_field(r#"{"content":"never closed"#, "content", UnicodeEscapes::Keep).is_none());
        assert!(extract_string_field(r#"{"content":"dangling\"#, "content", UnicodeEscapes::Keep).is_none());
    }

    #[test]
    fn test_empty_string_value() {
        assert_eq!(
            extract_string_field(r#"{"content":""}"#, "content", UnicodeEscapes::Keep).as_deref(),
            Some("")
        );
    }

    #[test]
    fn test_extract_u64_field() {
        let usage = r#"{"usage":{"prompt_tokens":9,"completion_tokens":12,"total_tokens": 21}}"#;
        assert_eq!(extract_u64_field(usage, "total_tokens"), Some(21));
        assert_eq!(extract_u64_field(usage, "prompt_tokens"), Some(9));
        assert_eq!(extract_u64_field(r#"{"total_tokens":null}"#, "total_tokens"), None);
        assert_eq!(extract_u64_field(r#"{"other":1}"#, "total_tokens"), None);
    }
}
