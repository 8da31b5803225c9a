// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Per-field annotations in struct-tag syntax: `json:"-" visible:"alice,bob"`

use once_cell::sync::Lazy;
use regex::Regex;

// One key:"value" pair at the start of the input, after optional spaces.
// Keys exclude control characters, space, `:` and `"`.
static TAG_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^ *([^\x00-\x20:"\x7f]+):"((?:[^"\\]|\\(?s:.))*)""#)
        .expect("tag pair pattern is valid")
});

/// Annotations attached to one field, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    pairs: Vec<(String, String)>,
}

impl Tags {
    /// Parse a struct tag such as `json:"alice_data" visible:"alice"`.
    ///
    /// Follows Go's struct tag lookup: parsing stops at the first segment
    /// that is not a well-formed `key:"value"` pair, keeping the pairs
    /// before it.
    pub fn parse(tag: &str) -> Self {
        let mut pairs = Vec::new();
        let mut rest = tag;
        while let Some(caps) = TAG_PAIR.captures(rest) {
            let Some(value) = unquote(&caps[2]) else {
                break;
            };
            pairs.push((caps[1].to_string(), value));
            rest = &rest[caps[0].len()..];
        }
        Self { pairs }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value for `key`; the first occurrence wins
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Decode the inside of a Go double-quoted string; `None` when it is invalid
fn unquote(raw: &str) -> Option<String> {
    if !raw.contains(['\\', '\n']) {
        return Some(raw.to_string());
    }

    let mut out: Vec<u8> = Vec::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '\n' => return None,
            '\\' => {}
            c => {
                push_char(&mut out, c);
                continue;
            }
        }
        match chars.next()? {
            'a' => out.push(0x07),
            'b' => out.push(0x08),
            'f' => out.push(0x0c),
            'n' => out.push(b'\n'),
            'r' => out.push(b'\r'),
            't' => out.push(b'\t'),
            'v' => out.push(0x0b),
            '\\' => out.push(b'\\'),
            '"' => out.push(b'"'),
            'x' => out.push(u8::try_from(digits(&mut chars, 16, 2)?).ok()?),
            'u' => push_char(&mut out, char::from_u32(digits(&mut chars, 16, 4)?)?),
            'U' => push_char(&mut out, char::from_u32(digits(&mut chars, 16, 8)?)?),
            d @ '0'..='7' => {
                let value = d.to_digit(8)? * 64 + digits(&mut chars, 8, 2)?;
                out.push(u8::try_from(value).ok()?);
            }
            _ => return None,
        }
    }

    Some(match String::from_utf8(out) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

fn digits(chars: &mut std::str::Chars<'_>, radix: u32, count: usize) -> Option<u32> {
    (0..count).try_fold(0u32, |acc, _| Some(acc * radix + chars.next()?.to_digit(radix)?))
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_go_style_tag() {
        let tags = Tags::parse(r#"json:"alice_and_bob_data" visible:"alice,bob""#);
        assert_eq!(tags.get("json"), Some("alice_and_bob_data"));
        assert_eq!(tags.get("visible"), Some("alice,bob"));
        assert_eq!(tags.get("xml"), None);
    }

    #[test]
    fn test_parse_empty() {
        let tags = Tags::parse("");
        assert!(tags.is_empty());
        assert_eq!(tags.get("visible"), None);
    }

    #[test]
    fn test_empty_value_is_present() {
        let tags = Tags::parse(r#"visible:"""#);
        assert_eq!(tags.get("visible"), Some(""));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let tags = Tags::parse(r#"visible:"alice" visible:"bob""#);
        assert_eq!(tags.get("visible"), Some("alice"));
    }

    #[test]
    fn test_escaped_quotes() {
        let tags = Tags::parse(r#"note:"say \"hi\"" visible:"bob""#);
        assert_eq!(tags.get("note"), Some(r#"say "hi""#));
        assert_eq!(tags.get("visible"), Some("bob"));
    }

    #[test]
    fn test_stops_at_first_malformed_segment() {
        let tags = Tags::parse(r#"garbage json:"-""#);
        assert!(tags.is_empty());
        assert_eq!(tags.get("json"), None);

        let tags = Tags::parse(r#"json:"-" visible:unquoted other:"x""#);
        assert_eq!(tags.get("json"), Some("-"));
        assert_eq!(tags.get("visible"), None);
        assert_eq!(tags.get("other"), None);

        let tags = Tags::parse(r#"json:"-" visible:"unterminated"#);
        assert_eq!(tags.get("json"), Some("-"));
        assert_eq!(tags.get("visible"), None);
    }

    #[test]
    fn test_pairs_without_separating_space() {
        let tags = Tags::parse(r#"json:"id"visible:"bob""#);
        assert_eq!(tags.get("json"), Some("id"));
        assert_eq!(tags.get("visible"), Some("bob"));
    }

    #[test]
    fn test_go_escapes() {
        let tags = Tags::parse(r#"a:"\x41\102\u00e9\U0001F600" b:"tab\there""#);
        assert_eq!(tags.get("a"), Some("AB\u{e9}\u{1F600}"));
        assert_eq!(tags.get("b"), Some("tab\there"));
    }

    #[test]
    fn test_invalid_escape_stops_parsing() {
        let tags = Tags::parse(r#"json:"-" visible:"al\qice" other:"x""#);
        assert_eq!(tags.get("json"), Some("-"));
        assert_eq!(tags.get("visible"), None);
        assert_eq!(tags.get("other"), None);

        assert!(Tags::parse(r#"a:"\x4""#).is_empty());
        assert!(Tags::parse(r#"a:"\ud800""#).is_empty());
        assert!(Tags::parse("a:\"line\nbreak\"").is_empty());
    }

    #[test]
    fn test_whitespace_inside_value_kept() {
        let tags = Tags::parse(r#"visible:" alice, bob""#);
        assert_eq!(tags.get("visible"), Some(" alice, bob"));
    }

    #[test]
    fn test_from_pairs() {
        let tags = Tags::from_pairs([("json", "-"), ("visible", "bob")]);
        assert_eq!(tags.get("json"), Some("-"));
        assert_eq!(tags.iter().count(), 2);
    }
}
