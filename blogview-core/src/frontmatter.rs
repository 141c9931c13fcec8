//! YAML front matter splitting, parsing and writing
//!
//! A post looks like this:
//! ```markdown
//! ---
//! title: Hello
//! tags: [a, b]
//! ---
//! # Hello world
//! ```
//!
//! The opening `---` line must sit at byte 0. The block closes at the first
//! line that is exactly `---`, and everything after that line is the body,
//! returned untouched.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::error::{BlogError, Result};

/// Line that opens and closes the front matter block
pub const FRONT_MATTER_DELIMITER: &str = "---";

static FRONT_MATTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?ms)\A---\r?\n(?P<yaml>.*?)^---\r?(?:\n|\z)").expect("front matter regex")
});

/// Front matter of a post: a YAML mapping with no fixed schema.
///
/// Values can be any YAML value (scalars, sequences, nested mappings), so
/// posts are free to carry whatever fields they like.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrontMatter(Mapping);

impl FrontMatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a top-level field by name
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert or replace a top-level field
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(Value::String(key.into()), value.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.0.iter()
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.0
    }

    pub fn into_mapping(self) -> Mapping {
        self.0
    }

    /// `title` field, when it is a string
    pub fn title(&self) -> Option<&str> {
        self.get("title").and_then(Value::as_str)
    }

    /// `date` field rendered as text (YAML dates load as plain strings)
    pub fn date(&self) -> Option<String> {
        match self.get("date")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// `tags` field as a list of strings.
    ///
    /// Accepts a YAML sequence or a single comma separated string.
    pub fn tags(&self) -> Vec<String> {
        match self.get("tags") {
            Some(Value::Sequence(items)) => items.iter().filter_map(scalar_text).collect(),
            Some(Value::String(s)) => s
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Serialize back to the YAML text that goes between the delimiters
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.0)?)
    }
}

impl From<Mapping> for FrontMatter {
    fn from(mapping: Mapping) -> Self {
        Self(mapping)
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Split `content` into its front matter and its body.
///
/// Fails with `MissingFrontMatter` when the content does not open with a
/// `---` line at byte 0 or the block is never closed, and with
/// `MalformedFrontMatter` when the block is not a YAML mapping.
/// Errors carry no path; callers attach one with [`BlogError::with_path`].
pub fn parse(content: &str) -> Result<(FrontMatter, String)> {
    let captures = FRONT_MATTER_RE
        .captures(content)
        .ok_or_else(BlogError::missing_front_matter)?;

    let whole = captures.get(0).ok_or_else(BlogError::missing_front_matter)?;
    let yaml = captures.name("yaml").map_or("", |m| m.as_str());

    let front_matter = parse_yaml_block(yaml)?;
    let body = content[whole.end()..].to_string();

    Ok((front_matter, body))
}

fn parse_yaml_block(yaml: &str) -> Result<FrontMatter> {
    if yaml.trim().is_empty() {
        return Ok(FrontMatter::new());
    }

    let value: Value = serde_yaml::from_str(yaml)
        .map_err(|err| BlogError::malformed_front_matter(err.to_string()))?;

    match value {
        Value::Mapping(mapping) => Ok(FrontMatter(mapping)),
        Value::Null => Ok(FrontMatter::new()),
        other => Err(BlogError::malformed_front_matter(format!(
            "expected a mapping, found {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Write front matter and body back into the delimited format.
///
/// `parse(&render(fm, body)?)` gives back `(fm, body)`.
pub fn render(front_matter: &FrontMatter, body: &str) -> Result<String> {
    let yaml = front_matter.to_yaml()?;
    Ok(format!(
        "{delim}\n{yaml}{delim}\n{body}",
        delim = FRONT_MATTER_DELIMITER
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO: &str = "---\ntitle: Hello\ntags: [a, b]\n---\n# Hello world\n";

    #[test]
    fn test_parse_hello_post() {
        let (fm, body) = parse(HELLO).unwrap();

        assert_eq!(fm.title(), Some("Hello"));
        assert_eq!(fm.tags(), vec!["a", "b"]);
        assert_eq!(fm.len(), 2);
        assert_eq!(body, "# Hello world\n");
    }

    #[test]
    fn test_body_is_exact_suffix() {
        let content = "---\ntitle: x\n---\n\n  indented\n---\nnot front matter\n";
        let (_, body) = parse(content).unwrap();
        assert_eq!(body, "\n  indented\n---\nnot front matter\n");
        assert!(content.ends_with(&body));
    }

    #[test]
    fn test_nested_values() {
        let content = "---\nauthor:\n  name: kh\n  links:\n    - a\n    - b\ndraft: false\nviews: 42\n---\nbody";
        let (fm, body) = parse(content).unwrap();

        let author = fm.get("author").and_then(Value::as_mapping).unwrap();
        assert_eq!(author.get("name").and_then(Value::as_str), Some("kh"));
        assert_eq!(fm.get("draft").and_then(Value::as_bool), Some(false));
        assert_eq!(fm.get("views").and_then(Value::as_u64), Some(42));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_crlf_delimiters() {
        let content = "---\r\ntitle: Windows\r\n---\r\nline one\r\n";
        let (fm, body) = parse(content).unwrap();
        assert_eq!(fm.title(), Some("Windows"));
        assert_eq!(body, "line one\r\n");
    }

    #[test]
    fn test_empty_block_is_empty_mapping() {
        let (fm, body) = parse("---\n---\nbody\n").unwrap();
        assert!(fm.is_empty());
        assert_eq!(body, "body\n");
    }

    #[test]
    fn test_closing_delimiter_at_end_of_file() {
        let (fm, body) = parse("---\ntitle: t\n---").unwrap();
        assert_eq!(fm.title(), Some("t"));
        assert_eq!(body, "");
    }

    #[test]
    fn test_missing_opening_delimiter() {
        assert!(matches!(
            parse("# Just markdown\n"),
            Err(BlogError::MissingFrontMatter { path: None })
        ));
    }

    #[test]
    fn test_leading_whitespace_is_rejected() {
        assert!(matches!(
            parse("\n---\ntitle: x\n---\nbody"),
            Err(BlogError::MissingFrontMatter { .. })
        ));
        assert!(matches!(
            parse("  ---\ntitle: x\n---\nbody"),
            Err(BlogError::MissingFrontMatter { .. })
        ));
    }

    #[test]
    fn test_unclosed_block() {
        assert!(matches!(
            parse("---\ntitle: x\nbody without end\n"),
            Err(BlogError::MissingFrontMatter { .. })
        ));
    }

    #[test]
    fn test_delimiter_must_be_exact_line() {
        // "----" and "--- x" do not open or close a block
        assert!(matches!(
            parse("----\ntitle: x\n---\n"),
            Err(BlogError::MissingFrontMatter { .. })
        ));
        assert!(matches!(
            parse("---\ntitle: x\n--- trailing\n"),
            Err(BlogError::MissingFrontMatter { .. })
        ));
    }

    #[test]
    fn test_empty_content() {
        assert!(matches!(
            parse(""),
            Err(BlogError::MissingFrontMatter { .. })
        ));
    }

    #[test]
    fn test_invalid_yaml() {
        let content = "---\ntitle: [unclosed\n---\nbody\n";
        assert!(matches!(
            parse(content),
            Err(BlogError::MalformedFrontMatter { .. })
        ));
    }

    #[test]
    fn test_invalid_scalar() {
        let content = "---\ntitle: a: b\n---\nbody\n";
        assert!(matches!(
            parse(content),
            Err(BlogError::MalformedFrontMatter { .. })
        ));
    }

    #[test]
    fn test_non_mapping_yaml() {
        let content = "---\n- just\n- a list\n---\nbody\n";
        match parse(content) {
            Err(BlogError::MalformedFrontMatter { reason, .. }) => {
                assert!(reason.contains("sequence"))
            }
            other => panic!("expected malformed front matter, got {other:?}"),
        }
    }

    #[test]
    fn test_tags_from_comma_string() {
        let (fm, _) = parse("---\ntags: rust, blog ,,notes\n---\n").unwrap();
        assert_eq!(fm.tags(), vec!["rust", "blog", "notes"]);
    }

    #[test]
    fn test_date_field() {
        let (fm, _) = parse("---\ndate: 2019-03-01\n---\n").unwrap();
        assert_eq!(fm.date().as_deref(), Some("2019-03-01"));
    }

    #[test]
    fn test_render_then_parse() {
        let mut fm = FrontMatter::new();
        fm.insert("title", "Round trip");
        fm.insert("draft", true);
        fm.insert(
            "tags",
            Value::Sequence(vec![Value::from("a"), Value::from("b")]),
        );

        let text = render(&fm, "# Body\n\nmore\n").unwrap();
        assert!(text.starts_with("---\n"));

        let (parsed, body) = parse(&text).unwrap();
        assert_eq!(parsed, fm);
        assert_eq!(body, "# Body\n\nmore\n");
    }

    #[test]
    fn test_render_empty_front_matter() {
        let text = render(&FrontMatter::new(), "body").unwrap();
        let (parsed, body) = parse(&text).unwrap();
        assert!(parsed.is_empty());
        assert_eq!(body, "body");
    }
}
