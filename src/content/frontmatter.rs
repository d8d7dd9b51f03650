//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// A `date` field as written in frontmatter, or supplied already parsed
#[derive(Debug, Clone, PartialEq)]
pub enum DateValue {
    Date(NaiveDate),
    Text(String),
}

impl DateValue {
    /// Normalize to a calendar date. `None` when the text is not a valid date.
    pub fn to_date(&self) -> Option<NaiveDate> {
        match self {
            DateValue::Date(d) => Some(*d),
            DateValue::Text(s) => parse_date_string(s),
        }
    }

    /// Whether the value carries nothing to parse
    pub fn is_empty(&self) -> bool {
        matches!(self, DateValue::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            DateValue::Text(s) => f.write_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for DateValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct DateVisitor;

        impl<'de> Visitor<'de> for DateVisitor {
            type Value = DateValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a date")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(DateValue::Text(value.to_string()))
            }

            // Unquoted years and the like come through as numbers; they are
            // kept as text and rejected during validation.
            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(DateValue::Text(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(DateValue::Text(value.to_string()))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(DateValue::Text(value.to_string()))
            }
        }

        deserializer.deserialize_any(DateVisitor)
    }
}

/// Front-matter data from a post
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub date: Option<DateValue>,
    pub description: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    pub language: Option<String>,
    /// Listing icon name
    pub icon: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// Content without a `---` delimited block yields empty front-matter and
    /// the whole input as body.
    pub fn parse(content: &str) -> Result<(Self, &str), serde_yaml::Error> {
        let content = content.trim_start_matches('\u{feff}');
        let trimmed = content.trim_start();

        let Some(rest) = trimmed.strip_prefix("---") else {
            return Ok((FrontMatter::default(), content));
        };
        // The opening delimiter must stand on its own line
        if !(rest.starts_with('\n') || rest.starts_with("\r\n")) {
            return Ok((FrontMatter::default(), content));
        }
        let rest = rest.trim_start_matches(['\n', '\r']);

        let (yaml_content, remaining) = if let Some(after) = rest.strip_prefix("---") {
            ("", after)
        } else if let Some(end_pos) = rest.find("\n---") {
            (&rest[..end_pos], &rest[end_pos + 4..])
        } else {
            // No closing delimiter, treat as no front-matter
            return Ok((FrontMatter::default(), content));
        };

        // Drop the remainder of the closing delimiter line
        let remaining = match remaining.find('\n') {
            Some(pos) if remaining[..pos].trim().is_empty() => &remaining[pos + 1..],
            None if remaining.trim().is_empty() => "",
            _ => remaining,
        };
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml_content)?;
        Ok((fm, remaining))
    }

    /// Trimmed value of a string field, `None` when absent or blank
    pub fn non_empty(value: &Option<String>) -> Option<&str> {
        value.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Parse a date string in various formats
fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    // Try RFC 3339 / ISO 8601 with offset; keep the date as written
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
slug: hello-world
date: 2024-01-15
language: EN
tags:
  - rust
  - Travel
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Hello World".to_string()));
        assert_eq!(fm.slug, Some("hello-world".to_string()));
        assert_eq!(fm.language, Some("EN".to_string()));
        assert_eq!(fm.tags, vec!["rust", "Travel"]);
        assert_eq!(fm.date, Some(DateValue::Text("2024-01-15".to_string())));
        assert_eq!(remaining, "This is the content.\n");
    }

    #[test]
    fn test_parse_single_string_tags() {
        let content = "---\nslug: one\ntags: Notes\n---\nBody\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, vec!["Notes"]);
        assert_eq!(remaining, "Body\n");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just markdown\n\nNo metadata here.";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert!(fm.slug.is_none());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_unclosed_frontmatter_is_body() {
        let content = "---\nslug: open\n\nNever closed.";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert!(fm.slug.is_none());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_empty_frontmatter_block() {
        let (fm, remaining) = FrontMatter::parse("---\n---\nBody").unwrap();
        assert!(fm.slug.is_none());
        assert_eq!(remaining, "Body");
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        let content = "---\nslug: [unclosed\n---\nBody";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_crlf_frontmatter() {
        let content = "---\r\nslug: crlf\r\ndate: 2024-03-01\r\n---\r\nBody\r\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(FrontMatter::non_empty(&fm.slug), Some("crlf"));
        assert_eq!(remaining, "Body\r\n");
    }

    #[test]
    fn test_extra_fields_are_kept() {
        let content = "---\nslug: x\ndraft: true\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert!(fm.extra.contains_key("draft"));
    }

    #[test]
    fn test_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        for s in [
            "2024-01-15",
            "2024/01/15",
            "2024-01-15 10:30:00",
            "2024-01-15T10:30:00",
            "2024-01-15T10:30:00.250",
            "2024-01-15T10:30:00+02:00",
            "2024-01-15T23:30:00Z",
        ] {
            assert_eq!(
                DateValue::Text(s.to_string()).to_date(),
                Some(expected),
                "{s}"
            );
        }
    }

    #[test]
    fn test_invalid_calendar_date() {
        assert_eq!(DateValue::Text("2024-02-30".to_string()).to_date(), None);
        assert_eq!(DateValue::Text("yesterday".to_string()).to_date(), None);
        assert_eq!(DateValue::Text("2024".to_string()).to_date(), None);
    }

    #[test]
    fn test_preparsed_date() {
        let d = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let value = DateValue::Date(d);
        assert_eq!(value.to_date(), Some(d));
        assert_eq!(value.to_string(), "2023-12-31");
        assert!(!value.is_empty());
        assert!(DateValue::Text("  ".to_string()).is_empty());
    }

    #[test]
    fn test_numeric_date_is_kept_as_text() {
        let (fm, _) = FrontMatter::parse("---\ndate: 2024\n---\n").unwrap();
        assert_eq!(fm.date, Some(DateValue::Text("2024".to_string())));
    }
}
