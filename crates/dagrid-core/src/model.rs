use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::geometry::Rect;

/// A positioned run of text on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl TextElement {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// One grid rectangle and the text bound to it, in reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<TextElement>,
}

impl Cell {
    pub fn new(rect: Rect) -> Self {
        Cell {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            elements: Vec::new(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Element texts joined with single spaces, whitespace collapsed.
    pub fn text(&self) -> String {
        let joined: Vec<&str> = self.elements.iter().map(|e| e.text.as_str()).collect();
        collapse_whitespace(&joined.join(" "))
    }

    /// Element texts concatenated with every whitespace character removed.
    pub fn compact_text(&self) -> String {
        self.elements
            .iter()
            .flat_map(|e| e.text.chars())
            .filter(|c| !c.is_whitespace())
            .collect()
    }
}

/// Collapse runs of whitespace to a single space and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A development application extracted from one table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevelopmentRecord {
    pub application_number: String,
    pub address: String,
    pub description: String,
    pub information_url: String,
    pub comment_url: String,
    pub scrape_date: NaiveDate,
    #[serde(
        serialize_with = "serialize_optional_date",
        deserialize_with = "deserialize_optional_date",
        default
    )]
    pub received_date: Option<NaiveDate>,
    pub legal_description: String,
}

/// Absent dates are written as an empty string rather than `null`.
fn serialize_optional_date<S: Serializer>(
    date: &Option<NaiveDate>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match date {
        Some(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
        None => serializer.serialize_str(""),
    }
}

fn deserialize_optional_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
