//! Layout serialization: flat element records stored as one JSON blob.
//!
//! Geometry is written in CSS form (`"50px"`). Reading is lenient: numbers
//! may arrive as JSON numbers or strings, unparseable values become 0, the
//! legacy `bg` field is accepted for the background color, and records that
//! cannot be understood are skipped rather than failing the whole load.

use crate::document::LayoutDocument;
use crate::element::{Element, ElementKind, MAX_COORDINATE};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One element as stored in the layout blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(deserialize_with = "lenient_int")]
    pub index: i64,
    #[serde(default)]
    pub left: String,
    #[serde(default)]
    pub top: String,
    #[serde(default)]
    pub width: String,
    #[serde(default)]
    pub height: String,
    #[serde(default, alias = "bg")]
    pub background_color: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, deserialize_with = "lenient_int")]
    pub rotation: i64,
    #[serde(default, deserialize_with = "lenient_int")]
    pub z_index: i64,
    #[serde(default)]
    pub border_radius: String,
}

impl LayoutRecord {
    pub fn from_element(element: &Element) -> Self {
        Self {
            kind: element.kind().as_str().to_string(),
            index: element.index() as i64,
            left: format_px(element.left),
            top: format_px(element.top),
            width: format_px(element.width),
            height: format_px(element.height),
            background_color: element.background_color.clone(),
            text: element.text.clone().unwrap_or_default(),
            rotation: element.rotation as i64,
            z_index: element.z_index() as i64,
            border_radius: format_px(element.border_radius),
        }
    }

    /// Rebuild an element. Returns None for unknown kinds or a non-positive
    /// index. Missing sizes fall back to the kind's default size.
    pub fn to_element(&self) -> Option<Element> {
        let kind: ElementKind = self.kind.parse().ok()?;
        let index = u32::try_from(self.index).ok().filter(|&i| i > 0)?;
        let (default_width, default_height) = kind.default_size();

        let mut element = Element::new(kind, index);
        element.left = parse_px(&self.left);
        element.top = parse_px(&self.top);
        element.width = positive_or(parse_px(&self.width), default_width);
        element.height = positive_or(parse_px(&self.height), default_height);
        element.background_color = self.background_color.clone();
        element.rotation = self.rotation.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        element.border_radius = parse_px(&self.border_radius);
        element.text = kind.has_text().then(|| self.text.clone());
        Some(element)
    }
}

fn positive_or(value: i32, fallback: i32) -> i32 {
    if value > 0 { value } else { fallback }
}

/// Serialize the layer list, in order.
pub fn serialize_layout(document: &LayoutDocument) -> Result<String, serde_json::Error> {
    let records: Vec<LayoutRecord> = document.iter().map(LayoutRecord::from_element).collect();
    serde_json::to_string(&records)
}

/// Parse a stored blob into records. Anything that is not a JSON array
/// yields no records; individual malformed records are skipped.
pub fn parse_records(json: &str) -> Vec<LayoutRecord> {
    let values = match serde_json::from_str::<Vec<Value>>(json) {
        Ok(values) => values,
        Err(e) => {
            log::warn!("Ignoring malformed layout: {}", e);
            return Vec::new();
        }
    };

    values
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value::<LayoutRecord>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Skipping layout record {}: {}", i, e);
                None
            }
        })
        .collect()
}

/// Append the elements stored in `json` to `document` in saved order.
/// Returns the number of elements restored.
pub fn restore_layout(document: &mut LayoutDocument, json: &str) -> usize {
    let mut restored = 0;
    for record in parse_records(json) {
        match record.to_element() {
            Some(element) => {
                document.restore(element);
                restored += 1;
            }
            None => log::warn!("Skipping {} element with index {}", record.kind, record.index),
        }
    }
    restored
}

/// Format a pixel value the way styles store it.
pub fn format_px(value: i32) -> String {
    format!("{}px", value)
}

/// Parse the leading integer of a style value (`"50px"`, `" -3"`, `"12.7"`).
/// Anything without a leading integer is 0. Results are capped to
/// `±MAX_COORDINATE`, however many digits the input has.
pub fn parse_px(value: &str) -> i32 {
    let s = value.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i32, |acc, d| acc.saturating_mul(10).saturating_add((d - b'0') as i32))
        .min(MAX_COORDINATE);
    if negative { -magnitude } else { magnitude }
}

/// Accept integers stored as numbers, numeric strings, or nothing at all.
fn lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64))
            .unwrap_or(0),
        Value::String(s) => parse_px(&s) as i64,
        Value::Bool(b) => b as i64,
        _ => 0,
    })
}
