//! One-shot exports of the current layout.

use crate::document::LayoutDocument;
use crate::element::Element;
use std::fmt::Write as _;

pub const NAMES_FILE_NAME: &str = "design.json";
pub const HTML_FILE_NAME: &str = "design.html";

/// A file offered to the user for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub contents: String,
}

impl ExportFile {
    /// Pretty-printed JSON array of element names, in list order.
    pub fn names(document: &LayoutDocument) -> Result<Self, serde_json::Error> {
        Ok(Self {
            file_name: NAMES_FILE_NAME,
            mime_type: "application/json",
            contents: export_names_json(document)?,
        })
    }

    /// Static positioned HTML fragment.
    pub fn html(document: &LayoutDocument) -> Self {
        Self {
            file_name: HTML_FILE_NAME,
            mime_type: "text/html",
            contents: export_html(document),
        }
    }
}

pub fn export_names_json(document: &LayoutDocument) -> Result<String, serde_json::Error> {
    let names: Vec<String> = document.iter().map(Element::name).collect();
    serde_json::to_string_pretty(&names)
}

/// Render every element as an absolutely positioned `<div>` inside a
/// relatively positioned container.
pub fn export_html(document: &LayoutDocument) -> String {
    let mut html = String::from("<div style='position:relative'>");
    for el in document.iter() {
        // Writing to a String cannot fail.
        let _ = write!(
            html,
            "<div style=\"position:absolute;left:{}px;top:{}px;width:{}px;height:{}px;\
             background:{};border-radius:{}px;transform:rotate({}deg);z-index:{};\">{}</div>",
            el.left,
            el.top,
            el.width,
            el.height,
            escape_attr(&el.background_color),
            el.border_radius,
            el.rotation,
            el.z_index(),
            escape_html(el.text.as_deref().unwrap_or_default()),
        );
    }
    html.push_str("</div>");
    html
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attr(value: &str) -> String {
    escape_html(value).replace('"', "&quot;")
}
