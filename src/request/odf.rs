//! ODF object paths and the `Objects` tree built from them

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Root element of every ODF tree
pub const ODF_ROOT: &str = "Objects";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OdfPathError {
    #[error("path is empty")]
    Empty,
    #[error("path '{0}' names no object above the info item")]
    MissingObject(String),
}

/// Path from the `Objects` root to an InfoItem.
///
/// Stored without the root; the last segment is the InfoItem name and the
/// rest are nested Object ids.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OdfPath {
    segments: Vec<String>,
}

impl OdfPath {
    /// Object ids from outermost to innermost
    pub fn objects(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }

    pub fn info_item(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }
}

impl FromStr for OdfPath {
    type Err = OdfPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments: Vec<String> = s
            .split('/')
            .map(str::trim)
            .filter(|seg| !seg.is_empty())
            .map(str::to_string)
            .collect();

        if segments.first().map(String::as_str) == Some(ODF_ROOT) {
            segments.remove(0);
        }

        match segments.len() {
            0 => Err(OdfPathError::Empty),
            1 => Err(OdfPathError::MissingObject(s.trim().to_string())),
            _ => Ok(Self { segments }),
        }
    }
}

impl TryFrom<String> for OdfPath {
    type Error = OdfPathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OdfPath> for String {
    fn from(path: OdfPath) -> Self {
        path.to_string()
    }
}

impl fmt::Display for OdfPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", ODF_ROOT, self.segments.join("/"))
    }
}

/// Escape text for use in XML content and attribute values
pub fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Debug, Default)]
struct ObjectNode {
    children: BTreeMap<String, ObjectNode>,
    info_items: BTreeSet<String>,
}

impl ObjectNode {
    fn write(&self, id: &str, depth: usize, out: &mut String) {
        let pad = "  ".repeat(depth);
        out.push_str(&format!("{pad}<Object>\n"));
        out.push_str(&format!("{pad}  <id>{}</id>\n", escape_xml(id)));
        for item in &self.info_items {
            out.push_str(&format!("{pad}  <InfoItem name=\"{}\"/>\n", escape_xml(item)));
        }
        for (child_id, child) in &self.children {
            child.write(child_id, depth + 1, out);
        }
        out.push_str(&format!("{pad}</Object>\n"));
    }
}

/// Merge paths into the `<Object>` elements that go inside `<Objects>`.
///
/// Shared prefixes become a single Object; siblings are sorted by id and
/// duplicate paths collapse. Each line is indented from `depth`.
pub fn objects_xml<'a>(paths: impl IntoIterator<Item = &'a OdfPath>, depth: usize) -> String {
    let mut root = ObjectNode::default();
    for path in paths {
        let mut node = &mut root;
        for id in path.objects() {
            node = node.children.entry(id.clone()).or_default();
        }
        node.info_items.insert(path.info_item().to_string());
    }

    let mut out = String::new();
    for (id, node) in &root.children {
        node.write(id, depth, &mut out);
    }
    out
}
