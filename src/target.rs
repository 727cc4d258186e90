//! Pointer-down targets and the `cancel` selector.
//!
//! The host describes where a pointer-down landed as a path of elements,
//! innermost first, ending at the element that owns the gesture (a list item
//! or a draggable box). A [`Selector`] such as `"button, .no-drag"` is matched
//! against every element on that path, the same way `closest()` would.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A host element as far as selector matching is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Where a pointer-down landed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventTarget {
    /// Innermost element first; the gesture owner is last.
    pub path: Vec<Element>,
    /// Index of the sortable item that owns the target, when the host knows it.
    pub item: Option<usize>,
}

impl EventTarget {
    pub fn new(path: Vec<Element>) -> Self {
        Self { path, item: None }
    }

    /// A target with no element information; never matches a selector.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn in_item(mut self, index: usize) -> Self {
        self.item = Some(index);
        self
    }

    /// Whether any element on the path matches `selector`.
    pub fn closest_matches(&self, selector: &Selector) -> bool {
        self.path.iter().any(|element| selector.matches(element))
    }
}

/// One compound selector, e.g. `button.icon#close`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(source: &str) -> Option<Self> {
        let mut compound = Compound::default();
        let mut rest = source;

        let tag_len = rest.find(['.', '#']).unwrap_or(rest.len());
        if tag_len > 0 {
            let tag = &rest[..tag_len];
            if tag != "*" {
                compound.tag = Some(tag.to_ascii_lowercase());
            }
        }
        rest = &rest[tag_len..];

        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let len = body.find(['.', '#']).unwrap_or(body.len());
            if len == 0 {
                return None;
            }
            let name = body[..len].to_string();
            match marker {
                '.' => compound.classes.push(name),
                '#' => compound.id = Some(name),
                _ => return None,
            }
            rest = &body[len..];
        }

        Some(compound)
    }

    fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|class| element.has_class(class))
    }
}

/// A comma-separated list of simple compound selectors.
///
/// Supports tag names, `*`, `.class` and `#id` in any combination. Unparsable
/// alternatives are dropped, so a malformed selector matches less rather than
/// failing.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Selector {
    source: String,
    alternatives: Vec<Compound>,
}

impl Selector {
    pub fn parse(source: &str) -> Self {
        let alternatives = source
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .filter_map(Compound::parse)
            .collect();
        Self {
            source: source.to_string(),
            alternatives,
        }
    }

    pub fn matches(&self, element: &Element) -> bool {
        self.alternatives.iter().any(|alt| alt.matches(element))
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Selector({:?})", self.source)
    }
}

impl From<&str> for Selector {
    fn from(source: &str) -> Self {
        Selector::parse(source)
    }
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for Selector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Ok(Selector::parse(&source))
    }
}
