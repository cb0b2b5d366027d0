use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::attribute::Attributes;
use crate::error::{Result, RetestError};
use crate::identity::IdentifyingAttributes;
use crate::path::Path;
use crate::util::retest_id::is_valid_retest_id;

// ============================================================================
// Retest id
// ============================================================================

/// Validated, human-legible element id: non-empty, made of ASCII letters,
/// digits, `_` and `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RetestId(String);

impl RetestId {
    /// Surrounding whitespace is trimmed before validation.
    pub fn new(id: &str) -> Result<Self> {
        let id = id.trim();
        if !is_valid_retest_id(id) {
            return Err(RetestError::InvalidRetestId { id: id.to_string() });
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RetestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RetestId {
    type Error = RetestError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<RetestId> for String {
    fn from(id: RetestId) -> Self {
        id.0
    }
}

// ============================================================================
// Screenshot
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    Png,
    Jpeg,
}

/// Reference to a stored screenshot; its content is never examined here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Screenshot {
    pub persisted_id: String,
    pub image_type: ImageType,
}

impl Screenshot {
    pub fn new(persisted_id: &str, image_type: ImageType) -> Self {
        Self {
            persisted_id: persisted_id.to_string(),
            image_type,
        }
    }
}

// ============================================================================
// Element
// ============================================================================

/// A node of a captured UI tree.
///
/// Immutable after construction apart from the screenshot, which can be set
/// once. Every child's path extends this element's path by one element.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ElementRecord", into = "ElementRecord")]
pub struct Element {
    pub(super) retest_id: RetestId,
    pub(super) identifying_attributes: IdentifyingAttributes,
    pub(super) attributes: Attributes,
    pub(super) children: Vec<Element>,
    pub(super) screenshot: Option<Screenshot>,
}

impl Element {
    pub fn new(
        retest_id: RetestId,
        identifying_attributes: IdentifyingAttributes,
        attributes: Attributes,
        children: Vec<Element>,
    ) -> Result<Self> {
        let path = identifying_attributes.path();
        if let Some(stray) = children
            .iter()
            .find(|child| child.path().parent_path().as_ref() != Some(path))
        {
            return Err(RetestError::ChildPathMismatch {
                parent: path.to_string(),
                child: stray.path().to_string(),
            });
        }

        Ok(Self {
            retest_id,
            identifying_attributes,
            attributes,
            children,
            screenshot: None,
        })
    }

    pub fn leaf(
        retest_id: RetestId,
        identifying_attributes: IdentifyingAttributes,
        attributes: Attributes,
    ) -> Self {
        Self {
            retest_id,
            identifying_attributes,
            attributes,
            children: Vec::new(),
            screenshot: None,
        }
    }

    pub fn retest_id(&self) -> &RetestId {
        &self.retest_id
    }

    pub fn identifying_attributes(&self) -> &IdentifyingAttributes {
        &self.identifying_attributes
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn path(&self) -> &Path {
        self.identifying_attributes.path()
    }

    pub fn screenshot(&self) -> Option<&Screenshot> {
        self.screenshot.as_ref()
    }

    /// Screenshots go from empty to set exactly once. Setting the same
    /// screenshot again, or nothing on an empty slot, is a no-op.
    pub fn set_screenshot(&mut self, screenshot: Option<Screenshot>) -> Result<()> {
        match (&self.screenshot, screenshot) {
            (None, screenshot) => {
                self.screenshot = screenshot;
                Ok(())
            }
            (Some(current), Some(screenshot)) if *current == screenshot => Ok(()),
            (Some(_), _) => Err(RetestError::ScreenshotAlreadySet),
        }
    }

    /// Depth-first lookup. Only descends into subtrees whose path contains
    /// `path`.
    pub fn find_element(&self, path: &Path) -> Option<&Element> {
        if self.path() == path {
            return Some(self);
        }
        if !self.path().is_parent(path) {
            return None;
        }
        self.children
            .iter()
            .find_map(|child| child.find_element(path))
    }

    /// This element plus all descendants.
    pub fn count_all_contained_elements(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(Element::count_all_contained_elements)
            .sum::<usize>()
    }

    /// Path of every descendant mapped to its parent's path.
    pub fn parent_index(&self) -> HashMap<Path, Path> {
        let mut index = HashMap::new();
        self.collect_parents(&mut index);
        index
    }

    fn collect_parents(&self, index: &mut HashMap<Path, Path>) {
        for child in &self.children {
            index.insert(child.path().clone(), self.path().clone());
            child.collect_parents(index);
        }
    }

    /// Structural order: identity, then state attributes, then children.
    pub fn compare(&self, other: &Element) -> Ordering {
        self.identifying_attributes
            .compare(&other.identifying_attributes)
            .then_with(|| self.attributes.cmp(&other.attributes))
            .then_with(|| {
                let mut mine = self.children.iter();
                let mut theirs = other.children.iter();
                loop {
                    match (mine.next(), theirs.next()) {
                        (None, None) => return Ordering::Equal,
                        (None, Some(_)) => return Ordering::Less,
                        (Some(_), None) => return Ordering::Greater,
                        (Some(a), Some(b)) => match a.compare(b) {
                            Ordering::Equal => continue,
                            unequal => return unequal,
                        },
                    }
                }
            })
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.identifying_attributes == other.identifying_attributes
            && self.attributes == other.attributes
            && self.children == other.children
    }
}

impl Eq for Element {}

impl Hash for Element {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifying_attributes.hash(state);
        self.attributes.hash(state);
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifying_attributes)
    }
}

// ============================================================================
// Serialized form
// ============================================================================

#[derive(Serialize, Deserialize)]
struct ElementRecord {
    retest_id: RetestId,
    identifying_attributes: IdentifyingAttributes,
    #[serde(default)]
    attributes: Attributes,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Element>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    screenshot: Option<Screenshot>,
}

impl TryFrom<ElementRecord> for Element {
    type Error = RetestError;

    fn try_from(record: ElementRecord) -> Result<Self> {
        let mut element = Element::new(
            record.retest_id,
            record.identifying_attributes,
            record.attributes,
            record.children,
        )?;
        element.screenshot = record.screenshot;
        Ok(element)
    }
}

impl From<Element> for ElementRecord {
    fn from(element: Element) -> Self {
        Self {
            retest_id: element.retest_id,
            identifying_attributes: element.identifying_attributes,
            attributes: element.attributes,
            children: element.children,
            screenshot: element.screenshot,
        }
    }
}
