use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::attribute::AttributeDifference;
use crate::element::Element;
use crate::identity::IdentifyingAttributes;
use crate::path::Path;

static NO_CHANGES: BTreeSet<AttributeDifference> = BTreeSet::new();

/// Attribute differences grouped by the identity of the element they belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<AttributeChangeEntry>", into = "Vec<AttributeChangeEntry>")]
pub struct AttributeChanges {
    changes: HashMap<IdentifyingAttributes, BTreeSet<AttributeDifference>>,
}

/// Serialized form of one [`AttributeChanges`] group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeChangeEntry {
    pub identifying_attributes: IdentifyingAttributes,
    pub differences: BTreeSet<AttributeDifference>,
}

impl AttributeChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, identity: IdentifyingAttributes, difference: AttributeDifference) {
        self.changes.entry(identity).or_default().insert(difference);
    }

    /// Differences recorded for `identity`; empty when there are none.
    pub fn get_all(&self, identity: &IdentifyingAttributes) -> &BTreeSet<AttributeDifference> {
        self.changes.get(identity).unwrap_or(&NO_CHANGES)
    }

    pub fn contains(&self, identity: &IdentifyingAttributes) -> bool {
        self.changes.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of differences across all elements.
    pub fn difference_count(&self) -> usize {
        self.changes.values().map(BTreeSet::len).sum()
    }
}

impl From<Vec<AttributeChangeEntry>> for AttributeChanges {
    fn from(entries: Vec<AttributeChangeEntry>) -> Self {
        let mut changes = Self::new();
        for entry in entries {
            for difference in entry.differences {
                changes.add(entry.identifying_attributes.clone(), difference);
            }
        }
        changes
    }
}

impl From<AttributeChanges> for Vec<AttributeChangeEntry> {
    fn from(changes: AttributeChanges) -> Self {
        let mut entries: Vec<AttributeChangeEntry> = changes
            .changes
            .into_iter()
            .map(|(identifying_attributes, differences)| AttributeChangeEntry {
                identifying_attributes,
                differences,
            })
            .collect();
        entries.sort_by(|a, b| a.identifying_attributes.compare(&b.identifying_attributes));
        entries
    }
}

/// A diff between two captures, consumed by [`Element::apply_changes`].
///
/// Applying it records the path rewrites it propagates to descendants, so
/// use a change set for one application only. Deletions keep the order in
/// which they were added.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionChangeSet {
    #[serde(default)]
    identifying_changes: AttributeChanges,
    #[serde(default)]
    attribute_changes: AttributeChanges,
    #[serde(default)]
    deleted: Vec<IdentifyingAttributes>,
    #[serde(default)]
    inserted: Vec<Element>,
}

impl ActionChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_identifying_change(
        &mut self,
        identity: IdentifyingAttributes,
        difference: AttributeDifference,
    ) {
        self.identifying_changes.add(identity, difference);
    }

    pub fn add_attribute_change(
        &mut self,
        identity: IdentifyingAttributes,
        difference: AttributeDifference,
    ) {
        self.attribute_changes.add(identity, difference);
    }

    pub fn add_deleted(&mut self, identity: IdentifyingAttributes) {
        if !self.deleted.contains(&identity) {
            self.deleted.push(identity);
        }
    }

    pub fn add_inserted(&mut self, element: Element) {
        self.inserted.push(element);
    }

    pub fn identifying_changes(&self) -> &AttributeChanges {
        &self.identifying_changes
    }

    pub fn attribute_changes(&self) -> &AttributeChanges {
        &self.attribute_changes
    }

    pub fn is_deleted(&self, identity: &IdentifyingAttributes) -> bool {
        self.deleted.contains(identity)
    }

    pub fn deleted(&self) -> &[IdentifyingAttributes] {
        &self.deleted
    }

    pub fn inserted(&self) -> &[Element] {
        &self.inserted
    }

    /// Inserted elements whose parent path is `parent`.
    pub fn insertions_under<'a>(&'a self, parent: &'a Path) -> impl Iterator<Item = &'a Element> {
        self.inserted
            .iter()
            .filter(move |element| element.path().parent_path().as_ref() == Some(parent))
    }

    pub fn is_empty(&self) -> bool {
        self.identifying_changes.is_empty()
            && self.attribute_changes.is_empty()
            && self.deleted.is_empty()
            && self.inserted.is_empty()
    }
}
