use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::attribute::{Attribute, AttributeDifference, AttributeValue, DefaultValueFinder};
use crate::error::Result;
use crate::identity::IdentifyingAttributes;

/// State attributes of an element (font, colour, geometry...), keyed and
/// ordered by attribute key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Vec<Attribute>", into = "Vec<Attribute>")]
pub struct Attributes {
    attributes: BTreeMap<String, Attribute>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `attribute`, replacing one with the same key.
    pub fn with(mut self, attribute: Attribute) -> Self {
        self.attributes.insert(attribute.key().to_string(), attribute);
        self
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key).map(Attribute::value)
    }

    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.values()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// New container with every difference applied; an empty set returns an
    /// identical copy.
    pub fn apply_changes(&self, changes: &BTreeSet<AttributeDifference>) -> Result<Attributes> {
        let mut attributes = self.attributes.clone();
        for change in changes {
            match change.apply_change_to(attributes.get(change.key()))? {
                Some(updated) => {
                    attributes.insert(change.key().to_string(), updated);
                }
                None => {
                    attributes.remove(change.key());
                }
            }
        }
        Ok(Self { attributes })
    }

    /// Copy without the attributes whose value equals the toolkit default.
    pub fn without_defaults(
        &self,
        identity: &IdentifyingAttributes,
        finder: &dyn DefaultValueFinder,
    ) -> Attributes {
        self.iter()
            .filter(|attribute| !finder.is_default(identity, attribute.key(), attribute.value()))
            .cloned()
            .collect()
    }

    /// Stored value for `key`, falling back to the toolkit default.
    pub fn get_or_default(
        &self,
        key: &str,
        identity: &IdentifyingAttributes,
        finder: &dyn DefaultValueFinder,
    ) -> Option<AttributeValue> {
        self.get(key)
            .cloned()
            .or_else(|| finder.default_value(identity, key))
    }
}

impl FromIterator<Attribute> for Attributes {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Attributes::with)
    }
}

impl From<Vec<Attribute>> for Attributes {
    fn from(attributes: Vec<Attribute>) -> Self {
        attributes.into_iter().collect()
    }
}

impl From<Attributes> for Vec<Attribute> {
    fn from(attributes: Attributes) -> Self {
        attributes.attributes.into_values().collect()
    }
}
