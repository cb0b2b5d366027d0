use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::attribute::attribute_model::{
    CODE_LOC_KEY, CONTEXT_KEY, HEIGHT_KEY, NAME_KEY, PATH_KEY, SUFFIX_KEY, TEXT_KEY, TYPE_KEY,
    WIDTH_KEY, X_KEY, Y_KEY,
};
use crate::attribute::{Attribute, AttributeDifference, AttributeValue};
use crate::error::{Result, RetestError};
use crate::identity::AttributeWeights;
use crate::path::{Path, PathElement};
use crate::util::checksum::sha256_str;
use crate::util::similarity::strip_trailing_suffix;

/// Keys that make up an element's identity
pub const IDENTIFYING_KEYS: [&str; 11] = [
    PATH_KEY,
    TYPE_KEY,
    NAME_KEY,
    TEXT_KEY,
    CODE_LOC_KEY,
    X_KEY,
    Y_KEY,
    HEIGHT_KEY,
    WIDTH_KEY,
    CONTEXT_KEY,
    SUFFIX_KEY,
];

/// Match sum of two identical identities built by [`IdentifyingAttributes::create`]
/// (`path`, `type` and `suffix`, one each).
pub const PERFECT_SIMILARITY: f64 = 3.0;

/// Match scores above this count as equal.
pub const EQUALITY_THRESHOLD: f64 = 1.0 - 1e-15;

const FULL_STRING_SEPARATOR: &str = " # ";

/// The attributes that tell which UI element this is across captures.
///
/// Always holds a `path`. When the path's trailing element carries a suffix
/// and no explicit `suffix` attribute is given, one is derived from it: a
/// numeric suffix becomes an index, any other suffix stays text.
///
/// Weights applied through [`with_weights`](Self::with_weights) are kept and
/// given to attributes that later changes add or re-derive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Attribute>", into = "Vec<Attribute>")]
pub struct IdentifyingAttributes {
    attributes: BTreeMap<String, Attribute>,
    path: Path,
    weights: AttributeWeights,
}

impl IdentifyingAttributes {
    pub fn new(attributes: impl IntoIterator<Item = Attribute>) -> Result<Self> {
        let attributes = attributes
            .into_iter()
            .map(|attribute| (attribute.key().to_string(), attribute))
            .collect();
        Self::from_map(attributes, true, AttributeWeights::default())
    }

    /// Identity of a `type_name` element at `path`.
    pub fn create(path: Path, type_name: &str) -> Result<Self> {
        Self::new([
            Attribute::path(path),
            Attribute::new(TYPE_KEY, type_name),
        ])
    }

    pub fn create_weighted(path: Path, type_name: &str, weights: &AttributeWeights) -> Result<Self> {
        Ok(Self::create(path, type_name)?.with_weights(weights))
    }

    fn from_map(
        mut attributes: BTreeMap<String, Attribute>,
        derive_suffix: bool,
        weights: AttributeWeights,
    ) -> Result<Self> {
        let path_attribute = attributes
            .remove(PATH_KEY)
            .ok_or(RetestError::MissingField(PATH_KEY))?;
        let path_attribute = Attribute::for_key(PATH_KEY, path_attribute.value().clone())?
            .with_weight(path_attribute.weight());

        let path = match path_attribute.value() {
            AttributeValue::Path(path) => path.clone(),
            other => {
                return Err(RetestError::IncompatibleValue {
                    key: PATH_KEY.to_string(),
                    value: other.to_string(),
                    expected: "path",
                });
            }
        };
        attributes.insert(PATH_KEY.to_string(), path_attribute);

        if derive_suffix && !attributes.contains_key(SUFFIX_KEY) {
            if let Some(suffix) = path.element().and_then(suffix_attribute) {
                let suffix = suffix.with_weight(weights.weight_for(SUFFIX_KEY));
                attributes.insert(SUFFIX_KEY.to_string(), suffix);
            }
        }

        Ok(Self {
            attributes,
            path,
            weights,
        })
    }

    /// Copy with every attribute weighted per `weights`.
    pub fn with_weights(&self, weights: &AttributeWeights) -> Self {
        let attributes = self
            .attributes
            .iter()
            .map(|(key, attribute)| {
                (key.clone(), attribute.clone().with_weight(weights.weight_for(key)))
            })
            .collect();
        Self {
            attributes,
            path: self.path.clone(),
            weights: weights.clone(),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn weights(&self) -> &AttributeWeights {
        &self.weights
    }

    pub fn parent_path(&self) -> Option<Path> {
        self.path.parent_path()
    }

    pub fn path_element(&self) -> Option<&PathElement> {
        self.path.element()
    }

    pub fn type_name(&self) -> Option<&str> {
        self.get(TYPE_KEY).and_then(AttributeValue::as_text)
    }

    /// Type name after its last `.`, e.g. `JButton` for `javax.swing.JButton`.
    pub fn simple_type(&self) -> Option<&str> {
        self.type_name()
            .map(|type_name| type_name.rsplit('.').next().unwrap_or(type_name))
    }

    pub fn suffix(&self) -> Option<&AttributeValue> {
        self.get(SUFFIX_KEY)
    }

    pub fn context(&self) -> Option<&str> {
        self.get(CONTEXT_KEY).and_then(AttributeValue::as_text)
    }

    pub fn text(&self) -> Option<&str> {
        self.get(TEXT_KEY).and_then(AttributeValue::as_text)
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key).map(Attribute::value)
    }

    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes.get(key)
    }

    /// All attributes, sorted by key.
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.values()
    }

    /// Parent path, type and suffix joined by ` # `.
    pub fn to_full_string(&self) -> String {
        let parent = self.parent_path().map(|path| path.to_string()).unwrap_or_default();
        let type_name = self.type_name().unwrap_or_default();
        let suffix = self.suffix().map(ToString::to_string).unwrap_or_default();
        [parent.as_str(), type_name, suffix.as_str()].join(FULL_STRING_SEPARATOR)
    }

    /// SHA-256 of [`to_full_string`](Self::to_full_string).
    pub fn identifier(&self) -> String {
        sha256_str(&self.to_full_string())
    }

    // ------------------------------------------------------------------
    // Matching
    // ------------------------------------------------------------------

    /// Weighted similarity in `[0, 1]`, symmetric in its arguments.
    ///
    /// Shared keys contribute `weight * similarity` with the larger of both
    /// weights; keys present on one side only contribute their weight to the
    /// normalizer alone.
    pub fn match_score(&self, other: &IdentifyingAttributes) -> Result<f64> {
        let mut similarity = 0.0;
        let mut normalizer = 0.0;

        for (key, attribute) in &self.attributes {
            match other.attributes.get(key) {
                Some(counterpart) => {
                    let weight = attribute.weight().max(counterpart.weight());
                    normalizer += weight;
                    similarity += weight * attribute.match_score(counterpart);
                }
                None => normalizer += attribute.weight(),
            }
        }
        for (key, attribute) in &other.attributes {
            if !self.attributes.contains_key(key) {
                normalizer += attribute.weight();
            }
        }

        if normalizer <= 0.0 {
            return Err(RetestError::ZeroWeightNormalizer);
        }
        Ok(similarity / normalizer)
    }

    /// Lexicographic over the sorted attributes.
    pub fn compare(&self, other: &IdentifyingAttributes) -> Ordering {
        self.attributes.values().cmp(other.attributes.values())
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// New identity with `changes` applied. A changed path re-derives the
    /// suffix unless the changes set one explicitly.
    pub fn apply_changes(&self, changes: &BTreeSet<AttributeDifference>) -> Result<Self> {
        if changes.is_empty() {
            return Ok(self.clone());
        }

        let mut attributes = self.attributes.clone();
        for change in changes {
            let current = attributes.get(change.key());
            let created = current.is_none();
            match change.apply_change_to(current)? {
                Some(updated) => {
                    let updated = if created {
                        updated.with_weight(self.weights.weight_for(change.key()))
                    } else {
                        updated
                    };
                    attributes.insert(change.key().to_string(), updated);
                }
                None if change.key() == PATH_KEY => {
                    return Err(RetestError::MissingField(PATH_KEY));
                }
                None => {
                    attributes.remove(change.key());
                }
            }
        }

        let path_changed = attributes
            .get(PATH_KEY)
            .and_then(|attribute| attribute.value().as_path())
            .is_some_and(|path| *path != self.path);
        let suffix_changed = changes.iter().any(|change| change.key() == SUFFIX_KEY);

        if path_changed && !suffix_changed {
            attributes.remove(SUFFIX_KEY);
            Self::from_map(attributes, true, self.weights.clone())
        } else {
            Self::from_map(attributes, false, self.weights.clone())
        }
    }

    fn weighted_keys(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .values()
            .filter(|attribute| attribute.weight() > 0.0)
            .map(Attribute::key)
    }
}

fn suffix_attribute(element: &PathElement) -> Option<Attribute> {
    if !element.has_suffix() {
        return None;
    }
    Some(match element.index() {
        Some(index) => Attribute::suffix(index),
        None => Attribute::new(SUFFIX_KEY, element.suffix()),
    })
}

/// Equal identities weight the same keys and match above
/// [`EQUALITY_THRESHOLD`].
impl PartialEq for IdentifyingAttributes {
    fn eq(&self, other: &Self) -> bool {
        if !self.weighted_keys().eq(other.weighted_keys()) {
            return false;
        }
        match self.match_score(other) {
            Ok(score) => score > EQUALITY_THRESHOLD,
            Err(_) => self.attributes == other.attributes,
        }
    }
}

impl Eq for IdentifyingAttributes {}

/// Hashes positive-weight attributes only, paths without their trailing
/// suffix, so identities equal by match score hash alike.
impl Hash for IdentifyingAttributes {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for (key, attribute) in &self.attributes {
            if attribute.weight() <= 0.0 {
                continue;
            }
            key.hash(state);
            match attribute.value() {
                AttributeValue::Path(path) => {
                    strip_trailing_suffix(&path.to_string()).hash(state);
                }
                value => value.hash(state),
            }
        }
    }
}

impl fmt::Display for IdentifyingAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_type().unwrap_or_default())?;
        if let Some(text) = self.text() {
            write!(f, " [{text}]")?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<Attribute>> for IdentifyingAttributes {
    type Error = RetestError;

    fn try_from(attributes: Vec<Attribute>) -> Result<Self> {
        Self::new(attributes)
    }
}

impl From<IdentifyingAttributes> for Vec<Attribute> {
    fn from(identity: IdentifyingAttributes) -> Self {
        identity.attributes.into_values().collect()
    }
}
