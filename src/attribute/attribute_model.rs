use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem::discriminant;

use serde::{Deserialize, Serialize};

use crate::attribute::parameter_type::{ParameterTypeRegistry, parse_flag};
use crate::error::{Result, RetestError};
use crate::path::Path;
use crate::util::similarity::{path_similarity, text_similarity};

// ============================================================================
// Well-known keys
// ============================================================================

pub const PATH_KEY: &str = "path";
pub const TYPE_KEY: &str = "type";
pub const NAME_KEY: &str = "name";
pub const TEXT_KEY: &str = "text";
pub const CODE_LOC_KEY: &str = "codeLoc";
pub const X_KEY: &str = "x";
pub const Y_KEY: &str = "y";
pub const HEIGHT_KEY: &str = "height";
pub const WIDTH_KEY: &str = "width";
pub const CONTEXT_KEY: &str = "context";
/// Implicit key, derived from the trailing element of the path
pub const SUFFIX_KEY: &str = "suffix";

pub const NORMAL_WEIGHT: f64 = 1.0;
pub const IGNORE_WEIGHT: f64 = 0.0;

// ============================================================================
// Values
// ============================================================================

/// Typed value of an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeValue {
    /// Free text, class names, anything compared as a string
    Generic(String),
    /// Hierarchical element address
    Path(Path),
    /// Sibling index taken from a path's trailing element
    Suffix(i32),
    Flag(bool),
    Number(i64),
}

impl AttributeValue {
    /// Similarity of two values in `[0, 1]`, ignoring any weight.
    /// Values of different variants never match.
    pub fn similarity(&self, other: &AttributeValue) -> f64 {
        use AttributeValue as V;

        match (self, other) {
            (V::Generic(a), V::Generic(b)) => text_similarity(Some(a.as_str()), Some(b.as_str())),
            (V::Path(a), V::Path(b)) => {
                path_similarity(Some(a.to_string().as_str()), Some(b.to_string().as_str()))
            }
            (V::Suffix(a), V::Suffix(b)) => exact(a == b),
            (V::Flag(a), V::Flag(b)) => exact(a == b),
            (V::Number(a), V::Number(b)) => exact(a == b),
            _ => 0.0,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            AttributeValue::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Generic(text) => Some(text),
            _ => None,
        }
    }

    /// Empty or whitespace-only text.
    pub fn is_blank(&self) -> bool {
        matches!(self, AttributeValue::Generic(text) if text.trim().is_empty())
    }

    fn variant_name(&self) -> &'static str {
        match self {
            AttributeValue::Generic(_) => "text",
            AttributeValue::Path(_) => "path",
            AttributeValue::Suffix(_) => "suffix index",
            AttributeValue::Flag(_) => "boolean",
            AttributeValue::Number(_) => "integer",
        }
    }
}

fn exact(equal: bool) -> f64 {
    if equal { 1.0 } else { 0.0 }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Generic(text) => write!(f, "{text}"),
            AttributeValue::Path(path) => write!(f, "{path}"),
            AttributeValue::Suffix(index) => write!(f, "{index}"),
            AttributeValue::Flag(flag) => write!(f, "{flag}"),
            AttributeValue::Number(number) => write!(f, "{number}"),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(text: &str) -> Self {
        AttributeValue::Generic(text.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(text: String) -> Self {
        AttributeValue::Generic(text)
    }
}

impl From<Path> for AttributeValue {
    fn from(path: Path) -> Self {
        AttributeValue::Path(path)
    }
}

impl From<bool> for AttributeValue {
    fn from(flag: bool) -> Self {
        AttributeValue::Flag(flag)
    }
}

impl From<i64> for AttributeValue {
    fn from(number: i64) -> Self {
        AttributeValue::Number(number)
    }
}

// ============================================================================
// Attribute
// ============================================================================

/// A weighted key/value pair.
///
/// Equality, ordering and hashing look at key and value only; the weight is
/// a matching parameter, not part of the attribute's identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribute {
    key: String,
    value: AttributeValue,
    #[serde(default = "normal_weight")]
    weight: f64,
}

fn normal_weight() -> f64 {
    NORMAL_WEIGHT
}

impl Attribute {
    pub fn new(key: &str, value: impl Into<AttributeValue>) -> Self {
        Self::weighted(key, value, NORMAL_WEIGHT)
    }

    /// Negative or NaN weights are stored as [`IGNORE_WEIGHT`].
    pub fn weighted(key: &str, value: impl Into<AttributeValue>, weight: f64) -> Self {
        Self {
            key: key.to_string(),
            value: value.into(),
            weight: if weight >= 0.0 { weight } else { IGNORE_WEIGHT },
        }
    }

    pub fn path(path: Path) -> Self {
        Self::new(PATH_KEY, path)
    }

    pub fn suffix(index: i32) -> Self {
        Self::new(SUFFIX_KEY, AttributeValue::Suffix(index))
    }

    /// Attribute for `key`, converting text into the variant the key implies
    /// (`path` holds a [`Path`], a numeric `suffix` an index).
    pub fn for_key(key: &str, value: AttributeValue) -> Result<Self> {
        let value = match (key, value) {
            (PATH_KEY, AttributeValue::Generic(raw)) => AttributeValue::Path(raw.parse()?),
            (SUFFIX_KEY, AttributeValue::Generic(raw)) => match raw.trim().parse() {
                Ok(index) => AttributeValue::Suffix(index),
                Err(_) => AttributeValue::Generic(raw),
            },
            (_, value) => value,
        };
        Ok(Self::new(key, value))
    }

    /// Parse `raw` with the parameter type registered as `type_name`.
    pub fn parse(
        registry: &ParameterTypeRegistry,
        key: &str,
        type_name: &str,
        raw: &str,
    ) -> Result<Self> {
        let value = registry.parse(type_name, raw)?;
        Ok(Self::new(key, value))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &AttributeValue {
        &self.value
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = if weight >= 0.0 { weight } else { IGNORE_WEIGHT };
        self
    }

    /// Value similarity in `[0, 1]`; symmetric and weight-free.
    pub fn match_score(&self, other: &Attribute) -> f64 {
        self.value.similarity(&other.value)
    }

    /// Copy of this attribute holding `value`, converted into the current
    /// variant where a lossless conversion exists.
    pub fn with_value(&self, value: AttributeValue) -> Result<Attribute> {
        Ok(Self {
            key: self.key.clone(),
            value: self.coerce(value)?,
            weight: self.weight,
        })
    }

    fn coerce(&self, value: AttributeValue) -> Result<AttributeValue> {
        use AttributeValue as V;

        if discriminant(&self.value) == discriminant(&value) {
            return Ok(value);
        }

        let converted = match (&self.value, &value) {
            (V::Generic(_), other) => Some(V::Generic(other.to_string())),
            (V::Path(_), V::Generic(raw)) => Some(V::Path(raw.parse()?)),
            (V::Suffix(_), V::Generic(raw)) => raw.trim().parse().ok().map(V::Suffix),
            (V::Suffix(_), V::Number(number)) => i32::try_from(*number).ok().map(V::Suffix),
            (V::Number(_), V::Generic(raw)) => raw.trim().parse().ok().map(V::Number),
            (V::Number(_), V::Suffix(index)) => Some(V::Number(i64::from(*index))),
            (V::Flag(_), V::Generic(raw)) => parse_flag(raw).map(V::Flag),
            _ => None,
        };

        converted.ok_or_else(|| RetestError::IncompatibleValue {
            key: self.key.clone(),
            value: value.to_string(),
            expected: self.value.variant_name(),
        })
    }
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value
    }
}

impl Eq for Attribute {}

impl Hash for Attribute {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
        self.value.hash(state);
    }
}

impl PartialOrd for Attribute {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Attribute {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .cmp(&other.key)
            .then_with(|| self.value.cmp(&other.value))
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}
