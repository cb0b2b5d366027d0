use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attribute::{Attribute, AttributeValue};
use crate::error::Result;
use crate::util::checksum::sha256_str;

const IDENTIFIER_SEPARATOR: &str = " # ";

/// One attribute-level change: the value recorded when the diff was taken
/// (`expected`) and the value to apply (`actual`).
///
/// Ordered by key, then expected, then actual.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttributeDifference {
    key: String,
    expected: Option<AttributeValue>,
    actual: Option<AttributeValue>,
}

impl AttributeDifference {
    pub fn new(
        key: &str,
        expected: Option<AttributeValue>,
        actual: Option<AttributeValue>,
    ) -> Self {
        Self {
            key: key.to_string(),
            expected,
            actual,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn expected(&self) -> Option<&AttributeValue> {
        self.expected.as_ref()
    }

    pub fn actual(&self) -> Option<&AttributeValue> {
        self.actual.as_ref()
    }

    /// Content hash of the present values of `actual` and `expected`.
    pub fn identifier(&self) -> String {
        let parts: Vec<String> = [&self.actual, &self.expected]
            .into_iter()
            .flatten()
            .map(ToString::to_string)
            .collect();
        sha256_str(&parts.join(IDENTIFIER_SEPARATOR))
    }

    /// Combined hash of all identifiers, in order.
    pub fn sum_identifier(differences: &[AttributeDifference]) -> String {
        let joined = differences.iter().fold(String::new(), |acc, difference| {
            acc + IDENTIFIER_SEPARATOR + &difference.identifier()
        });
        sha256_str(&joined)
    }

    /// The attribute after this change. `None` when `actual` is absent, i.e.
    /// the attribute is removed. A missing `current` attribute is created.
    pub fn apply_change_to(&self, current: Option<&Attribute>) -> Result<Option<Attribute>> {
        self.warn_if_drifted(current.map(Attribute::value));

        let Some(actual) = &self.actual else {
            return Ok(None);
        };

        let updated = match current {
            Some(attribute) => attribute.with_value(actual.clone())?,
            None => Attribute::for_key(&self.key, actual.clone())?,
        };
        Ok(Some(updated))
    }

    fn warn_if_drifted(&self, current: Option<&AttributeValue>) {
        if !same_value(current, self.expected.as_ref()) {
            tracing::warn!(
                key = %self.key,
                expected = %display_or_null(self.expected.as_ref()),
                current = %display_or_null(current),
                actual = %display_or_null(self.actual.as_ref()),
                "attribute value differs from the expected value of the change; applying anyway"
            );
        }
    }
}

/// Absent and blank values are equivalent; everything else compares by its
/// string form.
fn same_value(a: Option<&AttributeValue>, b: Option<&AttributeValue>) -> bool {
    let a = a.filter(|value| !value.is_blank());
    let b = b.filter(|value| !value.is_blank());
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b || a.to_string() == b.to_string(),
        _ => false,
    }
}

fn display_or_null(value: Option<&AttributeValue>) -> String {
    value.map_or_else(|| "null".to_string(), ToString::to_string)
}

impl fmt::Display for AttributeDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected=\"{}\", actual=\"{}\"",
            self.key,
            display_or_null(self.expected.as_ref()),
            display_or_null(self.actual.as_ref())
        )
    }
}
