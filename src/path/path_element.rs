use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RetestError};

pub const SUFFIX_START: char = '[';
pub const SUFFIX_END: char = ']';

/// One segment of a [`Path`](crate::path::Path): an element name plus an
/// optional positional suffix, rendered as `name` or `name[suffix]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PathElement {
    name: String,
    suffix: String,
}

impl PathElement {
    /// Both parts are trimmed. The name must not be empty.
    pub fn new(name: &str, suffix: &str) -> Result<Self> {
        let name = name.trim();
        let suffix = suffix.trim();

        if name.is_empty() {
            return Err(invalid(name, suffix, "element name must not be empty"));
        }
        if contains_reserved(name) || contains_reserved(suffix) {
            return Err(invalid(name, suffix, "'/', '[' and ']' are reserved"));
        }

        Ok(Self {
            name: name.to_string(),
            suffix: suffix.to_string(),
        })
    }

    pub fn named(name: &str) -> Result<Self> {
        Self::new(name, "")
    }

    /// Element with a numeric sibling index as suffix, e.g. `DIV[3]`.
    pub fn with_index(name: &str, index: i32) -> Result<Self> {
        Self::new(name, &index.to_string())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn has_suffix(&self) -> bool {
        !self.suffix.is_empty()
    }

    /// The suffix as sibling index, if it is numeric.
    pub fn index(&self) -> Option<i32> {
        self.suffix.parse().ok()
    }
}

fn contains_reserved(part: &str) -> bool {
    part.contains(['/', SUFFIX_START, SUFFIX_END])
}

fn invalid(name: &str, suffix: &str, reason: &'static str) -> RetestError {
    let value = if suffix.is_empty() {
        name.to_string()
    } else {
        format!("{name}{SUFFIX_START}{suffix}{SUFFIX_END}")
    };
    RetestError::InvalidPathElement { value, reason }
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.suffix.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}{}{}{}", self.name, SUFFIX_START, self.suffix, SUFFIX_END)
        }
    }
}

impl FromStr for PathElement {
    type Err = RetestError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let Some(start) = s.find(SUFFIX_START) else {
            return Self::named(s);
        };

        let Some(suffix) = s[start + 1..].strip_suffix(SUFFIX_END) else {
            return Err(RetestError::InvalidPathElement {
                value: s.to_string(),
                reason: "suffix must be closed by ']'",
            });
        };

        Self::new(&s[..start], suffix)
    }
}

impl TryFrom<String> for PathElement {
    type Error = RetestError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<PathElement> for String {
    fn from(element: PathElement) -> Self {
        element.to_string()
    }
}
