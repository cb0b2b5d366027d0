use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RetestError};
use crate::path::PathElement;

pub const PATH_SEPARATOR: char = '/';

/// Hierarchical address of an element, root first.
///
/// `"Window[1]/JPanel[1]/JButton[2]"` is relative, `"/HTML/BODY/DIV[1]"` is
/// absolute. The empty path renders as `""` and the absolute root (the empty
/// path joined with an empty element) as `"/"`, so both stay distinguishable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Path {
    absolute: bool,
    elements: Vec<PathElement>,
}

impl Path {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn absolute_root() -> Self {
        Self {
            absolute: true,
            elements: vec![],
        }
    }

    /// Single-element relative path.
    pub fn of(element: PathElement) -> Self {
        Self {
            absolute: false,
            elements: vec![element],
        }
    }

    /// Append `element` to `parent`, or start a new relative path without one.
    pub fn compose(parent: Option<&Path>, element: PathElement) -> Self {
        match parent {
            Some(parent) => parent.child(element),
            None => Self::of(element),
        }
    }

    pub fn child(&self, element: PathElement) -> Self {
        let mut elements = self.elements.clone();
        elements.push(element);
        Self {
            absolute: self.absolute,
            elements,
        }
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    /// Trailing element
    pub fn element(&self) -> Option<&PathElement> {
        self.elements.last()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Path without its trailing element; `None` for paths without elements.
    pub fn parent_path(&self) -> Option<Path> {
        let (_, init) = self.elements.split_last()?;
        Some(Self {
            absolute: self.absolute,
            elements: init.to_vec(),
        })
    }

    /// True when `other` lies in the subtree rooted at this path.
    /// A path counts as parent of itself.
    pub fn is_parent(&self, other: &Path) -> bool {
        self.absolute == other.absolute && other.elements.starts_with(&self.elements)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.absolute {
            write!(f, "{PATH_SEPARATOR}")?;
        }
        for (index, element) in self.elements.iter().enumerate() {
            if index > 0 {
                write!(f, "{PATH_SEPARATOR}")?;
            }
            write!(f, "{element}")?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = RetestError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (absolute, rest) = match trimmed.strip_prefix(PATH_SEPARATOR) {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        if rest.is_empty() {
            return Ok(Self {
                absolute,
                elements: vec![],
            });
        }

        let elements = rest
            .split(PATH_SEPARATOR)
            .map(|segment| {
                segment.parse::<PathElement>().map_err(|_| RetestError::InvalidPath {
                    value: s.to_string(),
                    reason: "every segment must be a valid path element",
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { absolute, elements })
    }
}

impl TryFrom<String> for Path {
    type Error = RetestError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Path> for String {
    fn from(path: Path) -> Self {
        path.to_string()
    }
}
