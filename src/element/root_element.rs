use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::element::{ActionChangeSet, Element, Screenshot};
use crate::error::Result;

/// Top-level element of a capture (a window or page) with its screen metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootElement {
    element: Element,
    screen: String,
    screen_id: i32,
    title: String,
}

impl RootElement {
    pub fn new(element: Element, screen: &str, screen_id: i32, title: &str) -> Self {
        Self {
            element,
            screen: screen.to_string(),
            screen_id,
            title: title.to_string(),
        }
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    pub fn screen(&self) -> &str {
        &self.screen
    }

    pub fn screen_id(&self) -> i32 {
        self.screen_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Same as [`Element::apply_changes`]; screen, screen id and title carry over.
    pub fn apply_changes(&self, change_set: &mut ActionChangeSet) -> Result<RootElement> {
        Ok(Self {
            element: self.element.apply_changes(change_set)?,
            screen: self.screen.clone(),
            screen_id: self.screen_id,
            title: self.title.clone(),
        })
    }

    /// Screenshots of the given roots, skipping roots without one.
    pub fn screenshots(roots: &[RootElement]) -> Vec<&Screenshot> {
        roots.iter().filter_map(|root| root.screenshot()).collect()
    }
}

impl Deref for RootElement {
    type Target = Element;

    fn deref(&self) -> &Element {
        &self.element
    }
}

impl fmt::Display for RootElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}#{})", self.title, self.screen, self.screen_id)
    }
}
