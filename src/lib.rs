//! Snapshot state of a UI under test: elements addressed by paths, weighted
//! identity matching between captures, stable retest ids, and application
//! of change sets to element trees.

pub mod attribute;
pub mod cli;
pub mod element;
pub mod error;
pub mod identity;
pub mod logging;
pub mod path;
pub mod util;

pub use attribute::{Attribute, AttributeDifference, AttributeValue, Attributes};
pub use element::{ActionChangeSet, Element, RetestId, RootElement};
pub use error::{ErrorKind, Result, RetestError};
pub use identity::{AttributeWeights, IdentifyingAttributes, RetestIdProvider};
pub use path::{Path, PathElement};
