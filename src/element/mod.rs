pub mod change_set;
pub mod element_model;
pub mod patch;
pub mod root_element;

pub use change_set::{ActionChangeSet, AttributeChanges};
pub use element_model::{Element, ImageType, RetestId, Screenshot};
pub use root_element::RootElement;
