pub mod path_element;
pub mod path_model;

pub use path_element::PathElement;
pub use path_model::{PATH_SEPARATOR, Path};
