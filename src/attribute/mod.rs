pub mod attribute_model;
pub mod attributes;
pub mod default_value;
pub mod difference;
pub mod parameter_type;

pub use attribute_model::{Attribute, AttributeValue};
pub use attributes::Attributes;
pub use default_value::{DefaultValueFinder, NoDefaults};
pub use difference::AttributeDifference;
pub use parameter_type::{ParameterType, ParameterTypeRegistry};
