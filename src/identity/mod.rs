pub mod id_provider;
pub mod identifying_attributes;
pub mod weights;

pub use id_provider::{DefaultRetestIdProvider, RetestIdProvider};
pub use identifying_attributes::{IdentifyingAttributes, PERFECT_SIMILARITY};
pub use weights::AttributeWeights;
