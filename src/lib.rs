pub mod adapter;
pub mod config;
pub mod error;
pub mod expand;
pub mod model;
pub mod partition;

pub use adapter::NamedVarLayout;
pub use config::ArchitectureMarkers;
pub use error::DlrError;
pub use expand::{expand, parameter_multipliers, ParameterMultipliers};
pub use model::{Layer, LayerStack, ModelLayout, ParameterLayout};
pub use partition::{
    layer_multipliers, partition, LayerMultipliers, LearningRates, BASE_DAMPING, TOP_MULTIPLIER,
};
