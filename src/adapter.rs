//! Layer topology derived from candle named parameters.
//!
//! Optimizers in this stack consume ordered `(name, Var)` pairs whose names
//! are dotted paths such as `blocks.0.attention.q_proj.weight`. Dropping the
//! final path segment recovers the owning layer, and first-seen order of the
//! parameters recovers the construction order of the layers.

use std::collections::HashMap;

use candle_core::Var;

use crate::model::{ModelLayout, ParameterLayout};

/// Name of the synthetic input layer prepended to derived layouts.
///
/// The partitioner leaves the layer at index 0 without a multiplier, which in
/// a full model description is the parameterless input layer. A layout derived
/// from named parameters has no such layer, so one is inserted; without it the
/// bottom-most trainable layer would be silently dropped from the mapping.
pub const INPUT_PLACEHOLDER: &str = "input";

/// [`ParameterLayout`] built from an ordered list of named parameters.
///
/// The boundary layer and architecture identifier are properties of the
/// transfer-learning setup and cannot be recovered from parameter names, so
/// they are supplied alongside.
#[derive(Debug, Clone)]
pub struct NamedVarLayout {
    layers: Vec<String>,
    parameters: HashMap<String, Vec<String>>,
    top_boundary: String,
    architecture: String,
}

impl NamedVarLayout {
    pub fn from_named_vars(
        named: &[(String, Var)],
        top_boundary: impl Into<String>,
        architecture: impl Into<String>,
    ) -> Self {
        Self::from_parameter_names(
            named.iter().map(|(name, _)| name.as_str()),
            top_boundary,
            architecture,
        )
    }

    pub fn from_parameter_names<'a>(
        names: impl IntoIterator<Item = &'a str>,
        top_boundary: impl Into<String>,
        architecture: impl Into<String>,
    ) -> Self {
        let mut layers = vec![INPUT_PLACEHOLDER.to_string()];
        let mut parameters: HashMap<String, Vec<String>> = HashMap::new();

        for name in names {
            let layer = owning_layer(name).to_string();
            if !layers.contains(&layer) {
                layers.push(layer.clone());
            }
            parameters.entry(layer).or_default().push(name.to_string());
        }

        Self {
            layers,
            parameters,
            top_boundary: top_boundary.into(),
            architecture: architecture.into(),
        }
    }
}

impl ModelLayout for NamedVarLayout {
    fn layer_names(&self) -> Vec<String> {
        self.layers.clone()
    }

    fn top_boundary(&self) -> String {
        self.top_boundary.clone()
    }

    fn architecture(&self) -> String {
        self.architecture.clone()
    }
}

impl ParameterLayout for NamedVarLayout {
    fn parameters_by_layer(&self) -> HashMap<String, Vec<String>> {
        self.parameters.clone()
    }
}

/// Everything before the final dotted segment; bare names own themselves.
fn owning_layer(parameter: &str) -> &str {
    match parameter.rfind('.') {
        Some(index) => &parameter[..index],
        None => parameter,
    }
}
