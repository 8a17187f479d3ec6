//! Capability traits describing the model as seen by the partitioner.
//!
//! The partitioner never touches weights or graph structure; it only needs the
//! ordered layer names, the boundary between the pretrained base and the new
//! top, the architecture identifier, and (for per-parameter expansion) which
//! trainable parameters each layer owns.

use std::collections::HashMap;

/// Ordered view of a model's layers.
pub trait ModelLayout {
    /// Layer names in construction order.
    fn layer_names(&self) -> Vec<String>;

    /// Name of the last layer belonging to the pretrained base model.
    fn top_boundary(&self) -> String;

    /// Key into the architecture marker table.
    fn architecture(&self) -> String;
}

/// Extends [`ModelLayout`] with trainable-parameter ownership.
pub trait ParameterLayout: ModelLayout {
    /// Owned trainable parameter names keyed by layer. Layers without
    /// trainable state are absent from the map.
    fn parameters_by_layer(&self) -> HashMap<String, Vec<String>>;
}

/// One layer of a [`LayerStack`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    pub name: String,
    pub parameters: Vec<String>,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameters<S: Into<String>>(
        name: impl Into<String>,
        parameters: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            parameters: parameters.into_iter().map(Into::into).collect(),
        }
    }
}

/// Plain description of a model, for callers without a tensor framework and
/// for tests with synthetic architectures.
#[derive(Debug, Clone)]
pub struct LayerStack {
    pub layers: Vec<Layer>,
    pub top_boundary: String,
    pub architecture: String,
}

impl LayerStack {
    pub fn new(architecture: impl Into<String>, top_boundary: impl Into<String>) -> Self {
        Self {
            layers: Vec::new(),
            top_boundary: top_boundary.into(),
            architecture: architecture.into(),
        }
    }

    pub fn push(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.push(layer);
        self
    }
}

impl ModelLayout for LayerStack {
    fn layer_names(&self) -> Vec<String> {
        self.layers.iter().map(|layer| layer.name.clone()).collect()
    }

    fn top_boundary(&self) -> String {
        self.top_boundary.clone()
    }

    fn architecture(&self) -> String {
        self.architecture.clone()
    }
}

impl ParameterLayout for LayerStack {
    fn parameters_by_layer(&self) -> HashMap<String, Vec<String>> {
        self.layers
            .iter()
            .filter(|layer| !layer.parameters.is_empty())
            .map(|layer| (layer.name.clone(), layer.parameters.clone()))
            .collect()
    }
}
