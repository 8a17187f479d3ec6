use std::collections::HashMap;

use crate::{
    config::ArchitectureMarkers,
    error::DlrError,
    model::ParameterLayout,
    partition::{layer_multipliers, LayerMultipliers, LearningRates},
};

/// Mapping from parameter name to learning-rate multiplier.
pub type ParameterMultipliers = HashMap<String, f64>;

/// Expands per-layer multipliers into per-parameter multipliers.
///
/// Every owned parameter inherits its layer's multiplier. A layer that owns
/// parameters but has no multiplier entry (for instance the excluded input
/// layer) is reported as [`DlrError::MissingLayerMultiplier`].
pub fn expand(
    layer_multipliers: &LayerMultipliers,
    parameters_by_layer: &HashMap<String, Vec<String>>,
) -> Result<ParameterMultipliers, DlrError> {
    let mut multipliers = ParameterMultipliers::new();

    for (layer, parameters) in parameters_by_layer {
        if parameters.is_empty() {
            continue;
        }
        let multiplier =
            *layer_multipliers
                .get(layer)
                .ok_or_else(|| DlrError::MissingLayerMultiplier {
                    layer: layer.clone(),
                })?;
        for parameter in parameters {
            multipliers.insert(parameter.clone(), multiplier);
        }
    }

    Ok(multipliers)
}

/// Convenience entry point: partitions the model's layers and expands the
/// result over its trainable parameters in one call.
pub fn parameter_multipliers(
    model: &impl ParameterLayout,
    rates: LearningRates,
    markers: &ArchitectureMarkers,
) -> Result<ParameterMultipliers, DlrError> {
    let layers = layer_multipliers(model, rates, markers)?;
    expand(&layers, &model.parameters_by_layer())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameters_inherit_their_layer_multiplier() {
        let mut layers = LayerMultipliers::new();
        layers.insert("conv".to_string(), 0.3);
        layers.insert("head".to_string(), 1.0);

        let mut owned = HashMap::new();
        owned.insert(
            "conv".to_string(),
            vec!["conv.weight".to_string(), "conv.bias".to_string()],
        );
        owned.insert("head".to_string(), vec!["head.weight".to_string()]);

        let expanded = expand(&layers, &owned).unwrap();
        assert_eq!(expanded.len(), 3);
        assert_eq!(expanded["conv.weight"], 0.3);
        assert_eq!(expanded["conv.bias"], 0.3);
        assert_eq!(expanded["head.weight"], 1.0);
    }

    #[test]
    fn owning_layer_without_multiplier_is_an_error() {
        let layers = LayerMultipliers::new();
        let mut owned = HashMap::new();
        owned.insert("input".to_string(), vec!["input.scale".to_string()]);

        let err = expand(&layers, &owned).unwrap_err();
        assert!(matches!(
            err,
            DlrError::MissingLayerMultiplier { layer } if layer == "input"
        ));
    }

    #[test]
    fn layers_without_parameters_are_skipped() {
        let mut layers = LayerMultipliers::new();
        layers.insert("pool".to_string(), 0.3);

        let mut owned = HashMap::new();
        owned.insert("pool".to_string(), Vec::new());

        let expanded = expand(&layers, &owned).unwrap();
        assert!(expanded.is_empty());
    }
}
