use std::collections::HashMap;

use crate::{config::ArchitectureMarkers, error::DlrError, model::ModelLayout};

/// Multiplier applied to every base-model layer in the single-rate case.
pub const BASE_DAMPING: f64 = 0.3;

/// Multiplier applied to the newly added top layers in every case.
pub const TOP_MULTIPLIER: f64 = 1.0;

/// Mapping from layer name to learning-rate multiplier.
pub type LayerMultipliers = HashMap<String, f64>;

/// Learning rates supplied by the caller, by arity.
///
/// `Single` damps the whole base model uniformly: its rate is carried for the
/// optimizer's benefit, but the base group always receives the fixed
/// [`BASE_DAMPING`] factor. `Pair(a, b)` splits the base model in two around
/// the architecture's marker layers, with the bottom group scaled by `a / b`
/// and the middle group by `(1 + a + b) / 2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LearningRates {
    Single(f64),
    Pair(f64, f64),
}

/// Partitions `layer_names` into multiplier groups.
///
/// The layer at index 0 (the input layer) receives no entry. Groups are
/// written bottom to top; when the split and boundary indices are misordered
/// the later group wins for any contested layer.
pub fn partition(
    layer_names: &[String],
    top_boundary: &str,
    architecture: &str,
    rates: LearningRates,
    markers: &ArchitectureMarkers,
) -> Result<LayerMultipliers, DlrError> {
    if layer_names.is_empty() {
        return Err(DlrError::EmptyModel);
    }

    let idx_top = layer_names
        .iter()
        .position(|name| name == top_boundary)
        .ok_or_else(|| DlrError::MissingBoundary {
            layer: top_boundary.to_string(),
        })?;

    let mut multipliers = LayerMultipliers::with_capacity(layer_names.len());

    match rates {
        LearningRates::Single(_) => {
            for name in layer_names.iter().take(idx_top).skip(1) {
                multipliers.insert(name.clone(), BASE_DAMPING);
            }
            for name in layer_names.iter().skip(idx_top) {
                multipliers.insert(name.clone(), TOP_MULTIPLIER);
            }
            log::info!(
                "lr partition: layers={} boundary={} base={} top={}",
                layer_names.len(),
                top_boundary,
                idx_top.saturating_sub(1),
                layer_names.len() - idx_top
            );
        }
        LearningRates::Pair(a, b) => {
            let idx_split = split_index(layer_names, architecture, markers)?;

            for name in layer_names.iter().take(idx_split).skip(1) {
                multipliers.insert(name.clone(), a / b);
            }
            for name in layer_names.iter().take(idx_top).skip(idx_split) {
                multipliers.insert(name.clone(), (1.0 + a + b) / 2.0);
            }
            for name in layer_names.iter().skip(idx_top) {
                multipliers.insert(name.clone(), TOP_MULTIPLIER);
            }
            log::info!(
                "lr partition: layers={} split={} boundary={} multipliers=({}, {}, {})",
                layer_names.len(),
                layer_names[idx_split],
                top_boundary,
                a / b,
                (1.0 + a + b) / 2.0,
                TOP_MULTIPLIER
            );
        }
    }

    Ok(multipliers)
}

/// Convenience entry point over a [`ModelLayout`].
pub fn layer_multipliers(
    model: &impl ModelLayout,
    rates: LearningRates,
    markers: &ArchitectureMarkers,
) -> Result<LayerMultipliers, DlrError> {
    let layer_names = model.layer_names();
    partition(
        &layer_names,
        &model.top_boundary(),
        &model.architecture(),
        rates,
        markers,
    )
}

/// Index (within the full layer sequence) of the layer the base model is
/// split at: the middle candidate among the layers whose names contain the
/// architecture's marker substring.
fn split_index(
    layer_names: &[String],
    architecture: &str,
    markers: &ArchitectureMarkers,
) -> Result<usize, DlrError> {
    let marker = markers.marker(architecture)?;

    let candidates: Vec<usize> = layer_names
        .iter()
        .enumerate()
        .filter(|(_, name)| name.contains(marker))
        .map(|(index, _)| index)
        .collect();

    if candidates.is_empty() {
        return Err(DlrError::NoSplitCandidates {
            architecture: architecture.to_string(),
            marker: marker.to_string(),
        });
    }

    let k = candidates.len();
    let middle = ((k as f64 / 2.0).round() as usize).min(k - 1);
    Ok(candidates[middle])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|name| name.to_string()).collect()
    }

    fn marker_table() -> ArchitectureMarkers {
        ArchitectureMarkers::empty().with_marker("synthetic", "block")
    }

    #[test]
    fn split_index_picks_middle_candidate() {
        let layers = names(&["input", "block_1", "x", "block_2", "block_3", "top"]);
        let markers = marker_table();
        // k = 3, round(1.5) = 2 -> third candidate at full index 4
        assert_eq!(split_index(&layers, "synthetic", &markers).unwrap(), 4);
    }

    #[test]
    fn split_index_even_count_takes_upper_half() {
        let layers = names(&["input", "block_1", "block_2", "top"]);
        let markers = marker_table();
        // k = 2, index 1 -> block_2 at full index 2
        assert_eq!(split_index(&layers, "synthetic", &markers).unwrap(), 2);
    }

    #[test]
    fn split_index_single_candidate_is_clamped() {
        let layers = names(&["input", "block_1", "top"]);
        let markers = marker_table();
        assert_eq!(split_index(&layers, "synthetic", &markers).unwrap(), 1);
    }

    #[test]
    fn split_index_without_matches_is_an_error() {
        let layers = names(&["input", "conv", "top"]);
        let markers = marker_table();
        let err = split_index(&layers, "synthetic", &markers).unwrap_err();
        assert!(matches!(err, DlrError::NoSplitCandidates { .. }));
    }

    #[test]
    fn empty_layer_list_is_rejected() {
        let err = partition(
            &[],
            "top",
            "synthetic",
            LearningRates::Single(0.1),
            &marker_table(),
        )
        .unwrap_err();
        assert!(matches!(err, DlrError::EmptyModel));
    }

    #[test]
    fn boundary_at_index_zero_marks_every_layer_as_top() {
        let layers = names(&["top", "extra"]);
        let multipliers = partition(
            &layers,
            "top",
            "synthetic",
            LearningRates::Single(0.1),
            &marker_table(),
        )
        .unwrap();
        assert_eq!(multipliers.len(), 2);
        assert_eq!(multipliers["top"], TOP_MULTIPLIER);
        assert_eq!(multipliers["extra"], TOP_MULTIPLIER);
    }

    #[test]
    fn misordered_split_lets_the_top_group_win() {
        // Marker matches only above the boundary, so the split index lands
        // past it; the top group is written last and keeps its multiplier.
        let layers = names(&["input", "base", "top", "block_new"]);
        let markers = marker_table();
        let multipliers = partition(
            &layers,
            "top",
            "synthetic",
            LearningRates::Pair(0.2, 0.1),
            &markers,
        )
        .unwrap();
        assert_eq!(multipliers["top"], TOP_MULTIPLIER);
        assert_eq!(multipliers["block_new"], TOP_MULTIPLIER);
        assert_eq!(multipliers["base"], 0.2 / 0.1);
    }
}
