use std::{collections::HashMap, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::DlrError;

/// Mapping from architecture identifier to the substring that marks a natural
/// mid-network split point in that architecture's layer names.
///
/// The table is an injected configuration value rather than a process-wide
/// constant so callers can register markers for synthetic or custom
/// architectures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArchitectureMarkers {
    markers: HashMap<String, String>,
}

impl ArchitectureMarkers {
    /// Markers for the stock transfer-learning backbones.
    // TODO: validate markers for efficientnet-b1..b7 before adding them; only
    // the b0 layer naming has been checked.
    pub fn builtin() -> Self {
        let mut markers = HashMap::new();
        markers.insert("inception_v3".to_string(), "mixed".to_string());
        markers.insert("resnet50".to_string(), "add".to_string());
        markers.insert("efficientnet-b0".to_string(), "expand_conv".to_string());
        markers.insert("xception".to_string(), "add".to_string());
        Self { markers }
    }

    pub fn empty() -> Self {
        Self {
            markers: HashMap::new(),
        }
    }

    /// Loads a marker table from a TOML or JSON file, dispatching on the
    /// extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DlrError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let table: ArchitectureMarkers = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&contents)?,
            Some("toml") | Some("tml") | None => toml::from_str(&contents)?,
            Some(other) => {
                return Err(DlrError::config_format(format!(
                    "unsupported marker table extension '{}'",
                    other
                )));
            }
        };
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), DlrError> {
        let mut errors = Vec::new();

        for (architecture, marker) in &self.markers {
            if architecture.is_empty() {
                errors.push("architecture identifiers must not be empty".to_string());
            }
            if marker.is_empty() {
                errors.push(format!(
                    "marker for architecture '{}' must not be empty",
                    architecture
                ));
            }
        }

        if !errors.is_empty() {
            return Err(DlrError::validation(errors));
        }

        Ok(())
    }

    /// Registers (or replaces) the marker for an architecture.
    pub fn insert(&mut self, architecture: impl Into<String>, marker: impl Into<String>) {
        self.markers.insert(architecture.into(), marker.into());
    }

    pub fn with_marker(
        mut self,
        architecture: impl Into<String>,
        marker: impl Into<String>,
    ) -> Self {
        self.insert(architecture, marker);
        self
    }

    /// Split marker for `architecture`, or [`DlrError::UnknownArchitecture`]
    /// if the table has no entry for it.
    pub fn marker(&self, architecture: &str) -> Result<&str, DlrError> {
        self.markers
            .get(architecture)
            .map(String::as_str)
            .ok_or_else(|| DlrError::UnknownArchitecture {
                architecture: architecture.to_string(),
            })
    }

    pub fn contains(&self, architecture: &str) -> bool {
        self.markers.contains_key(architecture)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_stock_backbones() {
        let markers = ArchitectureMarkers::builtin();
        assert_eq!(markers.len(), 4);
        assert_eq!(markers.marker("inception_v3").unwrap(), "mixed");
        assert_eq!(markers.marker("resnet50").unwrap(), "add");
        assert_eq!(markers.marker("efficientnet-b0").unwrap(), "expand_conv");
        assert_eq!(markers.marker("xception").unwrap(), "add");
    }

    #[test]
    fn unknown_architecture_is_an_error() {
        let markers = ArchitectureMarkers::builtin();
        let err = markers.marker("mobilenet_v2").unwrap_err();
        assert!(matches!(
            err,
            DlrError::UnknownArchitecture { architecture } if architecture == "mobilenet_v2"
        ));
    }

    #[test]
    fn validate_rejects_empty_markers() {
        let markers = ArchitectureMarkers::empty().with_marker("custom", "");
        let err = markers.validate().unwrap_err();
        assert!(matches!(err, DlrError::Validation(messages) if messages.len() == 1));
    }

    #[test]
    fn insert_replaces_existing_entries() {
        let mut markers = ArchitectureMarkers::builtin();
        markers.insert("resnet50", "residual_add");
        assert_eq!(markers.marker("resnet50").unwrap(), "residual_add");
        assert_eq!(markers.len(), 4);
    }
}
