use std::fmt;

#[derive(Debug)]
pub enum DlrError {
    Io(std::io::Error),
    ConfigFormat(String),
    Validation(Vec<String>),
    EmptyModel,
    MissingBoundary { layer: String },
    UnknownArchitecture { architecture: String },
    NoSplitCandidates { architecture: String, marker: String },
    MissingLayerMultiplier { layer: String },
}

impl DlrError {
    pub fn config_format(message: impl Into<String>) -> Self {
        Self::ConfigFormat(message.into())
    }

    pub fn validation(messages: Vec<String>) -> Self {
        Self::Validation(messages)
    }
}

impl fmt::Display for DlrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DlrError::Io(err) => write!(f, "failed to read marker table: {}", err),
            DlrError::ConfigFormat(err) => write!(f, "failed to parse marker table: {}", err),
            DlrError::Validation(messages) => {
                write!(f, "invalid marker table: {}", messages.join("; "))
            }
            DlrError::EmptyModel => f.write_str("model exposes no layers"),
            DlrError::MissingBoundary { layer } => {
                write!(f, "top boundary layer '{}' not found in the layer sequence", layer)
            }
            DlrError::UnknownArchitecture { architecture } => {
                write!(f, "architecture '{}' has no split marker entry", architecture)
            }
            DlrError::NoSplitCandidates { architecture, marker } => {
                write!(
                    f,
                    "no layer of architecture '{}' contains split marker '{}'",
                    architecture, marker
                )
            }
            DlrError::MissingLayerMultiplier { layer } => {
                write!(f, "layer '{}' owns parameters but has no multiplier entry", layer)
            }
        }
    }
}

impl std::error::Error for DlrError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DlrError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DlrError {
    fn from(value: std::io::Error) -> Self {
        DlrError::Io(value)
    }
}

impl From<toml::de::Error> for DlrError {
    fn from(value: toml::de::Error) -> Self {
        DlrError::ConfigFormat(value.to_string())
    }
}

impl From<serde_json::Error> for DlrError {
    fn from(value: serde_json::Error) -> Self {
        DlrError::ConfigFormat(value.to_string())
    }
}
