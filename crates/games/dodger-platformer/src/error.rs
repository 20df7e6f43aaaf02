use dodger_core::error::GeometryError;

/// Failure to build a world from a configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum WorldError {
    InvalidConfig(String),
    Geometry(GeometryError),
}

impl std::fmt::Display for WorldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(m) => write!(f, "invalid config: {m}"),
            Self::Geometry(e) => write!(f, "invalid geometry: {e}"),
        }
    }
}

impl std::error::Error for WorldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Geometry(e) => Some(e),
            Self::InvalidConfig(_) => None,
        }
    }
}

impl From<GeometryError> for WorldError {
    fn from(e: GeometryError) -> Self {
        Self::Geometry(e)
    }
}
