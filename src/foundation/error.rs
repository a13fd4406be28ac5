/// Convenience result type used across the crate.
pub type HeatmapResult<T> = Result<T, HeatmapError>;

/// Top-level error taxonomy used by the public APIs.
///
/// Data-shape problems (unreadable records, empty grids, pointers outside the grid) are not
/// errors; they degrade by omission. Only invalid configuration, geometry and IO surface here.
#[derive(thiserror::Error, Debug)]
pub enum HeatmapError {
    /// Invalid render dimensions or other caller-provided geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// A configuration value outside its accepted range.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Errors raised by a drawing surface backend.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HeatmapError {
    /// Build a [`HeatmapError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HeatmapError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`HeatmapError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`HeatmapError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

impl From<serde_json::Error> for HeatmapError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
