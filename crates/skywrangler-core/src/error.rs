//! Error types for mission planning.

/// Errors that abort a single planning request.
///
/// Planning is deterministic, so none of these are retryable with the same input.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// No UTM zone can be resolved for the coordinate (polar or non-finite input).
    #[error("no UTM projection available for latitude {latitude}, longitude {longitude}")]
    UnsupportedLocation { latitude: f64, longitude: f64 },

    /// Degenerate trigonometric input, e.g. a glide angle of 0 or 180 degrees.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Required field missing, wrong type or out of range in the request record.
    #[error("malformed input at `{field}`: {reason}")]
    MalformedInput { field: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlanError {
    pub(crate) fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        PlanError::MalformedInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
