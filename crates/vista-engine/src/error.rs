use thiserror::Error;

/// Errors surfaced while bringing a stage up or populating its scene.
#[derive(Debug, Error)]
pub enum StageError {
    /// The host could not provide a drawable surface (missing window, adapter, ...).
    #[error("render surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// An asynchronously loaded asset (font data) could not be fetched or parsed.
    #[error("failed to load asset `{path}`: {reason}")]
    AssetLoadFailed { path: String, reason: String },

    /// A geometry, material or camera was configured with an unusable value.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl StageError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter { name, reason: reason.into() }
    }

    pub(crate) fn asset(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::AssetLoadFailed { path: path.into(), reason: reason.to_string() }
    }
}

/// Outcome of a failed draw submission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DrawError {
    /// Transient; the frame was dropped and the next one may succeed.
    #[error("frame skipped: {0}")]
    Skipped(String),

    /// The surface cannot recover (commonly out of memory).
    #[error("fatal surface error: {0}")]
    Fatal(String),
}

/// Rejects non-positive or non-finite values.
pub(crate) fn ensure_positive(name: &'static str, value: f32) -> Result<f32, StageError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(StageError::invalid(name, format!("must be a positive finite number, got {value}")))
    }
}

/// Rejects values outside `[0, 1]`.
pub(crate) fn ensure_unit(name: &'static str, value: f32) -> Result<f32, StageError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(StageError::invalid(name, format!("must lie in [0, 1], got {value}")))
    }
}

pub(crate) fn ensure_segments(name: &'static str, value: u32, min: u32) -> Result<u32, StageError> {
    if value >= min {
        Ok(value)
    } else {
        Err(StageError::invalid(name, format!("must be at least {min}, got {value}")))
    }
}
