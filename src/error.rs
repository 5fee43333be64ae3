use thiserror::Error;

/// Top-level error type for the polyprism crate.
#[derive(Debug, Error)]
pub enum PrismError {
    /// The hull does not contain three non-collinear vertices, so no
    /// plane can be derived from it.
    #[error("degenerate hull: {0}")]
    DegenerateHull(String),

    /// A zero-length vector was supplied where a direction is required.
    #[error("zero-length vector")]
    ZeroVector,

    /// Height limits were supplied with `min` greater than `max`.
    #[error("invalid height limits: min {min} exceeds max {max}")]
    InvalidHeightLimits {
        /// Lower signed-distance bound.
        min: f64,
        /// Upper signed-distance bound.
        max: f64,
    },
}

/// Convenience type alias for results using [`PrismError`].
pub type Result<T> = std::result::Result<T, PrismError>;
