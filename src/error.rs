use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the simulation core.
///
/// Parameter validation happens eagerly at construction and in the
/// setters; the variants carry enough context to be actionable at the
/// Python boundary, where they surface as `ValueError`.
#[derive(Debug, Error)]
pub enum Error {
    /// Species tag not present in the static table. Only reachable from
    /// the string-typed Python boundary; inside Rust the species enum is
    /// closed.
    #[error("unknown species: {0:?}")]
    InvalidSpecies(String),

    /// Temperatures feed a square root in the sampling scale and a ratio
    /// in velocity rescaling, so they must be finite and positive.
    #[error("temperature must be finite and > 0 K, got {0}")]
    NonPositiveTemperature(f64),

    /// Enclosure height must be finite and positive.
    #[error("height must be finite and > 0, got {0}")]
    NonPositiveHeight(f64),

    /// Wall-collision resolution found no wall being approached, so no
    /// finite hit time exists for the current velocity.
    #[error("degenerate velocity: {0}")]
    DegenerateVelocity(String),

    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),
}
