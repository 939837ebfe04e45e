use thiserror::Error;

pub type Result<T, E = ReductionError> = std::result::Result<T, E>;

/// Failure kinds surfaced by the toolkit.
///
/// Numeric non-convergence is deliberately not represented here: the
/// eigensolver always returns its best estimate together with a
/// `converged` flag, so callers decide how much to trust it.
#[derive(Debug, Error)]
pub enum ReductionError {
    /// The request was rejected before any computation ran: empty input,
    /// out-of-range parameter, or mismatched shapes.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Component bridging could not make progress, leaving the graph
    /// disconnected.
    #[error("graph connectivity: {0}")]
    Connectivity(String),

    /// An internal guarantee was broken. This indicates a bug in the
    /// library, not in the caller's input.
    #[error("internal invariant violated: {0}")]
    Invariant(String),
}
