//! Driver error types.

/// Errors raised when configuring or starting a [`GameLoop`](crate::GameLoop).
///
/// Ticking itself never fails; see the crate docs.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LoopError {
    /// The tick rate must be a finite, positive number of ticks per second.
    #[error("invalid tick rate {0}: must be finite and greater than zero")]
    InvalidTickRate(f64),
}
