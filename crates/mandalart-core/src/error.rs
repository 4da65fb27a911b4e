//! Error taxonomy for manager operations.
//!
//! Pure grid/progress computations only fail on out-of-range input; manager
//! operations map every collaborator failure into one of these variants and
//! report it once, leaving in-memory state at its last-known-good value for
//! the failed sub-step.

use crate::grid::PositionOutOfRange;

/// Failure reported by a board or plan manager operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The session carries no user; the operation did not run.
    #[error("not authenticated")]
    NotAuthenticated,

    /// An expected row is missing.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A remote store call failed. Not retried automatically.
    #[error("remote store call failed while {action}")]
    Remote {
        action: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// Input rejected before any remote call was issued.
    #[error("{0}")]
    Rejected(&'static str),

    /// Operation invoked outside its legal manager state.
    #[error("cannot {op} while {state}")]
    InvalidState {
        op: &'static str,
        state: &'static str,
    },

    /// A grid position outside 0..=80.
    #[error(transparent)]
    Position(#[from] PositionOutOfRange),
}

impl Error {
    pub(crate) fn remote(action: &'static str, source: anyhow::Error) -> Self {
        Self::Remote { action, source }
    }
}
