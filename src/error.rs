//! Error types for simulation setup and dynamics evaluation.

use thiserror::Error;

use crate::types::Float;

/// Errors that can occur when setting up or running a simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Final time or step size is unusable (non-positive, non-finite, or
    /// step larger than the horizon).
    #[error("invalid simulation config: final_time = {final_time}, dt = {dt} ({reason})")]
    InvalidConfig {
        /// Requested total duration.
        final_time: Float,
        /// Requested step size.
        dt: Float,
        /// What check failed.
        reason: &'static str,
    },

    /// A physical parameter is outside its valid range.
    #[error("invalid physical parameter {name} = {value}: {reason}")]
    InvalidParameters {
        /// Parameter name, e.g. `link1.mass`.
        name: &'static str,
        /// Offending value.
        value: Float,
        /// What check failed.
        reason: &'static str,
    },

    /// The inertia matrix could not be inverted.
    #[error("singular inertia matrix: {matrix:?}")]
    SingularMatrix {
        /// Row-major entries of the offending matrix.
        matrix: [[Float; 2]; 2],
    },
}

impl SimulationError {
    /// Creates an invalid config error.
    #[must_use]
    pub const fn invalid_config(final_time: Float, dt: Float, reason: &'static str) -> Self {
        Self::InvalidConfig {
            final_time,
            dt,
            reason,
        }
    }

    /// Creates an invalid parameter error.
    #[must_use]
    pub const fn invalid_parameter(name: &'static str, value: Float, reason: &'static str) -> Self {
        Self::InvalidParameters {
            name,
            value,
            reason,
        }
    }
}
