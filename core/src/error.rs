//! Error types for configuration and match control.

use thiserror::Error;

use crate::types::{GameState, MatchAction};

/// A `SimConfig` that cannot drive a simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("tick rate must be positive")]
    ZeroTickRate,

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must lie in (0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f64 },

    #[error("max points must be at least 1")]
    ZeroMaxPoints,

    #[error("world boundaries are inverted: left {left} >= right {right}")]
    InvertedWorld { left: f64, right: f64 },

    #[error("platform [{x}, {right}] does not fit inside the world boundaries")]
    PlatformOutsideWorld { x: f64, right: f64 },
}

/// Errors surfaced by the round/match state machine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("action {action:?} is not valid in state {from:?}")]
    InvalidTransition {
        from: GameState,
        action: MatchAction,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, MatchError>;
