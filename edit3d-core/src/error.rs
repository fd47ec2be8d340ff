//! Error types for transform construction and tag parsing
use thiserror::Error;

use crate::transform::{Axes, Op};

/// Why a transform request degraded to a noop.
///
/// The `Display` text is the human-readable reason reported through the
/// message sink when the noop is applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    #[error("Model doesn't exist.")]
    MissingModel,

    #[error("No operation requested.")]
    NothingRequested,

    #[error("Cannot {op} without an axis.")]
    MissingAxis { op: Op },

    #[error("Cannot {op} without an amount.")]
    MissingAmount { op: Op },

    #[error("Cannot {op} along {axes} with {found}; expected {expected}.")]
    AmountShape {
        op: Op,
        axes: Axes,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Scale amount must be a positive finite number, got {amount}.")]
    InvalidScale { amount: f32 },

    #[error("Model is already borrowed elsewhere.")]
    ModelBusy,
}

/// Errors from parsing operation and axis tags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown operation `{0}`")]
    UnknownOp(String),

    #[error("unknown axis `{0}`")]
    UnknownAxis(String),
}
