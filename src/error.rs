//! Error type shared by the fallible entry points of the crate.
//!
//! Recoverable geometric conditions (an empty intersection, a degenerate
//! polygon) are represented in-band — see [`Interval::is_invalid`] — and never
//! surface through this enum.
//!
//! [`Interval::is_invalid`]: crate::geometry::Interval::is_invalid

use thiserror::Error;

use crate::router::NodeKind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// An operation was invoked with too little input to be meaningful:
    /// a clock-tree build with zero sinks, a polygon builder with fewer than
    /// three points, a router with no terminals.
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// A routing-tree operation referenced an unknown node identifier or an
    /// edge that does not exist.
    #[error("invalid node reference: {0}")]
    InvalidParent(String),

    /// A node of this kind is not allowed in the requested operation.
    #[error("invalid node kind {0:?} for this operation")]
    InvalidKind(NodeKind),

    /// The Steiner-forest solver cannot connect the remaining active
    /// components.
    #[error("grid cannot connect the remaining terminal pairs")]
    Infeasible,
}
