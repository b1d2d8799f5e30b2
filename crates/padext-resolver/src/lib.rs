#![warn(missing_docs)]

//! Direction and extent resolution for the padext extrusion feature.
//!
//! Given a pad's stored properties this crate decides, as pure functions,
//! everything the editing host needs to show and the kernel needs to sweep:
//!
//! - which controls are visible and enabled per termination mode
//!   ([`visibility`]), with the midplane/reversed exclusion gates
//!   ([`validate_flags`]);
//! - which direction source is active and what picking another one entails
//!   ([`CandidateList`], [`resolve_direction`](CandidateList::resolve));
//! - the canonical extrusion vector and limits ([`resolve_extent`]).
//!
//! # Example
//!
//! ```
//! use padext_ir::{PadParams, Vec3};
//! use padext_resolver::{resolve_extent, visibility};
//!
//! let params = PadParams {
//!     length: 10.0,
//!     midplane: true,
//!     ..PadParams::default()
//! };
//! let vis = visibility(params.mode, params.midplane, params.reversed);
//! assert!(vis.length_visible && !vis.reversed_enabled);
//!
//! let extent = resolve_extent(&params, Vec3::new(0.0, 0.0, 1.0), None).unwrap();
//! assert_eq!(extent.forward, 5.0);
//! assert_eq!(extent.backward, 5.0);
//! ```

mod direction;
mod extent;
mod visibility;

pub use direction::{CandidateList, DirectionCandidate, DirectionOutcome, ResolvedDirection};
pub use extent::{resolve_extent, ExtentLimit, ExtrusionExtent};
pub use visibility::{clamp_dimension_length, validate_flags, visibility, FlagGates, Visibility};

use thiserror::Error;

/// Geometric tolerance below which a vector or extent counts as zero.
pub const GEOM_TOLERANCE: f64 = 1e-7;

/// Smallest nominal length the dialog accepts for a fixed-length extrusion.
/// Stored values below this clamp to [`DEFAULT_LENGTH`] on entering
/// Dimension mode.
pub const MIN_DIMENSION_LENGTH: f64 = 1e-3;

/// Fallback length applied when entering Dimension mode with a degenerate
/// stored length.
pub const DEFAULT_LENGTH: f64 = 5.0;

/// Errors from extent resolution.
///
/// These are the degenerate-geometry conditions a recompute reports back to
/// the operator; none of them invalidates the edit buffer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// No usable direction vector could be derived.
    #[error("extrusion direction is zero")]
    DegenerateDirection,

    /// The nominal extrusion length is zero.
    #[error("extrusion length is zero")]
    ZeroLength,

    /// Lengths are measured along the sketch normal but the direction is
    /// perpendicular to it.
    #[error("extrusion direction is perpendicular to the sketch normal")]
    NormalPerpendicular,

    /// Mode is up-to-face but no terminating face has been selected.
    #[error("no terminating face selected")]
    MissingFaceReference,

    /// A reference axis is set but its direction could not be queried.
    #[error("reference axis direction is unavailable")]
    MissingAxisDirection,
}
