//! Persisted parameter model for the padext extrusion feature.
//!
//! This crate defines the property bag of a parametric pad (solid extrusion)
//! feature — termination mode, lengths, direction source, reversal and
//! mid-plane flags, face-limit reference — together with a minimal project
//! document that holds the named objects those references point at.
//!
//! The types here are purely declarative. Deciding what extrusion vector and
//! limits a given property bag produces is the job of `padext-resolver`;
//! editing the bag against a live document is the job of `padext-session`.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

mod project;
mod reference;

pub use project::{DocObject, ObjectKind, ProjectDoc};
pub use reference::{format_face_label, parse_face_label, AxisRef, FaceLabel, FaceRef};

/// Errors from parsing persisted parameter values.
#[derive(Debug, Clone, Error)]
pub enum IrError {
    /// A face label string does not match `<label>` or `<label>:Face<N>`.
    #[error("malformed face label: {0:?}")]
    MalformedFaceLabel(String),

    /// An unknown termination-mode property value.
    #[error("unknown termination mode: {0:?}")]
    UnknownMode(String),
}

/// 3D vector with f64 components (conventionally millimeters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// Create a new Vec3.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The zero vector.
    pub const fn zeros() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Termination mode of the extrusion.
///
/// The variants appear in the dialog in the order listed here; any mode is
/// reachable from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExtrudeMode {
    /// Extrude a fixed length from the sketch plane.
    #[default]
    Dimension,
    /// Extrude through to the last face of the support along the direction.
    UpToLast,
    /// Extrude up to the first face of the support along the direction.
    UpToFirst,
    /// Extrude up to a named face or datum plane.
    UpToFace,
    /// Extrude two independent lengths, forward and backward.
    TwoDimensions,
}

impl ExtrudeMode {
    /// All modes, in dialog order.
    pub const ALL: [ExtrudeMode; 5] = [
        ExtrudeMode::Dimension,
        ExtrudeMode::UpToLast,
        ExtrudeMode::UpToFirst,
        ExtrudeMode::UpToFace,
        ExtrudeMode::TwoDimensions,
    ];

    /// The persisted property value for this mode.
    pub fn property_value(self) -> &'static str {
        match self {
            ExtrudeMode::Dimension => "Length",
            ExtrudeMode::UpToLast => "UpToLast",
            ExtrudeMode::UpToFirst => "UpToFirst",
            ExtrudeMode::UpToFace => "UpToFace",
            ExtrudeMode::TwoDimensions => "TwoLengths",
        }
    }

    /// Parse a persisted property value back into a mode.
    pub fn from_property_value(value: &str) -> Result<Self, IrError> {
        Self::ALL
            .into_iter()
            .find(|m| m.property_value() == value)
            .ok_or_else(|| IrError::UnknownMode(value.to_string()))
    }

    /// Whether this mode terminates at a named face reference.
    pub fn uses_face_reference(self) -> bool {
        self == ExtrudeMode::UpToFace
    }
}

impl fmt::Display for ExtrudeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.property_value())
    }
}

/// The persisted property bag of a pad feature.
///
/// This mirrors what the document stores for the feature. An editing session
/// hydrates a working copy from it, mutates the copy field by field, and
/// commits the copy back as one ordered batch (see `padext-session`).
///
/// Numeric direction components persist even while the custom source is
/// inactive, so re-selecting "custom direction" restores the previous vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PadParams {
    /// Internal name of the sketched profile object being extruded.
    pub profile: String,
    /// Termination mode.
    pub mode: ExtrudeMode,
    /// Nominal length (Dimension, and forward side of TwoDimensions).
    pub length: f64,
    /// Backward length (TwoDimensions only).
    pub length2: f64,
    /// Signed clearance from the terminating face (UpTo* modes).
    pub offset: f64,
    /// When true the stored `direction` vector is the active source.
    pub use_custom_vector: bool,
    /// Custom direction components (kept even while inactive).
    pub direction: Vec3,
    /// Measure the extent along the sketch normal even when the direction
    /// comes from a reference axis. Not meaningful for a custom vector.
    pub along_sketch_normal: bool,
    /// Explicit direction source, if one was picked.
    pub reference_axis: Option<AxisRef>,
    /// Extrude opposite to the resolved direction.
    pub reversed: bool,
    /// Extrude symmetrically about the sketch plane.
    pub midplane: bool,
    /// Terminating face, meaningful only when `mode == UpToFace`.
    pub up_to_face: Option<FaceRef>,
}

impl Default for PadParams {
    fn default() -> Self {
        Self {
            profile: String::new(),
            mode: ExtrudeMode::Dimension,
            length: 10.0,
            length2: 10.0,
            offset: 0.0,
            use_custom_vector: false,
            direction: Vec3::new(0.0, 0.0, 1.0),
            along_sketch_normal: true,
            reference_axis: None,
            reversed: false,
            midplane: false,
            up_to_face: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_property_values_roundtrip() {
        for mode in ExtrudeMode::ALL {
            let value = mode.property_value();
            assert_eq!(ExtrudeMode::from_property_value(value).unwrap(), mode);
        }
    }

    #[test]
    fn mode_unknown_value_rejected() {
        let err = ExtrudeMode::from_property_value("ThroughAll").unwrap_err();
        assert!(matches!(err, IrError::UnknownMode(_)));
    }

    #[test]
    fn mode_dialog_order_is_stable() {
        let values: Vec<_> = ExtrudeMode::ALL
            .iter()
            .map(|m| m.property_value())
            .collect();
        assert_eq!(
            values,
            ["Length", "UpToLast", "UpToFirst", "UpToFace", "TwoLengths"]
        );
    }

    #[test]
    fn default_params() {
        let params = PadParams::default();
        assert_eq!(params.mode, ExtrudeMode::Dimension);
        assert_eq!(params.length, 10.0);
        assert!(!params.use_custom_vector);
        assert!(params.along_sketch_normal);
        assert!(params.reference_axis.is_none());
        assert!(params.up_to_face.is_none());
    }

    #[test]
    fn params_serde_roundtrip() {
        let params = PadParams {
            profile: "Sketch".to_string(),
            mode: ExtrudeMode::UpToFace,
            up_to_face: Some(FaceRef::face("Box", 3)),
            reference_axis: Some(AxisRef::new("Box", "Edge1")),
            ..PadParams::default()
        };
        let json = serde_json::to_string(&params).unwrap();
        let restored: PadParams = serde_json::from_str(&json).unwrap();
        assert_eq!(params, restored);
    }
}
