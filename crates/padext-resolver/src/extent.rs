//! Canonical extrusion vector and limits from a parameter bag.

use nalgebra::Vector3;
use padext_ir::{ExtrudeMode, FaceRef, PadParams, Vec3};

use crate::{GEOM_TOLERANCE, ResolveError};

/// How the extrusion terminates.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtentLimit {
    /// Fixed forward/backward distances; nothing else terminates the sweep.
    Blind,
    /// Through to the first face of the support, plus a signed clearance.
    ThroughFirst {
        /// Signed clearance from the terminating face.
        clearance: f64,
    },
    /// Through to the last face of the support, plus a signed clearance.
    ThroughLast {
        /// Signed clearance from the terminating face.
        clearance: f64,
    },
    /// Up to a named face or datum plane, plus a signed clearance.
    Face {
        /// The terminating face.
        target: FaceRef,
        /// Signed clearance from the terminating face.
        clearance: f64,
    },
}

/// The canonical, internally consistent extrusion specification.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrusionExtent {
    /// Unit sweep direction, reversal already applied.
    pub direction: Vector3<f64>,
    /// Distance swept along `direction` from the sketch plane.
    pub forward: f64,
    /// Distance swept opposite `direction` from the sketch plane.
    pub backward: f64,
    /// Terminating condition.
    pub limit: ExtentLimit,
    /// The source components actually used, before normalization and
    /// reversal. Differs from the stored custom vector when a null custom
    /// vector fell back to the sketch normal; hosts refresh their component
    /// fields from this.
    pub effective_direction: Vec3,
    /// True when a null custom vector fell back to the sketch normal.
    pub custom_fallback: bool,
}

fn to_na(v: Vec3) -> Vector3<f64> {
    Vector3::new(v.x, v.y, v.z)
}

/// Resolve the extrusion vector and limits for a parameter bag.
///
/// `sketch_normal` is the plane normal of the pad's profile.
/// `axis_direction` is the direction of `params.reference_axis`, queried
/// from the document by the caller; it is required whenever a reference
/// axis is stored and the custom source is inactive.
///
/// A null custom vector falls back to the sketch normal rather than
/// failing; the substituted components are reported through
/// [`ExtrusionExtent::effective_direction`].
///
/// # Errors
///
/// [`ResolveError`] on degenerate direction, zero extent, a direction
/// perpendicular to the normal while lengths are measured along the normal,
/// a missing face reference in up-to-face mode, or an unavailable axis
/// direction.
pub fn resolve_extent(
    params: &PadParams,
    sketch_normal: Vec3,
    axis_direction: Option<Vec3>,
) -> Result<ExtrusionExtent, ResolveError> {
    let normal = to_na(sketch_normal);

    let (base, effective, custom_fallback) = if params.use_custom_vector {
        let custom = to_na(params.direction);
        if custom.norm() < GEOM_TOLERANCE {
            // the kernel substitutes the sketch normal for a null vector
            (normal, sketch_normal, true)
        } else {
            (custom, params.direction, false)
        }
    } else if params.reference_axis.is_some() {
        let dir = axis_direction.ok_or(ResolveError::MissingAxisDirection)?;
        (to_na(dir), dir, false)
    } else {
        (normal, sketch_normal, false)
    };

    if base.norm() < GEOM_TOLERANCE {
        return Err(ResolveError::DegenerateDirection);
    }
    let mut direction = base.normalize();

    // lengths measured along the sketch normal stretch the sweep so its
    // normal projection equals the nominal length
    let scale = if params.along_sketch_normal && !params.use_custom_vector {
        if normal.norm() < GEOM_TOLERANCE {
            return Err(ResolveError::DegenerateDirection);
        }
        let cos = direction.dot(&normal.normalize()).abs();
        if cos < GEOM_TOLERANCE {
            return Err(ResolveError::NormalPerpendicular);
        }
        1.0 / cos
    } else {
        1.0
    };

    if params.reversed {
        direction = -direction;
    }

    let (forward, backward, limit) = match params.mode {
        ExtrudeMode::Dimension => {
            let length = params.length * scale;
            if length < GEOM_TOLERANCE {
                return Err(ResolveError::ZeroLength);
            }
            if params.midplane {
                (length / 2.0, length / 2.0, ExtentLimit::Blind)
            } else {
                (length, 0.0, ExtentLimit::Blind)
            }
        }
        ExtrudeMode::TwoDimensions => {
            let total = (params.length + params.length2) * scale;
            if total < GEOM_TOLERANCE {
                return Err(ResolveError::ZeroLength);
            }
            if params.midplane {
                (total / 2.0, total / 2.0, ExtentLimit::Blind)
            } else {
                (params.length * scale, params.length2 * scale, ExtentLimit::Blind)
            }
        }
        ExtrudeMode::UpToFirst => (
            0.0,
            0.0,
            ExtentLimit::ThroughFirst {
                clearance: params.offset,
            },
        ),
        ExtrudeMode::UpToLast => (
            0.0,
            0.0,
            ExtentLimit::ThroughLast {
                clearance: params.offset,
            },
        ),
        ExtrudeMode::UpToFace => {
            let target = params
                .up_to_face
                .clone()
                .ok_or(ResolveError::MissingFaceReference)?;
            (
                0.0,
                0.0,
                ExtentLimit::Face {
                    target,
                    clearance: params.offset,
                },
            )
        }
    };

    Ok(ExtrusionExtent {
        direction,
        forward,
        backward,
        limit,
        effective_direction: effective,
        custom_fallback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use padext_ir::AxisRef;

    const Z: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    fn params() -> PadParams {
        PadParams {
            length: 10.0,
            length2: 4.0,
            along_sketch_normal: false,
            ..PadParams::default()
        }
    }

    #[test]
    fn blind_forward_only() {
        let extent = resolve_extent(&params(), Z, None).unwrap();
        assert_eq!(extent.forward, 10.0);
        assert_eq!(extent.backward, 0.0);
        assert_eq!(extent.limit, ExtentLimit::Blind);
        assert_eq!(extent.direction, Vector3::new(0.0, 0.0, 1.0));
        assert!(!extent.custom_fallback);
    }

    #[test]
    fn midplane_splits_symmetrically() {
        let p = PadParams {
            midplane: true,
            ..params()
        };
        let extent = resolve_extent(&p, Z, None).unwrap();
        assert_eq!(extent.forward, 5.0);
        assert_eq!(extent.backward, 5.0);
    }

    #[test]
    fn reversed_negates_direction() {
        let p = PadParams {
            reversed: true,
            ..params()
        };
        let extent = resolve_extent(&p, Z, None).unwrap();
        assert_eq!(extent.direction, Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(extent.forward, 10.0);
    }

    #[test]
    fn two_dimensions_forward_and_backward() {
        let p = PadParams {
            mode: ExtrudeMode::TwoDimensions,
            ..params()
        };
        let extent = resolve_extent(&p, Z, None).unwrap();
        assert_eq!(extent.forward, 10.0);
        assert_eq!(extent.backward, 4.0);
    }

    #[test]
    fn two_dimensions_midplane_covers_total() {
        let p = PadParams {
            mode: ExtrudeMode::TwoDimensions,
            midplane: true,
            ..params()
        };
        let extent = resolve_extent(&p, Z, None).unwrap();
        assert_eq!(extent.forward, 7.0);
        assert_eq!(extent.backward, 7.0);
    }

    #[test]
    fn along_normal_rescales_oblique_axis() {
        let p = PadParams {
            along_sketch_normal: true,
            reference_axis: Some(AxisRef::new("Box", "Edge1")),
            ..params()
        };
        let oblique = Vec3::new(1.0, 0.0, 1.0);
        let extent = resolve_extent(&p, Z, Some(oblique)).unwrap();
        // the sweep is stretched so its projection on the normal is 10
        let projected = extent.forward * extent.direction.dot(&Vector3::z());
        assert!((projected - 10.0).abs() < 1e-9);
        assert!((extent.forward - 10.0 * 2f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn oblique_axis_without_along_normal_keeps_nominal_length() {
        let p = PadParams {
            reference_axis: Some(AxisRef::new("Box", "Edge1")),
            ..params()
        };
        let extent = resolve_extent(&p, Z, Some(Vec3::new(1.0, 0.0, 1.0))).unwrap();
        assert!((extent.forward - 10.0).abs() < 1e-9);
    }

    #[test]
    fn along_normal_perpendicular_axis_fails() {
        let p = PadParams {
            along_sketch_normal: true,
            reference_axis: Some(AxisRef::new("Box", "Edge1")),
            ..params()
        };
        let err = resolve_extent(&p, Z, Some(Vec3::new(1.0, 0.0, 0.0))).unwrap_err();
        assert_eq!(err, ResolveError::NormalPerpendicular);
    }

    #[test]
    fn null_custom_vector_falls_back_to_normal() {
        let p = PadParams {
            use_custom_vector: true,
            direction: Vec3::zeros(),
            ..params()
        };
        let extent = resolve_extent(&p, Z, None).unwrap();
        assert!(extent.custom_fallback);
        assert_eq!(extent.effective_direction, Z);
        assert_eq!(extent.direction, Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn custom_vector_used_when_set() {
        let p = PadParams {
            use_custom_vector: true,
            direction: Vec3::new(0.0, 2.0, 0.0),
            ..params()
        };
        let extent = resolve_extent(&p, Z, None).unwrap();
        assert!(!extent.custom_fallback);
        assert_eq!(extent.effective_direction, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(extent.direction, Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn missing_axis_direction_fails() {
        let p = PadParams {
            reference_axis: Some(AxisRef::new("Gone", "Edge1")),
            ..params()
        };
        let err = resolve_extent(&p, Z, None).unwrap_err();
        assert_eq!(err, ResolveError::MissingAxisDirection);
    }

    #[test]
    fn degenerate_normal_fails() {
        let err = resolve_extent(&params(), Vec3::zeros(), None).unwrap_err();
        assert_eq!(err, ResolveError::DegenerateDirection);
    }

    #[test]
    fn zero_length_fails() {
        let p = PadParams {
            length: 0.0,
            ..params()
        };
        assert_eq!(
            resolve_extent(&p, Z, None).unwrap_err(),
            ResolveError::ZeroLength
        );
    }

    #[test]
    fn up_to_face_requires_reference() {
        let p = PadParams {
            mode: ExtrudeMode::UpToFace,
            ..params()
        };
        assert_eq!(
            resolve_extent(&p, Z, None).unwrap_err(),
            ResolveError::MissingFaceReference
        );

        let with_ref = PadParams {
            up_to_face: Some(FaceRef::face("Box", 2)),
            offset: 1.5,
            ..p
        };
        let extent = resolve_extent(&with_ref, Z, None).unwrap();
        assert_eq!(
            extent.limit,
            ExtentLimit::Face {
                target: FaceRef::face("Box", 2),
                clearance: 1.5
            }
        );
    }

    #[test]
    fn through_limits_carry_clearance() {
        let p = PadParams {
            mode: ExtrudeMode::UpToFirst,
            offset: -0.5,
            ..params()
        };
        let extent = resolve_extent(&p, Z, None).unwrap();
        assert_eq!(extent.limit, ExtentLimit::ThroughFirst { clearance: -0.5 });

        let p = PadParams {
            mode: ExtrudeMode::UpToLast,
            offset: 2.0,
            ..p
        };
        let extent = resolve_extent(&p, Z, None).unwrap();
        assert_eq!(extent.limit, ExtentLimit::ThroughLast { clearance: 2.0 });
    }
}
