//! Recompute delegation.
//!
//! The session treats recomputation as blocking-but-bounded: it hands the
//! current parameter bag to the service, and a failure is reported to the
//! operator without touching the edit buffer.

use padext_ir::PadParams;
use padext_resolver::{resolve_extent, ExtrusionExtent, ResolveError};
use thiserror::Error;

use crate::store::GeometryQuery;

/// A geometry recompute failed.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("recompute failed: {reason}")]
pub struct GeometryError {
    /// Human-readable failure reason.
    pub reason: String,
}

impl GeometryError {
    /// Create a new error with a reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<ResolveError> for GeometryError {
    fn from(err: ResolveError) -> Self {
        Self::new(err.to_string())
    }
}

/// What a successful recompute reports back to the session.
#[derive(Debug, Clone, PartialEq)]
pub struct RecomputeFeedback {
    /// The canonical extent the kernel swept.
    pub extent: ExtrusionExtent,
}

/// The feature-recompute collaborator.
pub trait RecomputeService {
    /// Recompute the feature from the given parameters.
    ///
    /// # Errors
    ///
    /// [`GeometryError`] when the parameters produce degenerate geometry.
    /// The caller keeps its edit buffer unmodified so the operator can
    /// correct and retry.
    fn recompute(
        &mut self,
        params: &PadParams,
        geometry: &dyn GeometryQuery,
    ) -> Result<RecomputeFeedback, GeometryError>;
}

/// Built-in recompute service: resolves and validates the extrusion extent
/// without meshing anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtentRecompute;

impl RecomputeService for ExtentRecompute {
    fn recompute(
        &mut self,
        params: &PadParams,
        geometry: &dyn GeometryQuery,
    ) -> Result<RecomputeFeedback, GeometryError> {
        let normal = geometry
            .plane_normal(&params.profile)
            .ok_or_else(|| GeometryError::new("profile plane normal is unavailable"))?;
        let axis_direction = params
            .reference_axis
            .as_ref()
            .and_then(|axis| geometry.axis_direction(axis));
        let extent = resolve_extent(params, normal, axis_direction)?;
        Ok(RecomputeFeedback { extent })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DocumentStore, PropertyStore};
    use padext_ir::{DocObject, ExtrudeMode, ObjectKind, ProjectDoc, Vec3};

    fn store() -> DocumentStore {
        let mut doc = ProjectDoc::new();
        doc.objects.push(DocObject {
            name: "Sketch".into(),
            label: "Profile".into(),
            kind: ObjectKind::Sketch {
                normal: Vec3::new(0.0, 0.0, 1.0),
            },
        });
        doc.pad.profile = "Sketch".into();
        DocumentStore::new(doc)
    }

    #[test]
    fn recompute_resolves_extent() {
        let store = store();
        let params = store.load();
        let feedback = ExtentRecompute.recompute(&params, &store).unwrap();
        assert_eq!(feedback.extent.forward, 10.0);
    }

    #[test]
    fn missing_profile_is_geometry_error() {
        let store = store();
        let mut params = store.load();
        params.profile = "Gone".into();
        let err = ExtentRecompute.recompute(&params, &store).unwrap_err();
        assert!(err.reason.contains("plane normal"));
    }

    #[test]
    fn degenerate_parameters_are_geometry_errors() {
        let store = store();
        let mut params = store.load();
        params.mode = ExtrudeMode::UpToFace;
        let err = ExtentRecompute.recompute(&params, &store).unwrap_err();
        assert_eq!(err, GeometryError::new("no terminating face selected"));
    }
}
