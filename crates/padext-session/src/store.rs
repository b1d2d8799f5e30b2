//! Collaborator traits for the document side of an editing session, and the
//! project-document implementation used by the CLI and tests.

use padext_ir::{AxisRef, PadParams, ProjectDoc, Vec3};
use thiserror::Error;

/// Geometry the recompute path queries from the document.
pub trait GeometryQuery {
    /// Plane normal of a sketch or datum plane, by internal name.
    fn plane_normal(&self, object: &str) -> Option<Vec3>;

    /// Direction of an axis reference, if it can be resolved.
    fn axis_direction(&self, axis: &AxisRef) -> Option<Vec3>;
}

/// The persisted feature property store.
///
/// The store is the sole source of truth; the session only reads it once at
/// open and writes it back once on acceptance.
pub trait PropertyStore: GeometryQuery {
    /// Read the persisted parameter bag.
    fn load(&self) -> PadParams;

    /// Write the parameter bag back in one batch.
    fn write(&mut self, params: &PadParams);

    /// Whether an object with this internal name is still in the document.
    fn is_present(&self, object: &str) -> bool;

    /// User label of an object, for display.
    fn label_of(&self, object: &str) -> Option<String>;
}

/// Errors from label resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelLookupError {
    /// No object carries the label.
    #[error("no object labeled {0:?}")]
    NotFound(String),

    /// More than one object carries the label.
    #[error("label {0:?} is ambiguous")]
    Ambiguous(String),
}

/// Resolution of user labels to internal object names.
pub trait LabelLookup {
    /// Resolve a label to the unique internal name carrying it.
    fn resolve_label(&self, label: &str) -> Result<String, LabelLookupError>;
}

/// Property store backed by a [`ProjectDoc`].
#[derive(Debug, Clone)]
pub struct DocumentStore {
    doc: ProjectDoc,
}

impl DocumentStore {
    /// Wrap a project document.
    pub fn new(doc: ProjectDoc) -> Self {
        Self { doc }
    }

    /// The wrapped document.
    pub fn doc(&self) -> &ProjectDoc {
        &self.doc
    }

    /// Unwrap the document, e.g. to save it after acceptance.
    pub fn into_doc(self) -> ProjectDoc {
        self.doc
    }
}

impl GeometryQuery for DocumentStore {
    fn plane_normal(&self, object: &str) -> Option<Vec3> {
        self.doc.plane_normal(object)
    }

    fn axis_direction(&self, axis: &AxisRef) -> Option<Vec3> {
        self.doc.axis_direction(axis)
    }
}

impl PropertyStore for DocumentStore {
    fn load(&self) -> PadParams {
        self.doc.pad.clone()
    }

    fn write(&mut self, params: &PadParams) {
        self.doc.pad = params.clone();
    }

    fn is_present(&self, object: &str) -> bool {
        self.doc.is_present(object)
    }

    fn label_of(&self, object: &str) -> Option<String> {
        self.doc.object(object).map(|o| o.label.clone())
    }
}

impl LabelLookup for DocumentStore {
    fn resolve_label(&self, label: &str) -> Result<String, LabelLookupError> {
        let mut matches = self.doc.labeled(label);
        match (matches.next(), matches.next()) {
            (Some(obj), None) => Ok(obj.name.clone()),
            (Some(_), Some(_)) => Err(LabelLookupError::Ambiguous(label.to_string())),
            (None, _) => Err(LabelLookupError::NotFound(label.to_string())),
        }
    }
}
