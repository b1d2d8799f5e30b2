//! A minimal project document: the named objects a pad's references can
//! point at, plus the pad's own property bag.
//!
//! This is the concrete backing used by the CLI and the test suites. A real
//! host application would adapt its own document to the session collaborator
//! traits instead.

use serde::{Deserialize, Serialize};

use crate::{AxisRef, FaceRef, PadParams, Vec3};

/// What a document object is, and the geometry the resolver may query from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ObjectKind {
    /// A 2D sketch with a plane normal.
    Sketch {
        /// Normal of the sketch plane.
        normal: Vec3,
    },
    /// A datum plane with a normal.
    DatumPlane {
        /// Normal of the plane.
        normal: Vec3,
    },
    /// A solid body exposing numbered faces and edges.
    Solid {
        /// Number of faces (face indices are 1-based).
        faces: u32,
        /// Direction of each edge, indexed 1-based as `Edge1`, `Edge2`, ...
        #[serde(default)]
        edges: Vec<Vec3>,
    },
    /// A named axis usable as a direction source.
    Axis {
        /// Direction of the axis.
        direction: Vec3,
    },
}

/// A named object in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocObject {
    /// Internal name, unique within the document.
    pub name: String,
    /// User-facing label, not necessarily unique.
    pub label: String,
    /// Kind and queryable geometry.
    pub kind: ObjectKind,
}

/// A project document: objects plus one pad feature.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectDoc {
    /// Format version string.
    pub version: String,
    /// All named objects.
    pub objects: Vec<DocObject>,
    /// The pad feature under edit.
    pub pad: PadParams,
}

impl ProjectDoc {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            version: "0.1".to_string(),
            ..Self::default()
        }
    }

    /// Look up an object by internal name.
    pub fn object(&self, name: &str) -> Option<&DocObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Whether an object with this internal name exists.
    pub fn is_present(&self, name: &str) -> bool {
        self.object(name).is_some()
    }

    /// All objects carrying a given user label.
    pub fn labeled<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a DocObject> {
        self.objects.iter().filter(move |o| o.label == label)
    }

    /// Plane normal of a sketch or datum plane.
    pub fn plane_normal(&self, name: &str) -> Option<Vec3> {
        match self.object(name)?.kind {
            ObjectKind::Sketch { normal } | ObjectKind::DatumPlane { normal } => Some(normal),
            _ => None,
        }
    }

    /// Direction of an axis reference, if the object and sub-element exist.
    ///
    /// `N_Axis` on a sketch resolves to the sketch normal; `EdgeN` on a
    /// solid resolves to that edge's direction; an axis object resolves to
    /// its own direction regardless of sub-element.
    pub fn axis_direction(&self, axis: &AxisRef) -> Option<Vec3> {
        match &self.object(&axis.object)?.kind {
            ObjectKind::Sketch { normal } if axis.sub_element == "N_Axis" => Some(*normal),
            ObjectKind::Axis { direction } => Some(*direction),
            ObjectKind::Solid { edges, .. } => {
                let n: usize = axis.sub_element.strip_prefix("Edge")?.parse().ok()?;
                edges.get(n.checked_sub(1)?).copied()
            }
            _ => None,
        }
    }

    /// Whether a face reference points at an existing face or datum plane.
    pub fn has_face(&self, face: &FaceRef) -> bool {
        match (self.object(&face.object).map(|o| &o.kind), face.face) {
            (Some(ObjectKind::Solid { faces, .. }), Some(n)) => n >= 1 && n <= *faces,
            (Some(ObjectKind::DatumPlane { .. }), None) => true,
            _ => false,
        }
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
