//! References to document objects: direction axes and terminating faces.
//!
//! Two string forms exist for a face reference. The *display* form uses the
//! object's user label (`Box:Face3`, or a bare label for a datum plane) and
//! is what the operator types and reads. The *commit* form uses the object's
//! internal document name and is what gets written back to the property
//! store. Parsing here is purely lexical; resolving a label to an internal
//! name needs the document and lives behind the `LabelLookup` collaborator.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::IrError;

/// A reference to an explicit direction source: an edge, axis, or face
/// normal of a named document object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisRef {
    /// Internal name of the referenced object.
    pub object: String,
    /// Sub-element naming the axis within the object, e.g. `Edge1` or
    /// `N_Axis` for a sketch's own normal.
    pub sub_element: String,
}

impl AxisRef {
    /// Create a new axis reference.
    pub fn new(object: impl Into<String>, sub_element: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            sub_element: sub_element.into(),
        }
    }

    /// The commit form, `Object:SubElement`.
    pub fn commit_form(&self) -> String {
        format!("{}:{}", self.object, self.sub_element)
    }
}

impl fmt::Display for AxisRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.object, self.sub_element)
    }
}

/// A reference to the face terminating an up-to-face extrusion.
///
/// `face == None` references a datum plane rather than a solid's face.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceRef {
    /// Internal name of the referenced object.
    pub object: String,
    /// 1-based face index, or `None` for a datum plane.
    pub face: Option<u32>,
}

impl FaceRef {
    /// Reference face `face` of object `object`.
    pub fn face(object: impl Into<String>, face: u32) -> Self {
        Self {
            object: object.into(),
            face: Some(face),
        }
    }

    /// Reference a datum plane.
    pub fn datum(object: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            face: None,
        }
    }

    /// The commit form: `Object:FaceN`, or the bare object name for a datum.
    pub fn commit_form(&self) -> String {
        format_face_label(&self.object, self.face)
    }
}

/// A face reference in display form: the object's user label plus an
/// optional face number, before label resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceLabel {
    /// The object label as typed.
    pub label: String,
    /// 1-based face index, or `None` for a datum plane.
    pub face: Option<u32>,
}

/// Parse a typed face label.
///
/// `Box:Face3` yields the label `Box` and face 3; a bare label with no
/// `:Face<N>` suffix is a datum-plane reference. Face numbers are 1-based.
///
/// # Errors
///
/// [`IrError::MalformedFaceLabel`] when the text is empty, the suffix after
/// `:` is not `Face<N>`, or `N` is zero.
pub fn parse_face_label(text: &str) -> Result<FaceLabel, IrError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(IrError::MalformedFaceLabel(text.to_string()));
    }
    match text.split_once(':') {
        None => Ok(FaceLabel {
            label: text.to_string(),
            face: None,
        }),
        Some((label, suffix)) => {
            let digits = suffix
                .strip_prefix("Face")
                .ok_or_else(|| IrError::MalformedFaceLabel(text.to_string()))?;
            let face: u32 = digits
                .parse()
                .map_err(|_| IrError::MalformedFaceLabel(text.to_string()))?;
            if face == 0 || label.is_empty() {
                return Err(IrError::MalformedFaceLabel(text.to_string()));
            }
            Ok(FaceLabel {
                label: label.to_string(),
                face: Some(face),
            })
        }
    }
}

/// Format a face reference for display or commit.
///
/// The inverse of [`parse_face_label`]: `("Box", Some(3))` becomes
/// `Box:Face3`, `("Plane", None)` stays `Plane`.
pub fn format_face_label(name: &str, face: Option<u32>) -> String {
    match face {
        Some(n) => format!("{name}:Face{n}"),
        None => name.to_string(),
    }
}
