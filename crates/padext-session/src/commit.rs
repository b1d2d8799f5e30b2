//! The ordered commit script.
//!
//! Accepting the dialog turns the edit buffer into a list of property
//! assignments. The field order is fixed — recorded macros replay the list
//! literally, so reordering it would change recorded history.

use std::fmt;

use padext_ir::{ExtrudeMode, PadParams};

/// One `property = value` statement of the commit script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyAssignment {
    /// Property name.
    pub name: &'static str,
    /// Formatted value.
    pub value: String,
}

impl PropertyAssignment {
    fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

impl fmt::Display for PropertyAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value)
    }
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

/// Produce the full commit script for a parameter bag.
///
/// Always emits every field, in this order: length, length2, custom-vector
/// flag, direction vector, reference axis, along-normal flag, mode, face
/// reference, reversed, midplane, offset. The face reference is the literal
/// `None` unless the mode is up-to-face and a reference is set, so the
/// script is never partial.
pub fn commit_script(params: &PadParams) -> Vec<PropertyAssignment> {
    let reference_axis = params
        .reference_axis
        .as_ref()
        .map_or_else(|| "None".to_string(), |axis| axis.commit_form());

    let up_to_face = match (params.mode, &params.up_to_face) {
        (ExtrudeMode::UpToFace, Some(face)) => face.commit_form(),
        _ => "None".to_string(),
    };

    vec![
        PropertyAssignment::new("Length", params.length.to_string()),
        PropertyAssignment::new("Length2", params.length2.to_string()),
        PropertyAssignment::new("UseCustomVector", flag(params.use_custom_vector)),
        PropertyAssignment::new("Direction", params.direction.to_string()),
        PropertyAssignment::new("ReferenceAxis", reference_axis),
        PropertyAssignment::new("AlongSketchNormal", flag(params.along_sketch_normal)),
        PropertyAssignment::new("Type", params.mode.property_value()),
        PropertyAssignment::new("UpToFace", up_to_face),
        PropertyAssignment::new("Reversed", flag(params.reversed)),
        PropertyAssignment::new("Midplane", flag(params.midplane)),
        PropertyAssignment::new("Offset", params.offset.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use padext_ir::{AxisRef, FaceRef};

    #[test]
    fn statement_order_is_fixed() {
        let script = commit_script(&PadParams::default());
        let names: Vec<_> = script.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            [
                "Length",
                "Length2",
                "UseCustomVector",
                "Direction",
                "ReferenceAxis",
                "AlongSketchNormal",
                "Type",
                "UpToFace",
                "Reversed",
                "Midplane",
                "Offset",
            ]
        );
    }

    #[test]
    fn up_to_face_without_reference_emits_none() {
        let params = PadParams {
            mode: ExtrudeMode::UpToFace,
            up_to_face: None,
            ..PadParams::default()
        };
        let script = commit_script(&params);
        let stmt = script.iter().find(|s| s.name == "UpToFace").unwrap();
        assert_eq!(stmt.value, "None");
        assert_eq!(script.len(), 11);
    }

    #[test]
    fn up_to_face_reference_only_emitted_in_face_mode() {
        let params = PadParams {
            mode: ExtrudeMode::Dimension,
            up_to_face: Some(FaceRef::face("Box", 3)),
            ..PadParams::default()
        };
        let stmt = commit_script(&params)
            .into_iter()
            .find(|s| s.name == "UpToFace")
            .unwrap();
        assert_eq!(stmt.value, "None");

        let params = PadParams {
            mode: ExtrudeMode::UpToFace,
            ..params
        };
        let stmt = commit_script(&params)
            .into_iter()
            .find(|s| s.name == "UpToFace")
            .unwrap();
        assert_eq!(stmt.value, "Box:Face3");
    }

    #[test]
    fn statements_render_as_assignments() {
        let params = PadParams {
            length: 25.0,
            reference_axis: Some(AxisRef::new("Box", "Edge1")),
            reversed: true,
            ..PadParams::default()
        };
        let script = commit_script(&params);
        assert_eq!(script[0].to_string(), "Length = 25");
        assert_eq!(script[3].to_string(), "Direction = (0, 0, 1)");
        assert_eq!(script[4].to_string(), "ReferenceAxis = Box:Edge1");
        assert_eq!(script[6].to_string(), "Type = Length");
        assert_eq!(script[8].to_string(), "Reversed = 1");
    }
}
