//! Per-mode control visibility and the midplane/reversed exclusion gates.

use padext_ir::ExtrudeMode;

use crate::{DEFAULT_LENGTH, MIN_DIMENSION_LENGTH};

/// Which controls are visible and enabled for a given mode and flag state.
///
/// Computed fresh from state on every transition; never mutated
/// incrementally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Visibility {
    /// The nominal length field is shown.
    pub length_visible: bool,
    /// The second length field is shown (TwoDimensions).
    pub length2_visible: bool,
    /// The offset field is shown (UpTo* modes).
    pub offset_visible: bool,
    /// The midplane toggle accepts input.
    pub midplane_enabled: bool,
    /// The midplane toggle is shown.
    pub midplane_visible: bool,
    /// The reversed toggle accepts input.
    pub reversed_enabled: bool,
    /// The reversed toggle is shown.
    pub reversed_visible: bool,
    /// The face-reference field accepts input (UpToFace).
    pub face_ref_editable: bool,
}

/// Enablement gates for the midplane and reversed toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagGates {
    /// Midplane may be toggled on.
    pub midplane_enabled: bool,
    /// Reversed may be toggled on.
    pub reversed_enabled: bool,
}

/// Mutual exclusion between midplane and reversed.
///
/// Setting one flag disables toggling the other on, without clearing the
/// other's stored value. Applies to the fixed-length modes; the up-to modes
/// keep reversed enabled unconditionally (see [`visibility`]).
pub fn validate_flags(midplane: bool, reversed: bool) -> FlagGates {
    FlagGates {
        midplane_enabled: !reversed,
        reversed_enabled: !midplane,
    }
}

/// Compute control visibility for a mode and the current flag state.
///
/// Everything starts hidden/disabled and is switched on per mode, so a
/// field never stays visible by accident when modes change.
pub fn visibility(mode: ExtrudeMode, midplane: bool, reversed: bool) -> Visibility {
    let mut vis = Visibility::default();
    let gates = validate_flags(midplane, reversed);

    match mode {
        ExtrudeMode::Dimension => {
            vis.length_visible = true;
            vis.midplane_visible = true;
            vis.midplane_enabled = gates.midplane_enabled;
            vis.reversed_visible = true;
            vis.reversed_enabled = gates.reversed_enabled;
        }
        ExtrudeMode::UpToLast | ExtrudeMode::UpToFirst => {
            vis.offset_visible = true;
            vis.reversed_visible = true;
            vis.reversed_enabled = true;
        }
        ExtrudeMode::UpToFace => {
            vis.offset_visible = true;
            vis.face_ref_editable = true;
            vis.reversed_visible = true;
            vis.reversed_enabled = true;
        }
        ExtrudeMode::TwoDimensions => {
            vis.length_visible = true;
            vis.length2_visible = true;
            vis.midplane_visible = true;
            vis.midplane_enabled = gates.midplane_enabled;
            vis.reversed_visible = true;
            vis.reversed_enabled = gates.reversed_enabled;
        }
    }

    vis
}

/// Clamp a stored length on entry into Dimension mode.
///
/// A near-zero length would make a degenerate solid, so it snaps to
/// [`DEFAULT_LENGTH`]; anything above the tolerance passes through
/// untouched.
pub fn clamp_dimension_length(length: f64) -> f64 {
    if length < MIN_DIMENSION_LENGTH {
        DEFAULT_LENGTH
    } else {
        length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutual_exclusion_in_fixed_length_modes() {
        for mode in [ExtrudeMode::Dimension, ExtrudeMode::TwoDimensions] {
            assert!(!visibility(mode, true, false).reversed_enabled);
            assert!(!visibility(mode, false, true).midplane_enabled);
            // both off: both enabled
            let vis = visibility(mode, false, false);
            assert!(vis.midplane_enabled && vis.reversed_enabled);
        }
    }

    #[test]
    fn reversed_always_enabled_in_up_to_modes() {
        for mode in [
            ExtrudeMode::UpToLast,
            ExtrudeMode::UpToFirst,
            ExtrudeMode::UpToFace,
        ] {
            assert!(visibility(mode, true, false).reversed_enabled);
            assert!(visibility(mode, false, true).reversed_enabled);
            assert!(!visibility(mode, false, false).midplane_visible);
        }
    }

    #[test]
    fn fields_per_mode() {
        let dim = visibility(ExtrudeMode::Dimension, false, false);
        assert!(dim.length_visible && !dim.length2_visible && !dim.offset_visible);
        assert!(!dim.face_ref_editable);

        let two = visibility(ExtrudeMode::TwoDimensions, false, false);
        assert!(two.length_visible && two.length2_visible && !two.offset_visible);

        let last = visibility(ExtrudeMode::UpToLast, false, false);
        assert!(!last.length_visible && last.offset_visible && !last.face_ref_editable);

        let face = visibility(ExtrudeMode::UpToFace, false, false);
        assert!(face.offset_visible && face.face_ref_editable);
    }

    #[test]
    fn validate_flags_never_clears() {
        // The gates only disable toggling; both stored flags can be true at
        // once and each side then sees the other disabled.
        let gates = validate_flags(true, true);
        assert!(!gates.midplane_enabled && !gates.reversed_enabled);
    }

    #[test]
    fn clamp_below_tolerance() {
        assert_eq!(clamp_dimension_length(0.0001), DEFAULT_LENGTH);
        assert_eq!(clamp_dimension_length(0.0), DEFAULT_LENGTH);
        assert_eq!(clamp_dimension_length(10.0), 10.0);
        assert_eq!(
            clamp_dimension_length(MIN_DIMENSION_LENGTH),
            MIN_DIMENSION_LENGTH
        );
    }
}
