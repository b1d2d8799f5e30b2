//! Direction-source candidates and their resolution.
//!
//! The direction picker offers a fixed head — sketch normal, a "select
//! reference" sentinel, custom direction — followed by any named axes the
//! operator has picked. Candidates are addressed by value, not by list
//! position, so rebuilding or reordering the list never invalidates a
//! caller's handle on a candidate.

use padext_ir::{AxisRef, PadParams};

/// One selectable direction source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectionCandidate {
    /// The profile's plane normal.
    SketchNormal,
    /// Sentinel entry: picking it starts axis-selection mode instead of
    /// resolving a direction.
    SelectReference,
    /// The stored numeric direction components.
    Custom,
    /// A previously picked named axis.
    NamedAxis(AxisRef),
}

impl DirectionCandidate {
    /// Display text for the picker entry.
    pub fn describe(&self) -> String {
        match self {
            DirectionCandidate::SketchNormal => "Sketch normal".to_string(),
            DirectionCandidate::SelectReference => "Select reference...".to_string(),
            DirectionCandidate::Custom => "Custom direction".to_string(),
            DirectionCandidate::NamedAxis(axis) => axis.to_string(),
        }
    }
}

/// What resolving a candidate means for the edit buffer and the host's
/// direction controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDirection {
    /// New stored reference axis; `None` selects the sketch normal.
    pub reference_axis: Option<AxisRef>,
    /// Whether the stored numeric components become the active source.
    pub use_custom_vector: bool,
    /// The numeric component fields accept input.
    pub custom_fields_enabled: bool,
    /// The along-sketch-normal toggle accepts input. Only meaningful for a
    /// named axis, where the direction can differ from the true normal.
    pub along_normal_enabled: bool,
}

/// Outcome of resolving one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectionOutcome {
    /// The candidate resolved; apply the contained state.
    Resolved(ResolvedDirection),
    /// The sentinel was picked: enter axis-selection mode and resolve again
    /// once a selection event arrives.
    SelectionRequested,
    /// The candidate referenced an object no longer in the document. The
    /// entry has been dropped from the list; do not recompute with it.
    Stale(AxisRef),
}

/// The ordered list of direction candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateList {
    entries: Vec<DirectionCandidate>,
}

impl CandidateList {
    /// Build the list: fixed head plus the stored axis reference, which is
    /// appended exactly once so it always resolves to a listed candidate.
    pub fn build(stored_axis: Option<&AxisRef>) -> Self {
        let mut list = Self {
            entries: vec![
                DirectionCandidate::SketchNormal,
                DirectionCandidate::SelectReference,
                DirectionCandidate::Custom,
            ],
        };
        if let Some(axis) = stored_axis {
            list.ensure_listed(axis);
        }
        list
    }

    /// The candidates in picker order.
    pub fn entries(&self) -> &[DirectionCandidate] {
        &self.entries
    }

    /// Append a named axis if it is not already listed.
    pub fn ensure_listed(&mut self, axis: &AxisRef) {
        let candidate = DirectionCandidate::NamedAxis(axis.clone());
        if !self.entries.contains(&candidate) {
            self.entries.push(candidate);
        }
    }

    /// Whether a named axis is currently listed.
    pub fn lists_axis(&self, axis: &AxisRef) -> bool {
        self.entries
            .contains(&DirectionCandidate::NamedAxis(axis.clone()))
    }

    /// Drop a named axis from the list. Returns whether it was present.
    pub fn remove_axis(&mut self, axis: &AxisRef) -> bool {
        let candidate = DirectionCandidate::NamedAxis(axis.clone());
        let before = self.entries.len();
        self.entries.retain(|e| *e != candidate);
        self.entries.len() != before
    }

    /// The candidate matching a parameter bag's active direction source.
    pub fn selected_for(&self, params: &PadParams) -> DirectionCandidate {
        if params.use_custom_vector {
            return DirectionCandidate::Custom;
        }
        if let Some(axis) = &params.reference_axis {
            if self.lists_axis(axis) {
                return DirectionCandidate::NamedAxis(axis.clone());
            }
        }
        DirectionCandidate::SketchNormal
    }

    /// Resolve a picked candidate.
    ///
    /// `is_present` reports whether an object name still exists in the
    /// document. A named axis whose object is gone yields
    /// [`DirectionOutcome::Stale`] and is removed from the list in the same
    /// call, so a retry cannot trip over it again.
    pub fn resolve(
        &mut self,
        candidate: &DirectionCandidate,
        is_present: impl Fn(&str) -> bool,
    ) -> DirectionOutcome {
        match candidate {
            DirectionCandidate::SketchNormal => DirectionOutcome::Resolved(ResolvedDirection {
                reference_axis: None,
                use_custom_vector: false,
                custom_fields_enabled: false,
                along_normal_enabled: false,
            }),
            DirectionCandidate::SelectReference => DirectionOutcome::SelectionRequested,
            DirectionCandidate::Custom => DirectionOutcome::Resolved(ResolvedDirection {
                reference_axis: None,
                use_custom_vector: true,
                custom_fields_enabled: true,
                along_normal_enabled: false,
            }),
            DirectionCandidate::NamedAxis(axis) => {
                if !is_present(&axis.object) {
                    self.remove_axis(axis);
                    return DirectionOutcome::Stale(axis.clone());
                }
                DirectionOutcome::Resolved(ResolvedDirection {
                    reference_axis: Some(axis.clone()),
                    use_custom_vector: false,
                    custom_fields_enabled: false,
                    along_normal_enabled: true,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis() -> AxisRef {
        AxisRef::new("Box", "Edge1")
    }

    #[test]
    fn build_has_fixed_head() {
        let list = CandidateList::build(None);
        assert_eq!(
            list.entries(),
            [
                DirectionCandidate::SketchNormal,
                DirectionCandidate::SelectReference,
                DirectionCandidate::Custom,
            ]
        );
    }

    #[test]
    fn stored_axis_appended_exactly_once() {
        let a = axis();
        let mut list = CandidateList::build(Some(&a));
        assert_eq!(list.entries().len(), 4);
        assert!(list.lists_axis(&a));

        // re-adding is a no-op
        list.ensure_listed(&a);
        assert_eq!(list.entries().len(), 4);
    }

    #[test]
    fn sketch_normal_resolves_regardless_of_prior_state() {
        for stored in [None, Some(axis())] {
            let mut list = CandidateList::build(stored.as_ref());
            let outcome = list.resolve(&DirectionCandidate::SketchNormal, |_| true);
            match outcome {
                DirectionOutcome::Resolved(r) => {
                    assert_eq!(r.reference_axis, None);
                    assert!(!r.use_custom_vector);
                    assert!(!r.custom_fields_enabled);
                    assert!(!r.along_normal_enabled);
                }
                other => panic!("expected Resolved, got {other:?}"),
            }
        }
    }

    #[test]
    fn custom_enables_component_fields() {
        let mut list = CandidateList::build(None);
        let outcome = list.resolve(&DirectionCandidate::Custom, |_| true);
        match outcome {
            DirectionOutcome::Resolved(r) => {
                assert!(r.use_custom_vector);
                assert!(r.custom_fields_enabled);
                assert!(!r.along_normal_enabled);
            }
            other => panic!("expected Resolved, got {other:?}"),
        }
    }

    #[test]
    fn named_axis_enables_along_normal() {
        let a = axis();
        let mut list = CandidateList::build(Some(&a));
        let outcome = list.resolve(&DirectionCandidate::NamedAxis(a.clone()), |_| true);
        match outcome {
            DirectionOutcome::Resolved(r) => {
                assert_eq!(r.reference_axis, Some(a));
                assert!(!r.custom_fields_enabled);
                assert!(r.along_normal_enabled);
            }
            other => panic!("expected Resolved, got {other:?}"),
        }
    }

    #[test]
    fn sentinel_requests_selection() {
        let mut list = CandidateList::build(None);
        let outcome = list.resolve(&DirectionCandidate::SelectReference, |_| true);
        assert_eq!(outcome, DirectionOutcome::SelectionRequested);
    }

    #[test]
    fn stale_axis_removed_exactly_once() {
        let a = axis();
        let mut list = CandidateList::build(Some(&a));

        let outcome = list.resolve(&DirectionCandidate::NamedAxis(a.clone()), |_| false);
        assert_eq!(outcome, DirectionOutcome::Stale(a.clone()));
        assert!(!list.lists_axis(&a));
        let len_after = list.entries().len();

        // retry: the entry stays gone and is not duplicated by a rebuild
        list.ensure_listed(&a);
        list.remove_axis(&a);
        assert_eq!(list.entries().len(), len_after);
    }

    #[test]
    fn selected_for_tracks_active_source() {
        let a = axis();
        let list = CandidateList::build(Some(&a));

        let mut params = PadParams::default();
        assert_eq!(list.selected_for(&params), DirectionCandidate::SketchNormal);

        params.reference_axis = Some(a.clone());
        assert_eq!(
            list.selected_for(&params),
            DirectionCandidate::NamedAxis(a.clone())
        );

        // custom wins over a stored axis
        params.use_custom_vector = true;
        assert_eq!(list.selected_for(&params), DirectionCandidate::Custom);

        // an unlisted stored axis falls back to the sketch normal
        params.use_custom_vector = false;
        params.reference_axis = Some(AxisRef::new("Other", "Edge2"));
        let fresh = CandidateList::build(None);
        assert_eq!(
            fresh.selected_for(&params),
            DirectionCandidate::SketchNormal
        );
    }
}
