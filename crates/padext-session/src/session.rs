//! The editing session: one dialog's worth of transient state.

use padext_ir::{parse_face_label, AxisRef, ExtrudeMode, FaceRef, PadParams, Vec3};
use padext_resolver::{
    clamp_dimension_length, validate_flags, visibility, CandidateList, DirectionCandidate,
    DirectionOutcome, Visibility,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::commit::{commit_script, PropertyAssignment};
use crate::history::UsageHistory;
use crate::recompute::{GeometryError, RecomputeFeedback, RecomputeService};
use crate::store::{LabelLookup, PropertyStore};

/// Which references a selection sub-state accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionFilter {
    /// Only edges/axes may be picked (direction selection).
    AxisOnly,
    /// Only faces and datum planes may be picked (termination selection).
    FaceOnly,
}

/// A selection event delivered by the host's picking UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    /// An axis was picked.
    Axis(AxisRef),
    /// A face or datum plane was picked.
    Face {
        /// Internal name of the picked object.
        object: String,
        /// 1-based face index, or `None` for a datum plane.
        face: Option<u32>,
    },
    /// The selection was cleared without a pick.
    Cleared,
}

/// One discrete operator edit.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    /// Nominal length changed.
    Length(f64),
    /// Second length changed.
    Length2(f64),
    /// Offset changed.
    Offset(f64),
    /// X component of the custom direction changed.
    DirectionX(f64),
    /// Y component of the custom direction changed.
    DirectionY(f64),
    /// Z component of the custom direction changed.
    DirectionZ(f64),
    /// Along-sketch-normal toggled.
    AlongSketchNormal(bool),
    /// Midplane toggled.
    Midplane(bool),
    /// Reversed toggled.
    Reversed(bool),
    /// Termination mode selected.
    Mode(ExtrudeMode),
    /// A direction candidate was picked.
    Direction(DirectionCandidate),
    /// The face-reference text was edited.
    FaceLabel(String),
    /// Live recomputation toggled.
    LiveUpdate(bool),
}

/// Recompute result attached to an edit.
#[derive(Debug, Clone, PartialEq)]
pub enum RecomputeStatus {
    /// Recompute succeeded.
    Clean(RecomputeFeedback),
    /// No recompute was attempted (live update off, selection pending, or
    /// the edit carried a reported issue).
    Skipped,
    /// Recompute failed; the edit buffer is unchanged and the operator may
    /// correct and retry.
    Failed(GeometryError),
}

/// A recoverable condition reported alongside an edit.
///
/// These never unwind past the session boundary; the edit buffer stays in
/// its last valid state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditIssue {
    /// A stored reference points at an object no longer in the document.
    #[error("referenced object {0:?} is no longer in the document")]
    StaleReference(String),
    /// A typed face label matches no unique object.
    #[error("no unique object matches label {0:?}")]
    UnresolvedLabel(String),
    /// A typed face label is not of the form `label` or `label:Face<N>`.
    #[error("malformed face reference {0:?}")]
    MalformedFaceLabel(String),
}

/// Enablement of the direction controls, derived from the active source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionControls {
    /// The numeric component fields accept input.
    pub custom_fields_enabled: bool,
    /// The along-sketch-normal toggle accepts input.
    pub along_normal_enabled: bool,
}

/// Everything the host updates after one edit.
#[derive(Debug, Clone, PartialEq)]
pub struct EditFeedback {
    /// Control visibility, computed fresh from the new state.
    pub visibility: Visibility,
    /// Direction-control enablement, computed fresh from the new state.
    pub direction_controls: DirectionControls,
    /// The selection sub-state the host should be in, if any.
    pub selection_request: Option<SelectionFilter>,
    /// When set, the host refreshes its direction component fields from
    /// these values (the kernel may have substituted them).
    pub refreshed_direction: Option<Vec3>,
    /// Outcome of the recompute triggered by this edit.
    pub recompute: RecomputeStatus,
    /// A recoverable condition to report to the operator.
    pub issue: Option<EditIssue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelectionMode {
    Inactive,
    Axis,
    Face,
}

/// An exclusive editing session over one pad feature.
///
/// Owns the transient parameter copy from open to accept/cancel. All
/// recoverable error conditions surface through [`EditFeedback`]; the only
/// panics are programming-contract violations (consulting the direction
/// candidate list before it was built).
#[derive(Debug)]
pub struct EditSession<S, R> {
    store: S,
    recompute: R,
    params: PadParams,
    candidates: Option<CandidateList>,
    selection: SelectionMode,
    live_update: bool,
    pending_recompute: bool,
    history: UsageHistory,
    persist_history: bool,
}

impl<S, R> EditSession<S, R>
where
    S: PropertyStore + LabelLookup,
    R: RecomputeService,
{
    /// Hydrate a session from the store without building the direction
    /// candidate list or touching the on-disk usage history. Call
    /// [`initialize`](Self::initialize) before any direction operation.
    pub fn new(store: S, recompute: R) -> Self {
        let params = store.load();
        Self {
            store,
            recompute,
            params,
            candidates: None,
            selection: SelectionMode::Inactive,
            live_update: true,
            pending_recompute: false,
            history: UsageHistory::default(),
            persist_history: false,
        }
    }

    /// Open a session for an existing feature: hydrate, load the usage
    /// history, build the candidate list and run the initial recompute.
    pub fn open(store: S, recompute: R) -> Self {
        let mut session = Self::new(store, recompute);
        session.history = UsageHistory::load();
        session.persist_history = true;
        session.initialize();
        session
    }

    /// Open a session for a newly created feature: as [`open`](Self::open),
    /// but the numeric fields are seeded from the usage history first.
    pub fn open_new(store: S, recompute: R) -> Self {
        let mut session = Self::new(store, recompute);
        session.history = UsageHistory::load();
        session.persist_history = true;
        session.history.seed(&mut session.params);
        session.initialize();
        session
    }

    /// Build the direction candidate list and enter face selection if the
    /// stored mode needs a reference that is not set yet.
    pub fn initialize(&mut self) -> EditFeedback {
        self.candidates = Some(CandidateList::build(self.params.reference_axis.as_ref()));
        if self.params.mode == ExtrudeMode::UpToFace && self.params.up_to_face.is_none() {
            self.selection = SelectionMode::Face;
        }
        let recompute = self.run_recompute();
        self.feedback(recompute)
    }

    /// The current edit buffer.
    pub fn params(&self) -> &PadParams {
        &self.params
    }

    /// Control visibility for the current state.
    pub fn visibility(&self) -> Visibility {
        visibility(self.params.mode, self.params.midplane, self.params.reversed)
    }

    /// Direction-control enablement for the current state.
    pub fn direction_controls(&self) -> DirectionControls {
        DirectionControls {
            custom_fields_enabled: self.params.use_custom_vector,
            along_normal_enabled: !self.params.use_custom_vector
                && self.params.reference_axis.is_some(),
        }
    }

    /// The direction candidate list.
    ///
    /// # Panics
    ///
    /// If called before [`initialize`](Self::initialize) built the list.
    pub fn candidates(&self) -> &CandidateList {
        self.candidates
            .as_ref()
            .expect("direction candidate list not initialized")
    }

    /// The stored reference axis.
    ///
    /// # Panics
    ///
    /// If called before [`initialize`](Self::initialize) built the
    /// candidate list.
    pub fn reference_axis(&self) -> Option<&AxisRef> {
        assert!(
            self.candidates.is_some(),
            "direction candidate list not initialized"
        );
        self.params.reference_axis.as_ref()
    }

    /// The active selection sub-state, if any.
    pub fn selection_active(&self) -> Option<SelectionFilter> {
        match self.selection {
            SelectionMode::Inactive => None,
            SelectionMode::Axis => Some(SelectionFilter::AxisOnly),
            SelectionMode::Face => Some(SelectionFilter::FaceOnly),
        }
    }

    /// The face reference in display form (user label plus face number).
    pub fn face_display(&self) -> Option<String> {
        let face = self.params.up_to_face.as_ref()?;
        let label = self
            .store
            .label_of(&face.object)
            .unwrap_or_else(|| face.object.clone());
        Some(padext_ir::format_face_label(&label, face.face))
    }

    /// Apply one operator edit to the buffer.
    pub fn apply_edit(&mut self, edit: FieldEdit) -> EditFeedback {
        match edit {
            FieldEdit::Length(value) => {
                self.params.length = value;
                self.simple_edit()
            }
            FieldEdit::Length2(value) => {
                self.params.length2 = value;
                self.simple_edit()
            }
            FieldEdit::Offset(value) => {
                self.params.offset = value;
                self.simple_edit()
            }
            FieldEdit::DirectionX(value) => {
                self.params.direction.x = value;
                self.direction_edit()
            }
            FieldEdit::DirectionY(value) => {
                self.params.direction.y = value;
                self.direction_edit()
            }
            FieldEdit::DirectionZ(value) => {
                self.params.direction.z = value;
                self.direction_edit()
            }
            FieldEdit::AlongSketchNormal(on) => {
                self.params.along_sketch_normal = on;
                self.simple_edit()
            }
            FieldEdit::Midplane(on) => {
                let gates = validate_flags(self.params.midplane, self.params.reversed);
                if on && !gates.midplane_enabled {
                    return self.feedback(RecomputeStatus::Skipped);
                }
                self.params.midplane = on;
                self.simple_edit()
            }
            FieldEdit::Reversed(on) => {
                let gates = validate_flags(self.params.midplane, self.params.reversed);
                if on && !gates.reversed_enabled {
                    return self.feedback(RecomputeStatus::Skipped);
                }
                self.params.reversed = on;
                self.direction_edit()
            }
            FieldEdit::Mode(mode) => self.set_mode(mode),
            FieldEdit::Direction(candidate) => self.pick_direction(candidate),
            FieldEdit::FaceLabel(text) => self.face_label_edit(&text),
            FieldEdit::LiveUpdate(on) => {
                self.live_update = on;
                let recompute = if on && self.pending_recompute {
                    self.run_recompute()
                } else {
                    RecomputeStatus::Skipped
                };
                self.feedback(recompute)
            }
        }
    }

    /// Enter a selection sub-state explicitly. At most one is active; a new
    /// request replaces the previous one.
    pub fn begin_selection(&mut self, filter: SelectionFilter) -> EditFeedback {
        self.selection = match filter {
            SelectionFilter::AxisOnly => SelectionMode::Axis,
            SelectionFilter::FaceOnly => SelectionMode::Face,
        };
        self.feedback(RecomputeStatus::Skipped)
    }

    /// Leave the selection sub-state without a pick. Enablement reverts to
    /// whatever the current flags dictate, and any recompute suppressed
    /// during selection is caught up.
    pub fn cancel_selection(&mut self) -> EditFeedback {
        self.selection = SelectionMode::Inactive;
        let recompute = if self.pending_recompute {
            self.run_recompute()
        } else {
            RecomputeStatus::Skipped
        };
        self.feedback(recompute)
    }

    /// Handle a selection event from the picking UI.
    ///
    /// Events that do not match the active sub-state are ignored.
    pub fn selection_event(&mut self, event: SelectionEvent) -> EditFeedback {
        match (self.selection, event) {
            (SelectionMode::Axis, SelectionEvent::Axis(axis)) => {
                self.selection = SelectionMode::Inactive;
                self.candidates
                    .as_mut()
                    .expect("direction candidate list not initialized")
                    .ensure_listed(&axis);
                self.params.reference_axis = Some(axis);
                self.params.use_custom_vector = false;
                let recompute = self.run_recompute();
                let mut feedback = self.feedback(recompute);
                feedback.refreshed_direction = Some(self.params.direction);
                feedback
            }
            (SelectionMode::Face, SelectionEvent::Face { object, face }) => {
                self.params.up_to_face = Some(FaceRef { object, face });
                self.selection = SelectionMode::Inactive;
                let recompute = self.run_recompute();
                self.feedback(recompute)
            }
            (SelectionMode::Face, SelectionEvent::Cleared) => {
                // stay in selection mode; the operator picked nothing yet
                self.params.up_to_face = None;
                self.feedback(RecomputeStatus::Skipped)
            }
            _ => self.feedback(RecomputeStatus::Skipped),
        }
    }

    /// The full ordered commit script for the current buffer.
    pub fn commit(&self) -> Vec<PropertyAssignment> {
        commit_script(&self.params)
    }

    /// Accept the dialog: write the buffer back as one batch, push the
    /// numeric fields to the usage history, and return the store together
    /// with the emitted script.
    pub fn accept(mut self) -> (S, Vec<PropertyAssignment>) {
        let script = commit_script(&self.params);
        self.store.write(&self.params);
        self.history.remember(&self.params);
        if self.persist_history {
            self.history.save();
        }
        (self.store, script)
    }

    /// Cancel the dialog: discard the buffer, return the untouched store.
    pub fn cancel(self) -> S {
        self.store
    }

    fn set_mode(&mut self, mode: ExtrudeMode) -> EditFeedback {
        self.params.mode = mode;
        if mode == ExtrudeMode::Dimension {
            self.params.length = clamp_dimension_length(self.params.length);
        }
        if mode == ExtrudeMode::UpToFace {
            if self.params.up_to_face.is_none() {
                self.selection = SelectionMode::Face;
            }
        } else if self.selection == SelectionMode::Face {
            // only up-to-face needs a face pick; leaving it ends selection
            self.selection = SelectionMode::Inactive;
        }
        let recompute = self.run_recompute();
        self.feedback(recompute)
    }

    fn pick_direction(&mut self, candidate: DirectionCandidate) -> EditFeedback {
        let store = &self.store;
        let outcome = self
            .candidates
            .as_mut()
            .expect("direction candidate list not initialized")
            .resolve(&candidate, |name| store.is_present(name));

        match outcome {
            DirectionOutcome::SelectionRequested => {
                self.selection = SelectionMode::Axis;
                self.feedback(RecomputeStatus::Skipped)
            }
            DirectionOutcome::Stale(axis) => {
                error!("reference axis {axis} points at a deleted object");
                if self.params.reference_axis.as_ref() == Some(&axis) {
                    self.params.reference_axis = None;
                }
                let mut feedback = self.feedback(RecomputeStatus::Skipped);
                feedback.issue = Some(EditIssue::StaleReference(axis.object));
                feedback
            }
            DirectionOutcome::Resolved(resolved) => {
                if self.selection == SelectionMode::Axis {
                    // the operator changed their mind before picking
                    self.selection = SelectionMode::Inactive;
                }
                self.params.reference_axis = resolved.reference_axis;
                self.params.use_custom_vector = resolved.use_custom_vector;
                let recompute = self.run_recompute();
                let mut feedback = self.feedback(recompute);
                feedback.refreshed_direction = Some(self.params.direction);
                feedback
            }
        }
    }

    fn face_label_edit(&mut self, text: &str) -> EditFeedback {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.params.up_to_face = None;
            return self.feedback(RecomputeStatus::Skipped);
        }

        let parsed = match parse_face_label(trimmed) {
            Ok(parsed) => parsed,
            Err(_) => {
                self.params.up_to_face = None;
                warn!("malformed face reference {trimmed:?}");
                let mut feedback = self.feedback(RecomputeStatus::Skipped);
                feedback.issue = Some(EditIssue::MalformedFaceLabel(trimmed.to_string()));
                return feedback;
            }
        };

        match self.store.resolve_label(&parsed.label) {
            Ok(name) => {
                self.params.up_to_face = Some(FaceRef {
                    object: name,
                    face: parsed.face,
                });
                if self.selection == SelectionMode::Face {
                    // a typed reference fulfills the pending selection
                    self.selection = SelectionMode::Inactive;
                }
                let recompute = self.run_recompute();
                self.feedback(recompute)
            }
            Err(lookup) => {
                self.params.up_to_face = None;
                warn!("{lookup}");
                let mut feedback = self.feedback(RecomputeStatus::Skipped);
                feedback.issue = Some(EditIssue::UnresolvedLabel(parsed.label));
                feedback
            }
        }
    }

    fn simple_edit(&mut self) -> EditFeedback {
        let recompute = self.run_recompute();
        self.feedback(recompute)
    }

    fn direction_edit(&mut self) -> EditFeedback {
        let recompute = self.run_recompute();
        let mut feedback = self.feedback(recompute);
        feedback.refreshed_direction = Some(self.params.direction);
        feedback
    }

    fn run_recompute(&mut self) -> RecomputeStatus {
        if !self.live_update || self.selection != SelectionMode::Inactive {
            self.pending_recompute = true;
            return RecomputeStatus::Skipped;
        }
        self.pending_recompute = false;
        match self.recompute.recompute(&self.params, &self.store) {
            Ok(feedback) => {
                if feedback.extent.custom_fallback {
                    // the kernel substituted the sketch normal for a null
                    // custom vector; keep the stored components in step
                    self.params.direction = feedback.extent.effective_direction;
                }
                RecomputeStatus::Clean(feedback)
            }
            Err(e) => {
                error!("{e}");
                RecomputeStatus::Failed(e)
            }
        }
    }

    fn feedback(&self, recompute: RecomputeStatus) -> EditFeedback {
        EditFeedback {
            visibility: self.visibility(),
            direction_controls: self.direction_controls(),
            selection_request: self.selection_active(),
            refreshed_direction: None,
            recompute,
            issue: None,
        }
    }
}
