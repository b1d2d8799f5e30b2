#![warn(missing_docs)]

//! Editing session for the padext extrusion feature.
//!
//! An [`EditSession`] owns a transient copy of a pad's persisted parameters
//! for the lifetime of one editing dialog. Field edits mutate the copy and
//! trigger a synchronous recompute through the [`RecomputeService`]
//! collaborator; reference selection runs as a modal sub-state; accepting
//! the dialog writes the copy back to the [`PropertyStore`] as one ordered
//! batch of property assignments, cancelling discards it.
//!
//! The session is strictly single-threaded and event-driven: every mutation
//! happens in direct response to one discrete operator action.
//!
//! # Example
//!
//! ```
//! use padext_ir::{DocObject, ExtrudeMode, ObjectKind, ProjectDoc, Vec3};
//! use padext_session::{DocumentStore, EditSession, ExtentRecompute, FieldEdit};
//!
//! let mut doc = ProjectDoc::new();
//! doc.objects.push(DocObject {
//!     name: "Sketch".into(),
//!     label: "Profile".into(),
//!     kind: ObjectKind::Sketch { normal: Vec3::new(0.0, 0.0, 1.0) },
//! });
//! doc.pad.profile = "Sketch".into();
//!
//! let mut session = EditSession::open(DocumentStore::new(doc), ExtentRecompute);
//! session.apply_edit(FieldEdit::Length(25.0));
//! let script = session.commit();
//! assert_eq!(script[0].to_string(), "Length = 25");
//! ```

mod commit;
mod history;
mod recompute;
mod session;
mod store;

pub use commit::{commit_script, PropertyAssignment};
pub use history::UsageHistory;
pub use recompute::{ExtentRecompute, GeometryError, RecomputeFeedback, RecomputeService};
pub use session::{
    DirectionControls, EditFeedback, EditIssue, EditSession, FieldEdit, RecomputeStatus,
    SelectionEvent, SelectionFilter,
};
pub use store::{DocumentStore, GeometryQuery, LabelLookup, LabelLookupError, PropertyStore};
