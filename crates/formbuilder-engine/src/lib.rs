#![forbid(unsafe_code)]
#![deny(unreachable_patterns)]

//! Derived-field formulas for form schemas: parsing, validation, evaluation and recompute.
//!
//! A derived field carries a [`formbuilder_model::DerivedFieldConfig`]: a list of parent field
//! ids plus a formula of the shape `name(args)` (see [`parser`]). The function named by the
//! formula is looked up in an inventory-backed registry (see [`functions`]) which also
//! describes how many parents it takes and what types they must have.
//!
//! The two entry points used by hosts are:
//! - [`validate_derived`] / [`commit_draft`], called by the field editor whenever the formula
//!   text or the parent selection changes;
//! - [`FormSession`] (or the lower level [`recompute`]), which keeps derived values consistent
//!   as the user fills in the form.
//!
//! Evaluation never fails. A formula that cannot be computed from the current values yields the
//! empty text value, so a broken derivation shows up as a blank field rather than an error.

pub mod coercion;
pub mod date;
pub mod functions;
pub mod graph;
pub mod parser;

mod eval;
mod recalc;
mod session;
mod settings;
mod snapshot;
mod validate;

pub use eval::{evaluate_formula, Clock, Evaluator, FixedClock, SystemClock};
pub use graph::{CycleError, ParentGraph};
pub use parser::{parse_formula, FormulaCall, ParseError, ParseErrorKind};
pub use recalc::{recompute, recompute_pass, RecalcError, RecalcReport, ValueChange};
pub use session::{FormSession, RecalcStatus, SessionError};
pub use settings::{EngineSettings, RecalcSettings, ValidationOptions};
pub use snapshot::ValueSnapshot;
pub use validate::{
    commit_draft, selectable_parents, validate_derived, validate_draft, DerivedFieldDraft,
    DerivedFieldError, DraftOutcome,
};
