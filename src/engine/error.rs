//! Error types for aggregate construction and field access.
//!
//! This module declares focused, composable error types used across the
//! aggregate construction and access pipeline. Each error carries enough
//! context to make failures actionable while remaining small and cheap to
//! pass around.
//!
//! ## Goals
//! * **Specificity:** Each error type models a single failure mode (reading
//!   an unconstructed field, finishing an incomplete build, driving stages
//!   out of order).
//! * **Ergonomics:** All errors implement [`std::error::Error`] and
//!   [`std::fmt::Display`], and provide `From<T>` conversions into the
//!   aggregate [`AccessError`].
//! * **Actionability:** Structured fields (offending index, live count,
//!   requested type name) make diagnostics useful without reproducing the
//!   failure.
//!
//! ## Contract violations vs. recoverable errors
//! Most of these conditions are programming errors: the `try_*` accessors
//! return them as values, while the plain accessors panic with the same
//! `Display` message. Nothing here is ever silently swallowed — a contract
//! violation either fails to compile (arity, factory yield type, static
//! index bounds) or fails loudly at the first invalid access.

use std::fmt;

/// Returned when a field is read before its construction stage has run.
///
/// During factory construction only fields `[0, live)` are valid; reading a
/// later field would observe uninitialized storage, so the access layer
/// rejects it before any memory is touched.
///
/// ### Fields
/// * `index` — The field index that was read.
/// * `live` — The number of fields constructed at the time of the read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldUnconstructedError {
    /// Index of the field that was read.
    pub index: usize,

    /// Number of fields live at the time of the read.
    pub live: usize,
}

impl fmt::Display for FieldUnconstructedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field {} is not constructed yet ({} fields live)",
            self.index, self.live
        )
    }
}

impl std::error::Error for FieldUnconstructedError {}

/// Returned when a typed lookup finds no field of the requested type in the
/// aggregate's field list.
///
/// Typed access resolves to the *first* field of the requested type; if the
/// type never appears, the lookup fails with this error rather than guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingFieldTypeError {
    /// Rust type name of the requested field type.
    pub requested: &'static str,
}

impl fmt::Display for MissingFieldTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no field of type {} in this aggregate", self.requested)
    }
}

impl std::error::Error for MissingFieldTypeError {}

/// Returned when construction stages are driven out of declaration order.
///
/// A build site accepts exactly one emplacement per stage, in index order;
/// anything else would leave holes in the live prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageOrderError {
    /// The stage the build site expected next.
    pub expected: usize,

    /// The stage that was actually driven.
    pub actual: usize,
}

impl fmt::Display for StageOrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field {} emplaced out of order (stage {} is next)",
            self.actual, self.expected
        )
    }
}

impl std::error::Error for StageOrderError {}

/// Returned when a build site is finished before every field is live.
///
/// An aggregate with unconstructed fields must never exist; the site refuses
/// to hand one out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncompleteBuildError {
    /// Number of fields constructed when `finish` was called.
    pub live: usize,

    /// Number of fields the aggregate requires.
    pub expected: usize,
}

impl fmt::Display for IncompleteBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "aggregate finished with {} of {} fields constructed",
            self.live, self.expected
        )
    }
}

impl std::error::Error for IncompleteBuildError {}

/// Aggregate of field-access failure modes.
///
/// Typed lookups against a partially-constructed aggregate can fail either
/// because the type is absent from the field list, or because the matching
/// field has not been constructed yet. Callers can match on the variant or
/// just display it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    /// The matching field exists but is not constructed yet.
    Unconstructed(FieldUnconstructedError),

    /// No field of the requested type exists.
    MissingType(MissingFieldTypeError),
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessError::Unconstructed(e) => e.fmt(f),
            AccessError::MissingType(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for AccessError {}

impl From<FieldUnconstructedError> for AccessError {
    fn from(e: FieldUnconstructedError) -> Self {
        AccessError::Unconstructed(e)
    }
}

impl From<MissingFieldTypeError> for AccessError {
    fn from(e: MissingFieldTypeError) -> Self {
        AccessError::MissingType(e)
    }
}
