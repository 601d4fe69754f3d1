//! # Cohort
//!
//! Compile-time component framework for 2D games, built around a single
//! load-bearing primitive: the dependency-ordered aggregate.
//!
//! An aggregate stores a fixed, compile-time-known list of heterogeneous
//! field types contiguously in one memory block with struct-like offsets.
//! Each field is constructed in declaration order by a user-supplied factory
//! that receives the partially-constructed aggregate, so field *k* can read
//! (and keep stable handles into) fields `0..k`. Fields are destroyed in
//! reverse order, mirroring stack unwind semantics, and field storage never
//! relocates for the aggregate's lifetime.
//!
//! ## Design Goals
//! - Struct-packed contiguous storage, no per-field heap indirection
//! - Staged, dependency-aware construction with loud contract checks
//! - Capability-filtered `update`/`draw` dispatch in declaration order
//! - Safe external API; raw pointer arithmetic confined to one module
//!
//! Everything above the aggregate — the component capability taxonomy, the
//! dispatch layer, the static and dynamic composite wrappers — is thin glue
//! over this primitive.

#![forbid(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![allow(clippy::module_inception)]
#![deny(dead_code)]

pub mod engine;

pub mod components;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (Public API)
// ─────────────────────────────────────────────────────────────────────────────

// Aggregate core

pub use engine::aggregate::{
    Aggregate,
    BuildSite,
    FactorySet,
    Partial,
    Sibling,
};

pub use engine::field::{
    FieldAt,
    FieldList,
    FieldMeta,
};

pub use engine::layout::{
    align_of_all,
    align_up,
    offset_in,
    size_of_all,
    Extent,
};

// Capability taxonomy and dispatch

pub use engine::component::{
    Caps,
    Component,
    Drawable,
    FrameTarget,
    Updatable,
};

pub use engine::dispatch::{
    draw_member,
    update_member,
};

// Composite wrappers

pub use engine::composite::{
    ComponentList,
    DynamicSet,
    Entity,
};

pub use engine::error::{
    AccessError,
    FieldUnconstructedError,
    IncompleteBuildError,
    MissingFieldTypeError,
    StageOrderError,
};

// ─────────────────────────────────────────────────────────────────────────────
// Prelude (Optional but recommended)
// ─────────────────────────────────────────────────────────────────────────────

/// Commonly used framework types.
///
/// Import with:
/// ```rust
/// use cohort::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Aggregate,
        BuildSite,
        Caps,
        Component,
        ComponentList,
        Drawable,
        DynamicSet,
        Entity,
        FactorySet,
        FieldAt,
        FieldList,
        FrameTarget,
        Partial,
        Sibling,
        Updatable,
    };
}
