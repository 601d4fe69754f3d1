//! # Engine Module
//!
//! Core framework implementation.
//!
//! This module contains the building blocks of the component framework:
//! - Layout computation for ordered field lists
//! - The dependency-ordered aggregate and its construction machinery
//! - Component capability taxonomy
//! - Capability-filtered dispatch
//! - Static and dynamic composite wrappers
//!
//! Public API exposure is controlled by `lib.rs`.

pub mod layout;
pub mod error;
pub mod field;
pub(crate) mod arena;
pub mod aggregate;
pub mod component;
pub mod dispatch;
pub mod composite;
mod tuples;
