//! # Component Model and Capability Traits
//!
//! This module defines what a component *is* to the framework: a type-erased
//! game object part with optional per-frame capabilities.
//!
//! ## Purpose
//! Components are heterogeneous; most are plain data (a position, a sprite
//! handle), while some participate in the frame loop by updating state or
//! drawing to a frame target. The capability traits [`Updatable`] and
//! [`Drawable`] mark the participating subset, and [`Component`] lets a
//! container ask any member which capabilities it has without knowing its
//! concrete type.
//!
//! ## Design
//! - A component that implements neither capability still satisfies
//!   [`Component`]: the capability queries default to `None`, and the
//!   dispatch layer turns that into a no-op.
//! - A component that does implement a capability overrides the matching
//!   query to return `Some(self)`. That is the entire opt-in surface; no
//!   registration step exists.
//! - `update` takes `&mut self`; `draw` takes `&self` and never mutates the
//!   component. The frame target is deliberately opaque (`dyn Any`) so the
//!   component model carries no rendering backend dependency; drawables
//!   downcast it to the concrete surface they expect.
//!
//! ## Invariants
//! - Capability queries are consistent per type: a given component type
//!   either always or never reports a capability.
//! - Dispatch over a container visits members in their storage order, every
//!   frame, with no reordering or skipping.

use std::any::Any;

/// Opaque drawing surface handed to [`Drawable::draw`].
///
/// The framework never interprets the target itself; a drawable downcasts it
/// via [`Any`] to the concrete surface type its renderer uses.
pub trait FrameTarget: Any {
    /// Upcast for downcasting to the concrete surface type.
    fn as_any(&mut self) -> &mut dyn Any;
}

impl<T: Any> FrameTarget for T {
    fn as_any(&mut self) -> &mut dyn Any {
        self
    }
}

/// Per-frame simulation capability.
pub trait Updatable {
    /// Advances the component's state by `dt` seconds.
    fn update(&mut self, dt: f32);
}

/// Per-frame rendering capability.
pub trait Drawable {
    /// Renders the component onto `target`.
    ///
    /// Must not mutate the component; drawing the same state twice produces
    /// the same output.
    fn draw(&self, target: &mut dyn FrameTarget);
}

/// A type-erased game object part.
///
/// Every component type implements this trait; the capability queries are
/// the only methods, and both default to `None`. A type with a capability
/// overrides the matching query:
///
/// ```
/// use cohort::{Component, Updatable};
///
/// struct Spinner { angle: f32 }
///
/// impl Updatable for Spinner {
///     fn update(&mut self, dt: f32) {
///         self.angle += dt;
///     }
/// }
///
/// impl Component for Spinner {
///     fn as_updatable(&mut self) -> Option<&mut dyn Updatable> {
///         Some(self)
///     }
/// }
/// ```
pub trait Component: Any {
    /// The component's update capability, if it has one.
    fn as_updatable(&mut self) -> Option<&mut dyn Updatable> {
        None
    }

    /// The component's draw capability, if it has one.
    fn as_drawable(&self) -> Option<&dyn Drawable> {
        None
    }
}

/// Which capabilities a component reported when it was inspected.
///
/// Dynamic containers record this once at attach time so that per-frame
/// dispatch is a flag check rather than a repeated capability query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Caps {
    /// The component reported an update capability.
    pub updatable: bool,

    /// The component reported a draw capability.
    pub drawable: bool,
}

impl Caps {
    /// Queries `component` for both capabilities.
    pub fn of(component: &mut dyn Component) -> Self {
        Self {
            updatable: component.as_updatable().is_some(),
            drawable: component.as_drawable().is_some(),
        }
    }
}
