//! Capability dispatch: update-if-updatable, draw-if-drawable.
//!
//! Containers hold members behind the uniform [`Component`] surface and
//! cannot know statically which members participate in the frame loop. The
//! two functions here bridge that gap: each queries the member for the
//! relevant capability and either forwards the call or does nothing.
//!
//! For statically-typed containers the query resolves per concrete member
//! type, so the optimizer folds non-participants to literal no-ops. For
//! dynamic members the same functions work through `dyn Component`, where
//! the recorded [`Caps`](crate::engine::component::Caps) flags let a
//! container skip the virtual query entirely.

use crate::engine::component::{Component, FrameTarget};

/// Updates `member` by `dt` if it is updatable; otherwise does nothing.
#[inline]
pub fn update_member<C: Component + ?Sized>(member: &mut C, dt: f32) {
    if let Some(updatable) = member.as_updatable() {
        updatable.update(dt);
    }
}

/// Draws `member` onto `target` if it is drawable; otherwise does nothing.
#[inline]
pub fn draw_member<C: Component + ?Sized>(member: &C, target: &mut dyn FrameTarget) {
    if let Some(drawable) = member.as_drawable() {
        drawable.draw(target);
    }
}
