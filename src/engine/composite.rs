//! Composite components: the static [`Entity`] and the dynamic
//! [`DynamicSet`].
//!
//! Both wrappers hold a collection of members and forward frame-loop calls
//! through the capability dispatch layer, and both are themselves
//! components, so composites nest: an entity can sit inside a dynamic set,
//! a dynamic set inside an entity's field list.
//!
//! [`Entity`] fixes its member list at the type level and stores it as a
//! dependency-ordered aggregate: members are factory-constructed in
//! declaration order, may hold sibling handles into earlier members, and
//! are destroyed in reverse order. Dispatch is monomorphized per member
//! type, so members without a capability cost nothing per frame.
//!
//! [`DynamicSet`] trades that for runtime flexibility: members are boxed,
//! attached and detached while the set lives, and visited in attachment
//! order through recorded capability flags.

use crate::engine::aggregate::{Aggregate, FactorySet};
use crate::engine::component::{Caps, Component, Drawable, FrameTarget, Updatable};
use crate::engine::dispatch::{draw_member, update_member};
use crate::engine::field::{FieldAt, FieldList};

/// A field list whose every field is a [`Component`].
///
/// Implemented alongside [`FieldList`] for component tuples of up to eight
/// members; the per-index dispatch bodies are generated with it so that
/// [`Entity`] needs no runtime member iteration.
pub trait ComponentList: FieldList {
    /// Updates every updatable member, in declaration order.
    fn update_all(parts: &mut Aggregate<Self>, dt: f32);

    /// Draws every drawable member, in declaration order.
    fn draw_all(parts: &Aggregate<Self>, target: &mut dyn FrameTarget);
}

/// A game object with a fixed, typed member list.
///
/// The member list `L` is a tuple of component types. Construction follows
/// the aggregate rules: one factory per member, run in declaration order,
/// each seeing the members built before it. Per frame, [`update`] visits
/// every updatable member and [`draw`] every drawable one, always in
/// declaration order.
///
/// An entity is itself a component reporting both capabilities, so entities
/// nest inside other composites.
///
/// [`update`]: Entity::update
/// [`draw`]: Entity::draw
pub struct Entity<L: ComponentList> {
    parts: Aggregate<L>,
}

impl<L: ComponentList> Entity<L> {
    /// Builds the entity's members in declaration order from `factories`.
    pub fn from_factories<F: FactorySet<L>>(factories: F) -> Self {
        Self {
            parts: Aggregate::from_factories(factories),
        }
    }

    /// Number of members.
    #[inline]
    pub fn member_count(&self) -> usize {
        self.parts.field_count()
    }

    /// Shared reference to the member at position `I`.
    #[inline]
    pub fn get<const I: usize>(&self) -> &<L as FieldAt<I>>::Type
    where
        L: FieldAt<I>,
    {
        self.parts.get::<I>()
    }

    /// Mutable reference to the member at position `I`.
    #[inline]
    pub fn get_mut<const I: usize>(&mut self) -> &mut <L as FieldAt<I>>::Type
    where
        L: FieldAt<I>,
    {
        self.parts.get_mut::<I>()
    }

    /// Shared reference to the first member of type `T`, if any.
    pub fn try_member<T: 'static>(&self) -> Option<&T> {
        self.parts.try_field::<T>()
    }

    /// Mutable reference to the first member of type `T`, if any.
    pub fn try_member_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.parts.try_field_mut::<T>()
    }

    /// Shared reference to the first member of type `T`.
    ///
    /// ## Panics
    /// Panics if no member of type `T` exists.
    pub fn member<T: 'static>(&self) -> &T {
        self.parts.field::<T>()
    }

    /// Mutable reference to the first member of type `T`.
    ///
    /// ## Panics
    /// Panics if no member of type `T` exists.
    pub fn member_mut<T: 'static>(&mut self) -> &mut T {
        self.parts.field_mut::<T>()
    }

    /// Updates every updatable member by `dt`, in declaration order.
    pub fn update(&mut self, dt: f32) {
        L::update_all(&mut self.parts, dt);
    }

    /// Draws every drawable member onto `target`, in declaration order.
    pub fn draw(&self, target: &mut dyn FrameTarget) {
        L::draw_all(&self.parts, target);
    }
}

impl<L: ComponentList> Updatable for Entity<L> {
    fn update(&mut self, dt: f32) {
        Entity::update(self, dt);
    }
}

impl<L: ComponentList> Drawable for Entity<L> {
    fn draw(&self, target: &mut dyn FrameTarget) {
        Entity::draw(self, target);
    }
}

impl<L: ComponentList> Component for Entity<L> {
    fn as_updatable(&mut self) -> Option<&mut dyn Updatable> {
        Some(self)
    }

    fn as_drawable(&self) -> Option<&dyn Drawable> {
        Some(self)
    }
}

struct Member {
    component: Box<dyn Component>,
    caps: Caps,
}

/// A growable set of boxed components with last-in-first-out removal.
///
/// Members are visited in attachment order on every update and draw pass.
/// Capability flags are recorded once at attach time, so a pass over the
/// set only performs virtual calls on members that participate.
#[derive(Default)]
pub struct DynamicSet {
    members: Vec<Member>,
}

impl DynamicSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attached members.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the set has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Attaches `component` at the end of the visit order.
    pub fn attach<C: Component>(&mut self, component: C) {
        self.attach_boxed(Box::new(component));
    }

    /// Attaches an already-boxed component at the end of the visit order.
    pub fn attach_boxed(&mut self, mut component: Box<dyn Component>) {
        let caps = Caps::of(component.as_mut());
        self.members.push(Member { component, caps });
    }

    /// Detaches and returns the most recently attached member.
    ///
    /// Removal is last-in-first-out; earlier members keep their positions
    /// and relative visit order.
    pub fn detach(&mut self) -> Option<Box<dyn Component>> {
        self.members.pop().map(|member| member.component)
    }

    /// Updates every updatable member by `dt`, in attachment order.
    pub fn update(&mut self, dt: f32) {
        for member in &mut self.members {
            if member.caps.updatable {
                update_member(member.component.as_mut(), dt);
            }
        }
    }

    /// Draws every drawable member onto `target`, in attachment order.
    pub fn draw(&self, target: &mut dyn FrameTarget) {
        for member in &self.members {
            if member.caps.drawable {
                draw_member(member.component.as_ref(), target);
            }
        }
    }
}

impl Updatable for DynamicSet {
    fn update(&mut self, dt: f32) {
        DynamicSet::update(self, dt);
    }
}

impl Drawable for DynamicSet {
    fn draw(&self, target: &mut dyn FrameTarget) {
        DynamicSet::draw(self, target);
    }
}

impl Component for DynamicSet {
    fn as_updatable(&mut self) -> Option<&mut dyn Updatable> {
        Some(self)
    }

    fn as_drawable(&self) -> Option<&dyn Drawable> {
        Some(self)
    }
}
