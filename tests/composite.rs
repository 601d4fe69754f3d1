use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use cohort::components::{Acceleration, Accelerator, Motion, Position, Velocity};
use cohort::{Caps, Component, Drawable, DynamicSet, Entity, FrameTarget, Partial, Updatable};

type Log = Rc<RefCell<Vec<&'static str>>>;

/// Updatable-only member: accumulates elapsed time and logs each visit.
struct Clock {
    name: &'static str,
    elapsed: f32,
    log: Log,
}

impl Clock {
    fn new(name: &'static str, log: &Log) -> Self {
        Self { name, elapsed: 0.0, log: Rc::clone(log) }
    }
}

impl Updatable for Clock {
    fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        self.log.borrow_mut().push(self.name);
    }
}

impl Component for Clock {
    fn as_updatable(&mut self) -> Option<&mut dyn Updatable> {
        Some(self)
    }
}

/// Drawable-only member: paints its glyph onto the test canvas.
struct Glyph {
    glyph: &'static str,
}

impl Drawable for Glyph {
    fn draw(&self, target: &mut dyn FrameTarget) {
        if let Some(canvas) = target.as_any().downcast_mut::<Canvas>() {
            canvas.ops.push(self.glyph);
        }
    }
}

impl Component for Glyph {
    fn as_drawable(&self) -> Option<&dyn Drawable> {
        Some(self)
    }
}

/// Member with neither capability.
#[derive(Default)]
struct Inert {
    touched: bool,
}

impl Component for Inert {}

/// Concrete frame target for tests; drawables downcast to it.
#[derive(Default)]
struct Canvas {
    ops: Vec<&'static str>,
}

#[test]
fn entity_updates_only_updatable_members_in_declaration_order() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));

    let mut entity = Entity::<(Clock, Inert, Clock)>::from_factories((
        |_: &Partial<_>| Clock::new("first", &log),
        |_: &Partial<_>| Inert::default(),
        |_: &Partial<_>| Clock::new("second", &log),
    ));

    entity.update(0.5);
    entity.update(0.25);

    assert_eq!(*log.borrow(), ["first", "second", "first", "second"]);
    assert_eq!(entity.get::<0>().elapsed, 0.75);
    assert!(!entity.get::<1>().touched);
}

#[test]
fn each_update_call_applies_exactly_once() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut entity = Entity::<(Clock,)>::from_factories((|_: &Partial<_>| Clock::new("c", &log),));

    entity.update(1.0);
    entity.update(1.0);
    entity.update(1.0);

    assert_eq!(entity.get::<0>().elapsed, 3.0);
    assert_eq!(log.borrow().len(), 3);
}

#[test]
fn entity_draws_only_drawable_members_and_never_mutates_them() {
    let entity = Entity::<(Glyph, Inert, Glyph)>::from_factories((
        |_: &Partial<_>| Glyph { glyph: "a" },
        |_: &Partial<_>| Inert::default(),
        |_: &Partial<_>| Glyph { glyph: "b" },
    ));

    let mut canvas = Canvas::default();
    entity.draw(&mut canvas);
    entity.draw(&mut canvas);

    // Same state drawn twice produces the same output, in declaration order.
    assert_eq!(canvas.ops, ["a", "b", "a", "b"]);
}

#[test]
fn entity_members_are_reachable_by_type_and_position() {
    let mut entity = Entity::<(Inert, Glyph)>::from_factories((
        |_: &Partial<_>| Inert::default(),
        |_: &Partial<_>| Glyph { glyph: "g" },
    ));

    assert_eq!(entity.member_count(), 2);
    assert_eq!(entity.member::<Glyph>().glyph, "g");
    entity.member_mut::<Inert>().touched = true;
    assert!(entity.get::<0>().touched);
    assert!(entity.try_member::<Clock>().is_none());
}

#[test]
fn entity_reports_both_capabilities() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut entity =
        Entity::<(Clock,)>::from_factories((|_: &Partial<_>| Clock::new("only", &log),));

    let caps = Caps::of(&mut entity);
    assert!(caps.updatable);
    assert!(caps.drawable);
}

#[test]
fn dynamic_set_records_capabilities_at_attach_time() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));

    let mut set = DynamicSet::new();
    assert!(set.is_empty());

    set.attach(Clock::new("tick", &log));
    set.attach(Glyph { glyph: "x" });
    set.attach(Inert::default());
    assert_eq!(set.len(), 3);

    set.update(1.0);
    assert_eq!(*log.borrow(), ["tick"]);

    let mut canvas = Canvas::default();
    set.draw(&mut canvas);
    assert_eq!(canvas.ops, ["x"]);
}

#[test]
fn dynamic_set_detaches_last_in_first_out() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));

    let mut set = DynamicSet::new();
    set.attach(Clock::new("a", &log));
    set.attach(Clock::new("b", &log));
    set.attach(Glyph { glyph: "c" });

    let last: Box<dyn Any> = set.detach().unwrap();
    let glyph = last.downcast::<Glyph>().unwrap();
    assert_eq!(glyph.glyph, "c");

    // Remaining members keep their attachment order.
    set.update(1.0);
    assert_eq!(*log.borrow(), ["a", "b"]);

    let _ = set.detach();
    let _ = set.detach();
    assert!(set.detach().is_none());
}

#[test]
fn composites_nest_in_both_directions() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));

    // A dynamic set as an entity member.
    let mut entity = Entity::<(DynamicSet,)>::from_factories((|_: &Partial<_>| {
        let mut set = DynamicSet::new();
        set.attach(Clock::new("inner", &log));
        set
    },));
    entity.update(1.0);
    assert_eq!(*log.borrow(), ["inner"]);

    // An entity as a dynamic set member.
    let mut outer = DynamicSet::new();
    outer.attach(entity);
    outer.update(1.0);
    assert_eq!(*log.borrow(), ["inner", "inner"]);
}

#[test]
fn motion_integrates_position_from_its_siblings() {
    let mut entity = Entity::<(Position, Velocity, Motion)>::from_factories((
        |_: &Partial<_>| Position::new(3.0, 4.0),
        |_: &Partial<_>| Velocity::new(-3.0, -4.0),
        |parts: &Partial<(Position, Velocity, Motion)>| unsafe { Motion::new(parts.sibling::<0>(), parts.sibling::<1>()) },
    ));

    // Time steps sum to exactly one second, so the position returns to the
    // origin with no rounding error at these magnitudes.
    entity.update(3.0);
    entity.update(-4.0);
    entity.update(2.0);

    assert_eq!(entity.get::<0>().value.x, 0.0);
    assert_eq!(entity.get::<0>().value.y, 0.0);
    assert_eq!(entity.get::<1>().value.x, -3.0);
}

#[test]
fn accelerator_feeds_motion_within_one_frame() {
    // Declaration order makes this semi-implicit Euler: velocity updates
    // first, then position integrates the new velocity.
    let mut entity =
        Entity::<(Position, Velocity, Acceleration, Accelerator, Motion)>::from_factories((
            |_: &Partial<_>| Position::new(0.0, 0.0),
            |_: &Partial<_>| Velocity::new(0.0, 0.0),
            |_: &Partial<_>| Acceleration::new(1.0, 0.0),
            |parts: &Partial<(Position, Velocity, Acceleration, Accelerator, Motion)>| unsafe { Accelerator::new(parts.sibling::<1>(), parts.sibling::<2>()) },
            |parts: &Partial<(Position, Velocity, Acceleration, Accelerator, Motion)>| unsafe { Motion::new(parts.sibling::<0>(), parts.sibling::<1>()) },
        ));

    entity.update(1.0);
    assert_eq!(entity.get::<1>().value.x, 1.0);
    assert_eq!(entity.get::<0>().value.x, 1.0);

    entity.update(1.0);
    assert_eq!(entity.get::<1>().value.x, 2.0);
    assert_eq!(entity.get::<0>().value.x, 3.0);
}
