//! Stock components: a small 2D-physics kit exercising the aggregate.
//!
//! [`Position`], [`Velocity`] and [`Acceleration`] are plain data members
//! with no frame-loop capabilities. [`Motion`] and [`Accelerator`] are the
//! interesting ones: each is constructed from sibling handles into members
//! declared *before* it in the same entity, and integrates across them on
//! every update. Declared after the data they read, they demonstrate the
//! whole dependency-ordered construction story:
//!
//! ```
//! use cohort::{Entity, Partial};
//! use cohort::components::{Motion, Position, Velocity};
//!
//! let mut entity = Entity::<(Position, Velocity, Motion)>::from_factories((
//!     |_: &Partial<_>| Position::new(0.0, 0.0),
//!     |_: &Partial<_>| Velocity::new(1.0, 2.0),
//!     |parts: &Partial<(Position, Velocity, Motion)>| unsafe { Motion::new(parts.sibling::<0>(), parts.sibling::<1>()) },
//! ));
//! entity.update(0.5);
//! assert_eq!(entity.get::<0>().value.x, 0.5);
//! ```

use std::ops::{Add, AddAssign, Mul, Neg};

use crate::engine::aggregate::Sibling;
use crate::engine::component::{Component, Updatable};

/// Minimal 2D vector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f32,

    /// Vertical component.
    pub y: f32,
}

impl Vec2 {
    /// Creates a vector from its components.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Where something is. Data only; no capabilities.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    /// Current position.
    pub value: Vec2,
}

impl Position {
    /// Creates a position at `(x, y)`.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { value: Vec2::new(x, y) }
    }
}

impl Component for Position {}

/// How fast something moves. Data only; no capabilities.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
    /// Current velocity, units per second.
    pub value: Vec2,
}

impl Velocity {
    /// Creates a velocity of `(x, y)` units per second.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { value: Vec2::new(x, y) }
    }
}

impl Component for Velocity {}

/// How fast the velocity changes. Data only; no capabilities.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Acceleration {
    /// Current acceleration, units per second squared.
    pub value: Vec2,
}

impl Acceleration {
    /// Creates an acceleration of `(x, y)` units per second squared.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { value: Vec2::new(x, y) }
    }
}

impl Component for Acceleration {}

/// Updatable integrator: `position += velocity * dt` every frame.
///
/// Holds sibling handles into a [`Position`] and a [`Velocity`] declared
/// earlier in the same entity, so it must be declared after both. The
/// handles stay valid through the entity's whole lifetime, including
/// reverse-order teardown.
pub struct Motion {
    position: Sibling<Position>,
    velocity: Sibling<Velocity>,
}

impl Motion {
    /// Creates an integrator over the given sibling members.
    pub fn new(position: Sibling<Position>, velocity: Sibling<Velocity>) -> Self {
        Self { position, velocity }
    }
}

impl Updatable for Motion {
    fn update(&mut self, dt: f32) {
        let step = self.velocity.get().value * dt;
        self.position.get_mut().value += step;
    }
}

impl Component for Motion {
    fn as_updatable(&mut self) -> Option<&mut dyn Updatable> {
        Some(self)
    }
}

/// Updatable integrator: `velocity += acceleration * dt` every frame.
///
/// The velocity half of the kinematics pair; declare it before [`Motion`]
/// to integrate acceleration into position over two stages per frame.
pub struct Accelerator {
    velocity: Sibling<Velocity>,
    acceleration: Sibling<Acceleration>,
}

impl Accelerator {
    /// Creates an integrator over the given sibling members.
    pub fn new(velocity: Sibling<Velocity>, acceleration: Sibling<Acceleration>) -> Self {
        Self { velocity, acceleration }
    }
}

impl Updatable for Accelerator {
    fn update(&mut self, dt: f32) {
        let step = self.acceleration.get().value * dt;
        self.velocity.get_mut().value += step;
    }
}

impl Component for Accelerator {
    fn as_updatable(&mut self) -> Option<&mut dyn Updatable> {
        Some(self)
    }
}
