//! Core state types for the orbital simulation.
//!
//! Defines the 2D body/system structs on the orbital plane:
//! - `Body` with position in AU and velocity in m/s
//! - `System` holding the ordered bodies and which one is the central mass
//!
//! Simulated time is not stored here, it belongs to the [`Clock`](super::clock::Clock).

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

/// What a body is, used by display code for labelling and lighting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Star,
    Planet,
}

impl BodyKind {
    pub fn name(&self) -> &'static str {
        match self {
            BodyKind::Star => "star",
            BodyKind::Planet => "planet",
        }
    }

    pub fn is_light_source(&self) -> bool {
        matches!(self, BodyKind::Star)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String, // display name
    pub kind: BodyKind, // star or planet
    pub x: NVec2, // position (AU)
    pub v: NVec2, // velocity (m/s)
    pub m: f64, // mass (kg)
    pub rotation_period: i64, // seconds per axial rotation, 0 = non-rotating
    pub rotation: f64, // current axial angle in degrees, display only
}

impl Body {
    pub fn is_light_source(&self) -> bool {
        self.kind.is_light_source()
    }

    /// Distance from the coordinate origin in AU
    pub fn distance_from_origin(&self) -> f64 {
        self.x.norm()
    }
}

/// Ordered collection of bodies plus an explicit handle on the central one
///
/// Loaders put the star first, so `central` is 0 for every bundled scenario,
/// but nothing below relies on that ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct System {
    pub bodies: Vec<Body>, // collection of bodies
    pub central: usize, // index of the central body in `bodies`
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, central: 0 }
    }

    pub fn central_body(&self) -> Option<&Body> {
        self.bodies.get(self.central)
    }

    pub fn central_body_mut(&mut self) -> Option<&mut Body> {
        self.bodies.get_mut(self.central)
    }

    /// Total linear momentum (kg m/s)
    pub fn total_momentum(&self) -> NVec2 {
        self.bodies
            .iter()
            .fold(NVec2::zeros(), |p, b| p + b.m * b.v)
    }

    /// Total kinetic energy (J)
    pub fn kinetic_energy(&self) -> f64 {
        self.bodies
            .iter()
            .map(|b| 0.5 * b.m * b.v.norm_squared())
            .sum()
    }
}
