//! Bounce - a bouncing-ball physics toy
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (ball storage, collisions, world state)
//! - `settings`: World constants, loadable from JSON
//!
//! Drawing and input polling live outside this crate. A frontend calls
//! [`sim::tick()`] once per frame and draws every ball in [`sim::World::balls`]
//! as a filled circle.

pub mod settings;
pub mod sim;

pub use settings::{Settings, SimPreset};

/// Simulation constants
pub mod consts {
    /// Fraction of normal velocity kept after a floor or ball contact
    pub const RESTITUTION: f32 = 0.8;

    /// Standard gravity (m/s²)
    pub const EARTH_GRAVITY: f32 = 9.81;

    /// Reference frame rate
    pub const DEFAULT_FPS: u32 = 240;
    /// Reference scale between world meters and screen pixels
    pub const DEFAULT_PIXELS_PER_METER: f32 = 100.0;

    /// Balls spawned by a click
    pub const SPAWN_RADIUS: f32 = 50.0;
    pub const SPAWN_MASS: f32 = 10.0;

    /// Below this center distance two balls have no usable contact normal
    pub const MIN_NORMAL_LENGTH: f32 = 1e-6;
}

/// Per-frame gravity for a given scale and frame rate (pixels/frame²)
#[inline]
pub fn frame_gravity(pixels_per_meter: f32, fps: u32) -> f32 {
    let fps = fps as f32;
    (consts::EARTH_GRAVITY * pixels_per_meter) / (fps * fps)
}
