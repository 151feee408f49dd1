//! Ball simulation module
//!
//! All physics lives here, stepped once per rendered frame:
//! - Explicit Euler integration, one step per frame
//! - Stable iteration order (insertion order of balls)
//! - No rendering or platform dependencies

pub mod balls;
pub mod collision;
pub mod state;
pub mod tick;

pub use balls::{Ball, BallHandle, Balls};
pub use collision::{
    ball_floor_collision, balls_collided, handle_ball_collision, resolve_ball_overlap,
};
pub use state::{MAX_PENDING_EVENTS, SimEvent, World, clamp_spawn_point};
pub use tick::{TickInput, TickStatus, step, tick};
