//! World state
//!
//! Everything one simulation instance owns: bounds, gravity, the ball
//! collection and the events recorded since the caller last drained them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::balls::{Ball, BallHandle, Balls};
use crate::settings::Settings;

/// Undrained events kept at most
pub const MAX_PENDING_EVENTS: usize = 4096;

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    /// A ball was added by a spawn request
    Spawned { id: u32 },
    /// A ball hit the floor and bounced
    FloorBounce { id: u32 },
    /// A ball left the screen horizontally and was removed
    Culled { id: u32 },
    /// Outer-loop ball `a` hit inner-loop ball `b`
    Collided { a: u32, b: u32 },
    /// All balls were removed
    Cleared { count: usize },
}

/// Simulation world
#[derive(Debug, Clone)]
pub struct World {
    pub settings: Settings,
    /// Per-frame downward acceleration (pixels/frame²)
    pub gravity: f32,
    /// Frames simulated so far
    pub frame: u64,
    balls: Balls,
    events: Vec<SimEvent>,
}

impl World {
    /// Create an empty world. Ball ids start at 1 for every new world.
    pub fn new(settings: Settings) -> Self {
        let gravity = settings.gravity();
        log::info!(
            "New world {}x{} at {} fps (gravity {:.5} px/frame²)",
            settings.width,
            settings.height,
            settings.fps,
            gravity
        );
        Self {
            settings,
            gravity,
            frame: 0,
            balls: Balls::new(),
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.settings.width
    }

    /// The floor sits at the bottom edge of the screen
    #[inline]
    pub fn floor(&self) -> f32 {
        self.settings.height
    }

    /// Live balls in insertion order, for drawing
    pub fn balls(&self) -> &Balls {
        &self.balls
    }

    pub fn balls_mut(&mut self) -> &mut Balls {
        &mut self.balls
    }

    /// Add a ball with explicit parameters
    pub fn add_ball(&mut self, pos: Vec2, vel: Vec2, radius: f32, mass: f32) -> BallHandle {
        self.balls.add(pos, vel, radius, mass)
    }

    /// Spawn a resting ball at a pointer position, pulled inside the screen
    pub fn spawn_at(&mut self, point: Vec2) -> BallHandle {
        let radius = self.settings.spawn_radius;
        let pos = clamp_spawn_point(point, radius, self.settings.width, self.settings.height);
        let handle = self
            .balls
            .add(pos, Vec2::ZERO, radius, self.settings.spawn_mass);
        if let Some(ball) = self.balls.get(handle) {
            log::debug!("Spawned ball {} at ({:.1}, {:.1})", ball.id, pos.x, pos.y);
            let id = ball.id;
            self.record(SimEvent::Spawned { id });
        }
        handle
    }

    /// Remove every ball (the id counter keeps counting)
    pub fn clear(&mut self) {
        let count = self.balls.len();
        self.balls.clear();
        log::debug!("Cleared {} balls", count);
        self.record(SimEvent::Cleared { count });
    }

    /// Queue an event; once the queue is full, newer events are dropped
    pub(crate) fn record(&mut self, event: SimEvent) {
        if self.events.len() < MAX_PENDING_EVENTS {
            self.events.push(event);
        }
    }

    /// Events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Copy of the live balls in insertion order
    pub fn snapshot(&self) -> Vec<Ball> {
        self.balls.iter().cloned().collect()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

/// Move a spawn point so a circle of `radius` fits fully inside the screen
pub fn clamp_spawn_point(point: Vec2, radius: f32, width: f32, height: f32) -> Vec2 {
    let mut p = point;

    if p.x - radius <= 0.0 {
        p.x = radius;
    } else if p.x + radius >= width {
        p.x = width - radius;
    }

    if p.y - radius <= 0.0 {
        p.y = radius;
    } else if p.y + radius >= height {
        p.y = height - radius;
    }

    p
}
