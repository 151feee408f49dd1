//! Per-frame simulation tick
//!
//! One call advances every ball by one frame, then applies the input that
//! the frontend collected for that frame.

use glam::Vec2;

use super::collision::{
    ball_floor_collision, balls_collided, handle_ball_collision, resolve_ball_overlap,
};
use super::state::{SimEvent, World};

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Spawn a ball at this pointer position (click)
    pub spawn: Option<Vec2>,
    /// Remove every ball (reset key)
    pub clear: bool,
    /// Stop the frame loop (quit/escape)
    pub quit: bool,
}

/// Whether the frame loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    Running,
    Quit,
}

/// Advance one frame and apply the frame's input
///
/// Input is handled after the physics step, so a ball spawned this frame
/// first moves on the next one. A quit request wins over a clear request
/// in the same frame.
pub fn tick(world: &mut World, input: &TickInput) -> TickStatus {
    step(world);

    if let Some(point) = input.spawn {
        world.spawn_at(point);
    }

    if input.quit {
        log::info!("Quit requested after {} frames", world.frame);
        return TickStatus::Quit;
    }

    if input.clear {
        world.clear();
    }

    TickStatus::Running
}

/// Physics for one frame, balls in insertion order
///
/// For each ball: gravity and Euler integration, floor bounce, removal when
/// fully off the left or right edge, then overlap resolution and velocity
/// response against every other live ball. The current ball is always `a`
/// of the pair.
pub fn step(world: &mut World) {
    world.frame += 1;

    let gravity = world.gravity;
    let floor = world.floor();
    let width = world.width();
    let order = world.balls().handles();

    for &handle in &order {
        let Some(ball) = world.balls_mut().get_mut(handle) else {
            continue;
        };

        ball.vel.y += gravity;
        ball.pos += ball.vel;

        let id = ball.id;
        let bounced = ball_floor_collision(ball, floor);
        let outside = ball.is_outside_horizontally(width);

        if bounced {
            world.record(SimEvent::FloorBounce { id });
        }

        if outside {
            world.balls_mut().remove(handle);
            log::trace!("Ball {} left the screen", id);
            world.record(SimEvent::Culled { id });
            continue;
        }

        for &other in &order {
            let hit = match world.balls_mut().get_pair_mut(handle, other) {
                Some((a, b)) if a.id != b.id && balls_collided(a, b) => {
                    resolve_ball_overlap(a, b);
                    handle_ball_collision(a, b);
                    Some((a.id, b.id))
                }
                _ => None,
            };

            if let Some((a, b)) = hit {
                log::trace!("Ball {} hit ball {}", a, b);
                world.record(SimEvent::Collided { a, b });
            }
        }
    }
}
