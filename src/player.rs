//! Player entity
//!
//! Tile-space position with axis-separated wall sliding, plus the walk-cycle
//! state the renderer reads for sprite animation.

use crate::map::Map;

const TAU: f32 = std::f32::consts::TAU;
/// Walk-cycle frequency while moving
const WALK_CYCLES_PER_SECOND: f32 = 2.4;
/// How quickly the move blend chases its target (per second)
const BLEND_RATE: f32 = 8.0;

/// Movement flags sampled once per frame by the application loop
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

pub struct Player {
    x: f32,
    y: f32,
    speed: f32,
    walk_phase: f32,
    move_blend: f32,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            speed: 4.0,
            walk_phase: 0.0,
            move_blend: 0.0,
        }
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Advance one fixed simulation step.
    ///
    /// Each axis is tested against the map independently so the player slides
    /// along walls instead of sticking to them.
    pub fn update(&mut self, input: &InputState, map: &Map, dt_seconds: f32) {
        let mut dx: f32 = 0.0;
        let mut dy: f32 = 0.0;

        if input.up {
            dy -= 1.0;
        }
        if input.down {
            dy += 1.0;
        }
        if input.left {
            dx -= 1.0;
        }
        if input.right {
            dx += 1.0;
        }

        let length = (dx * dx + dy * dy).sqrt();
        if length > 0.0 {
            dx /= length;
            dy /= length;
        }

        let candidate_x = self.x + dx * self.speed * dt_seconds;
        let candidate_y = self.y + dy * self.speed * dt_seconds;

        if !map.is_blocked(candidate_x as i32, self.y as i32) {
            self.x = candidate_x;
        }
        if !map.is_blocked(self.x as i32, candidate_y as i32) {
            self.y = candidate_y;
        }

        let target_blend = if length > 0.0 { 1.0 } else { 0.0 };
        self.move_blend += (target_blend - self.move_blend) * (BLEND_RATE * dt_seconds).min(1.0);

        if length > 0.0 {
            self.walk_phase += TAU * WALK_CYCLES_PER_SECOND * dt_seconds;
            if self.walk_phase >= TAU {
                self.walk_phase %= TAU;
            }
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Walk-cycle phase in [0, tau)
    #[inline]
    pub fn walk_phase(&self) -> f32 {
        self.walk_phase
    }

    /// 0 at rest, ramping toward 1 while moving; scales bob and sway
    #[inline]
    pub fn move_blend(&self) -> f32 {
        self.move_blend
    }
}
