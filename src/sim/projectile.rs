//! Projectile motion, contact detection and snapping
//!
//! A projectile moves a fixed distance per tick along its aim angle, mirrors
//! its horizontal velocity off the side walls, and comes to rest either at the
//! ceiling or when it gets close enough to a placed bubble. It then snaps to
//! the nearest empty lattice slot rather than the first free neighbor, so the
//! resting position does not depend on approach angle.

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::hex::{Bubble, ColorIndex, GridPos, HexGrid};
use crate::consts::COLLISION_FACTOR;
use crate::error::SimError;

/// A bubble in flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub color: ColorIndex,
    /// Pixel position of the center
    pub pos: Vec2,
    /// Direction of travel (radians, screen space: negative is upward)
    pub angle: f32,
    /// Pixels per tick
    pub speed: f32,
}

/// What stopped a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Ceiling,
    Bubble(GridPos),
}

impl Projectile {
    /// Fire `bubble` from `origin`
    pub fn launch(bubble: &Bubble, origin: Vec2, angle: f32, speed: f32) -> Self {
        Self {
            color: bubble.color,
            pos: origin,
            angle,
            speed,
        }
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        crate::direction(self.angle) * self.speed
    }

    /// Move one tick and bounce off the side walls.
    ///
    /// Returns true if the projectile bounced. Only a projectile still heading
    /// out of `[radius, width - radius]` reflects, so one that overshoots the
    /// band does not flip back and forth on the following ticks.
    pub fn advance(&mut self, width: f32, radius: f32) -> bool {
        self.pos += self.velocity();

        let heading_x = self.angle.cos();
        let past_left = self.pos.x < radius && heading_x < 0.0;
        let past_right = self.pos.x > width - radius && heading_x > 0.0;
        if past_left || past_right {
            self.angle = PI - self.angle;
            return true;
        }
        false
    }
}

/// Check whether the projectile should come to rest this tick.
///
/// The ceiling wins over bubbles; among bubbles the first within
/// `COLLISION_FACTOR` radii in row-major order is reported.
pub fn detect_contact(projectile: &Projectile, grid: &HexGrid) -> Option<Contact> {
    let radius = grid.radius();
    if projectile.pos.y < radius {
        return Some(Contact::Ceiling);
    }

    let reach = radius * COLLISION_FACTOR;
    grid.iter()
        .map(|(pos, _)| pos)
        .find(|&pos| grid.pixel_coords(pos).distance(projectile.pos) < reach)
        .map(Contact::Bubble)
}

/// Nearest empty slot to `point` in rows `0..=row_count`.
///
/// One row past the current bottom is included so the grid can grow. Ties
/// go to the first slot in row-major order.
pub fn resolve_snap(grid: &HexGrid, point: Vec2) -> Result<GridPos, SimError> {
    let mut best: Option<(GridPos, f32)> = None;

    for row in 0..=grid.row_count() {
        for col in 0..grid.slot_count(row) {
            let pos = GridPos::new(row, col);
            if grid.is_occupied(pos) {
                continue;
            }
            let dist = grid.pixel_coords(pos).distance_squared(point);
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((pos, dist));
            }
        }
    }

    best.map(|(pos, _)| pos).ok_or(SimError::GridSaturated {
        rows: grid.row_count(),
    })
}
