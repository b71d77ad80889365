//! Bubble Pop - a hex-grid bubble shooter
//!
//! Core modules:
//! - `sim`: Simulation engine (grid, physics, cluster analysis, game state)
//! - `settings`: Player preferences (difficulty, viewport, seed)
//! - `highscores`: Top-10 leaderboard fed by the `GameOver` event
//! - `error`: Error types for the file-backed stores and snap resolution

pub mod error;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use error::{SimError, StoreError};
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Number of bubble colors in the palette
    pub const PALETTE_SIZE: u8 = 6;

    /// Aim arc limits (radians, exclusive). Screen y grows downward, so
    /// upward aims are negative angles.
    pub const AIM_MIN: f32 = -2.9;
    pub const AIM_MAX: f32 = -0.2;
    /// Default aim: straight up
    pub const AIM_DEFAULT: f32 = -std::f32::consts::FRAC_PI_2;

    /// Projectile travels `viewport_height / SPEED_DIVISOR` pixels per tick
    pub const SPEED_DIVISOR: f32 = 60.0;
    /// Projectile snaps when closer than this many radii to a placed bubble
    pub const COLLISION_FACTOR: f32 = 1.8;

    /// Ticks a popping bubble animates before it is removed
    pub const POP_ANIM_FRAMES: u32 = 5;

    /// Minimum same-color cluster size that pops
    pub const MIN_CLUSTER_SIZE: usize = 3;
    /// Points per bubble in a popped cluster
    pub const POINTS_PER_MATCH: u64 = 10;
    /// Points per bubble dropped for losing its ceiling anchor
    pub const POINTS_PER_FLOATING: u64 = 20;

    /// Default viewport (pixels)
    pub const DEFAULT_WIDTH: f32 = 450.0;
    pub const DEFAULT_HEIGHT: f32 = 800.0;
}

/// Hex color strings for each palette index (light, dark gradient stops)
pub const BUBBLE_COLORS: [(&str, &str); consts::PALETTE_SIZE as usize] = [
    ("#ff3b30", "#a11d15"),
    ("#34c759", "#1a6d30"),
    ("#007aff", "#004a99"),
    ("#ff9500", "#995a00"),
    ("#af52de", "#672d86"),
    ("#5ac8fa", "#2e7a96"),
];

/// Whether an aim angle lies strictly inside the permitted upward arc
#[inline]
pub fn in_aim_arc(angle: f32) -> bool {
    angle > consts::AIM_MIN && angle < consts::AIM_MAX
}

/// Unit direction vector for an angle
#[inline]
pub fn direction(angle: f32) -> glam::Vec2 {
    glam::Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aim_arc_is_exclusive() {
        assert!(in_aim_arc(consts::AIM_DEFAULT));
        assert!(!in_aim_arc(consts::AIM_MIN));
        assert!(!in_aim_arc(consts::AIM_MAX));
        assert!(!in_aim_arc(0.5));
    }

    #[test]
    fn test_direction_straight_up() {
        let d = direction(consts::AIM_DEFAULT);
        assert!(d.x.abs() < 1e-6);
        assert!((d.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_palette_entries_are_hex() {
        for (light, dark) in BUBBLE_COLORS {
            assert!(light.starts_with('#') && light.len() == 7);
            assert!(dark.starts_with('#') && dark.len() == 7);
        }
    }
}
