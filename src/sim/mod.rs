//! Simulation engine
//!
//! All gameplay logic lives here. No rendering, audio or platform code:
//! - Seeded RNG only
//! - Fixed per-tick motion (one `tick` per frame)
//! - Row-major iteration everywhere order matters

pub mod cluster;
pub mod hex;
pub mod projectile;
pub mod state;
pub mod tick;

pub use cluster::{find_cluster, find_floating, mark_popping};
pub use hex::{Bubble, ColorIndex, GridPos, HexGrid, PopProgress, SQRT_3, Slot};
pub use projectile::{Contact, Projectile, detect_contact, resolve_snap};
pub use state::{
    Difficulty, DifficultyConfig, GameEvent, GamePhase, GameState, PlacedBubble, Snapshot,
    Viewport,
};
pub use tick::{TickInput, land_projectile, tick};
