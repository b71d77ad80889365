//! Error types
//!
//! The engine itself never hands errors to the adapter: invalid inputs are
//! ignored and a saturated grid ends the game. These types cover the few
//! places where a failure has to be propagated before it is resolved.

use std::path::PathBuf;

use thiserror::Error;

/// Simulation failures resolved inside the engine
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    /// No empty slot left anywhere a projectile could rest
    #[error("no empty slot in rows 0..={rows} to snap the projectile into")]
    GridSaturated { rows: usize },
}

/// Failures reading or writing the JSON-backed settings and high scores
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not determine a platform directory for {0}")]
    NoDataDir(&'static str),

    #[error("i/o error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}
