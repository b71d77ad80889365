//! Per-frame simulation step
//!
//! One call to `tick` applies the frame's input, moves the projectile, lands
//! it if it touched something, then advances pop animations and checks the
//! loss line. Each tick runs to completion; nothing is carried between ticks
//! except the `GameState` itself.

use super::hex::GridPos;
use super::projectile::{Projectile, detect_contact, resolve_snap};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::{AIM_DEFAULT, AIM_MAX, AIM_MIN};

/// Input commands collected for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Aim angle from the pointer (radians, screen space)
    pub aim: Option<f32>,
    /// Fire (click/tap/space)
    pub shoot: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - the engine aims and fires by itself
    pub idle_mode: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.pause {
        state.toggle_pause();
    }

    // Paused, over or idle: nothing moves
    if state.phase != GamePhase::Playing {
        return;
    }

    let mut input = input.clone();
    if input.idle_mode {
        idle_input(state, &mut input);
    }

    if let Some(angle) = input.aim {
        state.aim(angle);
    }
    if input.shoot {
        state.shoot();
    }

    state.time_ticks += 1;

    advance_projectile(state);
    if state.phase != GamePhase::Playing {
        return;
    }

    update_board(state);
}

/// Move the projectile one step and land it on contact
fn advance_projectile(state: &mut GameState) {
    let Some(mut projectile) = state.projectile.take() else {
        return;
    };

    if projectile.advance(state.viewport.width, state.grid.radius()) {
        log::debug!("Wall bounce at x={:.1}", projectile.pos.x);
    }

    match detect_contact(&projectile, &state.grid) {
        Some(contact) => {
            log::debug!("Contact {:?} at {:?}", contact, projectile.pos);
            land_projectile(state, &projectile);
        }
        None => state.projectile = Some(projectile),
    }
}

/// Snap a projectile into the grid and apply the consequences: match check,
/// row cadence, launcher refill.
///
/// Returns where it landed, or `None` if the grid had no room (which ends the
/// game).
pub fn land_projectile(state: &mut GameState, projectile: &Projectile) -> Option<GridPos> {
    let pos = match resolve_snap(&state.grid, projectile.pos) {
        Ok(pos) => pos,
        Err(err) => {
            log::warn!("{}; ending game", err);
            state.end_game();
            return None;
        }
    };

    state.projectile = None;
    state.grid.place(pos, projectile.color);
    log::debug!("Landed color {} at {}", projectile.color, pos);

    if !state.process_matches(pos) {
        state.shots_until_next_row = state.shots_until_next_row.saturating_sub(1);
        if state.shots_until_next_row == 0 {
            state.add_row();
            state.shots_until_next_row = state.config().shots_to_add_row;
        }
    }

    state.generate_shooter_bubbles();
    Some(pos)
}

/// Loss line check, pop animations, removal and drop detection
fn update_board(state: &mut GameState) {
    let loss_y = state.loss_line_y();
    if state.grid.lowest_center_y().is_some_and(|y| y > loss_y) {
        state.end_game();
        return;
    }

    let progress = state.grid.advance_pop_animations();
    if progress.popping == 0 || !progress.finished {
        return;
    }

    let removed = state.grid.remove_popping();
    state.process_floating();
    state.push_event(GameEvent::Pop { count: removed });

    if state.grid.is_empty() {
        state.clear_level();
    }
}

/// Demo autopilot: aim at the lowest bubble matching the loaded color (or the
/// lowest bubble at all) and fire whenever nothing is in flight
fn idle_input(state: &GameState, input: &mut TickInput) {
    if state.projectile.is_some() {
        return;
    }
    let Some(shooter) = state.shooter else {
        return;
    };

    let origin = state.shooter_pos();
    let target = state
        .grid
        .iter()
        .filter(|(_, b)| !b.popping)
        .max_by_key(|(pos, b)| (b.color == shooter.color, pos.row))
        .map(|(pos, _)| state.grid.pixel_coords(pos));

    let angle = match target {
        Some(t) => (t.y - origin.y).atan2(t.x - origin.x),
        None => AIM_DEFAULT,
    };

    // Small per-shot wobble so repeated targets don't stack in one column
    let wobble = ((state.time_ticks as f32) * 0.37).sin() * 0.05;
    input.aim = Some((angle + wobble).clamp(AIM_MIN + 0.01, AIM_MAX - 0.01));
    input.shoot = true;
}
