//! Game state and session transitions
//!
//! `GameState` is the single owned aggregate for one session. Adapters mutate
//! it only through the methods here and through `tick`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::cluster::{find_cluster, find_floating, mark_popping};
use super::hex::{Bubble, ColorIndex, GridPos, HexGrid};
use super::projectile::Projectile;
use crate::consts::*;
use crate::in_aim_arc;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No game running (title screen)
    Idle,
    /// Active gameplay
    Playing,
    /// Simulation frozen
    Paused,
    /// Bubbles reached the loss line
    GameOver,
}

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// Board shape and row cadence for a difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    /// Rows filled at game start
    pub rows: usize,
    /// Slots in an even row
    pub cols: usize,
    /// Non-matching shots before a new row is pushed in
    pub shots_to_add_row: u32,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn config(&self) -> DifficultyConfig {
        match self {
            Difficulty::Easy => DifficultyConfig {
                rows: 6,
                cols: 9,
                shots_to_add_row: 7,
            },
            Difficulty::Medium => DifficultyConfig {
                rows: 8,
                cols: 11,
                shots_to_add_row: 6,
            },
            Difficulty::Hard => DifficultyConfig {
                rows: 10,
                cols: 13,
                shots_to_add_row: 5,
            },
        }
    }
}

/// Drawing surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Discrete notifications for audio/UI, drained by the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A shot left the launcher
    Shoot,
    /// Popping bubbles finished animating and were removed
    Pop { count: usize },
    /// The board moved down one row; `dropped` bubbles left the lattice
    RowAdded { dropped: usize },
    /// The board was emptied; a new one was dealt
    LevelCleared { level: u32 },
    /// The session ended
    GameOver { final_score: u64 },
}

/// A placed bubble as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacedBubble {
    pub pos: GridPos,
    pub center: Vec2,
    pub color: ColorIndex,
    pub popping: bool,
    pub anim_frame: u32,
}

/// Read-only view of the session for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub difficulty: Difficulty,
    pub level: u32,
    pub score: u64,
    pub phase: GamePhase,
    pub is_paused: bool,
    pub is_game_over: bool,
    pub viewport: Viewport,
    pub cols: usize,
    pub bubble_radius: f32,
    pub bubbles: Vec<PlacedBubble>,
    pub shooter: Option<ColorIndex>,
    pub next: Option<ColorIndex>,
    pub shooter_pos: Vec2,
    pub next_pos: Vec2,
    pub projectile: Option<Projectile>,
    pub aim_angle: f32,
    pub shots_until_next_row: u32,
    pub loss_line_y: f32,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Difficulty the next `start` will use
    selected: Difficulty,
    /// Difficulty of the running (or last) game, fixed at `start`
    difficulty: Difficulty,
    /// Board shape and row cadence captured at `start`
    config: DifficultyConfig,
    pub level: u32,
    pub score: u64,
    pub phase: GamePhase,
    pub grid: HexGrid,
    /// Bubble loaded in the launcher
    pub shooter: Option<Bubble>,
    /// Bubble queued after the shooter
    pub next: Option<Bubble>,
    /// Bubble in flight (at most one)
    pub projectile: Option<Projectile>,
    pub aim_angle: f32,
    pub shots_until_next_row: u32,
    pub viewport: Viewport,
    /// Simulation tick counter
    pub time_ticks: u64,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle session with the given seed
    pub fn new(seed: u64) -> Self {
        let difficulty = Difficulty::default();
        let config = difficulty.config();
        let viewport = Viewport::default();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            selected: difficulty,
            difficulty,
            config,
            level: 1,
            score: 0,
            phase: GamePhase::Idle,
            grid: HexGrid::with_layout(config.cols, viewport.width),
            shooter: None,
            next: None,
            projectile: None,
            aim_angle: AIM_DEFAULT,
            shots_until_next_row: config.shots_to_add_row,
            viewport,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Config of the running game. Selecting another difficulty does not
    /// change it until the next `start`.
    pub fn config(&self) -> DifficultyConfig {
        self.config
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Difficulty queued for the next `start`
    pub fn selected_difficulty(&self) -> Difficulty {
        self.selected
    }

    pub fn select(&mut self, difficulty: Difficulty) {
        if self.selected != difficulty {
            log::info!("Difficulty {} selected for the next game", difficulty.as_str());
        }
        self.selected = difficulty;
    }

    /// Choose the difficulty for the next `start` by name; unknown names are
    /// ignored
    pub fn select_difficulty(&mut self, name: &str) -> bool {
        match Difficulty::from_str(name) {
            Some(difficulty) => {
                self.select(difficulty);
                true
            }
            None => {
                log::warn!("Unknown difficulty {:?}, keeping {}", name, self.selected.as_str());
                false
            }
        }
    }

    /// Reset the session and deal a fresh board
    pub fn start(&mut self) {
        self.difficulty = self.selected;
        self.config = self.difficulty.config();
        let config = self.config;
        self.level = 1;
        self.score = 0;
        self.projectile = None;
        self.aim_angle = AIM_DEFAULT;
        self.shots_until_next_row = config.shots_to_add_row;
        self.time_ticks = 0;
        self.events.clear();
        self.rebuild_grid();
        self.phase = GamePhase::Playing;
        log::info!(
            "Game started: {} ({} rows x {} cols, row every {} shots), radius {:.1}",
            self.difficulty.as_str(),
            config.rows,
            config.cols,
            config.shots_to_add_row,
            self.grid.radius()
        );
    }

    /// Size the lattice from the viewport and fill the starting rows
    fn rebuild_grid(&mut self) {
        let config = self.config();
        self.grid = HexGrid::with_layout(config.cols, self.viewport.width);
        self.grid.fill_random(config.rows, &mut self.rng);
        self.generate_shooter_bubbles();
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
            log::info!("Paused");
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
            log::info!("Resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => {}
        }
    }

    /// Leave to the title screen, discarding the board and any shot in flight
    pub fn exit(&mut self) {
        self.phase = GamePhase::Idle;
        self.projectile = None;
        self.shooter = None;
        self.next = None;
        self.grid = HexGrid::with_layout(self.selected.config().cols, self.viewport.width);
        log::info!("Exited to title (score {})", self.score);
    }

    /// Update the aim if it lies inside the aim arc.
    ///
    /// Ignored while not playing or while a shot is in flight.
    pub fn aim(&mut self, angle: f32) -> bool {
        if self.phase != GamePhase::Playing || self.projectile.is_some() || !in_aim_arc(angle) {
            return false;
        }
        self.aim_angle = angle;
        true
    }

    /// Fire the loaded bubble; no-op unless playing with nothing in flight
    pub fn shoot(&mut self) -> bool {
        if self.phase != GamePhase::Playing || self.projectile.is_some() {
            return false;
        }
        let Some(shooter) = self.shooter.take() else {
            return false;
        };

        self.projectile = Some(Projectile::launch(
            &shooter,
            self.shooter_pos(),
            self.aim_angle,
            self.projectile_speed(),
        ));
        self.shooter = self.next.take();
        self.next = Some(Bubble::new(self.bubble_color()));
        self.events.push(GameEvent::Shoot);
        log::debug!("Shot color {} at {:.3} rad", shooter.color, self.aim_angle);
        true
    }

    /// New viewport size. A running game is re-laid out from scratch.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport { width, height };
        match self.phase {
            GamePhase::Playing | GamePhase::Paused => {
                self.projectile = None;
                self.rebuild_grid();
                log::info!("Resized to {}x{}, board rebuilt", width, height);
            }
            GamePhase::Idle => {
                self.grid = HexGrid::with_layout(self.selected.config().cols, width);
            }
            GamePhase::GameOver => {}
        }
    }

    /// Enter game over; later calls do nothing
    pub fn end_game(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.projectile = None;
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
        });
        log::info!("Game over! Final score: {} (level {})", self.score, self.level);
    }

    /// Push a new random row in at the top; the bottom row falls off
    pub fn add_row(&mut self) {
        let top = self.grid.random_row(0, &mut self.rng);
        let dropped = self.grid.inject_top_row(top);
        for bubble in &dropped {
            if let Some(pos) = bubble.anchor {
                log::debug!("Bubble color {} at {} pushed off the lattice", bubble.color, pos);
            }
        }
        self.events.push(GameEvent::RowAdded {
            dropped: dropped.len(),
        });
        log::info!("Row added ({} bubbles pushed off the lattice)", dropped.len());
    }

    /// Random color among those still on the board, or the full palette
    pub fn bubble_color(&mut self) -> ColorIndex {
        let active = self.grid.active_colors();
        if active.is_empty() {
            self.rng.random_range(0..PALETTE_SIZE)
        } else {
            active[self.rng.random_range(0..active.len())]
        }
    }

    /// Refill both launcher slots
    pub fn generate_shooter_bubbles(&mut self) {
        self.shooter = Some(Bubble::new(self.bubble_color()));
        self.next = Some(Bubble::new(self.bubble_color()));
    }

    /// Mark the same-color cluster around `seed` if it is large enough.
    ///
    /// Scores `POINTS_PER_MATCH` per bubble and returns whether it matched.
    pub fn process_matches(&mut self, seed: GridPos) -> bool {
        let cluster = find_cluster(&self.grid, seed);
        if cluster.len() < MIN_CLUSTER_SIZE {
            return false;
        }
        mark_popping(&mut self.grid, &cluster);
        self.score += cluster.len() as u64 * POINTS_PER_MATCH;
        log::debug!("Cluster of {} at {}", cluster.len(), seed);
        true
    }

    /// Mark every bubble cut off from the ceiling; returns how many
    pub fn process_floating(&mut self) -> usize {
        let floating = find_floating(&self.grid);
        if !floating.is_empty() {
            mark_popping(&mut self.grid, &floating);
            self.score += floating.len() as u64 * POINTS_PER_FLOATING;
            log::debug!("{} floating bubbles dropped", floating.len());
        }
        floating.len()
    }

    /// Board emptied: deal the next level
    pub fn clear_level(&mut self) {
        self.level += 1;
        let config = self.config();
        self.grid.fill_random(config.rows, &mut self.rng);
        self.shots_until_next_row = config.shots_to_add_row;
        self.generate_shooter_bubbles();
        self.events.push(GameEvent::LevelCleared { level: self.level });
        log::info!("Board cleared! Level {}", self.level);
    }

    /// Launcher position (bottom center)
    pub fn shooter_pos(&self) -> Vec2 {
        Vec2::new(
            self.viewport.width / 2.0,
            self.viewport.height - self.grid.radius(),
        )
    }

    /// Where the queued bubble is shown (bottom left)
    pub fn next_pos(&self) -> Vec2 {
        let r = self.grid.radius();
        Vec2::new(r * 2.5, self.viewport.height - r)
    }

    /// Any placed bubble center below this ends the game
    pub fn loss_line_y(&self) -> f32 {
        self.viewport.height - self.grid.radius()
    }

    /// Pixels a projectile travels per tick
    pub fn projectile_speed(&self) -> f32 {
        self.viewport.height / SPEED_DIVISOR
    }

    /// Start and end of the aim guide
    pub fn aim_line(&self, length: f32) -> (Vec2, Vec2) {
        let start = self.shooter_pos();
        (start, start + crate::direction(self.aim_angle) * length)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    #[cfg(test)]
    pub(crate) fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        let bubbles = self
            .grid
            .iter()
            .map(|(pos, b)| PlacedBubble {
                pos,
                center: self.grid.pixel_coords(pos),
                color: b.color,
                popping: b.popping,
                anim_frame: b.anim_frame,
            })
            .collect();

        Snapshot {
            difficulty: self.difficulty,
            level: self.level,
            score: self.score,
            phase: self.phase,
            is_paused: self.is_paused(),
            is_game_over: self.is_game_over(),
            viewport: self.viewport,
            cols: self.grid.cols(),
            bubble_radius: self.grid.radius(),
            bubbles,
            shooter: self.shooter.map(|b| b.color),
            next: self.next.map(|b| b.color),
            shooter_pos: self.shooter_pos(),
            next_pos: self.next_pos(),
            projectile: self.projectile,
            aim_angle: self.aim_angle,
            shots_until_next_row: self.shots_until_next_row,
            loss_line_y: self.loss_line_y(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.resize(450.0, 800.0);
        state.start();
        state
    }

    #[test]
    fn test_difficulty_configs() {
        assert_eq!(
            Difficulty::Easy.config(),
            DifficultyConfig {
                rows: 6,
                cols: 9,
                shots_to_add_row: 7
            }
        );
        assert_eq!(Difficulty::Medium.config().cols, 11);
        assert_eq!(Difficulty::Hard.config().shots_to_add_row, 5);
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_start_deals_board() {
        let state = started(1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.grid.row_count(), 6);
        assert_eq!(state.grid.len(), 9 * 3 + 8 * 3);
        assert!((state.grid.radius() - 25.0).abs() < 1e-4);
        assert_eq!(state.shots_until_next_row, 7);
        assert!(state.shooter.is_some() && state.next.is_some());
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_select_difficulty_before_start() {
        let mut state = GameState::new(3);
        assert!(state.select_difficulty("hard"));
        assert!(!state.select_difficulty("impossible"));
        assert_eq!(state.selected_difficulty(), Difficulty::Hard);
        state.start();
        assert_eq!(state.difficulty(), Difficulty::Hard);
        assert_eq!(state.grid.row_count(), 10);
        assert_eq!(state.grid.cols(), 13);
    }

    #[test]
    fn test_shooter_colors_come_from_board() {
        let mut state = started(5);
        let active = state.grid.active_colors();
        for _ in 0..50 {
            let color = state.bubble_color();
            assert!(active.contains(&color));
        }
    }

    #[test]
    fn test_empty_board_uses_palette() {
        let mut state = GameState::new(5);
        for _ in 0..50 {
            assert!(state.bubble_color() < PALETTE_SIZE);
        }
    }

    #[test]
    fn test_aim_arc() {
        let mut state = started(2);
        assert!(state.aim(-1.0));
        assert!(!state.aim(-0.1));
        assert!(!state.aim(-3.0));
        assert!(!state.aim(0.5));
        assert_eq!(state.aim_angle, -1.0);
    }

    #[test]
    fn test_shoot_promotes_queue() {
        let mut state = started(9);
        let shooter = state.shooter;
        let next = state.next;

        assert!(state.shoot());
        let projectile = state.projectile.unwrap_or_else(|| panic!("no projectile"));
        assert_eq!(Some(projectile.color), shooter.map(|b| b.color));
        assert_eq!(projectile.pos, state.shooter_pos());
        assert!((projectile.speed - 800.0 / 60.0).abs() < 1e-4);
        assert_eq!(state.shooter, next);
        assert!(state.next.is_some());
        assert_eq!(state.events(), &[GameEvent::Shoot]);

        // Second shot while the first is in flight is ignored, as is aiming
        assert!(!state.shoot());
        assert!(!state.aim(-1.0));
    }

    #[test]
    fn test_shoot_ignored_when_paused_or_over() {
        let mut state = started(9);
        state.pause();
        assert!(!state.shoot());
        state.resume();
        state.end_game();
        assert!(!state.shoot());
        assert!(state.projectile.is_none());
    }

    #[test]
    fn test_pause_resume() {
        let mut state = started(4);
        state.toggle_pause();
        assert!(state.is_paused());
        state.toggle_pause();
        assert!(state.is_playing());

        state.resume();
        assert!(state.is_playing());
    }

    #[test]
    fn test_end_game_once() {
        let mut state = started(4);
        state.score = 120;
        state.end_game();
        state.end_game();
        let over: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .collect();
        assert_eq!(over, vec![GameEvent::GameOver { final_score: 120 }]);
        assert!(state.is_game_over());
    }

    #[test]
    fn test_process_matches_scores_cluster() {
        let mut state = started(8);
        state.grid = HexGrid::with_layout(9, 450.0);
        state.grid.place(GridPos::new(0, 3), 2);
        state.grid.place(GridPos::new(0, 4), 2);
        state.grid.place(GridPos::new(1, 3), 2);
        state.grid.place(GridPos::new(0, 0), 5);

        assert!(state.process_matches(GridPos::new(1, 3)));
        assert_eq!(state.score, 30);
        let popping: Vec<_> = state.grid.iter().filter(|(_, b)| b.popping).collect();
        assert_eq!(popping.len(), 3);
    }

    #[test]
    fn test_process_matches_too_small() {
        let mut state = started(8);
        state.grid = HexGrid::with_layout(9, 450.0);
        state.grid.place(GridPos::new(0, 3), 2);
        state.grid.place(GridPos::new(0, 4), 2);

        assert!(!state.process_matches(GridPos::new(0, 4)));
        assert_eq!(state.score, 0);
        assert!(state.grid.iter().all(|(_, b)| !b.popping));
    }

    #[test]
    fn test_process_floating_scores() {
        let mut state = started(8);
        state.grid = HexGrid::with_layout(9, 450.0);
        state.grid.place(GridPos::new(0, 4), 1);
        state.grid.place(GridPos::new(1, 4), 2);
        state.grid.place(GridPos::new(2, 0), 3);

        assert_eq!(state.process_floating(), 1);
        assert_eq!(state.score, 20);
        state.grid.remove_popping();
        assert_eq!(state.process_floating(), 0);
        assert_eq!(state.score, 20);
    }

    #[test]
    fn test_add_row_keeps_row_count() {
        let mut state = started(12);
        let rows = state.grid.row_count();
        state.add_row();
        assert_eq!(state.grid.row_count(), rows);
        assert_eq!(state.grid.rows()[0].len(), 9);
        assert!(state.grid.rows()[0].iter().all(|s| !s.is_empty()));
        for (pos, bubble) in state.grid.iter() {
            assert_eq!(bubble.anchor, Some(pos));
        }
        // Old row 5 (8 bubbles) falls off; rows 0, 2 and 4 turn odd and lose
        // their ninth bubble
        assert!(state.events().contains(&GameEvent::RowAdded { dropped: 11 }));
    }

    #[test]
    fn test_resize_rebuilds_running_game() {
        let mut state = started(6);
        state.grid = HexGrid::with_layout(9, 450.0);
        assert!(state.shoot());

        state.resize(900.0, 1600.0);
        assert!(state.projectile.is_none());
        assert!((state.grid.radius() - 50.0).abs() < 1e-4);
        assert_eq!(state.grid.len(), 9 * 3 + 8 * 3);
    }

    #[test]
    fn test_difficulty_change_waits_for_next_start() {
        let mut state = started(6);
        assert!(state.select_difficulty("hard"));
        assert_eq!(state.difficulty(), Difficulty::Easy);
        assert_eq!(state.config(), Difficulty::Easy.config());

        // Resize rebuilds with the running game's shape
        state.resize(450.0, 800.0);
        assert_eq!(state.grid.cols(), 9);
        assert_eq!(state.grid.row_count(), 6);

        // Level boards and the row cadence keep the easy config too
        state.grid = HexGrid::with_layout(9, 450.0);
        state.clear_level();
        assert_eq!(state.grid.cols(), 9);
        assert_eq!(state.grid.row_count(), 6);
        assert_eq!(state.shots_until_next_row, 7);

        state.start();
        assert_eq!(state.difficulty(), Difficulty::Hard);
        assert_eq!(state.grid.cols(), 13);
        assert_eq!(state.shots_until_next_row, 5);
    }

    #[test]
    fn test_exit_lays_out_for_selected_difficulty() {
        let mut state = started(6);
        state.select(Difficulty::Medium);
        state.exit();
        assert_eq!(state.grid.cols(), 11);
        assert_eq!(state.difficulty(), Difficulty::Easy);
    }

    #[test]
    fn test_exit_discards_session() {
        let mut state = started(6);
        assert!(state.shoot());
        state.exit();
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.projectile.is_none());
        assert!(state.grid.is_empty());
    }

    #[test]
    fn test_clear_level_deals_new_board() {
        let mut state = started(6);
        state.grid = HexGrid::with_layout(9, 450.0);
        state.shots_until_next_row = 2;
        state.clear_level();
        assert_eq!(state.level, 2);
        assert_eq!(state.grid.row_count(), 6);
        assert_eq!(state.shots_until_next_row, 7);
        assert!(state.events().contains(&GameEvent::LevelCleared { level: 2 }));
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = started(77);
        let b = started(77);
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.shooter, b.shooter);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let state = started(10);
        let snap = state.snapshot();
        assert_eq!(snap.bubbles.len(), state.grid.len());
        assert_eq!(snap.shooter_pos, Vec2::new(225.0, 775.0));
        assert_eq!(snap.next_pos, Vec2::new(62.5, 775.0));
        assert!((snap.loss_line_y - 775.0).abs() < 1e-4);
        assert!(!snap.is_paused && !snap.is_game_over);
        assert!(serde_json::to_string(&snap).is_ok());
    }

    #[test]
    fn test_aim_line() {
        let state = started(10);
        let (start, end) = state.aim_line(100.0);
        assert!((end.x - start.x).abs() < 1e-3);
        assert!((start.y - end.y - 100.0).abs() < 1e-3);
    }
}
