//! Hexagonal bubble lattice
//!
//! Rows are stored top to bottom. Even rows hold `cols` slots and start one
//! radius in from the left wall; odd rows hold `cols - 1` slots and start two
//! radii in, giving the staggered brick layout. Vertical spacing is `R·√3`,
//! which packs touching circles of radius `R` exactly.

use std::collections::BTreeSet;
use std::fmt;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{PALETTE_SIZE, POP_ANIM_FRAMES};

/// Square root of 3, the row pitch in radii
pub const SQRT_3: f32 = 1.732_050_8;

/// Palette index of a bubble color
pub type ColorIndex = u8;

/// Neighbor deltas (row, col) for odd rows
const ODD_ROW_DIRECTIONS: [(isize, isize); 6] = [(0, -1), (0, 1), (-1, 0), (-1, 1), (1, 0), (1, 1)];
/// Neighbor deltas (row, col) for even rows
const EVEN_ROW_DIRECTIONS: [(isize, isize); 6] =
    [(0, -1), (0, 1), (-1, -1), (-1, 0), (1, -1), (1, 0)];

/// Lattice coordinate of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    #[inline]
    pub const fn is_odd_row(&self) -> bool {
        self.row % 2 != 0
    }

    /// Row/column deltas to the six surrounding slots
    pub fn directions(&self) -> &'static [(isize, isize); 6] {
        if self.is_odd_row() {
            &ODD_ROW_DIRECTIONS
        } else {
            &EVEN_ROW_DIRECTIONS
        }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A bubble, either placed in the grid or waiting in the launcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bubble {
    /// Slot position while placed; `None` for shooter/next/projectile bubbles
    pub anchor: Option<GridPos>,
    pub color: ColorIndex,
    /// Marked for removal (matched cluster or lost its anchor)
    pub popping: bool,
    /// Ticks spent in the pop animation
    pub anim_frame: u32,
}

impl Bubble {
    /// An unanchored bubble for the launcher queue
    pub const fn new(color: ColorIndex) -> Self {
        Self {
            anchor: None,
            color,
            popping: false,
            anim_frame: 0,
        }
    }

    pub const fn placed(pos: GridPos, color: ColorIndex) -> Self {
        Self {
            anchor: Some(pos),
            color,
            popping: false,
            anim_frame: 0,
        }
    }

    /// Advance the pop animation by one tick (no-op unless popping)
    pub fn advance_pop(&mut self) {
        if self.popping {
            self.anim_frame += 1;
        }
    }

    /// Popping and past the last animation frame
    pub fn pop_finished(&self) -> bool {
        self.popping && self.anim_frame > POP_ANIM_FRAMES
    }
}

/// One lattice cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Slot {
    #[default]
    Empty,
    Occupied(Bubble),
}

impl Slot {
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub fn bubble(&self) -> Option<&Bubble> {
        match self {
            Slot::Occupied(bubble) => Some(bubble),
            Slot::Empty => None,
        }
    }

    pub fn bubble_mut(&mut self) -> Option<&mut Bubble> {
        match self {
            Slot::Occupied(bubble) => Some(bubble),
            Slot::Empty => None,
        }
    }

    pub fn into_bubble(self) -> Option<Bubble> {
        match self {
            Slot::Occupied(bubble) => Some(bubble),
            Slot::Empty => None,
        }
    }
}

/// Progress of all running pop animations after one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PopProgress {
    /// Bubbles currently marked popping
    pub popping: usize,
    /// True once every popping bubble has finished animating
    pub finished: bool,
}

/// The bubble lattice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HexGrid {
    rows: Vec<Vec<Slot>>,
    cols: usize,
    radius: f32,
}

impl HexGrid {
    /// Empty grid with no rows
    pub fn new(cols: usize, radius: f32) -> Self {
        Self {
            rows: Vec::new(),
            cols,
            radius,
        }
    }

    /// Empty grid whose bubbles exactly span `viewport_width`
    pub fn with_layout(cols: usize, viewport_width: f32) -> Self {
        Self::new(cols, radius_for(cols, viewport_width))
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Number of rows currently stored (including empty ones)
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Slots in `row`: `cols` for even rows, `cols - 1` for odd rows
    #[inline]
    pub fn slot_count(&self, row: usize) -> usize {
        self.cols.saturating_sub(row % 2)
    }

    /// Pixel center of a slot
    pub fn pixel_coords(&self, pos: GridPos) -> Vec2 {
        let r = self.radius;
        let offset = if pos.is_odd_row() { 2.0 } else { 1.0 };
        Vec2::new(
            pos.col as f32 * 2.0 * r + offset * r,
            pos.row as f32 * r * SQRT_3 + r,
        )
    }

    pub fn slot(&self, pos: GridPos) -> Option<&Slot> {
        self.rows.get(pos.row).and_then(|row| row.get(pos.col))
    }

    pub fn get(&self, pos: GridPos) -> Option<&Bubble> {
        self.slot(pos).and_then(Slot::bubble)
    }

    pub fn get_mut(&mut self, pos: GridPos) -> Option<&mut Bubble> {
        self.rows
            .get_mut(pos.row)
            .and_then(|row| row.get_mut(pos.col))
            .and_then(Slot::bubble_mut)
    }

    pub fn is_occupied(&self, pos: GridPos) -> bool {
        self.get(pos).is_some()
    }

    /// Append an empty row at the bottom
    pub fn push_empty_row(&mut self) {
        let count = self.slot_count(self.rows.len());
        self.rows.push(vec![Slot::Empty; count]);
    }

    /// Place a new bubble, growing the grid downward if needed.
    ///
    /// Returns false (and leaves the grid untouched) when the column does not
    /// exist in that row.
    pub fn place(&mut self, pos: GridPos, color: ColorIndex) -> bool {
        if pos.col >= self.slot_count(pos.row) {
            return false;
        }
        while self.rows.len() <= pos.row {
            self.push_empty_row();
        }
        self.rows[pos.row][pos.col] = Slot::Occupied(Bubble::placed(pos, color));
        true
    }

    /// In-range slot positions around `pos`, occupied or not
    pub fn neighbor_positions(&self, pos: GridPos) -> impl Iterator<Item = GridPos> + '_ {
        pos.directions().iter().filter_map(move |&(dr, dc)| {
            let row = pos.row.checked_add_signed(dr)?;
            let col = pos.col.checked_add_signed(dc)?;
            (row < self.rows.len() && col < self.slot_count(row)).then_some(GridPos::new(row, col))
        })
    }

    /// Occupied slots adjacent to `pos`
    pub fn neighbors(&self, pos: GridPos) -> Vec<GridPos> {
        self.neighbor_positions(pos)
            .filter(|&n| self.is_occupied(n))
            .collect()
    }

    /// Placed bubbles in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, &Bubble)> {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(c, slot)| slot.bubble().map(|b| (GridPos::new(r, c), b)))
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Bubble> {
        self.rows
            .iter_mut()
            .flat_map(|row| row.iter_mut().filter_map(Slot::bubble_mut))
    }

    /// Raw rows, top first
    pub fn rows(&self) -> &[Vec<Slot>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Distinct colors still on the board, ascending
    pub fn active_colors(&self) -> Vec<ColorIndex> {
        self.iter()
            .map(|(_, b)| b.color)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Largest bubble center y on the board
    pub fn lowest_center_y(&self) -> Option<f32> {
        self.iter()
            .map(|(pos, _)| self.pixel_coords(pos).y)
            .reduce(f32::max)
    }

    /// A full row of random palette colors sized for `row`
    pub fn random_row<R: Rng>(&self, row: usize, rng: &mut R) -> Vec<Slot> {
        (0..self.slot_count(row))
            .map(|col| {
                Slot::Occupied(Bubble::placed(
                    GridPos::new(row, col),
                    rng.random_range(0..PALETTE_SIZE),
                ))
            })
            .collect()
    }

    /// Replace the contents with `rows` full rows of random colors
    pub fn fill_random<R: Rng>(&mut self, rows: usize, rng: &mut R) {
        self.rows.clear();
        for r in 0..rows {
            let row = self.random_row(r, rng);
            self.rows.push(row);
        }
    }

    /// Drop the bottom row, insert `top` as the new row 0 and relabel every
    /// bubble below it.
    ///
    /// Rows change parity when they move down, so each shifted row is resized
    /// to its new slot count; a bubble in the last slot of a row that becomes
    /// odd falls outside the lattice and is returned with the dropped bottom
    /// row.
    pub fn inject_top_row(&mut self, mut top: Vec<Slot>) -> Vec<Bubble> {
        let mut dropped: Vec<Bubble> = self
            .rows
            .pop()
            .into_iter()
            .flatten()
            .filter_map(Slot::into_bubble)
            .collect();

        top.resize(self.slot_count(0), Slot::Empty);
        self.rows.insert(0, top);

        for r in 0..self.rows.len() {
            let count = self.slot_count(r);
            let row = &mut self.rows[r];
            if row.len() > count {
                dropped.extend(row.drain(count..).filter_map(Slot::into_bubble));
            } else {
                row.resize(count, Slot::Empty);
            }
            for (c, slot) in row.iter_mut().enumerate() {
                if let Slot::Occupied(bubble) = slot {
                    bubble.anchor = Some(GridPos::new(r, c));
                }
            }
        }

        dropped
    }

    /// Step every pop animation by one tick
    pub fn advance_pop_animations(&mut self) -> PopProgress {
        let mut progress = PopProgress {
            popping: 0,
            finished: true,
        };
        for bubble in self.iter_mut().filter(|b| b.popping) {
            bubble.advance_pop();
            progress.popping += 1;
            if !bubble.pop_finished() {
                progress.finished = false;
            }
        }
        progress
    }

    /// Clear every popping bubble out of the grid, returning how many went
    pub fn remove_popping(&mut self) -> usize {
        let mut removed = 0;
        for slot in self.rows.iter_mut().flatten() {
            if slot.bubble().is_some_and(|b| b.popping) {
                *slot = Slot::Empty;
                removed += 1;
            }
        }
        removed
    }
}

/// Bubble radius such that `cols` bubbles span the viewport width
#[inline]
pub fn radius_for(cols: usize, viewport_width: f32) -> f32 {
    viewport_width / (cols.max(1) as f32 * 2.0)
}
