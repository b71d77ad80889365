//! Cluster analysis over the bubble lattice
//!
//! Two flood fills share the grid adjacency:
//! - same-color clusters grown from a freshly placed bubble (depth-first)
//! - ceiling connectivity grown from every bubble in row 0 (breadth-first);
//!   anything the fill does not reach is floating and drops

use std::collections::{HashSet, VecDeque};

use super::hex::{GridPos, HexGrid};

/// All bubbles reachable from `seed` through neighbors of the seed's color.
///
/// The seed itself is always first. Returns an empty list if `seed` is empty.
pub fn find_cluster(grid: &HexGrid, seed: GridPos) -> Vec<GridPos> {
    let Some(target) = grid.get(seed).map(|b| b.color) else {
        return Vec::new();
    };

    let mut cluster = vec![seed];
    let mut visited = HashSet::from([seed]);
    let mut stack = vec![seed];

    while let Some(current) = stack.pop() {
        for neighbor in grid.neighbors(current) {
            let same_color = grid.get(neighbor).is_some_and(|b| b.color == target);
            if same_color && visited.insert(neighbor) {
                stack.push(neighbor);
                cluster.push(neighbor);
            }
        }
    }

    cluster
}

/// Every placed bubble with no adjacency path back to row 0, in row-major order
pub fn find_floating(grid: &HexGrid) -> Vec<GridPos> {
    let anchored = find_anchored(grid);
    grid.iter()
        .map(|(pos, _)| pos)
        .filter(|pos| !anchored.contains(pos))
        .collect()
}

/// Bubbles transitively connected to the ceiling row
fn find_anchored(grid: &HexGrid) -> HashSet<GridPos> {
    let mut anchored = HashSet::new();
    let mut queue = VecDeque::new();

    for (pos, _) in grid.iter().take_while(|(pos, _)| pos.row == 0) {
        anchored.insert(pos);
        queue.push_back(pos);
    }

    while let Some(current) = queue.pop_front() {
        for neighbor in grid.neighbors(current) {
            if anchored.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    anchored
}

/// Flag every listed bubble for the pop animation
pub fn mark_popping(grid: &mut HexGrid, positions: &[GridPos]) {
    for &pos in positions {
        if let Some(bubble) = grid.get_mut(pos) {
            bubble.popping = true;
        }
    }
}
