use crate::{
    algorithm::adjacency::AdjacencyModel,
    algorithm::votes::VoteTally,
    spatial::{CellDistribution, TileId, WaveGrid},
};

/// Recompute one cell's distribution from its in-bounds neighbors
///
/// Collapsed cells are left alone. Each neighboring distribution votes through
/// the adjacency entries on its facing side; see [`VoteTally`] for the rule.
/// Returns whether the stored distribution changed by content.
pub fn recompute_cell(grid: &mut WaveGrid, model: &AdjacencyModel, x: usize, y: usize) -> bool {
    let Some(current) = grid.get(x, y) else {
        return false;
    };
    if current.is_collapsed() {
        return false;
    }

    let mut tally = VoteTally::new(model.tile_count());
    for (direction, nx, ny) in grid.neighbors(x, y) {
        if let Some(neighbor) = grid.get(nx, ny) {
            tally.cast(model, neighbor.tiles(), direction.opposite());
        }
    }
    if tally.directions() == 0 {
        return false;
    }

    let updated = tally.resolve();
    if grid.get(x, y) == Some(&updated) {
        return false;
    }
    if let Some(cell) = grid.get_mut(x, y) {
        *cell = updated;
    }
    true
}

/// Relax constraints outward from a changed cell with a bounded depth
///
/// Depth-first worklist: every popped cell recomputes its four neighbors and
/// re-queues those that changed with one less unit of budget. Cells beyond the
/// budget keep stale distributions until a later change reaches them again, so
/// the result is an approximate relaxation rather than full arc consistency.
/// Returns how many cell updates were made.
pub fn propagate_from(
    grid: &mut WaveGrid,
    model: &AdjacencyModel,
    x: usize,
    y: usize,
    depth: u32,
) -> usize {
    let mut updates = 0;
    let mut stack = vec![(x, y, depth)];

    while let Some((cx, cy, budget)) = stack.pop() {
        if budget == 0 {
            continue;
        }
        for (_, nx, ny) in grid.neighbors(cx, cy) {
            if recompute_cell(grid, model, nx, ny) {
                updates += 1;
                stack.push((nx, ny, budget - 1));
            }
        }
    }

    updates
}

/// Pin a cell to one tile and propagate from it
///
/// Callers validate the coordinate and tile id beforehand.
pub fn fix_cell(
    grid: &mut WaveGrid,
    model: &AdjacencyModel,
    x: usize,
    y: usize,
    tile: TileId,
    depth: u32,
) -> usize {
    if let Some(cell) = grid.get_mut(x, y) {
        *cell = CellDistribution::singleton(tile);
    }
    propagate_from(grid, model, x, y, depth)
}
