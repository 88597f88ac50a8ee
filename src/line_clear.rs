//! Full-row detection and field compaction

use crate::grid::{EMPTY, Grid, GridError};

/// Indices of full rows, ascending (bottom first)
pub fn full_rows(grid: &Grid) -> Result<Vec<usize>, GridError> {
    let mut rows = Vec::new();
    for y in 0..grid.height() {
        if grid.is_row_full(y as i32)? {
            rows.push(y);
        }
    }
    Ok(rows)
}

/// Remove the given rows (ascending, as produced by `full_rows`).
///
/// Each removal shifts everything above it down one row and blanks the top
/// row. Later indices are adjusted for the rows already removed in this pass.
pub fn remove_rows(grid: &mut Grid, rows: &[usize]) -> Result<(), GridError> {
    let width = grid.width() as i32;
    let top = grid.height() as i32 - 1;

    for (removed, &row) in rows.iter().enumerate() {
        let target = (row - removed) as i32;
        for y in target..top {
            for x in 0..width {
                let above = grid.get(x, y + 1)?;
                grid.set(x, y, above)?;
            }
        }
        for x in 0..width {
            grid.set(x, top, EMPTY)?;
        }
    }
    Ok(())
}

/// Detect and remove every full row, returning the removed indices
pub fn clear_full_rows(grid: &mut Grid) -> Result<Vec<usize>, GridError> {
    let rows = full_rows(grid)?;
    if !rows.is_empty() {
        remove_rows(grid, &rows)?;
    }
    Ok(rows)
}
