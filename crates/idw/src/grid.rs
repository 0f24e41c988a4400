//! Regular generation grid over an extent.

use crate::error::IdwError;
use crate::point::{Extent, Point};

/// One rectangular cell of a generation grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    /// Row-major id starting at 0 in the top-left cell.
    pub id: usize,
    /// Left edge.
    pub xmin: f64,
    /// Right edge.
    pub xmax: f64,
    /// Bottom edge.
    pub ymin: f64,
    /// Top edge.
    pub ymax: f64,
}

impl GridCell {
    /// Centre of the cell.
    pub fn centroid(&self) -> Point {
        Point::new(
            (self.xmin + self.xmax) / 2.0,
            (self.ymin + self.ymax) / 2.0,
        )
    }
}

/// Lay cells of `dx` by `dy` over `extent`.
///
/// Rows start at `ymax` and step down while the row's top edge is still
/// `>= ymin`; columns start at `xmin` and step right while the left edge is
/// `<= xmax`. Cells may overhang the extent on the right and bottom.
pub fn grid_cells(extent: &Extent, dx: f64, dy: f64) -> Result<Vec<GridCell>, IdwError> {
    if !dx.is_finite() || !dy.is_finite() || dx <= 0.0 || dy <= 0.0 {
        return Err(IdwError::InvalidSpacing { dx, dy });
    }
    extent.validate()?;

    let mut cells = Vec::new();
    let mut row = 0usize;
    loop {
        let top = extent.ymax - row as f64 * dy;
        if top < extent.ymin {
            break;
        }
        let mut col = 0usize;
        loop {
            let left = extent.xmin + col as f64 * dx;
            if left > extent.xmax {
                break;
            }
            cells.push(GridCell {
                id: cells.len(),
                xmin: left,
                xmax: left + dx,
                ymin: top - dy,
                ymax: top,
            });
            col += 1;
        }
        row += 1;
    }
    Ok(cells)
}

/// Centroids of [`grid_cells`], in cell-id order.
pub fn grid_centroids(extent: &Extent, dx: f64, dy: f64) -> Result<Vec<Point>, IdwError> {
    Ok(grid_cells(extent, dx, dy)?
        .iter()
        .map(GridCell::centroid)
        .collect())
}
