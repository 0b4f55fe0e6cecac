//! Pure blob mutations and the merge-target decision.
//!
//! Nothing here writes to the document. Each function maps input values to
//! a new blob value; callers persist the result (or delete the entry) in a
//! separate step.

use std::collections::BTreeSet;

use crate::document::WorldDocument;
use crate::error::PaintError;
use crate::geometry::{Bounds, Cell, CARDINAL_NEIGHBOR_OFFSETS};
use crate::model::{mint_blob_id, Blob, PaintKind};
use crate::query::all_blobs;

/// Builds a fresh blob from an explicit cell set.
pub fn create_paint_blob(
    color: &str,
    initial_cells: &[Cell],
    kind: PaintKind,
    pattern_key: Option<String>,
) -> Result<Blob, PaintError> {
    let cells: BTreeSet<Cell> = initial_cells.iter().copied().collect();
    let bounds = Bounds::from_cells(cells.iter().copied()).ok_or(PaintError::EmptyCellSet)?;
    Ok(Blob {
        id: mint_blob_id(),
        kind,
        color: color.to_string(),
        pattern_key,
        bounds,
        cells,
    })
}

/// Unions `new_cells` into the blob, widening bounds incrementally. Cells
/// already present change nothing, so adding a subset returns the input
/// value unchanged.
pub fn add_cells_to_blob(mut blob: Blob, new_cells: &[Cell]) -> Blob {
    for &cell in new_cells {
        if blob.cells.insert(cell) {
            blob.bounds.include(cell);
        }
    }
    blob
}

/// Removes cells and recomputes bounds from scratch. Returns `None` when the
/// blob would end up empty; the caller must then delete the stored entry.
pub fn remove_cells_from_blob(mut blob: Blob, cells: &[Cell]) -> Option<Blob> {
    for cell in cells {
        blob.cells.remove(cell);
    }
    let remaining = std::mem::take(&mut blob.cells);
    blob.with_cells(remaining)
}

/// Where a painted cell should land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaintTarget {
    /// Merge into a stored blob. `document_key` is where the updated value
    /// must be written back.
    Existing { document_key: String, blob: Blob },
    /// No compatible blob nearby; a fresh single-cell blob.
    New { blob: Blob },
}

impl PaintTarget {
    pub fn blob(&self) -> &Blob {
        match self {
            PaintTarget::Existing { blob, .. } | PaintTarget::New { blob } => blob,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, PaintTarget::New { .. })
    }
}

/// Decides the merge target for painting `(x, y)` with the given color and
/// kind. Priority: a blob already covering the cell, then blobs covering the
/// up, down, left, right neighbors in that order, then a new blob. Only
/// blobs with identical color and kind are candidates.
pub fn find_paint_target(
    doc: &dyn WorldDocument,
    x: i64,
    y: i64,
    color: &str,
    kind: PaintKind,
) -> PaintTarget {
    let blobs = all_blobs(doc);
    let cell = Cell::new(x, y);
    match paint_target_index(&blobs, cell, color, kind) {
        Some(index) => PaintTarget::Existing {
            document_key: blobs[index].document_key(),
            blob: blobs[index].clone(),
        },
        None => PaintTarget::New {
            blob: single_cell_blob(cell, color, kind),
        },
    }
}

pub(crate) fn paint_target_index(
    blobs: &[Blob],
    cell: Cell,
    color: &str,
    kind: PaintKind,
) -> Option<usize> {
    let compatible = |blob: &Blob| blob.kind == kind && blob.color == color;
    if let Some(index) = blobs
        .iter()
        .position(|blob| compatible(blob) && blob.contains_cell(cell))
    {
        return Some(index);
    }
    for (dx, dy) in CARDINAL_NEIGHBOR_OFFSETS {
        let neighbor = cell.offset(dx, dy);
        if let Some(index) = blobs
            .iter()
            .position(|blob| compatible(blob) && blob.contains_cell(neighbor))
        {
            return Some(index);
        }
    }
    None
}

pub(crate) fn single_cell_blob(cell: Cell, color: &str, kind: PaintKind) -> Blob {
    Blob {
        id: mint_blob_id(),
        kind,
        color: color.to_string(),
        pattern_key: None,
        bounds: Bounds::of_cell(cell),
        cells: BTreeSet::from([cell]),
    }
}

/// Remaps every cell into `new_bounds` by its fractional position within the
/// old bounds, rounding to the nearest cell. Colliding cells collapse into
/// one. A blob whose bounds have zero width or height is returned unchanged.
pub fn resize_paint_blob(blob: &Blob, new_bounds: Bounds) -> Blob {
    let old = blob.bounds;
    if old.width() == 0 || old.height() == 0 {
        return blob.clone();
    }

    let remapped: BTreeSet<Cell> = blob
        .cells
        .iter()
        .map(|cell| {
            let fx = (cell.x - old.min_x) as f64 / old.width() as f64;
            let fy = (cell.y - old.min_y) as f64 / old.height() as f64;
            Cell::new(
                new_bounds.min_x + (fx * new_bounds.width() as f64).round() as i64,
                new_bounds.min_y + (fy * new_bounds.height() as f64).round() as i64,
            )
        })
        .collect();

    match blob.clone().with_cells(remapped) {
        Some(resized) => resized,
        None => blob.clone(),
    }
}
