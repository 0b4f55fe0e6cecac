//! Brush-stroke workflows.
//!
//! A stroke arrives as the list of cells the pointer crossed since the last
//! flush. These helpers run the merge decision against an in-memory copy of
//! the blob list and persist each affected blob exactly once at the end,
//! never once per cell.

use std::collections::BTreeSet;

use crate::document::WorldDocument;
use crate::error::PaintError;
use crate::geometry::Cell;
use crate::model::{write_blob, BlobId, PaintKind};
use crate::mutation::{paint_target_index, remove_cells_from_blob, single_cell_blob};
use crate::query::all_blobs;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrokeReport {
    /// Ids persisted by this stroke, stored blobs before newly created ones.
    pub written: Vec<BlobId>,
    /// How many of the written blobs were created by this stroke.
    pub created: usize,
    /// Cells this stroke newly added to some blob. A cell covered only by a
    /// blob of another color or kind still counts: it seeds a new blob on top.
    pub painted_cells: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EraseReport {
    pub updated: Vec<BlobId>,
    pub deleted: Vec<BlobId>,
}

/// Paints every cell of the stroke with the merge rules of
/// [`find_paint_target`](crate::mutation::find_paint_target): cells join a
/// covering or adjacent blob of the same color and kind, otherwise seed a
/// new blob. Later stroke cells see the effect of earlier ones, so a dragged
/// line grows one blob instead of minting one per cell.
pub fn paint_stroke(
    doc: &mut dyn WorldDocument,
    cells: &[Cell],
    color: &str,
    kind: PaintKind,
) -> Result<StrokeReport, PaintError> {
    let mut working = all_blobs(doc);
    let mut dirty: BTreeSet<BlobId> = BTreeSet::new();
    let mut report = StrokeReport::default();

    for &cell in cells {
        match paint_target_index(&working, cell, color, kind) {
            Some(index) => {
                let target = &mut working[index];
                if target.cells.insert(cell) {
                    target.bounds.include(cell);
                    dirty.insert(target.id.clone());
                    report.painted_cells += 1;
                }
            }
            None => {
                let blob = single_cell_blob(cell, color, kind);
                dirty.insert(blob.id.clone());
                report.created += 1;
                report.painted_cells += 1;
                working.push(blob);
            }
        }
    }

    for blob in &working {
        if dirty.contains(&blob.id) {
            write_blob(doc, blob)?;
            report.written.push(blob.id.clone());
        }
    }
    Ok(report)
}

/// Erases the stroke cells from every blob they touch, regardless of color
/// or kind. Blobs left with no cells are deleted from the document; a blob
/// split in two by the erase stays one record.
pub fn erase_stroke(doc: &mut dyn WorldDocument, cells: &[Cell]) -> Result<EraseReport, PaintError> {
    let targets: BTreeSet<Cell> = cells.iter().copied().collect();
    let mut report = EraseReport::default();

    for blob in all_blobs(doc) {
        let hits: Vec<Cell> = targets
            .iter()
            .copied()
            .filter(|cell| blob.contains_cell(*cell))
            .collect();
        if hits.is_empty() {
            continue;
        }

        let document_key = blob.document_key();
        let id = blob.id.clone();
        match remove_cells_from_blob(blob, &hits) {
            Some(updated) => {
                write_blob(doc, &updated)?;
                report.updated.push(id);
            }
            None => {
                doc.delete(&document_key);
                report.deleted.push(id);
            }
        }
    }
    Ok(report)
}
