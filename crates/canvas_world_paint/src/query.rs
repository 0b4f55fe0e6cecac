//! Read-side queries over the paint layer.
//!
//! Every query rescans the `paint:` keyspace of the document, so results
//! always reflect the latest synced state. Malformed entries are logged and
//! skipped; a corrupt record never breaks rendering or input handling.

use serde::{Deserialize, Serialize};

use crate::document::WorldDocument;
use crate::geometry::{Bounds, Cell};
use crate::model::{decode_blob, Blob, BlobId, PaintKind, BLOB_KEY_PREFIX};

/// Painted area returned by [`find_connected_region`]: the full membership
/// of one blob. Erase never splits a record, so the cells need not be
/// geometrically connected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintRegion {
    pub blob_id: BlobId,
    pub color: String,
    pub bounds: Bounds,
    pub points: Vec<Cell>,
}

/// Decodes every well-formed paint blob, ordered by blob id.
pub fn all_blobs(doc: &dyn WorldDocument) -> Vec<Blob> {
    let mut keys = doc.keys_with_prefix(BLOB_KEY_PREFIX);
    keys.sort();

    let mut blobs = Vec::new();
    for key in keys {
        let Some(value) = doc.get(&key) else {
            continue;
        };
        match decode_blob(&key, &value) {
            Ok(blob) => blobs.push(blob),
            Err(error) => log::warn!("skipping malformed paint record {key}: {error}"),
        }
    }
    blobs
}

pub fn is_painted_cell(doc: &dyn WorldDocument, x: i64, y: i64) -> bool {
    find_blob_at(doc, x, y).is_some()
}

/// Color of the topmost blob covering the cell, in blob id order.
pub fn paint_color_at(doc: &dyn WorldDocument, x: i64, y: i64) -> Option<String> {
    find_blob_at(doc, x, y).map(|blob| blob.color)
}

pub fn find_blob_at(doc: &dyn WorldDocument, x: i64, y: i64) -> Option<Blob> {
    let cell = Cell::new(x, y);
    all_blobs(doc).into_iter().find(|blob| blob.contains_cell(cell))
}

/// Obstacle test for movement code. Fractional world positions snap to the
/// nearest cell center before the lookup.
pub fn is_obstacle_at(doc: &dyn WorldDocument, x: f64, y: f64) -> bool {
    let cell = Cell::new(x.round() as i64, y.round() as i64);
    all_blobs(doc)
        .into_iter()
        .any(|blob| blob.kind == PaintKind::Obstacle && blob.contains_cell(cell))
}

pub fn find_connected_region(doc: &dyn WorldDocument, x: i64, y: i64) -> Option<PaintRegion> {
    let blob = find_blob_at(doc, x, y)?;
    Some(PaintRegion {
        points: blob.cells.iter().copied().collect(),
        bounds: blob.bounds,
        color: blob.color,
        blob_id: blob.id,
    })
}
