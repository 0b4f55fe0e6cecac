//! Paint blob model and its stored-record codec.
//!
//! Every blob lives in the shared document as one JSON entry under a
//! `paint:`-prefixed key. Decoding validates the record shape and rebuilds
//! the runtime value; anything that fails validation is reported as a
//! [`RecordError`] so readers can skip the entry.

use std::collections::BTreeSet;
use std::time::{SystemTime, UNIX_EPOCH};

use rand_core::{OsRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::document::WorldDocument;
use crate::error::{PaintError, RecordError};
use crate::geometry::{decode_cell_key, encode_cell_key, Bounds, Cell};

pub type BlobId = String;

pub const BLOB_KEY_PREFIX: &str = "paint:";
pub const BLOB_RECORD_TYPE: &str = "paint_blob";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaintKind {
    Color,
    Obstacle,
}

/// A contiguous painted region: one color, one kind, an explicit cell set,
/// and the bounding box of that set.
///
/// Invariants: `cells` is never empty and `bounds` is exactly the fold of
/// min/max over `cells`. Constructors and mutation helpers maintain both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub id: BlobId,
    pub kind: PaintKind,
    pub color: String,
    pub pattern_key: Option<String>,
    pub bounds: Bounds,
    pub cells: BTreeSet<Cell>,
}

impl Blob {
    pub fn document_key(&self) -> String {
        blob_key(&self.id)
    }

    /// Membership test with the bounding-box rejection first.
    pub fn contains_cell(&self, cell: Cell) -> bool {
        self.bounds.contains(cell) && self.cells.contains(&cell)
    }

    /// Replaces the cell set and recomputes bounds. Returns `None` when the
    /// new set is empty, which callers must treat as blob deletion.
    pub fn with_cells(mut self, cells: BTreeSet<Cell>) -> Option<Blob> {
        let bounds = Bounds::from_cells(cells.iter().copied())?;
        self.cells = cells;
        self.bounds = bounds;
        Some(self)
    }

    pub fn to_record(&self) -> BlobRecord {
        BlobRecord {
            record_type: BLOB_RECORD_TYPE.to_string(),
            id: self.id.clone(),
            paint_type: self.kind,
            color: self.color.clone(),
            pattern_key: self.pattern_key.clone(),
            bounds: self.bounds,
            cells: self.cells.iter().map(|cell| encode_cell_key(*cell)).collect(),
        }
    }
}

/// Stored JSON shape of a paint blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobRecord {
    #[serde(rename = "type")]
    pub record_type: String,
    pub id: String,
    pub paint_type: PaintKind,
    pub color: String,
    #[serde(default)]
    pub pattern_key: Option<String>,
    pub bounds: Bounds,
    pub cells: Vec<String>,
}

impl BlobRecord {
    pub fn into_blob(self) -> Result<Blob, RecordError> {
        if self.record_type != BLOB_RECORD_TYPE {
            return Err(RecordError::WrongType {
                found: self.record_type,
            });
        }
        if self.cells.is_empty() {
            return Err(RecordError::EmptyCells);
        }

        let mut cells = BTreeSet::new();
        for encoded in &self.cells {
            let cell = decode_cell_key(encoded)
                .map_err(|message| RecordError::BadCellKey { message })?;
            cells.insert(cell);
        }

        let computed = Bounds::from_cells(cells.iter().copied()).ok_or(RecordError::EmptyCells)?;
        if computed != self.bounds {
            return Err(RecordError::BoundsMismatch {
                stored: self.bounds,
                computed,
            });
        }

        Ok(Blob {
            id: self.id,
            kind: self.paint_type,
            color: self.color,
            pattern_key: self.pattern_key,
            bounds: self.bounds,
            cells,
        })
    }
}

pub fn blob_key(id: &str) -> String {
    format!("{BLOB_KEY_PREFIX}{id}")
}

/// Mints a fresh blob id from wall-clock millis plus random bits. Ids only
/// need to be unique within one document, not globally.
pub fn mint_blob_id() -> BlobId {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or(0);
    let entropy = OsRng.next_u64() & 0xffff_ffff_ffff;
    format!("paint-{millis}-{entropy:012x}")
}

/// Decodes the stored record under `key`, validating that the record's id
/// actually belongs there.
pub fn decode_blob(key: &str, value: &str) -> Result<Blob, RecordError> {
    let record: BlobRecord = serde_json::from_str(value)?;
    let blob = record.into_blob()?;
    let expected = blob.document_key();
    if expected != key {
        return Err(RecordError::KeyMismatch {
            expected,
            found: key.to_string(),
        });
    }
    Ok(blob)
}

/// Serializes `blob` and writes it under its document key.
pub fn write_blob(doc: &mut dyn WorldDocument, blob: &Blob) -> Result<(), PaintError> {
    let value = serde_json::to_string(&blob.to_record())?;
    doc.put(&blob.document_key(), &value);
    Ok(())
}
