//! Seeded generation of pattern obstacle layouts.
//!
//! A pattern is a set of rooms connected by corridors. The walkable interior
//! is computed deterministically from the room list and a seed, then the
//! obstacle blob is the one-cell halo around that interior. Every client
//! re-runs the same generation and lands on the same wall cells, so the
//! blob in the document is only a cache of the layout.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::document::WorldDocument;
use crate::error::PaintError;
use crate::geometry::{manhattan_distance, Cell, ALL_NEIGHBOR_OFFSETS};
use crate::model::{write_blob, Blob, BlobId, PaintKind};
use crate::mutation::create_paint_blob;
use crate::query::all_blobs;

const CORRIDOR_HALF_WIDTH: i64 = 1;

/// Room placement in cell coordinates. `width` and `height` count cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl RoomRect {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Clamps negative spans to zero. A zero-sized room fills no cells but
    /// still anchors corridors at its origin.
    pub fn sanitized(mut self) -> Self {
        if self.width < 0 {
            self.width = 0;
        }
        if self.height < 0 {
            self.height = 0;
        }
        self
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.x + self.width / 2, self.y + self.height / 2)
    }
}

/// Deterministic roll in `[0, 1)` for stream index `n` under `seed`.
pub fn pattern_rand(seed: u64, n: u64) -> f64 {
    let mut x = seed ^ 0x9E37_79B9_7F4A_7C15;
    x ^= n.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = splitmix64(x);
    ((x >> 11) as f64) / (1u64 << 53) as f64
}

/// Wall cells for the pattern: the 8-neighbor halo around the walkable
/// interior. Pure function of the inputs.
pub fn generate_pattern_border(rooms: &[RoomRect], seed: u64) -> BTreeSet<Cell> {
    let filled = filled_pattern_cells(rooms, seed);
    border_halo(&filled)
}

fn filled_pattern_cells(rooms: &[RoomRect], seed: u64) -> BTreeSet<Cell> {
    let rooms: Vec<RoomRect> = rooms.iter().map(|room| room.sanitized()).collect();

    let mut filled = BTreeSet::new();
    for room in &rooms {
        for dy in 0..room.height {
            for dx in 0..room.width {
                filled.insert(Cell::new(room.x + dx, room.y + dy));
            }
        }
    }

    let centers: Vec<Cell> = rooms.iter().map(RoomRect::center).collect();
    carve_spanning_corridors(&mut filled, &centers, seed);
    carve_extra_corridors(&mut filled, &centers, seed);
    filled
}

/// Connects every room center with corridors along a minimum spanning tree:
/// starting from room 0, repeatedly attach the unconnected center nearest
/// (Manhattan) to the connected set. Distance ties resolve to the lowest
/// index pair.
fn carve_spanning_corridors(filled: &mut BTreeSet<Cell>, centers: &[Cell], seed: u64) {
    if centers.len() < 2 {
        return;
    }

    let mut connected = vec![false; centers.len()];
    connected[0] = true;
    for _ in 1..centers.len() {
        let mut best: Option<(i64, usize, usize)> = None;
        for from in 0..centers.len() {
            if !connected[from] {
                continue;
            }
            for to in 0..centers.len() {
                if connected[to] {
                    continue;
                }
                let distance = manhattan_distance(centers[from], centers[to]);
                if best.map_or(true, |(best_distance, _, _)| distance < best_distance) {
                    best = Some((distance, from, to));
                }
            }
        }
        let Some((_, from, to)) = best else {
            break;
        };
        carve_corridor(filled, centers, from, to, seed);
        connected[to] = true;
    }
}

/// With more than two rooms the layout gains one or two shortcut corridors
/// so it is not a pure tree. Rolls drawn from fixed stream indices keep this
/// deterministic; a roll that picks the same room twice is skipped.
fn carve_extra_corridors(filled: &mut BTreeSet<Cell>, centers: &[Cell], seed: u64) {
    if centers.len() <= 2 {
        return;
    }

    let count = 1 + (pattern_rand(seed, 200) * 2.0).floor() as usize;
    for i in 0..count {
        let a = (pattern_rand(seed, 300 + i as u64) * centers.len() as f64).floor() as usize;
        let b = (pattern_rand(seed, 400 + i as u64) * centers.len() as f64).floor() as usize;
        if a == b {
            continue;
        }
        carve_corridor(filled, centers, a, b, seed);
    }
}

/// L-shaped corridor three cells wide between two centers. The orientation
/// roll decides whether the horizontal or the vertical leg comes first.
fn carve_corridor(filled: &mut BTreeSet<Cell>, centers: &[Cell], from: usize, to: usize, seed: u64) {
    let horizontal_first = pattern_rand(seed, (from * 7 + to) as u64) < 0.5;
    let a = centers[from];
    let b = centers[to];
    if horizontal_first {
        carve_horizontal_run(filled, a.x, b.x, a.y);
        carve_vertical_run(filled, a.y, b.y, b.x);
    } else {
        carve_vertical_run(filled, a.y, b.y, a.x);
        carve_horizontal_run(filled, a.x, b.x, b.y);
    }
}

fn carve_horizontal_run(filled: &mut BTreeSet<Cell>, x0: i64, x1: i64, y: i64) {
    let (lo, hi) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
    for x in lo..=hi {
        for dy in -CORRIDOR_HALF_WIDTH..=CORRIDOR_HALF_WIDTH {
            filled.insert(Cell::new(x, y + dy));
        }
    }
}

fn carve_vertical_run(filled: &mut BTreeSet<Cell>, y0: i64, y1: i64, x: i64) {
    let (lo, hi) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
    for y in lo..=hi {
        for dx in -CORRIDOR_HALF_WIDTH..=CORRIDOR_HALF_WIDTH {
            filled.insert(Cell::new(x + dx, y));
        }
    }
}

fn border_halo(filled: &BTreeSet<Cell>) -> BTreeSet<Cell> {
    let mut border = BTreeSet::new();
    for cell in filled {
        for (dx, dy) in ALL_NEIGHBOR_OFFSETS {
            let neighbor = cell.offset(dx, dy);
            if !filled.contains(&neighbor) {
                border.insert(neighbor);
            }
        }
    }
    border
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

/// Result of reconciling a pattern's obstacle blob with its current layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncPatternOutcome {
    Created(Blob),
    Updated(Blob),
    Removed(BlobId),
    Unchanged,
}

/// Regenerates the border for `pattern_key` and reconciles the document:
/// create the obstacle blob when the pattern first gains walls, rewrite its
/// cells and bounds in place when the layout moved, delete it when the
/// pattern emptied, and touch nothing when the walls are already current.
pub fn sync_pattern_obstacle(
    doc: &mut dyn WorldDocument,
    pattern_key: &str,
    rooms: &[RoomRect],
    seed: u64,
    color: &str,
) -> Result<SyncPatternOutcome, PaintError> {
    let border = generate_pattern_border(rooms, seed);
    let existing = all_blobs(doc)
        .into_iter()
        .find(|blob| blob.pattern_key.as_deref() == Some(pattern_key));

    match existing {
        None => {
            if border.is_empty() {
                return Ok(SyncPatternOutcome::Unchanged);
            }
            let cells: Vec<Cell> = border.into_iter().collect();
            let blob = create_paint_blob(
                color,
                &cells,
                PaintKind::Obstacle,
                Some(pattern_key.to_string()),
            )?;
            write_blob(doc, &blob)?;
            Ok(SyncPatternOutcome::Created(blob))
        }
        Some(blob) => {
            if blob.cells == border && blob.color == color {
                return Ok(SyncPatternOutcome::Unchanged);
            }
            let document_key = blob.document_key();
            let id = blob.id.clone();
            match blob.with_cells(border) {
                Some(mut updated) => {
                    updated.color = color.to_string();
                    write_blob(doc, &updated)?;
                    Ok(SyncPatternOutcome::Updated(updated))
                }
                None => {
                    doc.delete(&document_key);
                    Ok(SyncPatternOutcome::Removed(id))
                }
            }
        }
    }
}
