//! Tests for the paint layer.

use super::*;
use std::collections::BTreeSet;

fn cell(x: i64, y: i64) -> Cell {
    Cell::new(x, y)
}

fn cells(points: &[(i64, i64)]) -> Vec<Cell> {
    points.iter().map(|&(x, y)| Cell::new(x, y)).collect()
}

fn cell_set(points: &[(i64, i64)]) -> BTreeSet<Cell> {
    points.iter().map(|&(x, y)| Cell::new(x, y)).collect()
}

fn bounds(min_x: i64, max_x: i64, min_y: i64, max_y: i64) -> Bounds {
    Bounds {
        min_x,
        max_x,
        min_y,
        max_y,
    }
}

fn color_blob(color: &str, points: &[(i64, i64)]) -> Blob {
    create_paint_blob(color, &cells(points), PaintKind::Color, None).expect("color blob")
}

fn obstacle_blob(color: &str, points: &[(i64, i64)]) -> Blob {
    create_paint_blob(color, &cells(points), PaintKind::Obstacle, None).expect("obstacle blob")
}

fn store(doc: &mut MemoryDocument, blob: &Blob) {
    write_blob(doc, blob).expect("write blob");
}

mod query;
