use serde::{Deserialize, Serialize};

/// Offsets probed when looking for a merge candidate: up, down, left, right.
/// The order is part of the paint semantics and must not change.
pub const CARDINAL_NEIGHBOR_OFFSETS: [(i64, i64); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// All eight surrounding offsets, used when tracing a border halo.
pub const ALL_NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

impl Cell {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i64, dy: i64) -> Cell {
        Cell {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

pub fn encode_cell_key(cell: Cell) -> String {
    format!("{},{}", cell.x, cell.y)
}

pub fn decode_cell_key(encoded: &str) -> Result<Cell, String> {
    let mut parts = encoded.split(',');
    let x = parts
        .next()
        .ok_or_else(|| format!("invalid cell key: {encoded}"))?
        .parse::<i64>()
        .map_err(|_| format!("invalid cell x: {encoded}"))?;
    let y = parts
        .next()
        .ok_or_else(|| format!("invalid cell key: {encoded}"))?
        .parse::<i64>()
        .map_err(|_| format!("invalid cell y: {encoded}"))?;
    if parts.next().is_some() {
        return Err(format!("invalid cell key: {encoded}"));
    }
    Ok(Cell { x, y })
}

/// Inclusive axis-aligned bounding box over grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
}

impl Bounds {
    pub fn of_cell(cell: Cell) -> Self {
        Self {
            min_x: cell.x,
            max_x: cell.x,
            min_y: cell.y,
            max_y: cell.y,
        }
    }

    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Option<Bounds> {
        let mut cells = cells.into_iter();
        let mut bounds = Bounds::of_cell(cells.next()?);
        for cell in cells {
            bounds.include(cell);
        }
        Some(bounds)
    }

    pub fn include(&mut self, cell: Cell) {
        self.min_x = self.min_x.min(cell.x);
        self.max_x = self.max_x.max(cell.x);
        self.min_y = self.min_y.min(cell.y);
        self.max_y = self.max_y.max(cell.y);
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.min_x && cell.x <= self.max_x && cell.y >= self.min_y && cell.y <= self.max_y
    }

    /// Horizontal span, `max_x - min_x`. Zero for a single column.
    pub fn width(&self) -> i64 {
        self.max_x - self.min_x
    }

    /// Vertical span, `max_y - min_y`. Zero for a single row.
    pub fn height(&self) -> i64 {
        self.max_y - self.min_y
    }
}

pub fn manhattan_distance(a: Cell, b: Cell) -> i64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_key_round_trips_negative_coordinates() {
        let cell = Cell::new(-12, 7);
        let encoded = encode_cell_key(cell);
        assert_eq!(encoded, "-12,7");
        assert_eq!(decode_cell_key(&encoded), Ok(cell));
    }

    #[test]
    fn decode_cell_key_rejects_malformed_input() {
        assert!(decode_cell_key("").is_err());
        assert!(decode_cell_key("5").is_err());
        assert!(decode_cell_key("a,b").is_err());
        assert!(decode_cell_key("1,2,3").is_err());
        assert!(decode_cell_key("1, 2").is_err());
    }

    #[test]
    fn bounds_from_cells_folds_min_and_max() {
        let cells = [Cell::new(3, -2), Cell::new(-1, 4), Cell::new(0, 0)];
        let bounds = Bounds::from_cells(cells).expect("bounds");
        assert_eq!(
            bounds,
            Bounds {
                min_x: -1,
                max_x: 3,
                min_y: -2,
                max_y: 4,
            }
        );
        assert!(bounds.contains(Cell::new(0, 0)));
        assert!(!bounds.contains(Cell::new(4, 0)));
    }

    #[test]
    fn bounds_from_cells_is_none_for_empty_input() {
        assert_eq!(Bounds::from_cells(std::iter::empty()), None);
    }

    #[test]
    fn manhattan_distance_sums_axis_deltas() {
        assert_eq!(manhattan_distance(Cell::new(0, 0), Cell::new(3, 4)), 7);
        assert_eq!(manhattan_distance(Cell::new(-2, 5), Cell::new(1, -1)), 9);
    }
}
