//! Obstacle lookups for movement and pathfinding code.

use crate::document::WorldDocument;
use crate::query;

/// Borrowed view over a document that answers obstacle tests. Pathfinding
/// holds one of these for the duration of a search instead of threading the
/// document through every probe.
pub struct ObstacleIndex<'a> {
    doc: &'a dyn WorldDocument,
}

impl<'a> ObstacleIndex<'a> {
    pub fn new(doc: &'a dyn WorldDocument) -> Self {
        Self { doc }
    }

    /// True when the nearest cell to `(x, y)` is covered by an obstacle
    /// blob. Color blobs never block movement.
    pub fn is_obstacle_at(&self, x: f64, y: f64) -> bool {
        query::is_obstacle_at(self.doc, x, y)
    }
}
