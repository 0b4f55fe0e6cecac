pub mod document;
pub mod error;
pub mod geometry;
pub mod model;
pub mod mutation;
pub mod obstacle;
pub mod pattern;
pub mod query;
pub mod stroke;

#[cfg(test)]
mod tests;

pub use document::{MemoryDocument, WorldDocument};
pub use error::{PaintError, RecordError};
pub use geometry::{
    decode_cell_key, encode_cell_key, manhattan_distance, Bounds, Cell, ALL_NEIGHBOR_OFFSETS,
    CARDINAL_NEIGHBOR_OFFSETS,
};
pub use model::{
    blob_key, decode_blob, mint_blob_id, write_blob, Blob, BlobId, BlobRecord, PaintKind,
    BLOB_KEY_PREFIX, BLOB_RECORD_TYPE,
};

// Pure mutations; callers persist the returned values
pub use mutation::{
    add_cells_to_blob, create_paint_blob, find_paint_target, remove_cells_from_blob,
    resize_paint_blob, PaintTarget,
};

// Read side
pub use obstacle::ObstacleIndex;
pub use query::{
    all_blobs, find_blob_at, find_connected_region, is_obstacle_at, is_painted_cell,
    paint_color_at, PaintRegion,
};

// Input-layer workflows
pub use pattern::{
    generate_pattern_border, pattern_rand, sync_pattern_obstacle, RoomRect, SyncPatternOutcome,
};
pub use stroke::{erase_stroke, paint_stroke, EraseReport, StrokeReport};
