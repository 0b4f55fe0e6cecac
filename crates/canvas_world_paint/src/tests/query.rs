use super::*;
use serde_json::json;

#[test]
fn point_queries_require_cell_membership() {
    let mut doc = MemoryDocument::new();
    store(&mut doc, &color_blob("#ff0000", &[(0, 0), (2, 0)]));

    assert!(is_painted_cell(&doc, 0, 0));
    assert!(is_painted_cell(&doc, 2, 0));
    // (1, 0) sits inside the bounding box but is not a member cell.
    assert!(!is_painted_cell(&doc, 1, 0));
    assert!(!is_painted_cell(&doc, 0, 1));

    assert_eq!(paint_color_at(&doc, 0, 0).as_deref(), Some("#ff0000"));
    assert_eq!(paint_color_at(&doc, 1, 0), None);
}

#[test]
fn all_blobs_is_ordered_by_id() {
    let mut doc = MemoryDocument::new();
    for id in ["paint-c", "paint-a", "paint-b"] {
        let mut blob = color_blob("#ffffff", &[(0, 0)]);
        blob.id = id.to_string();
        store(&mut doc, &blob);
    }

    let ids: Vec<BlobId> = all_blobs(&doc).into_iter().map(|blob| blob.id).collect();
    assert_eq!(ids, vec!["paint-a", "paint-b", "paint-c"]);
}

#[test]
fn overlap_resolves_to_lowest_id() {
    let mut doc = MemoryDocument::new();
    let mut red = color_blob("#ff0000", &[(5, 5)]);
    red.id = "paint-b".to_string();
    let mut blue = color_blob("#0000ff", &[(5, 5)]);
    blue.id = "paint-a".to_string();
    store(&mut doc, &red);
    store(&mut doc, &blue);

    let found = find_blob_at(&doc, 5, 5).expect("covered cell");
    assert_eq!(found.id, "paint-a");
    assert_eq!(paint_color_at(&doc, 5, 5).as_deref(), Some("#0000ff"));
}

#[test]
fn malformed_records_are_skipped_not_repaired() {
    let mut doc = MemoryDocument::new();
    let blob = color_blob("#ff0000", &[(1, 1)]);
    store(&mut doc, &blob);

    doc.put("paint:broken-json", "{ definitely not json");
    doc.put(
        "paint:wrong-type",
        &json!({
            "type": "text_note",
            "id": "wrong-type",
            "paint_type": "color",
            "color": "#fff",
            "bounds": { "min_x": 0, "max_x": 0, "min_y": 0, "max_y": 0 },
            "cells": ["0,0"],
        })
        .to_string(),
    );
    doc.put(
        "paint:foreign-id",
        &json!({
            "type": "paint_blob",
            "id": "other",
            "paint_type": "color",
            "color": "#fff",
            "bounds": { "min_x": 0, "max_x": 0, "min_y": 0, "max_y": 0 },
            "cells": ["0,0"],
        })
        .to_string(),
    );
    doc.put("note:unrelated", "hello");

    let blobs = all_blobs(&doc);
    assert_eq!(blobs.len(), 1);
    assert_eq!(blobs[0].id, blob.id);

    assert!(is_painted_cell(&doc, 1, 1));
    assert!(!is_painted_cell(&doc, 0, 0));

    // Readers never delete or rewrite entries, even unreadable ones.
    assert_eq!(doc.len(), 5);
    assert!(doc.contains("paint:broken-json"));
}

#[test]
fn is_obstacle_at_rounds_to_nearest_cell() {
    let mut doc = MemoryDocument::new();
    store(&mut doc, &obstacle_blob("#000000", &[(5, 5)]));

    assert!(is_obstacle_at(&doc, 5.0, 5.0));
    assert!(is_obstacle_at(&doc, 5.4, 4.6));
    assert!(!is_obstacle_at(&doc, 5.6, 5.0));
    assert!(!is_obstacle_at(&doc, 5.0, 6.0));
}

#[test]
fn is_obstacle_at_rounds_ties_away_from_zero() {
    let mut doc = MemoryDocument::new();
    store(&mut doc, &obstacle_blob("#000000", &[(-1, -1)]));

    assert!(is_obstacle_at(&doc, -0.5, -0.5));
    assert!(!is_obstacle_at(&doc, -0.4, -0.4));
}

#[test]
fn color_blobs_never_block_movement() {
    let mut doc = MemoryDocument::new();
    store(&mut doc, &color_blob("#000000", &[(5, 5)]));

    assert!(is_painted_cell(&doc, 5, 5));
    assert!(!is_obstacle_at(&doc, 5.0, 5.0));

    let index = ObstacleIndex::new(&doc);
    assert!(!index.is_obstacle_at(5.0, 5.0));
}

#[test]
fn obstacle_index_matches_query_results() {
    let mut doc = MemoryDocument::new();
    store(&mut doc, &obstacle_blob("#000000", &[(2, 2)]));

    let index = ObstacleIndex::new(&doc);
    assert!(index.is_obstacle_at(2.0, 2.0));
    assert!(index.is_obstacle_at(1.7, 2.3));
    assert!(!index.is_obstacle_at(3.0, 2.0));
}

#[test]
fn find_connected_region_returns_the_whole_blob() {
    let mut doc = MemoryDocument::new();
    let blob = color_blob("#ff00ff", &[(0, 0), (1, 0), (2, 0)]);
    store(&mut doc, &blob);

    let region = find_connected_region(&doc, 1, 0).expect("painted cell");
    assert_eq!(region.blob_id, blob.id);
    assert_eq!(region.color, "#ff00ff");
    assert_eq!(region.bounds, bounds(0, 2, 0, 0));
    assert_eq!(region.points, cells(&[(0, 0), (1, 0), (2, 0)]));

    assert_eq!(find_connected_region(&doc, 5, 5), None);
}
