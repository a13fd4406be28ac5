use super::*;
use serde_json::json;

#[test]
fn details_layout_wins_over_flat_fields() {
    let r: PointRecord = serde_json::from_value(json!({
        "details": { "xCoord": 12.0, "yCoord": -3.0 },
        "xCoord": 99.0,
        "yCoord": 99.0
    }))
    .unwrap();
    assert!(matches!(r, PointRecord::Details { .. }));
    assert_eq!(r.xy(), (12.0, -3.0));
}

#[test]
fn falls_through_to_flat_then_coordinates() {
    let r: PointRecord = serde_json::from_value(json!({
        "details": { "shotType": "wrist" },
        "x_coord": 4.5,
        "y_coord": 1.5
    }))
    .unwrap();
    assert!(matches!(r, PointRecord::Flat { .. }));
    assert_eq!(r.xy(), (4.5, 1.5));

    let r: PointRecord = serde_json::from_value(json!({
        "coordinates": { "x": -80.0, "y": 20.0 },
        "weight": 2.5
    }))
    .unwrap();
    assert!(matches!(r, PointRecord::Coordinates { .. }));
    assert_eq!(r.xy(), (-80.0, 20.0));
    assert_eq!(r.weight(), Some(2.5));
}

#[test]
fn parse_records_keeps_unknown_slots_as_gaps() {
    let json = r#"[
        { "x": 1, "y": 2 },
        { "name": "faceoff" },
        { "details": { "xCoord": null, "yCoord": 3 } },
        { "coordinates": { "x": 5, "y": 6 } }
    ]"#;
    let records = parse_records(json).unwrap();
    assert_eq!(records.len(), 4);
    assert!(records[0].is_some());
    assert!(records[1].is_none());
    assert!(records[2].is_none());
    assert_eq!(records[3].map(|r| r.xy()), Some((5.0, 6.0)));
}

#[test]
fn parse_records_rejects_non_array_documents() {
    assert!(parse_records(r#"{ "x": 1 }"#).is_err());
    assert!(parse_records("not json").is_err());
}

#[test]
fn non_numeric_weight_keeps_the_record() {
    let slots = parse_records(
        r#"[
            {"x": 10, "y": 5, "weight": "high"},
            {"x": 1, "y": 2, "weight": null},
            {"details": {"xCoord": 3, "yCoord": 4}, "weight": [1]},
            {"coordinates": {"x": 7, "y": 8}, "weight": 0.5}
        ]"#,
    )
    .unwrap();
    let records: Vec<PointRecord> = slots.into_iter().map(Option::unwrap).collect();
    assert_eq!(records[0].xy(), (10.0, 5.0));
    assert_eq!(records[0].weight(), None);
    assert_eq!(records[1].weight(), None);
    assert!(matches!(records[2], PointRecord::Details { weight: None, .. }));
    assert_eq!(records[3].weight(), Some(0.5));
}
