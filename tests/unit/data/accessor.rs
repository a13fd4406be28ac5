use super::*;

#[derive(Debug)]
struct Shot {
    x: Option<f64>,
    y: f64,
    xg: f64,
}

fn shots() -> Vec<Shot> {
    vec![
        Shot {
            x: Some(10.0),
            y: 5.0,
            xg: 0.3,
        },
        Shot {
            x: None,
            y: 5.0,
            xg: 0.1,
        },
        Shot {
            x: Some(f64::NAN),
            y: 5.0,
            xg: 0.1,
        },
        Shot {
            x: Some(-20.0),
            y: -8.0,
            xg: -1.0,
        },
        Shot {
            x: Some(60.0),
            y: 0.0,
            xg: 0.05,
        },
    ]
}

#[test]
fn closure_accessor_skips_unusable_records() {
    let acc = FnAccessor::new(|s: &Shot, _| s.x, |s: &Shot, _| Some(s.y));
    let pts = extract_points(&shots(), &acc);
    // None and NaN dropped; weight defaults to 1 so the negative xg is irrelevant.
    assert_eq!(pts.len(), 3);
    assert!(pts.iter().all(|p| p.weight == 1.0));
}

#[test]
fn closure_weight_must_be_finite_and_non_negative() {
    let acc = FnAccessor::new(|s: &Shot, _| s.x, |s: &Shot, _| Some(s.y))
        .with_weight(|s: &Shot, _| Some(s.xg));
    let pts = extract_points(&shots(), &acc);
    assert_eq!(pts.len(), 2);
    assert_eq!(pts[0], WeightedPoint::new(10.0, 5.0, 0.3));
    assert_eq!(pts[1], WeightedPoint::new(60.0, 0.0, 0.05));
}

#[test]
fn accessor_sees_record_index() {
    let acc = FnAccessor::new(|_: &Shot, i| Some(i as f64), |_: &Shot, _| Some(0.0));
    let xs: Vec<f64> = extract_points(&shots(), &acc)
        .iter()
        .map(|p| p.pos.x)
        .collect();
    assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn record_accessor_weight_sources() {
    let records = vec![
        Some(PointRecord::Flat {
            x: 1.0,
            y: 2.0,
            weight: Some(3.0),
        }),
        None,
        Some(PointRecord::Flat {
            x: 4.0,
            y: 5.0,
            weight: None,
        }),
    ];

    let unit = extract_record_points(&records, &RecordAccessor::default());
    assert_eq!(unit.len(), 2);
    assert!(unit.iter().all(|p| p.weight == 1.0));

    let weighted = extract_record_points(&records, &RecordAccessor::with_record_weight());
    assert_eq!(weighted[0].weight, 3.0);
    assert_eq!(weighted[1].weight, 1.0);
}
