use super::*;
use proptest::prelude::*;

fn params(width: f64, height: f64, scale: f64, resolution: f64, bandwidth: f64) -> DensityParams {
    DensityParams {
        bandwidth,
        grid_resolution: resolution,
        scale,
        width,
        height,
        kernel_cutoff_sigmas: Some(3.0),
        parallel: false,
    }
}

#[test]
fn grid_dims_round_up_partial_cells() {
    let p = params(205.0, 95.0, 10.0, 1.0, 2.0);
    assert_eq!(p.cell_size(), 10.0);
    assert_eq!(p.grid_dims(), (21, 10));
    let g = DensityGrid::build(&[], &p).unwrap();
    assert_eq!((g.width(), g.height()), (21, 10));
    assert_eq!(g.row(3).len(), 21);
}

#[test]
fn narrow_kernel_on_a_large_canvas_builds_a_small_grid() {
    // 0.1 px sigma over a 20000x8500 px canvas of 200 px cells.
    let p = params(20000.0, 8500.0, 100.0, 0.5, 0.003);
    assert_eq!(p.grid_dims(), (100, 43));
    let g = DensityGrid::build(&[WeightedPoint::new(100.0, 100.0, 1.0)], &p).unwrap();
    assert_eq!((g.width(), g.height()), (100, 43));
    assert_eq!(g.value(0, 0), Some(1.0));
    assert_eq!(g.max_value(), 1.0);
    assert_eq!(g.values().iter().filter(|v| **v > 0.0).count(), 1);
}

#[test]
fn empty_input_gives_all_zero_grid() {
    for (res, bw) in [(1.0, 2.0), (2.0, 5.0), (0.5, 0.1)] {
        let g = DensityGrid::build(&[], &params(200.0, 100.0, 4.0, res, bw)).unwrap();
        assert!(g.values().iter().all(|v| *v == 0.0));
        assert_eq!(g.min_value(), 0.0);
        assert_eq!(g.max_value(), 0.0);
        assert!(g.is_degenerate());
    }
}

#[test]
fn coincident_points_double_the_peak() {
    // 20x20 grid of 10px cells.
    let pts = [
        WeightedPoint::at(10.0, 10.0),
        WeightedPoint::at(10.0, 10.0),
        WeightedPoint::at(100.0, 100.0),
    ];
    for cutoff in [Some(3.0), None] {
        let p = DensityParams {
            kernel_cutoff_sigmas: cutoff,
            ..params(200.0, 200.0, 10.0, 1.0, 2.0)
        };
        let g = DensityGrid::build(&pts, &p).unwrap();
        assert_eq!((g.width(), g.height()), (20, 20));

        let near = g.value(1, 1).unwrap();
        let far = g.value(10, 10).unwrap();
        assert!(far > 0.0);
        assert!((near / far - 2.0).abs() < 1e-9, "ratio {}", near / far);
        assert!((g.max_value() - near).abs() <= near * 1e-12);
        assert!(g.min_value() > 0.0 && g.min_value() <= far);
    }
}

#[test]
fn density_strictly_decays_inside_kernel_support() {
    // 1px cells; sigma = 10px, support = 30px.
    let p = params(100.0, 100.0, 10.0, 10.0, 3.0);
    let g = DensityGrid::build(&[WeightedPoint::at(20.5, 50.5)], &p).unwrap();
    let row = g.row(50);
    for gx in 20..50 {
        assert!(row[gx] > row[gx + 1], "gx={gx}");
    }
    for gx in 50..99 {
        assert!(row[gx] >= row[gx + 1]);
    }

    let unbounded = DensityParams {
        kernel_cutoff_sigmas: None,
        ..p
    };
    let g = DensityGrid::build(&[WeightedPoint::at(20.5, 50.5)], &unbounded).unwrap();
    let row = g.row(50);
    for gx in 20..99 {
        assert!(row[gx] > row[gx + 1], "gx={gx}");
    }
}

#[test]
fn doubling_weight_doubles_every_cell() {
    let p = params(120.0, 80.0, 4.0, 1.0, 6.0);
    let one = DensityGrid::build(&[WeightedPoint::new(33.0, 41.0, 1.0)], &p).unwrap();
    let two = DensityGrid::build(&[WeightedPoint::new(33.0, 41.0, 2.0)], &p).unwrap();
    for (a, b) in one.values().iter().zip(two.values()) {
        assert_eq!(*b, 2.0 * *a);
    }
    assert_eq!(two.max_value(), 2.0 * one.max_value());
}

#[test]
fn truncation_matches_dense_evaluation_inside_support() {
    let pts: Vec<WeightedPoint> = (0..40)
        .map(|i| {
            let f = i as f64;
            WeightedPoint::new((f * 37.0) % 300.0, (f * 53.0) % 120.0, 1.0 + (i % 3) as f64)
        })
        .collect();
    let truncated = params(300.0, 120.0, 3.0, 1.0, 5.0);
    let dense = DensityParams {
        kernel_cutoff_sigmas: None,
        ..truncated
    };
    let a = DensityGrid::build(&pts, &truncated).unwrap();
    let b = DensityGrid::build(&pts, &dense).unwrap();
    // Beyond 3 sigma a point contributes at most exp(-4.5) of its weight.
    for (x, y) in a.values().iter().zip(b.values()) {
        assert!(*x <= *y + 1e-12);
        assert!(*y - *x <= 3.0 * 40.0 * (-4.5f64).exp());
    }
}

#[test]
fn parallel_rows_match_sequential_bit_for_bit() {
    let pts: Vec<WeightedPoint> = (0..200)
        .map(|i| {
            let f = i as f64;
            WeightedPoint::new((f * 13.7) % 400.0, (f * 7.3) % 170.0, 0.5 + (i % 5) as f64)
        })
        .collect();
    for cutoff in [Some(3.0), None] {
        let seq = DensityParams {
            kernel_cutoff_sigmas: cutoff,
            ..params(400.0, 170.0, 2.0, 1.0, 8.0)
        };
        let par = DensityParams {
            parallel: true,
            ..seq
        };
        assert_eq!(
            DensityGrid::build(&pts, &seq).unwrap(),
            DensityGrid::build(&pts, &par).unwrap()
        );
    }
}

#[test]
fn points_off_canvas_still_bleed_in() {
    let p = params(100.0, 100.0, 10.0, 1.0, 3.0);
    let g = DensityGrid::build(&[WeightedPoint::at(-5.0, 50.0)], &p).unwrap();
    assert!(g.value(0, 5).unwrap() > 0.0);

    let g = DensityGrid::build(&[WeightedPoint::at(-500.0, 50.0)], &p).unwrap();
    assert!(g.is_degenerate());
}

#[test]
fn invalid_params_are_config_errors() {
    let base = params(100.0, 100.0, 10.0, 1.0, 3.0);
    for bad in [
        DensityParams {
            bandwidth: 0.0,
            ..base
        },
        DensityParams {
            grid_resolution: -1.0,
            ..base
        },
        DensityParams {
            kernel_cutoff_sigmas: Some(0.0),
            ..base
        },
        DensityParams {
            grid_resolution: 1e6,
            ..base
        },
    ] {
        assert!(matches!(
            DensityGrid::build(&[], &bad),
            Err(HeatmapError::Config(_))
        ));
    }
}

#[test]
fn cell_lookup_and_geometry() {
    let g = DensityGrid::from_values(3, 2, 10.0, 5.0, vec![0.0, 1.0, 2.0, 3.0, 4.0, 0.5])
        .unwrap();
    assert_eq!(g.min_value(), 0.5);
    assert_eq!(g.max_value(), 4.0);
    assert_eq!(g.cell_at(Point::new(25.0, 7.0)), Some((2, 1)));
    assert_eq!(g.cell_at(Point::new(30.0, 7.0)), None);
    assert_eq!(g.cell_at(Point::new(-0.1, 1.0)), None);
    assert_eq!(g.cell_rect(1, 1), Rect::new(10.0, 5.0, 20.0, 10.0));
    assert_eq!((g.cell_width(), g.cell_height()), (10.0, 5.0));
    assert_eq!(g.cell_center(1, 1), Point::new(15.0, 7.5));
    assert_eq!(g.cells().nth(4), Some((1, 1, 4.0)));
    assert!(DensityGrid::from_values(2, 2, 1.0, 1.0, vec![0.0; 3]).is_err());
    assert!(DensityGrid::from_values(1, 1, 1.0, 1.0, vec![-1.0]).is_err());
}

proptest! {
    #[test]
    fn cells_are_never_negative(
        pts in prop::collection::vec((-50.0f64..250.0, -50.0f64..150.0, 0.0f64..10.0), 0..30),
        bandwidth in 0.2f64..10.0,
        cutoff in prop::option::of(1.0f64..4.0),
    ) {
        let pts: Vec<WeightedPoint> =
            pts.into_iter().map(|(x, y, w)| WeightedPoint::new(x, y, w)).collect();
        let p = DensityParams {
            kernel_cutoff_sigmas: cutoff,
            ..params(200.0, 100.0, 5.0, 1.0, bandwidth)
        };
        let g = DensityGrid::build(&pts, &p).unwrap();
        prop_assert!(g.values().iter().all(|v| *v >= 0.0));
        prop_assert!(g.max_value() >= g.min_value());
        prop_assert!(g.min_value() >= 0.0);
    }
}
