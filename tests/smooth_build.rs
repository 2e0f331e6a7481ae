use yama::{FnGround, GroundSource, HeightBounds, SmoothHeightMesh, SmoothMeshInfo};

fn rolling(x: f32, y: f32) -> f32 {
    ((x * 0.05).sin() * 10.0 + (y * 0.037).cos() * 6.0).floor()
}

fn rolling_ground() -> FnGround<fn(f32, f32) -> f32> {
    FnGround::new(HeightBounds::new(-16.0, 16.0), rolling)
}

fn naive_windowed_max(
    x: i32,
    y: i32,
    mesh: &SmoothHeightMesh,
    ground: &dyn GroundSource,
) -> f32 {
    let (maxx, maxy, win, res) = (
        mesh.max_x(),
        mesh.max_y(),
        mesh.win_size(),
        mesh.resolution(),
    );
    let mut best = f32::MIN;

    for y1 in (y - win).max(0)..=(y + win).min(maxy) {
        for x1 in (x - win).max(0)..=(x + win).min(maxx - 1) {
            best = best.max(ground.height(x1 as f32 * res, y1 as f32 * res));
        }
    }

    best
}

#[test]
fn windowed_maximum_matches_naive_reference() {
    let ground = rolling_ground();
    let info = SmoothMeshInfo {
        map_width: 64.0,
        map_height: 64.0,
        resolution: 8.0,
        smooth_radius: 24.0,
        blur_passes: 0,
        ..Default::default()
    };

    let mesh = SmoothHeightMesh::new(&info, &ground).unwrap();
    assert_eq!(mesh.max_x(), 9);
    assert_eq!(mesh.win_size(), 3);

    for y in 0..=mesh.max_y() {
        for x in 0..mesh.max_x() {
            let expected = naive_windowed_max(x, y, &mesh, &ground);
            assert_eq!(mesh.heights()[mesh.index(x, y)], expected, "cell ({x}, {y})");
        }
    }
}

#[test]
fn windowed_maximum_never_dips_below_ground() {
    let ground = rolling_ground();
    let info = SmoothMeshInfo {
        map_width: 96.0,
        map_height: 96.0,
        resolution: 8.0,
        smooth_radius: 16.0,
        blur_passes: 0,
        ..Default::default()
    };

    let mesh = SmoothHeightMesh::new(&info, &ground).unwrap();

    for y in 0..=mesh.max_y() {
        for x in 0..mesh.max_x() {
            let raw = ground.height(x as f32 * 8.0, y as f32 * 8.0);
            assert!(mesh.heights()[mesh.index(x, y)] >= raw);
        }
    }
}

#[test]
fn smoothed_mesh_stays_within_global_bounds() {
    let ground = rolling_ground();
    let info = SmoothMeshInfo {
        map_width: 96.0,
        map_height: 96.0,
        resolution: 8.0,
        smooth_radius: 24.0,
        ..Default::default()
    };

    let mesh = SmoothHeightMesh::new(&info, &ground).unwrap();
    let bounds = ground.bounds();

    for y in 0..=mesh.max_y() {
        for x in 0..mesh.max_x() {
            let h = mesh.heights()[mesh.index(x, y)];
            assert!(h >= bounds.min && h <= bounds.max, "cell ({x}, {y}) = {h}");
        }
    }
}

#[test]
fn rebuild_is_bit_identical() {
    let ground = rolling_ground();
    let info = SmoothMeshInfo {
        map_width: 80.0,
        map_height: 64.0,
        resolution: 8.0,
        smooth_radius: 24.0,
        ..Default::default()
    };

    let first = SmoothHeightMesh::new(&info, &ground).unwrap();
    let second = SmoothHeightMesh::new(&info, &ground).unwrap();

    assert_eq!(first.heights(), second.heights());
    assert_eq!(first.original_heights(), second.original_heights());
}

#[test]
fn growing_the_window_never_lowers_a_cell() {
    let ground = rolling_ground();
    let narrow = SmoothHeightMesh::new(
        &SmoothMeshInfo {
            map_width: 64.0,
            map_height: 64.0,
            resolution: 8.0,
            smooth_radius: 8.0,
            blur_passes: 0,
            ..Default::default()
        },
        &ground,
    )
    .unwrap();
    let wide = SmoothHeightMesh::new(
        &SmoothMeshInfo {
            map_width: 64.0,
            map_height: 64.0,
            resolution: 8.0,
            smooth_radius: 40.0,
            blur_passes: 0,
            ..Default::default()
        },
        &ground,
    )
    .unwrap();

    for y in 0..=narrow.max_y() {
        for x in 0..narrow.max_x() {
            assert!(wide.heights()[wide.index(x, y)] >= narrow.heights()[narrow.index(x, y)]);
        }
    }
}

#[test]
fn original_heights_match_heights_after_build() {
    let ground = rolling_ground();
    let mesh = SmoothHeightMesh::new(
        &SmoothMeshInfo {
            map_width: 64.0,
            map_height: 64.0,
            resolution: 8.0,
            smooth_radius: 24.0,
            ..Default::default()
        },
        &ground,
    )
    .unwrap();

    assert_eq!(mesh.heights(), mesh.original_heights());
}

fn spike_ground() -> FnGround<fn(f32, f32) -> f32> {
    fn spike(x: f32, y: f32) -> f32 {
        if x == 16.0 && y == 16.0 {
            100.0
        } else {
            0.0
        }
    }
    FnGround::new(HeightBounds::new(0.0, 100.0), spike)
}

fn spike_info(blur_passes: u32) -> SmoothMeshInfo {
    SmoothMeshInfo {
        map_width: 24.0,
        map_height: 24.0,
        resolution: 8.0,
        smooth_radius: 8.0,
        blur_passes,
        ..Default::default()
    }
}

#[test]
fn spike_spreads_to_chebyshev_neighbors_before_blur() {
    let ground = spike_ground();
    let mesh = SmoothHeightMesh::new(&spike_info(0), &ground).unwrap();

    assert_eq!(mesh.max_x(), 4);
    assert_eq!(mesh.win_size(), 1);

    for y in 0i32..4 {
        for x in 0i32..4 {
            let expected = if (x - 2).abs() <= 1 && (y - 2).abs() <= 1 {
                100.0
            } else {
                0.0
            };
            assert_eq!(mesh.heights()[mesh.index(x, y)], expected, "cell ({x}, {y})");
        }
    }
}

#[test]
fn blur_softens_the_spike_plateau() {
    let ground = spike_ground();
    let mesh = SmoothHeightMesh::new(&spike_info(2), &ground).unwrap();
    let h = |x: i32, y: i32| mesh.heights()[mesh.index(x, y)];

    // the spike cell itself stays pinned to the terrain: the surface is
    // conservative and never dips below the ground it covers
    assert_eq!(h(2, 2), 100.0);

    // the plateau around it relaxes strictly below the peak but keeps a
    // nonzero contribution
    for (x, y) in [(1, 1), (1, 2), (2, 1)] {
        assert!(h(x, y) < 100.0, "cell ({x}, {y}) = {}", h(x, y));
        assert!(h(x, y) > 0.0, "cell ({x}, {y}) = {}", h(x, y));
    }

    // contribution falls off with distance from the spike
    assert!(h(2, 2) > h(1, 2));
    assert!(h(1, 2) > h(0, 2));
    assert!(h(0, 2) > 0.0);

    for y in 0..4 {
        for x in 0..4 {
            assert!(h(x, y) >= 0.0 && h(x, y) <= 100.0);
        }
    }
}
