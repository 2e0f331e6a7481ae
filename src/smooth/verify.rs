//! Correctness oracles for the windowed-maximum sweep.
//!
//! These checks are a verification harness, not production control flow:
//! the build loop only runs them under the `verify` feature, and the test
//! suite calls them directly.

use super::builder::ColumnMaxima;
use crate::ground::GroundSource;

/// Reference 2-D windowed maximum at cell `(x, y)`, computed by brute force
/// over the full window footprint.
pub(crate) fn naive_windowed_max(
    x: i32,
    y: i32,
    maxx: i32,
    maxy: i32,
    win_size: i32,
    resolution: f32,
    ground: &dyn GroundSource,
) -> f32 {
    let mut best = f32::MIN;

    for y1 in (y - win_size).max(0)..=(y + win_size).min(maxy) {
        for x1 in (x - win_size).max(0)..=(x + win_size).min(maxx - 1) {
            best = best.max(ground.height(x1 as f32 * resolution, y1 as f32 * resolution));
        }
    }

    best
}

/// Tracker claims after the fix step for row `y`: every recorded row sits
/// inside the (advanced) window and every column maximum dominates the raw
/// ground over the rows it claims to cover.
pub(crate) fn check_tracker(tracker: &ColumnMaxima, y: i32, ground: &dyn GroundSource) {
    let bounds = ground.bounds();

    if y < tracker.maxy {
        for x in 0..=tracker.maxx {
            let xi = x as usize;
            assert!(tracker.maxima_rows[xi] > y - tracker.win_size);
            assert!(tracker.maxima_rows[xi] <= tracker.maxy);
            assert!(tracker.cols_maxima[xi] <= bounds.max);
            assert!(tracker.cols_maxima[xi] >= bounds.min);
        }
    }

    let y0 = (y - tracker.win_size + 1).max(0);
    let y1 = (y + tracker.win_size + 1).min(tracker.maxy);

    for y2 in y0..=y1 {
        let cury = y2 as f32 * tracker.resolution;
        for x in 0..=tracker.maxx {
            let curh = ground.height(x as f32 * tracker.resolution, cury);
            assert!(curh <= tracker.cols_maxima[x as usize]);
        }
    }
}

/// Row `y` of the freshly swept mesh matches the brute-force oracle and
/// never dips below the raw ground at the cell itself.
pub(crate) fn check_mesh_row(y: i32, tracker: &ColumnMaxima, ground: &dyn GroundSource, mesh: &[f32]) {
    let bounds = ground.bounds();

    for x in 0..tracker.maxx {
        let got = mesh[(x + y * tracker.maxx) as usize];
        let raw = ground.height(x as f32 * tracker.resolution, y as f32 * tracker.resolution);

        assert!(got >= raw);
        assert!(got <= bounds.max);
        assert_eq!(
            got,
            naive_windowed_max(
                x,
                y,
                tracker.maxx,
                tracker.maxy,
                tracker.win_size,
                tracker.resolution,
                ground,
            )
        );
    }
}
