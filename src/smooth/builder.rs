use crate::ground::GroundSource;

/// Per-column maximum of the raw ground over a vertical sliding window,
/// together with the row each maximum was last seen at.
///
/// The recorded row lets a column skip rescanning its window until the
/// maximum actually falls off the trailing edge, which makes the sweep
/// amortized O(1) per column per row.
pub(crate) struct ColumnMaxima {
    pub(crate) maxx: i32,
    pub(crate) maxy: i32,
    pub(crate) win_size: i32,
    pub(crate) resolution: f32,
    pub(crate) cols_maxima: Vec<f32>,
    pub(crate) maxima_rows: Vec<i32>,
}

impl ColumnMaxima {
    pub(crate) fn new(maxx: i32, maxy: i32, win_size: i32, resolution: f32) -> ColumnMaxima {
        ColumnMaxima {
            maxx,
            maxy,
            win_size,
            resolution,
            cols_maxima: vec![f32::MIN; (maxx + 1) as usize],
            maxima_rows: vec![-1; (maxx + 1) as usize],
        }
    }

    /// Scan the initial window: the maximum height of every column over rows
    /// `0..=min(maxy, win_size)` and the row it occurs at.
    fn bootstrap(&mut self, ground: &dyn GroundSource) {
        for y in 0..=self.maxy.min(self.win_size) {
            let cury = y as f32 * self.resolution;
            for x in 0..=self.maxx {
                let curh = ground.height(x as f32 * self.resolution, cury);
                let xi = x as usize;

                if curh > self.cols_maxima[xi] {
                    self.cols_maxima[xi] = curh;
                    self.maxima_rows[xi] = y;
                }
            }
        }
    }

    /// Re-confirm maxima recorded on row `y - 1`: when row `y` carries the
    /// same height, move the record forward so the maximum stays valid
    /// longer before a rescan is forced.
    fn advance(&mut self, y: i32, ground: &dyn GroundSource) {
        let cury = y as f32 * self.resolution;

        for x in 0..=self.maxx {
            let xi = x as usize;
            if self.maxima_rows[xi] == y - 1 {
                let curh = ground.height(x as f32 * self.resolution, cury);

                if curh == self.cols_maxima[xi] {
                    self.maxima_rows[xi] = y;
                }

                debug_assert!(curh <= self.cols_maxima[xi]);
            }
        }
    }

    /// Prepare for row `y + 1`: columns whose maximum fell off the trailing
    /// edge rescan their window, every other column only tests the row
    /// entering at `y + win_size + 1`.
    fn fix(&mut self, y: i32, ground: &dyn GroundSource) {
        let next_row = y + self.win_size + 1;
        let next_rowy = next_row as f32 * self.resolution;

        for x in 0..=self.maxx {
            let xi = x as usize;
            let curx = x as f32 * self.resolution;

            if self.maxima_rows[xi] <= y - self.win_size {
                // the old maximum left the window, find a fresh one
                self.cols_maxima[xi] = f32::MIN;

                let y0 = (y - self.win_size + 1).max(0);
                let y1 = next_row.min(self.maxy);

                for y2 in y0..=y1 {
                    let h = ground.height(curx, y2 as f32 * self.resolution);

                    if h > self.cols_maxima[xi] {
                        self.cols_maxima[xi] = h;
                        self.maxima_rows[xi] = y2;
                    } else if h == self.cols_maxima[xi] {
                        // equal heights: keep the row furthest from the
                        // trailing edge to delay the next rescan
                        self.maxima_rows[xi] = y2;
                    }
                }
            } else if next_row <= self.maxy {
                let h = ground.height(curx, next_rowy);

                if h > self.cols_maxima[xi] {
                    self.cols_maxima[xi] = h;
                    self.maxima_rows[xi] = next_row;
                }
            }

            debug_assert!(self.maxima_rows[xi] <= next_row);
            // the window claim only matters while another row is coming;
            // on the last row a zero-size window leaves nothing to rescan
            debug_assert!(y == self.maxy || self.maxima_rows[xi] > y - self.win_size);
        }
    }
}

/// Fill `mesh` with the 2-D windowed maximum of the ground: per cell, the
/// maximum ground height over all grid corners within `win_size` cells.
///
/// Strictly row-sequential, the tracker state for row `y` depends on row
/// `y - 1`.
pub(crate) fn build_windowed_maxima(
    maxx: i32,
    maxy: i32,
    win_size: i32,
    resolution: f32,
    ground: &dyn GroundSource,
    mesh: &mut [f32],
) {
    let mut tracker = ColumnMaxima::new(maxx, maxy, win_size, resolution);
    tracker.bootstrap(ground);

    for y in 0..=maxy {
        tracker.advance(y, ground);
        radial_maximum(y, &tracker, mesh);
        tracker.fix(y, ground);

        #[cfg(feature = "verify")]
        super::verify::check_tracker(&tracker, y, ground);
        #[cfg(feature = "verify")]
        super::verify::check_mesh_row(y, &tracker, ground, mesh);
    }
}

/// Horizontal max-of-maxima along row `y`. With the tracker already
/// vertically maximized this yields the true 2-D windowed maximum in
/// O(win_size) per cell.
fn radial_maximum(y: i32, tracker: &ColumnMaxima, mesh: &mut [f32]) {
    let maxx = tracker.maxx;

    for x in 0..maxx {
        let startx = (x - tracker.win_size).max(0);
        let endx = (x + tracker.win_size).min(maxx - 1);

        let mut max_row_height = f32::MIN;
        for i in startx..=endx {
            max_row_height = max_row_height.max(tracker.cols_maxima[i as usize]);
        }

        mesh[(x + y * maxx) as usize] = max_row_height;
    }
}
