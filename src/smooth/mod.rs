//! Conservative smoothed height mesh.
//!
//! Two-phase build over the raw terrain: a windowed-maximum sweep (every
//! cell takes the highest ground within `smooth_radius`), then separable
//! approximate-Gaussian blur passes floored at the raw ground so the
//! surface never dips below the terrain it covers.

mod blur;
mod builder;
#[cfg(any(test, feature = "verify"))]
pub(crate) mod verify;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, ExtentsError, OutOfRangeError, Result};
use crate::ground::GroundSource;
use crate::utils::timer::ScopedTimer;

/// Build parameters for a [`SmoothHeightMesh`].
///
/// Loadable from JSON so hosts can keep mesh tuning next to their other
/// map settings:
///
/// ```
/// use yama::SmoothMeshInfo;
///
/// let info = SmoothMeshInfo::from_json(
///     r#"{
///         "map_width": 1024.0,
///         "map_height": 1024.0,
///         "resolution": 16.0,
///         "smooth_radius": 320.0,
///         "blur_passes": 2,
///         "blur_sigma": 5.0
///     }"#,
/// )
/// .unwrap();
/// assert_eq!(info.resolution, 16.0);
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothMeshInfo {
    /// Map extent along X in world units.
    pub map_width: f32,
    /// Map extent along Y in world units.
    pub map_height: f32,
    /// World units per mesh cell.
    pub resolution: f32,
    /// World-unit radius of the local-maximum window. Clamped to `>= 1`.
    pub smooth_radius: f32,
    /// Number of (horizontal, vertical) blur rounds. Zero leaves the raw
    /// windowed maximum in place.
    pub blur_passes: u32,
    /// Standard deviation of the blur kernel, in cells.
    pub blur_sigma: f32,
}

impl Default for SmoothMeshInfo {
    fn default() -> Self {
        Self {
            map_width: 512.0,
            map_height: 512.0,
            resolution: 16.0,
            smooth_radius: 320.0,
            blur_passes: 2,
            blur_sigma: 5.0,
        }
    }
}

impl SmoothMeshInfo {
    /// Parse settings from a JSON document.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load settings from a JSON file.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}

/// Smoothed heightmap over a [`GroundSource`].
///
/// Construction runs the full build pipeline; dropping the mesh releases
/// the buffers. Point queries interpolate the smoothed surface, point
/// mutators deform it in place for runtime terrain edits (no re-blur is
/// triggered, edits stay local).
pub struct SmoothHeightMesh {
    maxx: i32,
    maxy: i32,
    resolution: f32,
    smooth_radius: f32,
    win_size: i32,
    mesh: Vec<f32>,
    orig_mesh: Vec<f32>,
}

impl SmoothHeightMesh {
    /// Build a smoothed mesh covering `map_width x map_height` world units.
    ///
    /// Fails closed on degenerate extents (zero or negative width, height,
    /// or resolution). Identical ground and bounds inputs reproduce
    /// bit-identical meshes.
    pub fn new(info: &SmoothMeshInfo, ground: &dyn GroundSource) -> Result<SmoothHeightMesh> {
        if info.map_width <= 0.0 || info.map_height <= 0.0 || info.resolution <= 0.0 {
            return Err(Error::ExtentsError(ExtentsError {
                map_width: info.map_width,
                map_height: info.map_height,
                resolution: info.resolution,
            }));
        }

        let resolution = info.resolution;
        let smooth_radius = info.smooth_radius.max(1.0);
        let maxx = (info.map_width / resolution) as i32 + 1;
        let maxy = (info.map_height / resolution) as i32 + 1;
        let win_size = (smooth_radius / resolution) as i32;

        let corners = ((maxx + 1) * (maxy + 1)) as usize;
        let mut this = SmoothHeightMesh {
            maxx,
            maxy,
            resolution,
            smooth_radius,
            win_size,
            mesh: vec![0.0; corners],
            orig_mesh: vec![0.0; corners],
        };
        this.build(info, ground);

        Ok(this)
    }

    fn build(&mut self, info: &SmoothMeshInfo, ground: &dyn GroundSource) {
        let _timer = ScopedTimer::new("Smooth height mesh build");

        let blur_size = (self.win_size / 2).max(1) as usize;
        info!(
            "Building smooth height mesh: {}x{} cells, window {} cells, blur radius {} cells",
            self.maxx, self.maxy, self.win_size, blur_size
        );

        builder::build_windowed_maxima(
            self.maxx,
            self.maxy,
            self.win_size,
            self.resolution,
            ground,
            &mut self.mesh,
        );

        let kernel = blur::gaussian_kernel(blur_size, info.blur_sigma);
        for _ in 0..info.blur_passes {
            blur::blur_horizontal(
                self.maxx as usize,
                self.maxy as usize,
                blur_size,
                self.resolution,
                &kernel,
                ground,
                &self.mesh,
                &mut self.orig_mesh,
            );
            std::mem::swap(&mut self.mesh, &mut self.orig_mesh);

            blur::blur_vertical(
                self.maxx as usize,
                self.maxy as usize,
                blur_size,
                self.resolution,
                &kernel,
                ground,
                &self.mesh,
                &mut self.orig_mesh,
            );
            std::mem::swap(&mut self.mesh, &mut self.orig_mesh);
        }

        // keep a pristine copy of the final surface so runtime deformation
        // can be compared against the built state
        self.orig_mesh.copy_from_slice(&self.mesh);
    }

    pub fn max_x(&self) -> i32 {
        self.maxx
    }

    pub fn max_y(&self) -> i32 {
        self.maxy
    }

    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    pub fn smooth_radius(&self) -> f32 {
        self.smooth_radius
    }

    pub fn win_size(&self) -> i32 {
        self.win_size
    }

    /// The smoothed height buffer, row-major with stride [`Self::max_x`].
    pub fn heights(&self) -> &[f32] {
        &self.mesh
    }

    /// The surface as it was right after the build, untouched by point
    /// mutation.
    pub fn original_heights(&self) -> &[f32] {
        &self.orig_mesh
    }

    /// Flattened index of grid corner `(x, y)`.
    pub fn index(&self, x: i32, y: i32) -> usize {
        (x + y * self.maxx) as usize
    }

    /// Smoothed height at a continuous world position, bilinearly
    /// interpolated from the four surrounding grid corners.
    pub fn get_height(&self, x: f32, y: f32) -> f32 {
        interpolate(x, y, self.maxx, self.maxy, self.resolution, &self.mesh)
    }

    /// Same as [`Self::get_height`], floored at the water line.
    pub fn get_height_above_water(&self, x: f32, y: f32) -> f32 {
        self.get_height(x, y).max(0.0)
    }

    /// Central-difference normal of the smoothed surface.
    pub fn get_normal(&self, x: f32, y: f32) -> Vec3 {
        let d = self.resolution;
        let h_l = self.get_height(x - d, y);
        let h_r = self.get_height(x + d, y);
        let h_d = self.get_height(x, y - d);
        let h_u = self.get_height(x, y + d);

        Vec3::new(h_l - h_r, 2.0 * d, h_d - h_u).normalize_or_zero()
    }

    /// Overwrite one mesh corner, returning the stored value.
    pub fn set_height(&mut self, index: usize, h: f32) -> Result<f32> {
        self.check_index(index)?;
        self.mesh[index] = h;
        Ok(self.mesh[index])
    }

    /// Add to one mesh corner, returning the stored value.
    pub fn add_height(&mut self, index: usize, h: f32) -> Result<f32> {
        self.check_index(index)?;
        self.mesh[index] += h;
        Ok(self.mesh[index])
    }

    /// Raise one mesh corner to at least `h`, returning the stored value.
    pub fn set_max_height(&mut self, index: usize, h: f32) -> Result<f32> {
        self.check_index(index)?;
        self.mesh[index] = self.mesh[index].max(h);
        Ok(self.mesh[index])
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.mesh.len() {
            Ok(())
        } else {
            Err(Error::OutOfRangeError(OutOfRangeError {
                index,
                len: self.mesh.len(),
            }))
        }
    }
}

fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn interpolate(x: f32, y: f32, maxx: i32, maxy: i32, resolution: f32, heightmap: &[f32]) -> f32 {
    let x = (x / resolution).clamp(0.0, maxx as f32 - 1.0);
    let y = (y / resolution).clamp(0.0, maxy as f32 - 1.0);
    let sx = x as i32;
    let sy = y as i32;
    let dx = x - sx as f32;
    let dy = y - sy as f32;

    let sxp1 = (sx + 1).min(maxx - 1);
    let syp1 = (sy + 1).min(maxy - 1);

    let h1 = heightmap[(sx + sy * maxx) as usize];
    let h2 = heightmap[(sxp1 + sy * maxx) as usize];
    let h3 = heightmap[(sx + syp1 * maxx) as usize];
    let h4 = heightmap[(sxp1 + syp1 * maxx) as usize];

    let hi1 = mix(h1, h2, dx);
    let hi2 = mix(h3, h4, dx);
    mix(hi1, hi2, dy)
}
