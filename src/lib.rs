//! yama — conservative smoothed-heightmap subsystem.
//!
//! Builds, from an authoritative terrain sampler, a reduced-resolution mesh
//! where every cell holds the maximum terrain height within a fixed radius,
//! softened by separable approximate-Gaussian blur passes. Movement and
//! line-of-sight systems query this surface instead of the raw terrain so
//! units neither clip into small bumps nor lose sight lines to single-cell
//! spikes.
//!
//! ```
//! use yama::{FnGround, GroundSource, HeightBounds, SmoothHeightMesh, SmoothMeshInfo};
//!
//! let ground = FnGround::new(HeightBounds::new(-50.0, 50.0), |x, y| {
//!     ((x * 0.01).sin() + (y * 0.01).cos()) * 25.0
//! });
//! let info = SmoothMeshInfo {
//!     map_width: 256.0,
//!     map_height: 256.0,
//!     resolution: 16.0,
//!     smooth_radius: 64.0,
//!     ..Default::default()
//! };
//!
//! let mesh = SmoothHeightMesh::new(&info, &ground).unwrap();
//! assert!(mesh.get_height(128.0, 128.0) >= ground.height(128.0, 128.0));
//! ```

pub mod error;
pub mod ground;
pub mod smooth;
mod utils;

pub use error::{Error, Result};
pub use ground::{FnGround, GroundSource, HeightBounds};
pub use smooth::{SmoothHeightMesh, SmoothMeshInfo};

use std::ffi::{c_float, c_void};
use tracing::{warn, Level};
use tracing_subscriber::FmtSubscriber;

/// C callback that samples the raw ground height at a world position.
pub type GroundSampleFn = extern "C" fn(x: c_float, y: c_float, user_data: *mut c_void) -> c_float;

struct CallbackGround {
    sample: GroundSampleFn,
    user_data: *mut c_void,
    bounds: HeightBounds,
}

// The blur phase invokes the sampler from worker threads; the FFI contract
// requires the callback and whatever `user_data` points to to tolerate that.
unsafe impl Send for CallbackGround {}
unsafe impl Sync for CallbackGround {}

impl GroundSource for CallbackGround {
    fn height(&self, world_x: f32, world_y: f32) -> f32 {
        (self.sample)(world_x, world_y, self.user_data)
    }

    fn bounds(&self) -> HeightBounds {
        self.bounds
    }
}

/// Build a smoothed height mesh over a C ground sampler.
///
/// Returns null if `info` or `sampler` is null, or if the extents are
/// degenerate. The mesh must be destroyed with
/// [`yama_destroy_smooth_mesh`].
///
/// # Safety
/// `info` must point to a valid [`SmoothMeshInfo`]. `sampler` is invoked
/// concurrently from multiple threads during the blur phase and must be
/// thread-safe together with `user_data`.
#[no_mangle]
pub extern "C" fn yama_make_smooth_mesh(
    info: *const SmoothMeshInfo,
    sampler: Option<GroundSampleFn>,
    user_data: *mut c_void,
    min_height: c_float,
    max_height: c_float,
) -> *mut SmoothHeightMesh {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    if info.is_null() {
        return std::ptr::null_mut();
    }
    let Some(sampler) = sampler else {
        return std::ptr::null_mut();
    };

    let ground = CallbackGround {
        sample: sampler,
        user_data,
        bounds: HeightBounds::new(min_height, max_height),
    };

    match SmoothHeightMesh::new(unsafe { &*info }, &ground) {
        Ok(mesh) => Box::into_raw(Box::new(mesh)),
        Err(err) => {
            warn!(error = %err, "Smooth mesh build failed.");
            std::ptr::null_mut()
        }
    }
}

/// Destroy a mesh previously created with [`yama_make_smooth_mesh`].
///
/// # Safety
/// `mesh` must be a pointer returned by [`yama_make_smooth_mesh`] and must
/// not be used after this call.
#[no_mangle]
pub extern "C" fn yama_destroy_smooth_mesh(mesh: *mut SmoothHeightMesh) {
    if !mesh.is_null() {
        unsafe {
            drop(Box::from_raw(mesh));
        }
    }
}

/// Smoothed height at a world position.
///
/// # Safety
/// `mesh` must be a valid mesh pointer. A null pointer returns `0.0`.
#[no_mangle]
pub extern "C" fn yama_smooth_get_height(
    mesh: *const SmoothHeightMesh,
    x: c_float,
    y: c_float,
) -> c_float {
    if mesh.is_null() {
        return 0.0;
    }
    unsafe { &*mesh }.get_height(x, y)
}

/// Smoothed height at a world position, floored at the water line.
///
/// # Safety
/// `mesh` must be a valid mesh pointer. A null pointer returns `0.0`.
#[no_mangle]
pub extern "C" fn yama_smooth_get_height_above_water(
    mesh: *const SmoothHeightMesh,
    x: c_float,
    y: c_float,
) -> c_float {
    if mesh.is_null() {
        return 0.0;
    }
    unsafe { &*mesh }.get_height_above_water(x, y)
}

/// Overwrite one mesh corner by flattened index. Returns 1 on success, 0 if
/// the pointer is null or the index is out of range.
#[no_mangle]
pub extern "C" fn yama_smooth_set_height(
    mesh: *mut SmoothHeightMesh,
    index: usize,
    h: c_float,
) -> i32 {
    if mesh.is_null() {
        return 0;
    }
    unsafe { &mut *mesh }.set_height(index, h).is_ok() as i32
}

/// Add to one mesh corner by flattened index. Returns 1 on success, 0 if
/// the pointer is null or the index is out of range.
#[no_mangle]
pub extern "C" fn yama_smooth_add_height(
    mesh: *mut SmoothHeightMesh,
    index: usize,
    h: c_float,
) -> i32 {
    if mesh.is_null() {
        return 0;
    }
    unsafe { &mut *mesh }.add_height(index, h).is_ok() as i32
}

/// Raise one mesh corner to at least `h` by flattened index. Returns 1 on
/// success, 0 if the pointer is null or the index is out of range.
#[no_mangle]
pub extern "C" fn yama_smooth_set_max_height(
    mesh: *mut SmoothHeightMesh,
    index: usize,
    h: c_float,
) -> i32 {
    if mesh.is_null() {
        return 0;
    }
    unsafe { &mut *mesh }.set_max_height(index, h).is_ok() as i32
}

/// Number of mesh cells along X. A null pointer returns 0.
#[no_mangle]
pub extern "C" fn yama_smooth_max_x(mesh: *const SmoothHeightMesh) -> i32 {
    if mesh.is_null() {
        return 0;
    }
    unsafe { &*mesh }.max_x()
}

/// Number of mesh cells along Y. A null pointer returns 0.
#[no_mangle]
pub extern "C" fn yama_smooth_max_y(mesh: *const SmoothHeightMesh) -> i32 {
    if mesh.is_null() {
        return 0;
    }
    unsafe { &*mesh }.max_y()
}

/// World units per mesh cell. A null pointer returns 0.
#[no_mangle]
pub extern "C" fn yama_smooth_resolution(mesh: *const SmoothHeightMesh) -> c_float {
    if mesh.is_null() {
        return 0.0;
    }
    unsafe { &*mesh }.resolution()
}
