use rayon::prelude::*;

use crate::ground::GroundSource;

/// Normalized 1-D Gaussian kernel. Only non-negative offsets are stored;
/// `kernel[0] + 2 * sum(kernel[1..]) == 1`.
pub(crate) fn gaussian_kernel(blur_size: usize, sigma: f32) -> Vec<f32> {
    // 0.3989422804 = 1/sqrt(2*pi)
    let gaussian = |x: usize| -> f32 {
        0.398_942_28_f32 * (-0.5 * (x * x) as f32 / (sigma * sigma)).exp() / sigma
    };

    let mut kernel = vec![0.0f32; blur_size + 1];

    kernel[0] = gaussian(0);
    let mut sum = kernel[0];

    for i in 1..=blur_size {
        kernel[i] = gaussian(i);
        sum += 2.0 * kernel[i];
    }

    for k in kernel.iter_mut() {
        *k /= sum;
    }

    kernel
}

/// One horizontal kernel sweep over `src` into `dst`.
///
/// Every output row reads only the immutable input buffer, so rows are
/// dispatched across the rayon pool; the iterator only returns once all
/// rows are written. Each output is floored at the raw ground height and
/// clamped into the global bounds.
pub(crate) fn blur_horizontal(
    maxx: usize,
    maxy: usize,
    blur_size: usize,
    resolution: f32,
    kernel: &[f32],
    ground: &dyn GroundSource,
    src: &[f32],
    dst: &mut [f32],
) {
    let bounds = ground.bounds();
    let line = maxx;

    dst[..line * maxy]
        .par_chunks_mut(line)
        .enumerate()
        .for_each(|(y, row)| {
            let cury = y as f32 * resolution;

            for x in 0..maxx {
                let mut avg = 0.0f32;
                for x1 in x as i32 - blur_size as i32..=x as i32 + blur_size as i32 {
                    let tap = x1.clamp(0, maxx as i32 - 1) as usize;
                    avg += kernel[(x1 - x as i32).unsigned_abs() as usize] * src[tap + y * line];
                }

                let ghaw = ground.height(x as f32 * resolution, cury);
                row[x] = bounds.clamp(avg.max(ghaw));
            }
        });
}

/// Vertical counterpart of [`blur_horizontal`]: the kernel runs along
/// columns, but the dispatch is still per output row so writes stay
/// disjoint.
pub(crate) fn blur_vertical(
    maxx: usize,
    maxy: usize,
    blur_size: usize,
    resolution: f32,
    kernel: &[f32],
    ground: &dyn GroundSource,
    src: &[f32],
    dst: &mut [f32],
) {
    let bounds = ground.bounds();
    let line = maxx;

    dst[..line * maxy]
        .par_chunks_mut(line)
        .enumerate()
        .for_each(|(y, row)| {
            let cury = y as f32 * resolution;

            for x in 0..maxx {
                let mut avg = 0.0f32;
                for y1 in y as i32 - blur_size as i32..=y as i32 + blur_size as i32 {
                    let tap = y1.clamp(0, maxy as i32 - 1) as usize;
                    avg += kernel[(y1 - y as i32).unsigned_abs() as usize] * src[x + tap * line];
                }

                let ghaw = ground.height(x as f32 * resolution, cury);
                row[x] = bounds.clamp(avg.max(ghaw));
            }
        });
}
