//! Parallel image processing operations using Rayon.
//!
//! Row-parallel versions of the heavier operators. Every output row (of
//! every channel plane) is computed by exactly one task, which reads only
//! from the input buffers, so the results match the serial operators bit
//! for bit.
//!
//! # Example
//!
//! ```rust
//! use planar_core::Image;
//! use planar_ops::{filter, parallel};
//!
//! let src = Image::filled(256, 256, 3, 0.5).unwrap();
//! let kernel = filter::gaussian_filter(2.0).unwrap();
//! let blurred = parallel::convolve(&src, &kernel, true).unwrap();
//! assert_eq!(blurred, filter::convolve(&src, &kernel, true).unwrap());
//! ```

use crate::filter::{convolve_row, prepare, row_job, ConvolveMode};
use crate::resize::{bilinear_row, nearest_row, row_source, source_coords, RowSampler};
use crate::OpsResult;
use planar_core::Image;
use rayon::prelude::*;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Parallel [`convolve`](crate::filter::convolve).
pub fn convolve(image: &Image, filter: &Image, preserve: bool) -> OpsResult<Image> {
    convolve_with(image, filter, preserve.into())
}

/// Parallel [`convolve_with`](crate::filter::convolve_with).
pub fn convolve_with(image: &Image, filter: &Image, mode: ConvolveMode) -> OpsResult<Image> {
    debug!(
        image = ?image.shape(),
        filter = ?filter.shape(),
        ?mode,
        threads = rayon::current_num_threads(),
        "parallel convolve"
    );
    let mut out = prepare(image, filter, mode)?;
    let width = out.width() as usize;

    // Same row order as Image::rows_mut
    out.data_mut()
        .par_chunks_exact_mut(width)
        .enumerate()
        .for_each(|(r, row)| {
            let (channels, y) = row_job(r, image, mode);
            convolve_row(image, filter, channels, y, row);
        });

    Ok(out)
}

fn resample_par(image: &Image, width: u32, height: u32, sampler: RowSampler) -> OpsResult<Image> {
    let mut out = Image::new(width, height, image.channels())?;
    let xs = source_coords(image.width(), width);
    let ys = source_coords(image.height(), height);

    out.data_mut()
        .par_chunks_exact_mut(width as usize)
        .enumerate()
        .for_each(|(r, row)| {
            let (c, sy) = row_source(r, height as usize, &ys);
            sampler(image, c, sy, &xs, row);
        });

    Ok(out)
}

/// Parallel [`nearest_resize`](crate::resize::nearest_resize).
pub fn nearest_resize(image: &Image, width: u32, height: u32) -> OpsResult<Image> {
    trace!(src = ?image.shape(), width, height, "parallel nearest_resize");
    resample_par(image, width, height, nearest_row)
}

/// Parallel [`bilinear_resize`](crate::resize::bilinear_resize).
pub fn bilinear_resize(image: &Image, width: u32, height: u32) -> OpsResult<Image> {
    trace!(src = ?image.shape(), width, height, "parallel bilinear_resize");
    resample_par(image, width, height, bilinear_row)
}
