//! Clamp-to-edge pixel access.
//!
//! Reads never fail: each coordinate is clamped into range on its own, so a
//! read past the border returns the nearest edge sample. This is the only
//! border policy in the workspace; filters and resamplers rely on it for
//! padding.
//!
//! Writes outside the buffer are silently dropped.
//!
//! ```rust
//! use planar_core::Image;
//!
//! let mut img = Image::new(3, 3, 1).unwrap();
//! img.set(2, 0, 0, 1.0);
//! img.set(5, 0, 0, 9.0); // ignored
//!
//! assert_eq!(img.get(7, -2, 0), 1.0); // clamps to (2, 0)
//! assert_eq!(img.get(2, 0, 4), 1.0);  // channel clamps too
//! ```

use crate::Image;

#[inline]
fn clamp_axis(v: i32, len: u32) -> usize {
    // len >= 1, so len - 1 is a valid index
    v.clamp(0, (len - 1).min(i32::MAX as u32) as i32) as usize
}

impl Image {
    /// Returns the sample at `(x, y, c)` with each coordinate clamped to
    /// the nearest valid index.
    #[inline]
    pub fn get(&self, x: i32, y: i32, c: i32) -> f32 {
        let x = clamp_axis(x, self.width());
        let y = clamp_axis(y, self.height());
        let c = clamp_axis(c, self.channels());
        self.data()[self.offset(x, y, c)]
    }

    /// Returns `true` if `(x, y, c)` addresses a sample of this image.
    #[inline]
    pub fn contains(&self, x: i32, y: i32, c: i32) -> bool {
        x >= 0
            && y >= 0
            && c >= 0
            && (x as u32) < self.width()
            && (y as u32) < self.height()
            && (c as u32) < self.channels()
    }

    /// Writes `value` at `(x, y, c)`. Out-of-range coordinates are a no-op.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, c: i32, value: f32) {
        if self.contains(x, y, c) {
            let i = self.offset(x as usize, y as usize, c as usize);
            self.data_mut()[i] = value;
        }
    }
}
