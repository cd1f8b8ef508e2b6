//! Fixed-capacity position trail.
//!
//! A [`TrailBuffer`] records the most recent positions of a tracked body in
//! a pre-allocated ring: the write cursor advances monotonically and wraps,
//! silently overwriting the oldest entry. The buffer always exposes exactly
//! `capacity` entries, so a renderer can bind it as a fixed-size vertex
//! attribute and never reallocate.

use glam::Vec3;

/// Ring buffer of recent positions with a wrapping write cursor.
#[derive(Debug, Clone)]
pub struct TrailBuffer {
    slots: Box<[Vec3]>,
    cursor: usize,
}

impl TrailBuffer {
    /// Create a trail with `capacity` slots, all at the origin.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "trail capacity must be nonzero");
        Self {
            slots: vec![Vec3::ZERO; capacity].into_boxed_slice(),
            cursor: 0,
        }
    }

    /// Record a position, overwriting the oldest entry on wraparound.
    pub fn push(&mut self, position: Vec3) {
        self.slots[self.cursor] = position;
        self.cursor = (self.cursor + 1) % self.slots.len();
    }

    /// Number of slots. Constant for the lifetime of the buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Next slot to be written. Always in `[0, capacity)`.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// All entries in storage order, suitable for direct vertex upload.
    #[inline]
    pub fn as_slice(&self) -> &[Vec3] {
        &self.slots
    }

    /// Entries ordered oldest to newest.
    pub fn iter_ordered(&self) -> impl Iterator<Item = Vec3> + '_ {
        let n = self.slots.len();
        (0..n).map(move |i| self.slots[(self.cursor + i) % n])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_length() {
        let mut trail = TrailBuffer::new(8);
        assert_eq!(trail.as_slice().len(), 8);
        for i in 0..20 {
            trail.push(Vec3::splat(i as f32));
            assert_eq!(trail.as_slice().len(), 8);
            assert!(trail.cursor() < 8);
        }
    }

    #[test]
    fn test_wraparound_overwrites_oldest() {
        let mut trail = TrailBuffer::new(4);
        for i in 0..4 {
            trail.push(Vec3::splat(i as f32));
        }
        assert_eq!(trail.cursor(), 0);
        // One more push lands in slot 0, replacing the oldest entry.
        trail.push(Vec3::splat(99.0));
        assert_eq!(trail.as_slice()[0], Vec3::splat(99.0));
        assert_eq!(trail.as_slice()[1], Vec3::splat(1.0));
    }

    #[test]
    fn test_full_cycle_overwrites_everything() {
        let mut trail = TrailBuffer::new(5);
        for i in 0..5 {
            trail.push(Vec3::splat(i as f32));
        }
        // After capacity more pushes no first-generation entry survives.
        for i in 0..5 {
            trail.push(Vec3::splat(100.0 + i as f32));
        }
        for slot in trail.as_slice() {
            assert!(slot.x >= 100.0);
        }
    }

    #[test]
    fn test_iter_ordered_oldest_first() {
        let mut trail = TrailBuffer::new(3);
        for i in 0..4 {
            trail.push(Vec3::new(i as f32, 0.0, 0.0));
        }
        let xs: Vec<f32> = trail.iter_ordered().map(|p| p.x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0]);
    }
}
