use nalgebra::Vector3;
use std::cell::UnsafeCell;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

const LOCK_STRIPES: usize = 1024;

/// Color + depth target for the rasterizer.
///
/// Internally the buffers are `sample_count` times larger on each axis
/// (supersampling); `get_pixel` and `to_rgba8` resolve them back down.
/// Depth lives in atomics so rows can be shaded in parallel; color writes are
/// guarded by striped locks.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub sample_count: usize,
    pub buffer_width: usize,
    pub buffer_height: usize,

    /// One cell per sample, written only while holding the matching stripe in `locks`.
    color_buffer: Vec<UnsafeCell<Vector3<f32>>>,
    depth_buffer: Vec<AtomicU32>,
    locks: Vec<Mutex<()>>,
}

// Safety: concurrent color writes are serialized per stripe, depth is atomic.
unsafe impl Sync for FrameBuffer {}

impl FrameBuffer {
    pub fn new(width: usize, height: usize, sample_count: usize) -> Self {
        let sample_count = sample_count.max(1);
        let buffer_width = width * sample_count;
        let buffer_height = height * sample_count;
        let size = buffer_width * buffer_height;

        let far_bits = f32::INFINITY.to_bits();
        Self {
            width,
            height,
            sample_count,
            buffer_width,
            buffer_height,
            color_buffer: (0..size).map(|_| UnsafeCell::new(Vector3::zeros())).collect(),
            depth_buffer: (0..size).map(|_| AtomicU32::new(far_bits)).collect(),
            locks: (0..LOCK_STRIPES).map(|_| Mutex::new(())).collect(),
        }
    }

    /// Reallocates the buffers when the output size changed. Returns true if it did.
    pub fn resize(&mut self, width: usize, height: usize) -> bool {
        if width == self.width && height == self.height {
            return false;
        }
        *self = Self::new(width, height, self.sample_count);
        true
    }

    /// Fills every sample with `color` and resets depth to `depth`.
    pub fn clear(&mut self, color: Vector3<f32>, depth: f32) {
        for c in &mut self.color_buffer {
            *c.get_mut() = color;
        }
        let bits = depth.to_bits();
        for d in &self.depth_buffer {
            d.store(bits, Ordering::Relaxed);
        }
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.buffer_width && y < self.buffer_height
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.buffer_width + x
    }

    /// Atomically replaces the stored depth if `new_depth` is strictly closer.
    /// Returns whether the fragment survived.
    #[inline]
    pub fn depth_test_and_update(&self, x: usize, y: usize, new_depth: f32) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let slot = &self.depth_buffer[self.index(x, y)];
        let new_bits = new_depth.to_bits();

        let mut current_bits = slot.load(Ordering::Relaxed);
        loop {
            if new_depth >= f32::from_bits(current_bits) {
                return false;
            }
            match slot.compare_exchange_weak(
                current_bits,
                new_bits,
                Ordering::Acquire,
                Ordering::Relaxed,
            ) {
                Ok(_) => return true,
                Err(actual) => current_bits = actual,
            }
        }
    }

    /// Writes one sample. Call only after `depth_test_and_update` accepted it.
    #[inline]
    pub fn set_pixel_safe(&self, x: usize, y: usize, color: Vector3<f32>) {
        if !self.in_bounds(x, y) {
            return;
        }
        let idx = self.index(x, y);
        let _guard = self.locks[idx % self.locks.len()]
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Safety: the stripe lock for `idx` is held, and only this sample's cell is touched.
        unsafe {
            self.color_buffer[idx].get().write(color);
        }
    }

    #[inline(always)]
    fn sample(&self, idx: usize) -> Vector3<f32> {
        // Safety: reads happen after drawing; no writer is active.
        unsafe { *self.color_buffer[idx].get() }
    }

    /// Depth of a single sample, `None` outside the buffer.
    pub fn depth_at(&self, x: usize, y: usize) -> Option<f32> {
        self.in_bounds(x, y)
            .then(|| f32::from_bits(self.depth_buffer[self.index(x, y)].load(Ordering::Relaxed)))
    }

    /// Resolved (box-filtered) color of an output pixel.
    /// Intended for use once rasterization has finished.
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Vector3<f32>> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let n = self.sample_count;
        if n == 1 {
            return Some(self.sample(self.index(x, y)));
        }

        let mut sum = Vector3::zeros();
        for dy in 0..n {
            for dx in 0..n {
                sum += self.sample(self.index(x * n + dx, y * n + dy));
            }
        }
        Some(sum / (n * n) as f32)
    }

    /// Row-major RGBA8 copy of the resolved image. Colors are clamped, not gamma corrected.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.width * self.height * 4);
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.get_pixel(x, y).unwrap_or_else(Vector3::zeros);
                bytes.extend_from_slice(&[
                    channel_to_u8(c.x),
                    channel_to_u8(c.y),
                    channel_to_u8(c.z),
                    255,
                ]);
            }
        }
        bytes
    }
}

#[inline]
fn channel_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closer_fragment_wins_depth_test() {
        let fb = FrameBuffer::new(2, 2, 1);
        assert!(fb.depth_test_and_update(1, 1, 0.5));
        assert!(!fb.depth_test_and_update(1, 1, 0.7));
        assert!(fb.depth_test_and_update(1, 1, 0.2));
        assert_eq!(fb.depth_at(1, 1), Some(0.2));
        assert!(!fb.depth_test_and_update(5, 0, 0.0));
    }

    #[test]
    fn supersampled_pixel_is_averaged() {
        let mut fb = FrameBuffer::new(1, 1, 2);
        fb.clear(Vector3::zeros(), f32::INFINITY);
        fb.set_pixel_safe(0, 0, Vector3::new(1.0, 1.0, 1.0));
        fb.set_pixel_safe(1, 1, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(fb.get_pixel(0, 0), Some(Vector3::new(0.5, 0.5, 0.5)));
    }

    #[test]
    fn clear_resets_color_and_depth() {
        let mut fb = FrameBuffer::new(3, 2, 1);
        fb.depth_test_and_update(0, 0, 0.1);
        fb.clear(Vector3::new(0.2, 0.4, 0.6), f32::INFINITY);
        assert_eq!(fb.depth_at(0, 0), Some(f32::INFINITY));
        assert_eq!(fb.get_pixel(2, 1), Some(Vector3::new(0.2, 0.4, 0.6)));
    }

    #[test]
    fn rgba_export_clamps_channels() {
        let mut fb = FrameBuffer::new(1, 1, 1);
        fb.clear(Vector3::new(2.0, -1.0, 0.5), f32::INFINITY);
        assert_eq!(fb.to_rgba8(), vec![255, 0, 128, 255]);
    }

    #[test]
    fn parallel_writes_land_in_their_own_samples() {
        use rayon::prelude::*;

        let fb = FrameBuffer::new(32, 32, 1);
        (0..32usize).into_par_iter().for_each(|y| {
            for x in 0..32 {
                fb.set_pixel_safe(x, y, Vector3::new(x as f32, y as f32, 1.0));
            }
        });
        assert_eq!(fb.get_pixel(5, 17), Some(Vector3::new(5.0, 17.0, 1.0)));
        assert_eq!(fb.get_pixel(31, 0), Some(Vector3::new(31.0, 0.0, 1.0)));
    }

    #[test]
    fn resize_only_reallocates_on_change() {
        let mut fb = FrameBuffer::new(4, 4, 2);
        assert!(!fb.resize(4, 4));
        assert!(fb.resize(8, 2));
        assert_eq!((fb.buffer_width, fb.buffer_height), (16, 4));
    }
}
