//! Pointer input for the particle field.
//!
//! The host writes pointer positions as they arrive; the field reads one
//! snapshot per frame. Both coordinates live in a single 64-bit atomic, so a
//! reader never sees the x of one event paired with the y of another, even
//! when the writer runs on a different thread.
//!
//! # Usage
//!
//! ```ignore
//! let pointer = field.pointer();
//!
//! // From an event handler, possibly on another thread:
//! pointer.set(Vec2::new(320.0, 180.0));
//!
//! // In the frame step:
//! let p = pointer.get();
//! ```

use glam::Vec2;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Pointer position reported before any pointer event has arrived.
///
/// Far enough off-screen that no particle reacts to it.
pub const POINTER_SENTINEL: Vec2 = Vec2::new(-1000.0, -1000.0);

/// Shared, lock-free pointer position.
///
/// Cloning the handle shares the underlying cell.
#[derive(Debug, Clone)]
pub struct PointerHandle {
    cell: Arc<AtomicU64>,
}

impl PointerHandle {
    /// Create a handle positioned at [`POINTER_SENTINEL`].
    pub fn new() -> Self {
        Self {
            cell: Arc::new(AtomicU64::new(pack(POINTER_SENTINEL))),
        }
    }

    /// Record a new pointer position.
    #[inline]
    pub fn set(&self, position: Vec2) {
        self.cell.store(pack(position), Ordering::Relaxed);
    }

    /// Read the most recent pointer position.
    #[inline]
    pub fn get(&self) -> Vec2 {
        unpack(self.cell.load(Ordering::Relaxed))
    }
}

impl Default for PointerHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn pack(position: Vec2) -> u64 {
    ((position.x.to_bits() as u64) << 32) | position.y.to_bits() as u64
}

#[inline]
fn unpack(bits: u64) -> Vec2 {
    Vec2::new(f32::from_bits((bits >> 32) as u32), f32::from_bits(bits as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_default_is_sentinel() {
        let pointer = PointerHandle::new();
        assert_eq!(pointer.get(), POINTER_SENTINEL);
    }

    #[test]
    fn test_set_and_get() {
        let pointer = PointerHandle::new();
        pointer.set(Vec2::new(-12.5, 640.25));
        assert_eq!(pointer.get(), Vec2::new(-12.5, 640.25));
    }

    #[test]
    fn test_clones_share_position() {
        let writer = PointerHandle::new();
        let reader = writer.clone();
        writer.set(Vec2::new(10.0, 20.0));
        assert_eq!(reader.get(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_no_torn_reads_across_threads() {
        let pointer = PointerHandle::new();
        let writer = pointer.clone();

        let handle = thread::spawn(move || {
            for i in 0..20_000 {
                let v = i as f32;
                writer.set(Vec2::new(v, v));
            }
        });

        for _ in 0..20_000 {
            let p = pointer.get();
            if p != POINTER_SENTINEL {
                assert_eq!(p.x, p.y);
            }
        }

        handle.join().unwrap();
    }
}
