//! Cluster dispatch — batch execution of one cluster's constraints.
//!
//! A cluster is a color class from [`crate::coloring`]: its members
//! reference pairwise-disjoint particles, so they may execute
//! concurrently with no synchronization. With the `parallel` feature
//! each cluster runs as a rayon batch; the `for_each` join is the
//! barrier between clusters, so cluster `k + 1` observes every write
//! from cluster `k`. Without the feature the batch degenerates to a
//! serial loop, which is trivially race-free.

use std::marker::PhantomData;

use glam::Vec3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Runs `kernel` once per constraint index in the cluster.
///
/// The kernel must only touch particles owned by its constraint —
/// that is exactly what the coloring invariant guarantees for members
/// of one cluster.
pub fn run_cluster<F>(indices: &[u32], kernel: F)
where
    F: Fn(usize) + Send + Sync,
{
    #[cfg(feature = "parallel")]
    {
        indices.par_iter().for_each(|&ci| kernel(ci as usize));
    }

    #[cfg(not(feature = "parallel"))]
    {
        for &ci in indices {
            kernel(ci as usize);
        }
    }
}

/// Shared mutable view of a slice for disjoint-index batch writes.
///
/// Constraint projection mutates particle buffers from every lane of
/// a cluster batch. The borrow checker cannot see that the lanes
/// touch disjoint indices, so this view hands out raw access and the
/// dispatcher's caller carries the proof obligation.
///
/// # Safety contract
///
/// Callers of [`SharedSliceMut::get`] / [`set`](SharedSliceMut::set)
/// must guarantee that no index is accessed from two lanes of the
/// same batch. For cluster dispatch this holds because no two
/// constraints in a cluster share a particle, and each lane owns
/// exactly one constraint.
#[derive(Clone, Copy)]
pub struct SharedSliceMut<'a, T> {
    ptr: *mut T,
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}

unsafe impl<T: Send> Send for SharedSliceMut<'_, T> {}
unsafe impl<T: Send> Sync for SharedSliceMut<'_, T> {}

impl<'a, T: Copy> SharedSliceMut<'a, T> {
    /// Wraps an exclusive slice borrow.
    pub fn new(slice: &'a mut [T]) -> Self {
        Self {
            ptr: slice.as_mut_ptr(),
            len: slice.len(),
            _marker: PhantomData,
        }
    }

    /// Reads element `i`.
    ///
    /// # Safety
    /// `i` must be in bounds and not concurrently written by another
    /// lane of the same batch.
    #[inline]
    pub unsafe fn get(&self, i: usize) -> T {
        debug_assert!(i < self.len);
        *self.ptr.add(i)
    }

    /// Writes element `i`.
    ///
    /// # Safety
    /// `i` must be in bounds and not concurrently accessed by another
    /// lane of the same batch.
    #[inline]
    pub unsafe fn set(&self, i: usize, value: T) {
        debug_assert!(i < self.len);
        *self.ptr.add(i) = value;
    }
}

/// Shared mutable view of the three position channels.
#[derive(Clone, Copy)]
pub struct ParticleView<'a> {
    x: SharedSliceMut<'a, f32>,
    y: SharedSliceMut<'a, f32>,
    z: SharedSliceMut<'a, f32>,
}

impl<'a> ParticleView<'a> {
    /// Wraps exclusive borrows of the SoA position channels.
    pub fn new(x: &'a mut [f32], y: &'a mut [f32], z: &'a mut [f32]) -> Self {
        Self {
            x: SharedSliceMut::new(x),
            y: SharedSliceMut::new(y),
            z: SharedSliceMut::new(z),
        }
    }

    /// Reads the position of particle `i`.
    ///
    /// # Safety
    /// Same disjointness contract as [`SharedSliceMut::get`].
    #[inline]
    pub unsafe fn get(&self, i: usize) -> Vec3 {
        Vec3::new(self.x.get(i), self.y.get(i), self.z.get(i))
    }

    /// Adds `delta` to the position of particle `i`.
    ///
    /// # Safety
    /// Same disjointness contract as [`SharedSliceMut::set`].
    #[inline]
    pub unsafe fn add(&self, i: usize, delta: Vec3) {
        self.x.set(i, self.x.get(i) + delta.x);
        self.y.set(i, self.y.get(i) + delta.y);
        self.z.set(i, self.z.get(i) + delta.z);
    }
}
