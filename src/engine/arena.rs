//! Exclusive raw storage block for one aggregate instance.
//!
//! The arena is the single place in the crate that performs allocation and
//! raw pointer arithmetic. It owns exactly one heap block, sized and aligned
//! by the layout calculator, and hands out interior pointers through a
//! bounds-checked accessor (`debug_assert` in debug builds, free in release).
//!
//! ## Invariants
//! - The block never relocates for the arena's lifetime; every pointer
//!   derived from `base()` stays valid until the arena is dropped.
//! - The arena does not know what lives in the block. Running field
//!   destructors before the block is released is the aggregate's job.
//! - The arena is exclusively owned; it is neither `Send` nor `Sync`.

use std::alloc::{self, handle_alloc_error, Layout};
use std::ptr::NonNull;

pub(crate) struct Arena {
    base: NonNull<u8>,
    layout: Layout,
}

impl Arena {
    /// Allocates a block of `size` bytes aligned to `align`.
    ///
    /// ## Panics
    /// Panics if the size/alignment pair is not representable as an
    /// allocation layout; aborts via `handle_alloc_error` if the allocator
    /// fails.
    pub(crate) fn with_extent(size: usize, align: usize) -> Self {
        let layout = match Layout::from_size_align(size, align) {
            Ok(layout) => layout,
            Err(_) => panic!("aggregate layout of {size} bytes aligned to {align} is not representable"),
        };
        // The layout calculator floors block sizes at one byte, so a
        // zero-size allocation can never be requested here.
        debug_assert!(layout.size() > 0);
        let base = unsafe { alloc::alloc(layout) };
        let Some(base) = NonNull::new(base) else {
            handle_alloc_error(layout)
        };
        Self { base, layout }
    }

    /// Base pointer of the block.
    #[inline]
    pub(crate) fn base(&self) -> NonNull<u8> {
        self.base
    }

    /// Pointer to `size` bytes at `offset` within the block.
    ///
    /// ## Safety
    /// `offset + size` must lie within the block. Offsets produced by the
    /// layout calculator for this arena's field list always satisfy this;
    /// the bound is re-checked in debug builds.
    #[inline]
    pub(crate) unsafe fn at(&self, offset: usize, size: usize) -> *mut u8 {
        debug_assert!(
            offset.checked_add(size).map_or(false, |end| end <= self.layout.size()),
            "arena access out of bounds: offset {} + size {} exceeds block of {} bytes",
            offset,
            size,
            self.layout.size()
        );
        unsafe { self.base.as_ptr().add(offset) }
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        // Matching layout: same value the block was allocated with.
        unsafe { alloc::dealloc(self.base.as_ptr(), self.layout) };
    }
}
