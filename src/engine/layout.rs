//! Struct-packing layout computation for aggregate field lists.
//!
//! Given an ordered list of field [`Extent`]s (size and alignment pairs),
//! this module computes each field's byte offset and the total size and
//! alignment of the backing block, following ordinary struct-packing rules:
//!
//! ```text
//! offset(0) = 0
//! offset(i) = align_up(offset(i-1) + size(i-1), align(i))
//! total     = align_up(offset(n-1) + size(n-1), max_align)
//! ```
//!
//! ## Properties
//! - Every function here is a pure `const fn`: layouts are a function of the
//!   field type list alone and are folded into associated constants at
//!   type-definition time, before any aggregate instance exists.
//! - Irregular alignment runs (e.g. `u8, f64, u8`) are handled exactly like
//!   the compiler lays out a `repr(C)` struct; nothing assumes a uniform
//!   stride.
//! - The degenerate empty list yields a one-byte, align-1 block, so an empty
//!   aggregate is a legal (if trivial) instance.

use std::mem::{align_of, size_of};

/// Size and alignment of a single field type, in bytes.
///
/// The layout functions in this module operate on plain extents so that the
/// calculator stays independent of any particular field type or metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extent {
    /// Size of the field type in bytes.
    pub size: usize,

    /// Alignment of the field type in bytes. Always a power of two.
    pub align: usize,
}

impl Extent {
    /// Creates an extent from explicit size and alignment.
    ///
    /// ## Panics
    /// Panics in debug builds if `align` is not a power of two.
    #[inline]
    pub const fn new(size: usize, align: usize) -> Self {
        debug_assert!(align.is_power_of_two(), "alignment must be a power of two");
        Self { size, align }
    }

    /// The extent of type `T`.
    #[inline]
    pub const fn of<T>() -> Self {
        Self {
            size: size_of::<T>(),
            align: align_of::<T>(),
        }
    }
}

/// Rounds `offset` up to the next multiple of `align`.
///
/// ## Panics
/// Panics (at compile time when used in a constant) if `align` is not a
/// power of two.
#[inline]
pub const fn align_up(offset: usize, align: usize) -> usize {
    assert!(align.is_power_of_two(), "alignment must be a power of two");
    (offset + align - 1) & !(align - 1)
}

/// Byte offset of field `index` within a block laid out for `extents`.
///
/// Follows the struct-packing recurrence: each field starts at the previous
/// field's end, rounded up to its own alignment.
///
/// ## Panics
/// Panics if `index` is out of range for the list.
pub const fn offset_in(extents: &[Extent], index: usize) -> usize {
    assert!(index < extents.len(), "field index out of range for this field list");
    let mut offset = 0;
    let mut i = 1;
    while i <= index {
        offset = align_up(offset + extents[i - 1].size, extents[i].align);
        i += 1;
    }
    offset
}

/// Alignment of the whole block: the maximum field alignment, minimum 1.
pub const fn align_of_all(extents: &[Extent]) -> usize {
    let mut align = 1;
    let mut i = 0;
    while i < extents.len() {
        if extents[i].align > align {
            align = extents[i].align;
        }
        i += 1;
    }
    align
}

/// Total size of the block: the end of the last field rounded up to the
/// block alignment, and never smaller than one byte.
///
/// The one-byte floor keeps the empty (and all-zero-sized) aggregate a real
/// allocation with a well-defined non-zero size.
pub const fn size_of_all(extents: &[Extent]) -> usize {
    if extents.is_empty() {
        return 1;
    }
    let last = extents.len() - 1;
    let end = offset_in(extents, last) + extents[last].size;
    let size = align_up(end, align_of_all(extents));
    if size == 0 {
        1
    } else {
        size
    }
}
