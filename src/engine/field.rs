//! Field metadata and compile-time field-list descriptions.
//!
//! An aggregate's shape is a Rust tuple type `(T0, .., Tn-1)`. This module
//! defines the traits that describe such a tuple to the aggregate machinery:
//!
//! - [`FieldList`] exposes per-field layout extents and type-erased metadata
//!   as associated constants, computed at type-definition time.
//! - [`FieldAt<I>`] carries the type and const-evaluated byte offset of the
//!   field at position `I`; positional access is bounds-checked at compile
//!   time simply by requiring the bound.
//!
//! Both traits are `unsafe` to implement because unsafe aggregate code
//! trusts their metadata to match the tuple exactly. Implementations are
//! macro-generated for tuples of up to eight fields (see `engine::tuples`);
//! extend the macro table there if a wider aggregate is ever needed.

use std::any::{type_name, TypeId};
use std::ptr::NonNull;

use crate::engine::layout::{offset_in, Extent};

/// Drops the value of type `T` stored at `slot`.
///
/// ## Safety
/// `slot` must point to a live, exclusively-accessed value of type `T`.
unsafe fn drop_erased<T>(slot: *mut u8) {
    unsafe { std::ptr::drop_in_place(slot.cast::<T>()) }
}

/// Type-erased metadata for one field of an aggregate.
///
/// Bundles the field's layout extent with the hooks needed to identify and
/// destroy it without knowing its type: the `TypeId` for typed lookup, the
/// type name for diagnostics, and the drop glue for reverse-order teardown.
/// Constructed in constant context, so the identity hooks are stored as
/// function pointers rather than eagerly-evaluated values.
#[derive(Clone, Copy)]
pub struct FieldMeta {
    extent: Extent,
    type_id: fn() -> TypeId,
    type_name: fn() -> &'static str,
    drop: unsafe fn(*mut u8),
}

impl FieldMeta {
    /// Metadata for field type `T`.
    pub const fn of<T: 'static>() -> Self {
        Self {
            extent: Extent::of::<T>(),
            type_id: TypeId::of::<T>,
            type_name: type_name::<T>,
            drop: drop_erased::<T>,
        }
    }

    /// Runtime `TypeId` of the field type.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    /// Rust type name of the field type, for diagnostics.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Size of the field type in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.extent.size
    }

    /// Alignment of the field type in bytes.
    #[inline]
    pub fn align(&self) -> usize {
        self.extent.align
    }

    /// Runs the field type's destructor on the value at `slot`.
    ///
    /// ## Safety
    /// `slot` must point to a live, exclusively-accessed value of the
    /// described type, and the value must not be used afterwards.
    pub(crate) unsafe fn drop_in(&self, slot: *mut u8) {
        unsafe { (self.drop)(slot) }
    }
}

/// Compile-time description of an aggregate's ordered field list.
///
/// Implemented for tuples `()` through eight fields. The field list is fixed
/// for the lifetime of the aggregate *type*: nothing can be added or removed
/// after definition, which is what lets the layout fold into constants.
///
/// ## Safety
/// `EXTENTS` and `FIELDS` must describe exactly the tuple's element types,
/// in declaration order, and `tie` must produce references at the offsets
/// the layout calculator derives from `EXTENTS`. Aggregate storage code
/// relies on this correspondence for every read, write, and drop.
pub unsafe trait FieldList: Sized + 'static {
    /// Layout extents, one per field, in declaration order.
    const EXTENTS: &'static [Extent];

    /// Type and drop metadata, one per field, in declaration order.
    const FIELDS: &'static [FieldMeta];

    /// Flat tuple of shared references to every field, declaration order.
    type Refs<'a>
    where
        Self: 'a;

    /// Builds the tied view over a fully-constructed block.
    ///
    /// ## Safety
    /// `base` must point at a block laid out for this field list in which
    /// every field is constructed and live for `'a`.
    #[doc(hidden)]
    unsafe fn tie<'a>(base: NonNull<u8>) -> Self::Refs<'a>;
}

/// Positional access to field `I` of a field list.
///
/// The bound `L: FieldAt<I>` only exists for in-range indices, so an
/// out-of-range positional access is a compile error rather than a runtime
/// check.
///
/// ## Safety
/// `Type` must be the `I`-th element type of the tuple; `OFFSET` must be its
/// byte offset under the layout recurrence.
pub unsafe trait FieldAt<const I: usize>: FieldList {
    /// The field's type.
    type Type: 'static;

    /// Byte offset of the field within the aggregate block.
    const OFFSET: usize = offset_in(Self::EXTENTS, I);
}
