//! The dependency-ordered aggregate: fixed-field, offset-addressed,
//! factory-constructed heterogeneous storage.
//!
//! An [`Aggregate<L>`] owns one contiguous block holding every field of the
//! list `L` at struct-packed offsets, with no per-field heap indirection.
//! Its defining feature is *staged construction*: fields are built strictly
//! in declaration order, and the factory for field *k* receives a
//! [`Partial`] view through which it can read fields `0..k` — already live —
//! and take stable [`Sibling`] handles into them. Destruction runs in the
//! exact reverse order, so a later field may still use its sibling handles
//! inside its own destructor.
//!
//! # Construction states
//!
//! An instance passes through the states
//!
//! ```text
//! Uninitialized -> Constructing (fields [0, k) live)
//!               -> Live
//!               -> Destructing (fields [k, n) live, descending)
//!               -> Destroyed
//! ```
//!
//! modeled explicitly: [`BuildSite`] is the `Constructing` state (it tracks
//! the live prefix), [`Aggregate`] is `Live`, and `Drop` is `Destructing`.
//! No access is possible outside `Live` except the prefix reads the
//! `Partial` view deliberately grants.
//!
//! # Invariants
//!
//! - **Prefix rule:** during construction, fields `[0, live)` are fully
//!   constructed and fields `[live, n)` are uninitialized storage. Every
//!   accessor checks against `live` before touching memory.
//! - **Stability rule:** the backing block never relocates. The owning
//!   handle may move, but field storage is pinned, so sibling handles stay
//!   valid for the aggregate's whole lifetime.
//! - **Teardown rule:** fields are destroyed in strictly descending index
//!   order, both on normal drop and when a factory panics mid-construction.
//!   Only live fields are destroyed; nothing is leaked or dropped twice.
//!
//! # Ownership
//!
//! The aggregate exclusively owns its storage and every field in it. It is
//! not `Clone`, and (holding a raw block pointer) it is neither `Send` nor
//! `Sync` — the framework is single-threaded by design. Sibling handles are
//! the one sanctioned form of aliasing, and they are valid exactly as long
//! as the owning aggregate is alive.
//!
//! # Safety
//!
//! All `unsafe` in this module reduces to the prefix, stability, and
//! teardown rules above plus the layout metadata guaranteed by the
//! [`FieldList`]/[`FieldAt`] implementations. Raw pointer arithmetic itself
//! lives behind the bounds-checked arena accessor.

use std::any::{type_name, TypeId};
use std::marker::PhantomData;
use std::mem::{size_of, ManuallyDrop};
use std::ptr::{self, NonNull};

use crate::engine::arena::Arena;
use crate::engine::error::{
    AccessError, FieldUnconstructedError, IncompleteBuildError, MissingFieldTypeError,
    StageOrderError,
};
use crate::engine::field::{FieldAt, FieldList};
use crate::engine::layout::{align_of_all, offset_in, size_of_all};

/// One factory per field, applied in declaration order.
///
/// Implemented for tuples of closures whose arity matches the field list:
/// factory *i* is an `FnOnce(&Partial<L>) -> T[i]`, receiving the view of
/// fields `0..i` by shared reference. An arity mismatch or a factory
/// yielding the wrong type is a compile error, not a runtime failure.
pub trait FactorySet<L: FieldList> {
    /// Runs every factory against `site`, in declaration order.
    fn build_into(self, site: &mut BuildSite<L>);
}

/// Fixed-field heterogeneous store with factory-driven, dependency-ordered
/// construction.
///
/// See the module docs for the storage model and invariants. Typical
/// construction goes through [`Aggregate::from_factories`]; a `Default`
/// impl exists when every field type is `Default`.
pub struct Aggregate<L: FieldList> {
    arena: Arena,
    _fields: PhantomData<L>,
}

impl<L: FieldList> Aggregate<L> {
    /// Number of fields in the list.
    #[inline]
    pub fn field_count(&self) -> usize {
        L::FIELDS.len()
    }

    /// Constructs every field in declaration order from `factories`.
    ///
    /// Factory *i* receives a [`Partial`] view exposing fields `0..i`. If a
    /// factory panics, the fields already live are destroyed in reverse
    /// order, the storage is released, and the panic propagates.
    pub fn from_factories<F: FactorySet<L>>(factories: F) -> Self {
        let mut site = BuildSite::new();
        factories.build_into(&mut site);
        site.finish()
    }

    /// Raw pointer to field `I`.
    ///
    /// ## Safety
    /// The caller must not use the pointer to create aliasing references.
    /// The field itself is always live for the aggregate's lifetime.
    #[inline]
    unsafe fn slot<const I: usize>(&self) -> *mut <L as FieldAt<I>>::Type
    where
        L: FieldAt<I>,
    {
        let offset = <L as FieldAt<I>>::OFFSET;
        let size = size_of::<<L as FieldAt<I>>::Type>();
        unsafe { self.arena.at(offset, size).cast() }
    }

    /// Shared reference to the field at position `I`.
    ///
    /// Out-of-range indices do not compile (`L: FieldAt<I>` is unsatisfied).
    #[inline]
    pub fn get<const I: usize>(&self) -> &<L as FieldAt<I>>::Type
    where
        L: FieldAt<I>,
    {
        // Field I is live for the whole lifetime of a finished aggregate.
        unsafe { &*self.slot::<I>() }
    }

    /// Mutable reference to the field at position `I`.
    #[inline]
    pub fn get_mut<const I: usize>(&mut self) -> &mut <L as FieldAt<I>>::Type
    where
        L: FieldAt<I>,
    {
        unsafe { &mut *self.slot::<I>() }
    }

    /// Shared reference to the first field of type `T`, if any.
    ///
    /// When the field list repeats a type, the first match wins by
    /// convention; use positional access for the rest.
    pub fn try_field<T: 'static>(&self) -> Option<&T> {
        let target = TypeId::of::<T>();
        for (index, meta) in L::FIELDS.iter().enumerate() {
            if meta.type_id() == target {
                let offset = offset_in(L::EXTENTS, index);
                // Type just verified against the field metadata.
                return Some(unsafe { &*self.arena.at(offset, meta.size()).cast::<T>() });
            }
        }
        None
    }

    /// Mutable reference to the first field of type `T`, if any.
    pub fn try_field_mut<T: 'static>(&mut self) -> Option<&mut T> {
        let target = TypeId::of::<T>();
        for (index, meta) in L::FIELDS.iter().enumerate() {
            if meta.type_id() == target {
                let offset = offset_in(L::EXTENTS, index);
                return Some(unsafe { &mut *self.arena.at(offset, meta.size()).cast::<T>() });
            }
        }
        None
    }

    /// Shared reference to the first field of type `T`.
    ///
    /// ## Panics
    /// Panics if no field of type `T` exists in the list.
    pub fn field<T: 'static>(&self) -> &T {
        match self.try_field::<T>() {
            Some(value) => value,
            None => panic!("{}", MissingFieldTypeError { requested: type_name::<T>() }),
        }
    }

    /// Mutable reference to the first field of type `T`.
    ///
    /// ## Panics
    /// Panics if no field of type `T` exists in the list.
    pub fn field_mut<T: 'static>(&mut self) -> &mut T {
        match self.try_field_mut::<T>() {
            Some(value) => value,
            None => panic!("{}", MissingFieldTypeError { requested: type_name::<T>() }),
        }
    }

    /// Flat tuple of references to every field, in declaration order.
    ///
    /// Useful for bulk inspection and testing.
    pub fn tie(&self) -> L::Refs<'_> {
        // Every field of a finished aggregate is live.
        unsafe { L::tie(self.arena.base()) }
    }
}

impl<L: FieldList> Drop for Aggregate<L> {
    fn drop(&mut self) {
        // Reverse declaration order: later fields may hold sibling handles
        // into earlier fields and may still use them while being dropped.
        let mut index = L::FIELDS.len();
        while index > 0 {
            index -= 1;
            let meta = &L::FIELDS[index];
            let offset = offset_in(L::EXTENTS, index);
            unsafe { meta.drop_in(self.arena.at(offset, meta.size())) };
        }
        // The arena releases the block after the last destructor ran.
    }
}

/// The `Constructing` state of an aggregate: fields `[0, live)` are built,
/// the rest is uninitialized storage.
///
/// A build site accepts exactly one [`emplace`](BuildSite::emplace) per
/// stage, in declaration order, and hands out the finished aggregate via
/// [`finish`](BuildSite::finish). Dropping a site midway — the factory
/// panic path — destroys the live prefix in reverse order and releases the
/// storage, so a failed construction never leaks a field or drops one
/// twice.
pub struct BuildSite<L: FieldList> {
    arena: ManuallyDrop<Arena>,
    live: usize,
    _fields: PhantomData<L>,
}

impl<L: FieldList> BuildSite<L> {
    /// Allocates storage for the field list and starts at stage 0.
    pub fn new() -> Self {
        let arena = Arena::with_extent(size_of_all(L::EXTENTS), align_of_all(L::EXTENTS));
        Self {
            arena: ManuallyDrop::new(arena),
            live: 0,
            _fields: PhantomData,
        }
    }

    /// Number of fields constructed so far.
    #[inline]
    pub fn live(&self) -> usize {
        self.live
    }

    /// View of the live prefix, as handed to the next factory.
    ///
    /// The view is valid only while this site (or the aggregate it turns
    /// into) keeps the storage alive, so it stays crate-internal; factories
    /// receive it by shared reference for the duration of their call.
    pub(crate) fn partial(&self) -> Partial<L> {
        Partial {
            base: self.arena.base(),
            live: self.live,
            _list: PhantomData,
        }
    }

    /// Moves `value` into the slot for field `I`, making it live.
    ///
    /// ## Panics
    /// Panics unless called at stage `I` exactly: stages run in declaration
    /// order, one emplacement each.
    pub fn emplace<const I: usize>(&mut self, value: <L as FieldAt<I>>::Type)
    where
        L: FieldAt<I>,
    {
        if self.live != I {
            panic!("{}", StageOrderError { expected: self.live, actual: I });
        }
        let offset = <L as FieldAt<I>>::OFFSET;
        let size = size_of::<<L as FieldAt<I>>::Type>();
        // Slot I is in bounds and uninitialized at stage I.
        unsafe { ptr::write(self.arena.at(offset, size).cast(), value) };
        self.live = I + 1;
    }

    /// Completes construction, yielding the live aggregate.
    ///
    /// ## Panics
    /// Panics unless every field has been emplaced.
    pub fn finish(mut self) -> Aggregate<L> {
        if self.live != L::FIELDS.len() {
            panic!(
                "{}",
                IncompleteBuildError { live: self.live, expected: L::FIELDS.len() }
            );
        }
        // Ownership of the arena moves into the aggregate; the site's
        // teardown Drop must not run afterwards.
        let arena = unsafe { ManuallyDrop::take(&mut self.arena) };
        std::mem::forget(self);
        Aggregate { arena, _fields: PhantomData }
    }
}

impl<L: FieldList> Default for BuildSite<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: FieldList> Drop for BuildSite<L> {
    fn drop(&mut self) {
        // Construction failed or was abandoned: tear down the live prefix
        // in reverse order, exactly as a finished aggregate would.
        let mut index = self.live;
        while index > 0 {
            index -= 1;
            let meta = &L::FIELDS[index];
            let offset = offset_in(L::EXTENTS, index);
            unsafe { meta.drop_in(self.arena.at(offset, meta.size())) };
        }
        // Storage goes last: fields must be dead before the block is freed.
        unsafe { ManuallyDrop::drop(&mut self.arena) };
    }
}

/// Read-only view of a partially-constructed aggregate.
///
/// This is what a field factory receives, by shared reference: access to
/// fields `[0, live)` — the ones already built — and nothing else. Reading a
/// later field is rejected loudly before any memory is touched; it can never
/// observe uninitialized storage.
///
/// Instances are created only by the build site and last for one factory
/// call; the view is neither clonable nor constructible by callers, and
/// everything borrowed through it is pinned to that call's borrow.
pub struct Partial<L: FieldList> {
    base: NonNull<u8>,
    live: usize,
    _list: PhantomData<L>,
}

impl<L: FieldList> Partial<L> {
    /// Number of fields constructed so far.
    #[inline]
    pub fn live(&self) -> usize {
        self.live
    }

    /// Pointer to `size` bytes at `offset`, with the same debug-build
    /// bounds check as the arena accessor.
    ///
    /// ## Safety
    /// `offset + size` must lie within the block laid out for `L`.
    #[inline]
    unsafe fn at(&self, offset: usize, size: usize) -> *mut u8 {
        let block = size_of_all(L::EXTENTS);
        debug_assert!(
            offset.checked_add(size).map_or(false, |end| end <= block),
            "partial view access out of bounds: offset {} + size {} exceeds block of {} bytes",
            offset,
            size,
            block
        );
        unsafe { self.base.as_ptr().add(offset) }
    }

    /// Shared reference to the field at position `I`, if it is live.
    pub fn try_get<const I: usize>(
        &self,
    ) -> Result<&<L as FieldAt<I>>::Type, FieldUnconstructedError>
    where
        L: FieldAt<I>,
    {
        if I >= self.live {
            return Err(FieldUnconstructedError { index: I, live: self.live });
        }
        // Fields below `live` are fully constructed.
        let size = size_of::<<L as FieldAt<I>>::Type>();
        let slot = unsafe { self.at(<L as FieldAt<I>>::OFFSET, size) };
        Ok(unsafe { &*slot.cast() })
    }

    /// Shared reference to the field at position `I`.
    ///
    /// ## Panics
    /// Panics if field `I` has not been constructed yet.
    pub fn get<const I: usize>(&self) -> &<L as FieldAt<I>>::Type
    where
        L: FieldAt<I>,
    {
        match self.try_get::<I>() {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }

    /// Shared reference to the first live field of type `T`.
    pub fn try_field<T: 'static>(&self) -> Result<&T, AccessError> {
        let target = TypeId::of::<T>();
        for (index, meta) in L::FIELDS.iter().enumerate() {
            if meta.type_id() == target {
                if index >= self.live {
                    return Err(FieldUnconstructedError { index, live: self.live }.into());
                }
                let offset = offset_in(L::EXTENTS, index);
                return Ok(unsafe { &*self.at(offset, meta.size()).cast::<T>() });
            }
        }
        Err(MissingFieldTypeError { requested: type_name::<T>() }.into())
    }

    /// Shared reference to the first field of type `T`.
    ///
    /// ## Panics
    /// Panics if no live field of type `T` exists.
    pub fn field<T: 'static>(&self) -> &T {
        match self.try_field::<T>() {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }

    /// Stable handle to the already-constructed field at position `I`.
    ///
    /// This is the sanctioned way for a later field to keep a long-lived
    /// back-reference into an earlier one: the handle stays valid for the
    /// owning aggregate's entire lifetime (field storage never relocates),
    /// including while later fields are being destroyed.
    ///
    /// ## Panics
    /// Panics if field `I` has not been constructed yet.
    ///
    /// ## Safety
    /// The returned handle must be stored only inside a later field of the
    /// same aggregate and never used after that aggregate is destroyed.
    /// Mutable access through the handle must not overlap any other borrow
    /// of the same field; the sequential update dispatch upholds this when
    /// handles are used from a component's `update`.
    pub unsafe fn sibling<const I: usize>(&self) -> Sibling<<L as FieldAt<I>>::Type>
    where
        L: FieldAt<I>,
    {
        if I >= self.live {
            panic!("{}", FieldUnconstructedError { index: I, live: self.live });
        }
        // The pointer is derived from the block's base, never from a shared
        // reference, so the handle keeps write provenance for get_mut.
        let size = size_of::<<L as FieldAt<I>>::Type>();
        let slot = unsafe { self.at(<L as FieldAt<I>>::OFFSET, size) };
        Sibling {
            target: unsafe { NonNull::new_unchecked(slot.cast()) },
        }
    }
}

/// Stable pointer to a sibling field within the same aggregate.
///
/// Created through [`Partial::sibling`], whose contract guarantees the
/// target outlives the holder: the target field sits *earlier* in the same
/// aggregate, storage never relocates, and teardown runs in reverse order.
pub struct Sibling<T> {
    target: NonNull<T>,
}

impl<T> Sibling<T> {
    /// Shared reference to the sibling field.
    #[inline]
    pub fn get(&self) -> &T {
        // Valid per the Partial::sibling contract: the target field outlives
        // the holder of this handle.
        unsafe { self.target.as_ref() }
    }

    /// Mutable reference to the sibling field.
    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        unsafe { self.target.as_mut() }
    }
}
