use std::mem::offset_of;

use cohort::{align_of_all, align_up, offset_in, size_of_all, Aggregate, Extent, FieldAt, FieldList};

#[test]
fn align_up_rounds_to_power_of_two_multiples() {
    assert_eq!(align_up(0, 1), 0);
    assert_eq!(align_up(0, 8), 0);
    assert_eq!(align_up(1, 8), 8);
    assert_eq!(align_up(8, 8), 8);
    assert_eq!(align_up(9, 8), 16);
    assert_eq!(align_up(17, 4), 20);
}

#[test]
#[should_panic(expected = "power of two")]
fn align_up_rejects_non_power_of_two_alignment() {
    align_up(4, 3);
}

#[test]
fn offsets_follow_struct_packing_recurrence() {
    // i32, u8, f64, u8: the f64 forces a 7-byte gap after the u8.
    type L = (i32, u8, f64, u8);
    let extents = <L as FieldList>::EXTENTS;

    assert_eq!(offset_in(extents, 0), 0);
    assert_eq!(offset_in(extents, 1), 4);
    assert_eq!(offset_in(extents, 2), 8);
    assert_eq!(offset_in(extents, 3), 16);
    assert_eq!(align_of_all(extents), 8);
    assert_eq!(size_of_all(extents), 24);
}

#[test]
fn offsets_match_the_equivalent_repr_c_struct() {
    #[repr(C)]
    struct Packed {
        a: u8,
        b: f64,
        c: u8,
    }

    type L = (u8, f64, u8);
    let extents = <L as FieldList>::EXTENTS;

    assert_eq!(offset_in(extents, 0), offset_of!(Packed, a));
    assert_eq!(offset_in(extents, 1), offset_of!(Packed, b));
    assert_eq!(offset_in(extents, 2), offset_of!(Packed, c));
    assert_eq!(size_of_all(extents), std::mem::size_of::<Packed>());
    assert_eq!(align_of_all(extents), std::mem::align_of::<Packed>());
}

#[test]
fn positional_offset_constants_agree_with_the_calculator() {
    type L = (u16, u64, u8, u32);
    let extents = <L as FieldList>::EXTENTS;

    assert_eq!(<L as FieldAt<0>>::OFFSET, offset_in(extents, 0));
    assert_eq!(<L as FieldAt<1>>::OFFSET, offset_in(extents, 1));
    assert_eq!(<L as FieldAt<2>>::OFFSET, offset_in(extents, 2));
    assert_eq!(<L as FieldAt<3>>::OFFSET, offset_in(extents, 3));
}

#[test]
fn single_field_list_adds_no_padding() {
    type L = (u64,);
    let extents = <L as FieldList>::EXTENTS;

    assert_eq!(offset_in(extents, 0), 0);
    assert_eq!(size_of_all(extents), std::mem::size_of::<u64>());
    assert_eq!(align_of_all(extents), std::mem::align_of::<u64>());
}

#[test]
fn empty_list_occupies_one_byte() {
    assert_eq!(size_of_all(&[]), 1);
    assert_eq!(align_of_all(&[]), 1);

    // The degenerate aggregate is still a real, droppable instance.
    let empty = Aggregate::<()>::default();
    assert_eq!(empty.field_count(), 0);
}

#[test]
fn zero_sized_fields_share_offsets_and_floor_the_block_size() {
    struct MarkerA;
    struct MarkerB;

    type L = (MarkerA, MarkerB);
    let extents = <L as FieldList>::EXTENTS;

    assert_eq!(offset_in(extents, 0), 0);
    assert_eq!(offset_in(extents, 1), 0);
    assert_eq!(size_of_all(extents), 1);
}

#[test]
fn extents_report_size_and_alignment_of_the_type() {
    let extent = Extent::of::<u64>();
    assert_eq!(extent.size, 8);
    assert_eq!(extent.align, 8);

    let explicit = Extent::new(12, 4);
    assert_eq!(explicit.size, 12);
    assert_eq!(explicit.align, 4);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "power of two")]
fn extent_construction_rejects_non_power_of_two_alignment() {
    Extent::new(4, 3);
}

#[test]
fn live_fields_are_stored_at_aligned_addresses() {
    let aggregate = Aggregate::<(u8, f64, u32)>::default();

    let (a, b, c) = aggregate.tie();
    assert_eq!(a as *const u8 as usize % std::mem::align_of::<u8>(), 0);
    assert_eq!(b as *const f64 as usize % std::mem::align_of::<f64>(), 0);
    assert_eq!(c as *const u32 as usize % std::mem::align_of::<u32>(), 0);

    // Declaration order maps to ascending addresses within one block.
    assert!((a as *const u8 as usize) < (b as *const f64 as usize));
    assert!((b as *const f64 as usize) < (c as *const u32 as usize));
}
