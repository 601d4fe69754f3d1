//! Macro-generated trait implementations for field tuples.
//!
//! One invocation per arity wires a tuple type `(T0, .., Tn-1)` into the
//! whole framework: [`FieldList`] and [`FieldAt`] for layout and positional
//! access, [`FactorySet`] for the matching tuple of factory closures,
//! `Default` for [`Aggregate`]s of defaultable fields, and
//! [`ComponentList`] dispatch bodies when every field is a component.
//!
//! Arities 0 through 8 are generated. Widening the table means adding one
//! more invocation at the bottom of this file.
//!
//! Each per-field entry in an invocation repeats the full identifier list
//! so the generated `FieldAt` impls and factory bounds can name the
//! complete tuple type from within the per-field repetition.

use std::ptr::NonNull;

use crate::engine::aggregate::{Aggregate, BuildSite, FactorySet, Partial};
use crate::engine::component::{Component, FrameTarget};
use crate::engine::composite::ComponentList;
use crate::engine::dispatch::{draw_member, update_member};
use crate::engine::field::{FieldAt, FieldList, FieldMeta};
use crate::engine::layout::Extent;

macro_rules! impl_field_tuple {
    (
        ($($T:ident),*);
        ($($F:ident),*);
        ($($f:ident),*);
        $(($Ti:ident, $Fi:ident, $fi:ident, $idx:tt, ($($Each:ident),*)))*
    ) => {
        unsafe impl<$($T: 'static),*> FieldList for ($($T,)*) {
            const EXTENTS: &'static [Extent] = &[$(Extent::of::<$T>()),*];
            const FIELDS: &'static [FieldMeta] = &[$(FieldMeta::of::<$T>()),*];

            type Refs<'a> = ($(&'a $T,)*) where Self: 'a;

            unsafe fn tie<'a>(_base: NonNull<u8>) -> Self::Refs<'a> {
                ($(
                    // Caller guarantees every field is constructed and live
                    // for 'a at the offsets this list describes.
                    unsafe {
                        &*_base
                            .as_ptr()
                            .add(<Self as FieldAt<$idx>>::OFFSET)
                            .cast::<$Ti>()
                    },
                )*)
            }
        }

        $(
            unsafe impl<$($Each: 'static),*> FieldAt<$idx> for ($($Each,)*) {
                type Type = $Ti;
            }
        )*

        impl<$($T,)* $($F),*> FactorySet<($($T,)*)> for ($($F,)*)
        where
            $($T: 'static,)*
            $($Fi: FnOnce(&Partial<($($Each,)*)>) -> $Ti,)*
        {
            #[allow(unused_variables)]
            fn build_into(self, site: &mut BuildSite<($($T,)*)>) {
                let ($($f,)*) = self;
                $(
                    let value = {
                        let partial = site.partial();
                        $fi(&partial)
                    };
                    site.emplace::<$idx>(value);
                )*
            }
        }

        impl<$($T: Default + 'static),*> Default for Aggregate<($($T,)*)> {
            fn default() -> Self {
                #[allow(unused_mut)]
                let mut site = BuildSite::<($($T,)*)>::new();
                $(
                    site.emplace::<$idx>(<$Ti as Default>::default());
                )*
                site.finish()
            }
        }

        impl<$($T: Component),*> ComponentList for ($($T,)*) {
            #[allow(unused_variables)]
            fn update_all(parts: &mut Aggregate<Self>, dt: f32) {
                $(
                    update_member(parts.get_mut::<$idx>(), dt);
                )*
            }

            #[allow(unused_variables)]
            fn draw_all(parts: &Aggregate<Self>, target: &mut dyn FrameTarget) {
                $(
                    draw_member(parts.get::<$idx>(), target);
                )*
            }
        }
    };
}

impl_field_tuple! {
    ();
    ();
    ();
}

impl_field_tuple! {
    (T0);
    (F0);
    (f0);
    (T0, F0, f0, 0, (T0))
}

impl_field_tuple! {
    (T0, T1);
    (F0, F1);
    (f0, f1);
    (T0, F0, f0, 0, (T0, T1))
    (T1, F1, f1, 1, (T0, T1))
}

impl_field_tuple! {
    (T0, T1, T2);
    (F0, F1, F2);
    (f0, f1, f2);
    (T0, F0, f0, 0, (T0, T1, T2))
    (T1, F1, f1, 1, (T0, T1, T2))
    (T2, F2, f2, 2, (T0, T1, T2))
}

impl_field_tuple! {
    (T0, T1, T2, T3);
    (F0, F1, F2, F3);
    (f0, f1, f2, f3);
    (T0, F0, f0, 0, (T0, T1, T2, T3))
    (T1, F1, f1, 1, (T0, T1, T2, T3))
    (T2, F2, f2, 2, (T0, T1, T2, T3))
    (T3, F3, f3, 3, (T0, T1, T2, T3))
}

impl_field_tuple! {
    (T0, T1, T2, T3, T4);
    (F0, F1, F2, F3, F4);
    (f0, f1, f2, f3, f4);
    (T0, F0, f0, 0, (T0, T1, T2, T3, T4))
    (T1, F1, f1, 1, (T0, T1, T2, T3, T4))
    (T2, F2, f2, 2, (T0, T1, T2, T3, T4))
    (T3, F3, f3, 3, (T0, T1, T2, T3, T4))
    (T4, F4, f4, 4, (T0, T1, T2, T3, T4))
}

impl_field_tuple! {
    (T0, T1, T2, T3, T4, T5);
    (F0, F1, F2, F3, F4, F5);
    (f0, f1, f2, f3, f4, f5);
    (T0, F0, f0, 0, (T0, T1, T2, T3, T4, T5))
    (T1, F1, f1, 1, (T0, T1, T2, T3, T4, T5))
    (T2, F2, f2, 2, (T0, T1, T2, T3, T4, T5))
    (T3, F3, f3, 3, (T0, T1, T2, T3, T4, T5))
    (T4, F4, f4, 4, (T0, T1, T2, T3, T4, T5))
    (T5, F5, f5, 5, (T0, T1, T2, T3, T4, T5))
}

impl_field_tuple! {
    (T0, T1, T2, T3, T4, T5, T6);
    (F0, F1, F2, F3, F4, F5, F6);
    (f0, f1, f2, f3, f4, f5, f6);
    (T0, F0, f0, 0, (T0, T1, T2, T3, T4, T5, T6))
    (T1, F1, f1, 1, (T0, T1, T2, T3, T4, T5, T6))
    (T2, F2, f2, 2, (T0, T1, T2, T3, T4, T5, T6))
    (T3, F3, f3, 3, (T0, T1, T2, T3, T4, T5, T6))
    (T4, F4, f4, 4, (T0, T1, T2, T3, T4, T5, T6))
    (T5, F5, f5, 5, (T0, T1, T2, T3, T4, T5, T6))
    (T6, F6, f6, 6, (T0, T1, T2, T3, T4, T5, T6))
}

impl_field_tuple! {
    (T0, T1, T2, T3, T4, T5, T6, T7);
    (F0, F1, F2, F3, F4, F5, F6, F7);
    (f0, f1, f2, f3, f4, f5, f6, f7);
    (T0, F0, f0, 0, (T0, T1, T2, T3, T4, T5, T6, T7))
    (T1, F1, f1, 1, (T0, T1, T2, T3, T4, T5, T6, T7))
    (T2, F2, f2, 2, (T0, T1, T2, T3, T4, T5, T6, T7))
    (T3, F3, f3, 3, (T0, T1, T2, T3, T4, T5, T6, T7))
    (T4, F4, f4, 4, (T0, T1, T2, T3, T4, T5, T6, T7))
    (T5, F5, f5, 5, (T0, T1, T2, T3, T4, T5, T6, T7))
    (T6, F6, f6, 6, (T0, T1, T2, T3, T4, T5, T6, T7))
    (T7, F7, f7, 7, (T0, T1, T2, T3, T4, T5, T6, T7))
}
