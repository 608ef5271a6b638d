//! Scalar element trait
//!
//! [`Element`] is implemented for every storage kind an [`NdArray`] can hold.
//! Conversions between kinds follow C cast semantics: floating-point values
//! are truncated toward zero and saturate at the integer range, NaN becomes
//! zero.

use crate::array::NdArray;
use crate::dtype::DType;
use ndarray::ArrayD;
use num_traits::{AsPrimitive, WrappingAdd, WrappingSub, Zero};
use std::cmp::Ordering;
use std::fmt;

/// A scalar that can be stored in an [`NdArray`].
pub trait Element: Copy + Default + PartialOrd + Send + Sync + fmt::Debug + 'static {
    /// Storage kind of this element type
    const DTYPE: DType;

    /// Widen to `f64`.
    fn to_f64(self) -> f64;

    /// Narrow from `f64`, truncating toward zero and saturating.
    fn from_f64(value: f64) -> Self;

    /// Truthiness (non-zero, NaN included).
    fn is_nonzero(self) -> bool;

    /// Total order used by order-statistic selection.
    fn order(&self, other: &Self) -> Ordering;

    /// Addition that wraps on integer overflow.
    fn wrapping_add(self, rhs: Self) -> Self;

    /// Subtraction that wraps on integer overflow.
    fn wrapping_sub(self, rhs: Self) -> Self;

    /// Wrap a typed array into the matching [`NdArray`] variant.
    fn into_nd(array: ArrayD<Self>) -> NdArray;

    /// Borrow the typed array if `array` holds this element kind.
    fn array_of(array: &NdArray) -> Option<&ArrayD<Self>>;

    /// Convert into another element kind.
    #[inline]
    fn cast<U: Element>(self) -> U {
        U::from_f64(self.to_f64())
    }
}

macro_rules! impl_integer {
    ($($t:ty => $variant:ident),* $(,)?) => {$(
        impl Element for $t {
            const DTYPE: DType = DType::$variant;

            #[inline]
            fn to_f64(self) -> f64 {
                AsPrimitive::<f64>::as_(self)
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                AsPrimitive::<$t>::as_(value)
            }

            #[inline]
            fn is_nonzero(self) -> bool {
                !Zero::is_zero(&self)
            }

            #[inline]
            fn order(&self, other: &Self) -> Ordering {
                Ord::cmp(self, other)
            }

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                WrappingAdd::wrapping_add(&self, &rhs)
            }

            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self {
                WrappingSub::wrapping_sub(&self, &rhs)
            }

            fn into_nd(array: ArrayD<Self>) -> NdArray {
                NdArray::$variant(array)
            }

            fn array_of(array: &NdArray) -> Option<&ArrayD<Self>> {
                match array {
                    NdArray::$variant(a) => Some(a),
                    _ => None,
                }
            }
        }
    )*};
}

macro_rules! impl_float {
    ($($t:ty => $variant:ident),* $(,)?) => {$(
        impl Element for $t {
            const DTYPE: DType = DType::$variant;

            #[inline]
            fn to_f64(self) -> f64 {
                AsPrimitive::<f64>::as_(self)
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                AsPrimitive::<$t>::as_(value)
            }

            #[inline]
            fn is_nonzero(self) -> bool {
                self != 0.0
            }

            #[inline]
            fn order(&self, other: &Self) -> Ordering {
                self.total_cmp(other)
            }

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self {
                self - rhs
            }

            fn into_nd(array: ArrayD<Self>) -> NdArray {
                NdArray::$variant(array)
            }

            fn array_of(array: &NdArray) -> Option<&ArrayD<Self>> {
                match array {
                    NdArray::$variant(a) => Some(a),
                    _ => None,
                }
            }
        }
    )*};
}

impl_integer!(
    i8 => I8, i16 => I16, i32 => I32, i64 => I64,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64,
);
impl_float!(f32 => F32, f64 => F64);

impl Element for bool {
    const DTYPE: DType = DType::Bool;

    #[inline]
    fn to_f64(self) -> f64 {
        if self { 1.0 } else { 0.0 }
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value != 0.0
    }

    #[inline]
    fn is_nonzero(self) -> bool {
        self
    }

    #[inline]
    fn order(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    /// Logical or.
    #[inline]
    fn wrapping_add(self, rhs: Self) -> Self {
        self | rhs
    }

    /// Set difference.
    #[inline]
    fn wrapping_sub(self, rhs: Self) -> Self {
        self & !rhs
    }

    fn into_nd(array: ArrayD<Self>) -> NdArray {
        NdArray::Bool(array)
    }

    fn array_of(array: &NdArray) -> Option<&ArrayD<Self>> {
        match array {
            NdArray::Bool(a) => Some(a),
            _ => None,
        }
    }
}
