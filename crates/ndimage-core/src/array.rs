//! Dynamically typed N-dimensional array
//!
//! [`NdArray`] is the unit every public operation consumes and produces. It
//! wraps an [`ndarray::ArrayD`] of one of the supported element kinds so
//! that the dtype of a result can be chosen at run time (inferred from the
//! input, requested by the caller, or dictated by a caller-supplied output
//! array).
//!
//! Typed code is reached through the [`dispatch!`](crate::dispatch) macro,
//! which expands one generic expression for every element kind.

use crate::dtype::DType;
use crate::element::Element;
use crate::error::Result;
use ndarray::{Array, ArrayD, ArrayViewD, Dimension, IxDyn};

/// A dense N-dimensional array with a run-time element kind.
#[derive(Debug, Clone, PartialEq)]
pub enum NdArray {
    Bool(ArrayD<bool>),
    I8(ArrayD<i8>),
    I16(ArrayD<i16>),
    I32(ArrayD<i32>),
    I64(ArrayD<i64>),
    U8(ArrayD<u8>),
    U16(ArrayD<u16>),
    U32(ArrayD<u32>),
    U64(ArrayD<u64>),
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
}

/// Expand `$body` once per element kind with `$a` bound to the typed array.
///
/// ```
/// use ndimage_core::{dispatch, NdArray};
///
/// let a = NdArray::from_shape_vec(&[3], vec![1u8, 2, 3]).unwrap();
/// let total: f64 = dispatch!(&a, arr => arr.iter().map(|v| ndimage_core::Element::to_f64(*v)).sum());
/// assert_eq!(total, 6.0);
/// ```
#[macro_export]
macro_rules! dispatch {
    ($array:expr, $a:ident => $body:expr) => {
        match $array {
            $crate::NdArray::Bool($a) => $body,
            $crate::NdArray::I8($a) => $body,
            $crate::NdArray::I16($a) => $body,
            $crate::NdArray::I32($a) => $body,
            $crate::NdArray::I64($a) => $body,
            $crate::NdArray::U8($a) => $body,
            $crate::NdArray::U16($a) => $body,
            $crate::NdArray::U32($a) => $body,
            $crate::NdArray::U64($a) => $body,
            $crate::NdArray::F32($a) => $body,
            $crate::NdArray::F64($a) => $body,
        }
    };
}

/// Convert a typed array into the element kind named by `dtype`.
///
/// No copy is made when the kinds already agree.
pub fn cast_array<T: Element>(array: ArrayD<T>, dtype: DType) -> NdArray {
    if T::DTYPE == dtype {
        return T::into_nd(array);
    }
    match dtype {
        DType::Bool => NdArray::Bool(array.mapv(|v| v.is_nonzero())),
        DType::I8 => NdArray::I8(array.mapv(Element::cast)),
        DType::I16 => NdArray::I16(array.mapv(Element::cast)),
        DType::I32 => NdArray::I32(array.mapv(Element::cast)),
        DType::I64 => NdArray::I64(array.mapv(Element::cast)),
        DType::U8 => NdArray::U8(array.mapv(Element::cast)),
        DType::U16 => NdArray::U16(array.mapv(Element::cast)),
        DType::U32 => NdArray::U32(array.mapv(Element::cast)),
        DType::U64 => NdArray::U64(array.mapv(Element::cast)),
        DType::F32 => NdArray::F32(array.mapv(Element::cast)),
        DType::F64 => NdArray::F64(array.mapv(Element::cast)),
    }
}

impl NdArray {
    /// Create an array from a shape and row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Shape`](crate::Error::Shape) if `data.len()` does not
    /// equal the product of `shape`.
    pub fn from_shape_vec<T: Element>(shape: &[usize], data: Vec<T>) -> Result<Self> {
        Ok(T::into_nd(ArrayD::from_shape_vec(IxDyn(shape), data)?))
    }

    /// Create an array filled with `value`.
    pub fn from_elem<T: Element>(shape: &[usize], value: T) -> Self {
        T::into_nd(ArrayD::from_elem(IxDyn(shape), value))
    }

    /// Create a zero-filled array of the given kind.
    pub fn zeros(shape: &[usize], dtype: DType) -> Self {
        cast_array(ArrayD::<f64>::zeros(IxDyn(shape)), dtype)
    }

    /// Element kind.
    pub fn dtype(&self) -> DType {
        dispatch!(self, a => element_dtype(a))
    }

    /// Extent of every axis.
    pub fn shape(&self) -> &[usize] {
        dispatch!(self, a => a.shape())
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        dispatch!(self, a => a.ndim())
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        dispatch!(self, a => a.len())
    }

    /// Check if the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the typed array, if the element kind is `T`.
    pub fn as_array<T: Element>(&self) -> Option<&ArrayD<T>> {
        T::array_of(self)
    }

    /// View the typed array, if the element kind is `T`.
    pub fn view<T: Element>(&self) -> Option<ArrayViewD<'_, T>> {
        T::array_of(self).map(|a| a.view())
    }

    /// Copy every element into an `f64` array.
    pub fn to_f64(&self) -> ArrayD<f64> {
        dispatch!(self, a => a.mapv(Element::to_f64))
    }

    /// Truthiness of every element.
    pub fn to_bool(&self) -> ArrayD<bool> {
        dispatch!(self, a => a.mapv(Element::is_nonzero))
    }

    /// Row-major copy of the elements as `f64`.
    pub fn to_vec_f64(&self) -> Vec<f64> {
        dispatch!(self, a => a.iter().map(|v| v.to_f64()).collect())
    }

    /// Copy into a new array of the given kind.
    pub fn astype(&self, dtype: DType) -> NdArray {
        if self.dtype() == dtype {
            return self.clone();
        }
        dispatch!(self, a => cast_array(a.clone(), dtype))
    }

    /// Convert into the given kind, reusing storage when it already matches.
    pub fn into_dtype(self, dtype: DType) -> NdArray {
        if self.dtype() == dtype {
            return self;
        }
        dispatch!(self, a => cast_array(a, dtype))
    }

    /// Build an array of `dtype` from `f64` values.
    pub fn from_f64(values: ArrayD<f64>, dtype: DType) -> NdArray {
        cast_array(values, dtype)
    }
}

fn element_dtype<T: Element>(_: &ArrayD<T>) -> DType {
    T::DTYPE
}

impl<T: Element, D: Dimension> From<Array<T, D>> for NdArray {
    fn from(array: Array<T, D>) -> Self {
        T::into_nd(array.into_dyn())
    }
}
