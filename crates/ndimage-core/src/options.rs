//! Per-call filter options and output selection

use crate::array::NdArray;
use crate::axes::PerAxis;
use crate::boundary::BoundaryMode;
use crate::dispatch;
use crate::dtype::DType;
use crate::element::Element;
use crate::error::{Error, Result};
use ndarray::ArrayD;

/// Where the result of an operation goes.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Output {
    /// Allocate a new array of the inferred dtype
    #[default]
    Infer,
    /// Allocate a new array of this dtype
    Dtype(DType),
    /// Write into this array; its shape must equal the result shape and its
    /// dtype is authoritative. The filled array is returned.
    Array(NdArray),
}

impl Output {
    /// Decide the result dtype, validating a supplied array's shape.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if a supplied array does not have
    /// `shape`.
    pub fn target(&self, shape: &[usize], inferred: DType) -> Result<DType> {
        match self {
            Output::Infer => Ok(inferred),
            Output::Dtype(dtype) => Ok(*dtype),
            Output::Array(out) if out.shape() == shape => Ok(out.dtype()),
            Output::Array(out) => Err(Error::ShapeMismatch(format!(
                "output shape {:?} does not match result shape {:?}",
                out.shape(),
                shape
            ))),
        }
    }

    /// Like [`target`](Self::target) for weighted-sum results, which cannot
    /// be stored as booleans.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DtypeMismatch`] if the target would be `Bool`.
    pub fn weighted_target(
        &self,
        shape: &[usize],
        input: DType,
        integral_weights: bool,
    ) -> Result<DType> {
        let inferred = input.weighted_sum_output(integral_weights);
        let target = self.target(shape, inferred)?;
        if target == DType::Bool {
            return Err(Error::DtypeMismatch {
                from: inferred,
                to: DType::Bool,
            });
        }
        Ok(target)
    }

    /// Hand a computed result to the caller, storing it into the supplied
    /// array when there is one.
    pub fn deliver(self, result: NdArray) -> NdArray {
        match self {
            Output::Array(mut out) => {
                dispatch!(&mut out, a => store(a, &result));
                out
            }
            _ => result,
        }
    }
}

fn store<T: Element>(dst: &mut ArrayD<T>, src: &NdArray) {
    match src.as_array::<T>() {
        Some(src) => dst.assign(src),
        None => dst.assign(&src.to_f64().mapv(T::from_f64)),
    }
}

/// Boundary handling, origin and output selection shared by the filters.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOptions {
    /// Boundary mode, per axis for separable filters
    pub mode: PerAxis<BoundaryMode>,
    /// Fill value for [`BoundaryMode::Constant`]
    pub cval: f64,
    /// Origin relative to the window centre
    pub origin: PerAxis<isize>,
    /// Result destination
    pub output: Output,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            mode: PerAxis::All(BoundaryMode::Reflect),
            cval: 0.0,
            origin: PerAxis::All(0),
            output: Output::Infer,
        }
    }
}

impl FilterOptions {
    /// Options using `mode` on every axis.
    pub fn with_mode(mode: BoundaryMode) -> Self {
        Self {
            mode: PerAxis::All(mode),
            ..Self::default()
        }
    }

    /// Set the constant fill value.
    pub fn cval(mut self, cval: f64) -> Self {
        self.cval = cval;
        self
    }

    /// Set the origin.
    pub fn origin(mut self, origin: impl Into<PerAxis<isize>>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Request an output dtype.
    pub fn dtype(mut self, dtype: DType) -> Self {
        self.output = Output::Dtype(dtype);
        self
    }

    /// Write into a caller-supplied array.
    pub fn output_array(mut self, output: NdArray) -> Self {
        self.output = Output::Array(output);
        self
    }

    /// The same boundary handling and origin with an inferred output, for
    /// intermediate results of composite filters.
    pub fn intermediate(&self) -> Self {
        Self {
            mode: self.mode.clone(),
            cval: self.cval,
            origin: self.origin.clone(),
            output: Output::Infer,
        }
    }

    /// Boundary mode of a non-separable operation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if a per-axis list was given.
    pub fn single_mode(&self) -> Result<BoundaryMode> {
        match &self.mode {
            PerAxis::All(mode) => Ok(*mode),
            PerAxis::Each(modes) => match modes.split_first() {
                Some((first, rest)) if rest.iter().all(|m| m == first) => Ok(*first),
                _ => Err(Error::InvalidParameter(
                    "a per-axis mode list is only supported by separable filters".to_string(),
                )),
            },
        }
    }
}
