//! Binary morphology
//!
//! Erosion and dilation of boolean arrays by a structuring element, and
//! the compositions built from them.
//!
//! # Algorithm
//!
//! Each pass runs the general window engine over the current state with a
//! fixed border value standing in for every sample outside the array:
//!
//! - erosion sets an element when every sample under the structure is set
//! - dilation reflects the structure through its origin and sets an element
//!   when any sample under it is set
//!
//! With a mask, elements where the mask is false keep the value they had
//! before the pass. Passes repeat a fixed number of times or until the
//! state stops changing; the until-stable loop is capped at one pass more
//! than the number of elements.
//!
//! Any input dtype is accepted (non-zero is set). The result is boolean
//! unless another output dtype is requested.

use crate::structure::generate_binary_structure;
use crate::{MorphError, MorphResult};
use ndarray::{ArrayD, Dimension, Zip};
use ndimage_core::{DType, Error, NdArray, Neighbourhood, Output, PerAxis};
use ndimage_filter::window::{Border, apply_window};
use std::borrow::Cow;

/// How many passes an erosion or dilation makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iterations {
    /// Exactly this many passes
    Times(usize),
    /// Repeat until a pass leaves the state unchanged
    UntilStable,
}

impl Default for Iterations {
    fn default() -> Self {
        Iterations::Times(1)
    }
}

/// A count of zero means repeat until stable.
impl From<usize> for Iterations {
    fn from(n: usize) -> Self {
        match n {
            0 => Iterations::UntilStable,
            n => Iterations::Times(n),
        }
    }
}

/// Options shared by the binary morphology operations.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOptions {
    /// Structuring element; the rank-connectivity-1 cross when absent
    pub structure: Option<ArrayD<bool>>,
    /// Number of passes
    pub iterations: Iterations,
    /// Elements that may change; same shape as the input
    pub mask: Option<ArrayD<bool>>,
    /// Value of every sample outside the input
    pub border_value: bool,
    /// Origin of the structuring element relative to its centre
    pub origin: PerAxis<isize>,
    /// Result destination
    pub output: Output,
}

impl Default for BinaryOptions {
    fn default() -> Self {
        Self {
            structure: None,
            iterations: Iterations::default(),
            mask: None,
            border_value: false,
            origin: PerAxis::All(0),
            output: Output::Infer,
        }
    }
}

impl BinaryOptions {
    /// Use `structure` as the structuring element.
    pub fn structure<D: Dimension>(mut self, structure: ndarray::Array<bool, D>) -> Self {
        self.structure = Some(structure.into_dyn());
        self
    }

    /// Set the number of passes.
    pub fn iterations(mut self, iterations: impl Into<Iterations>) -> Self {
        self.iterations = iterations.into();
        self
    }

    /// Restrict changes to where `mask` is true.
    pub fn mask<D: Dimension>(mut self, mask: ndarray::Array<bool, D>) -> Self {
        self.mask = Some(mask.into_dyn());
        self
    }

    /// Set the border value.
    pub fn border_value(mut self, border_value: bool) -> Self {
        self.border_value = border_value;
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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pass {
    Erode,
    Dilate,
}

/// The caller's structuring element, or the default cross for `ndim`.
pub(crate) fn structuring_element(
    structure: Option<&ArrayD<bool>>,
    ndim: usize,
) -> MorphResult<Cow<'_, ArrayD<bool>>> {
    match structure {
        Some(s) if s.is_empty() => Err(MorphError::InvalidStructure(format!(
            "structure of shape {:?} has no elements",
            s.shape()
        ))),
        Some(s) => Ok(Cow::Borrowed(s)),
        None => Ok(Cow::Owned(generate_binary_structure(ndim, 1))),
    }
}

fn check_mask(mask: Option<&ArrayD<bool>>, shape: &[usize]) -> MorphResult<()> {
    match mask {
        Some(m) if m.shape() != shape => Err(Error::ShapeMismatch(format!(
            "mask shape {:?} does not match input shape {shape:?}",
            m.shape()
        ))
        .into()),
        _ => Ok(()),
    }
}

/// One erosion or dilation pass with its border value and mask.
struct Step<'a> {
    hood: Neighbourhood,
    pass: Pass,
    border: bool,
    mask: Option<&'a ArrayD<bool>>,
}

impl<'a> Step<'a> {
    fn new(
        structure: Option<&ArrayD<bool>>,
        ndim: usize,
        origin: &PerAxis<isize>,
        pass: Pass,
        border: bool,
        mask: Option<&'a ArrayD<bool>>,
    ) -> MorphResult<Self> {
        let structure = structuring_element(structure, ndim)?;
        let hood = Neighbourhood::from_footprint(structure.view(), ndim, origin)?;
        let hood = match pass {
            Pass::Erode => hood,
            Pass::Dilate => hood.reflected(),
        };
        Ok(Self {
            hood,
            pass,
            border,
            mask,
        })
    }

    fn apply(&self, state: &ArrayD<bool>) -> MorphResult<ArrayD<bool>> {
        let edge = Border(self.border);
        let mut next = match self.pass {
            Pass::Erode => apply_window(state.view(), &self.hood, &edge, |s: &mut [bool]| {
                s.iter().all(|&b| b)
            })?,
            Pass::Dilate => apply_window(state.view(), &self.hood, &edge, |s: &mut [bool]| {
                s.iter().any(|&b| b)
            })?,
        };
        if let Some(mask) = self.mask {
            Zip::from(&mut next)
                .and(mask)
                .and(state)
                .for_each(|n, &m, &old| {
                    if !m {
                        *n = old;
                    }
                });
        }
        Ok(next)
    }

    fn repeat(&self, mut state: ArrayD<bool>, iterations: Iterations) -> MorphResult<ArrayD<bool>> {
        match iterations {
            Iterations::Times(0) => self.repeat(state, Iterations::UntilStable),
            Iterations::Times(n) => {
                for _ in 0..n {
                    state = self.apply(&state)?;
                }
                Ok(state)
            }
            Iterations::UntilStable => {
                let cap = state.len() + 1;
                for _ in 0..cap {
                    let next = self.apply(&state)?;
                    if next == state {
                        return Ok(next);
                    }
                    state = next;
                }
                log::warn!(
                    "binary {:?}: still changing after {cap} passes, returning last state",
                    self.pass
                );
                Ok(state)
            }
        }
    }
}

/// Run erosion or dilation passes over a boolean state.
pub(crate) fn run_binary(
    state: ArrayD<bool>,
    opts: &BinaryOptions,
    pass: Pass,
) -> MorphResult<ArrayD<bool>> {
    check_mask(opts.mask.as_ref(), state.shape())?;
    let step = Step::new(
        opts.structure.as_ref(),
        state.ndim(),
        &opts.origin,
        pass,
        opts.border_value,
        opts.mask.as_ref(),
    )?;
    step.repeat(state, opts.iterations)
}

/// Store a boolean result according to `output`.
pub(crate) fn deliver_bool(result: ArrayD<bool>, output: &Output) -> MorphResult<NdArray> {
    let target = output.target(result.shape(), DType::Bool)?;
    Ok(output.clone().deliver(NdArray::from(result).into_dtype(target)))
}

fn binary_op(input: &NdArray, opts: &BinaryOptions, passes: &[Pass]) -> MorphResult<NdArray> {
    opts.output.target(input.shape(), DType::Bool)?;
    let mut state = input.to_bool();
    for &pass in passes {
        state = run_binary(state, opts, pass)?;
    }
    deliver_bool(state, &opts.output)
}

/// Multidimensional binary erosion.
///
/// # Errors
///
/// - [`Error::ShapeMismatch`] if the structure rank or mask shape does not
///   match the input
/// - [`Error::OriginOutOfBounds`] if the origin exceeds the structure
pub fn binary_erosion(input: &NdArray, opts: &BinaryOptions) -> MorphResult<NdArray> {
    binary_op(input, opts, &[Pass::Erode])
}

/// Multidimensional binary dilation.
pub fn binary_dilation(input: &NdArray, opts: &BinaryOptions) -> MorphResult<NdArray> {
    binary_op(input, opts, &[Pass::Dilate])
}

/// Binary opening: erosion followed by dilation, both with every option.
pub fn binary_opening(input: &NdArray, opts: &BinaryOptions) -> MorphResult<NdArray> {
    binary_op(input, opts, &[Pass::Erode, Pass::Dilate])
}

/// Binary closing: dilation followed by erosion, both with every option.
pub fn binary_closing(input: &NdArray, opts: &BinaryOptions) -> MorphResult<NdArray> {
    binary_op(input, opts, &[Pass::Dilate, Pass::Erode])
}

/// Binary hit-or-miss transform.
///
/// An element is set when `structure1` fits the foreground at it and
/// `structure2` fits the background. Outside the input counts as
/// background for both tests. `structure2` defaults to the complement of
/// `structure1` and `origin2` to `origin1`.
pub fn binary_hit_or_miss(
    input: &NdArray,
    structure1: Option<&ArrayD<bool>>,
    structure2: Option<&ArrayD<bool>>,
    origin1: &PerAxis<isize>,
    origin2: Option<&PerAxis<isize>>,
    output: &Output,
) -> MorphResult<NdArray> {
    output.target(input.shape(), DType::Bool)?;
    let ndim = input.ndim();
    let structure1 = structuring_element(structure1, ndim)?;
    let structure2 = match structure2 {
        Some(s) => structuring_element(Some(s), ndim)?,
        None => Cow::Owned(structure1.mapv(|b| !b)),
    };
    let origin2 = origin2.unwrap_or(origin1);

    let fg = input.to_bool();
    let bg = fg.mapv(|b| !b);
    let hits = Step::new(Some(&*structure1), ndim, origin1, Pass::Erode, false, None)?.apply(&fg)?;
    let misses = Step::new(Some(&*structure2), ndim, origin2, Pass::Erode, true, None)?.apply(&bg)?;
    let result = Zip::from(&hits).and(&misses).map_collect(|&h, &m| h && m);
    deliver_bool(result, output)
}
