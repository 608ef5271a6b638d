//! Neighbourhood normalization
//!
//! Every window operation first reduces the caller's kernel, size, footprint
//! or structure arguments to a [`Neighbourhood`]: the footprint shape, the
//! per-axis origin, and the ordered list of relative offsets at which the
//! footprint is active, together with the weight or additive structure value
//! that belongs to each offset. The list is built once per call; the window
//! engines only walk it.
//!
//! Offsets are listed in row-major footprint order. An active footprint
//! position `p` becomes the offset `p - (shape / 2 + origin)` on every axis.

use crate::axes::PerAxis;
use crate::error::{Error, Result};
use ndarray::{ArrayD, ArrayViewD, Axis, IxDyn};

/// Check that `origin` lies within the half-extent of a filter of `shape`.
///
/// The valid range on an axis of length `n` is `-(n / 2) ..= (n - 1) / 2`.
pub fn validate_origin(shape: &[usize], origin: &[isize]) -> Result<()> {
    for (axis, (&size, &o)) in shape.iter().zip(origin).enumerate() {
        let lo = -((size / 2) as isize);
        let hi = (size as isize - 1).div_euclid(2);
        if o < lo || o > hi {
            return Err(Error::OriginOutOfBounds {
                axis,
                origin: o,
                size,
            });
        }
    }
    Ok(())
}

fn check_rank(what: &str, shape: &[usize], ndim: usize) -> Result<()> {
    if shape.len() != ndim {
        return Err(Error::ShapeMismatch(format!(
            "{what} rank {} does not match input rank {ndim}",
            shape.len()
        )));
    }
    if shape.contains(&0) {
        return Err(Error::InvalidParameter(format!(
            "{what} has a zero-length axis: {shape:?}"
        )));
    }
    Ok(())
}

/// Precomputed offsets of an N-d window.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbourhood {
    shape: Vec<usize>,
    origin: Vec<isize>,
    /// `count * ndim` offsets, one row per active position
    offsets: Vec<isize>,
    count: usize,
    /// Weight or structure value per active position; empty for plain footprints
    values: Vec<f64>,
}

impl Neighbourhood {
    fn build<F>(shape: &[usize], origin: &[isize], mut active: F) -> Result<Self>
    where
        F: FnMut(&IxDyn) -> Option<Option<f64>>,
    {
        validate_origin(shape, origin)?;
        let ndim = shape.len();
        let centre: Vec<isize> = shape
            .iter()
            .zip(origin)
            .map(|(&s, &o)| (s / 2) as isize + o)
            .collect();

        let mut offsets = Vec::new();
        let mut values = Vec::new();
        let mut count = 0;
        let positions = ArrayD::<()>::from_elem(IxDyn(shape), ());
        for (index, _) in positions.indexed_iter() {
            if let Some(value) = active(&index) {
                for d in 0..ndim {
                    offsets.push(index[d] as isize - centre[d]);
                }
                if let Some(v) = value {
                    values.push(v);
                }
                count += 1;
            }
        }

        Ok(Self {
            shape: shape.to_vec(),
            origin: origin.to_vec(),
            offsets,
            count,
            values,
        })
    }

    /// Window over the true elements of `footprint`.
    ///
    /// # Errors
    ///
    /// - [`Error::ShapeMismatch`] if the footprint rank is not `ndim`
    /// - [`Error::OriginOutOfBounds`] if an origin exceeds the half-extent
    pub fn from_footprint(
        footprint: ArrayViewD<'_, bool>,
        ndim: usize,
        origin: &PerAxis<isize>,
    ) -> Result<Self> {
        check_rank("footprint", footprint.shape(), ndim)?;
        let origin = origin.expand(ndim)?;
        Self::build(footprint.shape(), &origin, |i| footprint[i.clone()].then_some(None))
    }

    /// Window over the non-zero `weights`, each offset carrying its weight.
    pub fn from_weights(
        weights: ArrayViewD<'_, f64>,
        ndim: usize,
        origin: &PerAxis<isize>,
    ) -> Result<Self> {
        check_rank("weights", weights.shape(), ndim)?;
        let origin = origin.expand(ndim)?;
        Self::build(weights.shape(), &origin, |i| {
            let w = weights[i.clone()];
            (w != 0.0).then_some(Some(w))
        })
    }

    /// Window over the true elements of `footprint`, each offset carrying
    /// the additive `structure` value at that position.
    pub fn from_structure(
        footprint: ArrayViewD<'_, bool>,
        structure: ArrayViewD<'_, f64>,
        ndim: usize,
        origin: &PerAxis<isize>,
    ) -> Result<Self> {
        check_rank("footprint", footprint.shape(), ndim)?;
        if structure.shape() != footprint.shape() {
            return Err(Error::ShapeMismatch(format!(
                "structure shape {:?} does not match footprint shape {:?}",
                structure.shape(),
                footprint.shape()
            )));
        }
        let origin = origin.expand(ndim)?;
        Self::build(footprint.shape(), &origin, |i| {
            footprint[i.clone()].then_some(Some(structure[i.clone()]))
        })
    }

    /// The point reflection of this window through its reference point.
    ///
    /// Offsets are negated and listed in reverse order, together with their
    /// values, which is exactly the window of the kernel reversed along every
    /// axis with the origin mirrored (shifted by one on even-length axes).
    pub fn reflected(&self) -> Self {
        let ndim = self.ndim();
        let mut offsets = Vec::with_capacity(self.offsets.len());
        for k in (0..self.count).rev() {
            offsets.extend(self.offset(k).iter().map(|o| -o));
        }
        let origin = self
            .shape
            .iter()
            .zip(&self.origin)
            .map(|(&s, &o)| if s % 2 == 0 { -o - 1 } else { -o })
            .collect();
        debug_assert_eq!(offsets.len(), self.count * ndim);
        Self {
            shape: self.shape.clone(),
            origin,
            offsets,
            count: self.count,
            values: self.values.iter().rev().copied().collect(),
        }
    }

    /// Rank of the window.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Footprint shape.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Per-axis origin.
    pub fn origin(&self) -> &[isize] {
        &self.origin
    }

    /// Number of active positions.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check if no position is active.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Offset of the `k`-th active position.
    #[inline]
    pub fn offset(&self, k: usize) -> &[isize] {
        let ndim = self.ndim();
        &self.offsets[k * ndim..(k + 1) * ndim]
    }

    /// Offsets of all active positions, in order.
    pub fn offsets(&self) -> impl Iterator<Item = &[isize]> + '_ {
        (0..self.count).map(move |k| self.offset(k))
    }

    /// Weights or structure values aligned with [`offsets`](Self::offsets);
    /// empty for a plain footprint.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// A caller's "size or footprint (plus optional structure)" argument.
///
/// At least one of the three must be given. A footprint takes precedence
/// over a size; a structure alone supplies an all-true footprint of its own
/// shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowSpec {
    pub size: Option<PerAxis<usize>>,
    pub footprint: Option<ArrayD<bool>>,
    pub structure: Option<ArrayD<f64>>,
}

impl WindowSpec {
    /// Box window of the given per-axis size.
    pub fn size(size: impl Into<PerAxis<usize>>) -> Self {
        Self {
            size: Some(size.into()),
            ..Self::default()
        }
    }

    /// Window shaped by a boolean footprint.
    pub fn footprint<D: ndarray::Dimension>(footprint: ndarray::Array<bool, D>) -> Self {
        Self {
            footprint: Some(footprint.into_dyn()),
            ..Self::default()
        }
    }

    /// Window shaped by an additive structure alone.
    pub fn structure<D: ndarray::Dimension>(structure: ndarray::Array<f64, D>) -> Self {
        Self {
            structure: Some(structure.into_dyn()),
            ..Self::default()
        }
    }

    /// Attach an additive structure.
    pub fn with_structure<D: ndarray::Dimension>(mut self, structure: ndarray::Array<f64, D>) -> Self {
        self.structure = Some(structure.into_dyn());
        self
    }

    /// Resolve against an input of rank `ndim`.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingNeighbourhoodSpec`] if nothing was given
    /// - [`Error::ShapeMismatch`] on rank or structure shape disagreement
    /// - [`Error::InvalidParameter`] for zero sizes
    pub fn resolve(&self, ndim: usize) -> Result<Window> {
        let (footprint, boxed) = match (&self.footprint, &self.size, &self.structure) {
            (Some(fp), _, _) => {
                check_rank("footprint", fp.shape(), ndim)?;
                (fp.clone(), fp.iter().all(|&b| b))
            }
            (None, Some(size), _) => {
                let sizes = size.expand(ndim)?;
                if sizes.contains(&0) {
                    return Err(Error::InvalidParameter(format!(
                        "filter size must be at least 1 on every axis, got {sizes:?}"
                    )));
                }
                (ArrayD::from_elem(IxDyn(&sizes), true), true)
            }
            (None, None, Some(st)) => {
                check_rank("structure", st.shape(), ndim)?;
                (ArrayD::from_elem(IxDyn(st.shape()), true), true)
            }
            (None, None, None) => return Err(Error::MissingNeighbourhoodSpec),
        };
        if let Some(st) = &self.structure {
            if st.shape() != footprint.shape() {
                return Err(Error::ShapeMismatch(format!(
                    "structure shape {:?} does not match footprint shape {:?}",
                    st.shape(),
                    footprint.shape()
                )));
            }
        }
        Ok(Window {
            footprint,
            structure: self.structure.clone(),
            boxed,
        })
    }
}

/// A [`WindowSpec`] resolved against a concrete input rank.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    footprint: ArrayD<bool>,
    structure: Option<ArrayD<f64>>,
    boxed: bool,
}

impl Window {
    /// Footprint shape.
    pub fn shape(&self) -> &[usize] {
        self.footprint.shape()
    }

    /// Boolean footprint.
    pub fn footprint(&self) -> &ArrayD<bool> {
        &self.footprint
    }

    /// Additive structure, if any.
    pub fn structure(&self) -> Option<&ArrayD<f64>> {
        self.structure.as_ref()
    }

    /// Number of active positions.
    pub fn count(&self) -> usize {
        self.footprint.iter().filter(|&&b| b).count()
    }

    /// Per-axis sizes when the window is an all-true box without structure,
    /// i.e. when it can be applied as one 1-d pass per axis.
    pub fn separable_sizes(&self) -> Option<Vec<usize>> {
        (self.boxed && self.structure.is_none()).then(|| self.footprint.shape().to_vec())
    }

    /// Precompute the offsets of this window.
    pub fn neighbourhood(&self, origin: &PerAxis<isize>) -> Result<Neighbourhood> {
        let ndim = self.footprint.ndim();
        match &self.structure {
            Some(st) => Neighbourhood::from_structure(self.footprint.view(), st.view(), ndim, origin),
            None => Neighbourhood::from_footprint(self.footprint.view(), ndim, origin),
        }
    }

    /// Reverse footprint and structure along every axis.
    pub fn reversed(&self) -> Window {
        let mut footprint = self.footprint.clone();
        let mut structure = self.structure.clone();
        for axis in 0..footprint.ndim() {
            footprint.invert_axis(Axis(axis));
            if let Some(st) = structure.as_mut() {
                st.invert_axis(Axis(axis));
            }
        }
        Window {
            footprint,
            structure,
            boxed: self.boxed,
        }
    }
}
