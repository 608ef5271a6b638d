//! Separable line engine
//!
//! Applies a 1-d operation along one axis at a time. Each lane of the input
//! along the axis is copied into a scratch line extended on both sides
//! according to the boundary mode, and the line operation writes the
//! corresponding output lane. Lanes are independent and are processed in
//! parallel; successive axis passes are strictly sequential, each consuming
//! the complete output of the previous one.
//!
//! For a filter of length `size` and origin `origin`, the scratch line holds
//! `size / 2 + origin` extension samples before the lane and
//! `size - 1 - (size / 2 + origin)` after it, so that output `i` sees the
//! window `ext[i .. i + size]`.

use ndarray::{ArrayD, ArrayView1, ArrayViewD, Axis, Zip};
use ndimage_core::{BoundaryMode, Element};
use std::collections::VecDeque;

/// Geometry and boundary handling of one axis pass.
#[derive(Debug, Clone, Copy)]
pub struct LinePass<T> {
    /// Axis to filter along
    pub axis: usize,
    /// Filter length
    pub size: usize,
    /// Origin relative to the filter centre
    pub origin: isize,
    /// Boundary mode
    pub mode: BoundaryMode,
    /// Fill value for [`BoundaryMode::Constant`]
    pub cval: T,
}

impl<T: Element> LinePass<T> {
    fn padding(&self) -> (usize, usize) {
        let before = (self.size / 2) as isize + self.origin;
        let after = self.size as isize - 1 - before;
        (before.max(0) as usize, after.max(0) as usize)
    }

    fn extend(&self, lane: ArrayView1<'_, T>, ext: &mut Vec<T>) {
        let (before, after) = self.padding();
        let n = lane.len();
        ext.clear();
        for i in -(before as isize)..(n + after) as isize {
            ext.push(match self.mode.resolve(i, n) {
                Some(j) => lane[j],
                None => self.cval,
            });
        }
    }
}

/// Run `line_op(extended_line, output_line)` over every lane along
/// `pass.axis`.
///
/// The extended line has `len + size - 1` samples; the output line has the
/// lane length.
pub fn apply_lines<T, R, F>(input: ArrayViewD<'_, T>, pass: &LinePass<T>, line_op: F) -> ArrayD<R>
where
    T: Element,
    R: Copy + Default + Send + Sync,
    F: Fn(&[T], &mut [R]) + Sync,
{
    let mut output = ArrayD::<R>::from_elem(input.raw_dim(), R::default());
    if input.is_empty() {
        return output;
    }
    let n = input.len_of(Axis(pass.axis));

    Zip::from(input.lanes(Axis(pass.axis)))
        .and(output.lanes_mut(Axis(pass.axis)))
        .par_for_each(|lane, mut out| {
            let mut ext = Vec::with_capacity(n + pass.size);
            pass.extend(lane, &mut ext);
            let mut line = vec![R::default(); n];
            line_op(&ext, &mut line);
            for (o, v) in out.iter_mut().zip(line) {
                *o = v;
            }
        });

    output
}

/// `out[i] = sum_k weights[k] * ext[i + k]`
pub fn correlate_line(ext: &[f64], weights: &[f64], out: &mut [f64]) {
    for (i, o) in out.iter_mut().enumerate() {
        *o = weights
            .iter()
            .zip(&ext[i..])
            .map(|(w, v)| w * v)
            .sum();
    }
}

/// Running mean over windows of `size` samples.
pub fn uniform_line(ext: &[f64], size: usize, out: &mut [f64]) {
    if out.is_empty() {
        return;
    }
    let norm = size as f64;
    let mut acc = ext[..size].iter().sum::<f64>() / norm;
    out[0] = acc;
    for i in 1..out.len() {
        acc += (ext[i + size - 1] - ext[i - 1]) / norm;
        out[i] = acc;
    }
}

/// Which extremum a min/max pass keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    Minimum,
    Maximum,
}

impl Extremum {
    /// Check if `candidate` should replace `current`.
    #[inline]
    pub fn prefers<T: PartialOrd>(self, candidate: &T, current: &T) -> bool {
        match self {
            Extremum::Minimum => candidate < current,
            Extremum::Maximum => candidate > current,
        }
    }

    /// Extremum of a non-empty slice; the first of equal candidates wins.
    #[inline]
    pub fn reduce<T: Copy + PartialOrd>(self, values: &[T]) -> T {
        let mut best = values[0];
        for v in &values[1..] {
            if self.prefers(v, &best) {
                best = *v;
            }
        }
        best
    }
}

/// Sliding-window extremum over windows of `size` samples, using a
/// monotone deque of candidate positions.
pub fn extremum_line<T: Copy + PartialOrd>(ext: &[T], size: usize, kind: Extremum, out: &mut [T]) {
    let mut candidates: VecDeque<usize> = VecDeque::with_capacity(size);
    for (j, v) in ext.iter().enumerate() {
        while let Some(&back) = candidates.back() {
            if kind.prefers(&ext[back], v) {
                break;
            }
            candidates.pop_back();
        }
        candidates.push_back(j);

        if j + 1 >= size {
            let start = j + 1 - size;
            while candidates.front().is_some_and(|&f| f < start) {
                candidates.pop_front();
            }
            if let (Some(slot), Some(&best)) = (out.get_mut(start), candidates.front()) {
                *slot = ext[best];
            }
        }
    }
}
