//! Boundary extension
//!
//! Filters read samples outside the array whenever the window crosses an
//! edge. [`BoundaryMode`] decides which in-range sample stands in for such a
//! coordinate, or whether the caller's constant fill value is used instead.
//!
//! ```text
//! nearest   a a a a | a b c d | d d d d
//! wrap      a b c d | a b c d | a b c d
//! reflect   d c b a | a b c d | d c b a
//! mirror    d c b | a b c d | c b a
//! constant  k k k k | a b c d | k k k k
//! ```

use crate::axes::PerAxis;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Rule for resolving array accesses outside the declared extents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BoundaryMode {
    /// Repeat the edge sample: `a a | a b c d | d d`
    Nearest,
    /// Periodic: `c d | a b c d | a b`
    Wrap,
    /// Half-sample symmetric, edge duplicated: `b a | a b c d | d c`
    #[default]
    Reflect,
    /// Whole-sample symmetric, edge not duplicated: `c b | a b c d | c b`
    Mirror,
    /// Caller-supplied fill value
    Constant,
}

impl BoundaryMode {
    /// Resolve index `index` on an axis of extent `len`.
    ///
    /// Returns the in-range source index, or `None` when the constant fill
    /// value must be used (always for [`BoundaryMode::Constant`] outside the
    /// array, and for every mode when `len == 0`).
    #[inline]
    pub fn resolve(self, index: isize, len: usize) -> Option<usize> {
        let n = len as isize;
        if n == 0 {
            return None;
        }
        if (0..n).contains(&index) {
            return Some(index as usize);
        }
        let resolved = match self {
            BoundaryMode::Constant => return None,
            BoundaryMode::Nearest => index.clamp(0, n - 1),
            BoundaryMode::Wrap => index.rem_euclid(n),
            BoundaryMode::Reflect => {
                let m = index.rem_euclid(2 * n);
                if m < n { m } else { 2 * n - 1 - m }
            }
            BoundaryMode::Mirror => {
                if n == 1 {
                    0
                } else {
                    let period = 2 * n - 2;
                    let m = index.rem_euclid(period);
                    if m < n { m } else { period - m }
                }
            }
        };
        Some(resolved as usize)
    }

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            BoundaryMode::Nearest => "nearest",
            BoundaryMode::Wrap => "wrap",
            BoundaryMode::Reflect => "reflect",
            BoundaryMode::Mirror => "mirror",
            BoundaryMode::Constant => "constant",
        }
    }
}

impl fmt::Display for BoundaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BoundaryMode {
    type Err = Error;

    /// Parse a mode name; the `grid-*` spellings are accepted as aliases.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "nearest" => Ok(BoundaryMode::Nearest),
            "wrap" | "grid-wrap" => Ok(BoundaryMode::Wrap),
            "reflect" | "grid-mirror" => Ok(BoundaryMode::Reflect),
            "mirror" => Ok(BoundaryMode::Mirror),
            "constant" | "grid-constant" => Ok(BoundaryMode::Constant),
            _ => Err(Error::InvalidMode(s.to_string())),
        }
    }
}

impl From<BoundaryMode> for PerAxis<BoundaryMode> {
    fn from(mode: BoundaryMode) -> Self {
        PerAxis::All(mode)
    }
}
