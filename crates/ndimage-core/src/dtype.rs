//! Element kinds

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Element kind of an [`NdArray`](crate::NdArray)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// Boolean (non-zero is true)
    Bool,
    /// Signed 8-bit integer
    I8,
    /// Signed 16-bit integer
    I16,
    /// Signed 32-bit integer
    I32,
    /// Signed 64-bit integer
    I64,
    /// Unsigned 8-bit integer
    U8,
    /// Unsigned 16-bit integer
    U16,
    /// Unsigned 32-bit integer
    U32,
    /// Unsigned 64-bit integer
    U64,
    /// 32-bit floating point
    F32,
    /// 64-bit floating point
    F64,
}

impl DType {
    /// Every supported numeric kind (everything except `Bool`).
    pub const NUMERIC: [DType; 10] = [
        DType::I8,
        DType::I16,
        DType::I32,
        DType::I64,
        DType::U8,
        DType::U16,
        DType::U32,
        DType::U64,
        DType::F32,
        DType::F64,
    ];

    /// Check if this is a signed or unsigned integer kind.
    pub fn is_integer(self) -> bool {
        !matches!(self, DType::Bool | DType::F32 | DType::F64)
    }

    /// Check if this is a floating-point kind.
    pub fn is_float(self) -> bool {
        matches!(self, DType::F32 | DType::F64)
    }

    /// Check if this is a signed kind (floats included).
    pub fn is_signed(self) -> bool {
        matches!(
            self,
            DType::I8 | DType::I16 | DType::I32 | DType::I64 | DType::F32 | DType::F64
        )
    }

    /// Size of one element in bytes.
    pub fn size_of(self) -> usize {
        match self {
            DType::Bool | DType::I8 | DType::U8 => 1,
            DType::I16 | DType::U16 => 2,
            DType::I32 | DType::U32 | DType::F32 => 4,
            DType::I64 | DType::U64 | DType::F64 => 8,
        }
    }

    /// Lower-case name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            DType::Bool => "bool",
            DType::I8 => "int8",
            DType::I16 => "int16",
            DType::I32 => "int32",
            DType::I64 => "int64",
            DType::U8 => "uint8",
            DType::U16 => "uint16",
            DType::U32 => "uint32",
            DType::U64 => "uint64",
            DType::F32 => "float32",
            DType::F64 => "float64",
        }
    }

    /// Result dtype of a weighted sum over an array of this kind.
    ///
    /// Float inputs keep their kind; integer inputs keep their kind only when
    /// every weight is integral, and promote to `F64` otherwise. Boolean
    /// inputs always promote.
    pub fn weighted_sum_output(self, integral_weights: bool) -> DType {
        match self {
            DType::F32 | DType::F64 => self,
            DType::Bool => DType::F64,
            _ if integral_weights => self,
            _ => DType::F64,
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bool" => Ok(DType::Bool),
            "int8" | "i8" => Ok(DType::I8),
            "int16" | "i16" => Ok(DType::I16),
            "int32" | "i32" => Ok(DType::I32),
            "int64" | "i64" => Ok(DType::I64),
            "uint8" | "u8" => Ok(DType::U8),
            "uint16" | "u16" => Ok(DType::U16),
            "uint32" | "u32" => Ok(DType::U32),
            "uint64" | "u64" => Ok(DType::U64),
            "float32" | "f32" => Ok(DType::F32),
            "float64" | "f64" => Ok(DType::F64),
            _ => Err(Error::InvalidParameter(format!("unknown dtype {s:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_sum_output() {
        assert_eq!(DType::I32.weighted_sum_output(true), DType::I32);
        assert_eq!(DType::I32.weighted_sum_output(false), DType::F64);
        assert_eq!(DType::U8.weighted_sum_output(false), DType::F64);
        assert_eq!(DType::F32.weighted_sum_output(false), DType::F32);
        assert_eq!(DType::Bool.weighted_sum_output(true), DType::F64);
    }

    #[test]
    fn test_parse_names() {
        for dtype in DType::NUMERIC {
            assert_eq!(dtype.name().parse::<DType>().unwrap(), dtype);
        }
        assert_eq!("bool".parse::<DType>().unwrap(), DType::Bool);
        assert!("complex64".parse::<DType>().is_err());
    }

    #[test]
    fn test_kind_predicates() {
        assert!(DType::U16.is_integer());
        assert!(!DType::U16.is_signed());
        assert!(DType::F32.is_float() && DType::F32.is_signed());
        assert!(!DType::Bool.is_integer());
        assert_eq!(DType::I64.size_of(), 8);
    }
}
