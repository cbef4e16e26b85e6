//! Plain Old Data types - storage element types of array samples.

use bytemuck::{Pod, Zeroable};
use half::f16;
use std::fmt;

/// Storage element type of a sample.
///
/// The discriminants are the on-disk POD codes used by Ogawa property headers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PlainOldDataType {
    Boolean = 0,
    Uint8 = 1,
    Int8 = 2,
    Uint16 = 3,
    Int16 = 4,
    Uint32 = 5,
    Int32 = 6,
    Uint64 = 7,
    Int64 = 8,
    Float16 = 9,
    Float32 = 10,
    Float64 = 11,
    /// NUL-terminated UTF-8 elements
    String = 12,
    /// Elements terminated by a 4-byte zero unit
    Wstring = 13,
    #[default]
    Unknown = 127,
}

impl PlainOldDataType {
    /// Size in bytes of one fixed-size element, `None` for strings and Unknown.
    #[inline]
    pub const fn fixed_size(self) -> Option<usize> {
        match self {
            Self::Boolean | Self::Uint8 | Self::Int8 => Some(1),
            Self::Uint16 | Self::Int16 | Self::Float16 => Some(2),
            Self::Uint32 | Self::Int32 | Self::Float32 => Some(4),
            Self::Uint64 | Self::Int64 | Self::Float64 => Some(8),
            Self::String | Self::Wstring | Self::Unknown => None,
        }
    }

    /// Byte-swap unit used when hashing sample content.
    ///
    /// Strings hash byte-wise, wide strings per 4-byte code unit.
    #[inline]
    pub const fn hash_unit(self) -> Option<usize> {
        match self {
            Self::String => Some(1),
            Self::Wstring => Some(4),
            other => other.fixed_size(),
        }
    }

    /// Returns the name of this type as a string.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Boolean => "bool_t",
            Self::Uint8 => "uint8_t",
            Self::Int8 => "int8_t",
            Self::Uint16 => "uint16_t",
            Self::Int16 => "int16_t",
            Self::Uint32 => "uint32_t",
            Self::Int32 => "int32_t",
            Self::Uint64 => "uint64_t",
            Self::Int64 => "int64_t",
            Self::Float16 => "float16_t",
            Self::Float32 => "float32_t",
            Self::Float64 => "float64_t",
            Self::String => "string",
            Self::Wstring => "wstring",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Returns true if this is a string type.
    #[inline]
    pub const fn is_string(self) -> bool {
        matches!(self, Self::String | Self::Wstring)
    }
}

impl fmt::Display for PlainOldDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rust types that can be pushed as array sample elements.
pub trait AlembicPod: Pod + Zeroable + Copy + Default {
    /// The corresponding PlainOldDataType enum value.
    const POD_TYPE: PlainOldDataType;
}

macro_rules! impl_alembic_pod {
    ($($ty:ty => $pod:ident),* $(,)?) => {
        $(impl AlembicPod for $ty {
            const POD_TYPE: PlainOldDataType = PlainOldDataType::$pod;
        })*
    };
}

impl_alembic_pod! {
    u8 => Uint8,
    i8 => Int8,
    u16 => Uint16,
    i16 => Int16,
    u32 => Uint32,
    i32 => Int32,
    u64 => Uint64,
    i64 => Int64,
    f16 => Float16,
    f32 => Float32,
    f64 => Float64,
}

/// Boolean with 1-byte storage (bool_t).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct Bool(u8);

impl Bool {
    pub const TRUE: Self = Self(1);
    pub const FALSE: Self = Self(0);

    #[inline]
    pub const fn get(self) -> bool {
        self.0 != 0
    }
}

impl From<bool> for Bool {
    #[inline]
    fn from(v: bool) -> Self {
        Self(v as u8)
    }
}

impl AlembicPod for Bool {
    const POD_TYPE: PlainOldDataType = PlainOldDataType::Boolean;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_sizes() {
        assert_eq!(PlainOldDataType::Boolean.fixed_size(), Some(1));
        assert_eq!(PlainOldDataType::Float16.fixed_size(), Some(2));
        assert_eq!(PlainOldDataType::Int32.fixed_size(), Some(4));
        assert_eq!(PlainOldDataType::Float64.fixed_size(), Some(8));
        assert_eq!(PlainOldDataType::String.fixed_size(), None);
        assert_eq!(PlainOldDataType::Unknown.fixed_size(), None);
    }

    #[test]
    fn test_hash_units() {
        assert_eq!(PlainOldDataType::String.hash_unit(), Some(1));
        assert_eq!(PlainOldDataType::Wstring.hash_unit(), Some(4));
        assert_eq!(PlainOldDataType::Uint64.hash_unit(), Some(8));
        assert_eq!(PlainOldDataType::Unknown.hash_unit(), None);
    }

    #[test]
    fn test_pod_trait() {
        assert_eq!(<f32 as AlembicPod>::POD_TYPE, PlainOldDataType::Float32);
        assert_eq!(<Bool as AlembicPod>::POD_TYPE, PlainOldDataType::Boolean);
        assert_eq!(std::mem::size_of::<Bool>(), 1);
        assert!(Bool::from(true).get());
    }
}
