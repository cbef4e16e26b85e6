//! DataType - combines POD type with extent (dimensionality).

use super::PlainOldDataType;
use std::fmt;

/// DataType describes how one element of an array sample is stored.
///
/// A Vec3f is Float32 with extent 3.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DataType {
    /// The base plain old data type
    pub pod: PlainOldDataType,
    /// Number of POD values per element
    pub extent: u8,
}

impl DataType {
    #[inline]
    pub const fn new(pod: PlainOldDataType, extent: u8) -> Self {
        Self { pod, extent }
    }

    #[inline]
    pub const fn scalar(pod: PlainOldDataType) -> Self {
        Self { pod, extent: 1 }
    }

    /// Bytes per element, `None` for string types.
    #[inline]
    pub const fn num_bytes(&self) -> Option<usize> {
        match self.pod.fixed_size() {
            Some(size) => Some(size * self.extent as usize),
            None => None,
        }
    }

    /// Returns true if this is a valid (known) type.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        !matches!(self.pod, PlainOldDataType::Unknown) && self.extent > 0
    }

    pub const UNKNOWN: Self = Self::new(PlainOldDataType::Unknown, 0);

    pub const BOOL: Self = Self::scalar(PlainOldDataType::Boolean);
    pub const INT32: Self = Self::scalar(PlainOldDataType::Int32);
    pub const UINT32: Self = Self::scalar(PlainOldDataType::Uint32);
    pub const FLOAT32: Self = Self::scalar(PlainOldDataType::Float32);
    pub const FLOAT64: Self = Self::scalar(PlainOldDataType::Float64);
    pub const STRING: Self = Self::scalar(PlainOldDataType::String);
    pub const WSTRING: Self = Self::scalar(PlainOldDataType::Wstring);

    pub const VEC2F: Self = Self::new(PlainOldDataType::Float32, 2);
    pub const VEC3F: Self = Self::new(PlainOldDataType::Float32, 3);
    pub const VEC3D: Self = Self::new(PlainOldDataType::Float64, 3);
    pub const MAT44F: Self = Self::new(PlainOldDataType::Float32, 16);
}

impl fmt::Debug for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.extent == 1 {
            write!(f, "{}", self.pod)
        } else {
            write!(f, "{}[{}]", self.pod, self.extent)
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_sizes() {
        assert_eq!(DataType::BOOL.num_bytes(), Some(1));
        assert_eq!(DataType::VEC3F.num_bytes(), Some(12));
        assert_eq!(DataType::MAT44F.num_bytes(), Some(64));
        assert_eq!(DataType::STRING.num_bytes(), None);
    }

    #[test]
    fn test_data_type_display() {
        assert_eq!(DataType::FLOAT32.to_string(), "float32_t");
        assert_eq!(DataType::VEC3F.to_string(), "float32_t[3]");
    }

    #[test]
    fn test_data_type_validity() {
        assert!(DataType::VEC3F.is_valid());
        assert!(!DataType::UNKNOWN.is_valid());
        assert!(!DataType::new(PlainOldDataType::Float32, 0).is_valid());
    }
}
