//! Sample shape.

use smallvec::SmallVec;

/// Shape of an array sample.
///
/// Rank 1 is the common case (a flat list of elements); images and volumes
/// use rank 2 and 3. Rank 0 is a single element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dimensions {
    dims: SmallVec<[usize; 4]>,
}

impl Dimensions {
    /// Rank-0 shape holding one element.
    pub fn scalar() -> Self {
        Self { dims: SmallVec::new() }
    }

    pub fn d1(size: usize) -> Self {
        Self { dims: smallvec::smallvec![size] }
    }

    pub fn d2(width: usize, height: usize) -> Self {
        Self { dims: smallvec::smallvec![width, height] }
    }

    pub fn from_slice(sizes: &[usize]) -> Self {
        Self { dims: SmallVec::from_slice(sizes) }
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    pub fn sizes(&self) -> &[usize] {
        &self.dims
    }

    /// Total number of elements (product of all extents).
    ///
    /// Saturates at `usize::MAX`; use [`checked_num_points`](Self::checked_num_points)
    /// to detect shapes that do not fit.
    pub fn num_points(&self) -> usize {
        self.checked_num_points().unwrap_or(usize::MAX)
    }

    /// Element count, `None` if the product of extents overflows.
    pub fn checked_num_points(&self) -> Option<usize> {
        self.dims.iter().try_fold(1usize, |acc, d| acc.checked_mul(*d))
    }

    /// Serialized dimension record: one little-endian `u64` per extent.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.dims.iter().flat_map(|d| (*d as u64).to_le_bytes()).collect()
    }
}

impl From<usize> for Dimensions {
    fn from(size: usize) -> Self {
        Self::d1(size)
    }
}

impl From<(usize, usize)> for Dimensions {
    fn from((w, h): (usize, usize)) -> Self {
        Self::d2(w, h)
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, s) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, " x ")?;
            }
            write!(f, "{}", s)?;
        }
        write!(f, "]")
    }
}
