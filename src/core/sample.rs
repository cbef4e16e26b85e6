//! Array samples and their content keys.

use std::borrow::Cow;
use std::io::Cursor;

use crate::util::{AlembicPod, DataType, Dimensions, Error, PlainOldDataType, Result};

/// 128-bit content digest of an encoded sample.
pub type SampleDigest = [u8; 16];

/// MurmurHash3 x64_128 digest of encoded sample bytes.
///
/// On big-endian targets values are swapped to little-endian first so the
/// digest is identical across platforms.
pub fn compute_digest(data: &[u8], pod: PlainOldDataType) -> Result<SampleDigest> {
    let unit = pod.hash_unit().unwrap_or(1);
    let bytes: Cow<'_, [u8]> = if cfg!(target_endian = "big") && unit > 1 {
        Cow::Owned(data.chunks(unit).flat_map(|c| c.iter().rev().copied()).collect())
    } else {
        Cow::Borrowed(data)
    };
    let hash = murmur3::murmur3_x64_128(&mut Cursor::new(bytes.as_ref()), 0)?;
    Ok(hash.to_le_bytes())
}

/// Content key of an array sample.
///
/// Two samples with equal keys have identical encoded bytes and shape, so
/// one stored payload can serve both.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArraySampleKey {
    /// Size of the encoded payload.
    pub num_bytes: usize,
    /// POD the sample was declared with.
    pub orig_pod: PlainOldDataType,
    /// POD the sample is stored as.
    pub read_pod: PlainOldDataType,
    pub digest: SampleDigest,
    pub dims: Dimensions,
}

impl ArraySampleKey {
    /// Masks out the POD tags.
    ///
    /// Stored payloads are raw bytes, so samples that only differ in declared
    /// element type can share one block.
    pub fn normalized(mut self) -> Self {
        self.orig_pod = PlainOldDataType::Int8;
        self.read_pod = PlainOldDataType::Int8;
        self
    }
}

/// One value of an array property at one timeline index.
#[derive(Clone, Debug)]
pub struct ArraySample<'a> {
    data: Cow<'a, [u8]>,
    data_type: DataType,
    dims: Dimensions,
}

impl<'a> ArraySample<'a> {
    /// Sample over raw bytes.
    ///
    /// String samples hold NUL-terminated elements (`Wstring`: 4-byte zero
    /// units); the final terminator may be omitted.
    pub fn new(data: &'a [u8], data_type: DataType, dims: impl Into<Dimensions>) -> Self {
        Self {
            data: Cow::Borrowed(data),
            data_type,
            dims: dims.into(),
        }
    }

    /// 1-D sample over typed values, `extent` values per element.
    pub fn from_pod<T: AlembicPod>(values: &'a [T], extent: u8) -> Self {
        let per_element = extent.max(1) as usize;
        Self {
            data: Cow::Borrowed(bytemuck::cast_slice(values)),
            data_type: DataType::new(T::POD_TYPE, extent),
            dims: Dimensions::d1(values.len() / per_element),
        }
    }

    /// 1-D string sample.
    pub fn from_strings(strings: &[impl AsRef<str>]) -> ArraySample<'static> {
        let mut data = Vec::new();
        for s in strings {
            data.extend_from_slice(s.as_ref().as_bytes());
            data.push(0);
        }
        ArraySample {
            data: Cow::Owned(data),
            data_type: DataType::STRING,
            dims: Dimensions::d1(strings.len()),
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dims
    }

    pub fn num_points(&self) -> usize {
        self.dims.num_points()
    }

    /// Payload bytes as stored, with the final string terminator in place.
    pub fn encoded(&self) -> Cow<'_, [u8]> {
        let data: &[u8] = &self.data;
        match self.data_type.pod {
            PlainOldDataType::String if data.last().is_some_and(|b| *b != 0) => {
                let mut out = data.to_vec();
                out.push(0);
                Cow::Owned(out)
            }
            PlainOldDataType::Wstring if !data.is_empty() && !ends_with_wide_nul(data) => {
                let mut out = data.to_vec();
                out.extend_from_slice(&[0; 4]);
                Cow::Owned(out)
            }
            _ => Cow::Borrowed(data),
        }
    }

    /// Check data type and shape against the property's declared type.
    pub fn validate(&self, expected: DataType) -> Result<()> {
        if self.data_type != expected {
            return Err(Error::mismatch(expected, self.data_type));
        }

        let too_large = || {
            Error::mismatch(
                format!("shape {} addressable as {}", self.dims, expected),
                format!("{} bytes", self.data.len()),
            )
        };
        let points = self.dims.checked_num_points().ok_or_else(too_large)?;
        let values = points
            .checked_mul(expected.extent as usize)
            .ok_or_else(too_large)?;
        match expected.num_bytes() {
            Some(element_size) => {
                let needed = points.checked_mul(element_size).ok_or_else(too_large)?;
                if self.data.len() != needed {
                    return Err(Error::mismatch(
                        format!("{} bytes for shape {}", needed, self.dims),
                        format!("{} bytes", self.data.len()),
                    ));
                }
            }
            None => {
                let found = count_string_elements(&self.encoded(), expected.pod);
                if found != values {
                    return Err(Error::mismatch(
                        format!("{} strings for shape {}", values, self.dims),
                        format!("{} strings", found),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Content key of this sample, POD tags as declared.
    pub fn key(&self) -> Result<ArraySampleKey> {
        let encoded = self.encoded();
        Ok(ArraySampleKey {
            num_bytes: encoded.len(),
            orig_pod: self.data_type.pod,
            read_pod: self.data_type.pod,
            digest: compute_digest(&encoded, self.data_type.pod)?,
            dims: self.dims.clone(),
        })
    }
}

fn ends_with_wide_nul(data: &[u8]) -> bool {
    data.len() >= 4 && data[data.len() - 4..].iter().all(|b| *b == 0)
}

fn count_string_elements(encoded: &[u8], pod: PlainOldDataType) -> usize {
    match pod {
        PlainOldDataType::Wstring => encoded
            .chunks_exact(4)
            .filter(|unit| unit.iter().all(|b| *b == 0))
            .count(),
        _ => encoded.iter().filter(|b| **b == 0).count(),
    }
}
