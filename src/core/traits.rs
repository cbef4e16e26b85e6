//! Abstract writer interfaces.

use super::{ArraySample, PropertyHeader};
use crate::util::{AlembicPod, Result};

/// Base writer interface for properties.
pub trait PropertyWriter: Send {
    /// Get the property header.
    fn header(&self) -> &PropertyHeader;

    /// Get the property name.
    fn name(&self) -> &str {
        &self.header().name
    }
}

/// Writer for variable-length array properties.
pub trait ArrayPropertyWriter: PropertyWriter {
    /// Append a sample at the next timeline index.
    fn set_sample(&mut self, sample: &ArraySample<'_>) -> Result<()>;

    /// Append a repeat of the previous sample.
    fn set_from_previous_sample(&mut self) -> Result<()>;

    /// Rebind the property to another time sampling of the archive.
    fn set_time_sampling_index(&mut self, index: u32) -> Result<()>;

    /// Number of samples requested so far.
    fn num_samples(&self) -> usize;

    /// Append a sample from typed values using the header's extent.
    fn set_sample_typed<T: AlembicPod>(&mut self, values: &[T]) -> Result<()>
    where
        Self: Sized,
    {
        let extent = self.header().data_type.extent;
        self.set_sample(&ArraySample::from_pod(values, extent))
    }

    /// Append a 1-D string sample.
    fn set_string_sample(&mut self, strings: &[impl AsRef<str>]) -> Result<()>
    where
        Self: Sized,
    {
        self.set_sample(&ArraySample::from_strings(strings))
    }
}
