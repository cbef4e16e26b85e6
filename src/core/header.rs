//! Property headers.

use crate::util::DataType;

/// Type of property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PropertyType {
    /// Single value per sample.
    #[default]
    Scalar,
    /// Variable-length array of values per sample.
    Array,
    /// Container for other properties.
    Compound,
}

/// Header information for a property.
///
/// `name`, `property_type` and `data_type` are fixed once a writer is built
/// around the header; the time sampling index is rebound through the writer.
#[derive(Clone, Debug)]
pub struct PropertyHeader {
    pub name: String,
    pub property_type: PropertyType,
    pub data_type: DataType,
    /// Index into the archive's time sampling registry (0 = identity).
    pub time_sampling_index: u32,
}

impl PropertyHeader {
    pub fn scalar(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            property_type: PropertyType::Scalar,
            data_type,
            time_sampling_index: 0,
        }
    }

    pub fn array(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            property_type: PropertyType::Array,
            data_type,
            time_sampling_index: 0,
        }
    }

    pub fn compound(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            property_type: PropertyType::Compound,
            data_type: DataType::UNKNOWN,
            time_sampling_index: 0,
        }
    }

    pub fn with_time_sampling(mut self, index: u32) -> Self {
        self.time_sampling_index = index;
        self
    }

    pub fn is_array(&self) -> bool {
        self.property_type == PropertyType::Array
    }
}
