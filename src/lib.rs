//! # ogawa-array-writer
//!
//! Sample writer for time-varying array properties of Ogawa (.abc) archives.
//!
//! Each [`OArrayProperty`](ogawa::OArrayProperty) accepts one sample per
//! timeline index. Payload bytes are stored once per distinct content across
//! the whole archive; unchanged samples become references to the previously
//! written payload, and every index still gets its own record.
//!
//! ## Modules
//!
//! - [`util`] - Basic types (POD, DataType, Dimensions, errors)
//! - [`core`] - Time sampling, headers, samples and writer traits
//! - [`ogawa`] - Block store, archive state and the array property writer
//!
//! ## Example
//!
//! ```ignore
//! use ogawa_array_writer::prelude::*;
//!
//! let archive = OArchive::create("points.abc")?;
//! let ts = archive.add_time_sampling(TimeSampling::uniform(1.0 / 24.0, 0.0));
//! let props = archive.top().add_child("points").properties();
//!
//! let mut p = props.create_array_property(
//!     PropertyHeader::array("P", DataType::VEC3F).with_time_sampling(ts),
//! )?;
//! p.set_sample_typed(&[0.0f32, 1.0, 2.0])?;
//! p.set_from_previous_sample()?;
//! let frozen = p.close()?;
//! ```

pub mod util;
pub mod core;
pub mod ogawa;

pub use util::{DataType, Dimensions, Error, PlainOldDataType, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        ArrayPropertyWriter, ArraySample, PropertyHeader, PropertyWriter, TimeSampling,
    };
    pub use crate::ogawa::{FrozenArrayProperty, OArchive, OArrayProperty, OCompoundProperty, OObject};
    pub use crate::util::{DataType, Dimensions, Error, PlainOldDataType, Result};
}
