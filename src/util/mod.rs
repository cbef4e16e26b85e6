//! Basic types shared by the writer.
//!
//! - [`PlainOldDataType`] - storage element types
//! - [`DataType`] - POD + extent
//! - [`Dimensions`] - sample shape
//! - [`Error`] / [`Result`] - error handling

mod pod;
mod data_type;
mod error;
mod dimensions;

pub use pod::*;
pub use data_type::*;
pub use error::*;
pub use dimensions::*;

/// Time value in seconds.
pub type Chrono = f64;
