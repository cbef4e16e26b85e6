//! Core layer - abstract traits and fundamental types.
//!
//! This module provides:
//! - [`TimeSampling`] - Time sampling definitions
//! - [`PropertyHeader`] - Property headers
//! - [`ArraySample`] / [`ArraySampleKey`] - Samples and their content keys
//! - Abstract traits for writing properties

mod time_sampling;
mod header;
mod sample;
mod traits;

pub use time_sampling::{TimeSampling, TimeSamplingType};
pub use header::{PropertyHeader, PropertyType};
pub use sample::{compute_digest, ArraySample, ArraySampleKey, SampleDigest};
pub use traits::{ArrayPropertyWriter, PropertyWriter};
