//! Ogawa writer: block store, written-sample registry and array properties.
//!
//! - [`OArchive`] - archive-scoped state behind one lock
//! - [`OObject`] / [`OCompoundProperty`] - parent links of a property
//! - [`OArrayProperty`] - per-property sample timeline
//! - [`BlockStore`] - append-only storage the timeline writes into

mod stream;
mod store;
mod written;
mod group;
mod object;
mod property;
mod array;
mod archive;

pub use archive::OArchive;
pub use array::{FrozenArrayProperty, OArrayProperty};
pub use group::OGroup;
pub use object::OObject;
pub use property::OCompoundProperty;
pub use store::{needs_dimensions, BlockRef, BlockStore, SampleRecord, StoreStats, StreamBlockStore};
pub use stream::OStream;
pub use written::{WrittenSampleId, WrittenSampleIdPtr, WrittenSampleMap};
