//! Append-only block store.
//!
//! Blocks are written once and never modified. Per-index sample records
//! reference payload blocks by position, so a payload can back any number
//! of timeline indices without its bytes being written again.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::stream::OStream;
use crate::core::ArraySampleKey;
use crate::ogawa::format::{
    make_data_offset, CURRENT_VERSION, DATA_KEY_SIZE, EMPTY_DATA, OGAWA_MAGIC, NOT_FROZEN_FLAG,
};
use crate::util::{Dimensions, PlainOldDataType, Result};

/// Position of a written block. Position 0 is the empty block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BlockRef(u64);

impl BlockRef {
    pub const EMPTY: Self = Self(0);

    pub const fn new(pos: u64) -> Self {
        Self(pos)
    }

    #[inline]
    pub const fn pos(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Group child offset for this block as data.
    #[inline]
    pub const fn data_offset(self) -> u64 {
        make_data_offset(self.0)
    }
}

/// Per-index record of an array property: payload plus dimensions.
///
/// `dims` is [`BlockRef::EMPTY`] when the shape can be inferred from the
/// payload size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleRecord {
    pub data: BlockRef,
    pub dims: BlockRef,
}

impl SampleRecord {
    /// The two group children of this record.
    pub fn offsets(&self) -> [u64; 2] {
        let dims = if self.dims.is_empty() {
            EMPTY_DATA
        } else {
            self.dims.data_offset()
        };
        [self.data.data_offset(), dims]
    }
}

/// Counters of blocks written to a store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub payload_blocks: usize,
    pub dimension_blocks: usize,
    pub group_blocks: usize,
    pub bytes_written: u64,
}

/// Append-only storage of opaque binary blocks.
pub trait BlockStore: Send {
    /// Write a payload block prefixed by the key's digest.
    fn write_block(&mut self, key: &ArraySampleKey, data: &[u8]) -> Result<BlockRef>;

    /// Materialize a sample record pointing at an already written payload.
    ///
    /// Dimension bytes are only written when the shape cannot be inferred
    /// from the payload: rank above one, or string elements.
    fn write_reference(
        &mut self,
        data: BlockRef,
        dims: &Dimensions,
        pod: PlainOldDataType,
    ) -> Result<SampleRecord>;

    /// Write a group of child offsets.
    fn write_group(&mut self, children: &[u64]) -> Result<BlockRef>;

    fn stats(&self) -> StoreStats;

    fn flush(&mut self) -> Result<()>;
}

/// Whether a sample of this shape needs an explicit dimension block.
#[inline]
pub fn needs_dimensions(dims: &Dimensions, pod: PlainOldDataType) -> bool {
    dims.rank() > 1 || pod.is_string()
}

/// Block store writing the Ogawa layout to an output stream.
pub struct StreamBlockStore<W: Write> {
    stream: OStream<W>,
    stats: StoreStats,
}

impl StreamBlockStore<BufWriter<File>> {
    /// Create a store over a new file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_stream(OStream::create(path)?)
    }
}

impl StreamBlockStore<Vec<u8>> {
    pub fn in_memory() -> Result<Self> {
        Self::with_stream(OStream::new(Vec::new()))
    }
}

impl<W: Write + Send> StreamBlockStore<W> {
    /// Wrap a stream and write the stream header.
    pub fn with_stream(mut stream: OStream<W>) -> Result<Self> {
        stream.write_bytes(OGAWA_MAGIC)?;
        stream.write_u8(NOT_FROZEN_FLAG)?;
        stream.write_bytes(&CURRENT_VERSION.to_be_bytes())?;
        // Root position, patched when the archive is finalized.
        stream.write_u64(0)?;
        Ok(Self {
            stream,
            stats: StoreStats::default(),
        })
    }

    pub fn stream(&self) -> &OStream<W> {
        &self.stream
    }

    pub fn into_stream(self) -> OStream<W> {
        self.stream
    }

    fn write_data(&mut self, data: &[u8]) -> Result<BlockRef> {
        if data.is_empty() {
            return Ok(BlockRef::EMPTY);
        }
        let pos = self.stream.pos();
        self.stream.write_u64(data.len() as u64)?;
        self.stream.write_bytes(data)?;
        self.stats.bytes_written += 8 + data.len() as u64;
        Ok(BlockRef(pos))
    }
}

impl<W: Write + Send> BlockStore for StreamBlockStore<W> {
    fn write_block(&mut self, key: &ArraySampleKey, data: &[u8]) -> Result<BlockRef> {
        if data.is_empty() {
            return Ok(BlockRef::EMPTY);
        }
        let pos = self.stream.pos();
        let total = DATA_KEY_SIZE + data.len();
        self.stream.write_u64(total as u64)?;
        self.stream.write_bytes(&key.digest)?;
        self.stream.write_bytes(data)?;
        self.stats.payload_blocks += 1;
        self.stats.bytes_written += 8 + total as u64;
        Ok(BlockRef(pos))
    }

    fn write_reference(
        &mut self,
        data: BlockRef,
        dims: &Dimensions,
        pod: PlainOldDataType,
    ) -> Result<SampleRecord> {
        let dims_ref = if needs_dimensions(dims, pod) {
            let block = self.write_data(&dims.to_le_bytes())?;
            if !block.is_empty() {
                self.stats.dimension_blocks += 1;
            }
            block
        } else {
            BlockRef::EMPTY
        };
        Ok(SampleRecord { data, dims: dims_ref })
    }

    fn write_group(&mut self, children: &[u64]) -> Result<BlockRef> {
        if children.is_empty() {
            return Ok(BlockRef::EMPTY);
        }
        let pos = self.stream.pos();
        self.stream.write_u64(children.len() as u64)?;
        for &child in children {
            self.stream.write_u64(child)?;
        }
        self.stats.group_blocks += 1;
        self.stats.bytes_written += 8 * (children.len() as u64 + 1);
        Ok(BlockRef(pos))
    }

    fn stats(&self) -> StoreStats {
        self.stats
    }

    fn flush(&mut self) -> Result<()> {
        self.stream.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ArraySample;
    use crate::ogawa::format::{FROZEN_OFFSET, HEADER_SIZE, VERSION_OFFSET};
    use crate::util::DataType;

    #[test]
    fn test_header_written() -> Result<()> {
        let store = StreamBlockStore::in_memory()?;
        assert_eq!(store.stream().pos(), HEADER_SIZE as u64);
        assert_eq!(store.stream().get_ref().len(), HEADER_SIZE);

        let bytes = store.into_stream().into_inner();
        assert_eq!(&bytes[..FROZEN_OFFSET], OGAWA_MAGIC);
        assert_eq!(bytes[FROZEN_OFFSET], NOT_FROZEN_FLAG);
        assert_eq!(
            &bytes[VERSION_OFFSET..VERSION_OFFSET + 2],
            &CURRENT_VERSION.to_be_bytes()
        );
        assert_eq!(&bytes[VERSION_OFFSET + 2..], &[0u8; 8]);
        Ok(())
    }

    #[test]
    fn test_keyed_block_layout() -> Result<()> {
        let values = [1.0f32, 2.0, 3.0];
        let sample = ArraySample::from_pod(&values, 3);
        let key = sample.key()?;

        let mut store = StreamBlockStore::in_memory()?;
        let block = store.write_block(&key, sample.data())?;
        assert_eq!(block.pos(), HEADER_SIZE as u64);
        assert_eq!(store.stats().payload_blocks, 1);

        let bytes = store.into_stream().into_inner();
        let start = HEADER_SIZE;
        assert_eq!(&bytes[start..start + 8], &(16u64 + 12).to_le_bytes());
        assert_eq!(&bytes[start + 8..start + 24], &key.digest);
        assert_eq!(&bytes[start + 24..], sample.data());
        Ok(())
    }

    #[test]
    fn test_empty_payload() -> Result<()> {
        let sample = ArraySample::new(&[], DataType::FLOAT32, 0usize);
        let mut store = StreamBlockStore::in_memory()?;
        let block = store.write_block(&sample.key()?, &[])?;
        assert!(block.is_empty());
        assert_eq!(store.stats(), StoreStats::default());
        Ok(())
    }

    #[test]
    fn test_reference_dimensions() -> Result<()> {
        let mut store = StreamBlockStore::in_memory()?;
        let data = BlockRef::new(100);

        let flat = store.write_reference(data, &Dimensions::d1(4), PlainOldDataType::Float32)?;
        assert!(flat.dims.is_empty());
        assert_eq!(flat.offsets(), [data.data_offset(), EMPTY_DATA]);

        let image = store.write_reference(data, &Dimensions::d2(2, 2), PlainOldDataType::Float32)?;
        assert!(!image.dims.is_empty());

        let strings = store.write_reference(data, &Dimensions::d1(3), PlainOldDataType::String)?;
        assert!(!strings.dims.is_empty());

        assert_eq!(store.stats().dimension_blocks, 2);
        assert_eq!(store.stats().payload_blocks, 0);
        Ok(())
    }
}
