//! Property group: the ordered children a property writes into.

use super::store::{BlockRef, BlockStore, SampleRecord};
use crate::util::{Error, Result};

/// Group of per-index sample records of one array property.
///
/// Children are appended while the property is written and persisted as a
/// single group block when the group is frozen.
#[derive(Debug, Default)]
pub struct OGroup {
    records: Vec<SampleRecord>,
    frozen: Option<BlockRef>,
}

impl OGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    pub fn num_records(&self) -> usize {
        self.records.len()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.is_some()
    }

    /// Position of the group block once frozen.
    pub fn frozen_pos(&self) -> Option<BlockRef> {
        self.frozen
    }

    pub fn add_records(&mut self, records: impl IntoIterator<Item = SampleRecord>) -> Result<()> {
        if self.is_frozen() {
            return Err(Error::Frozen);
        }
        self.records.extend(records);
        Ok(())
    }

    /// Group child offsets: payload then dimensions for each record.
    pub fn children(&self) -> Vec<u64> {
        self.records.iter().flat_map(|r| r.offsets()).collect()
    }

    /// Write the group block. Freezing twice returns the first position.
    pub fn freeze(&mut self, store: &mut dyn BlockStore) -> Result<BlockRef> {
        if let Some(pos) = self.frozen {
            return Ok(pos);
        }
        let pos = store.write_group(&self.children())?;
        self.frozen = Some(pos);
        Ok(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ogawa::format::{EMPTY_DATA, HEADER_SIZE};
    use crate::ogawa::writer::store::StreamBlockStore;

    #[test]
    fn test_freeze() -> Result<()> {
        let mut store = StreamBlockStore::in_memory()?;
        let mut group = OGroup::new();
        assert_eq!(group.frozen_pos(), None);
        let record = SampleRecord {
            data: BlockRef::new(16),
            dims: BlockRef::EMPTY,
        };
        group.add_records([record, record])?;
        assert_eq!(group.children().len(), 4);
        assert_eq!(group.children()[1], EMPTY_DATA);

        let pos = group.freeze(&mut store)?;
        assert!(group.is_frozen());
        assert_eq!(group.frozen_pos(), Some(pos));
        assert_eq!(pos.pos(), HEADER_SIZE as u64);
        assert_eq!(group.freeze(&mut store)?, pos);
        assert_eq!(store.stats().group_blocks, 1);

        assert!(matches!(group.add_records([record]), Err(Error::Frozen)));
        Ok(())
    }
}
