//! Archive-wide registry of written sample payloads.

use std::collections::HashMap;
use std::sync::Arc;

use super::store::BlockRef;
use crate::core::ArraySampleKey;

/// A payload that has actually been written to the block store.
#[derive(Debug)]
pub struct WrittenSampleId {
    key: ArraySampleKey,
    data: BlockRef,
    num_points: usize,
}

impl WrittenSampleId {
    pub fn new(key: ArraySampleKey, data: BlockRef, num_points: usize) -> Self {
        Self { key, data, num_points }
    }

    pub fn key(&self) -> &ArraySampleKey {
        &self.key
    }

    pub fn data(&self) -> BlockRef {
        self.data
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }
}

pub type WrittenSampleIdPtr = Arc<WrittenSampleId>;

/// Content key to written payload, shared by every property of an archive.
///
/// Entries only point forward to payload records; nothing here refers back
/// to the properties that use them.
#[derive(Default)]
pub struct WrittenSampleMap {
    map: HashMap<ArraySampleKey, WrittenSampleIdPtr>,
}

impl WrittenSampleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, key: &ArraySampleKey) -> Option<WrittenSampleIdPtr> {
        self.map.get(key).cloned()
    }

    /// Insert unless the key is already present; returns the registered record.
    pub fn store(&mut self, written: WrittenSampleIdPtr) -> WrittenSampleIdPtr {
        self.map
            .entry(written.key().clone())
            .or_insert(written)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ArraySample;
    use crate::util::Result;

    #[test]
    fn test_store_is_insert_if_absent() -> Result<()> {
        let values = [1i32, 2, 3];
        let key = ArraySample::from_pod(&values, 1).key()?.normalized();

        let mut map = WrittenSampleMap::new();
        assert!(map.find(&key).is_none());

        let first = map.store(Arc::new(WrittenSampleId::new(key.clone(), BlockRef::new(16), 3)));
        let second = map.store(Arc::new(WrittenSampleId::new(key.clone(), BlockRef::new(64), 3)));

        assert_eq!(map.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(map.find(&key).map(|w| w.data()), Some(BlockRef::new(16)));
        Ok(())
    }
}
