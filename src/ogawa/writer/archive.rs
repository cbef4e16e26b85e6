//! Ogawa archive writer state shared by all properties of a write session.
//!
//! The block store, the written-sample registry and the time sampling
//! registry live behind one lock. Dedup insertion and watermark raises are
//! read-then-write sequences that must not interleave between writers.

use std::path::Path;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use tracing::debug;

use super::object::OObject;
use super::store::{BlockStore, StoreStats, StreamBlockStore};
use super::written::WrittenSampleMap;
use crate::core::TimeSampling;
use crate::util::{Error, Result};

/// Mutable archive-scoped state.
pub(crate) struct ArchiveInner {
    pub(crate) store: Box<dyn BlockStore>,
    pub(crate) written_samples: WrittenSampleMap,
    pub(crate) dedup_enabled: bool,
    time_samplings: Vec<TimeSampling>,
    max_samples: Vec<u32>,
}

impl ArchiveInner {
    pub(crate) fn time_sampling(&self, index: u32) -> Result<TimeSampling> {
        self.time_samplings
            .get(index as usize)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("time sampling {}", index)))
    }

    /// Raise the stored maximum for a time sampling; never lowers it.
    pub(crate) fn raise_max_samples(&mut self, index: u32, num_samples: u32) {
        if let Some(max) = self.max_samples.get_mut(index as usize) {
            if *max < num_samples {
                debug!("Time sampling {}: max samples {} -> {}", index, *max, num_samples);
                *max = num_samples;
            }
        }
    }
}

/// Ogawa archive writer.
pub struct OArchive {
    name: String,
    inner: Mutex<ArchiveInner>,
}

impl OArchive {
    /// Create a file-backed archive.
    pub fn create(path: impl AsRef<Path>) -> Result<Arc<Self>> {
        let name = path.as_ref().to_string_lossy().to_string();
        let store = StreamBlockStore::create(&path)?;
        debug!("Creating archive: {}", name);
        Ok(Self::with_store(name, store))
    }

    /// Create an archive over an in-memory stream.
    pub fn in_memory(name: impl Into<String>) -> Result<Arc<Self>> {
        Ok(Self::with_store(name, StreamBlockStore::in_memory()?))
    }

    /// Create an archive over any block store.
    ///
    /// Time sampling index 0 is always the identity sampling.
    pub fn with_store(name: impl Into<String>, store: impl BlockStore + 'static) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            inner: Mutex::new(ArchiveInner {
                store: Box::new(store),
                written_samples: WrittenSampleMap::new(),
                dedup_enabled: true,
                time_samplings: vec![TimeSampling::identity()],
                max_samples: vec![0],
            }),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Top-level object of this archive.
    pub fn top(self: &Arc<Self>) -> Arc<OObject> {
        OObject::new(Arc::clone(self), "ABC")
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, ArchiveInner> {
        self.inner.lock()
    }

    /// Enable or disable archive-wide content deduplication.
    pub fn set_dedup_enabled(&self, enabled: bool) {
        self.inner.lock().dedup_enabled = enabled;
    }

    pub fn is_dedup_enabled(&self) -> bool {
        self.inner.lock().dedup_enabled
    }

    /// Number of distinct payloads registered for dedup.
    pub fn written_sample_count(&self) -> usize {
        self.inner.lock().written_samples.len()
    }

    /// Add a time sampling and return its index.
    ///
    /// An equivalent existing sampling is reused.
    pub fn add_time_sampling(&self, ts: TimeSampling) -> u32 {
        let mut inner = self.inner.lock();
        if let Some(i) = inner.time_samplings.iter().position(|t| t.is_equivalent(&ts)) {
            return i as u32;
        }
        inner.time_samplings.push(ts);
        inner.max_samples.push(0);
        (inner.time_samplings.len() - 1) as u32
    }

    pub fn num_time_samplings(&self) -> usize {
        self.inner.lock().time_samplings.len()
    }

    /// Get a time sampling by index.
    pub fn time_sampling(&self, index: u32) -> Result<TimeSampling> {
        self.inner.lock().time_sampling(index)
    }

    /// Largest sample count any property reported for a time sampling.
    pub fn max_num_samples_for_time_sampling_index(&self, index: u32) -> Option<u32> {
        self.inner.lock().max_samples.get(index as usize).copied()
    }

    /// Raise the watermark for a time sampling. Lower counts are ignored.
    pub fn set_max_num_samples_for_time_sampling_index(&self, index: u32, num_samples: u32) {
        self.inner.lock().raise_max_samples(index, num_samples);
    }

    pub fn store_stats(&self) -> StoreStats {
        self.inner.lock().store.stats()
    }

    pub fn flush(&self) -> Result<()> {
        self.inner.lock().store.flush()
    }
}
