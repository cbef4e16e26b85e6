//! Array property writer.
//!
//! Payload bytes are written only when a sample differs from the previous
//! written one, and only if no identical payload exists anywhere in the
//! archive. Runs of unchanged samples get their per-index records when the
//! run ends, so every timeline index stays individually addressable.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use super::archive::{ArchiveInner, OArchive};
use super::group::OGroup;
use super::object::OObject;
use super::property::OCompoundProperty;
use super::store::{BlockRef, SampleRecord};
use super::written::{WrittenSampleId, WrittenSampleIdPtr};
use crate::core::{
    ArrayPropertyWriter, ArraySample, ArraySampleKey, PropertyHeader, PropertyWriter, TimeSampling,
};
use crate::util::{DataType, Error, Result};

/// Final state of an array property after its write session.
#[derive(Clone, Debug, PartialEq)]
pub struct FrozenArrayProperty {
    pub name: String,
    pub data_type: DataType,
    pub time_sampling_index: u32,
    /// Position of the property's group block.
    pub group: BlockRef,
    /// Samples requested by the caller.
    pub num_requested: u32,
    /// Samples reported to the time sampling registry; 1 for constant properties.
    pub num_samples: u32,
    pub first_changed_index: Option<u32>,
    pub last_changed_index: u32,
    pub is_scalar_like: bool,
    pub is_homogenous: bool,
}

impl FrozenArrayProperty {
    /// Every requested sample held the same content.
    pub fn is_constant(&self) -> bool {
        self.num_samples == 1 && self.num_requested >= 1
    }
}

/// Writer for one variable-length array property.
pub struct OArrayProperty {
    parent: Arc<OCompoundProperty>,
    group: OGroup,
    header: PropertyHeader,
    time_sampling: TimeSampling,
    next_sample_index: u32,
    first_changed_index: Option<u32>,
    last_changed_index: u32,
    is_scalar_like: bool,
    is_homogenous: bool,
    previous_written: Option<WrittenSampleIdPtr>,
    closed: bool,
}

impl OArrayProperty {
    /// Build a writer around a header and an empty group.
    pub fn new(parent: Arc<OCompoundProperty>, group: OGroup, header: PropertyHeader) -> Result<Self> {
        if header.name.is_empty() {
            return Err(Error::invalid("property header has no name"));
        }
        if group.is_frozen() || group.num_records() > 0 {
            return Err(Error::invalid(format!(
                "group for property '{}' is already in use",
                header.name
            )));
        }
        if !header.is_array() {
            return Err(Error::mismatch(
                "array property",
                format!("{:?} property", header.property_type),
            ));
        }
        if !header.data_type.is_valid() {
            return Err(Error::invalid(format!(
                "property '{}' has invalid data type {}",
                header.name, header.data_type
            )));
        }

        let time_sampling = parent.archive().time_sampling(header.time_sampling_index)?;

        Ok(Self {
            parent,
            group,
            header,
            time_sampling,
            next_sample_index: 0,
            first_changed_index: None,
            last_changed_index: 0,
            is_scalar_like: true,
            is_homogenous: true,
            previous_written: None,
            closed: false,
        })
    }

    pub fn parent(&self) -> &Arc<OCompoundProperty> {
        &self.parent
    }

    pub fn object(&self) -> &Arc<OObject> {
        self.parent.object()
    }

    pub fn archive(&self) -> &Arc<OArchive> {
        self.parent.archive()
    }

    pub fn group(&self) -> &OGroup {
        &self.group
    }

    pub fn time_sampling_index(&self) -> u32 {
        self.header.time_sampling_index
    }

    /// Index of the first sample written, `None` before any sample.
    pub fn first_changed_index(&self) -> Option<u32> {
        self.first_changed_index
    }

    pub fn last_changed_index(&self) -> u32 {
        self.last_changed_index
    }

    /// No written sample so far had more or fewer than one element.
    pub fn is_scalar_like(&self) -> bool {
        self.is_scalar_like
    }

    /// Every written sample had the same element count as its predecessor.
    pub fn is_homogenous(&self) -> bool {
        self.is_homogenous
    }

    /// Sample count reported at close.
    ///
    /// A property that never changed after its first sample collapses to one
    /// sample, however many were requested.
    pub fn effective_num_samples(&self) -> u32 {
        if self.last_changed_index == 0 && self.next_sample_index > 0 {
            1
        } else {
            self.next_sample_index
        }
    }

    /// End the write session.
    ///
    /// Reports the effective sample count to the archive, writes records for a
    /// trailing run of repeats and freezes the group.
    pub fn close(mut self) -> Result<FrozenArrayProperty> {
        self.finalize()
    }

    fn check_sampling(&self) -> Result<()> {
        if self.time_sampling.allows_sample(self.next_sample_index) {
            Ok(())
        } else {
            Err(Error::SamplingExhausted {
                index: self.next_sample_index,
                stored_times: self.time_sampling.num_stored_times(),
            })
        }
    }

    /// Records for indices after the last change up to `end`, all pointing
    /// at the previous written payload.
    fn backfill(&self, inner: &mut ArchiveInner, end: u32) -> Result<Vec<SampleRecord>> {
        let Some(previous) = &self.previous_written else {
            return Ok(Vec::new());
        };
        let mut records = Vec::new();
        for index in (self.last_changed_index + 1)..end {
            trace!(
                "{}: repeating sample {} at index {}",
                self.header.name,
                self.last_changed_index,
                index
            );
            records.push(inner.store.write_reference(
                previous.data(),
                &previous.key().dims,
                self.header.data_type.pod,
            )?);
        }
        Ok(records)
    }

    fn write_changed(&mut self, sample: &ArraySample<'_>, key: ArraySampleKey) -> Result<()> {
        let encoded = sample.encoded();
        let archive = Arc::clone(self.parent.archive());
        let mut inner = archive.lock();

        let mut records = if self.first_changed_index.is_some() {
            self.backfill(&mut inner, self.next_sample_index)?
        } else {
            Vec::new()
        };

        let existing = if inner.dedup_enabled {
            inner.written_samples.find(&key)
        } else {
            None
        };
        let written = match existing {
            Some(written) => {
                debug!(
                    "{}: index {} reuses payload at {}",
                    self.header.name,
                    self.next_sample_index,
                    written.data().pos()
                );
                written
            }
            None => {
                let data = inner.store.write_block(&key, &encoded)?;
                let written = Arc::new(WrittenSampleId::new(key, data, sample.num_points()));
                if inner.dedup_enabled {
                    inner.written_samples.store(written)
                } else {
                    written
                }
            }
        };

        records.push(inner.store.write_reference(
            written.data(),
            sample.dimensions(),
            self.header.data_type.pod,
        )?);
        drop(inner);

        self.group.add_records(records)?;

        let num_points = sample.num_points();
        if num_points != 1 {
            self.is_scalar_like = false;
        }
        if let Some(previous) = &self.previous_written {
            if previous.num_points() != num_points {
                self.is_homogenous = false;
            }
        }
        self.first_changed_index.get_or_insert(self.next_sample_index);
        self.last_changed_index = self.next_sample_index;
        self.previous_written = Some(written);
        Ok(())
    }

    fn finalize(&mut self) -> Result<FrozenArrayProperty> {
        let num_samples = self.effective_num_samples();
        let archive = Arc::clone(self.parent.archive());
        let mut inner = archive.lock();

        if !self.closed {
            inner.raise_max_samples(self.header.time_sampling_index, num_samples);
            self.closed = true;
        }

        if self.last_changed_index > 0 {
            let trailing = self.backfill(&mut inner, self.next_sample_index)?;
            self.group.add_records(trailing)?;
        }
        let group = self.group.freeze(inner.store.as_mut())?;
        drop(inner);

        debug!(
            "{}: closed with {} samples ({} requested, {} records)",
            self.header.name,
            num_samples,
            self.next_sample_index,
            self.group.num_records()
        );

        Ok(FrozenArrayProperty {
            name: self.header.name.clone(),
            data_type: self.header.data_type,
            time_sampling_index: self.header.time_sampling_index,
            group,
            num_requested: self.next_sample_index,
            num_samples,
            first_changed_index: self.first_changed_index,
            last_changed_index: self.last_changed_index,
            is_scalar_like: self.is_scalar_like,
            is_homogenous: self.is_homogenous,
        })
    }
}

impl PropertyWriter for OArrayProperty {
    fn header(&self) -> &PropertyHeader {
        &self.header
    }
}

impl ArrayPropertyWriter for OArrayProperty {
    fn set_sample(&mut self, sample: &ArraySample<'_>) -> Result<()> {
        sample.validate(self.header.data_type)?;
        self.check_sampling()?;

        let key = sample.key()?.normalized();
        let changed = self.next_sample_index == 0
            || self
                .previous_written
                .as_ref()
                .map_or(true, |previous| *previous.key() != key);

        if changed {
            self.write_changed(sample, key)?;
        }
        self.next_sample_index += 1;
        Ok(())
    }

    fn set_from_previous_sample(&mut self) -> Result<()> {
        self.check_sampling()?;
        if self.next_sample_index == 0 {
            return Err(Error::InvalidState(format!(
                "{}: no previous sample to repeat",
                self.header.name
            )));
        }
        self.next_sample_index += 1;
        Ok(())
    }

    fn set_time_sampling_index(&mut self, index: u32) -> Result<()> {
        let time_sampling = self.parent.archive().time_sampling(index)?;
        if time_sampling.sampling_type.is_acyclic()
            && time_sampling.num_stored_times() < self.next_sample_index as usize
        {
            return Err(Error::SamplingExhausted {
                index: self.next_sample_index,
                stored_times: time_sampling.num_stored_times(),
            });
        }
        self.header.time_sampling_index = index;
        self.time_sampling = time_sampling;
        Ok(())
    }

    fn num_samples(&self) -> usize {
        self.next_sample_index as usize
    }
}

impl Drop for OArrayProperty {
    fn drop(&mut self) {
        if !self.closed && !self.group.is_frozen() {
            if let Err(e) = self.finalize() {
                warn!("{}: failed to close array property: {}", self.header.name, e);
            }
        }
    }
}
