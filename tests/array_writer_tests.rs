//! Integration tests for array property writing against real block stores.

use std::fs;

use ogawa_array_writer::core::{ArrayPropertyWriter, ArraySample, PropertyHeader, TimeSampling};
use ogawa_array_writer::ogawa::format::{extract_offset, is_data_offset, DATA_KEY_SIZE, EMPTY_DATA, OGAWA_MAGIC};
use ogawa_array_writer::ogawa::OArchive;
use ogawa_array_writer::DataType;
use rayon::prelude::*;
use tempfile::NamedTempFile;

fn read_u64(bytes: &[u8], pos: usize) -> u64 {
    u64::from_le_bytes(bytes[pos..pos + 8].try_into().expect("8 bytes"))
}

#[test]
fn test_file_layout_of_backfilled_property() {
    let temp = NamedTempFile::new().expect("Failed to create temp file");
    let path = temp.path();

    let a = [1.0f32, 2.0, 3.0];
    let b = [4.0f32, 5.0, 6.0];

    let frozen = {
        let archive = OArchive::create(path).expect("Failed to create archive");
        let props = archive.top().add_child("pts").properties();
        let mut p = props
            .create_array_property(PropertyHeader::array("P", DataType::VEC3F))
            .expect("Failed to create property");

        p.set_sample_typed(&a).expect("sample 0");
        p.set_from_previous_sample().expect("sample 1");
        p.set_sample_typed(&a).expect("sample 2");
        p.set_sample_typed(&b).expect("sample 3");

        let frozen = p.close().expect("Failed to close property");
        archive.flush().expect("Failed to flush");
        frozen
    };

    assert_eq!(frozen.num_samples, 4);
    assert_eq!(frozen.last_changed_index, 3);

    let bytes = fs::read(path).expect("Failed to read archive");
    assert_eq!(&bytes[..5], OGAWA_MAGIC);

    // Group: child count, then (payload, dims) per index.
    let group = frozen.group.pos() as usize;
    assert_eq!(read_u64(&bytes, group), 8);
    let children: Vec<u64> = (0..8).map(|i| read_u64(&bytes, group + 8 + i * 8)).collect();

    for pair in children.chunks(2) {
        assert!(is_data_offset(pair[0]));
        assert_eq!(pair[1], EMPTY_DATA);
    }
    // Indices 0..=2 share one payload block.
    assert_eq!(children[0], children[2]);
    assert_eq!(children[0], children[4]);
    assert_ne!(children[0], children[6]);

    let payload = extract_offset(children[0]) as usize;
    assert_eq!(read_u64(&bytes, payload) as usize, DATA_KEY_SIZE + 12);
    let start = payload + 8 + DATA_KEY_SIZE;
    let stored: Vec<f32> = bytes[start..start + 12]
        .chunks_exact(4)
        .map(bytemuck::pod_read_unaligned)
        .collect();
    assert_eq!(stored, a);

    let key = ArraySample::from_pod(&a, 3).key().expect("key");
    assert_eq!(&bytes[payload + 8..payload + 8 + DATA_KEY_SIZE], &key.digest);
}

#[test]
fn test_concurrent_properties_share_payloads() {
    let archive = OArchive::in_memory("parallel").expect("Failed to create archive");
    let ts = archive.add_time_sampling(TimeSampling::uniform(1.0 / 24.0, 0.0));
    let props = archive.top().add_child("crowd").properties();

    let shared_a = [0i32, 1, 2, 3];
    let shared_b = [4i32, 5, 6, 7];

    let results: Vec<_> = (0..8i32)
        .into_par_iter()
        .map(|i| {
            let header = PropertyHeader::array(format!("agent{}", i), DataType::INT32)
                .with_time_sampling(ts);
            let mut p = props.create_array_property(header)?;
            p.set_sample_typed(&shared_a)?;
            p.set_sample_typed(&shared_a)?;
            p.set_sample_typed(&shared_b)?;
            p.set_sample_typed(&[100 + i, 0, 0, 0])?;
            p.close()
        })
        .collect::<Result<_, _>>()
        .expect("Failed to write properties");

    assert_eq!(results.len(), 8);
    assert!(results.iter().all(|f| f.num_samples == 4 && f.is_homogenous));

    // Two shared payloads plus one unique payload per agent.
    let stats = archive.store_stats();
    assert_eq!(stats.payload_blocks, 10);
    assert_eq!(archive.written_sample_count(), 10);
    assert_eq!(stats.group_blocks, 8);
    assert_eq!(archive.max_num_samples_for_time_sampling_index(ts), Some(4));
}

#[test]
fn test_constant_and_animated_properties_in_one_archive() {
    let archive = OArchive::in_memory("mixed").expect("Failed to create archive");
    let ts = archive.add_time_sampling(TimeSampling::acyclic(vec![0.0, 0.1, 0.5, 2.0, 3.0]));
    let props = archive.top().add_child("mesh").properties();

    let header = |name: &str| PropertyHeader::array(name, DataType::INT32).with_time_sampling(ts);
    let mut counts = props.create_array_property(header(".faceCounts")).expect("counts");
    let mut indices = props.create_array_property(header(".faceIndices")).expect("indices");

    for frame in 0..5 {
        counts.set_sample_typed(&[3i32, 3]).expect("counts sample");
        indices
            .set_sample_typed(&[0i32, 1, 2, frame, frame + 1, frame + 2])
            .expect("indices sample");
    }
    assert!(counts.set_from_previous_sample().is_err());

    let counts = counts.close().expect("close counts");
    assert!(counts.is_constant());
    assert_eq!(counts.num_samples, 1);

    let indices = indices.close().expect("close indices");
    assert_eq!(indices.num_samples, 5);
    assert_eq!(archive.max_num_samples_for_time_sampling_index(ts), Some(5));
}
