//! Ogawa block layout constants.

/// Magic bytes at the start of an Ogawa stream.
pub const OGAWA_MAGIC: &[u8; 5] = b"Ogawa";

/// Stream header: magic, frozen flag, version (u16 BE), root position (u64 LE).
pub const HEADER_SIZE: usize = 16;

pub const FROZEN_OFFSET: usize = 5;
pub const VERSION_OFFSET: usize = 6;

pub const CURRENT_VERSION: u16 = 1;
pub const NOT_FROZEN_FLAG: u8 = 0x00;

/// Size of the digest prefix of keyed payload blocks.
pub const DATA_KEY_SIZE: usize = 16;

/// MSB set marks a data child, clear marks a group child.
pub const TYPE_FLAG_MASK: u64 = 1 << 63;

pub const OFFSET_MASK: u64 = !TYPE_FLAG_MASK;

/// Data child with no bytes. Stands in for dimension records that can be
/// inferred from the payload size.
pub const EMPTY_DATA: u64 = TYPE_FLAG_MASK;

#[inline]
pub const fn make_data_offset(pos: u64) -> u64 {
    pos | TYPE_FLAG_MASK
}

#[inline]
pub const fn make_group_offset(pos: u64) -> u64 {
    pos & OFFSET_MASK
}

#[inline]
pub const fn is_data_offset(offset: u64) -> bool {
    (offset & TYPE_FLAG_MASK) != 0
}

#[inline]
pub const fn extract_offset(offset: u64) -> u64 {
    offset & OFFSET_MASK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets() {
        let data = make_data_offset(0x5678);
        assert!(is_data_offset(data));
        assert_eq!(extract_offset(data), 0x5678);
        assert_eq!(data, 0x8000_0000_0000_5678);

        let group = make_group_offset(0x1234);
        assert!(!is_data_offset(group));
        assert_eq!(group, 0x1234);

        assert!(is_data_offset(EMPTY_DATA));
        assert_eq!(extract_offset(EMPTY_DATA), 0);
    }
}
