//! Ogawa block storage and the array property write path.
//!
//! ## Stream Layout
//!
//! ```text
//! +------------------+
//! | Magic: "Ogawa"   |  5 bytes
//! +------------------+
//! | Frozen flag      |  1 byte
//! +------------------+
//! | Version          |  2 bytes (u16 BE)
//! +------------------+
//! | Root Group Pos   |  8 bytes (u64 LE)
//! +------------------+
//! | data / groups    |  size-prefixed, append-only
//! +------------------+
//! ```

pub mod format;
pub mod writer;

pub use writer::*;
