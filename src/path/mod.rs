//! Materialized-path addressing for reply trees
//!
//! Every post stores a path string made of fixed-width segments, one per tree
//! level. Tree order, ancestry and subtree membership are all answered with
//! string comparisons on that column, never with recursive queries.

pub mod codec;
pub mod materialized;

pub use codec::{decode, encode, PathError, ALPHABET, BASE, CAPACITY, MAX_VALUE, SEGMENT_WIDTH};
pub use materialized::MaterializedPath;
