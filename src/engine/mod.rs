//! Pure aggregation over normalized rows.
//!
//! Nothing in here performs I/O; every function takes already fetched data
//! and returns a fresh result.

pub mod discovery;
pub mod error;
pub mod features;
pub mod genres;
pub mod normalize;
pub mod summary;
pub mod temporal;
