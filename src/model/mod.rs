//! Exhibition data model produced by the generator.
//!
//! Containers nest as [`Exhibition`] > [`Room`] > [`Wall`] > [`Exhibit`].
//! Exhibit positions are local to their wall: `x` runs along the wall and `y`
//! points up.

mod exhibition;
mod vector;

pub use exhibition::{Axis, Direction, Exhibit, Exhibition, MetadataKey, Room, Wall};
pub use vector::Vector3;
