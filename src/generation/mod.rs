//! Room generation from clustered feature vectors.
//!
//! A run goes through these stages:
//!
//! 1. [`FeatureFetcher`](crate::features::FeatureFetcher) joins the weighted
//!    feature tables into one vector per item
//! 2. [`GridSize::fit`] shrinks the requested grid towards the item count
//! 3. the SOM is trained and every item is mapped to a node ([`NodeMap`])
//! 4. [`LayoutEngine`] builds one exhibit per node, [`exhibits_to_walls`]
//!    places them on the four walls
//! 5. [`walls_to_room`] computes the room bounds and attaches metadata
//!
//! [`SomRoomGenerator`] drives all of them.

mod assemble;
mod fit;
mod layout;
mod node_map;
mod pipeline;
mod request;

pub use assemble::{empty_room, name_suffix, room_to_exhibition, walls_to_room, EXHIBITION_TEXT, ROOM_TEXT};
pub use fit::GridSize;
pub use layout::{
    exhibit_size, exhibits_to_walls, room_size_from_walls, wall_position, LayoutEngine, PLACEHOLDER_NAME,
};
pub use node_map::{Candidate, NodeMap};
pub use pipeline::SomRoomGenerator;
pub use request::{FeatureWeight, GenerationRequest};
