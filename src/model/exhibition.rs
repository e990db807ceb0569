//! Exhibition, room, wall and exhibit containers.

use crate::model::Vector3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Well-known metadata keys attached by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataKey {
    /// Marks a generated container.
    Generated,
    /// Seed of the generation run.
    Seed,
    /// Serialized node map of the run (room level).
    SomIds,
    /// Serialized candidate list of an exhibit's node.
    MemberIds,
}

impl MetadataKey {
    /// The string key used in metadata maps.
    pub const fn key(self) -> &'static str {
        match self {
            MetadataKey::Generated => "generated",
            MetadataKey::Seed => "seed",
            MetadataKey::SomIds => "somIds",
            MetadataKey::MemberIds => "memberIds",
        }
    }
}

/// World axis a wall runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// The X axis.
    X,
    /// The Z axis.
    Z,
}

/// Compass direction of a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// North wall.
    North,
    /// East wall.
    East,
    /// South wall.
    South,
    /// West wall.
    West,
}

impl Direction {
    /// All directions, in wall creation order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// The axis a wall facing this direction runs along.
    pub const fn axis(self) -> Axis {
        match self {
            Direction::North | Direction::South => Axis::X,
            Direction::East | Direction::West => Axis::Z,
        }
    }
}

/// A single exhibit hung on a wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exhibit {
    /// Display name (the cleaned item id for generated exhibits).
    pub name: String,
    /// Content path; empty for placeholders.
    pub path: String,
    /// Physical width/height (z unused).
    pub size: Vector3,
    /// Position in the wall's local frame.
    pub position: Vector3,
    /// Free-form metadata.
    pub metadata: BTreeMap<String, String>,
}

impl Exhibit {
    /// Creates an exhibit with zero size and position.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            size: Vector3::default(),
            position: Vector3::default(),
            metadata: BTreeMap::new(),
        }
    }

    /// Whether this exhibit stands in for an empty grid node.
    pub fn is_placeholder(&self) -> bool {
        self.path.is_empty()
    }

    /// Sets a well-known metadata entry.
    pub fn set_metadata(&mut self, key: MetadataKey, value: impl Into<String>) {
        self.metadata.insert(key.key().to_string(), value.into());
    }
}

/// A wall with its exhibits in placement order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    /// Direction the wall faces.
    pub direction: Direction,
    /// Material tag.
    pub material: String,
    /// Exhibits in placement order.
    pub exhibits: Vec<Exhibit>,
}

impl Wall {
    /// Creates an empty wall.
    pub fn new(direction: Direction, material: impl Into<String>) -> Self {
        Self {
            direction,
            material: material.into(),
            exhibits: Vec::new(),
        }
    }
}

/// A room made of walls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Display text.
    pub text: String,
    /// Bounding size, derived from the walls.
    pub size: Vector3,
    /// Walls of the room.
    pub walls: Vec<Wall>,
    /// Free-form metadata.
    pub metadata: BTreeMap<String, String>,
}

impl Room {
    /// Creates a room without walls.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: Vector3::default(),
            walls: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Sets a well-known metadata entry.
    pub fn set_metadata(&mut self, key: MetadataKey, value: impl Into<String>) {
        self.metadata.insert(key.key().to_string(), value.into());
    }

    /// Total number of exhibits across all walls.
    pub fn exhibit_count(&self) -> usize {
        self.walls.iter().map(|w| w.exhibits.len()).sum()
    }
}

/// An exhibition made of rooms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exhibition {
    /// Display name.
    pub name: String,
    /// Rooms in order.
    pub rooms: Vec<Room>,
    /// Free-form metadata.
    pub metadata: BTreeMap<String, String>,
}

impl Exhibition {
    /// Creates an exhibition without rooms.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rooms: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Sets a well-known metadata entry.
    pub fn set_metadata(&mut self, key: MetadataKey, value: impl Into<String>) {
        self.metadata.insert(key.key().to_string(), value.into());
    }
}
