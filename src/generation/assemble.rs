//! Wrapping walls into rooms and rooms into exhibitions.

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::generation::layout::room_size_from_walls;
use crate::generation::NodeMap;
use crate::model::{Exhibition, MetadataKey, Room, Wall};

/// Display text prefix of generated rooms.
pub const ROOM_TEXT: &str = "Generated Room (SOM)";

/// Display name prefix of generated exhibitions.
pub const EXHIBITION_TEXT: &str = "Generated Exhibition (SOM)";

/// Local timestamp appended to generated names.
pub fn name_suffix() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

fn base_room(seed: u64) -> Room {
    let mut room = Room::new(format!("{} {}", ROOM_TEXT, name_suffix()));
    room.set_metadata(MetadataKey::Generated, "true");
    room.set_metadata(MetadataKey::Seed, seed.to_string());
    room
}

/// Room without walls, returned when there is no content to lay out.
pub fn empty_room(seed: u64) -> Room {
    base_room(seed)
}

/// Builds a room from placed walls; its size is derived from them.
///
/// With a node map, the serialized map is attached so clients can offer the
/// alternate candidates of every slot.
pub fn walls_to_room(walls: Vec<Wall>, seed: u64, node_map: Option<&NodeMap>, layout: &LayoutConfig) -> Result<Room> {
    let mut room = base_room(seed);
    room.size = room_size_from_walls(&walls, layout);
    room.walls = walls;

    if let Some(map) = node_map {
        room.set_metadata(MetadataKey::SomIds, map.to_json()?);
    }

    Ok(room)
}

/// Wraps a room into a new exhibition.
pub fn room_to_exhibition(room: Room) -> Exhibition {
    let mut exhibition = Exhibition::new(format!("{} {}", EXHIBITION_TEXT, name_suffix()));
    exhibition.set_metadata(MetadataKey::Generated, "true");
    exhibition.rooms.push(room);
    exhibition
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::layout::{exhibits_to_walls, wall_position};
    use crate::model::{Exhibit, Vector3};
    use crate::som::Prediction;

    #[test]
    fn test_empty_room() {
        let room = empty_room(7);
        assert!(room.walls.is_empty());
        assert_eq!(room.size, Vector3::default());
        assert_eq!(room.metadata["seed"], "7");
        assert_eq!(room.metadata["generated"], "true");
        assert!(room.text.starts_with(ROOM_TEXT));
    }

    #[test]
    fn test_walls_to_room() {
        let layout = LayoutConfig::default();
        let exhibits: Vec<Exhibit> = (0..4).map(|i| Exhibit::new(format!("e{}", i), "p")).collect();
        let walls = exhibits_to_walls(1, 4, exhibits, &layout);
        let map = NodeMap::from_predictions(
            4,
            &["x".to_string()],
            &[Prediction { node: 1, distance: 0.5 }],
        )
        .unwrap();

        let room = walls_to_room(walls, 42, Some(&map), &layout).unwrap();

        let last = wall_position(0, 0, &layout);
        assert_eq!(room.size, Vector3::new(last.x + 1.5, last.y + 2.0, last.x + 1.5));
        assert_eq!(room.walls.len(), 4);
        assert_eq!(room.metadata["seed"], "42");

        let decoded: NodeMap = serde_json::from_str(&room.metadata["somIds"]).unwrap();
        assert_eq!(decoded, map);
    }

    #[test]
    fn test_room_to_exhibition() {
        let exhibition = room_to_exhibition(empty_room(1));
        assert_eq!(exhibition.rooms.len(), 1);
        assert!(exhibition.name.starts_with(EXHIBITION_TEXT));
        assert_eq!(exhibition.metadata["generated"], "true");
    }
}
