//! Exhibit sizing, wall placement and room bounds.
//!
//! ## Placement
//!
//! Representatives are consumed in node order. For every grid row, each of
//! the four walls in turn takes `columns / 4` consecutive exhibits:
//!
//! ```text
//! row 0: N N  E E  S S  W W      (columns = 8)
//! row 1: N N  E E  S S  W W
//! ```
//!
//! Positions are local to the wall, `x` along the wall and `y` upwards:
//!
//! ```text
//! x = (longer_side_length + padding) * column + padding
//! y = (longer_side_length + padding) * row    + base_height
//! ```

use crate::config::{Config, LayoutConfig, RemainderPolicy};
use crate::error::{Result, RoomgenError};
use crate::generation::{Candidate, NodeMap};
use crate::model::{Axis, Direction, Exhibit, MetadataKey, Vector3, Wall};
use crate::retrieval::{probe_dimensions, ObjectSource};
use log::{debug, warn};
use rayon::prelude::*;

/// Name given to exhibits standing in for empty nodes.
pub const PLACEHOLDER_NAME: &str = "Empty Exhibit";

/// Physical size of an exhibit for an image of the given pixel dimensions.
///
/// The longer side becomes `default_long_side`, the other follows the image's
/// aspect ratio.
pub fn exhibit_size(image_width: u32, image_height: u32, default_long_side: f64) -> Vector3 {
    let aspect_ratio = image_height as f64 / image_width as f64;

    if image_width > image_height {
        Vector3::flat(default_long_side, default_long_side * aspect_ratio)
    } else {
        Vector3::flat(default_long_side / aspect_ratio, default_long_side)
    }
}

/// Position of the exhibit at `(row, column)` in its wall's local frame.
pub fn wall_position(row: usize, column: usize, layout: &LayoutConfig) -> Vector3 {
    let step = layout.longer_side_length + layout.padding;
    Vector3::new(
        step * column as f64 + layout.padding,
        step * row as f64 + layout.base_height,
        0.0,
    )
}

/// Bounding size of a room, derived from the last exhibit of every wall.
///
/// X-axis walls bound the room's x extent, Z-axis walls its z extent; every
/// wall bounds the height. Walls without exhibits contribute nothing.
pub fn room_size_from_walls(walls: &[Wall], layout: &LayoutConfig) -> Vector3 {
    let mut size = Vector3::default();

    for wall in walls {
        let Some(last) = wall.exhibits.last() else {
            continue;
        };
        let pos = last.position;

        // Local x is the distance along the wall for either axis
        match wall.direction.axis() {
            Axis::X => size.x = size.x.max(pos.x + layout.padding),
            Axis::Z => size.z = size.z.max(pos.x + layout.padding),
        }
        size.y = size.y.max(pos.y + layout.base_height);
    }

    size
}

/// Distributes exhibits over four walls, one run of `columns / 4` per wall
/// and grid row.
///
/// Exhibits that do not fit a complete run are handled per
/// [`RemainderPolicy`].
pub fn exhibits_to_walls(rows: usize, columns: usize, exhibits: Vec<Exhibit>, layout: &LayoutConfig) -> Vec<Wall> {
    let mut walls: Vec<Wall> = Direction::ALL
        .iter()
        .map(|&d| Wall::new(d, layout.wall_material.clone()))
        .collect();

    let per_wall = columns / walls.len();
    let mut queue = exhibits.into_iter();

    'rows: for row in 0..rows {
        for wall in walls.iter_mut() {
            for column in 0..per_wall {
                let Some(mut exhibit) = queue.next() else {
                    break 'rows;
                };
                exhibit.position = wall_position(row, column, layout);
                wall.exhibits.push(exhibit);
            }
        }
    }

    let remainder: Vec<Exhibit> = queue.collect();
    if !remainder.is_empty() {
        match layout.remainder_policy {
            RemainderPolicy::Drop => {
                warn!(
                    "{} exhibit(s) left unplaced: {} columns do not divide over {} walls",
                    remainder.len(),
                    columns,
                    walls.len()
                );
            }
            RemainderPolicy::AppendToLastWall => {
                if let Some(last_wall) = walls.last_mut() {
                    let row = rows.saturating_sub(1);
                    for (offset, mut exhibit) in remainder.into_iter().enumerate() {
                        exhibit.position = wall_position(row, per_wall + offset, layout);
                        last_wall.exhibits.push(exhibit);
                    }
                }
            }
        }
    }

    walls
}

/// Turns a node map into one exhibit per node.
pub struct LayoutEngine<'a, O: ObjectSource> {
    objects: O,
    config: &'a Config,
}

impl<'a, O: ObjectSource> LayoutEngine<'a, O> {
    /// Creates an engine fetching content from `objects`.
    pub fn new(objects: O, config: &'a Config) -> Self {
        Self { objects, config }
    }

    /// Representative item of every node in ascending node order; `None` for
    /// empty nodes.
    pub fn representatives<'m>(node_map: &'m NodeMap) -> Vec<Option<&'m Candidate>> {
        node_map.iter().map(|(_, candidates)| candidates.first()).collect()
    }

    /// Placeholder exhibit for an empty node.
    pub fn placeholder(&self) -> Exhibit {
        let side = self.config.layout.placeholder_size;
        let mut exhibit = Exhibit::new(PLACEHOLDER_NAME, "");
        exhibit.size = Vector3::flat(side, side);
        exhibit
    }

    /// Exhibit for a real item, sized from its image header.
    ///
    /// Fails with [`RoomgenError::Retrieval`] if the item's content cannot be
    /// fetched or is not a readable image.
    pub fn exhibit_for(&self, id: &str) -> Result<Exhibit> {
        let retrieval = &self.config.retrieval;
        let clean_id = retrieval.clean_id(id);

        let bytes = self.objects.fetch_object_bytes(clean_id)?;
        let (width, height) = probe_dimensions(&bytes)
            .map_err(|e| RoomgenError::Retrieval(format!("Object '{}': {}", clean_id, e)))?;

        let mut exhibit = Exhibit::new(clean_id, retrieval.exhibit_path(clean_id));
        exhibit.size = exhibit_size(width, height, self.config.layout.default_long_side);
        exhibit.set_metadata(MetadataKey::Generated, "true");

        debug!("Exhibit '{}': {}x{} px -> {:?}", clean_id, width, height, exhibit.size);
        Ok(exhibit)
    }

    /// One exhibit per node, in node order.
    ///
    /// Content is fetched in parallel. Every exhibit carries its node's full
    /// candidate list under [`MetadataKey::MemberIds`].
    pub fn build_exhibits(&self, node_map: &NodeMap) -> Result<Vec<Exhibit>> {
        Self::representatives(node_map)
            .into_par_iter()
            .enumerate()
            .map(|(node, representative)| -> Result<Exhibit> {
                let mut exhibit = match representative {
                    Some(candidate) => self.exhibit_for(&candidate.id)?,
                    None => self.placeholder(),
                };
                let members = serde_json::to_string(node_map.candidates(node))?;
                exhibit.set_metadata(MetadataKey::MemberIds, members);
                Ok(exhibit)
            })
            .collect()
    }
}
