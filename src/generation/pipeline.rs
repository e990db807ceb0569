//! End-to-end SOM room generation.

use crate::config::Config;
use crate::error::Result;
use crate::features::{FeatureFetcher, FeatureTable};
use crate::generation::assemble::{empty_room, room_to_exhibition, walls_to_room};
use crate::generation::layout::{exhibits_to_walls, LayoutEngine};
use crate::generation::{GenerationRequest, GridSize, NodeMap};
use crate::model::{Exhibition, Room};
use crate::retrieval::{FeatureSource, ObjectSource};
use crate::som::{ClusteringEngine, GridTopology, Som, SomTrainer};
use log::{info, warn};

/// Generates rooms by clustering items on a SOM grid.
///
/// Every call builds its own grid and node map, so one generator can serve
/// concurrent requests as long as its sources are shareable.
pub struct SomRoomGenerator<'a, F: FeatureSource, O: ObjectSource> {
    config: &'a Config,
    features: F,
    objects: O,
}

impl<'a, F: FeatureSource, O: ObjectSource> SomRoomGenerator<'a, F, O> {
    /// Creates a generator over the given sources.
    pub fn new(config: &'a Config, features: F, objects: O) -> Self {
        Self {
            config,
            features,
            objects,
        }
    }

    /// Fetches and combines the request's feature tables.
    pub fn fetch_features(&self, request: &GenerationRequest) -> Result<FeatureTable> {
        FeatureFetcher::new(&self.features, &self.config.retrieval).fetch(&request.features, &request.ids)
    }

    /// Trains a grid of the given size on `features` and ranks items per node.
    pub fn cluster(&self, features: &FeatureTable, size: GridSize, request: &GenerationRequest) -> Result<NodeMap> {
        let som_config = &self.config.som;
        let topology = GridTopology::new(size.width, size.height, som_config.wrap_rows, som_config.wrap_columns);

        let data = features.to_matrix();
        let ids = features.sorted_ids();

        let mut som = Som::with_ranges(topology, &features.feature_ranges(), request.seed)?;
        let mut engine = SomTrainer::new(som_config, size.width, size.height, request.seed);
        engine.train(&mut som, &data, request.epochs)?;
        let predictions = engine.predict(&som, &data)?;

        let node_map = NodeMap::from_predictions(som.total_neurons(), &ids, &predictions)?;
        info!(
            "Node map: {} of {} nodes occupied",
            node_map.occupied_nodes(),
            node_map.len()
        );
        Ok(node_map)
    }

    /// Generates a room for the request.
    ///
    /// Returns a room without walls if the requested tables have no common
    /// items. Any retrieval failure aborts the whole run.
    pub fn generate_room(&self, request: &GenerationRequest) -> Result<Room> {
        request.validate()?;
        self.config.validate()?;

        let features = self.fetch_features(request)?;
        if features.is_empty() {
            warn!("No feature data for the requested tables, generating empty room");
            return Ok(empty_room(request.seed));
        }

        let size = GridSize::new(request.width, request.height).fit(features.num_samples());
        let node_map = self.cluster(&features, size, request)?;

        let exhibits = LayoutEngine::new(&self.objects, self.config).build_exhibits(&node_map)?;
        let walls = exhibits_to_walls(size.height, size.width, exhibits, &self.config.layout);

        let room = walls_to_room(walls, request.seed, Some(&node_map), &self.config.layout)?;
        info!(
            "Generated room with {} exhibits, size {:.2}x{:.2}x{:.2}",
            room.exhibit_count(),
            room.size.x,
            room.size.y,
            room.size.z
        );
        Ok(room)
    }

    /// Generates a single-room exhibition for the request.
    pub fn generate_exhibition(&self, request: &GenerationRequest) -> Result<Exhibition> {
        Ok(room_to_exhibition(self.generate_room(request)?))
    }
}
