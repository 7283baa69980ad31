//! Subsector assembly: populates the 8x10 grid, links it with routes and
//! writes the map text.
//!
//! Map text layout:
//! ```text
//! 0101 size-8 atmosphere-6 ... "Verdance" A865653-9   (one line per system)
//!
//! 0101-0202 rich                                      (rich trade routes)
//! 0101-0102 communication                             (communication routes)
//! 0102-0203 trade                                     (trade routes)
//! include traveller.txt
//! ```

use std::collections::BTreeMap;
use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::debug;

use crate::config::SubsectorConfig;
use crate::dice::d6;
use crate::error::{Result, SubsectorError};
use crate::generator::SystemGenerator;
use crate::grid::{Coord, GridGeometry, Position, Topology};
use crate::names::DigraphTable;
use crate::routes::{synthesize, Routes};
use crate::seeds::SubsectorSeeds;
use crate::world::World;

pub const COLUMNS: usize = 8;
pub const ROWS: usize = 10;

/// Tag emitted for a cell without a system.
pub const EMPTY_TAG: &str = "empty";

/// A generated subsector: its systems and the routes between them.
#[derive(Clone, Debug)]
pub struct Subsector {
    config: SubsectorConfig,
    worlds: BTreeMap<Coord, World>,
    routes: Routes,
}

impl Subsector {
    /// Generate a subsector from a single random stream.
    pub fn generate(config: &SubsectorConfig, rng: &mut impl Rng) -> Self {
        let table = DigraphTable::build(rng);
        let generator = SystemGenerator::new(config.gas_giant_threshold);
        let geometry = config.topology.geometry(COLUMNS, ROWS);

        let mut worlds = BTreeMap::new();
        for_each_cell(geometry.as_ref(), |coord| {
            if d6(&mut *rng) >= config.occupancy_threshold {
                worlds.insert(coord, generator.generate(&table, &mut *rng));
            }
        });
        Self::from_worlds(config, worlds)
    }

    /// Generate with separate name and world streams.
    pub fn generate_with_seeds(config: &SubsectorConfig, seeds: &SubsectorSeeds) -> Self {
        debug!(%seeds, "generating subsector");
        let mut name_rng = ChaCha8Rng::seed_from_u64(seeds.names);
        let mut rng = ChaCha8Rng::seed_from_u64(seeds.worlds);
        let table = DigraphTable::build(&mut name_rng);
        let generator = SystemGenerator::new(config.gas_giant_threshold);
        let geometry = config.topology.geometry(COLUMNS, ROWS);

        let mut worlds = BTreeMap::new();
        for_each_cell(geometry.as_ref(), |coord| {
            if d6(&mut rng) >= config.occupancy_threshold {
                worlds.insert(coord, generator.generate_split(&table, &mut rng, &mut name_rng));
            }
        });
        Self::from_worlds(config, worlds)
    }

    /// Build a subsector around already placed systems.
    ///
    /// Panics if a coordinate lies outside the grid.
    pub fn from_worlds(config: &SubsectorConfig, worlds: impl IntoIterator<Item = (Coord, World)>) -> Self {
        let geometry = config.topology.geometry(COLUMNS, ROWS);
        let worlds: BTreeMap<Coord, World> = worlds
            .into_iter()
            .inspect(|(coord, _)| assert!(coord.0 < geometry.len(), "system at {:?} outside the grid", coord))
            .collect();
        let routes = synthesize(geometry.as_ref(), &worlds);
        debug!(
            systems = worlds.len(),
            communication = routes.communication.len(),
            trade = routes.trade.len(),
            rich_trade = routes.rich_trade.len(),
            "subsector assembled"
        );
        Self {
            config: config.clone(),
            worlds,
            routes,
        }
    }

    pub fn worlds(&self) -> &BTreeMap<Coord, World> {
        &self.worlds
    }

    pub fn world(&self, coord: Coord) -> Option<&World> {
        self.worlds.get(&coord)
    }

    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    pub fn geometry(&self) -> Box<dyn GridGeometry> {
        self.config.topology.geometry(COLUMNS, ROWS)
    }

    /// Output tags for a cell; empty cells yield the single `empty` tag.
    pub fn tags(&self, coord: Coord) -> Vec<String> {
        match self.world(coord) {
            Some(world) => world.tags(),
            None => vec![EMPTY_TAG.to_string()],
        }
    }

    /// Render the map text.
    pub fn to_text(&self) -> String {
        let geometry = self.geometry();
        let mut lines = Vec::new();
        for_each_cell(geometry.as_ref(), |coord| {
            if let Some(world) = self.worlds.get(&coord) {
                let pos = geometry.index_to_xy(coord);
                lines.push(format!("{} {}", pos.label(), world.tags().join(" ")));
            }
        });

        if !self.routes.is_empty() {
            if !lines.is_empty() {
                lines.push(String::new());
            }
            lines.extend(self.routes.rich_trade.iter().cloned());
            lines.extend(self.routes.communication.iter().cloned());
            lines.extend(self.routes.trade.iter().cloned());
        }
        lines.push(format!("include {}", self.config.include));

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    /// Serialize systems and routes as JSON.
    pub fn to_json(&self) -> Result<String> {
        let geometry = self.geometry();
        let mut systems = Vec::with_capacity(self.worlds.len());
        for_each_cell(geometry.as_ref(), |coord| {
            if let Some(world) = self.worlds.get(&coord) {
                let pos = geometry.index_to_xy(coord);
                systems.push(SystemExport {
                    hex: pos.label(),
                    position: pos,
                    tags: world.tags(),
                    world,
                });
            }
        });
        let export = SubsectorExport {
            topology: self.config.topology,
            systems,
            routes: &self.routes,
        };
        serde_json::to_string_pretty(&export).map_err(|e| SubsectorError::Serialization(e.to_string()))
    }
}

impl fmt::Display for Subsector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Visit cells column by column, top to bottom within each column.
fn for_each_cell(geometry: &dyn GridGeometry, mut visit: impl FnMut(Coord)) {
    for x in 0..geometry.columns() {
        for y in 0..geometry.rows() {
            visit(geometry.xy_to_index(Position::new(x as i32, y as i32)));
        }
    }
}

#[derive(Serialize)]
struct SystemExport<'a> {
    hex: String,
    position: Position,
    tags: Vec<String>,
    world: &'a World,
}

#[derive(Serialize)]
struct SubsectorExport<'a> {
    topology: Topology,
    systems: Vec<SystemExport<'a>>,
    routes: &'a Routes,
}
