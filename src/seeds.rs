//! Seed management for subsector generation
//!
//! Name generation and world rolls can run on separate random streams so that
//! changing one never shifts the other.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Seeds for the independent generation streams.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubsectorSeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
    /// Digraph table and system names
    pub names: u64,
    /// Occupancy rolls and world attributes
    pub worlds: u64,
}

impl SubsectorSeeds {
    /// Create seeds from a master seed, deriving all sub-seeds deterministically.
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            names: derive_seed(master, "names"),
            worlds: derive_seed(master, "worlds"),
        }
    }

    /// Create a builder for customizing individual seeds
    pub fn builder(master: u64) -> SubsectorSeedsBuilder {
        SubsectorSeedsBuilder {
            seeds: Self::from_master(master),
        }
    }
}

impl Default for SubsectorSeeds {
    fn default() -> Self {
        Self::from_master(rand::random())
    }
}

/// Builder for overriding individual seeds while deriving others from master
pub struct SubsectorSeedsBuilder {
    seeds: SubsectorSeeds,
}

impl SubsectorSeedsBuilder {
    /// Override the names seed
    pub fn names(mut self, seed: u64) -> Self {
        self.seeds.names = seed;
        self
    }

    /// Override the worlds seed
    pub fn worlds(mut self, seed: u64) -> Self {
        self.seeds.worlds = seed;
        self
    }

    pub fn build(self) -> SubsectorSeeds {
        self.seeds
    }
}

/// Derive a sub-seed from a master seed and a stream name.
///
/// `DefaultHasher` output is only stable within one Rust release, so a master
/// seed reproduces the same map only when built with the same toolchain.
fn derive_seed(master: u64, stream: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    stream.hash(&mut hasher);
    hasher.finish()
}

impl std::fmt::Display for SubsectorSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SubsectorSeeds {{ master: {}, names: {}, worlds: {} }}",
            self.master, self.names, self.worlds
        )
    }
}
