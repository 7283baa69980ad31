//! Subsector generation library
//!
//! Rolls star systems onto an 8x10 grid and links them with communication,
//! trade and rich-trade route networks.

pub mod config;
pub mod dice;
pub mod disjoint_set;
pub mod error;
pub mod generator;
pub mod grid;
pub mod names;
pub mod routes;
pub mod seeds;
pub mod subsector;
pub mod uwp;
pub mod world;

pub use config::SubsectorConfig;
pub use error::{Result, SubsectorError};
pub use subsector::Subsector;
