//! Star systems and their points of interest.
//!
//! Systems form a graph with symmetric neighbor adjacency. Locations belong
//! to exactly one system; ships reference a location as current position.

use serde::{Deserialize, Serialize};

use crate::ids::{LocationId, SystemId};

/// A star system node on the campaign map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarSystem {
    pub id: SystemId,
    pub name: String,
    /// Directly adjacent systems, without their own neighbor lists expanded.
    pub neighbors: Vec<SystemRef>,
    pub locations: Vec<Location>,
}

/// A neighbor entry: id and name only, never recursive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemRef {
    pub id: SystemId,
    pub name: String,
}

/// A point of interest inside a system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub system_id: SystemId,
    pub name: String,
    pub description: Option<String>,
}
