//! Static box obstacles.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::aabb::Aabb;

/// A static axis-aligned box obstacle from the scene description.
///
/// Obstacles never move during simulation; the broad phase tests the
/// body's bounds against each of them every frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoxObstacle {
    /// The obstacle's bounds.
    pub aabb: Aabb,
}

impl BoxObstacle {
    /// Creates an obstacle from corner points.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            aabb: Aabb::new(min, max),
        }
    }
}
