use serde::{Deserialize, Serialize};

/// Player position in real-world court coordinates, millimetres.
///
/// `depth_mm` is measured from the camera baseline toward the far end of the
/// court. `width_mm` is the signed lateral offset from the longitudinal
/// centreline, negative to the left of it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldPosition {
    pub depth_mm: f64,
    pub width_mm: f64,
}

impl WorldPosition {
    pub fn new(depth_mm: f64, width_mm: f64) -> Self {
        Self { depth_mm, width_mm }
    }

    /// Planar distance from the camera rig origin.
    pub fn distance_mm(&self) -> f64 {
        self.depth_mm.hypot(self.width_mm)
    }
}
