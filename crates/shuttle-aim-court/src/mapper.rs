use serde::{Deserialize, Serialize};

use shuttle_aim_core::WorldPosition;

use crate::geometry::CourtGeometry;

/// A world position that falls outside the representation frame.
#[derive(thiserror::Error, Debug)]
pub enum CourtError {
    #[error("position off court: ({x}, {y}) outside the {width}x{height} representation")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
}

/// Point in the scaled court representation, pixels.
///
/// `x` grows with the player's width (screen right); `y` shrinks as depth
/// grows, so the far end of the court is the top of the frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CourtPoint {
    pub x: i32,
    pub y: i32,
}

/// A court point re-expressed with the launcher as origin and the lateral
/// axis centred on the court. Used only to point the launcher.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LauncherFramePosition {
    pub forward: f64,
    pub lateral: f64,
}

/// World ↔ representation ↔ launcher-frame conversions for one court setup.
///
/// The scale factor is derived once at construction; every conversion reuses
/// it so the two directions cannot drift apart.
#[derive(Clone, Debug)]
pub struct CourtMapper {
    geometry: CourtGeometry,
    scale: f64,
}

impl CourtMapper {
    pub fn new(geometry: CourtGeometry) -> Self {
        let scale = geometry.scale();
        Self { geometry, scale }
    }

    pub fn geometry(&self) -> &CourtGeometry {
        &self.geometry
    }

    /// Millimetres per representation pixel.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// World millimetres to representation pixels.
    pub fn to_court(&self, world: WorldPosition) -> CourtPoint {
        let height = self.geometry.repr_height_px as i32;
        let half_width = self.geometry.repr_width_px as i32 / 2;

        let depth_px = (world.depth_mm / self.scale).round() as i32;
        let width_px = (world.width_mm.abs() / self.scale).round() as i32;

        let x = if world.width_mm < 0.0 {
            half_width - width_px
        } else {
            half_width + width_px
        };
        CourtPoint {
            x,
            y: height - depth_px,
        }
    }

    /// Whether a representation point lies on the court frame.
    pub fn on_court(&self, point: CourtPoint) -> bool {
        point.x >= 0
            && point.x < self.geometry.repr_width_px as i32
            && point.y >= 0
            && point.y < self.geometry.repr_height_px as i32
    }

    /// Map to the representation and reject out-of-bounds positions.
    ///
    /// Every world position entering downstream geometry goes through this
    /// check first; off-court inputs are signalled, never transformed.
    pub fn checked_to_court(&self, world: WorldPosition) -> Result<CourtPoint, CourtError> {
        let point = self.to_court(world);
        if !self.on_court(point) {
            return Err(CourtError::OutOfBounds {
                x: point.x,
                y: point.y,
                width: self.geometry.repr_width_px,
                height: self.geometry.repr_height_px,
            });
        }
        Ok(point)
    }

    /// Representation point to launcher-frame coordinates.
    ///
    /// This is an inverse-sense transform for azimuth computation only: it
    /// stays in pixel units and does not restore the millimetre scale, so
    /// round-tripping through `to_court` only holds to integer rounding.
    pub fn to_launcher_frame(&self, point: CourtPoint) -> LauncherFramePosition {
        let height = self.geometry.repr_height_px as i32;
        let half_width = self.geometry.repr_width_px as i32 / 2;

        LauncherFramePosition {
            forward: f64::from(height - point.y),
            lateral: f64::from(point.x - half_width),
        }
    }
}
