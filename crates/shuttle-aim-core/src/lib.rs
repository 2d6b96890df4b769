//! Stereo camera geometry for the shuttle launcher tracker.
//!
//! This crate is intentionally small and purely geometric. It knows nothing
//! about the court layout or the launcher hardware: it turns per-camera pixel
//! detections into real-world positions and pointing angles, and leaves frame
//! mapping and target selection to the court crate.

mod azimuth;
mod camera;
mod logger;
mod stereo;
mod world;

pub use azimuth::launcher_azimuth;
pub use camera::{field_of_view, CalibrationError, CameraModel, PixelObservation};
pub use stereo::{PlayerFix, StereoRig, TriangulationError};
pub use world::WorldPosition;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;
pub use logger::init_with_level;
