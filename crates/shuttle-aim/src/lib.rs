//! Stereo player tracking and launcher aiming for a badminton shuttle
//! launcher.
//!
//! The facade crate wires the geometric core and the court-side mapping into
//! one per-cycle pipeline and carries the launcher wire codec. The heavy
//! lifting lives in the member crates:
//!
//! - [`shuttle_aim_core`]: camera angles, stereo triangulation, azimuth.
//! - [`shuttle_aim_court`]: court geometry, frame mapping, difficulty
//!   sampling.
//!
//! A host loop feeds one pair of per-camera detections per cycle into
//! [`AimPipeline::evaluate`] and hands the resulting azimuth to the launcher
//! link. [`CycleRunner`] keeps the last good cycle alive across recoverable
//! failures (degenerate geometry, off-court positions).

mod link;
mod pipeline;

pub use link::{apply_feedback, azimuth_degrees, parse_feedback, LauncherCommand};
pub use pipeline::{AimPipeline, CycleError, CycleOutput, CycleRunner, FixedAim};

pub use shuttle_aim_core::{
    field_of_view, launcher_azimuth, CalibrationError, CameraModel, PixelObservation, PlayerFix,
    StereoRig, TriangulationError, WorldPosition,
};
pub use shuttle_aim_court::{
    target_on_court, CourtError, CourtGeometry, CourtMapper, CourtPoint, DifficultyError,
    DifficultyLevel, DifficultyParams, LauncherFramePosition, MAX_REJECTION_ATTEMPTS,
};

#[cfg(feature = "tracing")]
pub use shuttle_aim_core::init_tracing;
pub use shuttle_aim_core::init_with_level;
