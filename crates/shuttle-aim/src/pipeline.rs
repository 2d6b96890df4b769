use log::warn;
use rand::Rng;

use shuttle_aim_core::{
    launcher_azimuth, PixelObservation, PlayerFix, StereoRig, TriangulationError, WorldPosition,
};
use shuttle_aim_court::{
    target_on_court, CourtError, CourtMapper, CourtPoint, DifficultyParams, LauncherFramePosition,
};

/// Everything one evaluation cycle produces for the render and link layers.
#[derive(Clone, Copy, Debug)]
pub struct CycleOutput {
    /// The stereo fix: world position plus all camera angles.
    pub fix: PlayerFix,
    pub player_court: CourtPoint,
    pub player_launcher_frame: LauncherFramePosition,
    pub target_court: CourtPoint,
    pub target_launcher_frame: LauncherFramePosition,
    /// Azimuth of the difficulty target, radians.
    pub target_azimuth: f64,
}

/// Evaluation of a fixed aim position (throws locked to one spot).
#[derive(Clone, Copy, Debug)]
pub struct FixedAim {
    pub court: CourtPoint,
    pub launcher_frame: LauncherFramePosition,
    pub azimuth: f64,
}

/// Recoverable per-cycle failures. The host keeps the previous cycle's
/// output and carries on; nothing here should stop the process.
#[derive(thiserror::Error, Debug)]
pub enum CycleError {
    #[error(transparent)]
    Triangulation(#[from] TriangulationError),
    #[error(transparent)]
    OffCourt(#[from] CourtError),
}

/// Stereo rig plus court mapping for one installation.
pub struct AimPipeline {
    rig: StereoRig,
    mapper: CourtMapper,
}

impl AimPipeline {
    pub fn new(rig: StereoRig, mapper: CourtMapper) -> Self {
        Self { rig, mapper }
    }

    pub fn rig(&self) -> &StereoRig {
        &self.rig
    }

    pub fn mapper(&self) -> &CourtMapper {
        &self.mapper
    }

    /// One full evaluation cycle.
    ///
    /// Locates the player from the two detections, maps the fix onto the
    /// court (off-court fixes are rejected before any dependent geometry
    /// runs), picks the difficulty target and computes its azimuth. An
    /// unreachable difficulty disk falls back to aiming at the player.
    pub fn evaluate<R: Rng>(
        &self,
        left: &PixelObservation,
        right: &PixelObservation,
        params: &DifficultyParams,
        rng: &mut R,
    ) -> Result<CycleOutput, CycleError> {
        let fix = self.rig.locate(left.pixel_x, right.pixel_x)?;
        let player_court = self.mapper.checked_to_court(fix.position)?;

        let target_court = match target_on_court(&self.mapper, fix.position, player_court, params, rng)
        {
            Ok(point) => point,
            Err(err) => {
                warn!("{err}; aiming at the player instead");
                player_court
            }
        };

        let player_launcher_frame = self.mapper.to_launcher_frame(player_court);
        let target_launcher_frame = self.mapper.to_launcher_frame(target_court);
        let target_azimuth =
            launcher_azimuth(target_launcher_frame.forward, target_launcher_frame.lateral);

        Ok(CycleOutput {
            fix,
            player_court,
            player_launcher_frame,
            target_court,
            target_launcher_frame,
            target_azimuth,
        })
    }

    /// Evaluate a fixed aim position, e.g. the locked "serve here" spot.
    ///
    /// Shares the azimuth path with the player and difficulty targets so the
    /// three angles stay comparable.
    pub fn fixed_aim(&self, position: WorldPosition) -> Result<FixedAim, CourtError> {
        let court = self.mapper.checked_to_court(position)?;
        let launcher_frame = self.mapper.to_launcher_frame(court);
        Ok(FixedAim {
            court,
            launcher_frame,
            azimuth: launcher_azimuth(launcher_frame.forward, launcher_frame.lateral),
        })
    }
}

/// Host-side retention of the last good cycle.
///
/// A cycle that fails with a recoverable error leaves the previous output in
/// place, so the launcher keeps its last sensible aim instead of jumping.
#[derive(Debug, Default)]
pub struct CycleRunner {
    last: Option<CycleOutput>,
}

impl CycleRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cycle result and return the output to act on.
    pub fn advance(&mut self, result: Result<CycleOutput, CycleError>) -> Option<&CycleOutput> {
        match result {
            Ok(output) => self.last = Some(output),
            Err(err) => warn!("cycle skipped: {err}"),
        }
        self.last.as_ref()
    }

    pub fn last(&self) -> Option<&CycleOutput> {
        self.last.as_ref()
    }
}
