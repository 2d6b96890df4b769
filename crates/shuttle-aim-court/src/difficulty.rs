use log::warn;
use nalgebra::Vector2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use shuttle_aim_core::WorldPosition;

use crate::geometry::CourtGeometry;
use crate::mapper::{CourtMapper, CourtPoint};

/// How the aim point is dispersed around the tracked player.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyLevel {
    /// Aim exactly at the player.
    Direct,
    /// Uniform point inside a disk around the player.
    Disk,
    /// Uniform point on the circle around the player.
    Ring,
}

impl DifficultyLevel {
    /// Wire number used on the launcher link (1, 2 or 3).
    pub fn as_number(self) -> u8 {
        match self {
            DifficultyLevel::Direct => 1,
            DifficultyLevel::Disk => 2,
            DifficultyLevel::Ring => 3,
        }
    }

    /// Parse a single-token level, as the launcher sends it back.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "1" => Some(DifficultyLevel::Direct),
            "2" => Some(DifficultyLevel::Disk),
            "3" => Some(DifficultyLevel::Ring),
            _ => None,
        }
    }
}

/// Difficulty settings for one evaluation cycle.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DifficultyParams {
    pub level: DifficultyLevel,
    /// Dispersion radius around the player, real millimetres.
    pub radius_mm: f64,
    /// Enforce the launcher's minimum safe firing depth past the net.
    #[serde(default)]
    pub real_launcher_limit: bool,
}

/// Rejection sampling gives up after this many draws.
pub const MAX_REJECTION_ATTEMPTS: usize = 1000;

/// The dispersion disk has no overlap with the reachable court.
#[derive(thiserror::Error, Debug)]
pub enum DifficultyError {
    #[error("no reachable target in {attempts} draws of radius {radius_px} px around ({x}, {y})")]
    Unreachable {
        attempts: usize,
        radius_px: i32,
        x: i32,
        y: i32,
    },
}

/// Clamp the requested disk against the launcher's reach.
///
/// Returns `Some` replacement position when the whole disk lies beyond the
/// reach on at least one axis: past both the depth bound and a lateral bound
/// the target snaps to that corner; past a single bound only that axis is
/// clamped and the player keeps the other coordinate. `None` means the disk
/// is reachable and sampling should proceed.
fn clamp_to_reach(
    geometry: &CourtGeometry,
    player: WorldPosition,
    radius_mm: f64,
) -> Option<WorldPosition> {
    let depth_bound = geometry.reach_depth_mm();

    let beyond_depth = player.depth_mm - radius_mm > depth_bound;
    let beyond_right = player.width_mm >= 0.0 && player.width_mm - radius_mm > geometry.reach_right_mm();
    let beyond_left =
        player.width_mm < 0.0 && player.width_mm.abs() - radius_mm > geometry.reach_left_mm();

    let width = if beyond_right {
        Some(geometry.reach_right_mm())
    } else if beyond_left {
        Some(-geometry.reach_left_mm())
    } else {
        None
    };

    match (width, beyond_depth) {
        (Some(w), true) => Some(WorldPosition::new(depth_bound, w)),
        (Some(w), false) => Some(WorldPosition::new(player.depth_mm, w)),
        (None, true) => Some(WorldPosition::new(depth_bound, player.width_mm)),
        (None, false) => None,
    }
}

/// One polar draw around `centre`: angle uniform in [0, 2π), radius
/// area-uniform (`R·√u`) for `Disk`, fixed at `R` for `Ring`.
fn sample_around<R: Rng>(
    rng: &mut R,
    centre: CourtPoint,
    level: DifficultyLevel,
    radius_px: f64,
) -> CourtPoint {
    let radius = match level {
        DifficultyLevel::Disk => radius_px * rng.gen::<f64>().sqrt(),
        _ => radius_px,
    };
    let angle = rng.gen_range(0.0..std::f64::consts::TAU);
    let offset = Vector2::new(radius * angle.cos(), radius * angle.sin());

    CourtPoint {
        x: centre.x + offset.x.round() as i32,
        y: centre.y + offset.y.round() as i32,
    }
}

/// Pick the difficulty target for this cycle.
///
/// `player_world` and `player_court` are the same position in both frames;
/// the reach pre-check runs in millimetres, the sampling in representation
/// pixels. On `Unreachable` the caller is expected to fall back to the
/// player's own position.
pub fn target_on_court<R: Rng>(
    mapper: &CourtMapper,
    player_world: WorldPosition,
    player_court: CourtPoint,
    params: &DifficultyParams,
    rng: &mut R,
) -> Result<CourtPoint, DifficultyError> {
    if params.level == DifficultyLevel::Direct {
        return Ok(player_court);
    }

    if let Some(clamped) = clamp_to_reach(mapper.geometry(), player_world, params.radius_mm) {
        return Ok(mapper.to_court(clamped));
    }

    let geometry = mapper.geometry();
    let radius_px = params.radius_mm / mapper.scale();
    let width = geometry.repr_width_px as i32;
    let depth_ceiling = if params.real_launcher_limit {
        geometry.repr_height_px as i32 / 2
            - (geometry.min_firing_depth_mm / mapper.scale()).round() as i32
    } else {
        geometry.repr_height_px as i32
    };

    for _ in 0..MAX_REJECTION_ATTEMPTS {
        let candidate = sample_around(rng, player_court, params.level, radius_px);
        if candidate.x >= 0 && candidate.x < width && candidate.y >= 0 && candidate.y < depth_ceiling
        {
            return Ok(candidate);
        }
    }

    warn!(
        "difficulty sampling exhausted {MAX_REJECTION_ATTEMPTS} draws around ({}, {})",
        player_court.x, player_court.y
    );
    Err(DifficultyError::Unreachable {
        attempts: MAX_REJECTION_ATTEMPTS,
        radius_px: radius_px.round() as i32,
        x: player_court.x,
        y: player_court.y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CourtGeometry;
    use crate::mapper::CourtMapper;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn mapper() -> CourtMapper {
        CourtMapper::new(CourtGeometry::default())
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn distance(a: CourtPoint, b: CourtPoint) -> f64 {
        f64::from(a.x - b.x).hypot(f64::from(a.y - b.y))
    }

    #[test]
    fn direct_level_is_identity() {
        let m = mapper();
        let world = WorldPosition::new(5_000.0, 500.0);
        let court = m.to_court(world);
        let params = DifficultyParams {
            level: DifficultyLevel::Direct,
            radius_mm: 1_000.0,
            real_launcher_limit: false,
        };
        for _ in 0..10 {
            assert_eq!(
                target_on_court(&m, world, court, &params, &mut rng()).unwrap(),
                court
            );
        }
    }

    #[test]
    fn disk_samples_stay_within_radius_and_court() {
        let m = mapper();
        let world = WorldPosition::new(6_700.0, 0.0);
        let court = m.to_court(world);
        let params = DifficultyParams {
            level: DifficultyLevel::Disk,
            radius_mm: 1_000.0,
            real_launcher_limit: false,
        };
        let radius_px = 1_000.0 / m.scale();

        let mut rng = rng();
        for _ in 0..1_000 {
            let target = target_on_court(&m, world, court, &params, &mut rng).unwrap();
            assert!(distance(target, court) <= radius_px + 1.0);
            assert!(m.on_court(target));
        }
    }

    #[test]
    fn ring_samples_sit_on_the_radius() {
        let m = mapper();
        let world = WorldPosition::new(6_700.0, 0.0);
        let court = m.to_court(world);
        let params = DifficultyParams {
            level: DifficultyLevel::Ring,
            radius_mm: 1_000.0,
            real_launcher_limit: false,
        };
        let radius_px = 1_000.0 / m.scale();

        let mut rng = rng();
        for _ in 0..1_000 {
            let target = target_on_court(&m, world, court, &params, &mut rng).unwrap();
            // integer rounding puts the sample within a pixel of the circle
            assert!((distance(target, court) - radius_px).abs() <= 1.0);
        }
    }

    #[test]
    fn disk_wholly_past_depth_bound_clamps_depth_only() {
        let geometry = CourtGeometry {
            launcher_forward_offset_mm: 2_000.0,
            ..CourtGeometry::default()
        };
        let m = CourtMapper::new(geometry);
        // reach_depth = 11400; disk [12600, 13400] is wholly beyond it
        let world = WorldPosition::new(13_000.0, 800.0);
        let court = m.to_court(world);
        let params = DifficultyParams {
            level: DifficultyLevel::Disk,
            radius_mm: 400.0,
            real_launcher_limit: false,
        };

        let target = target_on_court(&m, world, court, &params, &mut rng()).unwrap();
        assert_eq!(target, m.to_court(WorldPosition::new(11_400.0, 800.0)));
    }

    #[test]
    fn disk_past_depth_and_lateral_bounds_clamps_to_corner() {
        let geometry = CourtGeometry {
            launcher_forward_offset_mm: 2_000.0,
            launcher_side_offset_mm: 4_000.0,
            ..CourtGeometry::default()
        };
        let m = CourtMapper::new(geometry);
        // reach: depth 11400, right 2100, left 4000
        let world = WorldPosition::new(13_000.0, 2_900.0);
        let court = m.to_court(world);
        let params = DifficultyParams {
            level: DifficultyLevel::Ring,
            radius_mm: 400.0,
            real_launcher_limit: false,
        };

        let target = target_on_court(&m, world, court, &params, &mut rng()).unwrap();
        assert_eq!(target, m.to_court(WorldPosition::new(11_400.0, 2_100.0)));
    }

    #[test]
    fn disk_past_left_bound_keeps_player_depth() {
        let geometry = CourtGeometry {
            launcher_side_offset_mm: 1_500.0,
            ..CourtGeometry::default()
        };
        let m = CourtMapper::new(geometry);
        let world = WorldPosition::new(6_000.0, -2_400.0);
        let court = m.to_court(world);
        let params = DifficultyParams {
            level: DifficultyLevel::Disk,
            radius_mm: 500.0,
            real_launcher_limit: false,
        };

        let target = target_on_court(&m, world, court, &params, &mut rng()).unwrap();
        assert_eq!(target, m.to_court(WorldPosition::new(6_000.0, -1_500.0)));
    }

    #[test]
    fn reachable_disk_skips_clamping() {
        let geometry = CourtGeometry::default();
        assert!(clamp_to_reach(&geometry, WorldPosition::new(6_000.0, 500.0), 1_000.0).is_none());
    }

    #[test]
    fn impossible_ceiling_exhausts_the_retry_budget() {
        let geometry = CourtGeometry {
            // ceiling = 1080 - round(50000 / scale) < 0: no candidate can pass
            min_firing_depth_mm: 50_000.0,
            ..CourtGeometry::default()
        };
        let m = CourtMapper::new(geometry);
        let world = WorldPosition::new(6_700.0, 0.0);
        let court = m.to_court(world);
        let params = DifficultyParams {
            level: DifficultyLevel::Disk,
            radius_mm: 1_000.0,
            real_launcher_limit: true,
        };

        let err = target_on_court(&m, world, court, &params, &mut rng()).unwrap_err();
        assert!(matches!(
            err,
            DifficultyError::Unreachable { attempts, .. } if attempts == MAX_REJECTION_ATTEMPTS
        ));
    }

    #[test]
    fn firing_depth_ceiling_keeps_targets_past_the_net() {
        let m = mapper();
        // player well into the far half
        let world = WorldPosition::new(10_000.0, 0.0);
        let court = m.to_court(world);
        let params = DifficultyParams {
            level: DifficultyLevel::Disk,
            radius_mm: 2_000.0,
            real_launcher_limit: true,
        };
        let ceiling = 1_080 - (1_500.0 / m.scale()).round() as i32;

        let mut rng = rng();
        for _ in 0..500 {
            let target = target_on_court(&m, world, court, &params, &mut rng).unwrap();
            assert!(target.y < ceiling);
        }
    }

    #[test]
    fn level_tokens_round_trip() {
        for level in [
            DifficultyLevel::Direct,
            DifficultyLevel::Disk,
            DifficultyLevel::Ring,
        ] {
            let token = level.as_number().to_string();
            assert_eq!(DifficultyLevel::from_token(&token), Some(level));
        }
        assert_eq!(DifficultyLevel::from_token("4"), None);
        assert_eq!(DifficultyLevel::from_token(""), None);
    }
}
