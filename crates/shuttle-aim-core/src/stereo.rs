use log::debug;

use crate::azimuth::launcher_azimuth;
use crate::camera::CameraModel;
use crate::world::WorldPosition;

/// Sightlines that cannot be intersected into a finite position.
#[derive(thiserror::Error, Debug)]
pub enum TriangulationError {
    #[error("degenerate stereo geometry: sight angles {left_rad:.6} and {right_rad:.6} rad are parallel or diverging")]
    DegenerateGeometry { left_rad: f64, right_rad: f64 },
}

/// Everything one stereo fix produces: the world position plus the angles the
/// render layer annotates.
#[derive(Clone, Copy, Debug)]
pub struct PlayerFix {
    pub position: WorldPosition,
    /// Per-camera subject bearing, radians.
    pub bearing_left: f64,
    pub bearing_right: f64,
    /// Per-camera total sight angle against the baseline, radians.
    pub sight_left: f64,
    pub sight_right: f64,
    /// Horizontal pointing angle from the rig toward the player, radians.
    pub azimuth: f64,
}

/// Two angle-calibrated cameras separated by a fixed baseline.
#[derive(Clone, Copy, Debug)]
pub struct StereoRig {
    pub left: CameraModel,
    pub right: CameraModel,
    /// Real-world separation between the two camera origins, millimetres.
    pub baseline_mm: f64,
}

/// Below this tangent spread the sightline intersection is unbounded.
const TAN_SPREAD_EPSILON: f64 = 1e-9;

impl StereoRig {
    pub fn new(left: CameraModel, right: CameraModel, baseline_mm: f64) -> Self {
        Self {
            left,
            right,
            baseline_mm,
        }
    }

    /// Depth from the camera baseline, millimetres.
    pub fn depth(&self, sight_left: f64, sight_right: f64) -> Result<f64, TriangulationError> {
        let tan_left = sight_left.tan();
        let tan_right = sight_right.tan();

        if (tan_left - tan_right).abs() < TAN_SPREAD_EPSILON {
            return Err(TriangulationError::DegenerateGeometry {
                left_rad: sight_left,
                right_rad: sight_right,
            });
        }
        Ok(self.baseline_mm * tan_left * tan_right / (tan_left - tan_right))
    }

    /// Signed lateral offset from the court centreline, millimetres.
    ///
    /// The lateral reconstruction deliberately runs through the left
    /// sightline only; the rig is calibrated with that convention.
    pub fn width(&self, sight_left: f64, sight_right: f64) -> Result<f64, TriangulationError> {
        let depth = self.depth(sight_left, sight_right)?;
        Ok(-(depth / sight_left.tan() + self.baseline_mm / 2.0))
    }

    /// Locate the player from the two per-camera pixel columns.
    ///
    /// This is the single entry point consuming raw detections: it derives
    /// both cameras' angles, intersects the sightlines and computes the rig
    /// azimuth.
    pub fn locate(&self, pixel_left: i32, pixel_right: i32) -> Result<PlayerFix, TriangulationError> {
        let bearing_left = self.left.bearing(pixel_left);
        let bearing_right = self.right.bearing(pixel_right);
        let sight_left = bearing_left + self.left.mount_angle();
        let sight_right = bearing_right + self.right.mount_angle();

        let depth = self.depth(sight_left, sight_right)?;
        let width = -(depth / sight_left.tan() + self.baseline_mm / 2.0);
        let position = WorldPosition::new(depth, width);

        debug!(
            "stereo fix: depth {depth:.0} mm, width {width:.0} mm from columns ({pixel_left}, {pixel_right})"
        );

        Ok(PlayerFix {
            position,
            bearing_left,
            bearing_right,
            sight_left,
            sight_right,
            azimuth: launcher_azimuth(depth, width),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn symmetric_rig() -> StereoRig {
        let camera = CameraModel::new(1000, FRAC_PI_2);
        StereoRig::new(camera, camera, 720.0)
    }

    #[test]
    fn known_angles_reproduce_depth_and_width() {
        // A subject at depth 3000 mm on the centreline with baseline 720 mm
        // subtends tan(θL) = -25/3 and tan(θR) = +25/3.
        let rig = symmetric_rig();
        let sight_left = PI - (25.0 / 3.0_f64).atan();
        let sight_right = (25.0 / 3.0_f64).atan();

        let depth = rig.depth(sight_left, sight_right).unwrap();
        let width = rig.width(sight_left, sight_right).unwrap();
        assert_relative_eq!(depth, 3000.0, epsilon = 1e-9);
        assert_relative_eq!(width, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn centred_subject_has_zero_width_and_azimuth() {
        // Mirrored pixel columns on identical cameras put the subject on the
        // centreline: depth = baseline·focal/400 here, width exactly 0.
        let rig = symmetric_rig();
        let fix = rig.locate(700, 300).unwrap();

        assert_relative_eq!(fix.position.depth_mm, 900.0, epsilon = 1e-9);
        assert_relative_eq!(fix.position.width_mm, 0.0, epsilon = 1e-9);
        assert_relative_eq!(fix.azimuth, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn angle_round_trip_at_reference_geometry() {
        // Recompute the subject position from its own derived angles.
        let rig = symmetric_rig();
        let fix = rig.locate(640, 360).unwrap();

        let depth = rig.depth(fix.sight_left, fix.sight_right).unwrap();
        let width = rig.width(fix.sight_left, fix.sight_right).unwrap();
        assert_relative_eq!(depth, fix.position.depth_mm, epsilon = 1e-9);
        assert_relative_eq!(width, fix.position.width_mm, epsilon = 1e-9);
    }

    #[test]
    fn equal_sight_angles_are_degenerate() {
        let rig = symmetric_rig();
        let angle = 1.2_f64;
        let err = rig.depth(angle, angle).unwrap_err();
        assert!(matches!(err, TriangulationError::DegenerateGeometry { .. }));
    }

    #[test]
    fn identical_pixel_columns_never_yield_non_finite_depth() {
        // Identical cameras seeing the subject at the same column produce
        // parallel sightlines; that must surface as an error, not a NaN.
        let rig = symmetric_rig();
        assert!(rig.locate(500, 500).is_err());
    }

    #[test]
    fn off_centre_subject_has_matching_azimuth_sign() {
        let rig = symmetric_rig();
        let fix = rig.locate(760, 340).unwrap();
        assert_eq!(fix.azimuth > 0.0, fix.position.width_mm > 0.0);
    }
}
