use serde::{Deserialize, Serialize};

/// Malformed field-of-view calibration input.
#[derive(thiserror::Error, Debug)]
pub enum CalibrationError {
    #[error("calibration sample counts differ: {distances} distances vs {lengths} screen lengths")]
    MismatchedSamples { distances: usize, lengths: usize },
    #[error("no calibration samples")]
    NoSamples,
}

/// Mean field of view from matched (camera-to-screen distance, visible screen
/// length) measurement pairs.
///
/// Each pair yields `2·atan(length / (2·distance))`; the calibrated FOV is
/// the arithmetic mean over all pairs, radians. Units cancel, so the two
/// sequences only need to agree with each other.
pub fn field_of_view(distances: &[f64], screen_lengths: &[f64]) -> Result<f64, CalibrationError> {
    if distances.len() != screen_lengths.len() {
        return Err(CalibrationError::MismatchedSamples {
            distances: distances.len(),
            lengths: screen_lengths.len(),
        });
    }
    if distances.is_empty() {
        return Err(CalibrationError::NoSamples);
    }

    let sum: f64 = distances
        .iter()
        .zip(screen_lengths)
        .map(|(distance, length)| 2.0 * (length / (2.0 * distance)).atan())
        .sum();
    Ok(sum / distances.len() as f64)
}

/// One per-camera pixel detection, as delivered by the external vision stage.
///
/// Only `pixel_x` and `frame_width` feed the angle geometry; the vertical
/// coordinate is carried for the render layer.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PixelObservation {
    pub pixel_x: i32,
    pub pixel_y: i32,
    pub frame_width: u32,
    pub frame_height: u32,
}

/// Angle-calibrated camera: frame width plus calibrated horizontal FOV.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CameraModel {
    pub frame_width: u32,
    /// Calibrated horizontal field of view, radians.
    pub field_of_view: f64,
}

impl CameraModel {
    pub fn new(frame_width: u32, field_of_view: f64) -> Self {
        Self {
            frame_width,
            field_of_view,
        }
    }

    /// Focal length in pixels implied by the frame width and the FOV.
    pub fn focal_length(&self) -> f64 {
        f64::from(self.frame_width) / (2.0 * (self.field_of_view / 2.0).tan())
    }

    /// Angle between the camera's half-FOV edge and the subject seen at
    /// `pixel_x`, radians.
    ///
    /// Left of the frame centre the pixel offset angle is subtracted from the
    /// half FOV, right of it the offset is added; the result is continuous
    /// and monotonic across the centre column.
    pub fn bearing(&self, pixel_x: i32) -> f64 {
        let centre = f64::from(self.frame_width) / 2.0;
        let x = f64::from(pixel_x);
        let half_fov = self.field_of_view / 2.0;
        let focal = self.focal_length();

        if x < centre {
            half_fov - ((centre - x) / focal).atan()
        } else {
            half_fov + ((x - centre) / focal).atan()
        }
    }

    /// Fixed angle between the camera mounting axis and the stereo baseline.
    pub fn mount_angle(&self) -> f64 {
        (std::f64::consts::PI - self.field_of_view) / 2.0
    }

    /// Total angle consumed by triangulation: subject bearing plus the mount
    /// angle against the baseline.
    pub fn sight_angle(&self, pixel_x: i32) -> f64 {
        self.bearing(pixel_x) + self.mount_angle()
    }
}
