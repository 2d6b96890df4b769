use log::info;
use serde::{Deserialize, Serialize};

use shuttle_aim_court::DifficultyLevel;

/// Round an azimuth in radians to the integer degree value the servo takes.
pub fn azimuth_degrees(azimuth_rad: f64) -> i32 {
    azimuth_rad.to_degrees().round() as i32
}

/// One ASCII command line for the launcher microcontroller.
///
/// Wire form is colon-separated and newline-terminated:
/// `azimuth_deg:altitude:power:throw_period_ms:update_period_ms:level\n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherCommand {
    /// Servo azimuth, rounded integer degrees.
    pub azimuth_deg: i32,
    pub altitude: i32,
    pub power: i32,
    /// Interval between shuttle throws, milliseconds.
    pub throw_period_ms: u32,
    /// Interval between launcher aim updates, milliseconds.
    pub update_period_ms: u32,
    pub level: DifficultyLevel,
}

impl LauncherCommand {
    /// Encode into the wire form the serial layer writes verbatim.
    pub fn encode(&self) -> String {
        format!(
            "{}:{}:{}:{}:{}:{}\n",
            self.azimuth_deg,
            self.altitude,
            self.power,
            self.throw_period_ms,
            self.update_period_ms,
            self.level.as_number()
        )
    }
}

/// Parse a difficulty feedback line sent back by the launcher.
///
/// The launcher answers with a single token, `"1"`, `"2"` or `"3"`; anything
/// else is ignored.
pub fn parse_feedback(line: &str) -> Option<DifficultyLevel> {
    DifficultyLevel::from_token(line.trim())
}

/// Replace-on-change feedback handling: returns the new level only when the
/// line holds a valid token different from `current`.
pub fn apply_feedback(current: DifficultyLevel, line: &str) -> Option<DifficultyLevel> {
    match parse_feedback(line) {
        Some(level) if level != current => {
            info!(
                "difficulty level changed by launcher: {} -> {}",
                current.as_number(),
                level.as_number()
            );
            Some(level)
        }
        _ => None,
    }
}
