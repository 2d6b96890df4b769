use serde::{Deserialize, Serialize};

/// Court and rig dimensions: millimetres on the real side, pixels on the
/// representation side.
///
/// Built once at startup and treated as immutable afterwards. A host that
/// reconfigures live must swap the whole value between cycles, never mutate
/// it mid-cycle.
///
/// The defaults describe the reference installation: a full doubles court
/// seen lengthwise, rendered into a 2160 × 984 frame, with the launcher and
/// the camera pair sharing the near edge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CourtGeometry {
    /// Court length along the depth axis, millimetres.
    #[serde(default = "default_real_length")]
    pub real_length_mm: f64,
    /// Court width along the lateral axis, millimetres.
    #[serde(default = "default_real_width")]
    pub real_width_mm: f64,
    /// Representation frame extent along the depth axis, pixels.
    #[serde(default = "default_repr_height")]
    pub repr_height_px: u32,
    /// Representation frame extent along the lateral axis, pixels.
    #[serde(default = "default_repr_width")]
    pub repr_width_px: u32,
    /// Separation between the two camera origins, millimetres.
    #[serde(default = "default_baseline")]
    pub baseline_mm: f64,
    /// Launcher distance from the left court edge, millimetres.
    #[serde(default = "default_launcher_side")]
    pub launcher_side_offset_mm: f64,
    /// Launcher distance behind the near court edge, millimetres.
    #[serde(default)]
    pub launcher_forward_offset_mm: f64,
    /// Net height, millimetres.
    #[serde(default = "default_net_height")]
    pub net_height_mm: f64,
    /// Service line offset from the net, millimetres.
    #[serde(default = "default_service_line")]
    pub service_line_offset_mm: f64,
    /// Back corridor depth, millimetres.
    #[serde(default = "default_back_corridor")]
    pub back_corridor_mm: f64,
    /// Side corridor width, millimetres.
    #[serde(default = "default_side_corridor")]
    pub side_corridor_mm: f64,
    /// Painted line thickness, millimetres.
    #[serde(default = "default_line_thickness")]
    pub line_thickness_mm: f64,
    /// Closest depth beyond the net the launcher can safely serve to,
    /// millimetres.
    #[serde(default = "default_min_firing_depth")]
    pub min_firing_depth_mm: f64,
}

fn default_real_length() -> f64 {
    13_400.0
}
fn default_real_width() -> f64 {
    6_100.0
}
fn default_repr_height() -> u32 {
    2_160
}
fn default_repr_width() -> u32 {
    984
}
fn default_baseline() -> f64 {
    720.0
}
fn default_launcher_side() -> f64 {
    3_500.0
}
fn default_net_height() -> f64 {
    1_500.0
}
fn default_service_line() -> f64 {
    1_980.0
}
fn default_back_corridor() -> f64 {
    720.0
}
fn default_side_corridor() -> f64 {
    420.0
}
fn default_line_thickness() -> f64 {
    40.0
}
fn default_min_firing_depth() -> f64 {
    1_500.0
}

impl Default for CourtGeometry {
    fn default() -> Self {
        Self {
            real_length_mm: default_real_length(),
            real_width_mm: default_real_width(),
            repr_height_px: default_repr_height(),
            repr_width_px: default_repr_width(),
            baseline_mm: default_baseline(),
            launcher_side_offset_mm: default_launcher_side(),
            launcher_forward_offset_mm: 0.0,
            net_height_mm: default_net_height(),
            service_line_offset_mm: default_service_line(),
            back_corridor_mm: default_back_corridor(),
            side_corridor_mm: default_side_corridor(),
            line_thickness_mm: default_line_thickness(),
            min_firing_depth_mm: default_min_firing_depth(),
        }
    }
}

impl CourtGeometry {
    /// Millimetres per representation pixel. Every conversion in the mapper
    /// runs through this one derived value.
    pub fn scale(&self) -> f64 {
        self.real_length_mm / f64::from(self.repr_height_px)
    }

    /// Camera baseline expressed in representation pixels.
    pub fn baseline_px(&self) -> i32 {
        (self.baseline_mm / self.scale()).round() as i32
    }

    /// Farthest depth the launcher can reach, millimetres.
    pub fn reach_depth_mm(&self) -> f64 {
        self.real_length_mm - self.launcher_forward_offset_mm
    }

    /// Reach toward the left court edge (for negative widths), millimetres.
    pub fn reach_left_mm(&self) -> f64 {
        self.launcher_side_offset_mm
    }

    /// Reach toward the right court edge (for positive widths), millimetres.
    pub fn reach_right_mm(&self) -> f64 {
        self.real_width_mm - self.launcher_side_offset_mm
    }
}
