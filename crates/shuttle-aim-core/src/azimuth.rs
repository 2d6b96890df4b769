/// Horizontal pointing angle from the launcher toward a target, radians.
///
/// `forward` and `lateral` are the target's coordinates in the launcher
/// frame. A target with `forward == 0` sits on the launcher's own lateral
/// axis; the angle is defined as zero there (no turn) rather than left to a
/// division blow-up.
///
/// Player fixes, difficulty targets and the fixed aim position all go
/// through this one function so their angles stay comparable.
pub fn launcher_azimuth(forward: f64, lateral: f64) -> f64 {
    if forward == 0.0 {
        return 0.0;
    }
    (lateral / forward).atan()
}
