/// Moves `value` toward `target` by at most `step`, landing exactly on the
/// target instead of passing it. A non-positive step leaves `value` alone.
#[inline]
pub fn step_toward(value: f32, target: f32, step: f32) -> f32 {
    if step <= 0.0 {
        return value;
    }
    if value < target {
        (value + step).min(target)
    } else if value > target {
        (value - step).max(target)
    } else {
        value
    }
}
