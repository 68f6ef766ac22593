pub(crate) fn clamp_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Straight RGBA8 -> premultiplied f32 (channels in 0..=255).
pub(crate) fn premultiply(px: [u8; 4]) -> [f32; 4] {
    let a = f32::from(px[3]) / 255.0;
    [
        f32::from(px[0]) * a,
        f32::from(px[1]) * a,
        f32::from(px[2]) * a,
        f32::from(px[3]),
    ]
}

/// Premultiplied f32 -> straight RGBA8.
pub(crate) fn unpremultiply(px: [f32; 4]) -> [u8; 4] {
    let a = px[3].clamp(0.0, 255.0);
    if a <= 0.0 {
        return [0, 0, 0, 0];
    }
    let inv = 255.0 / a;
    let c = |v: f32| (v * inv).round().clamp(0.0, 255.0) as u8;
    [c(px[0]), c(px[1]), c(px[2]), a.round() as u8]
}

/// Wrap an angle in radians into `[-pi, pi)`.
pub(crate) fn wrap_pi(rad: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    let mut r = (rad + PI).rem_euclid(TAU) - PI;
    if r >= PI {
        r -= TAU;
    }
    r
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
