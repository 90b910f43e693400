use crystal::prelude::*;

/// Lambert term for a unit `normal` lit from `light_dir` (pointing towards
/// the light). Back-facing surfaces get no light; there is no ambient floor
/// here.
pub fn diffuse_intensity(normal: &Vec3<f32>, light_dir: &Vec3<f32>) -> f32 {
    match Unit::try_new_normalize(*light_dir, 0.0) {
        Some(light_dir) => clamp_unit(normal.dot_product(&light_dir)),
        None => 0.0,
    }
}

/// Blinn-Phong highlight term. `view_dir` points from the surface towards the
/// eye.
pub fn specular_intensity(
    normal: &Vec3<f32>,
    light_dir: &Vec3<f32>,
    view_dir: &Vec3<f32>,
    shininess: f32,
) -> f32 {
    if diffuse_intensity(normal, light_dir) <= 0.0 {
        return 0.0;
    }

    let light_dir = match Unit::try_new_normalize(*light_dir, 0.0) {
        Some(light_dir) => light_dir.into_inner(),
        None => return 0.0,
    };
    let view_dir = match Unit::try_new_normalize(*view_dir, 0.0) {
        Some(view_dir) => view_dir.into_inner(),
        None => return 0.0,
    };

    match Unit::try_new_normalize(light_dir + view_dir, 0.0) {
        Some(half) => clamp_unit(normal.dot_product(&half)).powf(shininess.max(0.0)),
        None => 0.0,
    }
}

/// Snaps `intensity` to the nearest of `levels + 1` evenly spaced bands
/// `{0, 1/levels, ..., 1}`. A `levels` of zero is treated as one.
pub fn quantize(intensity: f32, levels: u32) -> f32 {
    let step = 1.0 / levels.max(1) as f32;
    let banded = (clamp_unit(intensity) / step).round() * step;
    banded.min(1.0)
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
