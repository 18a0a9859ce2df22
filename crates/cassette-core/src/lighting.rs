//! Fixed three-light rig and the optional environment tint.

use crate::error::AssetError;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub color: Vec3,
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub color: Vec3,
    pub intensity: f32,
    /// Light shines from `position` towards the origin.
    pub position: Vec3,
}

impl DirectionalLight {
    #[inline]
    pub fn direction(&self) -> Vec3 {
        (-self.position).normalize_or_zero()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightRig {
    pub ambient: AmbientLight,
    pub key: DirectionalLight,
    pub side: DirectionalLight,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient: AmbientLight {
                color: Vec3::ONE,
                intensity: 5.0,
            },
            key: DirectionalLight {
                color: Vec3::ONE,
                intensity: 2.0,
                position: Vec3::new(0.0, 0.0, 5.0),
            },
            side: DirectionalLight {
                color: Vec3::ONE,
                intensity: 1.5,
                position: Vec3::new(5.0, 0.0, 0.0),
            },
        }
    }
}

/// Environment lighting reduced to a single mean radiance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvironmentLight {
    pub mean_radiance: Vec3,
}

impl EnvironmentLight {
    /// Average an equirectangular RGBA image, weighting each row by the solid
    /// angle it covers. Returns `None` for empty input.
    pub fn from_equirect(width: u32, height: u32, rgba: &[f32]) -> Option<Self> {
        let (w, h) = (width as usize, height as usize);
        if w == 0 || h == 0 || rgba.len() < w * h * 4 {
            return None;
        }
        let mut sum = Vec3::ZERO;
        let mut weight_sum = 0.0_f32;
        for row in 0..h {
            let lat = ((row as f32 + 0.5) / h as f32 - 0.5) * std::f32::consts::PI;
            let weight = lat.cos();
            let start = row * w * 4;
            let row_sum = rgba[start..start + w * 4]
                .chunks_exact(4)
                .filter(|px| px[..3].iter().all(|c| c.is_finite()))
                .fold(Vec3::ZERO, |acc, px| acc + Vec3::new(px[0], px[1], px[2]));
            sum += row_sum * weight;
            weight_sum += weight * w as f32;
        }
        (weight_sum > 0.0).then(|| Self {
            mean_radiance: sum / weight_sum,
        })
    }

    /// Decode an OpenEXR environment map.
    pub fn decode_exr(bytes: &[u8], label: &str) -> Result<Self, AssetError> {
        let img = image::load_from_memory_with_format(bytes, image::ImageFormat::OpenExr)?;
        let rgba = img.to_rgba32f();
        Self::from_equirect(rgba.width(), rgba.height(), rgba.as_raw())
            .ok_or_else(|| AssetError::EmptyImage(label.to_owned()))
    }

    /// Ambient tint normalised so the brightest channel is 1.
    pub fn tint(&self) -> Vec3 {
        let m = self.mean_radiance.max_element();
        if m > 0.0 {
            self.mean_radiance / m
        } else {
            Vec3::ONE
        }
    }
}
