//! GPU-facing plain-old-data layouts shared with `shaders/scene.wgsl`.

use crate::lighting::{DirectionalLight, EnvironmentLight, LightRig};
use crate::scene::MeshData;
use crate::state::Camera;
use glam::{Mat4, Vec3};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    pub fn from_mesh(mesh: &MeshData) -> Vec<MeshVertex> {
        mesh.positions
            .iter()
            .zip(&mesh.normals)
            .map(|(p, n)| MeshVertex {
                position: p.to_array(),
                normal: n.to_array(),
            })
            .collect()
    }
}

/// Per-frame camera and light block (`@group(0)`).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
    /// rgb premultiplied by intensity
    pub ambient: [f32; 4],
    /// xyz direction the light travels, w intensity
    pub key_dir: [f32; 4],
    pub key_color: [f32; 4],
    pub side_dir: [f32; 4],
    pub side_color: [f32; 4],
}

impl SceneUniforms {
    pub fn new(camera: &Camera, lights: &LightRig, env: Option<&EnvironmentLight>) -> Self {
        let tint = env.map(EnvironmentLight::tint).unwrap_or(Vec3::ONE);
        let ambient = lights.ambient.color * tint * lights.ambient.intensity;
        let dir = |l: &DirectionalLight| {
            let d = l.direction();
            [d.x, d.y, d.z, l.intensity]
        };
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            eye: camera.eye.extend(1.0).to_array(),
            ambient: ambient.extend(1.0).to_array(),
            key_dir: dir(&lights.key),
            key_color: lights.key.color.extend(1.0).to_array(),
            side_dir: dir(&lights.side),
            side_color: lights.side.color.extend(1.0).to_array(),
        }
    }
}

/// Per-draw node block (`@group(1)`).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct NodeUniforms {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl NodeUniforms {
    pub fn new(model: Mat4, mesh: &MeshData) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: mesh.color.to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn uniform_blocks_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<SceneUniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<NodeUniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<MeshVertex>(), 24);
    }

    #[test]
    fn environment_tints_ambient() {
        let cam = Camera::showcase(1.0);
        let rig = LightRig::default();
        let env = EnvironmentLight {
            mean_radiance: Vec3::new(1.0, 0.5, 0.5),
        };
        let u = SceneUniforms::new(&cam, &rig, Some(&env));
        assert_eq!(Vec4::from(u.ambient), Vec4::new(5.0, 2.5, 2.5, 1.0));
        let plain = SceneUniforms::new(&cam, &rig, None);
        assert_eq!(Vec4::from(plain.ambient), Vec4::new(5.0, 5.0, 5.0, 1.0));
        // key light sits on +Z and shines towards the origin
        assert_eq!(plain.key_dir, [0.0, 0.0, -1.0, 2.0]);
        // side light stays at world +X regardless of the model group's yaw
        assert_eq!(plain.side_dir, [-1.0, 0.0, 0.0, 1.5]);
    }
}
