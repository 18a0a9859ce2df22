//! Binary glTF (`.glb`) import into a [`SceneTemplate`].
//!
//! Geometry, the node hierarchy and each mesh's base color are kept; textures
//! are dropped. Buffers must live in the GLB binary chunk.

use crate::error::AssetError;
use crate::scene::{MeshData, SceneTemplate, TemplateNode, Transform};
use glam::{Quat, Vec3, Vec4};

pub fn import_glb(bytes: &[u8], label: &str) -> Result<SceneTemplate, AssetError> {
    let gltf = gltf::Gltf::from_slice(bytes)?;
    let blob = gltf.blob.as_deref();
    let buffers: Vec<Option<&[u8]>> = gltf
        .buffers()
        .map(|b| match b.source() {
            gltf::buffer::Source::Bin => blob,
            gltf::buffer::Source::Uri(uri) => {
                log::warn!("[loader] {}: external buffer {} not supported", label, uri);
                None
            }
        })
        .collect();

    let mut template = SceneTemplate::default();
    // glTF mesh index -> template mesh index (None when it carried no geometry)
    let mut mesh_map: Vec<Option<usize>> = Vec::new();
    for mesh in gltf.meshes() {
        let mut positions: Vec<Vec3> = Vec::new();
        let mut normals: Vec<Vec3> = Vec::new();
        let mut indices: Vec<u32> = Vec::new();
        let mut color: Option<Vec4> = None;
        for prim in mesh.primitives() {
            if prim.mode() != gltf::mesh::Mode::Triangles {
                log::warn!("[loader] {}: skipping non-triangle primitive", label);
                continue;
            }
            let reader = prim.reader(|b| buffers.get(b.index()).copied().flatten());
            let Some(pos) = reader.read_positions() else {
                log::warn!("[loader] {}: primitive without positions", label);
                continue;
            };
            let base = positions.len() as u32;
            let pos: Vec<Vec3> = pos.map(Vec3::from).collect();
            let nrm: Vec<Vec3> = match reader.read_normals() {
                Some(it) => it.map(Vec3::from).collect(),
                None => vec![Vec3::Y; pos.len()],
            };
            match reader.read_indices() {
                Some(it) => indices.extend(it.into_u32().map(|i| base + i)),
                None => indices.extend(base..base + pos.len() as u32),
            }
            positions.extend(pos);
            normals.extend(nrm);
            // one color per merged mesh; the first primitive's material wins
            color.get_or_insert_with(|| {
                Vec4::from(prim.material().pbr_metallic_roughness().base_color_factor())
            });
        }
        let slot = MeshData::new(positions, normals, indices).map(|mut m| {
            m.color = color.unwrap_or(Vec4::ONE);
            template.meshes.push(m);
            template.meshes.len() - 1
        });
        mesh_map.push(slot);
    }

    let Some(scene) = gltf.default_scene().or_else(|| gltf.scenes().next()) else {
        return Err(AssetError::NoGeometry(label.to_owned()));
    };
    let mut stack: Vec<(gltf::Node, Option<usize>)> =
        scene.nodes().map(|n| (n, None)).collect();
    stack.reverse();
    while let Some((node, parent)) = stack.pop() {
        let (t, r, s) = node.transform().decomposed();
        let index = template.nodes.len();
        template.nodes.push(TemplateNode {
            name: node.name().map(str::to_owned),
            parent,
            transform: Transform {
                translation: Vec3::from(t),
                rotation: Quat::from_array(r),
                scale: Vec3::from(s),
            },
            mesh: node
                .mesh()
                .and_then(|m| mesh_map.get(m.index()).copied().flatten()),
        });
        let children: Vec<_> = node.children().collect();
        stack.extend(children.into_iter().rev().map(|c| (c, Some(index))));
    }

    if template.meshes.is_empty() || !template.nodes.iter().any(|n| n.mesh.is_some()) {
        return Err(AssetError::NoGeometry(label.to_owned()));
    }
    Ok(template)
}
