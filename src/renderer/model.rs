use std::path::{Path, PathBuf};

use glam::Mat4;

use crate::error::{DemoError, Result};

use super::primitives::MeshData;
use super::vertex::Vertex;

/// Decoded RGBA8 image referenced by one or more model parts.
#[derive(Clone, Debug)]
pub struct ModelImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// One triangle primitive with its node transform baked into `transform`.
#[derive(Clone, Debug)]
pub struct ModelPart {
    pub mesh: MeshData,
    /// Index into [`ModelData::images`] of the base colour texture.
    pub image: Option<usize>,
    pub transform: Mat4,
}

/// CPU-side contents of a glTF file, ready to be uploaded.
#[derive(Clone, Debug)]
pub struct ModelData {
    pub path: PathBuf,
    pub parts: Vec<ModelPart>,
    /// `None` where an image's pixel format is not supported.
    pub images: Vec<Option<ModelImage>>,
}

impl ModelData {
    /// Import a `.gltf` or `.glb` file with its buffers and images.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading model: {:?}", path);

        let (document, buffers, images) = gltf::import(path).map_err(|source| DemoError::Model {
            path: path.to_path_buf(),
            source,
        })?;

        let images: Vec<Option<ModelImage>> = images.into_iter().map(to_rgba8).collect();

        let mut parts = Vec::new();
        let scene = document.default_scene().or_else(|| document.scenes().next());
        let roots: Vec<gltf::Node> = match scene {
            Some(scene) => scene.nodes().collect(),
            None => document.nodes().collect(),
        };
        for node in roots {
            collect_parts(&node, Mat4::IDENTITY, &buffers, &mut parts);
        }

        if parts.is_empty() {
            return Err(DemoError::EmptyModel {
                path: path.to_path_buf(),
            });
        }

        log::info!(
            "Loaded {} primitive(s) and {} image(s) from {:?}",
            parts.len(),
            images.iter().flatten().count(),
            path
        );

        Ok(Self {
            path: path.to_path_buf(),
            parts,
            images,
        })
    }
}

fn collect_parts(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    parts: &mut Vec<ModelPart>,
) {
    let transform = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::debug!(
                    "Skipping {:?} primitive in mesh {:?}",
                    primitive.mode(),
                    mesh.name()
                );
                continue;
            }

            let Some(data) = read_primitive(&primitive, buffers) else {
                log::warn!("Skipping primitive without positions in mesh {:?}", mesh.name());
                continue;
            };

            let image = primitive
                .material()
                .pbr_metallic_roughness()
                .base_color_texture()
                .map(|info| info.texture().source().index());

            parts.push(ModelPart {
                mesh: data,
                image,
                transform,
            });
        }
    }

    for child in node.children() {
        collect_parts(&child, transform, buffers, parts);
    }
}

fn read_primitive(primitive: &gltf::Primitive, buffers: &[gltf::buffer::Data]) -> Option<MeshData> {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| &data.0[..]));

    let positions: Vec<[f32; 3]> = reader.read_positions()?.collect();
    let uvs: Vec<[f32; 2]> = reader
        .read_tex_coords(0)
        .map(|uv| uv.into_f32().collect())
        .unwrap_or_else(|| vec![[0.0, 0.0]; positions.len()]);
    let normals: Option<Vec<[f32; 3]>> = reader.read_normals().map(|n| n.collect());

    let indices: Vec<u32> = reader
        .read_indices()
        .map(|indices| indices.into_u32().collect())
        .unwrap_or_else(|| (0..positions.len() as u32).collect());

    let vertices = positions
        .iter()
        .enumerate()
        .map(|(i, pos)| Vertex {
            pos: *pos,
            uv: uvs.get(i).copied().unwrap_or_default(),
            normal: normals
                .as_ref()
                .and_then(|n| n.get(i).copied())
                .unwrap_or_default(),
        })
        .collect();

    let mut data = MeshData::new(vertices, indices);
    if normals.is_none() {
        log::debug!("Primitive has no normals, averaging face normals");
        data.average_normals();
    }
    Some(data)
}

fn to_rgba8(image: gltf::image::Data) -> Option<ModelImage> {
    use gltf::image::Format;

    let (width, height) = (image.width, image.height);
    let pixels = match image.format {
        Format::R8G8B8A8 => image.pixels,
        Format::R8G8B8 => image
            .pixels
            .chunks_exact(3)
            .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], 255])
            .collect(),
        Format::R8G8 => image
            .pixels
            .chunks_exact(2)
            .flat_map(|rg| [rg[0], rg[1], 0, 255])
            .collect(),
        Format::R8 => image.pixels.iter().flat_map(|&r| [r, r, r, 255]).collect(),
        other => {
            log::warn!("Unsupported image format {:?}, texture will be plain", other);
            return None;
        }
    };

    Some(ModelImage {
        width,
        height,
        pixels,
    })
}
