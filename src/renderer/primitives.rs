use glam::Vec3;

use super::vertex::{v, Vertex};

/// CPU-side geometry, uploaded once with [`super::Mesh::from_data`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Replaces every normal with the normalized sum of the face normals of
    /// the triangles sharing that vertex.
    pub fn average_normals(&mut self) {
        average_normals(&mut self.vertices, &self.indices);
    }
}

pub fn average_normals(vertices: &mut [Vertex], indices: &[u32]) {
    for vertex in vertices.iter_mut() {
        vertex.normal = [0.0; 3];
    }

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if i0.max(i1).max(i2) >= vertices.len() {
            log::warn!("Skipping triangle {:?} with out-of-range index", tri);
            continue;
        }

        let p0 = Vec3::from_array(vertices[i0].pos);
        let e1 = Vec3::from_array(vertices[i1].pos) - p0;
        let e2 = Vec3::from_array(vertices[i2].pos) - p0;
        let Some(face) = e1.cross(e2).try_normalize() else {
            continue;
        };

        for index in [i0, i1, i2] {
            let n = Vec3::from_array(vertices[index].normal) + face;
            vertices[index].normal = n.to_array();
        }
    }

    for vertex in vertices.iter_mut() {
        vertex.normal = Vec3::from_array(vertex.normal)
            .normalize_or_zero()
            .to_array();
    }
}

/// Four-sided pyramid: apex at (0, 1, 0), base corners at y = -1.
pub fn pyramid_mesh() -> MeshData {
    let n = [0.0; 3];
    let vertices = vec![
        v([-1.0, -1.0, -0.6], [0.0, 0.0], n),
        v([0.0, -1.0, 1.0], [0.5, 0.0], n),
        v([1.0, -1.0, -0.6], [1.0, 0.0], n),
        v([0.0, 1.0, 0.0], [0.5, 1.0], n),
    ];
    let indices = vec![0, 1, 3, 1, 2, 3, 2, 0, 3, 0, 2, 1];

    let mut mesh = MeshData::new(vertices, indices);
    mesh.average_normals();
    mesh
}

/// The mesh viewer's pyramid: a three-sided base at y = -1 with its back
/// edge on z = 0, apex at (0, 1, 0). Drawn unlit, so uvs stay zero.
pub fn viewer_pyramid_mesh() -> MeshData {
    let (n, uv) = ([0.0; 3], [0.0; 2]);
    let vertices = vec![
        v([-1.0, -1.0, 0.0], uv, n),
        v([0.0, -1.0, 1.0], uv, n),
        v([1.0, -1.0, 0.0], uv, n),
        v([0.0, 1.0, 0.0], uv, n),
    ];
    let indices = vec![0, 3, 1, 1, 3, 2, 2, 3, 0, 0, 1, 2];

    let mut mesh = MeshData::new(vertices, indices);
    mesh.average_normals();
    mesh
}

/// 20x20 quad in the XZ plane facing +Y.
pub fn floor_mesh() -> MeshData {
    let up = [0.0, 1.0, 0.0];
    let vertices = vec![
        v([-10.0, 0.0, -10.0], [0.0, 0.0], up),
        v([10.0, 0.0, -10.0], [1.0, 0.0], up),
        v([-10.0, 0.0, 10.0], [0.0, 1.0], up),
        v([10.0, 0.0, 10.0], [1.0, 1.0], up),
    ];
    let indices = vec![0, 2, 1, 1, 2, 3];

    MeshData::new(vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_counts_look_right() {
        let pyramid = pyramid_mesh();
        assert_eq!(pyramid.vertices.len(), 4);
        assert_eq!(pyramid.indices.len(), 12);

        let floor = floor_mesh();
        assert_eq!(floor.vertices.len(), 4);
        assert_eq!(floor.indices.len(), 6);
    }

    #[test]
    fn viewer_pyramid_base_starts_at_the_origin_plane() {
        let pyramid = viewer_pyramid_mesh();
        assert_eq!(pyramid.indices.len(), 12);

        let base: Vec<_> = pyramid.vertices.iter().filter(|v| v.pos[1] == -1.0).collect();
        assert_eq!(base.len(), 3);
        let min_z = base.iter().map(|v| v.pos[2]).fold(f32::MAX, f32::min);
        assert_eq!(min_z, 0.0);
        assert!(pyramid.indices.iter().all(|&i| (i as usize) < pyramid.vertices.len()));
    }

    #[test]
    fn averaged_normals_are_unit_length_and_point_outwards() {
        let pyramid = pyramid_mesh();
        let centroid = pyramid
            .vertices
            .iter()
            .map(|v| Vec3::from_array(v.pos))
            .sum::<Vec3>()
            / pyramid.vertices.len() as f32;

        for vertex in &pyramid.vertices {
            let normal = Vec3::from_array(vertex.normal);
            assert!((normal.length() - 1.0).abs() < 1e-5);
            let outward = Vec3::from_array(vertex.pos) - centroid;
            assert!(normal.dot(outward) > 0.0, "{vertex:?}");
        }
    }

    #[test]
    fn flat_quad_keeps_face_normal() {
        let mut floor = floor_mesh();
        floor.average_normals();
        for vertex in &floor.vertices {
            assert_eq!(vertex.normal, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn degenerate_triangles_are_ignored() {
        let mut vertices = vec![
            v([0.0, 0.0, 0.0], [0.0, 0.0], [9.0; 3]),
            v([1.0, 0.0, 0.0], [0.0, 0.0], [9.0; 3]),
            v([2.0, 0.0, 0.0], [0.0, 0.0], [9.0; 3]),
        ];
        average_normals(&mut vertices, &[0, 1, 2]);
        for vertex in &vertices {
            assert_eq!(vertex.normal, [0.0; 3]);
        }
    }

    #[test]
    fn out_of_range_indices_are_skipped() {
        let mut mesh = floor_mesh();
        mesh.indices.extend_from_slice(&[0, 1, 42]);
        mesh.average_normals();
        assert_eq!(mesh.vertices[3].normal, [0.0, 1.0, 0.0]);
    }
}
