//! CPU-side mesh representation produced by loaders.

use bytemuck::{Pod, Zeroable};
use corelib::{Aabb, Vec2, Vec3};

/// Interleaved vertex with position/normal/uv. Values are in object space.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// Flattened triangle list: one entry per triangle corner in each of the
/// three parallel sequences, no shared vertices.
///
/// The three sequences always have the same length, a multiple of 3.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    uvs: Vec<Vec2>,
    normals: Vec<Vec3>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_triangle_capacity(triangles: usize) -> Self {
        let corners = triangles * 3;
        Self {
            vertices: Vec::with_capacity(corners),
            uvs: Vec::with_capacity(corners),
            normals: Vec::with_capacity(corners),
        }
    }

    /// Append one triangle, corners in the given order.
    pub(crate) fn push_triangle(&mut self, corners: [(Vec3, Vec2, Vec3); 3]) {
        for (position, uv, normal) in corners {
            self.vertices.push(position);
            self.uvs.push(uv);
            self.normals.push(normal);
        }
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Number of triangle corners (what a renderer passes as vertex count).
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Bounds of every emitted position; `None` when the mesh is empty.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter().copied())
    }

    /// Pack the three sequences into one vertex buffer layout.
    pub fn interleaved(&self) -> Vec<MeshVertex> {
        self.vertices
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .map(|((p, n), uv)| MeshVertex::new(p.to_array(), n.to_array(), uv.to_array()))
            .collect()
    }

    /// Move the parallel sequences out as `(vertices, uvs, normals)`.
    pub fn into_parts(self) -> (Vec<Vec3>, Vec<Vec2>, Vec<Vec3>) {
        (self.vertices, self.uvs, self.normals)
    }
}
