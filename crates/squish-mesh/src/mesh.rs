//! Core tetrahedral mesh type with SoA (Structure of Arrays) layout.
//!
//! The SoA layout stores each coordinate channel contiguously:
//! - `pos_x: [x0, x1, x2, ...]`
//! - `pos_y: [y0, y1, y2, ...]`
//! - `pos_z: [z0, z1, z2, ...]`
//!
//! Index buffers are flat: four entries per tetrahedron, two per edge,
//! three per surface triangle. Surface triangles exist for display only
//! and take no part in the simulation.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use squish_types::{SquishError, SquishResult};

/// A tetrahedral mesh stored in Structure-of-Arrays layout.
///
/// Vertex positions live in separate per-channel contiguous arrays.
/// Tetrahedra, unique edges, and surface triangles reference into them
/// through flat `u32` index buffers. Topology is immutable after
/// initialization; only positions may be rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TetMesh {
    // --- Vertex data (SoA) ---
    /// X coordinates of all vertices.
    pub pos_x: Vec<f32>,
    /// Y coordinates of all vertices.
    pub pos_y: Vec<f32>,
    /// Z coordinates of all vertices.
    pub pos_z: Vec<f32>,

    // --- Index buffers ---
    /// Tetrahedron indices — each tet is `[v0, v1, v2, v3]`.
    /// Stored flat: `[t0v0, t0v1, t0v2, t0v3, t1v0, ...]`
    pub tet_indices: Vec<u32>,

    /// Unique edge indices — each edge is `[v0, v1]`, stored flat.
    pub edge_indices: Vec<u32>,

    /// Surface triangle indices for rendering — each triangle is
    /// `[v0, v1, v2]`, stored flat.
    pub surface_indices: Vec<u32>,
}

impl TetMesh {
    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    /// Returns the number of tetrahedra.
    #[inline]
    pub fn tet_count(&self) -> usize {
        self.tet_indices.len() / 4
    }

    /// Returns the number of unique edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_indices.len() / 2
    }

    /// Returns the number of surface triangles.
    #[inline]
    pub fn surface_triangle_count(&self) -> usize {
        self.surface_indices.len() / 3
    }

    /// Returns the position of vertex `i` as `[x, y, z]`.
    #[inline]
    pub fn position(&self, i: usize) -> [f32; 3] {
        [self.pos_x[i], self.pos_y[i], self.pos_z[i]]
    }

    /// Returns the position as a `glam::Vec3`.
    #[inline]
    pub fn position_vec3(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    /// Returns the four vertex indices of tetrahedron `t`.
    #[inline]
    pub fn tet(&self, t: usize) -> [u32; 4] {
        let base = t * 4;
        [
            self.tet_indices[base],
            self.tet_indices[base + 1],
            self.tet_indices[base + 2],
            self.tet_indices[base + 3],
        ]
    }

    /// Returns the two vertex indices of edge `e`.
    #[inline]
    pub fn edge(&self, e: usize) -> [u32; 2] {
        let base = e * 2;
        [self.edge_indices[base], self.edge_indices[base + 1]]
    }

    /// Returns the three vertex indices of surface triangle `t`.
    #[inline]
    pub fn surface_triangle(&self, t: usize) -> [u32; 3] {
        let base = t * 3;
        [
            self.surface_indices[base],
            self.surface_indices[base + 1],
            self.surface_indices[base + 2],
        ]
    }

    /// Sets the position of vertex `i`.
    #[inline]
    pub fn set_position(&mut self, i: usize, x: f32, y: f32, z: f32) {
        self.pos_x[i] = x;
        self.pos_y[i] = y;
        self.pos_z[i] = z;
    }

    /// Creates an empty mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_capacity: usize, tet_capacity: usize) -> Self {
        Self {
            pos_x: Vec::with_capacity(vertex_capacity),
            pos_y: Vec::with_capacity(vertex_capacity),
            pos_z: Vec::with_capacity(vertex_capacity),
            tet_indices: Vec::with_capacity(tet_capacity * 4),
            edge_indices: Vec::new(),
            surface_indices: Vec::new(),
        }
    }

    /// Applies an affine transform to all vertex positions in place.
    ///
    /// Scene files carry a placement transform for the body; it is
    /// baked into the rest positions before constraints are built.
    pub fn apply_transform(&mut self, transform: &Mat4) {
        for i in 0..self.vertex_count() {
            let p = transform.transform_point3(self.position_vec3(i));
            self.set_position(i, p.x, p.y, p.z);
        }
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - All SoA arrays have the same length
    /// - Index buffer lengths are multiples of their arity
    /// - All indices are within bounds
    /// - No edge or tetrahedron references a vertex twice
    pub fn validate(&self) -> SquishResult<()> {
        let n = self.pos_x.len();

        if self.pos_y.len() != n || self.pos_z.len() != n {
            return Err(SquishError::InvalidMesh(
                "Position arrays have inconsistent lengths".into(),
            ));
        }

        if self.tet_indices.len() % 4 != 0 {
            return Err(SquishError::InvalidMesh(
                "Tet index count is not divisible by 4".into(),
            ));
        }
        if self.edge_indices.len() % 2 != 0 {
            return Err(SquishError::InvalidMesh(
                "Edge index count is not divisible by 2".into(),
            ));
        }
        if self.surface_indices.len() % 3 != 0 {
            return Err(SquishError::InvalidMesh(
                "Surface index count is not divisible by 3".into(),
            ));
        }

        for (buffer, what) in [
            (&self.tet_indices, "tet"),
            (&self.edge_indices, "edge"),
            (&self.surface_indices, "surface triangle"),
        ] {
            for (i, &idx) in buffer.iter().enumerate() {
                if idx as usize >= n {
                    return Err(SquishError::InvalidMesh(format!(
                        "{} index {} at position {} is out of range (vertex count: {})",
                        what, idx, i, n
                    )));
                }
            }
        }

        for e in 0..self.edge_count() {
            let [a, b] = self.edge(e);
            if a == b {
                return Err(SquishError::InvalidMesh(format!(
                    "Edge {} references vertex {} twice",
                    e, a
                )));
            }
        }

        for t in 0..self.tet_count() {
            let [a, b, c, d] = self.tet(t);
            if a == b || a == c || a == d || b == c || b == d || c == d {
                return Err(SquishError::InvalidMesh(format!(
                    "Tetrahedron {} has repeated vertex indices: [{}, {}, {}, {}]",
                    t, a, b, c, d
                )));
            }
        }

        Ok(())
    }

    /// Constructs a mesh from interleaved AoS buffers.
    ///
    /// This is the ingestion contract: flat `[x0, y0, z0, x1, ...]`
    /// positions plus flat tet / edge / surface index buffers, as
    /// produced by the text-format loader or an external pipeline.
    pub fn from_interleaved(
        positions: &[f32],
        tet_indices: &[u32],
        edge_indices: &[u32],
        surface_indices: &[u32],
    ) -> SquishResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(SquishError::InvalidMesh(
                "Interleaved positions length not divisible by 3".into(),
            ));
        }

        let n = positions.len() / 3;
        let mut mesh = Self::with_capacity(n, tet_indices.len() / 4);

        for i in 0..n {
            mesh.pos_x.push(positions[i * 3]);
            mesh.pos_y.push(positions[i * 3 + 1]);
            mesh.pos_z.push(positions[i * 3 + 2]);
        }

        mesh.tet_indices = tet_indices.to_vec();
        mesh.edge_indices = edge_indices.to_vec();
        mesh.surface_indices = surface_indices.to_vec();

        mesh.validate()?;
        Ok(mesh)
    }
}
