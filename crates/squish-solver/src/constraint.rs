//! Constraint building from tetrahedral mesh topology.
//!
//! One [`LengthConstraint`] per unique mesh edge and one
//! [`VolumeConstraint`] per tetrahedron, with rest-state parameters
//! computed from the initial positions. Building also distributes
//! inverse mass to the particles: each non-degenerate tetrahedron of
//! rest volume `V0` adds `1/(V0/4)` to each of its four particles.
//!
//! Constraints are immutable after construction. The mesh topology
//! never changes at runtime, so this runs exactly once per body.

use glam::Vec3;
use squish_mesh::TetMesh;
use squish_types::{SquishError, SquishResult};

use crate::coloring::ConstraintParticles;
use crate::state::ParticleState;

/// Distance constraint between two particles.
#[derive(Debug, Clone, Copy)]
pub struct LengthConstraint {
    /// First particle index.
    pub p1: u32,
    /// Second particle index.
    pub p2: u32,
    /// Rest length, strictly positive.
    pub rest_length: f32,
}

/// Signed-volume constraint over four particles.
///
/// A non-positive rest volume marks a degenerate tetrahedron: it is
/// kept in the set (the cluster partition covers every constraint)
/// but contributes neither inverse mass nor volume resistance.
#[derive(Debug, Clone, Copy)]
pub struct VolumeConstraint {
    /// The four particle indices.
    pub particles: [u32; 4],
    /// Rest signed volume; the sign encodes winding orientation.
    pub rest_volume: f32,
}

impl ConstraintParticles for LengthConstraint {
    type Ids = [u32; 2];

    fn particles(&self) -> [u32; 2] {
        [self.p1, self.p2]
    }
}

impl ConstraintParticles for VolumeConstraint {
    type Ids = [u32; 4];

    fn particles(&self) -> [u32; 4] {
        self.particles
    }
}

/// Signed volume of the tetrahedron `(x1, x2, x3, x4)`.
#[inline]
pub fn signed_volume(x1: Vec3, x2: Vec3, x3: Vec3, x4: Vec3) -> f32 {
    (x2 - x1).cross(x3 - x1).dot(x4 - x1) / 6.0
}

/// All constraints of one body, built once at initialization.
#[derive(Debug)]
pub struct ConstraintSet {
    /// One length constraint per unique mesh edge.
    pub lengths: Vec<LengthConstraint>,
    /// One volume constraint per tetrahedron.
    pub volumes: Vec<VolumeConstraint>,
    /// How many tetrahedra had non-positive rest volume.
    pub degenerate_tets: u32,
}

impl ConstraintSet {
    /// Builds constraints from the mesh and accumulates inverse mass
    /// into `state`.
    ///
    /// Fails with [`SquishError::InvalidMesh`] on a non-positive or
    /// non-finite edge rest length (a duplicate or collapsed edge).
    /// Degenerate tetrahedra are not fatal; they are counted in
    /// [`ConstraintSet::degenerate_tets`].
    pub fn build(mesh: &TetMesh, state: &mut ParticleState) -> SquishResult<Self> {
        state.inv_mass.fill(0.0);

        let mut lengths = Vec::with_capacity(mesh.edge_count());
        for e in 0..mesh.edge_count() {
            let [p1, p2] = mesh.edge(e);
            let rest_length = (mesh.position_vec3(p2 as usize)
                - mesh.position_vec3(p1 as usize))
            .length();

            if !rest_length.is_finite() || rest_length <= 0.0 {
                return Err(SquishError::InvalidMesh(format!(
                    "Edge {} ({} - {}) has degenerate rest length {}",
                    e, p1, p2, rest_length
                )));
            }

            lengths.push(LengthConstraint { p1, p2, rest_length });
        }

        let mut volumes = Vec::with_capacity(mesh.tet_count());
        let mut degenerate_tets = 0u32;
        for t in 0..mesh.tet_count() {
            let particles = mesh.tet(t);
            let [a, b, c, d] = particles;
            let rest_volume = signed_volume(
                mesh.position_vec3(a as usize),
                mesh.position_vec3(b as usize),
                mesh.position_vec3(c as usize),
                mesh.position_vec3(d as usize),
            );

            if !rest_volume.is_finite() {
                return Err(SquishError::InvalidMesh(format!(
                    "Tetrahedron {} has non-finite rest volume",
                    t
                )));
            }

            if rest_volume > 0.0 {
                let per_particle = 1.0 / (rest_volume / 4.0);
                for &p in &particles {
                    state.inv_mass[p as usize] += per_particle;
                }
            } else {
                degenerate_tets += 1;
            }

            volumes.push(VolumeConstraint {
                particles,
                rest_volume,
            });
        }

        Ok(Self {
            lengths,
            volumes,
            degenerate_tets,
        })
    }
}
