//! Particle state — SoA buffers for all per-particle data.
//!
//! This is the single mutable shared resource of the simulation.
//! The solver owns it exclusively for the duration of a step; readers
//! (rendering, broad phase) observe it only between completed frames.

use glam::Vec3;
use squish_mesh::TetMesh;

/// SoA particle state buffers.
///
/// All arrays have length `particle_count`. Channels are stored
/// contiguously:
/// ```text
/// pos_x: [x0, x1, x2, ...]
/// pos_y: [y0, y1, y2, ...]
/// ...
/// ```
///
/// `inv_mass == 0.0` marks a pinned (immovable) particle: integration
/// and constraint projection never move it.
pub struct ParticleState {
    /// Number of particles.
    pub particle_count: usize,

    // ─── Position (current) ───
    pub pos_x: Vec<f32>,
    pub pos_y: Vec<f32>,
    pub pos_z: Vec<f32>,

    // ─── Position at sub-step start ───
    pub prev_x: Vec<f32>,
    pub prev_y: Vec<f32>,
    pub prev_z: Vec<f32>,

    // ─── Velocity ───
    pub vel_x: Vec<f32>,
    pub vel_y: Vec<f32>,
    pub vel_z: Vec<f32>,

    /// Per-particle inverse mass. Accumulated from incident tetrahedra
    /// by the constraint builder; 0.0 = pinned or untouched by any
    /// non-degenerate tet.
    pub inv_mass: Vec<f32>,
}

impl ParticleState {
    /// Initializes particle state from a mesh.
    ///
    /// Positions are copied from the mesh; velocities start at zero.
    /// Inverse masses start at zero and are filled in by
    /// [`crate::constraint::ConstraintSet::build`].
    pub fn from_mesh(mesh: &TetMesh) -> Self {
        let n = mesh.vertex_count();
        Self {
            particle_count: n,
            pos_x: mesh.pos_x.clone(),
            pos_y: mesh.pos_y.clone(),
            pos_z: mesh.pos_z.clone(),
            prev_x: mesh.pos_x.clone(),
            prev_y: mesh.pos_y.clone(),
            prev_z: mesh.pos_z.clone(),
            vel_x: vec![0.0; n],
            vel_y: vec![0.0; n],
            vel_z: vec![0.0; n],
            inv_mass: vec![0.0; n],
        }
    }

    /// Returns the position of particle `i` as a `glam::Vec3`.
    #[inline]
    pub fn position_vec3(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    /// Returns the velocity of particle `i` as a `glam::Vec3`.
    #[inline]
    pub fn velocity_vec3(&self, i: usize) -> Vec3 {
        Vec3::new(self.vel_x[i], self.vel_y[i], self.vel_z[i])
    }

    /// Pins particle `i` by zeroing its inverse mass.
    pub fn pin(&mut self, i: usize) {
        self.inv_mass[i] = 0.0;
    }

    /// Integrate one sub-step: `prev = pos; pos += v·sdt + g·sdt²`.
    ///
    /// Semi-implicit Euler under constant gravity. Pinned particles
    /// are skipped entirely, so their position and sub-step-start
    /// buffers stay bit-identical.
    pub fn integrate(&mut self, sdt: f32, gravity: Vec3) {
        let sdt2 = sdt * sdt;
        for i in 0..self.particle_count {
            if self.inv_mass[i] == 0.0 {
                continue;
            }
            self.prev_x[i] = self.pos_x[i];
            self.prev_y[i] = self.pos_y[i];
            self.prev_z[i] = self.pos_z[i];

            self.pos_x[i] += self.vel_x[i] * sdt + gravity.x * sdt2;
            self.pos_y[i] += self.vel_y[i] * sdt + gravity.y * sdt2;
            self.pos_z[i] += self.vel_z[i] * sdt + gravity.z * sdt2;
        }
    }

    /// Update velocities from position change: `v = (pos - prev) / sdt`.
    pub fn update_velocities(&mut self, sdt: f32) {
        let inv_sdt = 1.0 / sdt;
        for i in 0..self.particle_count {
            self.vel_x[i] = (self.pos_x[i] - self.prev_x[i]) * inv_sdt;
            self.vel_y[i] = (self.pos_y[i] - self.prev_y[i]) * inv_sdt;
            self.vel_z[i] = (self.pos_z[i] - self.prev_z[i]) * inv_sdt;
        }
    }

    /// Apply velocity damping: `v *= (1 - damping)`.
    pub fn damp_velocities(&mut self, damping: f32) {
        let factor = 1.0 - damping;
        for i in 0..self.particle_count {
            self.vel_x[i] *= factor;
            self.vel_y[i] *= factor;
            self.vel_z[i] *= factor;
        }
    }

    /// Compute total kinetic energy: 0.5 * Σ m_i * ||v_i||².
    ///
    /// Pinned particles carry infinite mass but zero velocity; they
    /// are excluded.
    pub fn kinetic_energy(&self) -> f64 {
        let mut energy = 0.0f64;
        for i in 0..self.particle_count {
            let w = self.inv_mass[i];
            if w == 0.0 {
                continue;
            }
            let vx = self.vel_x[i] as f64;
            let vy = self.vel_y[i] as f64;
            let vz = self.vel_z[i] as f64;
            energy += 0.5 * (1.0 / w as f64) * (vx * vx + vy * vy + vz * vz);
        }
        energy
    }

    /// Scans positions and velocities for non-finite values.
    ///
    /// Returns a description of the first offender, or `None` if the
    /// state is clean.
    pub fn find_non_finite(&self) -> Option<String> {
        for i in 0..self.particle_count {
            if !self.pos_x[i].is_finite()
                || !self.pos_y[i].is_finite()
                || !self.pos_z[i].is_finite()
            {
                return Some(format!("position of particle {}", i));
            }
            if !self.vel_x[i].is_finite()
                || !self.vel_y[i].is_finite()
                || !self.vel_z[i].is_finite()
            {
                return Some(format!("velocity of particle {}", i));
            }
        }
        None
    }

    /// Copies positions into a flat interleaved `[x0, y0, z0, ...]`
    /// buffer for rendering.
    pub fn positions_interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.particle_count * 3);
        for i in 0..self.particle_count {
            out.push(self.pos_x[i]);
            out.push(self.pos_y[i]);
            out.push(self.pos_z[i]);
        }
        out
    }

    /// Copies velocities into a flat interleaved buffer for diagnostics.
    pub fn velocities_interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.particle_count * 3);
        for i in 0..self.particle_count {
            out.push(self.vel_x[i]);
            out.push(self.vel_y[i]);
            out.push(self.vel_z[i]);
        }
        out
    }
}
