//! Constraint graph coloring for parallel-safe projection.
//!
//! Two constraints conflict iff they share a particle index. A proper
//! vertex coloring of the conflict graph partitions the constraints
//! into clusters whose members touch pairwise-disjoint particles, so
//! one cluster can be projected as a single wide parallel batch with
//! no synchronization inside it.
//!
//! The coloring is greedy: constraints are visited in ascending index
//! order and each takes the lowest color unused by its already-colored
//! neighbors. A u64 bitmask answers the common case (fewer than 64
//! colors) in O(1); denser graphs fall back to an exact scan bounded
//! by the neighbor count, so the search never loops unboundedly and
//! the result is proper at any color count. Greedy is not minimum-K,
//! but this runs once at initialization, not per frame.

/// Access to the particle indices a constraint references.
pub trait ConstraintParticles {
    /// The fixed-arity index array (`[u32; 2]` for edges, `[u32; 4]`
    /// for tets).
    type Ids: AsRef<[u32]>;

    /// Returns the referenced particle indices.
    fn particles(&self) -> Self::Ids;
}

/// Cluster layout for one constraint kind.
///
/// Constraint indices are flattened by ascending color, so cluster
/// `k` is the slice `ordered[offsets[k]..offsets[k + 1]]`. Within a
/// cluster, indices ascend — the layout is fully deterministic for
/// identical input.
#[derive(Debug, Clone)]
pub struct ClusterSet {
    /// Color assigned to each constraint, indexed by constraint index.
    pub color_of: Vec<u32>,
    /// Constraint indices grouped by ascending color.
    pub ordered: Vec<u32>,
    /// Prefix offsets into `ordered`; length is `cluster_count() + 1`.
    pub offsets: Vec<usize>,
}

impl ClusterSet {
    /// Colors the conflict graph of `constraints` and builds the
    /// flattened by-color layout.
    ///
    /// `particle_count` bounds the particle indices the constraints
    /// reference (validated upstream by the mesh).
    pub fn build<C: ConstraintParticles>(constraints: &[C], particle_count: usize) -> Self {
        let n = constraints.len();
        if n == 0 {
            return Self {
                color_of: Vec::new(),
                ordered: Vec::new(),
                offsets: vec![0],
            };
        }

        // Particle → constraint incidence
        let mut incidence: Vec<Vec<u32>> = vec![Vec::new(); particle_count];
        for (ci, constraint) in constraints.iter().enumerate() {
            for &p in constraint.particles().as_ref() {
                incidence[p as usize].push(ci as u32);
            }
        }

        // Constraint-constraint conflict adjacency. Constraints can
        // share more than one particle (tets sharing a face), so the
        // raw lists carry duplicates; dedup keeps the color scan tight.
        let mut adjacency: Vec<Vec<u32>> = vec![Vec::new(); n];
        for list in &incidence {
            for i in 0..list.len() {
                for j in (i + 1)..list.len() {
                    adjacency[list[i] as usize].push(list[j]);
                    adjacency[list[j] as usize].push(list[i]);
                }
            }
        }
        for neighbors in &mut adjacency {
            neighbors.sort_unstable();
            neighbors.dedup();
        }

        // Greedy coloring in ascending constraint-index order
        let mut color_of: Vec<u32> = vec![u32::MAX; n];
        let mut max_color = 0u32;

        for ci in 0..n {
            let mut used_mask: u64 = 0;
            let mut high_colors: Vec<u32> = Vec::new();

            for &neighbor in &adjacency[ci] {
                let c = color_of[neighbor as usize];
                if c == u32::MAX {
                    continue;
                }
                if c < 64 {
                    used_mask |= 1u64 << c;
                } else {
                    high_colors.push(c);
                }
            }

            let color = if used_mask != u64::MAX {
                // First zero bit is the lowest free color
                (!used_mask).trailing_zeros()
            } else {
                // All of 0..64 taken: scan upward from 64. Bounded by
                // the neighbor count, since at most that many colors
                // can be occupied.
                high_colors.sort_unstable();
                high_colors.dedup();
                let mut candidate = 64u32;
                for &c in &high_colors {
                    if c == candidate {
                        candidate += 1;
                    } else if c > candidate {
                        break;
                    }
                }
                candidate
            };

            color_of[ci] = color;
            max_color = max_color.max(color);
        }

        // Flatten into by-color layout: counts → prefix offsets →
        // stable fill in ascending constraint order
        let cluster_count = (max_color + 1) as usize;
        let mut counts = vec![0usize; cluster_count];
        for &c in &color_of {
            counts[c as usize] += 1;
        }

        let mut offsets = Vec::with_capacity(cluster_count + 1);
        offsets.push(0);
        for &count in &counts {
            offsets.push(offsets.last().unwrap() + count);
        }

        let mut ordered = vec![0u32; n];
        let mut cursor = offsets[..cluster_count].to_vec();
        for (ci, &c) in color_of.iter().enumerate() {
            ordered[cursor[c as usize]] = ci as u32;
            cursor[c as usize] += 1;
        }

        Self {
            color_of,
            ordered,
            offsets,
        }
    }

    /// Returns the number of clusters (colors).
    #[inline]
    pub fn cluster_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Returns the number of constraints partitioned.
    #[inline]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Returns true if no constraints were partitioned.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Returns the constraint indices of cluster `k`.
    #[inline]
    pub fn cluster(&self, k: usize) -> &[u32] {
        &self.ordered[self.offsets[k]..self.offsets[k + 1]]
    }

    /// Iterates clusters in ascending color order.
    pub fn clusters(&self) -> impl Iterator<Item = &[u32]> {
        (0..self.cluster_count()).map(move |k| self.cluster(k))
    }
}
