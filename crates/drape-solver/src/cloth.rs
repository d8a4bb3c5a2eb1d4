//! The cloth aggregate: owns the point-mass store and runs the substep loop.

use std::time::Instant;

use drape_contact::{CollisionObject, SelfCollision, SpatialHashIndex};
use drape_mesh::normals::compute_vertex_normals;
use drape_mesh::ClothMesh;
use drape_types::{DrapeError, DrapeResult, ParticleId, PointMass, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::grid::{self, Orientation};
use crate::integrator;
use crate::params::ClothParameters;
use crate::spring::{Spring, SpringType};
use crate::strain_limit;

/// Construction parameters for a [`Cloth`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothDesc {
    /// Physical extent along the grid columns.
    pub width: f32,
    /// Physical extent along the grid rows.
    pub height: f32,
    pub num_width_points: usize,
    pub num_height_points: usize,
    /// Half the self-collision contact distance.
    pub thickness: f32,
    pub orientation: Orientation,
    /// Grid coordinates `[col, row]` of pinned point masses.
    pub pinned: Vec<[usize; 2]>,
}

impl Default for ClothDesc {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            num_width_points: 32,
            num_height_points: 32,
            thickness: 0.01,
            orientation: Orientation::Horizontal,
            pinned: Vec::new(),
        }
    }
}

impl ClothDesc {
    /// Total number of point masses.
    pub fn point_count(&self) -> usize {
        self.num_width_points * self.num_height_points
    }

    /// Rejects empty grids, non-physical extents and out-of-grid pins.
    pub fn validate(&self) -> DrapeResult<()> {
        if self.num_width_points == 0 || self.num_height_points == 0 {
            return Err(DrapeError::InvalidGrid(format!(
                "grid must have at least one point per side, got {}x{}",
                self.num_width_points, self.num_height_points
            )));
        }
        u32::try_from(self.point_count()).map_err(|_| {
            DrapeError::InvalidGrid(format!("{} points exceed the id range", self.point_count()))
        })?;
        ClothMesh::grid_halfedge_count(self.num_width_points, self.num_height_points)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| {
                DrapeError::InvalidGrid(format!(
                    "{}x{} grid exceeds the mesh id range",
                    self.num_width_points, self.num_height_points
                ))
            })?;
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("thickness", self.thickness),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DrapeError::InvalidGrid(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        if let Some([col, row]) = self
            .pinned
            .iter()
            .find(|[c, r]| *c >= self.num_width_points || *r >= self.num_height_points)
        {
            return Err(DrapeError::InvalidGrid(format!(
                "pinned point [{col}, {row}] lies outside the {}x{} grid",
                self.num_width_points, self.num_height_points
            )));
        }
        Ok(())
    }
}

/// Summary of one [`Cloth::simulate`] call.
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    /// Substeps performed.
    pub substeps: u32,
    /// Neighbour contacts resolved by self-collision, summed over substeps.
    pub self_collision_contacts: usize,
    /// Springs shortened by strain limiting, summed over substeps.
    pub strain_corrections: usize,
    /// Wall-clock time for the frame (seconds).
    pub wall_time: f64,
}

/// A mass-spring cloth sheet.
///
/// Point masses are stored row-major: the point at `(col, row)` has index
/// `row · num_width_points + col`. Springs, the spatial hash and the mesh
/// all refer to point masses by that index.
#[derive(Debug)]
pub struct Cloth {
    desc: ClothDesc,
    point_masses: Vec<PointMass>,
    springs: Vec<Spring>,
    mesh: ClothMesh,
    spatial_hash: SpatialHashIndex,
    self_collision: SelfCollision,
}

impl Cloth {
    /// Builds the grid, springs and mesh described by `desc`.
    ///
    /// `rng` supplies the out-of-plane jitter of vertical sheets.
    pub fn new<R: Rng + ?Sized>(desc: ClothDesc, rng: &mut R) -> DrapeResult<Self> {
        desc.validate()?;

        let point_masses = grid::build_point_masses(
            desc.width,
            desc.height,
            desc.num_width_points,
            desc.num_height_points,
            desc.orientation,
            &desc.pinned,
            rng,
        );
        let springs = grid::build_springs(
            desc.num_width_points,
            desc.num_height_points,
            &point_masses,
        );
        let mesh = ClothMesh::from_grid(desc.num_width_points, desc.num_height_points);
        let spatial_hash = SpatialHashIndex::new(
            desc.width,
            desc.height,
            desc.num_width_points,
            desc.num_height_points,
        );

        tracing::info!(
            points = point_masses.len(),
            springs = springs.len(),
            triangles = mesh.triangle_count(),
            orientation = ?desc.orientation,
            "Cloth constructed"
        );

        Ok(Self {
            self_collision: SelfCollision::new(desc.thickness),
            desc,
            point_masses,
            springs,
            mesh,
            spatial_hash,
        })
    }

    /// Builds the cloth with a [`StdRng`] seeded from `seed`.
    pub fn with_seed(desc: ClothDesc, seed: u64) -> DrapeResult<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new(desc, &mut rng)
    }

    /// Advances the cloth by one frame of `simulation_steps` substeps.
    ///
    /// Each substep runs force accumulation, Verlet integration, a spatial
    /// hash rebuild, per-point self-collision followed by every collision
    /// object, and one strain-limiting pass.
    pub fn simulate(
        &mut self,
        frames_per_sec: f32,
        simulation_steps: u32,
        params: &ClothParameters,
        external_accelerations: &[Vec3],
        collision_objects: &[Box<dyn CollisionObject>],
    ) -> FrameReport {
        let start = Instant::now();
        let mass = self.particle_mass(params);
        let delta_t = integrator::substep_duration(frames_per_sec, simulation_steps);

        let mut report = FrameReport::default();
        for _ in 0..simulation_steps {
            self.substep(
                params,
                mass,
                delta_t,
                simulation_steps,
                external_accelerations,
                collision_objects,
                &mut report,
            );
        }
        report.wall_time = start.elapsed().as_secs_f64();

        tracing::debug!(
            substeps = report.substeps,
            self_collision_contacts = report.self_collision_contacts,
            strain_corrections = report.strain_corrections,
            wall_time = report.wall_time,
            "Frame simulated"
        );
        report
    }

    #[allow(clippy::too_many_arguments)]
    fn substep(
        &mut self,
        params: &ClothParameters,
        mass: f32,
        delta_t: f32,
        simulation_steps: u32,
        external_accelerations: &[Vec3],
        collision_objects: &[Box<dyn CollisionObject>],
        report: &mut FrameReport,
    ) {
        integrator::accumulate_forces(
            &mut self.point_masses,
            &self.springs,
            params,
            mass,
            external_accelerations,
        );
        integrator::verlet_step(&mut self.point_masses, mass, delta_t, params.damping);

        self.spatial_hash.rebuild(&self.point_masses);
        for i in 0..self.point_masses.len() {
            report.self_collision_contacts += self.self_collision.resolve(
                i,
                &mut self.point_masses,
                &self.spatial_hash,
                simulation_steps,
            );
            let pm = &mut self.point_masses[i];
            if pm.pinned {
                continue;
            }
            for object in collision_objects {
                object.resolve_contact(pm);
            }
        }

        report.strain_corrections +=
            strain_limit::limit_strain(&mut self.point_masses, &self.springs);
        report.substeps += 1;
    }

    /// Returns every point mass to its start position with zero velocity.
    pub fn reset(&mut self) {
        for pm in &mut self.point_masses {
            pm.reset();
        }
    }

    /// Construction parameters.
    pub fn desc(&self) -> &ClothDesc {
        &self.desc
    }

    pub fn width(&self) -> f32 {
        self.desc.width
    }

    pub fn height(&self) -> f32 {
        self.desc.height
    }

    pub fn num_width_points(&self) -> usize {
        self.desc.num_width_points
    }

    pub fn num_height_points(&self) -> usize {
        self.desc.num_height_points
    }

    pub fn thickness(&self) -> f32 {
        self.desc.thickness
    }

    pub fn orientation(&self) -> Orientation {
        self.desc.orientation
    }

    /// Pinned grid coordinates `[col, row]`.
    pub fn pinned(&self) -> &[[usize; 2]] {
        &self.desc.pinned
    }

    pub fn point_masses(&self) -> &[PointMass] {
        &self.point_masses
    }

    /// Mutable access for scripted perturbation. Pinned flags should be
    /// left untouched.
    pub fn point_masses_mut(&mut self) -> &mut [PointMass] {
        &mut self.point_masses
    }

    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    pub fn mesh(&self) -> &ClothMesh {
        &self.mesh
    }

    pub fn spatial_hash(&self) -> &SpatialHashIndex {
        &self.spatial_hash
    }

    /// Index of the point mass at grid coordinates `(col, row)`.
    #[inline]
    pub fn point_index(&self, col: usize, row: usize) -> ParticleId {
        ParticleId::from(row * self.desc.num_width_points + col)
    }

    /// Point mass at grid coordinates `(col, row)`.
    pub fn point_mass(&self, col: usize, row: usize) -> &PointMass {
        &self.point_masses[self.point_index(col, row).index()]
    }

    /// Current positions in store order.
    pub fn positions(&self) -> Vec<Vec3> {
        self.point_masses.iter().map(|pm| pm.position).collect()
    }

    /// Area-weighted vertex normals of the current configuration.
    pub fn vertex_normals(&self) -> Vec<Vec3> {
        compute_vertex_normals(&self.mesh, &self.positions())
    }

    /// Number of springs of the given class.
    pub fn spring_count(&self, spring_type: SpringType) -> usize {
        self.springs
            .iter()
            .filter(|s| s.spring_type == spring_type)
            .count()
    }

    /// Mass of one point under `params`.
    pub fn particle_mass(&self, params: &ClothParameters) -> f32 {
        integrator::particle_mass(
            self.desc.width,
            self.desc.height,
            params.density,
            self.desc.num_width_points,
            self.desc.num_height_points,
        )
    }

    /// Largest length-over-rest ratio across all springs.
    pub fn max_strain(&self) -> f32 {
        strain_limit::max_strain(&self.point_masses, &self.springs)
    }

    /// Kinetic energy of the unpinned points, from the Verlet velocity over
    /// a substep of length `delta_t`.
    pub fn kinetic_energy(&self, params: &ClothParameters, delta_t: f32) -> f32 {
        let mass = self.particle_mass(params);
        self.point_masses
            .iter()
            .filter(|pm| !pm.pinned)
            .map(|pm| 0.5 * mass * pm.velocity(delta_t).length_squared())
            .sum()
    }

    /// Largest distance of any point from its start position.
    pub fn max_displacement(&self) -> f32 {
        self.point_masses
            .iter()
            .map(|pm| pm.position.distance(pm.start_position))
            .fold(0.0, f32::max)
    }
}
