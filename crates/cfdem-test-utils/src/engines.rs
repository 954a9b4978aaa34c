//! In-memory solver engines implementing the collaborator traits.
//!
//! Neither engine does any physics. [`MockFluidEngine`] writes a
//! prescribed velocity profile into its mesh on every advance;
//! [`MockParticleEngine`] drifts non-fixed particles with their own
//! velocity. Both record every call the kernel makes and can be told to
//! fail on a given advance.

use std::collections::HashMap;

use cfdem_core::{
    vec3, EngineError, FluidEngine, FluidParam, GeometrySpec, Mesh, MeshKind, Particle,
    ParticleCollection, ParticleEngine, ParticleGroup, ParticleMaterial, ParticleParam,
    PointId, SurfaceCondition, Vec3, WallBoundary,
};
use indexmap::IndexMap;

use crate::mesh::block_mesh;

/// Fluid velocity as a function of `(cell centre, advance count)`.
pub type VelocityProfile = Box<dyn Fn(Vec3, u64) -> Vec3 + Send>;

// ── MockFluidEngine ─────────────────────────────────────────────

/// A fluid engine that prescribes cell velocities instead of solving.
pub struct MockFluidEngine {
    params: HashMap<FluidParam, f64>,
    boundary_conditions: IndexMap<String, SurfaceCondition>,
    meshes: IndexMap<String, Mesh>,
    mesh_kinds: Vec<MeshKind>,
    profile: VelocityProfile,
    advance_count: u64,
    fail_after: Option<u64>,
}

impl MockFluidEngine {
    /// Engine with a uniform velocity field.
    pub fn with_uniform_velocity(velocity: Vec3) -> Self {
        Self::with_profile(Box::new(move |_, _| velocity))
    }

    /// Engine with an arbitrary velocity profile.
    pub fn with_profile(profile: VelocityProfile) -> Self {
        Self {
            params: HashMap::new(),
            boundary_conditions: IndexMap::new(),
            meshes: IndexMap::new(),
            mesh_kinds: Vec::new(),
            profile,
            advance_count: 0,
            fail_after: None,
        }
    }

    /// Fail every `advance()` after `successful` calls have succeeded.
    pub fn failing_after(mut self, successful: u64) -> Self {
        self.fail_after = Some(successful);
        self
    }

    pub fn advance_count(&self) -> u64 {
        self.advance_count
    }

    pub fn boundary_conditions(&self) -> &IndexMap<String, SurfaceCondition> {
        &self.boundary_conditions
    }

    pub fn mesh_kinds(&self) -> &[MeshKind] {
        &self.mesh_kinds
    }

    fn apply_profile(&mut self) {
        let step = self.advance_count;
        for mesh in self.meshes.values_mut() {
            let view: &Mesh = mesh;
            let centres: Vec<_> = view
                .iter_cells()
                .map(|cell| (cell.uid, centroid(view, &cell.points)))
                .collect();
            for (uid, centre) in centres {
                if let Some(cell) = mesh.cell_mut(uid) {
                    cell.velocity = (self.profile)(centre, step);
                }
            }
        }
    }
}

impl Default for MockFluidEngine {
    fn default() -> Self {
        Self::with_uniform_velocity(vec3::ZERO)
    }
}

fn centroid(mesh: &Mesh, points: &[PointId]) -> Vec3 {
    let mut sum = vec3::ZERO;
    let mut n = 0usize;
    for p in points.iter().filter_map(|id| mesh.get_point(*id)) {
        sum = vec3::add(sum, p.coordinates);
        n += 1;
    }
    if n == 0 {
        sum
    } else {
        vec3::scale(sum, 1.0 / n as f64)
    }
}

impl FluidEngine for MockFluidEngine {
    fn name(&self) -> &str {
        "mock-fluid"
    }

    fn set_scalar_param(&mut self, param: FluidParam, value: f64) -> Result<(), EngineError> {
        if !value.is_finite() {
            return Err(EngineError::ParameterRejected {
                parameter: param.to_string(),
                reason: format!("value must be finite, got {value}"),
            });
        }
        self.params.insert(param, value);
        Ok(())
    }

    fn scalar_param(&self, param: FluidParam) -> Option<f64> {
        self.params.get(&param).copied()
    }

    fn set_boundary_condition(
        &mut self,
        face: &str,
        condition: &SurfaceCondition,
    ) -> Result<(), EngineError> {
        self.boundary_conditions
            .insert(face.to_string(), condition.clone());
        Ok(())
    }

    fn create_mesh(
        &mut self,
        name: &str,
        geometry: &GeometrySpec,
        kind: MeshKind,
    ) -> Result<(), EngineError> {
        geometry
            .validate()
            .map_err(|e| EngineError::ParameterRejected {
                parameter: "geometry".into(),
                reason: e.to_string(),
            })?;
        if self.meshes.contains_key(name) {
            return Err(EngineError::DuplicateDataset {
                name: name.to_string(),
            });
        }
        self.meshes.insert(name.to_string(), block_mesh(name, geometry));
        self.mesh_kinds.push(kind);
        self.apply_profile();
        Ok(())
    }

    fn advance(&mut self) -> Result<(), EngineError> {
        if self.fail_after.is_some_and(|n| self.advance_count >= n) {
            return Err(EngineError::AdvanceFailed {
                reason: format!("scripted failure after {} advances", self.advance_count),
            });
        }
        self.advance_count += 1;
        self.apply_profile();
        Ok(())
    }

    fn mesh(&self, name: &str) -> Result<&Mesh, EngineError> {
        self.meshes
            .get(name)
            .ok_or_else(|| EngineError::UnknownDataset {
                name: name.to_string(),
            })
    }
}

// ── MockParticleEngine ──────────────────────────────────────────

/// A particle engine that drifts particles instead of integrating contacts.
#[derive(Default)]
pub struct MockParticleEngine {
    params: HashMap<ParticleParam, f64>,
    box_faces: Option<[WallBoundary; 3]>,
    fixed: HashMap<ParticleGroup, bool>,
    materials: HashMap<ParticleGroup, ParticleMaterial>,
    datasets: IndexMap<String, ParticleCollection>,
    advance_count: u64,
    update_batch_sizes: Vec<usize>,
    fail_after: Option<u64>,
}

impl MockParticleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every `advance()` after `successful` calls have succeeded.
    pub fn failing_after(mut self, successful: u64) -> Self {
        self.fail_after = Some(successful);
        self
    }

    pub fn advance_count(&self) -> u64 {
        self.advance_count
    }

    /// Length of every batch passed to `update_particles`, in call order.
    pub fn update_batch_sizes(&self) -> &[usize] {
        &self.update_batch_sizes
    }

    pub fn box_faces(&self) -> Option<[WallBoundary; 3]> {
        self.box_faces
    }

    pub fn is_fixed(&self, group: ParticleGroup) -> Option<bool> {
        self.fixed.get(&group).copied()
    }

    pub fn material(&self, group: ParticleGroup) -> Option<&ParticleMaterial> {
        self.materials.get(&group)
    }

    pub fn param(&self, param: ParticleParam) -> Option<f64> {
        self.params.get(&param).copied()
    }

    fn drift_time(&self) -> f64 {
        let dt = self.param(ParticleParam::TimeStep).unwrap_or(0.0);
        let steps = self.param(ParticleParam::NumberOfTimeSteps).unwrap_or(1.0);
        dt * steps
    }
}

impl ParticleEngine for MockParticleEngine {
    fn name(&self) -> &str {
        "mock-particles"
    }

    fn set_scalar_param(&mut self, param: ParticleParam, value: f64) -> Result<(), EngineError> {
        if !value.is_finite() {
            return Err(EngineError::ParameterRejected {
                parameter: param.to_string(),
                reason: format!("value must be finite, got {value}"),
            });
        }
        self.params.insert(param, value);
        Ok(())
    }

    fn set_box_faces(&mut self, faces: [WallBoundary; 3]) -> Result<(), EngineError> {
        self.box_faces = Some(faces);
        Ok(())
    }

    fn set_fixed(&mut self, group: ParticleGroup, fixed: bool) -> Result<(), EngineError> {
        self.fixed.insert(group, fixed);
        Ok(())
    }

    fn set_material(
        &mut self,
        group: ParticleGroup,
        material: &ParticleMaterial,
    ) -> Result<(), EngineError> {
        self.materials.insert(group, material.clone());
        Ok(())
    }

    fn add_dataset(&mut self, particles: ParticleCollection) -> Result<(), EngineError> {
        if self.datasets.contains_key(particles.name()) {
            return Err(EngineError::DuplicateDataset {
                name: particles.name().to_string(),
            });
        }
        self.datasets.insert(particles.name().to_string(), particles);
        Ok(())
    }

    fn dataset(&self, name: &str) -> Result<&ParticleCollection, EngineError> {
        self.datasets
            .get(name)
            .ok_or_else(|| EngineError::UnknownDataset {
                name: name.to_string(),
            })
    }

    fn update_particles(&mut self, name: &str, particles: &[Particle]) -> Result<(), EngineError> {
        self.update_batch_sizes.push(particles.len());
        self.datasets
            .get_mut(name)
            .ok_or_else(|| EngineError::UnknownDataset {
                name: name.to_string(),
            })?
            .update_particles(particles)
    }

    fn advance(&mut self) -> Result<(), EngineError> {
        if self.fail_after.is_some_and(|n| self.advance_count >= n) {
            return Err(EngineError::AdvanceFailed {
                reason: format!("scripted failure after {} advances", self.advance_count),
            });
        }
        self.advance_count += 1;
        let t = self.drift_time();
        for group in ParticleGroup::ALL {
            if self.fixed.get(&group).copied().unwrap_or(false) {
                continue;
            }
            if let Some(collection) = self.datasets.get_mut(group.dataset_name()) {
                for p in collection.iter_particles_mut() {
                    p.coordinates = vec3::add(p.coordinates, vec3::scale(p.velocity, t));
                }
            }
        }
        Ok(())
    }
}
