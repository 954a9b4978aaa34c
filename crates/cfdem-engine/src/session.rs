//! The coupling loop.
//!
//! A [`CouplingSession`] owns both engines for the duration of a run. Each
//! iteration advances the fluid, applies drag to every flow particle,
//! advances the particles, snapshots both simulations, and, on publishing
//! iterations, hands the snapshot to a [`FrameHandoff`].

use std::fmt;
use std::time::Instant;

use cfdem_core::{
    FluidEngine, FluidParam, Particle, ParticleCollection, ParticleEngine, ParticleGroup,
    ParticleParam, FLOW_PARTICLES, WALL_PARTICLES,
};
use cfdem_drag::{DragForceModel, DragInput, DragModel};
use cfdem_space::SpatialIndex;
use log::{debug, info, trace, warn};

use crate::config::CouplingConfig;
use crate::error::CouplingError;
use crate::frame::Frame;
use crate::handoff::{FrameHandoff, SendOutcome};
use crate::metrics::RunMetrics;

// ── LoopPhase ──────────────────────────────────────────────────────

/// Stage of one coupling iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoopPhase {
    /// Fluid engine advance.
    Advancing,
    /// Locating flow particles in the mesh.
    Querying,
    /// Evaluating the drag law.
    Computing,
    /// Pushing forces and advancing the particle engine.
    Applying,
    /// Snapshotting and handing the frame over.
    Publishing,
}

impl fmt::Display for LoopPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Advancing => "advancing",
            Self::Querying => "querying",
            Self::Computing => "computing",
            Self::Applying => "applying",
            Self::Publishing => "publishing",
        })
    }
}

// ── RunOutcome ─────────────────────────────────────────────────────

/// How a run that did not fail ended.
#[derive(Clone, Debug, PartialEq)]
pub enum RunOutcome {
    /// Every iteration ran. Holds the frame of the last iteration.
    Completed(Frame),
    /// The consumer stopped acknowledging frames.
    Aborted {
        /// Iteration whose frame was not acknowledged.
        iteration: u64,
        /// What the handoff reported.
        outcome: SendOutcome,
    },
}

impl RunOutcome {
    /// The final frame, or `None` if the run was abandoned.
    pub fn into_frame(self) -> Option<Frame> {
        match self {
            Self::Completed(frame) => Some(frame),
            Self::Aborted { .. } => None,
        }
    }

    /// Whether every iteration ran.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

// ── CouplingSession ────────────────────────────────────────────────

/// Run-scoped coupling state.
pub struct CouplingSession<F, P> {
    config: CouplingConfig,
    fluid: F,
    particles: P,
    index: SpatialIndex,
    drag: DragForceModel,
    viscosity: f64,
    density: f64,
    iteration: u64,
    phase: Option<LoopPhase>,
    metrics: RunMetrics,
}

impl<F: FluidEngine, P: ParticleEngine> CouplingSession<F, P> {
    /// Validate `config`, configure both engines, load the particle
    /// collections, and build the spatial index over the fluid mesh.
    ///
    /// `flow` and `wall` are renamed to the well-known dataset names
    /// before they are added.
    pub fn new(
        config: CouplingConfig,
        mut fluid: F,
        mut particles: P,
        mut flow: ParticleCollection,
        mut wall: ParticleCollection,
    ) -> Result<Self, CouplingError> {
        config.validate()?;

        let fc = &config.fluid;
        let fluid_params = [
            (FluidParam::TimeStep, fc.time_step),
            (FluidParam::NumberOfTimeSteps, f64::from(fc.num_time_steps)),
            (FluidParam::Density, fc.density),
            (FluidParam::DynamicViscosity, fc.viscosity),
        ];
        for (param, value) in fluid_params {
            fluid
                .set_scalar_param(param, value)
                .map_err(CouplingError::Fluid)?;
        }
        for (face, condition) in &fc.boundary_conditions {
            fluid
                .set_boundary_condition(face, condition)
                .map_err(CouplingError::Fluid)?;
        }
        fluid
            .create_mesh(&fc.mesh_name, &fc.geometry, fc.mesh_kind)
            .map_err(CouplingError::Fluid)?;

        let pc = &config.particle;
        particles
            .set_scalar_param(ParticleParam::TimeStep, pc.time_step)
            .map_err(CouplingError::Particle)?;
        particles
            .set_scalar_param(
                ParticleParam::NumberOfTimeSteps,
                f64::from(pc.num_time_steps),
            )
            .map_err(CouplingError::Particle)?;
        particles
            .set_box_faces(pc.box_faces)
            .map_err(CouplingError::Particle)?;
        for group in ParticleGroup::ALL {
            particles
                .set_fixed(group, pc.is_fixed(group))
                .map_err(CouplingError::Particle)?;
            particles
                .set_material(group, pc.material(group))
                .map_err(CouplingError::Particle)?;
        }

        flow.set_name(FLOW_PARTICLES);
        wall.set_name(WALL_PARTICLES);
        if pc.translate_to_origin {
            flow.translate_to_origin();
            wall.translate_to_origin();
        }
        let (n_flow, n_wall) = (flow.len(), wall.len());
        particles.add_dataset(flow).map_err(CouplingError::Particle)?;
        particles.add_dataset(wall).map_err(CouplingError::Particle)?;

        // The engine may adjust what it was given; read back what it uses.
        let density = fluid
            .scalar_param(FluidParam::Density)
            .unwrap_or(fc.density);
        let viscosity = fluid
            .scalar_param(FluidParam::DynamicViscosity)
            .unwrap_or(fc.viscosity);

        let mesh = fluid.mesh(&fc.mesh_name).map_err(CouplingError::Fluid)?;
        let index = SpatialIndex::build(mesh, &fc.geometry)?.with_boundaries(fc.index_boundaries);
        let drag = DragForceModel::from_law(config.global.force_law);

        info!(
            "coupling session ready: fluid={} particles={} cells={} flow={} wall={} law={} iterations={}",
            fluid.name(),
            particles.name(),
            index.len(),
            n_flow,
            n_wall,
            config.global.force_law,
            config.global.num_iterations,
        );

        Ok(Self {
            config,
            fluid,
            particles,
            index,
            drag,
            viscosity,
            density,
            iteration: 0,
            phase: None,
            metrics: RunMetrics::default(),
        })
    }

    /// Run the remaining iterations, publishing through `handoff` with the
    /// handoff's own timeout.
    ///
    /// Returns [`RunOutcome::Aborted`] as soon as a published frame is not
    /// acknowledged. Physics errors and engine failures abort with a
    /// [`CouplingError`]; nothing is retried.
    pub fn run(&mut self, handoff: &mut FrameHandoff) -> Result<RunOutcome, CouplingError> {
        let total = self.config.global.num_iterations;
        if self.iteration >= total {
            return Ok(RunOutcome::Completed(self.snapshot()?));
        }
        let run_start = Instant::now();

        loop {
            let iteration = self.iteration;
            let frame = self.step()?;
            let (outgoing, last_frame) = if self.iteration >= total {
                (frame.clone(), Some(frame))
            } else {
                (frame, None)
            };

            if self.config.global.publishes(iteration) {
                let outcome = self.publish(handoff, outgoing, iteration);
                if outcome.is_stall() {
                    warn!(
                        "frame {iteration} not acknowledged within {:?} ({outcome:?}); abandoning run",
                        handoff.timeout()
                    );
                    return Ok(RunOutcome::Aborted { iteration, outcome });
                }
            } else {
                self.metrics.frames_skipped += 1;
                trace!("iteration {iteration}: delivery skipped");
            }

            if let Some(frame) = last_frame {
                break self.complete(frame, run_start);
            }
        }
    }

    /// Advance one iteration of physics and snapshot the result.
    ///
    /// Does not publish. The iteration counter moves only if every step
    /// succeeded.
    pub fn step(&mut self) -> Result<Frame, CouplingError> {
        let iteration_start = Instant::now();

        self.phase = Some(LoopPhase::Advancing);
        let t = Instant::now();
        self.fluid.advance().map_err(CouplingError::Fluid)?;
        self.metrics.fluid_us += t.elapsed().as_micros() as u64;

        let t = Instant::now();
        let updated = self.compute_drag()?;
        self.phase = Some(LoopPhase::Applying);
        for particle in &updated {
            self.particles
                .update_particles(FLOW_PARTICLES, std::slice::from_ref(particle))
                .map_err(CouplingError::Particle)?;
        }
        self.metrics.drag_us += t.elapsed().as_micros() as u64;

        let t = Instant::now();
        self.particles.advance().map_err(CouplingError::Particle)?;
        self.metrics.particle_us += t.elapsed().as_micros() as u64;

        self.phase = Some(LoopPhase::Publishing);
        let t = Instant::now();
        let frame = self.snapshot()?;
        self.metrics.snapshot_us += t.elapsed().as_micros() as u64;

        self.iteration += 1;
        self.metrics.iterations_completed += 1;
        self.metrics.last_iteration_us = iteration_start.elapsed().as_micros() as u64;
        debug!(
            "iteration {}/{} done in {} us ({} flow particles)",
            self.iteration,
            self.config.global.num_iterations,
            self.metrics.last_iteration_us,
            updated.len()
        );
        Ok(frame)
    }

    /// Deep copy of the current mesh and both particle collections.
    pub fn snapshot(&self) -> Result<Frame, CouplingError> {
        let mesh = self
            .fluid
            .mesh(&self.config.fluid.mesh_name)
            .map_err(CouplingError::Fluid)?;
        let flow = self
            .particles
            .dataset(FLOW_PARTICLES)
            .map_err(CouplingError::Particle)?;
        let wall = self
            .particles
            .dataset(WALL_PARTICLES)
            .map_err(CouplingError::Particle)?;
        Ok(Frame {
            iteration: self.iteration,
            mesh: mesh.clone(),
            flow: flow.clone(),
            wall: wall.clone(),
        })
    }

    /// Drag force for every flow particle, computed against the current
    /// mesh. Nothing is pushed to the engine unless every particle
    /// succeeds.
    fn compute_drag(&mut self) -> Result<Vec<Particle>, CouplingError> {
        self.phase = Some(LoopPhase::Querying);
        let mesh = self
            .fluid
            .mesh(&self.config.fluid.mesh_name)
            .map_err(CouplingError::Fluid)?;
        let flow = self
            .particles
            .dataset(FLOW_PARTICLES)
            .map_err(CouplingError::Particle)?;

        let mut located = Vec::with_capacity(flow.len());
        for particle in flow.iter_particles() {
            let uid = self
                .index
                .locate(particle.coordinates)
                .map_err(|source| CouplingError::OutsideDomain {
                    particle: particle.id,
                    source,
                })?;
            let cell = mesh.get_cell(uid).ok_or(CouplingError::UnknownCell {
                particle: particle.id,
                uid,
            })?;
            located.push((particle, cell.velocity));
        }

        self.phase = Some(LoopPhase::Computing);
        let mut updated = Vec::with_capacity(located.len());
        for (particle, fluid_velocity) in located {
            let input = DragInput::new(
                fluid_velocity,
                particle.velocity,
                particle.radius,
                self.viscosity,
                self.density,
            );
            let force = self
                .drag
                .force(&input)
                .map_err(|source| CouplingError::Drag {
                    particle: particle.id,
                    source,
                })?;
            let mut p = particle.clone();
            p.force = force;
            updated.push(p);
        }
        Ok(updated)
    }

    fn publish(&mut self, handoff: &mut FrameHandoff, frame: Frame, iteration: u64) -> SendOutcome {
        let t = Instant::now();
        let total = self.config.global.num_iterations;
        let outcome = handoff.publish(frame, iteration, total);
        self.metrics.publish_us += t.elapsed().as_micros() as u64;
        self.metrics.frames_published += 1;
        if outcome == SendOutcome::Acked {
            self.metrics.frames_acknowledged += 1;
        }
        debug!("frame {iteration} published: {outcome:?}");
        outcome
    }

    fn complete(&mut self, frame: Frame, run_start: Instant) -> Result<RunOutcome, CouplingError> {
        self.phase = None;
        info!(
            "coupling run complete: {} iterations, {} frames published, {} skipped, {} ms",
            self.metrics.iterations_completed,
            self.metrics.frames_published,
            self.metrics.frames_skipped,
            run_start.elapsed().as_millis()
        );
        Ok(RunOutcome::Completed(frame))
    }

    /// Iterations completed so far.
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Phase the session is in or last failed in. `None` between iterations
    /// that completed normally and after a completed run.
    pub fn phase(&self) -> Option<LoopPhase> {
        self.phase
    }

    /// Metrics accumulated so far.
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    /// The run configuration.
    pub fn config(&self) -> &CouplingConfig {
        &self.config
    }

    /// The spatial index over the fluid mesh.
    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    /// The selected drag model.
    pub fn drag_model(&self) -> DragForceModel {
        self.drag
    }

    /// Fluid density and dynamic viscosity in use.
    pub fn fluid_properties(&self) -> (f64, f64) {
        (self.density, self.viscosity)
    }

    /// The fluid engine.
    pub fn fluid(&self) -> &F {
        &self.fluid
    }

    /// The particle engine.
    pub fn particles(&self) -> &P {
        &self.particles
    }

    /// Release both engines.
    pub fn into_engines(self) -> (F, P) {
        (self.fluid, self.particles)
    }
}

impl<F, P> fmt::Debug for CouplingSession<F, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CouplingSession")
            .field("iteration", &self.iteration)
            .field("phase", &self.phase)
            .field("drag", &self.drag)
            .field("cells", &self.index.len())
            .finish()
    }
}

/// Run a complete coupling: set up a session, drive every iteration, and
/// return the last frame.
///
/// The handoff's acknowledgement timeout is set from
/// `config.handoff.ack_timeout`. Returns `Ok(None)` when the consumer
/// stopped acknowledging frames.
///
/// ```
/// use cfdem_core::{GeometrySpec, ParticleCollection, WALL_PARTICLES};
/// use cfdem_engine::{run_coupling, CouplingConfig, FrameHandoff};
/// use cfdem_test_utils::{two_particle_flow, MockFluidEngine, MockParticleEngine};
///
/// let mut config = CouplingConfig::default();
/// config.global.num_iterations = 1;
/// config.fluid.geometry = GeometrySpec::new([1.0, 1.0, 1.0], [10, 10, 1]);
///
/// let frame = run_coupling(
///     &config,
///     MockFluidEngine::with_uniform_velocity([0.1, 0.0, 0.0]),
///     MockParticleEngine::new(),
///     two_particle_flow(),
///     ParticleCollection::new(WALL_PARTICLES),
///     &mut FrameHandoff::discard(),
/// )
/// .unwrap()
/// .unwrap();
/// assert_eq!(frame.flow.len(), 2);
/// ```
pub fn run_coupling<F: FluidEngine, P: ParticleEngine>(
    config: &CouplingConfig,
    fluid: F,
    particles: P,
    flow: ParticleCollection,
    wall: ParticleCollection,
    handoff: &mut FrameHandoff,
) -> Result<Option<Frame>, CouplingError> {
    let mut session = CouplingSession::new(config.clone(), fluid, particles, flow, wall)?;
    handoff.set_timeout(config.handoff.ack_timeout);
    Ok(session.run(handoff)?.into_frame())
}
