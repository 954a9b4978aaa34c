//! Run configuration, validation, and error types.
//!
//! [`CouplingConfig`] bundles everything a run needs. Every field has the
//! default of the reference channel-flow case; [`validate()`] checks all
//! invariants up front so that a bad configuration is rejected before any
//! engine call is made.
//!
//! [`validate()`]: CouplingConfig::validate

use std::error::Error;
use std::fmt;
use std::time::Duration;

use cfdem_core::{
    BoundaryCondition, GeometryError, GeometrySpec, MeshKind, PairPotential, ParticleGroup,
    ParticleMaterial, SurfaceCondition, WallBoundary,
};
use cfdem_drag::{ForceLaw, ParseForceLawError};
use cfdem_space::AxisBoundary;
use indexmap::IndexMap;

// ── GlobalConfig ───────────────────────────────────────────────────

/// Loop-level settings.
#[derive(Clone, Debug, PartialEq)]
pub struct GlobalConfig {
    /// Number of coupling iterations. Must be positive. Default: 10.
    pub num_iterations: u64,
    /// Publish a frame every this many iterations. Must be positive. Default: 1.
    pub update_frequency: u64,
    /// Drag closure law. Default: Stokes.
    pub force_law: ForceLaw,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            num_iterations: 10,
            update_frequency: 1,
            force_law: ForceLaw::Stokes,
        }
    }
}

impl GlobalConfig {
    /// Build from a force-law tag as written in run configuration.
    ///
    /// ```
    /// use cfdem_engine::{ConfigError, GlobalConfig};
    ///
    /// assert!(GlobalConfig::with_force_tag(5, 1, "Coul").is_ok());
    /// assert!(matches!(
    ///     GlobalConfig::with_force_tag(5, 1, "Ergun"),
    ///     Err(ConfigError::UnknownForceLaw { .. })
    /// ));
    /// ```
    pub fn with_force_tag(
        num_iterations: u64,
        update_frequency: u64,
        tag: &str,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            num_iterations,
            update_frequency,
            force_law: tag.parse()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check loop invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.update_frequency == 0 {
            return Err(ConfigError::ZeroUpdateFrequency);
        }
        Ok(())
    }

    /// Whether the frame of `iteration` (0-based) is delivered.
    pub fn publishes(&self, iteration: u64) -> bool {
        self.update_frequency != 0 && iteration % self.update_frequency == 0
    }
}

// ── FluidConfig ────────────────────────────────────────────────────

/// Settings applied to the fluid engine during session setup.
#[derive(Clone, Debug, PartialEq)]
pub struct FluidConfig {
    /// Name of the mesh dataset. Default: `"mesh"`.
    pub mesh_name: String,
    /// Mesh generator. Default: block.
    pub mesh_kind: MeshKind,
    /// Solver time step in seconds. Default: 2e-4.
    pub time_step: f64,
    /// Solver sub-steps per coupling iteration. Default: 10.
    pub num_time_steps: u32,
    /// Dynamic viscosity. Default: 1e-3.
    pub viscosity: f64,
    /// Density. Default: 1000.
    pub density: f64,
    /// Channel extent and grid resolution. Default: 0.1 × 0.01 × 0.002
    /// over 400 × 40 × 1 cells.
    pub geometry: GeometrySpec,
    /// Per-face boundary conditions, applied in order.
    pub boundary_conditions: IndexMap<String, SurfaceCondition>,
    /// Per-axis boundary handling for particle lookup. Default: periodic.
    pub index_boundaries: [AxisBoundary; 3],
}

impl Default for FluidConfig {
    fn default() -> Self {
        Self {
            mesh_name: "mesh".to_string(),
            mesh_kind: MeshKind::Block,
            time_step: 2e-4,
            num_time_steps: 10,
            viscosity: 1e-3,
            density: 1000.0,
            geometry: GeometrySpec::new([0.1, 0.01, 0.002], [400, 40, 1]),
            boundary_conditions: default_boundary_conditions(),
            index_boundaries: [AxisBoundary::Periodic; 3],
        }
    }
}

/// Pressure-driven channel: fixed pressure drop between inlet and outlet,
/// no-slip walls, and empty front/back faces for a 2D run.
fn default_boundary_conditions() -> IndexMap<String, SurfaceCondition> {
    let faces = [
        (
            "inlet",
            SurfaceCondition {
                velocity: BoundaryCondition::ZeroGradient,
                pressure: BoundaryCondition::FixedValue(0.008),
            },
        ),
        (
            "outlet",
            SurfaceCondition {
                velocity: BoundaryCondition::ZeroGradient,
                pressure: BoundaryCondition::FixedValue(0.0),
            },
        ),
        (
            "walls",
            SurfaceCondition {
                velocity: BoundaryCondition::FixedValue([0.0; 3]),
                pressure: BoundaryCondition::ZeroGradient,
            },
        ),
        (
            "frontAndBack",
            SurfaceCondition {
                velocity: BoundaryCondition::Empty,
                pressure: BoundaryCondition::Empty,
            },
        ),
    ];
    faces
        .into_iter()
        .map(|(face, condition)| (face.to_string(), condition))
        .collect()
}

impl FluidConfig {
    /// Check that the solver parameters are physical.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.geometry.validate()?;
        positive_fluid("time_step", self.time_step)?;
        positive_fluid("num_time_steps", f64::from(self.num_time_steps))?;
        positive_fluid("viscosity", self.viscosity)?;
        positive_fluid("density", self.density)?;
        Ok(())
    }
}

fn positive_fluid(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidFluidParam { name, value })
    }
}

// ── ParticleConfig ─────────────────────────────────────────────────

/// Settings applied to the particle engine during session setup.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleConfig {
    /// Solver time step in seconds. Default: 1e-6.
    pub time_step: f64,
    /// Solver sub-steps per coupling iteration. Default: 10.
    pub num_time_steps: u32,
    /// Box face behaviour on x, y, z. Default: periodic, fixed, periodic.
    pub box_faces: [WallBoundary; 3],
    /// Whether flow particles are held in place. Default: false.
    pub flow_fixed: bool,
    /// Whether wall particles are held in place. Default: true.
    pub wall_fixed: bool,
    /// Material of the flow particles.
    pub flow_material: ParticleMaterial,
    /// Material of the wall particles.
    pub wall_material: ParticleMaterial,
    /// Shift both collections so their box origin sits at `(0, 0, 0)`
    /// before they are handed to the engine. Default: false.
    pub translate_to_origin: bool,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            time_step: 1e-6,
            num_time_steps: 10,
            box_faces: [
                WallBoundary::Periodic,
                WallBoundary::Fixed,
                WallBoundary::Periodic,
            ],
            flow_fixed: false,
            wall_fixed: true,
            flow_material: ParticleMaterial::default(),
            wall_material: ParticleMaterial {
                pair_potential: PairPotential::Cohesion,
                ..ParticleMaterial::default()
            },
            translate_to_origin: false,
        }
    }
}

impl ParticleConfig {
    /// Whether `group` is held in place.
    pub fn is_fixed(&self, group: ParticleGroup) -> bool {
        match group {
            ParticleGroup::Flow => self.flow_fixed,
            ParticleGroup::Wall => self.wall_fixed,
        }
    }

    /// Material of `group`.
    pub fn material(&self, group: ParticleGroup) -> &ParticleMaterial {
        match group {
            ParticleGroup::Flow => &self.flow_material,
            ParticleGroup::Wall => &self.wall_material,
        }
    }

    /// Check solver parameters and material coefficients.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(ConfigError::InvalidParticleParam {
                name: "time_step",
                value: self.time_step,
            });
        }
        if self.num_time_steps == 0 {
            return Err(ConfigError::InvalidParticleParam {
                name: "num_time_steps",
                value: 0.0,
            });
        }
        for group in ParticleGroup::ALL {
            for (name, value) in self.material(group).coefficients() {
                if !value.is_finite() {
                    return Err(ConfigError::InvalidParticleParam { name, value });
                }
            }
        }
        Ok(())
    }
}

// ── HandoffConfig ──────────────────────────────────────────────────

/// Frame delivery settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandoffConfig {
    /// How long to wait for the consumer to acknowledge a frame before the
    /// run is abandoned. Default: 10 s.
    pub ack_timeout: Duration,
}

impl Default for HandoffConfig {
    fn default() -> Self {
        Self {
            ack_timeout: Duration::from_secs(10),
        }
    }
}

impl HandoffConfig {
    /// A zero timeout would abandon every run at its first publish.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ack_timeout.is_zero() {
            return Err(ConfigError::InvalidAckTimeout);
        }
        Ok(())
    }
}

// ── CouplingConfig ─────────────────────────────────────────────────

/// Complete configuration of one coupling run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CouplingConfig {
    /// Loop settings.
    pub global: GlobalConfig,
    /// Fluid engine settings.
    pub fluid: FluidConfig,
    /// Particle engine settings.
    pub particle: ParticleConfig,
    /// Frame delivery settings.
    pub handoff: HandoffConfig,
}

impl CouplingConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.global.validate()?;
        self.fluid.validate()?;
        self.particle.validate()?;
        self.handoff.validate()?;
        Ok(())
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected before a run starts.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The force-law tag names no known law.
    UnknownForceLaw {
        /// The rejected tag.
        tag: String,
    },
    /// Channel extent or resolution is invalid.
    InvalidGeometry(GeometryError),
    /// `num_iterations` is zero.
    ZeroIterations,
    /// `update_frequency` is zero.
    ZeroUpdateFrequency,
    /// A fluid solver parameter is not positive and finite.
    InvalidFluidParam {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A particle solver parameter or material coefficient is invalid.
    InvalidParticleParam {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The acknowledgement timeout is zero.
    InvalidAckTimeout,
    /// The coupling worker thread could not be spawned.
    ThreadSpawnFailed {
        /// OS error description.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownForceLaw { tag } => {
                write!(f, "unknown force law '{tag}', expected one of Stokes, Dala, Coul")
            }
            Self::InvalidGeometry(e) => write!(f, "invalid geometry: {e}"),
            Self::ZeroIterations => write!(f, "num_iterations must be at least 1"),
            Self::ZeroUpdateFrequency => write!(f, "update_frequency must be at least 1"),
            Self::InvalidFluidParam { name, value } => {
                write!(f, "fluid parameter {name} must be positive and finite, got {value}")
            }
            Self::InvalidParticleParam { name, value } => {
                write!(f, "particle parameter {name} is invalid: {value}")
            }
            Self::InvalidAckTimeout => write!(f, "ack_timeout must be non-zero"),
            Self::ThreadSpawnFailed { reason } => {
                write!(f, "failed to spawn coupling thread: {reason}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidGeometry(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GeometryError> for ConfigError {
    fn from(e: GeometryError) -> Self {
        Self::InvalidGeometry(e)
    }
}

impl From<ParseForceLawError> for ConfigError {
    fn from(e: ParseForceLawError) -> Self {
        Self::UnknownForceLaw { tag: e.tag }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(CouplingConfig::default().validate(), Ok(()));
    }

    #[test]
    fn default_channel_matches_reference_case() {
        let fluid = FluidConfig::default();
        assert_eq!(fluid.geometry.resolution, [400, 40, 1]);
        assert_eq!(fluid.mesh_name, "mesh");
        let faces: Vec<_> = fluid.boundary_conditions.keys().map(String::as_str).collect();
        assert_eq!(faces, ["inlet", "outlet", "walls", "frontAndBack"]);
        assert_eq!(
            fluid.boundary_conditions["inlet"].pressure,
            BoundaryCondition::FixedValue(0.008)
        );
    }

    #[test]
    fn default_particle_groups() {
        let p = ParticleConfig::default();
        assert!(!p.is_fixed(ParticleGroup::Flow));
        assert!(p.is_fixed(ParticleGroup::Wall));
        assert_eq!(p.material(ParticleGroup::Flow).pair_potential, PairPotential::Repulsion);
        assert_eq!(p.material(ParticleGroup::Wall).pair_potential, PairPotential::Cohesion);
    }

    #[test]
    fn zero_iterations_rejected() {
        let mut config = CouplingConfig::default();
        config.global.num_iterations = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroIterations));
    }

    #[test]
    fn zero_update_frequency_rejected() {
        assert_eq!(
            GlobalConfig::with_force_tag(3, 0, "Stokes"),
            Err(ConfigError::ZeroUpdateFrequency)
        );
    }

    #[test]
    fn unknown_tag_rejected() {
        assert_eq!(
            GlobalConfig::with_force_tag(3, 1, "stokes"),
            Err(ConfigError::UnknownForceLaw {
                tag: "stokes".into()
            })
        );
    }

    #[test]
    fn invalid_geometry_rejected() {
        let mut config = CouplingConfig::default();
        config.fluid.geometry.resolution[2] = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidGeometry(GeometryError::ZeroResolution {
                axis: 2
            }))
        );
        config.fluid.geometry = GeometrySpec::new([-1.0, 1.0, 1.0], [1, 1, 1]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn non_positive_viscosity_rejected() {
        let mut config = CouplingConfig::default();
        config.fluid.viscosity = 0.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidFluidParam {
                name: "viscosity",
                value: 0.0
            })
        );
    }

    #[test]
    fn non_finite_material_rejected() {
        let mut config = CouplingConfig::default();
        config.particle.wall_material.friction_with_flow = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParticleParam { .. })
        ));
    }

    #[test]
    fn zero_ack_timeout_rejected() {
        let mut config = CouplingConfig::default();
        config.handoff.ack_timeout = Duration::ZERO;
        assert_eq!(config.validate(), Err(ConfigError::InvalidAckTimeout));
    }

    #[test]
    fn publish_cadence() {
        let g = GlobalConfig {
            update_frequency: 3,
            ..GlobalConfig::default()
        };
        let published: Vec<u64> = (0..10).filter(|&i| g.publishes(i)).collect();
        assert_eq!(published, [0, 3, 6, 9]);
    }

    #[test]
    fn geometry_error_is_source() {
        let e = ConfigError::from(GeometryError::ZeroResolution { axis: 0 });
        assert!(e.source().is_some());
    }
}
