//! Fixed-step integrators for Newton's equations of motion.
//!
//! Every scheme follows the same two-phase contract ([`Integrate`]):
//! [`Integrate::prepare`] sizes the scheme's own per-atom state to the frame
//! and must be called before the first step and after every change in the
//! number of atoms; [`Integrate::step`] advances the frame by one timestep
//! and evaluates forces exactly once.
//!
//! The driver normally holds an [`Integrator`], the closed set of schemes,
//! and never needs to know which one it is running.
use std::{fmt, str::FromStr};

use crate::atoms::Atoms;
use crate::context::IntegrationContext;
use crate::errors::{MdError, Result};

pub mod velocity_verlet;
pub mod verlet;

pub use velocity_verlet::VelocityVerlet;
pub use verlet::Verlet;

pub trait Integrate {
    /// Brings the scheme's derived state in line with the current frame.
    /// A no-op for the derived state while the atom count is unchanged.
    fn prepare(&mut self, ctx: &mut dyn IntegrationContext) -> Result<()>;

    /// Advances the frame by one timestep.
    ///
    /// An error is fatal for the frame: a failed force evaluation or force
    /// check can leave it partly advanced while the scheme stays ready, so
    /// the step must not be retried on it.
    fn step(&mut self, ctx: &mut dyn IntegrationContext) -> Result<()>;
}

/// Lifecycle of a scheme's derived state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preparation {
    #[default]
    Uninitialized,
    Ready(usize),
}

impl Preparation {
    pub fn needs_allocation(&self, n_atoms: usize) -> bool {
        *self != Self::Ready(n_atoms)
    }

    pub fn check_ready(&self, n_atoms: usize) -> Result<()> {
        match *self {
            Self::Uninitialized => Err(MdError::NotPrepared),
            Self::Ready(prepared) if prepared != n_atoms => Err(MdError::ParticleCountChanged {
                prepared,
                found: n_atoms,
            }),
            Self::Ready(_) => Ok(()),
        }
    }
}

pub(crate) fn validate_timestep(timestep: f64) -> Result<f64> {
    if timestep.is_finite() && timestep > 0.0 {
        Ok(timestep)
    } else {
        Err(MdError::InvalidTimestep { timestep })
    }
}

pub(crate) fn check_forces(atoms: &Atoms) -> Result<()> {
    if atoms.forces.len() != atoms.n_atoms() {
        return Err(MdError::ForceCountMismatch {
            expected: atoms.n_atoms(),
            found: atoms.forces.len(),
        });
    }
    Ok(())
}

pub(crate) fn check_finite(atoms: &Atoms) -> Result<()> {
    let diverged = atoms
        .positions
        .first_non_finite()
        .or_else(|| atoms.velocities.first_non_finite());
    match diverged {
        Some(index) => Err(MdError::Diverged { index }),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegratorKind {
    #[default]
    VelocityVerlet,
    Verlet,
}

impl FromStr for IntegratorKind {
    type Err = MdError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "velocity-verlet" | "velocity_verlet" | "vv" => Ok(Self::VelocityVerlet),
            "verlet" => Ok(Self::Verlet),
            _ => Err(MdError::UnknownIntegrator {
                name: name.to_string(),
            }),
        }
    }
}

impl fmt::Display for IntegratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VelocityVerlet => write!(f, "velocity-verlet"),
            Self::Verlet => write!(f, "verlet"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Integrator {
    VelocityVerlet(VelocityVerlet),
    Verlet(Verlet),
}

impl Integrator {
    pub fn new(kind: IntegratorKind, timestep: f64) -> Result<Self> {
        Ok(match kind {
            IntegratorKind::VelocityVerlet => Self::VelocityVerlet(VelocityVerlet::new(timestep)?),
            IntegratorKind::Verlet => Self::Verlet(Verlet::new(timestep)?),
        })
    }

    pub fn kind(&self) -> IntegratorKind {
        match self {
            Self::VelocityVerlet(_) => IntegratorKind::VelocityVerlet,
            Self::Verlet(_) => IntegratorKind::Verlet,
        }
    }

    pub fn timestep(&self) -> f64 {
        match self {
            Self::VelocityVerlet(vv) => vv.timestep(),
            Self::Verlet(v) => v.timestep(),
        }
    }
}

impl Integrate for Integrator {
    fn prepare(&mut self, ctx: &mut dyn IntegrationContext) -> Result<()> {
        match self {
            Self::VelocityVerlet(vv) => vv.prepare(ctx),
            Self::Verlet(v) => v.prepare(ctx),
        }
    }

    fn step(&mut self, ctx: &mut dyn IntegrationContext) -> Result<()> {
        match self {
            Self::VelocityVerlet(vv) => vv.step(ctx),
            Self::Verlet(v) => v.step(ctx),
        }
    }
}
