//! What an integrator needs from the simulation around it.
use crate::atoms::Atoms;
use crate::errors::Result;

/// The integrators' view of a running simulation.
///
/// The context owns the frame, the masses and the force buffer. Integrators
/// borrow it mutably for the duration of one `prepare` or `step` call.
pub trait IntegrationContext {
    fn atoms(&self) -> &Atoms;

    fn atoms_mut(&mut self) -> &mut Atoms;

    /// Fills `atoms().forces` from the current positions.
    fn evaluate_forces(&mut self) -> Result<()>;

    /// Whether positions are folded into the primary cell between steps.
    fn is_wrapping_positions(&self) -> bool;
}

/// A force evaluator. Implementations add their forces to `atoms.forces`,
/// which is zeroed and sized to the frame beforehand, and return the
/// potential energy.
pub trait ForceField: Send + Sync {
    fn compute_forces(&self, atoms: &mut Atoms) -> f64;
}

/// Non-interacting particles.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoForces;

impl ForceField for NoForces {
    fn compute_forces(&self, _atoms: &mut Atoms) -> f64 {
        0.0
    }
}
