use crate::context::IntegrationContext;
use crate::errors::Result;
use crate::integrators::{check_finite, check_forces, validate_timestep, Integrate, Preparation};
use crate::vector_array::Vectors3;

/// Position (Störmer) Verlet.
///
/// The update only uses the current and previous positions. Velocities are
/// reconstructed by central difference one step behind and are never fed
/// back into the trajectory.
#[derive(Debug, Clone)]
pub struct Verlet {
    timestep: f64,
    scratch: Vectors3,
    previous_positions: Vectors3,
    /// Apply the minimum image to displacements, needed when the context
    /// folds positions into the cell between steps.
    wrap_velocities: bool,
    state: Preparation,
}

impl Verlet {
    pub fn new(timestep: f64) -> Result<Self> {
        Ok(Self {
            timestep: validate_timestep(timestep)?,
            scratch: Vectors3::default(),
            previous_positions: Vectors3::default(),
            wrap_velocities: false,
            state: Preparation::Uninitialized,
        })
    }

    pub fn timestep(&self) -> f64 {
        self.timestep
    }

    pub fn previous_positions(&self) -> &Vectors3 {
        &self.previous_positions
    }

    pub fn wraps_velocities(&self) -> bool {
        self.wrap_velocities
    }
}

impl Integrate for Verlet {
    fn prepare(&mut self, ctx: &mut dyn IntegrationContext) -> Result<()> {
        self.wrap_velocities = ctx.is_wrapping_positions();

        let atoms = ctx.atoms();
        atoms.check_consistency()?;
        atoms.check_masses()?;

        let n_atoms = atoms.n_atoms();
        if self.state.needs_allocation(n_atoms) {
            log::debug!("estimating verlet previous positions for {n_atoms} atoms");
            self.scratch.resize(n_atoms);
            // the scheme is not self-starting: step back once along the velocities
            self.previous_positions = Vectors3::from(
                atoms.positions.as_matrix() - atoms.velocities.as_matrix() * self.timestep,
            );
            self.state = Preparation::Ready(n_atoms);
        }
        Ok(())
    }

    fn step(&mut self, ctx: &mut dyn IntegrationContext) -> Result<()> {
        let dt = self.timestep;

        let atoms = ctx.atoms();
        atoms.check_consistency()?;
        self.state.check_ready(atoms.n_atoms())?;

        ctx.evaluate_forces()?;

        let atoms = ctx.atoms_mut();
        self.state.check_ready(atoms.n_atoms())?;
        check_forces(atoms)?;

        self.scratch.copy_from(&atoms.positions);

        let dt2 = dt * dt;
        for (i, mass) in atoms.masses.iter().enumerate() {
            let factor = dt2 / *mass;
            for d in 0..3 {
                atoms.positions[(d, i)] = 2.0 * atoms.positions[(d, i)]
                    - self.previous_positions[(d, i)]
                    + factor * atoms.forces[(d, i)];
            }
        }

        for i in 0..atoms.n_atoms() {
            if self.wrap_velocities {
                // the current position may have been folded into the cell
                // while the previous one was not
                let mut delta = atoms.positions.get(i) - self.previous_positions.get(i);
                atoms.sim_box.minimum_image(&mut delta);
                atoms.velocities.set(i, &(delta / (2.0 * dt)));
            } else {
                for d in 0..3 {
                    atoms.velocities[(d, i)] =
                        (atoms.positions[(d, i)] - self.previous_positions[(d, i)]) / (2.0 * dt);
                }
            }
        }

        std::mem::swap(&mut self.previous_positions, &mut self.scratch);

        check_finite(atoms)
    }
}
