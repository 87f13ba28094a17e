use crate::context::IntegrationContext;
use crate::errors::Result;
use crate::integrators::{check_finite, check_forces, validate_timestep, Integrate, Preparation};
use crate::vector_array::Vectors3;

/// Velocity Verlet. Keeps the accelerations of the last force evaluation so
/// each step needs a single new one.
#[derive(Debug, Clone)]
pub struct VelocityVerlet {
    timestep: f64,
    accelerations: Vectors3,
    state: Preparation,
}

impl VelocityVerlet {
    pub fn new(timestep: f64) -> Result<Self> {
        Ok(Self {
            timestep: validate_timestep(timestep)?,
            accelerations: Vectors3::default(),
            state: Preparation::Uninitialized,
        })
    }

    pub fn timestep(&self) -> f64 {
        self.timestep
    }

    pub fn accelerations(&self) -> &Vectors3 {
        &self.accelerations
    }
}

impl Integrate for VelocityVerlet {
    fn prepare(&mut self, ctx: &mut dyn IntegrationContext) -> Result<()> {
        let atoms = ctx.atoms();
        atoms.check_consistency()?;
        atoms.check_masses()?;

        let n_atoms = atoms.n_atoms();
        if self.state.needs_allocation(n_atoms) {
            log::debug!("allocating velocity-verlet accelerations for {n_atoms} atoms");
            self.accelerations = Vectors3::zeros(n_atoms);
            self.state = Preparation::Ready(n_atoms);
        }
        Ok(())
    }

    fn step(&mut self, ctx: &mut dyn IntegrationContext) -> Result<()> {
        let dt = self.timestep;

        let atoms = ctx.atoms_mut();
        atoms.check_consistency()?;
        self.state.check_ready(atoms.n_atoms())?;

        // drift with the accelerations of the previous step, then half kick
        *atoms.positions.as_matrix_mut() +=
            atoms.velocities.as_matrix() * dt + self.accelerations.as_matrix() * (0.5 * dt * dt);
        *atoms.velocities.as_matrix_mut() += self.accelerations.as_matrix() * (0.5 * dt);

        ctx.evaluate_forces()?;

        let atoms = ctx.atoms_mut();
        self.state.check_ready(atoms.n_atoms())?;
        check_forces(atoms)?;

        for (i, mass) in atoms.masses.iter().enumerate() {
            let a_i = atoms.forces.column(i) / *mass;
            self.accelerations.set(i, &a_i);
        }
        *atoms.velocities.as_matrix_mut() += self.accelerations.as_matrix() * (0.5 * dt);

        check_finite(atoms)
    }
}
