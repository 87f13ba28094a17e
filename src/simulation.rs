//! A concrete [`IntegrationContext`]: a frame, a force field and the run loop.
use crate::atoms::Atoms;
use crate::context::{ForceField, IntegrationContext};
use crate::errors::Result;
use crate::integrators::Integrate;

/// Thermodynamic snapshot reported by [`Simulation::run`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thermo {
    pub step: usize,
    pub potential_energy: f64,
    pub kinetic_energy: f64,
    pub total_energy: f64,
    pub temperature: f64,
}

pub struct Simulation {
    pub atoms: Atoms,
    force_field: Box<dyn ForceField>,
    wrap_positions: bool,
    potential_energy: f64,
    force_evaluations: usize,
}

impl Simulation {
    /// Positions are wrapped into the cell by default.
    pub fn new(atoms: Atoms, force_field: Box<dyn ForceField>) -> Self {
        Self {
            atoms,
            force_field,
            wrap_positions: true,
            potential_energy: 0.0,
            force_evaluations: 0,
        }
    }

    pub fn with_wrapping(mut self, wrap_positions: bool) -> Self {
        self.wrap_positions = wrap_positions;
        self
    }

    /// Potential energy of the last force evaluation.
    pub fn potential_energy(&self) -> f64 {
        self.potential_energy
    }

    pub fn force_evaluations(&self) -> usize {
        self.force_evaluations
    }

    pub fn thermo(&self, step: usize) -> Thermo {
        let kinetic_energy = self.atoms.kinetic_energy();
        Thermo {
            step,
            potential_energy: self.potential_energy,
            kinetic_energy,
            total_energy: self.potential_energy + kinetic_energy,
            temperature: self.atoms.temperature(kinetic_energy),
        }
    }

    /// Prepares `integrator` and advances `steps` timesteps. `observer` sees
    /// step 0 and every `thermo_every`-th step after it, plus the last one.
    ///
    /// Velocity Verlet does not use the forces evaluated for step 0: its
    /// first step drifts with the zeroed accelerations left by `prepare`.
    pub fn run<F>(
        &mut self,
        integrator: &mut dyn Integrate,
        steps: usize,
        thermo_every: usize,
        mut observer: F,
    ) -> Result<()>
    where
        F: FnMut(&Thermo),
    {
        log::info!("running {steps} steps for {} atoms", self.atoms.n_atoms());

        integrator.prepare(self)?;
        // energies at step 0 need the forces of the starting frame
        self.evaluate_forces()?;
        observer(&self.thermo(0));

        for step in 1..=steps {
            integrator.step(self)?;

            if step == steps || (thermo_every > 0 && step % thermo_every == 0) {
                observer(&self.thermo(step));
            }
        }

        log::info!(
            "run finished after {} force evaluations, potential energy {}",
            self.force_evaluations,
            self.potential_energy()
        );
        Ok(())
    }
}

impl IntegrationContext for Simulation {
    fn atoms(&self) -> &Atoms {
        &self.atoms
    }

    fn atoms_mut(&mut self) -> &mut Atoms {
        &mut self.atoms
    }

    fn evaluate_forces(&mut self) -> Result<()> {
        if self.wrap_positions {
            self.atoms.wrap_positions();
        }

        let n_atoms = self.atoms.n_atoms();
        self.atoms.forces.resize(n_atoms);
        self.atoms.forces.fill_zero();

        self.potential_energy = self.force_field.compute_forces(&mut self.atoms);
        self.force_evaluations += 1;
        Ok(())
    }

    fn is_wrapping_positions(&self) -> bool {
        self.wrap_positions
    }
}
