use crate::{integrators::IntegratorKind, lattice::Lattice};

pub struct LatticeArgs {
    pub lattice: Lattice,
    pub a: f64,
    pub cells: [usize; 3],
}

pub struct StartVelocity {
    pub start_temperature: f64,
    pub seed: u64,
}

/// Everything an input file can configure, filled in command by command.
pub struct SimulationContext {
    pub lattice: Option<LatticeArgs>,
    pub mass: f64,
    pub starting_velocity: Option<StartVelocity>,
    pub integrator: IntegratorKind,
    pub timestep: f64,
    pub wrap_positions: bool,
    pub thermo_every: usize,
    pub steps: usize,
}

impl Default for SimulationContext {
    fn default() -> Self {
        Self {
            lattice: None,
            mass: 1.0,
            starting_velocity: None,
            integrator: IntegratorKind::default(),
            timestep: 0.001,
            wrap_positions: true,
            thermo_every: 100,
            steps: 100,
        }
    }
}
