use na::Vector3;

use crate::errors::{MdError, Result};
use crate::lattice::Lattice;
use crate::simulation_box::SimulationBox;
use crate::vector_array::Vectors3;

/// The particle frame: per-atom state plus the periodic cell.
///
/// `positions`, `velocities` and `masses` are index aligned and always have
/// the same length. `forces` is owned here too but only has to match after a
/// force evaluation.
#[derive(Debug, Clone, Default)]
pub struct Atoms {
    pub positions: Vectors3,
    pub velocities: Vectors3,
    pub forces: Vectors3,
    pub masses: Vec<f64>,
    pub sim_box: SimulationBox,
}

impl Atoms {
    pub fn new_zeroes(n_atoms: usize, sim_box: SimulationBox) -> Self {
        Self {
            positions: Vectors3::zeros(n_atoms),
            velocities: Vectors3::zeros(n_atoms),
            forces: Vectors3::zeros(n_atoms),
            masses: vec![1.0; n_atoms],
            sim_box,
        }
    }

    /// Fills an `nx × ny × nz` supercell of `lattice` with atoms of one mass.
    pub fn from_lattice(
        lattice: Lattice,
        a: f64,
        cells: [usize; 3],
        mass: f64,
    ) -> Result<Self> {
        let (sim_box, sites) = lattice.supercell(a, cells)?;
        let n_atoms = sites.len();
        Ok(Self {
            positions: Vectors3::from_vectors(&sites),
            velocities: Vectors3::zeros(n_atoms),
            forces: Vectors3::zeros(n_atoms),
            masses: vec![mass; n_atoms],
            sim_box,
        })
    }

    pub fn n_atoms(&self) -> usize {
        self.positions.len()
    }

    pub fn add_atom(&mut self, position: Vector3<f64>, velocity: Vector3<f64>, mass: f64) {
        self.positions.push(&position);
        self.velocities.push(&velocity);
        self.forces.resize(self.positions.len());
        self.masses.push(mass);
    }

    pub fn remove_atom(&mut self, index: usize) -> Result<()> {
        let n_atoms = self.n_atoms();
        if index >= n_atoms {
            return Err(MdError::InvalidAtomIndex { index, n_atoms });
        }
        self.positions.remove(index);
        self.velocities.remove(index);
        if index < self.forces.len() {
            self.forces.remove(index);
        }
        self.masses.remove(index);
        Ok(())
    }

    /// Checks that velocities and masses line up with positions.
    pub fn check_consistency(&self) -> Result<()> {
        let expected = self.n_atoms();
        for found in [self.velocities.len(), self.masses.len()] {
            if found != expected {
                return Err(MdError::AtomCountMismatch { expected, found });
            }
        }
        Ok(())
    }

    /// Rejects zero, negative or non-finite masses.
    pub fn check_masses(&self) -> Result<()> {
        match self
            .masses
            .iter()
            .enumerate()
            .find(|(_, m)| !(m.is_finite() && **m > 0.0))
        {
            Some((index, &mass)) => Err(MdError::NonPositiveMass { index, mass }),
            None => Ok(()),
        }
    }
}
