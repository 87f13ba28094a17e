//! Lattice generators used to lay out a starting frame.
use std::{fmt, str::FromStr};

use na::{Matrix3, Matrix3xX, Vector3};

use crate::errors::{MdError, Result};
use crate::simulation_box::SimulationBox;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lattice {
    SimpleCubic,
    Fcc,
}

impl Lattice {
    /// Fractional coordinates of the atoms in one conventional cell.
    fn basis_frac(&self) -> Matrix3xX<f64> {
        match self {
            Self::SimpleCubic => Matrix3xX::from_columns(&[Vector3::zeros()]),
            Self::Fcc => Matrix3xX::from_columns(&[
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(0.0, 0.5, 0.5),
                Vector3::new(0.5, 0.0, 0.5),
                Vector3::new(0.5, 0.5, 0.0),
            ]),
        }
    }

    pub fn atoms_per_cell(&self) -> usize {
        self.basis_frac().ncols()
    }

    /// Builds the periodic box of an `nx × ny × nz` supercell with lattice
    /// constant `a` and the Cartesian sites inside it.
    pub fn supercell(&self, a: f64, cells: [usize; 3]) -> Result<(SimulationBox, Vec<Vector3<f64>>)> {
        let [nx, ny, nz] = cells;
        let h = Matrix3::identity() * a;
        let basis_frac = self.basis_frac();

        let mut sites = Vec::with_capacity(nx * ny * nz * self.atoms_per_cell());
        for ix in 0..nx {
            for iy in 0..ny {
                for iz in 0..nz {
                    let cell_origin_frac = Vector3::new(ix as f64, iy as f64, iz as f64);

                    for b in basis_frac.column_iter() {
                        let frac = cell_origin_frac + b;
                        sites.push(h * frac);
                    }
                }
            }
        }

        let sim_box = SimulationBox::orthorhombic(nx as f64 * a, ny as f64 * a, nz as f64 * a)?;
        Ok((sim_box, sites))
    }
}

impl FromStr for Lattice {
    type Err = MdError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "sc" => Ok(Self::SimpleCubic),
            "fcc" => Ok(Self::Fcc),
            _ => Err(MdError::UnknownLattice {
                name: name.to_string(),
            }),
        }
    }
}

impl fmt::Display for Lattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SimpleCubic => write!(f, "sc"),
            Self::Fcc => write!(f, "fcc"),
        }
    }
}
