use na::{Matrix3, Vector3, VectorViewMut3};

use crate::errors::{MdError, Result};

/// The periodic cell. Columns of `h` are the cell vectors; `pbc` switches
/// periodicity per cell axis.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationBox {
    pub h: Matrix3<f64>,
    pub h_inv: Matrix3<f64>,
    pub pbc: [bool; 3],
}

impl SimulationBox {
    pub fn new(h: Matrix3<f64>, pbc: [bool; 3]) -> Result<Self> {
        let h_inv = h.try_inverse().ok_or(MdError::SingularBox)?;
        Ok(Self { h, h_inv, pbc })
    }

    pub fn orthorhombic(lx: f64, ly: f64, lz: f64) -> Result<Self> {
        Self::new(Matrix3::from_diagonal(&Vector3::new(lx, ly, lz)), [true; 3])
    }

    pub fn cubic(length: f64) -> Result<Self> {
        Self::orthorhombic(length, length, length)
    }

    pub fn volume(&self) -> f64 {
        self.h.determinant().abs()
    }

    pub fn lengths(&self) -> Vector3<f64> {
        Vector3::new(
            self.h.column(0).norm(),
            self.h.column(1).norm(),
            self.h.column(2).norm(),
        )
    }

    /// Replaces a displacement by its shortest periodic image.
    pub fn minimum_image(&self, rij: &mut Vector3<f64>) {
        let mut s = self.h_inv * *rij;

        for i in 0..3 {
            if self.pbc[i] {
                s[i] -= s[i].round();
            }
        }

        *rij = self.h * s;
    }

    /// Folds a position back into the primary cell `[0, 1)` in fractional
    /// coordinates along every periodic axis.
    pub fn wrap_position(&self, mut r_i: VectorViewMut3<f64>) {
        let mut s = self.h_inv * &r_i;

        for i in 0..3 {
            if self.pbc[i] {
                s[i] -= s[i].floor();
            }
        }

        r_i.copy_from(&(self.h * s));
    }
}

impl Default for SimulationBox {
    fn default() -> Self {
        Self {
            h: Matrix3::identity(),
            h_inv: Matrix3::identity(),
            pbc: [true; 3],
        }
    }
}
