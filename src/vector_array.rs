//! Dense, resizable storage for per-atom 3-vectors.
//!
//! [`Vectors3`] backs positions, velocities, forces and the integrators' own
//! buffers. Vector `i` is stored as column `i` of a `3 × N` matrix, so the
//! usual nalgebra column views work on it directly.
use std::ops::{Index, IndexMut};

use na::{Matrix3xX, Vector3};

#[derive(Debug, Clone, PartialEq)]
pub struct Vectors3 {
    data: Matrix3xX<f64>,
}

impl Default for Vectors3 {
    fn default() -> Self {
        Self::zeros(0)
    }
}

impl Vectors3 {
    pub fn zeros(n: usize) -> Self {
        Self {
            data: Matrix3xX::zeros(n),
        }
    }

    pub fn from_vectors(vectors: &[Vector3<f64>]) -> Self {
        if vectors.is_empty() {
            return Self::zeros(0);
        }
        Self {
            data: Matrix3xX::from_columns(vectors),
        }
    }

    pub fn len(&self) -> usize {
        self.data.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Changes the number of stored vectors. The first `min(len, n)` vectors
    /// are kept and any new ones are zero.
    pub fn resize(&mut self, n: usize) {
        if n == self.len() {
            return;
        }
        let mut resized = Matrix3xX::zeros(n);
        let keep = n.min(self.len());
        resized
            .columns_mut(0, keep)
            .copy_from(&self.data.columns(0, keep));
        self.data = resized;
    }

    pub fn fill_zero(&mut self) {
        self.data.fill(0.0);
    }

    /// Overwrites `self` with the contents of `other`, reallocating only when
    /// the lengths differ.
    pub fn copy_from(&mut self, other: &Vectors3) {
        if self.len() == other.len() {
            self.data.copy_from(&other.data);
        } else {
            self.data = other.data.clone();
        }
    }

    pub fn get(&self, i: usize) -> Vector3<f64> {
        self.data.column(i).into_owned()
    }

    pub fn set(&mut self, i: usize, value: &Vector3<f64>) {
        self.data.set_column(i, value);
    }

    pub fn push(&mut self, value: &Vector3<f64>) {
        let n = self.len();
        self.resize(n + 1);
        self.set(n, value);
    }

    pub fn remove(&mut self, i: usize) -> Vector3<f64> {
        let removed = self.get(i);
        let data = std::mem::replace(&mut self.data, Matrix3xX::zeros(0));
        self.data = data.remove_column(i);
        removed
    }

    pub fn column(&self, i: usize) -> na::VectorView3<'_, f64, na::U1, na::U3> {
        self.data.column(i)
    }

    pub fn column_mut(&mut self, i: usize) -> na::VectorViewMut3<'_, f64, na::U1, na::U3> {
        self.data.column_mut(i)
    }

    pub fn iter(&self) -> impl Iterator<Item = Vector3<f64>> + '_ {
        self.data.column_iter().map(|c| c.into_owned())
    }

    pub fn as_matrix(&self) -> &Matrix3xX<f64> {
        &self.data
    }

    pub fn as_matrix_mut(&mut self) -> &mut Matrix3xX<f64> {
        &mut self.data
    }

    /// Index of the first vector holding a NaN or infinite component.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.data
            .column_iter()
            .position(|c| c.iter().any(|x| !x.is_finite()))
    }
}

impl From<Matrix3xX<f64>> for Vectors3 {
    fn from(data: Matrix3xX<f64>) -> Self {
        Self { data }
    }
}

/// `(dimension, atom)` indexing, matching the column-per-atom layout.
impl Index<(usize, usize)> for Vectors3 {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[index]
    }
}

impl IndexMut<(usize, usize)> for Vectors3 {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        &mut self.data[index]
    }
}
