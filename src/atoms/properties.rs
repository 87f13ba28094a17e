use na::Vector3;

use crate::atoms::new::Atoms;
use crate::constants::KB_KJPERMOLEKELVIN;

impl Atoms {
    pub fn kinetic_energy(&self) -> f64 {
        let mut ek: f64 = 0.0;
        for (velocity, mass) in self.velocities.iter().zip(&self.masses) {
            ek += 0.5 * mass * velocity.norm_squared();
        }
        ek
    }

    /// Instantaneous temperature from equipartition over `3N` degrees of freedom.
    pub fn temperature(&self, kinetic_energy: f64) -> f64 {
        if self.n_atoms() == 0 {
            return 0.0;
        }
        (2.0 * kinetic_energy) / (3.0 * self.n_atoms() as f64 * KB_KJPERMOLEKELVIN)
    }

    pub fn total_mass(&self) -> f64 {
        self.masses.iter().sum()
    }

    pub fn total_momentum(&self) -> Vector3<f64> {
        let mut momentum = Vector3::zeros();
        for (velocity, mass) in self.velocities.iter().zip(&self.masses) {
            momentum += velocity * *mass;
        }
        momentum
    }
}
