use na::Vector3;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::atoms::new::Atoms;
use crate::constants::KB_KJPERMOLEKELVIN;
use crate::errors::{MdError, Result};

impl Atoms {
    /// Draws Maxwell-Boltzmann velocities for `temperature`, removes the
    /// centre-of-mass drift and rescales to hit the temperature exactly.
    pub fn start_velocities(&mut self, temperature: f64, seed: u64) -> Result<()> {
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(MdError::InvalidTemperature { temperature });
        }
        self.check_consistency()?;
        self.check_masses()?;

        self.initialise_velocities(temperature, seed)?;
        self.remove_drift();
        self.rescale_to_temperature(temperature);
        Ok(())
    }

    fn initialise_velocities(&mut self, temperature: f64, seed: u64) -> Result<()> {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);

        for i in 0..self.n_atoms() {
            let sigma = (KB_KJPERMOLEKELVIN * temperature / self.masses[i]).sqrt();
            let normal = Normal::new(0.0, sigma)
                .map_err(|source| MdError::VelocityDistribution { source })?;

            let v_i = Vector3::new(
                normal.sample(&mut rng),
                normal.sample(&mut rng),
                normal.sample(&mut rng),
            );
            self.velocities.set(i, &v_i);
        }
        Ok(())
    }

    fn remove_drift(&mut self) {
        let total_mass = self.total_mass();
        if total_mass == 0.0 {
            return;
        }
        let velocity_cm = self.total_momentum() / total_mass;

        for i in 0..self.n_atoms() {
            let mut v_i = self.velocities.column_mut(i);
            v_i -= velocity_cm;
        }
    }

    fn rescale_to_temperature(&mut self, temperature: f64) {
        let current_temperature = self.temperature(self.kinetic_energy());
        // a single atom has no kinetic energy left once the drift is gone
        if current_temperature <= 0.0 {
            log::warn!("cannot rescale velocities of a frame with zero kinetic energy");
            return;
        }

        let lambda = (temperature / current_temperature).sqrt();
        *self.velocities.as_matrix_mut() *= lambda;
    }
}
