use approx::{assert_abs_diff_eq, assert_relative_eq};
use nalgebra::Vector3;

use pis_verlet::{
    Atoms, ForceField, Integrate, IntegrationContext, Integrator, IntegratorKind, MdError,
    NoForces, Simulation, SimulationBox, Vectors3, VelocityVerlet, Verlet,
};

/// Every atom tethered to the origin by a spring of stiffness `k`.
pub struct HarmonicTether {
    pub k: f64,
}

impl ForceField for HarmonicTether {
    fn compute_forces(&self, atoms: &mut Atoms) -> f64 {
        let mut energy = 0.0;
        for i in 0..atoms.n_atoms() {
            let r_i = atoms.positions.get(i);
            energy += 0.5 * self.k * r_i.norm_squared();
            let mut f_i = atoms.forces.column_mut(i);
            f_i -= r_i * self.k;
        }
        energy
    }
}

/// Builds an open (non-wrapping) simulation from positions, velocities and masses.
pub fn frame(
    positions: &[Vector3<f64>],
    velocities: &[Vector3<f64>],
    masses: &[f64],
    force_field: impl ForceField + 'static,
) -> Simulation {
    let mut atoms = Atoms::new_zeroes(0, SimulationBox::cubic(1000.0).unwrap());
    for ((r, v), m) in positions.iter().zip(velocities).zip(masses) {
        atoms.add_atom(*r, *v, *m);
    }
    Simulation::new(atoms, Box::new(force_field)).with_wrapping(false)
}

/// A context whose force evaluation leaves the force buffer empty.
struct LosesForces {
    atoms: Atoms,
}

impl IntegrationContext for LosesForces {
    fn atoms(&self) -> &Atoms {
        &self.atoms
    }

    fn atoms_mut(&mut self) -> &mut Atoms {
        &mut self.atoms
    }

    fn evaluate_forces(&mut self) -> pis_verlet::Result<()> {
        self.atoms.forces = Vectors3::zeros(0);
        Ok(())
    }

    fn is_wrapping_positions(&self) -> bool {
        false
    }
}

fn free_particles(n: usize) -> Simulation {
    let positions: Vec<_> = (0..n).map(|i| Vector3::new(i as f64, 0.5 * i as f64, -1.0)).collect();
    let velocities: Vec<_> = (0..n)
        .map(|i| Vector3::new(0.1 * i as f64, -0.05, 0.01 * (i % 3) as f64))
        .collect();
    let masses: Vec<_> = (0..n).map(|i| 1.0 + i as f64).collect();
    frame(&positions, &velocities, &masses, NoForces)
}

// ==================================================================================
// End-to-end
// ==================================================================================

#[test]
fn two_free_particles_move_exactly_with_their_velocities() {
    let r0 = [Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0)];
    let v0 = [Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0)];
    let mut sim = frame(&r0, &v0, &[1.0, 2.0], NoForces);

    let mut integrator = Integrator::new(IntegratorKind::VelocityVerlet, 0.01).unwrap();
    integrator.prepare(&mut sim).unwrap();
    for _ in 0..100 {
        integrator.step(&mut sim).unwrap();
    }

    for i in 0..2 {
        assert_abs_diff_eq!(sim.atoms.positions.get(i), r0[i] + v0[i] * 1.0, epsilon = 1e-12);
        assert_eq!(sim.atoms.velocities.get(i), v0[i]);
    }
    assert_eq!(sim.force_evaluations(), 100);
}

#[test]
fn velocity_verlet_is_drift_free_for_any_step_count() {
    let dt = 0.003;
    let v = Vector3::new(-0.7, 0.2, 1.3);
    let r0 = Vector3::new(3.0, -2.0, 0.5);
    let mut sim = frame(&[r0], &[v], &[4.0], NoForces);
    let mut vv = VelocityVerlet::new(dt).unwrap();
    vv.prepare(&mut sim).unwrap();

    for k in 1..=50 {
        vv.step(&mut sim).unwrap();
        assert_abs_diff_eq!(sim.atoms.positions.get(0), r0 + v * (k as f64 * dt), epsilon = 1e-12);
        assert_eq!(sim.atoms.velocities.get(0), v);
    }
}

#[test]
fn harmonic_tether_energy_is_reported_after_evaluation() {
    let mut sim = frame(&[Vector3::new(0.0, 3.0, 4.0)], &[Vector3::zeros()], &[1.0], HarmonicTether { k: 2.0 });
    assert_eq!(sim.potential_energy(), 0.0);

    sim.evaluate_forces().unwrap();
    assert_relative_eq!(sim.potential_energy(), 25.0);
    assert_relative_eq!(sim.thermo(0).total_energy, 25.0);
}

// ==================================================================================
// Time reversal and energy
// ==================================================================================

#[test]
fn velocity_verlet_retraces_its_trajectory() {
    let r0 = [Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, -0.5, 0.3)];
    let v0 = [Vector3::new(0.0, 1.0, 0.0), Vector3::new(0.2, 0.0, -0.4)];
    let mut sim = frame(&r0, &v0, &[1.0, 3.0], HarmonicTether { k: 2.0 });

    let mut integrator = Integrator::new(IntegratorKind::VelocityVerlet, 0.01).unwrap();
    integrator.prepare(&mut sim).unwrap();
    for _ in 0..500 {
        integrator.step(&mut sim).unwrap();
    }
    assert!((sim.atoms.positions.get(0) - r0[0]).norm() > 0.1);

    *sim.atoms.velocities.as_matrix_mut() *= -1.0;
    integrator.prepare(&mut sim).unwrap();
    for _ in 0..500 {
        integrator.step(&mut sim).unwrap();
    }

    for i in 0..2 {
        assert_abs_diff_eq!(sim.atoms.positions.get(i), r0[i], epsilon = 1e-9);
    }
}

#[test]
fn velocity_verlet_keeps_oscillator_energy_bounded() {
    let mut sim = frame(&[Vector3::new(1.0, 0.0, 0.0)], &[Vector3::zeros()], &[1.0], HarmonicTether { k: 1.0 });
    let mut integrator = Integrator::new(IntegratorKind::VelocityVerlet, 0.01).unwrap();
    let mut energies = Vec::new();
    sim.run(&mut integrator, 2000, 10, |thermo| energies.push(thermo.total_energy))
        .unwrap();

    // step 0 is skipped: the first step runs with the zeroed accelerations of prepare
    let reference = energies[1];
    for energy in &energies[1..] {
        assert_relative_eq!(*energy, reference, max_relative = 1e-3);
    }
}

#[test]
fn verlet_follows_the_harmonic_solution() {
    let omega: f64 = 1.5;
    let dt = 0.001;
    let mut sim = frame(
        &[Vector3::new(1.0, 0.0, 0.0)],
        &[Vector3::zeros()],
        &[2.0],
        HarmonicTether { k: 2.0 * omega * omega },
    );
    let mut verlet = Verlet::new(dt).unwrap();
    verlet.prepare(&mut sim).unwrap();

    let steps = 1000;
    for _ in 0..steps {
        verlet.step(&mut sim).unwrap();
    }

    let t = steps as f64 * dt;
    assert_abs_diff_eq!(sim.atoms.positions.get(0).x, (omega * t).cos(), epsilon = 1e-3);
    // velocities lag one step behind the positions
    let t_lag = t - dt;
    assert_abs_diff_eq!(
        sim.atoms.velocities.get(0).x,
        -omega * (omega * t_lag).sin(),
        epsilon = 1e-3
    );
}

// ==================================================================================
// Resizing and idempotence
// ==================================================================================

#[test]
fn prepare_twice_is_a_no_op_for_both_schemes() {
    for kind in [IntegratorKind::VelocityVerlet, IntegratorKind::Verlet] {
        let mut sim = free_particles(4);
        let mut integrator = Integrator::new(kind, 0.01).unwrap();
        integrator.prepare(&mut sim).unwrap();
        integrator.step(&mut sim).unwrap();

        let snapshot = integrator.clone();
        integrator.prepare(&mut sim).unwrap();

        match (&snapshot, &integrator) {
            (Integrator::VelocityVerlet(a), Integrator::VelocityVerlet(b)) => {
                assert_eq!(a.accelerations(), b.accelerations())
            }
            (Integrator::Verlet(a), Integrator::Verlet(b)) => {
                assert_eq!(a.previous_positions(), b.previous_positions())
            }
            _ => unreachable!("prepare never changes the scheme"),
        }
        assert_eq!(sim.force_evaluations(), 1);
    }
}

#[test]
fn growing_the_frame_reallocates_derived_state() {
    let mut grown = free_particles(10);
    let mut steady = free_particles(10);
    let mut vv_grown = VelocityVerlet::new(0.02).unwrap();
    let mut vv_steady = VelocityVerlet::new(0.02).unwrap();
    vv_grown.prepare(&mut grown).unwrap();
    vv_steady.prepare(&mut steady).unwrap();

    for _ in 0..5 {
        vv_grown.step(&mut grown).unwrap();
        vv_steady.step(&mut steady).unwrap();
    }

    for i in 0..10 {
        grown
            .atoms
            .add_atom(Vector3::new(-5.0, i as f64, 2.0), Vector3::new(0.0, 0.0, 1.0), 1.5);
    }
    assert!(vv_grown.step(&mut grown).is_err());
    vv_grown.prepare(&mut grown).unwrap();
    assert_eq!(vv_grown.accelerations().len(), 20);

    for _ in 0..5 {
        vv_grown.step(&mut grown).unwrap();
        vv_steady.step(&mut steady).unwrap();
    }

    for i in 0..10 {
        assert_eq!(grown.atoms.positions.get(i), steady.atoms.positions.get(i));
        assert_eq!(grown.atoms.velocities.get(i), steady.atoms.velocities.get(i));
    }
}

#[test]
fn verlet_buffers_track_the_atom_count() {
    let mut sim = free_particles(10);
    let mut verlet = Verlet::new(0.01).unwrap();
    verlet.prepare(&mut sim).unwrap();
    assert_eq!(verlet.previous_positions().len(), 10);

    for i in 0..10 {
        sim.atoms.add_atom(Vector3::new(i as f64, 9.0, 9.0), Vector3::zeros(), 1.0);
    }
    verlet.prepare(&mut sim).unwrap();
    assert_eq!(verlet.previous_positions().len(), 20);

    verlet.step(&mut sim).unwrap();
    for i in 0..20 {
        let expected = sim.atoms.positions.get(i) - sim.atoms.velocities.get(i) * 0.01;
        assert_abs_diff_eq!(verlet.previous_positions().get(i), expected, epsilon = 1e-12);
    }
}

#[test]
fn shrinking_the_frame_needs_a_new_prepare() {
    let mut sim = free_particles(3);
    let mut integrator = Integrator::new(IntegratorKind::Verlet, 0.01).unwrap();
    integrator.prepare(&mut sim).unwrap();
    sim.atoms.remove_atom(1).unwrap();

    assert!(integrator.step(&mut sim).is_err());
    assert_eq!(sim.force_evaluations(), 0);
    integrator.prepare(&mut sim).unwrap();
    integrator.step(&mut sim).unwrap();
}

#[test]
fn empty_frame_prepares_and_steps_for_both_schemes() {
    for kind in [IntegratorKind::VelocityVerlet, IntegratorKind::Verlet] {
        let atoms = Atoms::new_zeroes(0, SimulationBox::cubic(5.0).unwrap());
        let mut sim = Simulation::new(atoms, Box::new(NoForces));
        let mut integrator = Integrator::new(kind, 0.01).unwrap();

        integrator.prepare(&mut sim).unwrap();
        integrator.prepare(&mut sim).unwrap();
        for _ in 0..3 {
            integrator.step(&mut sim).unwrap();
        }

        assert_eq!(sim.atoms.n_atoms(), 0);
        assert_eq!(sim.force_evaluations(), 3);
    }
}

// ==================================================================================
// Contract violations
// ==================================================================================

#[test]
fn force_buffer_of_the_wrong_size_is_rejected_by_both_schemes() {
    for kind in [IntegratorKind::VelocityVerlet, IntegratorKind::Verlet] {
        let mut atoms = Atoms::new_zeroes(0, SimulationBox::cubic(10.0).unwrap());
        atoms.add_atom(Vector3::new(1.0, 1.0, 1.0), Vector3::zeros(), 1.0);
        atoms.add_atom(Vector3::new(2.0, 2.0, 2.0), Vector3::zeros(), 1.0);
        let mut ctx = LosesForces { atoms };
        let mut integrator = Integrator::new(kind, 0.01).unwrap();

        integrator.prepare(&mut ctx).unwrap();
        assert!(matches!(
            integrator.step(&mut ctx),
            Err(MdError::ForceCountMismatch {
                expected: 2,
                found: 0
            })
        ));
    }
}

// ==================================================================================
// Periodic boundaries
// ==================================================================================

#[test]
fn verlet_velocity_survives_boundary_crossings() {
    let mut atoms = Atoms::new_zeroes(0, SimulationBox::orthorhombic(3.0, 4.0, 5.0).unwrap());
    let v0 = Vector3::new(2.0, -3.0, 1.0);
    atoms.add_atom(Vector3::new(2.9, 0.1, 4.95), v0, 1.0);
    let mut sim = Simulation::new(atoms, Box::new(NoForces));
    assert!(sim.is_wrapping_positions());

    let mut verlet = Verlet::new(0.05).unwrap();
    verlet.prepare(&mut sim).unwrap();
    for _ in 0..100 {
        verlet.step(&mut sim).unwrap();
        assert_abs_diff_eq!(sim.atoms.velocities.get(0), v0, epsilon = 1e-9);
    }
}
