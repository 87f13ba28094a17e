//! Fixed-step Verlet integration for molecular dynamics.
//!
//! The core of the crate is [`integrators`]: velocity Verlet and position
//! Verlet behind the shared [`integrators::Integrate`] contract. They advance
//! an [`atoms::Atoms`] frame owned by an [`context::IntegrationContext`],
//! which also evaluates forces. [`simulation::Simulation`] is the context
//! shipped with the crate and [`system::System`] drives it from an input file.
extern crate nalgebra as na;

pub mod args_parser;
pub mod atoms;
pub mod constants;
pub mod context;
pub mod errors;
pub mod extensions;
pub mod integrators;
pub mod lattice;
pub mod readers;
pub mod simulation;
pub mod simulation_box;
pub mod system;
pub mod vector_array;

pub use atoms::Atoms;
pub use context::{ForceField, IntegrationContext, NoForces};
pub use errors::{MdError, Result};
pub use integrators::{Integrate, Integrator, IntegratorKind, VelocityVerlet, Verlet};
pub use simulation::{Simulation, Thermo};
pub use simulation_box::SimulationBox;
pub use vector_array::Vectors3;
