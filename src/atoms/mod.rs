//! The atoms struct holding the particle frame the integrators advance.
pub mod new;
pub mod properties;
pub mod transformations;
pub mod velocities;

pub use new::Atoms;
