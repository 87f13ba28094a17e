use thiserror::Error;

#[derive(Error, Debug)]
pub enum MdError {
    // File I/O Errors
    #[error("Failed to open input file '{path}': {source}")]
    InputFileError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read line {line} in file '{path}': {source}")]
    DataFileError {
        path: String,
        line: usize,
        #[source]
        source: std::io::Error,
    },

    // Parsing Errors
    #[error("Invalid command {command} found line: {line}")]
    UnknownCommand { command: String, line: usize },

    #[error("Missing argument on line {line}")]
    MissingArgument { line: usize },

    #[error("Error parsing floating number from string {string}: {source}")]
    FloatParseError {
        string: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("Error parsing integer number from string {string}: {source}")]
    IntParseError {
        string: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Negative value {value} not allowed on line: {line}")]
    NegativeValue { value: i64, line: usize },

    #[error("Invalid argument: {string} at line: {line}")]
    InvalidArgument { string: String, line: usize },

    #[error("Unknown integrator: '{name}'")]
    UnknownIntegrator { name: String },

    #[error("Unknown lattice: '{name}'")]
    UnknownLattice { name: String },

    // Configuration errors
    #[error("No atoms defined in input file")]
    NoAtomsDefined,

    #[error("Atom count mismatch: expected {expected}, found {found}")]
    AtomCountMismatch { expected: usize, found: usize },

    #[error("Force buffer holds {found} vectors but the frame has {expected} atoms")]
    ForceCountMismatch { expected: usize, found: usize },

    #[error("Box matrix is singular")]
    SingularBox,

    // Integrator contract errors
    #[error("Timestep must be positive and finite, got {timestep}")]
    InvalidTimestep { timestep: f64 },

    #[error("Integrator stepped before prepare was called")]
    NotPrepared,

    #[error("Integrator prepared for {prepared} atoms but the frame has {found}")]
    ParticleCountChanged { prepared: usize, found: usize },

    // Physics errors
    #[error("Atom {index} has non-positive mass {mass}")]
    NonPositiveMass { index: usize, mass: f64 },

    #[error("Atom {index} has a non-finite position or velocity")]
    Diverged { index: usize },

    // Array bounds errors
    #[error("Atom index {index} out of range (total atoms: {n_atoms})")]
    InvalidAtomIndex { index: usize, n_atoms: usize },

    #[error("Temperature must be positive, got {temperature}")]
    InvalidTemperature { temperature: f64 },

    #[error("Could not build the velocity distribution: {source}")]
    VelocityDistribution {
        #[source]
        source: rand_distr::NormalError,
    },
}

pub type Result<T> = std::result::Result<T, MdError>;
