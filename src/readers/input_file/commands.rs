//! Parsers for the individual commands of an input file.
//!
//! Each line of an input file is `<command> <args...>`. The command selects a
//! [`Command`] variant, whose [`Command::run`] parses the arguments and
//! records them in the [`SimulationContext`].
use crate::{
    errors::{MdError, Result},
    extensions::ArgsExt,
    integrators::IntegratorKind,
    lattice::Lattice,
    readers::simulation_context::{LatticeArgs, SimulationContext, StartVelocity},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `lattice <sc|fcc> <a> <nx> <ny> <nz>`
    Lattice,
    /// `mass <m>`
    Mass,
    /// `velocity create <temperature> [seed]`
    Velocity,
    /// `integrator <velocity-verlet|verlet>`
    Integrator,
    /// `timestep <dt>`
    Timestep,
    /// `wrap <yes|no>`
    Wrap,
    /// `thermo <every>`
    Thermo,
    /// `run <steps>`
    Run,
}

impl Command {
    pub fn from_keyword(command: &str) -> Option<Self> {
        match command {
            "lattice" => Some(Self::Lattice),
            "mass" => Some(Self::Mass),
            "velocity" => Some(Self::Velocity),
            "integrator" => Some(Self::Integrator),
            "timestep" => Some(Self::Timestep),
            "wrap" => Some(Self::Wrap),
            "thermo" => Some(Self::Thermo),
            "run" => Some(Self::Run),
            _ => None,
        }
    }

    /// Number of positional arguments the command consumes at most.
    fn max_args(&self) -> usize {
        match self {
            Self::Lattice => 5,
            Self::Velocity => 3,
            Self::Mass
            | Self::Integrator
            | Self::Timestep
            | Self::Wrap
            | Self::Thermo
            | Self::Run => 1,
        }
    }

    pub fn run(&self, args: &[&str], line: usize, ctx: &mut SimulationContext) -> Result<()> {
        if args.len() > self.max_args() {
            log::warn!(
                "ignoring {} extra argument(s) on line {line}",
                args.len() - self.max_args()
            );
        }

        match self {
            Self::Lattice => {
                let lattice: Lattice = args.get_required(0, line)?.parse()?;
                let a = args.parse_positive_float_at(1, line)?;
                let cells = [
                    args.parse_usize_at(2, line)?,
                    args.parse_usize_at(3, line)?,
                    args.parse_usize_at(4, line)?,
                ];
                ctx.lattice = Some(LatticeArgs { lattice, a, cells });
            }
            Self::Mass => {
                ctx.mass = args.parse_positive_float_at(0, line)?;
            }
            Self::Velocity => {
                // only "create" is available for now
                let style = args.get_required(0, line)?;
                if style != "create" {
                    return Err(MdError::InvalidArgument {
                        string: style.to_string(),
                        line,
                    });
                }
                let start_temperature = args.parse_positive_float_at(1, line)?;
                let seed = match args.get(2) {
                    Some(_) => args.parse_usize_at(2, line)? as u64,
                    None => 0,
                };
                ctx.starting_velocity = Some(StartVelocity {
                    start_temperature,
                    seed,
                });
            }
            Self::Integrator => {
                let kind: IntegratorKind = args.get_required(0, line)?.parse()?;
                ctx.integrator = kind;
            }
            Self::Timestep => {
                ctx.timestep = args.parse_positive_float_at(0, line)?;
            }
            Self::Wrap => {
                ctx.wrap_positions = args.parse_bool_at(0, line)?;
            }
            Self::Thermo => {
                ctx.thermo_every = args.parse_usize_at(0, line)?;
            }
            Self::Run => {
                ctx.steps = args.parse_usize_at(0, line)?;
            }
        }
        Ok(())
    }
}
