//! The pivotal struct to read, build and run a simulation can be found here
use std::{
    fs::File,
    io::{BufRead, BufReader},
};

use crate::{
    atoms::Atoms,
    context::NoForces,
    errors::{MdError, Result},
    integrators::Integrator,
    readers::{input_file::commands::Command, simulation_context::SimulationContext},
    simulation::{Simulation, Thermo},
};

/// [`System`] is the basic API for running a simulation from an input file.
///
/// [`System::new`] takes the path to the input file, [`System::read`] collects
/// its commands, [`System::contextualize`] builds the atoms and the
/// integrator from them and [`System::run`] integrates and prints the thermo
/// table.
///
/// # Examples
///
/// ```no_run
/// use pis_verlet::system::System;
///
/// System::new("input.pis".to_string())
///     .read()?
///     .contextualize()?
///     .run()?;
/// # Ok::<(), pis_verlet::errors::MdError>(())
/// ```
pub struct System {
    /// the path to the input file
    infile: String,
    ctx: SimulationContext,
    simulation: Option<Simulation>,
    integrator: Option<Integrator>,
}

impl System {
    pub fn new(infile: String) -> Self {
        Self {
            infile,
            ctx: SimulationContext::default(),
            simulation: None,
            integrator: None,
        }
    }

    pub fn context(&self) -> &SimulationContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut SimulationContext {
        &mut self.ctx
    }

    pub fn simulation(&self) -> Option<&Simulation> {
        self.simulation.as_ref()
    }

    pub fn integrator(&self) -> Option<&Integrator> {
        self.integrator.as_ref()
    }

    /// Reads the input file and collects all the commands in it.
    pub fn read(&mut self) -> Result<&mut Self> {
        let file = File::open(&self.infile).map_err(|e| MdError::InputFileError {
            path: self.infile.clone(),
            source: e,
        })?;
        self.read_from(BufReader::new(file))
    }

    pub fn read_from<R: BufRead>(&mut self, reader: R) -> Result<&mut Self> {
        for (line_num, line) in reader.lines().enumerate() {
            let line_num = line_num + 1;
            let line = line.map_err(|e| MdError::DataFileError {
                path: self.infile.clone(),
                line: line_num,
                source: e,
            })?;
            // Considering only the part of the line that is before the commented part.
            let uncommented = line
                .split_once('#')
                .map(|(before, _)| before)
                .unwrap_or(&line)
                .trim();

            let line_split: Vec<&str> = uncommented.split_whitespace().collect();
            let Some((&command, args)) = line_split.split_first() else {
                continue;
            };

            match Command::from_keyword(command) {
                Some(cmd) => cmd.run(args, line_num, &mut self.ctx)?,
                None => {
                    return Err(MdError::UnknownCommand {
                        command: command.to_string(),
                        line: line_num,
                    })
                }
            }
        }
        Ok(self)
    }

    /// Builds the atoms and the integrator from the commands read in [`System::read`].
    pub fn contextualize(&mut self) -> Result<&mut Self> {
        let lattice = self.ctx.lattice.as_ref().ok_or(MdError::NoAtomsDefined)?;
        let mut atoms = Atoms::from_lattice(lattice.lattice, lattice.a, lattice.cells, self.ctx.mass)?;
        if atoms.n_atoms() == 0 {
            return Err(MdError::NoAtomsDefined);
        }

        if let Some(starting_velocity) = &self.ctx.starting_velocity {
            atoms.start_velocities(starting_velocity.start_temperature, starting_velocity.seed)?;
        }

        log::info!(
            "built {} atoms on a {} lattice, integrating with {} (dt = {})",
            atoms.n_atoms(),
            lattice.lattice,
            self.ctx.integrator,
            self.ctx.timestep
        );

        self.integrator = Some(Integrator::new(self.ctx.integrator, self.ctx.timestep)?);
        self.simulation = Some(
            Simulation::new(atoms, Box::new(NoForces)).with_wrapping(self.ctx.wrap_positions),
        );
        Ok(self)
    }

    /// Runs the simulation and prints a thermo line every `thermo` steps.
    pub fn run(&mut self) -> Result<()> {
        println!("step potential kinetic total temperature");
        self.run_with(|thermo| {
            println!(
                "{} {:.3} {:.3} {:.3} {:.3}",
                thermo.step,
                thermo.potential_energy,
                thermo.kinetic_energy,
                thermo.total_energy,
                thermo.temperature
            )
        })
    }

    pub fn run_with<F: FnMut(&Thermo)>(&mut self, observer: F) -> Result<()> {
        if self.simulation.is_none() || self.integrator.is_none() {
            self.contextualize()?;
        }
        let (Some(simulation), Some(integrator)) = (&mut self.simulation, &mut self.integrator)
        else {
            return Err(MdError::NoAtomsDefined);
        };
        simulation.run(integrator, self.ctx.steps, self.ctx.thermo_every, observer)
    }
}
