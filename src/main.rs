use anyhow::Context;
use clap::Parser;

use pis_verlet::args_parser::Args;
use pis_verlet::system::System;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut system = System::new(args.infile.clone());

    system
        .read()
        .with_context(|| format!("reading input file '{}'", args.infile))?;
    if let Some(steps) = args.steps {
        system.context_mut().steps = steps;
    }
    system.contextualize()?.run()?;
    Ok(())
}
