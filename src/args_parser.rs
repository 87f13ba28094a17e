use clap::Parser;

#[derive(Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Input file with the simulation commands
    #[arg(short, long, default_value_t = String::from("input.pis"))]
    pub infile: String,

    /// Overrides the number of steps given by the `run` command
    #[arg(short, long)]
    pub steps: Option<usize>,
}
