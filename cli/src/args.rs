use std::path::PathBuf;
use std::str::FromStr;
use clap::{Parser, Subcommand, ValueEnum};
use statekin_core::EnergyUnit;
use statekin_solver::solver::DEFAULT_SAVE_EVERY;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// path to model description file
    #[arg(short = 'f', long)]
    pub file: PathBuf,
    /// indent json output
    #[arg(long)]
    pub pretty_print: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `time,<label0>,<label1>,...` table
    Csv,
    /// labels, times and populations in one document
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// write fully connected template model
    Init {
        /// number of states
        #[arg(short = 'n', long)]
        states: usize,
        /// barrier free energy between every pair of states
        #[arg(short = 'b', long, default_value_t = 10.0)]
        barrier: f64,
        /// unit of free energies: kBT, kJ/mol or eV
        #[arg(short = 'u', long, default_value = "kBT", value_parser = EnergyUnit::from_str)]
        unit: EnergyUnit,
    },
    /// print transition rate matrix of the model
    Rates,
    /// run model and save trajectory
    Solve {
        /// file for output
        #[arg(short = 'o', long)]
        out_file: PathBuf,
        /// number of samples to record
        #[arg(short = 'n', long)]
        time_steps: usize,
        /// integrator iterations per recorded sample
        #[arg(short = 's', long, default_value_t = DEFAULT_SAVE_EVERY)]
        save_every: usize,
        /// stamp samples `dt * save_every` apart instead of `dt * time_steps * save_every`
        #[arg(long)]
        per_sample_time: bool,
        /// output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
    },
    /// run this model and every extra model in parallel, one csv file per model
    Batch {
        /// directory for output
        #[arg(short = 'o', long)]
        out_dir: PathBuf,
        /// number of samples to record
        #[arg(short = 'n', long)]
        time_steps: usize,
        /// integrator iterations per recorded sample
        #[arg(short = 's', long, default_value_t = DEFAULT_SAVE_EVERY)]
        save_every: usize,
        /// stamp samples `dt * save_every` apart instead of `dt * time_steps * save_every`
        #[arg(long)]
        per_sample_time: bool,
        /// extra model description files
        models: Vec<PathBuf>,
    },
}
