use std::process::ExitCode;
use clap::Parser;
use log::error;
use crate::args::*;
use crate::commands::{batch, init, rates, solve, time_stamping};

mod args;
mod commands;


fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    let res = match &args.command {
        Commands::Init {
            states,
            barrier,
            unit,
        } => {
            init(&args.file, *states, *barrier, *unit, args.pretty_print)
        }
        Commands::Rates => {
            rates(&args.file).map(|table| print!("{table}"))
        }
        Commands::Solve {
            out_file,
            time_steps,
            save_every,
            per_sample_time,
            format,
        } => {
            solve(&args.file, out_file, *time_steps, *save_every,
                  time_stamping(*per_sample_time), *format, args.pretty_print)
        }
        Commands::Batch {
            out_dir,
            time_steps,
            save_every,
            per_sample_time,
            models,
        } => {
            let mut all_models = vec![args.file.clone()];
            all_models.extend(models.iter().cloned());
            batch(&all_models, out_dir, *time_steps, *save_every,
                  time_stamping(*per_sample_time)).map(|_| ())
        }
    };
    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
