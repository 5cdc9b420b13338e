use std::path::{Path, PathBuf};
use std::time::Duration;
use indicatif::ProgressBar;
use itertools::Itertools;
use log::{info, warn};
use rayon::prelude::*;
use statekin_core::{save_trajectory_csv, ConfigurationError, EnergyUnit, ModelDescription,
                    SaveLoadError, TrajectoryFile};
use statekin_solver::observables::conservation_drift;
use statekin_solver::solver::{KineticModel, TimeStamping};
use crate::args::OutputFormat;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    SaveLoad(#[from] SaveLoadError),
    #[error("Can't create directory {0}")]
    CantCreateDirectory(PathBuf, #[source] std::io::Error),
}

pub fn time_stamping(per_sample_time: bool) -> TimeStamping {
    if per_sample_time {
        TimeStamping::PerSample
    } else {
        TimeStamping::Literal
    }
}

pub fn init(file: &Path,
            states: usize,
            barrier: f64,
            unit: EnergyUnit,
            pretty_print: bool) -> Result<(), CliError> {
    let description = ModelDescription::fully_connected(states, barrier, unit);
    description.save_to_file(file, pretty_print)?;
    info!("Template with {} states saved to {}", states, file.display());
    Ok(())
}

fn load_model(file: &Path, time_stamping: TimeStamping) -> Result<KineticModel, CliError> {
    let description = ModelDescription::load_from_file(file)?;
    let model = KineticModel::new(&description)?.with_time_stamping(time_stamping);
    let stiffness = model.delta_time() * model.generator().fastest_rate();
    if stiffness > 1.0 {
        warn!("dt * fastest rate is {:.3} for {}, explicit Euler may diverge",
              stiffness, file.display());
    }
    Ok(model)
}

fn advance_model(model: &mut KineticModel, file: &Path, time_steps: usize, save_every: usize) {
    model.advance(time_steps, save_every);
    info!("{}: {} samples, final time {}, total population drift {:e}",
          file.display(),
          model.trajectory().len(),
          model.trajectory().last_time(),
          conservation_drift(model.trajectory()));
}

fn run_model(file: &Path,
             time_steps: usize,
             save_every: usize,
             time_stamping: TimeStamping) -> Result<KineticModel, CliError> {
    let mut model = load_model(file, time_stamping)?;
    advance_model(&mut model, file, time_steps, save_every);
    Ok(model)
}

/// Generator as a tab separated table, rows are source states.
pub fn rates(file: &Path) -> Result<String, CliError> {
    let model = load_model(file, TimeStamping::default())?;
    let generator = model.generator();
    let labels = model.state_space().labels();
    let mut table = format!("\t{}\n", labels.iter().join("\t"));
    for (from, label) in labels.iter().enumerate() {
        let row = (0..generator.len())
            .map(|to| format!("{:.6e}", generator.rate(from, to)))
            .join("\t");
        table.push_str(&format!("{label}\t{row}\n"));
    }
    info!("{} direct transitions, fastest escape rate {:e}",
          generator.transitions().count(), generator.fastest_rate());
    Ok(table)
}

pub fn solve(file: &Path,
             out_file: &Path,
             time_steps: usize,
             save_every: usize,
             time_stamping: TimeStamping,
             format: OutputFormat,
             pretty_print: bool) -> Result<(), CliError> {
    let mut model = load_model(file, time_stamping)?;
    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Advancing {} samples", time_steps));
    advance_model(&mut model, file, time_steps, save_every);
    let view = model.render_view();
    let res = match format {
        OutputFormat::Csv => save_trajectory_csv(&view, out_file),
        OutputFormat::Json => TrajectoryFile::from(&view).save_to_file(out_file, pretty_print),
    };
    if let Err(e) = res {
        pb.abandon();
        return Err(e.into());
    }
    pb.finish_with_message(format!("Calculated. Trajectory saved to {}", out_file.to_string_lossy()));
    Ok(())
}

/// One csv file per model, named after the model file. Models sharing a file stem get
/// their position in `models` appended, so no two models write the same file.
pub fn batch_outputs(out_dir: &Path, models: &[PathBuf]) -> Vec<PathBuf> {
    let stems: Vec<String> = models
        .iter()
        .enumerate()
        .map(|(index, model_file)| {
            model_file
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| format!("model{index}"))
        })
        .collect();
    let counts = stems.iter().counts();
    stems
        .iter()
        .enumerate()
        .map(|(index, stem)| {
            let name = if counts[stem] > 1 {
                format!("{stem}_{index}")
            } else {
                stem.clone()
            };
            out_dir.join(name).with_extension("csv")
        })
        .collect()
}

/// Independent models are advanced on the rayon pool. Returns written files in input order.
pub fn batch(models: &[PathBuf],
             out_dir: &Path,
             time_steps: usize,
             save_every: usize,
             time_stamping: TimeStamping) -> Result<Vec<PathBuf>, CliError> {
    std::fs::create_dir_all(out_dir)
        .map_err(|e| CliError::CantCreateDirectory(out_dir.to_path_buf(), e))?;
    let outputs = batch_outputs(out_dir, models);
    let pb = ProgressBar::new(models.len() as u64);
    let res = models
        .par_iter()
        .zip(outputs.par_iter())
        .map(|(model_file, out_file)| -> Result<PathBuf, CliError> {
            let model = run_model(model_file, time_steps, save_every, time_stamping)?;
            save_trajectory_csv(&model.render_view(), out_file)?;
            pb.inc(1);
            Ok(out_file.clone())
        })
        .collect::<Result<Vec<_>, _>>();
    let written = match res {
        Ok(written) => written,
        Err(e) => {
            pb.abandon();
            return Err(e);
        }
    };
    pb.finish_with_message(format!("Calculated {} models. Trajectories saved to {}",
                                   written.len(), out_dir.to_string_lossy()));
    Ok(written)
}
