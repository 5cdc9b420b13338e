use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::str::FromStr;
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use crate::parameters::{DEFAULT_DT, DEFAULT_ENZYME_CONC, DEFAULT_K0, DEFAULT_TEMPERATURE};
use crate::{ConfigurationError, EnergyUnit, PhysicalParameters, RenderView, SaveLoadError, StateSpace};

fn default_enzyme_conc() -> f64 {
    DEFAULT_ENZYME_CONC
}

fn default_k0() -> f64 {
    DEFAULT_K0
}

fn default_dt() -> f64 {
    DEFAULT_DT
}

fn default_unit() -> String {
    EnergyUnit::default().as_str().to_string()
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

/// Everything needed to build a kinetic model. This is the layout of model files.
///
/// `unit` stays a plain string here so that an unknown tag is reported when the model is
/// built, not when the file is parsed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ModelDescription {
    pub initial_conc: Vec<f64>,
    pub free_energies: Vec<f64>,
    /// Barrier free energies, `0.0` means there is no path between the two states
    pub transition_free_energies: Vec<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(default = "default_enzyme_conc")]
    pub enzyme_conc: f64,
    #[serde(default = "default_k0")]
    pub k0: f64,
    #[serde(default = "default_dt")]
    pub dt: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

impl ModelDescription {
    /// Description with default physical parameters and synthesized labels.
    pub fn new(initial_conc: Vec<f64>,
               free_energies: Vec<f64>,
               transition_free_energies: Vec<Vec<f64>>) -> Self {
        ModelDescription {
            initial_conc,
            free_energies,
            transition_free_energies,
            labels: None,
            enzyme_conc: DEFAULT_ENZYME_CONC,
            k0: DEFAULT_K0,
            dt: DEFAULT_DT,
            unit: default_unit(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Template of `number_states` states at free energy 0 where every pair is connected
    /// through a barrier of height `barrier` and the whole population starts in the first state.
    pub fn fully_connected(number_states: usize, barrier: f64, unit: EnergyUnit) -> Self {
        let mut initial_conc = vec![0.0; number_states];
        if let Some(first) = initial_conc.first_mut() {
            *first = 1.0;
        }
        let transition_free_energies = (0..number_states)
            .map(|i| {
                (0..number_states)
                    .map(|j| if i == j { 0.0 } else { barrier })
                    .collect()
            })
            .collect();
        let mut description = ModelDescription::new(
            initial_conc, vec![0.0; number_states], transition_free_energies);
        description.unit = unit.as_str().to_string();
        description
    }

    pub fn number_states(&self) -> usize {
        self.initial_conc.len()
    }

    /// Check that every energy input matches the number of initial concentrations.
    pub fn validate_shape(&self) -> Result<(), ConfigurationError> {
        let n = self.number_states();
        if self.free_energies.len() != n {
            return Err(ConfigurationError::ShapeMismatch {
                what: "free_energies",
                expected: n,
                found: self.free_energies.len(),
            });
        }
        if self.transition_free_energies.len() != n {
            return Err(ConfigurationError::ShapeMismatch {
                what: "transition_free_energies",
                expected: n,
                found: self.transition_free_energies.len(),
            });
        }
        if let Some((_, row)) = self.transition_free_energies.iter().find_position(|row| row.len() != n) {
            return Err(ConfigurationError::ShapeMismatch {
                what: "transition_free_energies row",
                expected: n,
                found: row.len(),
            });
        }
        Ok(())
    }

    pub fn physical_parameters(&self) -> Result<PhysicalParameters, ConfigurationError> {
        Ok(PhysicalParameters {
            enzyme_conc: self.enzyme_conc,
            k0: self.k0,
            temperature: self.temperature,
            unit: EnergyUnit::from_str(&self.unit)?,
        })
    }

    pub fn state_space(&self) -> Result<StateSpace, ConfigurationError> {
        StateSpace::new(self.number_states(), self.labels.clone())
    }

    pub fn load_from_file(path: &Path) -> Result<Self, SaveLoadError> {
        let file = File::open(path)
            .map_err(|e| SaveLoadError::CantOpen(path.to_path_buf(), e))?;
        let buf_reader = BufReader::new(file);
        let description: ModelDescription = serde_json::de::from_reader(buf_reader)
            .map_err(|e| SaveLoadError::CantRead(path.to_path_buf(), e))?;
        debug!("Loaded {} state model from {}", description.number_states(), path.display());
        Ok(description)
    }

    pub fn save_to_file(&self, path: &Path, pretty_print: bool) -> Result<(), SaveLoadError> {
        let file = File::create(path)
            .map_err(|e| SaveLoadError::CantCreate(path.to_path_buf(), e))?;
        let buf_writer = BufWriter::new(file);
        let res = if pretty_print {
            serde_json::ser::to_writer_pretty(buf_writer, self)
        } else {
            serde_json::ser::to_writer(buf_writer, self)
        };
        res.map_err(|e| SaveLoadError::CantWrite(path.to_path_buf(), e.to_string()))
    }
}

/// Persisted form of a [RenderView].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TrajectoryFile {
    pub labels: Vec<String>,
    pub times: Vec<f64>,
    /// One row per sample, one column per state
    pub populations: Vec<Vec<f64>>,
}

impl From<&RenderView<'_>> for TrajectoryFile {
    fn from(view: &RenderView<'_>) -> Self {
        TrajectoryFile {
            labels: view.labels.to_vec(),
            times: view.times.to_vec(),
            populations: (0..view.times.len()).map(|i| view.row(i)).collect(),
        }
    }
}

impl TrajectoryFile {
    pub fn load_from_file(path: &Path) -> Result<Self, SaveLoadError> {
        let file = File::open(path)
            .map_err(|e| SaveLoadError::CantOpen(path.to_path_buf(), e))?;
        serde_json::de::from_reader(BufReader::new(file))
            .map_err(|e| SaveLoadError::CantRead(path.to_path_buf(), e))
    }

    pub fn save_to_file(&self, path: &Path, pretty_print: bool) -> Result<(), SaveLoadError> {
        let file = File::create(path)
            .map_err(|e| SaveLoadError::CantCreate(path.to_path_buf(), e))?;
        let buf_writer = BufWriter::new(file);
        let res = if pretty_print {
            serde_json::ser::to_writer_pretty(buf_writer, self)
        } else {
            serde_json::ser::to_writer(buf_writer, self)
        };
        res.map_err(|e| SaveLoadError::CantWrite(path.to_path_buf(), e.to_string()))
    }
}

/// Write trajectory as CSV: header `time,<label0>,<label1>,...` and one row per sample.
pub fn save_trajectory_csv(view: &RenderView, path: &Path) -> Result<(), SaveLoadError> {
    let cant_write = |e: csv::Error| SaveLoadError::CantWrite(path.to_path_buf(), e.to_string());
    let file = File::create(path)
        .map_err(|e| SaveLoadError::CantCreate(path.to_path_buf(), e))?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));
    let header = std::iter::once("time").chain(view.labels.iter().map(String::as_str));
    writer.write_record(header).map_err(cant_write)?;
    for (i, time) in view.times.iter().enumerate() {
        let record = std::iter::once(*time)
            .chain(view.row(i))
            .map(|value| value.to_string());
        writer.write_record(record).map_err(cant_write)?;
    }
    writer.flush()
        .map_err(|e| SaveLoadError::CantWrite(path.to_path_buf(), e.to_string()))?;
    debug!("Saved {} samples to {}", view.times.len(), path.display());
    Ok(())
}
