use std::path::PathBuf;

/// Errors raised while assembling a kinetic model from its inputs.
/// No partial model is ever produced when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// Energy unit tag is not one of `kBT`, `kJ/mol`, `eV`.
    #[error("Unknown unit `{0}`, please provide one of the following inputs: kJ/mol, eV, kBT")]
    UnknownUnit(String),
    /// An energy input disagrees with the number of initial concentrations.
    #[error("{what} has length {found}, but the model has {expected} states")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    /// User supplied labels don't cover every state.
    #[error("{found} labels given for {expected} states")]
    LabelCount { expected: usize, found: usize },
}

#[allow(clippy::enum_variant_names)]
#[derive(Debug, thiserror::Error)]
pub enum SaveLoadError {
    #[error("Can't open {0}")]
    CantOpen(PathBuf, #[source] std::io::Error),
    #[error("Can't create {0}")]
    CantCreate(PathBuf, #[source] std::io::Error),
    #[error("Can't read {0}")]
    CantRead(PathBuf, #[source] serde_json::Error),
    #[error("Can't write {0}: {1}")]
    CantWrite(PathBuf, String),
}
