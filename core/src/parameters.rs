use crate::EnergyUnit;

pub const DEFAULT_ENZYME_CONC: f64 = 0.0001;
/// Attempt rate of a barrier-free transition
pub const DEFAULT_K0: f64 = 4_000_000.0;
/// Kelvin
pub const DEFAULT_TEMPERATURE: f64 = 310.0;
pub const DEFAULT_DT: f64 = 0.025;

/// Physical conditions shared by every transition of a model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicalParameters {
    /// Scales every rate linearly
    pub enzyme_conc: f64,
    /// Rate prefactor
    pub k0: f64,
    /// Temperature in Kelvin
    pub temperature: f64,
    /// Unit of every free energy given to the model
    pub unit: EnergyUnit,
}

impl PhysicalParameters {
    /// Rate of a transition whose activation gap is zero.
    pub fn rate_prefactor(&self) -> f64 {
        self.k0 * self.enzyme_conc
    }
}

impl Default for PhysicalParameters {
    fn default() -> Self {
        PhysicalParameters {
            enzyme_conc: DEFAULT_ENZYME_CONC,
            k0: DEFAULT_K0,
            temperature: DEFAULT_TEMPERATURE,
            unit: EnergyUnit::default(),
        }
    }
}
