use std::fmt;
use std::str::FromStr;
use crate::constants::{E_CHARGE, K_B, N_A};
use crate::ConfigurationError;

/// Unit in which free energies are handed to the model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EnergyUnit {
    /// Natural thermal units, multiples of k_B * T
    #[default]
    ThermalEnergy,
    /// kJ/mol
    KiloJoulePerMole,
    /// eV
    ElectronVolt,
}

impl EnergyUnit {
    pub const ALL: [EnergyUnit; 3] = [
        EnergyUnit::ThermalEnergy,
        EnergyUnit::KiloJoulePerMole,
        EnergyUnit::ElectronVolt,
    ];

    /// Tag used in model files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyUnit::ThermalEnergy => "kBT",
            EnergyUnit::KiloJoulePerMole => "kJ/mol",
            EnergyUnit::ElectronVolt => "eV",
        }
    }

    /// Convert `value` given in this unit into multiples of k_B * `temperature`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use statekin_core::EnergyUnit;
    /// assert_eq!(EnergyUnit::ThermalEnergy.to_thermal(2.5, 310.0), 2.5);
    /// let one_kbt = EnergyUnit::KiloJoulePerMole.to_thermal(2.577483, 310.0);
    /// assert!((one_kbt - 1.0).abs() < 1e-6);
    /// ```
    pub fn to_thermal(&self, value: f64, temperature: f64) -> f64 {
        match self {
            EnergyUnit::ThermalEnergy => value,
            EnergyUnit::KiloJoulePerMole => value / temperature / K_B / N_A * 1000.0,
            EnergyUnit::ElectronVolt => value / temperature / K_B * E_CHARGE,
        }
    }

    /// Inverse of [EnergyUnit::to_thermal].
    pub fn from_thermal(&self, value: f64, temperature: f64) -> f64 {
        match self {
            EnergyUnit::ThermalEnergy => value,
            EnergyUnit::KiloJoulePerMole => value * temperature * K_B * N_A / 1000.0,
            EnergyUnit::ElectronVolt => value * temperature * K_B / E_CHARGE,
        }
    }
}

impl FromStr for EnergyUnit {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnergyUnit::ALL
            .into_iter()
            .find(|unit| unit.as_str() == s)
            .ok_or_else(|| ConfigurationError::UnknownUnit(s.to_string()))
    }
}

impl fmt::Display for EnergyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
