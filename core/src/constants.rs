//! Exact SI constants (2019 redefinition) used to bring energies into thermal units.

/// Boltzmann constant, J/K
pub const K_B: f64 = 1.380649e-23;
/// Avogadro constant, 1/mol
pub const N_A: f64 = 6.02214076e23;
/// Elementary charge, C
pub const E_CHARGE: f64 = 1.602176634e-19;
