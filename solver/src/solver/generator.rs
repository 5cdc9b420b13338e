use itertools::iproduct;
use log::debug;
use na::DMatrix;
use statekin_core::{ConfigurationError, PhysicalParameters};

/// Rate matrix Q of a continuous-time Markov process over the model states.
///
/// `Q[i][j]` (`i != j`) is the rate of the `i -> j` transition and every row sums to zero.
/// Only the transpose is kept, so that a population vector can be multiplied directly.
#[derive(Clone, Debug, PartialEq)]
pub struct Generator {
    transposed: DMatrix<f64>,
}

impl Generator {
    /// Number of states.
    pub fn len(&self) -> usize {
        self.transposed.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.transposed.is_empty()
    }

    /// Rate of the `from -> to` transition. For `from == to` this is the negative total
    /// escape rate of `from`.
    pub fn rate(&self, from: usize, to: usize) -> f64 {
        self.transposed[(to, from)]
    }

    /// Sum of row `state` of Q, zero up to rounding.
    pub fn row_sum(&self, state: usize) -> f64 {
        self.transposed.column(state).sum()
    }

    /// Largest total escape rate. An explicit Euler step `dt` is only stable for
    /// `dt * fastest_rate()` of order one or below.
    pub fn fastest_rate(&self) -> f64 {
        self.transposed
            .diagonal()
            .iter()
            .fold(0.0, |fastest, rate| f64::max(fastest, rate.abs()))
    }

    /// Copy of Q in row-major orientation, rows are source states.
    pub fn rates(&self) -> DMatrix<f64> {
        self.transposed.transpose()
    }

    /// Every direct transition with a non-zero rate as `(from, to, rate)`.
    pub fn transitions(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let n = self.len();
        iproduct!(0..n, 0..n)
            .filter(|(from, to)| from != to)
            .map(|(from, to)| (from, to, self.rate(from, to)))
            .filter(|(_, _, rate)| *rate != 0.0)
    }

    pub(crate) fn transposed(&self) -> &DMatrix<f64> {
        &self.transposed
    }
}

/// Turns free energies of states and barriers into a [Generator].
pub struct GeneratorBuilder<'a> {
    free_energies: &'a [f64],
    transition_free_energies: &'a [Vec<f64>],
    parameters: PhysicalParameters,
}

impl<'a> GeneratorBuilder<'a> {
    /// * `free_energies` - free energy of every state
    /// * `transition_free_energies` - barrier between `i` and `j` at `[i][j]`, `0.0` if the states
    ///   are not connected
    /// * `parameters` - prefactor, enzyme concentration, temperature and unit of both energy inputs
    pub fn new(free_energies: &'a [f64],
               transition_free_energies: &'a [Vec<f64>],
               parameters: PhysicalParameters) -> Self {
        GeneratorBuilder {
            free_energies,
            transition_free_energies,
            parameters,
        }
    }

    fn has_path(&self, from: usize, to: usize) -> bool {
        self.transition_free_energies[from][to] != 0.0
    }

    fn check_shape(&self) -> Result<(), ConfigurationError> {
        let n = self.free_energies.len();
        if self.transition_free_energies.len() != n {
            return Err(ConfigurationError::ShapeMismatch {
                what: "transition_free_energies",
                expected: n,
                found: self.transition_free_energies.len(),
            });
        }
        for row in self.transition_free_energies {
            if row.len() != n {
                return Err(ConfigurationError::ShapeMismatch {
                    what: "transition_free_energies row",
                    expected: n,
                    found: row.len(),
                });
            }
        }
        Ok(())
    }

    /// Barrier minus source free energy for every connected pair, in thermal units.
    /// Unconnected pairs get a gap of zero.
    pub fn activation_gaps(&self) -> Result<DMatrix<f64>, ConfigurationError> {
        self.check_shape()?;
        let n = self.free_energies.len();
        let unit = self.parameters.unit;
        let temperature = self.parameters.temperature;
        Ok(DMatrix::from_fn(n, n, |i, j| {
            if self.has_path(i, j) {
                let gap = self.transition_free_energies[i][j] - self.free_energies[i];
                unit.to_thermal(gap, temperature)
            } else {
                0.0
            }
        }))
    }

    pub fn build(&self) -> Result<Generator, ConfigurationError> {
        let gaps = self.activation_gaps()?;
        let n = gaps.nrows();
        let prefactor = self.parameters.rate_prefactor();
        let mut rates = DMatrix::from_fn(n, n, |i, j| {
            if self.has_path(i, j) {
                prefactor * (-gaps[(i, j)]).exp()
            } else {
                0.0
            }
        });
        for i in 0..n {
            let escape_rate: f64 = (0..n)
                .filter(|&j| j != i)
                .map(|j| rates[(i, j)])
                .sum();
            rates[(i, i)] = -escape_rate;
        }
        debug!("Built generator over {} states in {}, prefactor {}", n, self.parameters.unit, prefactor);
        Ok(Generator {
            transposed: rates.transpose(),
        })
    }
}
