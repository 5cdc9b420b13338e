use na::DVector;
use crate::solver::Generator;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Integrator {
    #[default]
    /// `p(t + dt) = p(t) + dt * Q^T p(t)`
    ExplicitEuler,
}

impl Integrator {
    /// Just integrator iteration
    pub fn calculate(&self, generator: &Generator, population: &DVector<f64>, delta_time: f64) -> DVector<f64> {
        match self {
            Integrator::ExplicitEuler => {
                population + (generator.transposed() * population) * delta_time
            }
        }
    }

    /// Apply `sub_steps` iterations in a row. At least one iteration is always done,
    /// so `sub_steps == 0` behaves like `sub_steps == 1`.
    pub fn calculate_folded(&self, generator: &Generator, population: &DVector<f64>,
                            delta_time: f64, sub_steps: usize) -> DVector<f64> {
        let mut population = self.calculate(generator, population, delta_time);
        for _ in 1..sub_steps {
            population = self.calculate(generator, &population, delta_time);
        }
        population
    }
}

/// How the time of a new sample is derived during [crate::solver::KineticModel::advance].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeStamping {
    /// Every sample of one `advance(time_steps, save_every)` call is
    /// `dt * time_steps * save_every` after the previous one. This does not match the
    /// `dt * save_every` of simulated time between two samples.
    #[default]
    Literal,
    /// Every sample is `dt * save_every` after the previous one.
    PerSample,
}

impl TimeStamping {
    pub fn increment(&self, delta_time: f64, time_steps: usize, save_every: usize) -> f64 {
        match self {
            TimeStamping::Literal => delta_time * time_steps as f64 * save_every as f64,
            TimeStamping::PerSample => delta_time * save_every as f64,
        }
    }
}
