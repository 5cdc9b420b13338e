use na::DVector;
use crate::StateSpace;

/// Append-only history of recorded samples. Sample 0 is the initial population at time 0.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    times: Vec<f64>,
    populations: Vec<DVector<f64>>,
}

impl Trajectory {
    /// Start trajectory from `initial` population at time 0.
    pub fn new(initial: DVector<f64>) -> Self {
        Trajectory {
            times: vec![0.0],
            populations: vec![initial],
        }
    }

    /// Record one more sample.
    /// > **Warning**
    /// > This function doesn't check that `population` has the same length as earlier samples
    /// > or that `time` is not smaller than the last one.
    pub fn push(&mut self, time: f64, population: DVector<f64>) {
        self.times.push(time);
        self.populations.push(population);
    }

    pub fn reserve(&mut self, additional: usize) {
        self.times.reserve(additional);
        self.populations.reserve(additional);
    }

    /// Number of recorded samples, at least 1.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn number_states(&self) -> usize {
        self.populations[0].len()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn populations(&self) -> &[DVector<f64>] {
        &self.populations
    }

    pub fn last_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    pub fn last_population(&self) -> &DVector<f64> {
        &self.populations[self.populations.len() - 1]
    }

    /// Population of `state` over every sample.
    pub fn state_series(&self, state: usize) -> Vec<f64> {
        self.populations.iter().map(|population| population[state]).collect()
    }
}

/// Read-only tuple handed to renderers and exporters: time axis, one series per state and labels.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderView<'a> {
    pub times: &'a [f64],
    pub series: Vec<Vec<f64>>,
    pub labels: &'a [String],
}

impl<'a> RenderView<'a> {
    pub fn new(trajectory: &'a Trajectory, state_space: &'a StateSpace) -> Self {
        let series = (0..trajectory.number_states())
            .map(|state| trajectory.state_series(state))
            .collect();
        RenderView {
            times: trajectory.times(),
            series,
            labels: state_space.labels(),
        }
    }

    /// Populations of every state at sample `index`, in state order.
    pub fn row(&self, index: usize) -> Vec<f64> {
        self.series.iter().map(|series| series[index]).collect()
    }
}
