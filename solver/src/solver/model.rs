use log::debug;
use statekin_core::{ConfigurationError, ModelDescription, RenderView, StateSpace, Trajectory};
use na::DVector;
use crate::solver::{Generator, GeneratorBuilder, Integrator, TimeStamping};

/// Number of integrator iterations folded into one recorded sample by default.
pub const DEFAULT_SAVE_EVERY: usize = 10;

/// Multi-state kinetic model: an immutable generator and the trajectory it drives.
#[derive(Clone, Debug)]
pub struct KineticModel {
    state_space: StateSpace,
    generator: Generator,
    integrator: Integrator,
    time_stamping: TimeStamping,
    delta_time: f64,
    trajectory: Trajectory,
}

impl KineticModel {
    /// Build model from its description. The generator is computed here once.
    ///
    /// # Errors
    ///
    /// [ConfigurationError::UnknownUnit] if `unit` isn't `kBT`, `kJ/mol` or `eV`,
    /// [ConfigurationError::ShapeMismatch] if an energy input doesn't have one entry per state
    /// and [ConfigurationError::LabelCount] if labels are given but not one per state.
    ///
    /// # Examples
    ///
    /// ```
    /// # use statekin_core::ModelDescription;
    /// # use statekin_solver::solver::KineticModel;
    /// let description = ModelDescription::new(
    ///     vec![1.0, 0.0],
    ///     vec![0.0, 0.0],
    ///     vec![vec![0.0, 10.0], vec![10.0, 0.0]],
    /// );
    /// let mut model = KineticModel::new(&description).unwrap();
    /// model.advance_default(5);
    /// assert_eq!(model.trajectory().len(), 6);
    /// ```
    pub fn new(description: &ModelDescription) -> Result<Self, ConfigurationError> {
        let parameters = description.physical_parameters()?;
        description.validate_shape()?;
        let state_space = description.state_space()?;
        let generator = GeneratorBuilder::new(&description.free_energies,
                                              &description.transition_free_energies,
                                              parameters).build()?;
        let initial = DVector::from_column_slice(&description.initial_conc);
        Ok(KineticModel {
            state_space,
            generator,
            integrator: Integrator::default(),
            time_stamping: TimeStamping::default(),
            delta_time: description.dt,
            trajectory: Trajectory::new(initial),
        })
    }

    pub fn with_time_stamping(mut self, time_stamping: TimeStamping) -> Self {
        self.time_stamping = time_stamping;
        self
    }

    /// Append `time_steps` samples to the trajectory, each `save_every` integrator iterations
    /// of `dt` after the previous one. Continues from the last recorded sample.
    ///
    /// Nothing is checked here: a `dt` too large for the fastest rate of the generator shows
    /// up as diverging populations.
    pub fn advance(&mut self, time_steps: usize, save_every: usize) {
        let increment = self.time_stamping.increment(self.delta_time, time_steps, save_every);
        debug!("Advancing {} samples of {} iterations, time increment {}",
               time_steps, save_every, increment);
        self.trajectory.reserve(time_steps);
        for _ in 0..time_steps {
            let time = self.trajectory.last_time() + increment;
            let population = self.integrator.calculate_folded(&self.generator,
                                                              self.trajectory.last_population(),
                                                              self.delta_time,
                                                              save_every);
            self.trajectory.push(time, population);
        }
    }

    /// [KineticModel::advance] with [DEFAULT_SAVE_EVERY].
    pub fn advance_default(&mut self, time_steps: usize) {
        self.advance(time_steps, DEFAULT_SAVE_EVERY);
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    pub fn state_space(&self) -> &StateSpace {
        &self.state_space
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    pub fn time_stamping(&self) -> TimeStamping {
        self.time_stamping
    }

    /// Data a renderer needs: times, one series per state, labels.
    pub fn render_view(&self) -> RenderView<'_> {
        RenderView::new(&self.trajectory, &self.state_space)
    }

    pub fn into_trajectory(self) -> Trajectory {
        self.trajectory
    }
}
