use na::DVector;
use statekin_core::Trajectory;

/// Total mass of one sample.
pub fn total_population(population: &DVector<f64>) -> f64 {
    population.sum()
}

/// Largest deviation of the total mass of any sample from the initial one.
pub fn conservation_drift(trajectory: &Trajectory) -> f64 {
    let initial = total_population(&trajectory.populations()[0]);
    trajectory
        .populations()
        .iter()
        .map(|population| (total_population(population) - initial).abs())
        .fold(0.0, f64::max)
}

/// Largest change of total mass between two consecutive samples.
pub fn max_step_drift(trajectory: &Trajectory) -> f64 {
    trajectory
        .populations()
        .windows(2)
        .map(|pair| (total_population(&pair[1]) - total_population(&pair[0])).abs())
        .fold(0.0, f64::max)
}

/// Last sample divided by its total mass. Zero mass gives a zero vector.
pub fn final_fractions(trajectory: &Trajectory) -> DVector<f64> {
    let population = trajectory.last_population();
    let total = total_population(population);
    if total == 0.0 {
        DVector::zeros(population.len())
    } else {
        population / total
    }
}
