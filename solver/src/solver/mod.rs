mod generator;
mod integrator;
mod model;

pub use generator::*;
pub use integrator::*;
pub use model::*;
