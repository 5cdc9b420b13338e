mod constants;
mod error;
mod parameters;
mod save_data;
mod state_space;
mod trajectory;
mod units;
extern crate nalgebra as na;
extern crate serde;

pub use constants::*;
pub use error::*;
pub use parameters::*;
pub use save_data::*;
pub use state_space::StateSpace;
pub use trajectory::{RenderView, Trajectory};
pub use units::EnergyUnit;
