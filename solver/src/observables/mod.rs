mod population;

pub use population::*;
