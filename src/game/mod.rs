pub mod estimator;
pub use estimator::*;

pub mod potential;
pub use potential::*;

pub mod privacy;
pub use privacy::*;

pub mod scenario;
pub use scenario::*;
