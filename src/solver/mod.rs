pub mod bounds;
pub use bounds::*;

pub mod descent;
pub use descent::*;

pub mod equilibrium;
pub use equilibrium::*;

pub mod gradient;
pub use gradient::*;

pub mod outcome;
pub use outcome::*;
