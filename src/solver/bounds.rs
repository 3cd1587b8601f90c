use crate::Precision;
use nalgebra::DVector;
use thiserror::Error;

/// The feasible box of one solve: every agent's precision is kept inside
/// [floor, ceil]. The floor is strictly positive so the information matrix
/// never loses rank along the descent path and no correction weight
/// divides by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    floor: Precision,
    ceil: Precision,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            floor: crate::PRECISION_FLOOR,
            ceil: crate::PRECISION_CEIL,
        }
    }
}

impl Bounds {
    pub fn new(floor: Precision, ceil: Precision) -> Result<Self, BoundsError> {
        if !floor.is_finite() || floor <= 0.0 {
            Err(BoundsError::Floor { floor })
        } else if !ceil.is_finite() || ceil <= floor {
            Err(BoundsError::Ceil { floor, ceil })
        } else {
            Ok(Self { floor, ceil })
        }
    }

    pub fn floor(&self) -> Precision {
        self.floor
    }

    pub fn ceil(&self) -> Precision {
        self.ceil
    }

    /// nearest feasible value
    pub fn clamp(&self, precision: Precision) -> Precision {
        precision.clamp(self.floor, self.ceil)
    }

    /// nearest feasible profile, in place
    pub fn project(&self, precisions: &mut DVector<Precision>) {
        for precision in precisions.iter_mut() {
            *precision = self.clamp(*precision);
        }
    }
}

/// A box the solver refuses to search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoundsError {
    #[error("floor must be finite and strictly positive, got {floor}")]
    Floor { floor: f64 },
    #[error("ceil must be finite and above the floor, got [{floor}, {ceil}]")]
    Ceil { floor: f64, ceil: f64 },
}
