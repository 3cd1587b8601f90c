use crate::Cost;
use crate::Precision;
use nalgebra::DVector;

/// Where the game settles: the estimation cost the designer pays at
/// equilibrium, and the precision every agent reports there.
#[derive(Debug, Clone, PartialEq)]
pub struct Equilibrium {
    cost: Cost,
    precisions: DVector<Precision>,
}

impl Equilibrium {
    pub fn new(cost: Cost, precisions: DVector<Precision>) -> Self {
        Self { cost, precisions }
    }

    /// estimation cost at the equilibrium profile, the quantity the sweeps plot
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// equilibrium precision per agent
    pub fn precisions(&self) -> &DVector<Precision> {
        &self.precisions
    }
}

/// Termination bookkeeping of one bounded minimization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diagnostics {
    iterations: usize,
    potential: Cost,
    stationarity: f64,
}

impl Diagnostics {
    pub fn new(iterations: usize, potential: Cost, stationarity: f64) -> Self {
        Self {
            iterations,
            potential,
            stationarity,
        }
    }

    /// descent iterations spent
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// potential value at the final iterate
    pub fn potential(&self) -> Cost {
        self.potential
    }

    /// sup norm of the projected gradient at the final iterate
    pub fn stationarity(&self) -> f64 {
        self.stationarity
    }
}

impl std::fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} iterations, potential {:.6e}, stationarity {:.3e}",
            self.iterations, self.potential, self.stationarity
        )
    }
}

/// Exit status of one solve. Both arms carry the best point found; the
/// tag says whether a tolerance certified it or the iteration budget ran
/// out first. Callers decide how loudly to complain about the latter.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// a stopping tolerance was met
    Converged(Equilibrium, Diagnostics),
    /// iterations or the line search ran out before any tolerance was met
    Exhausted(Equilibrium, Diagnostics),
}

impl Outcome {
    pub fn converged(&self) -> bool {
        matches!(self, Self::Converged(..))
    }

    pub fn equilibrium(&self) -> &Equilibrium {
        match self {
            Self::Converged(equilibrium, _) => equilibrium,
            Self::Exhausted(equilibrium, _) => equilibrium,
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        match self {
            Self::Converged(_, diagnostics) => diagnostics,
            Self::Exhausted(_, diagnostics) => diagnostics,
        }
    }

    pub fn into_equilibrium(self) -> Equilibrium {
        match self {
            Self::Converged(equilibrium, _) => equilibrium,
            Self::Exhausted(equilibrium, _) => equilibrium,
        }
    }
}
