use super::bounds::Bounds;
use super::descent::Descent;
use super::outcome::Outcome;
use crate::game::Scenario;
use nalgebra::DVector;

/// Nash equilibrium of the covariance game: the precision profile where
/// no agent can lower its own total cost by unilaterally changing its
/// report.
///
/// Because the game is an exact potential game, the equilibrium is the
/// minimizer of the scenario's potential over the default box, searched
/// from the uniform all-ones profile. The reported cost is the designer's
/// estimation cost at that minimizer, not the potential itself.
pub fn covariance_equilibrium(scenario: &Scenario) -> Outcome {
    equilibrium_within(scenario, Bounds::default())
}

/// same search under a caller-chosen box
pub fn equilibrium_within(scenario: &Scenario, bounds: Bounds) -> Outcome {
    let seed = DVector::from_element(scenario.agents(), crate::PRECISION_SEED);
    Descent::new(scenario, bounds).minimize(seed)
}
