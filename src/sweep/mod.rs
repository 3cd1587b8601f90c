pub mod cache;

pub use cache::*;

use crate::family::Family;
use crate::game::Scenario;
use crate::game::ScenarioError;
use crate::solver::covariance_equilibrium;
use crate::solver::Outcome;
use crate::Cost;
use crate::Magnitude;
use crate::Precision;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// One family swept across a grid of perturbation magnitudes, keeping the
/// equilibrium estimation cost and precision profile at every point.
///
/// The first grid point is always magnitude zero, so costs\[0\] is the
/// plain GLS baseline and any later cost below it is a counter-example
/// to unperturbed estimation being optimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sweep {
    magnitudes: Vec<Magnitude>,
    costs: Vec<Cost>,
    precisions: Vec<Vec<Precision>>,
}

impl Sweep {
    /// evenly spaced magnitudes from zero to reach, endpoints included
    pub fn grid(reach: Magnitude) -> Vec<Magnitude> {
        let span = (crate::SWEEP_GRID_POINTS - 1) as f64;
        (0..crate::SWEEP_GRID_POINTS)
            .map(|i| reach * (i as f64 / span))
            .collect()
    }

    /// solve the family for its equilibrium at every grid point
    pub fn over(family: &Family, reach: Magnitude) -> Result<Self, ScenarioError> {
        let magnitudes = Self::grid(reach);
        let scenarios = magnitudes
            .iter()
            .map(|&magnitude| family.scenario(magnitude))
            .collect::<Result<Vec<Scenario>, ScenarioError>>()?;
        let outcomes = Self::solve(scenarios);
        let (costs, precisions) = magnitudes
            .iter()
            .zip(outcomes)
            .map(|(&magnitude, outcome)| {
                if !outcome.converged() {
                    log::warn!(
                        "descent stalled ({} at magnitude {:e}) ({})",
                        family,
                        magnitude,
                        outcome.diagnostics()
                    );
                }
                log::debug!(
                    "{} at magnitude {:e}: {}",
                    family,
                    magnitude,
                    outcome.diagnostics()
                );
                let equilibrium = outcome.into_equilibrium();
                (equilibrium.cost(), equilibrium.precisions().iter().copied().collect())
            })
            .unzip();
        Ok(Self {
            magnitudes,
            costs,
            precisions,
        })
    }

    /// grid points are independent, so they fan out across threads
    #[cfg(feature = "cli")]
    fn solve(scenarios: Vec<Scenario>) -> Vec<Outcome> {
        use rayon::iter::IntoParallelIterator;
        use rayon::iter::ParallelIterator;
        scenarios
            .into_par_iter()
            .map(|scenario| covariance_equilibrium(&scenario))
            .collect()
    }
    #[cfg(not(feature = "cli"))]
    fn solve(scenarios: Vec<Scenario>) -> Vec<Outcome> {
        scenarios
            .into_iter()
            .map(|scenario| covariance_equilibrium(&scenario))
            .collect()
    }

    pub fn magnitudes(&self) -> &[Magnitude] {
        &self.magnitudes
    }
    pub fn costs(&self) -> &[Cost] {
        &self.costs
    }
    pub fn precisions(&self) -> &[Vec<Precision>] {
        &self.precisions
    }
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// the largest magnitude on the grid, zero when the sweep is empty
    pub fn reach(&self) -> Magnitude {
        self.magnitudes.last().copied().unwrap_or(0.0)
    }

    pub fn agents(&self) -> usize {
        self.precisions.first().map(Vec::len).unwrap_or(0)
    }

    /// one agent's equilibrium precision across the whole grid
    pub fn agent(&self, index: usize) -> Vec<Precision> {
        self.precisions.iter().map(|profile| profile[index]).collect()
    }

    /// the grid point with the cheapest equilibrium estimation cost
    pub fn best(&self) -> Option<(Magnitude, Cost)> {
        self.magnitudes
            .iter()
            .copied()
            .zip(self.costs.iter().copied())
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    }
}

#[derive(Debug, Error)]
pub enum SweepError {
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    #[error(transparent)]
    Cache(#[from] CacheError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grids_span_zero_to_reach() {
        let grid = Sweep::grid(5e-4);
        assert_eq!(grid.len(), crate::SWEEP_GRID_POINTS);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[grid.len() - 1], 5e-4);
        let gap = grid[1] - grid[0];
        for pair in grid.windows(2) {
            assert!((pair[1] - pair[0] - gap).abs() < 1e-17, "uneven spacing");
        }
    }

    #[test]
    fn perturbation_beats_the_baseline_for_the_scalar_pair() {
        let sweep = Sweep::over(&Family::ScalarPair, 5e-4).expect("valid family");
        assert_eq!(sweep.len(), crate::SWEEP_GRID_POINTS);
        assert_eq!(sweep.agents(), 2);
        let baseline = sweep.costs()[0];
        assert!(
            (baseline - 0.9955).abs() < 2e-3,
            "plain GLS equilibrium cost {} drifted",
            baseline
        );
        // the counter-example: every increase in magnitude strictly cheapens
        // the equilibrium over this reach
        for pair in sweep.costs().windows(2) {
            assert!(
                pair[1] < pair[0],
                "cost rose from {} to {} along the sweep",
                pair[0],
                pair[1]
            );
        }
        let terminal = sweep.costs()[sweep.len() - 1];
        assert!(
            baseline - terminal > 4e-3,
            "sweep only saved {}",
            baseline - terminal
        );
    }

    #[test]
    fn best_points_at_the_cheapest_magnitude() {
        let sweep = Sweep::over(&Family::ScalarPair, 5e-4).expect("valid family");
        let (magnitude, cost) = sweep.best().expect("nonempty sweep");
        assert_eq!(magnitude, 5e-4, "decreasing sweep bottoms out at reach");
        assert_eq!(cost, sweep.costs()[sweep.len() - 1]);
    }

    #[test]
    fn reach_reports_the_grid_edge() {
        let sweep = Sweep::over(&Family::ScalarPair, 3e-4).expect("valid family");
        assert_eq!(sweep.reach(), 3e-4);
        assert_eq!(sweep.reach(), sweep.magnitudes()[sweep.len() - 1]);
    }

    #[test]
    fn profiles_keep_their_shape() {
        let sweep = Sweep::over(&Family::basis_average(2), 1e-4).expect("valid family");
        assert_eq!(sweep.agents(), 3);
        for profile in sweep.precisions() {
            assert_eq!(profile.len(), 3);
            for &precision in profile {
                assert!(precision >= crate::PRECISION_FLOOR);
                assert!(precision <= crate::PRECISION_CEIL);
            }
        }
        assert_eq!(sweep.agent(1).len(), sweep.len());
    }
}
