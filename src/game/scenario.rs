use super::estimator::estimation_cost;
use super::potential::potential;
use crate::Cost;
use crate::Exponent;
use crate::Precision;
use nalgebra::DMatrix;
use nalgebra::DVector;
use thiserror::Error;

/// One instance of the data sourcing game: who observes what, how the
/// bias-correcting perturbation is spread across agents, and how much
/// each agent resents precision.
///
/// Construction is the validation boundary. Everything downstream of a
/// `Scenario` assumes shapes agree, every entry is finite, and every
/// exponent is strictly above one, the curvature needed for a strictly
/// convex privacy cost and an interior equilibrium. Unbiasedness of the
/// perturbation (sum_i D_i x_i = 0) is the builder's responsibility, not
/// re-checked here.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    data: DMatrix<f64>,
    perturbation: DVector<f64>,
    exponents: DVector<Exponent>,
}

impl Scenario {
    pub fn new(
        data: DMatrix<f64>,
        perturbation: DVector<f64>,
        exponents: DVector<Exponent>,
    ) -> Result<Self, ScenarioError> {
        let agents = data.nrows();
        if agents == 0 {
            return Err(ScenarioError::Empty);
        }
        if data.ncols() == 0 {
            return Err(ScenarioError::Dataless);
        }
        if perturbation.len() != agents {
            return Err(ScenarioError::Perturbation {
                agents,
                found: perturbation.len(),
            });
        }
        if exponents.len() != agents {
            return Err(ScenarioError::Exponents {
                agents,
                found: exponents.len(),
            });
        }
        for row in 0..agents {
            for col in 0..data.ncols() {
                let value = data[(row, col)];
                if !value.is_finite() {
                    return Err(ScenarioError::Measurement {
                        agent: row,
                        axis: col,
                        value,
                    });
                }
            }
        }
        for (agent, &weight) in perturbation.iter().enumerate() {
            if !weight.is_finite() {
                return Err(ScenarioError::Correction { agent, weight });
            }
        }
        for (index, &exponent) in exponents.iter().enumerate() {
            if !(exponent > 1.0) || !exponent.is_finite() {
                return Err(ScenarioError::Curvature { index, exponent });
            }
        }
        Ok(Self {
            data,
            perturbation,
            exponents,
        })
    }

    /// how many agents sell measurements
    pub fn agents(&self) -> usize {
        self.data.nrows()
    }

    /// dimension of the model being estimated
    pub fn dimension(&self) -> usize {
        self.data.ncols()
    }

    /// one data point per row
    pub fn data(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// bias-correcting weight per agent
    pub fn perturbation(&self) -> &DVector<f64> {
        &self.perturbation
    }

    /// privacy curvature per agent
    pub fn exponents(&self) -> &DVector<Exponent> {
        &self.exponents
    }

    /// the designer's cost at a precision profile
    pub fn estimation(&self, precisions: &DVector<Precision>) -> Cost {
        estimation_cost(precisions, &self.data, &self.perturbation)
    }

    /// the scalar whose minimizer is the Nash equilibrium
    pub fn potential(&self, precisions: &DVector<Precision>) -> Cost {
        potential(precisions, &self.data, &self.perturbation, &self.exponents)
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} agents observing R^{}", self.agents(), self.dimension())
    }
}

/// Fail-fast configuration mistakes, caught before any arithmetic runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScenarioError {
    #[error("scenario has no agents")]
    Empty,
    #[error("data points have zero dimension")]
    Dataless,
    #[error("perturbation has {found} weights for {agents} agents")]
    Perturbation { agents: usize, found: usize },
    #[error("exponent vector has {found} entries for {agents} agents")]
    Exponents { agents: usize, found: usize },
    #[error("agent {agent} has non-finite measurement {value} on axis {axis}")]
    Measurement {
        agent: usize,
        axis: usize,
        value: f64,
    },
    #[error("agent {agent} has non-finite correction weight {weight}")]
    Correction { agent: usize, weight: f64 },
    #[error("agent {index} has exponent {exponent}, convexity needs exponents above one")]
    Curvature { index: usize, exponent: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> Scenario {
        Scenario::new(
            DMatrix::from_element(2, 1, 1.0),
            DVector::zeros(2),
            DVector::from_vec(vec![crate::EXPONENT_SOFT, crate::EXPONENT_HARD]),
        )
        .expect("valid scenario")
    }

    #[test]
    fn shapes_are_reported() {
        let scenario = pair();
        assert_eq!(scenario.agents(), 2);
        assert_eq!(scenario.dimension(), 1);
        assert_eq!(scenario.to_string(), "2 agents observing R^1");
    }

    #[test]
    fn empty_scenarios_are_rejected() {
        let verdict = Scenario::new(
            DMatrix::zeros(0, 1),
            DVector::zeros(0),
            DVector::zeros(0),
        );
        assert_eq!(verdict, Err(ScenarioError::Empty));
    }

    #[test]
    fn dimensionless_data_is_rejected() {
        let verdict = Scenario::new(
            DMatrix::zeros(2, 0),
            DVector::zeros(2),
            DVector::from_vec(vec![2.0, 2.0]),
        );
        assert_eq!(verdict, Err(ScenarioError::Dataless));
    }

    #[test]
    fn mismatched_perturbation_is_rejected() {
        let verdict = Scenario::new(
            DMatrix::from_element(2, 1, 1.0),
            DVector::zeros(3),
            DVector::from_vec(vec![2.0, 2.0]),
        );
        assert_eq!(
            verdict,
            Err(ScenarioError::Perturbation {
                agents: 2,
                found: 3
            })
        );
    }

    #[test]
    fn mismatched_exponents_are_rejected() {
        let verdict = Scenario::new(
            DMatrix::from_element(2, 1, 1.0),
            DVector::zeros(2),
            DVector::from_vec(vec![2.0]),
        );
        assert_eq!(
            verdict,
            Err(ScenarioError::Exponents {
                agents: 2,
                found: 1
            })
        );
    }

    #[test]
    fn flat_curvature_is_rejected() {
        for bad in [1.0, 0.5, 0.0, -3.0, f64::NAN] {
            let verdict = Scenario::new(
                DMatrix::from_element(2, 1, 1.0),
                DVector::zeros(2),
                DVector::from_vec(vec![2.0, bad]),
            );
            assert!(
                matches!(verdict, Err(ScenarioError::Curvature { index: 1, .. })),
                "exponent {} must be rejected",
                bad
            );
        }
    }

    #[test]
    fn non_finite_entries_are_rejected() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let verdict = Scenario::new(
                DMatrix::from_element(2, 1, bad),
                DVector::zeros(2),
                DVector::from_vec(vec![2.0, 2.0]),
            );
            assert!(
                matches!(
                    verdict,
                    Err(ScenarioError::Measurement {
                        agent: 0,
                        axis: 0,
                        ..
                    })
                ),
                "data entry {} must be rejected",
                bad
            );
            let verdict = Scenario::new(
                DMatrix::from_element(2, 1, 1.0),
                DVector::from_vec(vec![0.0, bad]),
                DVector::from_vec(vec![2.0, 2.0]),
            );
            assert!(
                matches!(verdict, Err(ScenarioError::Correction { agent: 1, .. })),
                "correction weight {} must be rejected",
                bad
            );
        }
    }

    #[test]
    fn costs_delegate_to_the_primitives() {
        let scenario = pair();
        let precisions = DVector::from_vec(vec![0.25, 0.25]);
        assert!((scenario.estimation(&precisions) - 2.0).abs() < 1e-12);
        let by_hand = 2.0
            + crate::game::privacy_cost(0.25, crate::EXPONENT_SOFT, crate::PRIVACY_SCALE)
            + crate::game::privacy_cost(0.25, crate::EXPONENT_HARD, crate::PRIVACY_SCALE);
        assert!((scenario.potential(&precisions) - by_hand).abs() < 1e-12);
    }
}
