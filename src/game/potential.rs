use super::estimator::estimation_cost;
use super::privacy::privacy_cost;
use crate::Cost;
use crate::Exponent;
use crate::Precision;
use nalgebra::DMatrix;
use nalgebra::DVector;

/// Exact potential of the data sourcing game: the shared estimation cost
/// plus every agent's private monomial.
///
/// Each agent minimizes its own total, privacy_cost(L_i) plus the shared
/// estimation_cost(L); the cross partials of the shared term are identical
/// for every agent, so the marginal any agent feels is exactly the marginal
/// of this one scalar. Minimizing it over the whole precision profile
/// therefore lands on a point where no agent can improve unilaterally: a
/// Nash equilibrium. That equivalence is what lets a plain bounded
/// minimizer stand in for best-response dynamics.
pub fn potential(
    precisions: &DVector<Precision>,
    data: &DMatrix<f64>,
    perturbation: &DVector<f64>,
    exponents: &DVector<Exponent>,
) -> Cost {
    estimation_cost(precisions, data, perturbation)
        + precisions
            .iter()
            .zip(exponents.iter())
            .map(|(&precision, &exponent)| {
                privacy_cost(precision, exponent, crate::PRIVACY_SCALE)
            })
            .sum::<Cost>()
}
