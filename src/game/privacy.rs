use crate::Cost;
use crate::Exponent;
use crate::Precision;

/// What one agent pays out of pocket for reporting at a given precision:
/// the monomial (precision / scale)^exponent.
///
/// The scale is the precision at which the cost reaches one; the exponent
/// sets how steeply the cost grows past it. Exponents above one make the
/// marginal cost of precision increasing, which is what pins every agent's
/// best response in the interior of the feasible box instead of at a corner.
///
/// Domain: precision >= 0, scale > 0, exponent > 0. Outside of it the
/// monomial goes complex; construction-time validation keeps callers away.
pub fn privacy_cost(precision: Precision, exponent: Exponent, scale: Precision) -> Cost {
    (precision / scale).powf(exponent)
}
