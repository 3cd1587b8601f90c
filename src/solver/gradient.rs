use super::bounds::Bounds;
use crate::Cost;
use crate::Precision;
use nalgebra::DVector;

/// Central difference gradient of the objective at a feasible point.
///
/// Each coordinate is probed at `point +- h` with `h` scaled to the
/// coordinate's size, and both probes are clamped into the box so the
/// objective is never sampled where it is undefined. At a bound the
/// stencil degrades to the one-sided difference, which is exactly the
/// derivative a projected step can act on there.
pub fn gradient<F>(objective: &F, point: &DVector<Precision>, bounds: &Bounds) -> DVector<f64>
where
    F: Fn(&DVector<Precision>) -> Cost,
{
    let mut slopes = DVector::zeros(point.len());
    let mut probe = point.clone();
    for index in 0..point.len() {
        let center = point[index];
        let width = crate::DIFFERENCE_SCALE * center.abs().max(1.0);
        let above = bounds.clamp(center + width);
        let below = bounds.clamp(center - width);
        probe[index] = above;
        let high = objective(&probe);
        probe[index] = below;
        let low = objective(&probe);
        probe[index] = center;
        slopes[index] = if above > below {
            (high - low) / (above - below)
        } else {
            0.0
        };
    }
    slopes
}
