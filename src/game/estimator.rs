use crate::Cost;
use crate::Precision;
use nalgebra::Cholesky;
use nalgebra::DMatrix;
use nalgebra::DVector;

/// Weighted information matrix of the reports: M = sum_i L_i x_i x_i^T,
/// assembled as X^T diag(L) X. Symmetric positive definite whenever the
/// data points span R^d and every precision is strictly positive.
pub fn information(precisions: &DVector<Precision>, data: &DMatrix<f64>) -> DMatrix<f64> {
    data.transpose() * DMatrix::from_diagonal(precisions) * data
}

/// What the designer pays for estimating with the perturbed GLS:
/// trace(M^-1) + sum_i D_i^2 / L_i.
///
/// The trace is the variance of plain GLS on the reported precisions; the
/// second term is the extra variance carried by the bias-correcting weights
/// D. The two add because the correction is built to stay unbiased, which
/// makes it uncorrelated with the GLS residual.
///
/// Returns `Cost::INFINITY` when M has no Cholesky factor (rank-deficient
/// data or vanished precisions), which a bounded minimizer treats as a
/// rejected point. Callers keep every precision strictly positive; a zero
/// precision paired with a nonzero correction weight divides by zero.
pub fn estimation_cost(
    precisions: &DVector<Precision>,
    data: &DMatrix<f64>,
    perturbation: &DVector<f64>,
) -> Cost {
    match Cholesky::new(information(precisions, data)) {
        None => Cost::INFINITY,
        Some(factor) => {
            let gls = factor.inverse().trace();
            let correction = perturbation
                .iter()
                .zip(precisions.iter())
                .map(|(d, l)| d * d / l)
                .sum::<Cost>();
            gls + correction
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_information_adds_precisions() {
        let data = DMatrix::from_element(2, 1, 1.0);
        let precisions = DVector::from_vec(vec![0.25, 0.25]);
        let matrix = information(&precisions, &data);
        assert_eq!(matrix.nrows(), 1);
        assert!((matrix[(0, 0)] - 0.5).abs() < 1e-15, "{}", matrix[(0, 0)]);
    }

    #[test]
    fn information_accumulates_outer_products() {
        // basis rows plus an all-ones row: M = diag(1, 2) + 3 * ones
        let data = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        let precisions = DVector::from_vec(vec![1.0, 2.0, 3.0]);
        let matrix = information(&precisions, &data);
        let expected = [(0, 0, 4.0), (0, 1, 3.0), (1, 0, 3.0), (1, 1, 5.0)];
        for (row, col, value) in expected {
            assert!(
                (matrix[(row, col)] - value).abs() < 1e-12,
                "M[{},{}]: {} != {}",
                row,
                col,
                matrix[(row, col)],
                value
            );
        }
    }

    #[test]
    fn plain_gls_is_the_inverse_trace() {
        let data = DMatrix::from_element(2, 1, 1.0);
        let precisions = DVector::from_vec(vec![0.25, 0.25]);
        let silent = DVector::zeros(2);
        let cost = estimation_cost(&precisions, &data, &silent);
        assert!((cost - 2.0).abs() < 1e-12, "1/(1/4 + 1/4): {}", cost);
    }

    #[test]
    fn correction_pays_per_agent_variance() {
        let data = DMatrix::from_element(2, 1, 1.0);
        let precisions = DVector::from_vec(vec![0.5, 0.5]);
        let perturbation = DVector::from_vec(vec![1.0, -1.0]);
        let cost = estimation_cost(&precisions, &data, &perturbation);
        // 1/(0.5 + 0.5) + 1/0.5 + 1/0.5
        assert!((cost - 5.0).abs() < 1e-12, "{}", cost);
    }

    #[test]
    fn two_dimensional_trace_matches_closed_form() {
        let data = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        let precisions = DVector::from_vec(vec![1.0, 2.0, 3.0]);
        let silent = DVector::zeros(3);
        // M = [[4, 3], [3, 5]], trace of inverse = 9 / 11
        let cost = estimation_cost(&precisions, &data, &silent);
        assert!((cost - 9.0 / 11.0).abs() < 1e-12, "{}", cost);
    }

    #[test]
    fn rank_deficient_data_is_infinitely_costly() {
        // both agents observe the same axis of R^2
        let data = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 1.0, 0.0]);
        let precisions = DVector::from_vec(vec![1.0, 1.0]);
        let silent = DVector::zeros(2);
        assert!(estimation_cost(&precisions, &data, &silent).is_infinite());
    }

    #[test]
    fn vanished_precisions_are_infinitely_costly() {
        let data = DMatrix::from_element(2, 1, 1.0);
        let precisions = DVector::zeros(2);
        let silent = DVector::zeros(2);
        assert!(estimation_cost(&precisions, &data, &silent).is_infinite());
    }
}
