use crate::game::Scenario;
use crate::game::ScenarioError;
use crate::Exponent;
use crate::Magnitude;
use nalgebra::DMatrix;
use nalgebra::DVector;
use thiserror::Error;

/// The named counter-example constructions, each a pure recipe from a
/// perturbation magnitude to a ready scenario.
///
/// | tag          | agents | data points                      | perturbation        |
/// |--------------|--------|----------------------------------|---------------------|
/// | example1     | 2      | 1, 1                             | +sqrt(d), -sqrt(d)  |
/// | example2     | 4      | 1, 1, 1, 1                       | alternating sqrt(d) |
/// | example3-d\<d\> | d + 1  | basis of R^d, then ones / d      | sqrt(d) each, then -d sqrt(d) |
/// | example4-d\<d\> | d + 2  | basis of R^d, then ones, ones    | zeroes, then +d, -d |
///
/// Every recipe spreads the correction so that sum_i D_i x_i = 0, which
/// keeps the perturbed estimator unbiased. The scalar and basis-average
/// families scale their weights with the square root of the magnitude;
/// the doubled family carries it linearly. The asymmetry is inherited
/// from the constructions being reproduced and is deliberate; do not
/// unify the scalings.
#[derive(Debug, Clone, PartialEq)]
pub enum Family {
    /// two identical scalar observers, one elastic and one reluctant
    ScalarPair,
    /// four identical scalar observers with alternating correction signs
    ScalarQuad,
    /// one observer per coordinate axis plus one averaging observer
    /// carrying the opposing correction weight
    BasisAverage {
        dimension: usize,
        soft: Exponent,
        hard: Exponent,
    },
    /// one observer per coordinate axis plus two duplicated full
    /// observers splitting the correction between them
    BasisDoubled {
        dimension: usize,
        soft: Exponent,
        hard: Exponent,
    },
}

impl Family {
    /// basis-average family with the standard exponent pair
    pub fn basis_average(dimension: usize) -> Self {
        Self::BasisAverage {
            dimension,
            soft: crate::EXPONENT_SOFT,
            hard: crate::EXPONENT_HARD,
        }
    }

    /// basis-doubled family with the standard exponent pair
    pub fn basis_doubled(dimension: usize) -> Self {
        Self::BasisDoubled {
            dimension,
            soft: crate::EXPONENT_SOFT,
            hard: crate::EXPONENT_HARD,
        }
    }

    /// cache key and figure name; dimension-qualified for the d-families
    pub fn tag(&self) -> String {
        match self {
            Self::ScalarPair => "example1".to_string(),
            Self::ScalarQuad => "example2".to_string(),
            Self::BasisAverage { dimension, .. } => format!("example3-d{}", dimension),
            Self::BasisDoubled { dimension, .. } => format!("example4-d{}", dimension),
        }
    }

    pub fn agents(&self) -> usize {
        match self {
            Self::ScalarPair => 2,
            Self::ScalarQuad => 4,
            Self::BasisAverage { dimension, .. } => dimension + 1,
            Self::BasisDoubled { dimension, .. } => dimension + 2,
        }
    }

    pub fn dimension(&self) -> usize {
        match self {
            Self::ScalarPair | Self::ScalarQuad => 1,
            Self::BasisAverage { dimension, .. } | Self::BasisDoubled { dimension, .. } => {
                *dimension
            }
        }
    }

    /// assemble the data points, correction weights, and exponents at one
    /// perturbation magnitude
    pub fn scenario(&self, magnitude: Magnitude) -> Result<Scenario, ScenarioError> {
        match *self {
            Self::ScalarPair => {
                let root = magnitude.sqrt();
                Scenario::new(
                    DMatrix::from_element(2, 1, 1.0),
                    DVector::from_vec(vec![root, -root]),
                    DVector::from_vec(vec![crate::EXPONENT_SOFT, crate::EXPONENT_HARD]),
                )
            }
            Self::ScalarQuad => {
                let root = magnitude.sqrt();
                Scenario::new(
                    DMatrix::from_element(4, 1, 1.0),
                    DVector::from_vec(vec![root, -root, root, -root]),
                    DVector::from_vec(vec![
                        crate::EXPONENT_SOFT,
                        crate::EXPONENT_HARD,
                        crate::EXPONENT_SOFT,
                        crate::EXPONENT_HARD,
                    ]),
                )
            }
            Self::BasisAverage {
                dimension,
                soft,
                hard,
            } => {
                let agents = dimension + 1;
                let root = magnitude.sqrt();
                let data = DMatrix::from_fn(agents, dimension, |row, col| {
                    if row < dimension {
                        if row == col { 1.0 } else { 0.0 }
                    } else {
                        1.0 / dimension as f64
                    }
                });
                let perturbation = DVector::from_fn(agents, |row, _| {
                    if row < dimension {
                        root
                    } else {
                        -(dimension as f64) * root
                    }
                });
                let exponents =
                    DVector::from_fn(agents, |row, _| if row < dimension { soft } else { hard });
                Scenario::new(data, perturbation, exponents)
            }
            Self::BasisDoubled {
                dimension,
                soft,
                hard,
            } => {
                let agents = dimension + 2;
                let data = DMatrix::from_fn(agents, dimension, |row, col| {
                    if row < dimension {
                        if row == col { 1.0 } else { 0.0 }
                    } else {
                        1.0
                    }
                });
                let perturbation = DVector::from_fn(agents, |row, _| {
                    if row == dimension {
                        magnitude
                    } else if row == dimension + 1 {
                        -magnitude
                    } else {
                        0.0
                    }
                });
                let exponents =
                    DVector::from_fn(agents, |row, _| if row < dimension { soft } else { hard });
                Scenario::new(data, perturbation, exponents)
            }
        }
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// tag &str -> Family, the inverse of [`Family::tag`]
impl std::str::FromStr for Family {
    type Err = FamilyError;
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "example1" => Ok(Self::ScalarPair),
            "example2" => Ok(Self::ScalarQuad),
            _ => {
                let unknown = || FamilyError::Unknown(tag.to_string());
                let (name, dimension) = tag.split_once("-d").ok_or_else(unknown)?;
                let dimension = dimension.parse().map_err(|_| unknown())?;
                match name {
                    "example3" => Ok(Self::basis_average(dimension)),
                    "example4" => Ok(Self::basis_doubled(dimension)),
                    _ => Err(unknown()),
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FamilyError {
    #[error(
        "unknown family tag {0:?}, expected example1, example2, example3-d<d>, or example4-d<d>"
    )]
    Unknown(String),
}
