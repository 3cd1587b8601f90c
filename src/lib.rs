//! Equilibria of strategic data sourcing under generalized least squares.
//!
//! A designer estimates a linear model from measurements sold by strategic
//! agents. Each agent chooses the precision of its own report and pays a
//! monomial privacy cost for it, while every agent also shares the
//! designer's estimation cost: the GLS variance plus the variance carried
//! by an unbiased bias-correcting perturbation of the estimator. Under
//! this cost structure the game is an exact potential game, so its Nash
//! equilibrium is the minimizer of one scalar potential, located here by
//! bounded projected gradient descent from a uniform starting profile.
//!
//! Sweeping the perturbation magnitude across a grid produces the
//! counter-examples this crate exists for: at equilibrium, a well chosen
//! perturbation makes the designer strictly better off than plain GLS.

pub mod family;
pub mod game;
#[cfg(feature = "plot")]
pub mod plot;
pub mod solver;
pub mod sweep;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Inverse variance of one agent's reported measurement.
pub type Precision = f64;
/// Objective values: estimation cost, privacy cost, potential.
pub type Cost = f64;
/// Size of the bias-correcting perturbation along a sweep.
pub type Magnitude = f64;
/// Curvature of an agent's monomial privacy cost.
pub type Exponent = f64;

// ============================================================================
// PRECISION BOX
// Feasible interval for every agent's precision during a solve.
// ============================================================================
/// Lower bound, strictly positive so the information matrix stays invertible.
pub const PRECISION_FLOOR: Precision = 1e-10;
/// Upper bound, matching the cost normalization of the examples.
pub const PRECISION_CEIL: Precision = 1.0;
/// Starting value for every coordinate of each solve.
pub const PRECISION_SEED: Precision = 1.0;

// ============================================================================
// PRIVACY COST
// Per-agent monomial (precision / scale)^exponent.
// ============================================================================
/// Precision at which an agent's privacy cost reaches one.
pub const PRIVACY_SCALE: Precision = 1.0;
/// Near-linear curvature: this agent's precision is highly elastic.
pub const EXPONENT_SOFT: Exponent = 1.01;
/// Steep curvature: this agent resists precision above the scale.
pub const EXPONENT_HARD: Exponent = 20.0;

// ============================================================================
// PROJECTED GRADIENT DESCENT
// Armijo backtracking line search with Barzilai-Borwein step seeding.
// ============================================================================
/// Iteration cap for one bounded minimization.
pub const DESCENT_ITERATIONS: usize = 4096;
/// Relative decrease below which the objective has stalled:
/// (f - f') <= DESCENT_FTOL * max(|f|, |f'|, 1). Below f64 resolution,
/// so it fires only when the potential stops improving at all.
pub const DESCENT_FTOL: Cost = 1e-20;
/// Sup-norm of the projected gradient certifying convergence.
pub const DESCENT_PGTOL: f64 = 1e-8;
/// Relative half-width of the central difference stencil, near
/// cbrt(f64::EPSILON), balancing truncation against cancellation.
pub const DIFFERENCE_SCALE: f64 = 6e-6;
/// Fraction of the first-order decrease a trial step must realize.
pub const ARMIJO_SLOPE: f64 = 1e-4;
/// Step shrink factor between backtracks.
pub const ARMIJO_SHRINK: f64 = 0.5;
/// Backtracks before the line search gives up.
pub const ARMIJO_BACKTRACKS: usize = 64;
/// Smallest admissible trial step.
pub const STEP_FLOOR: f64 = 1e-16;
/// Largest admissible trial step.
pub const STEP_CEIL: f64 = 1e8;

// ============================================================================
// SWEEPS
// ============================================================================
/// Grid points per sweep, evenly spaced from zero to the reach, inclusive.
pub const SWEEP_GRID_POINTS: usize = 100;
/// Default location of the sweep cache.
pub const CACHE_FILE: &str = "sweeps.json";
/// Default output directory for the figure set.
pub const FIGURES_DIR: &str = "figures";

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "cli")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
