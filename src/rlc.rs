//! Series RLC circuit models.

mod analytic_solver;
mod series_rlc;

pub use analytic_solver::{AnalyticSolver, AnalyticSolverDescriptor};
pub use series_rlc::{SeriesRlc, SeriesRlcDescriptor};

/// Describes the charge response of a circuit after the source is applied.
pub trait Transient {
    /// The charge on the capacitor at `t`, in coulombs.
    fn charge(&self, t: f64) -> f64;

    /// The charge on the capacitor at `t = 0`.
    fn initial_charge(&self) -> f64 {
        self.charge(0.0)
    }
}
