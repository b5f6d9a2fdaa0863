use crate::{Error, Solver, ComputeDescriptor};
use crate::rlc::Transient;

/// Describes the composition of an `AnalyticSolver`.
pub struct AnalyticSolverDescriptor<T: Transient> {
    pub circuit: T,
}

/// Evaluates a closed-form circuit response at each sample time.
pub struct AnalyticSolver<T: Transient> {
    circuit: T,
}

impl<T: Transient> AnalyticSolver<T> {
    #[inline]
    pub fn new(desc: AnalyticSolverDescriptor<T>) -> Self {
        Self {
            circuit: desc.circuit,
        }
    }

    pub fn circuit(&self) -> &T {
        &self.circuit
    }
}

impl<T: Transient> Solver for AnalyticSolver<T> {
    #[inline]
    fn compute(&self, desc: ComputeDescriptor) -> Result<ndarray::Array1<f64>, Error> {
        let mut charges = ndarray::Array1::<f64>::zeros(desc.times.len());

        ndarray::Zip::from(&mut charges)
            .and(&desc.times)
            .for_each(|q, &t| {
                *q = self.circuit.charge(t);

                if let Some(ref bar) = desc.bar {
                    bar.inc(1)
                }
            });

        Ok(charges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rlc::{SeriesRlc, SeriesRlcDescriptor};

    #[test]
    fn computes_one_charge_per_time() {
        let solver = AnalyticSolver::new(AnalyticSolverDescriptor {
            circuit: SeriesRlc::new(SeriesRlcDescriptor {
                voltage: 10.0,
                capacitance: 1e-8,
                inductance: 1e-2,
                resistance: 7.5,
            })
            .unwrap(),
        });
        let times = ndarray::Array1::linspace(0.0, 1e-3, 11);

        let charges = solver
            .compute(ComputeDescriptor {
                times: times.view(),
                bar: &None,
            })
            .unwrap();

        assert_eq!(charges.len(), times.len());
        for (&t, &q) in times.iter().zip(charges.iter()) {
            assert_eq!(q, solver.circuit().charge(t));
        }
    }

    #[test]
    fn bar_advances_once_per_sample() {
        let solver = AnalyticSolver::new(AnalyticSolverDescriptor {
            circuit: SeriesRlc::new(SeriesRlcDescriptor {
                voltage: 10.0,
                capacitance: 1e-8,
                inductance: 1e-2,
                resistance: 7.5,
            })
            .unwrap(),
        });
        let times = ndarray::Array1::linspace(0.0, 1e-3, 101);
        let bar = Some(indicatif::ProgressBar::hidden());

        solver
            .compute(ComputeDescriptor {
                times: times.view(),
                bar: &bar,
            })
            .unwrap();

        assert_eq!(bar.unwrap().position(), 101);
    }
}
