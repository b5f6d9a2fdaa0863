use crate::{ComputeDescriptor, Error, Solver};
use crate::rlc::{AnalyticSolver, AnalyticSolverDescriptor, SeriesRlc, SeriesRlcDescriptor};

/// The largest number of samples a single run will hold in memory.
pub const MAX_SAMPLES: usize = 100_000_000;

/// Ratios this close to an integer count as exact multiples of the time step.
const STEP_RATIO_ULPS: f64 = 4.0;

/// Simulation specific parameters.
#[derive(Copy, Clone, Debug)]
pub struct SimulationParameters {
    /// The time of the last requested sample [s].
    pub t_end: f64,
    /// The length of each temporal step in the simulation [s].
    pub t_step: f64,
}

impl SimulationParameters {
    /// Number of samples in a run, including `t = 0`.
    ///
    /// This is `ceil(t_end / t_step) + 1`, so the last sample lands at or just
    /// after `t_end`. A ratio within `STEP_RATIO_ULPS` of an integer counts as
    /// that integer before the ceiling is taken, so `0.001 / 0.000001`
    /// (`1000.0000000000001` in f64) gives 1001 samples, not 1002.
    pub fn nsamples(&self) -> Result<usize, Error> {
        let SimulationParameters { t_end, t_step } = *self;
        let timing_ok = t_end.is_finite() && t_end > 0.0 && t_step.is_finite() && t_step > 0.0;
        if !timing_ok {
            return Err(Error::InvalidTiming { t_end, t_step });
        }

        let ratio = t_end / t_step;
        let nearest = ratio.round();
        let nsteps = if (ratio - nearest).abs() <= STEP_RATIO_ULPS * f64::EPSILON * nearest {
            nearest
        } else {
            ratio.ceil()
        };

        if !(nsteps.is_finite() && nsteps < MAX_SAMPLES as f64) {
            return Err(Error::TooManySamples {
                requested: nsteps + 1.0,
                limit: MAX_SAMPLES,
            });
        }

        Ok(nsteps as usize + 1)
    }
}

/// Sampled capacitor charge over time.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeries {
    times: ndarray::Array1<f64>,
    charges: ndarray::Array1<f64>,
}

impl TimeSeries {
    /// Pairs up sample times with their charges.
    pub fn new(
        times: ndarray::Array1<f64>,
        charges: ndarray::Array1<f64>,
    ) -> Result<Self, Error> {
        if charges.len() != times.len() {
            return Err(Error::BadInit {
                array_name: "Charge".to_string(),
                input_length: charges.len(),
                expected_length: times.len(),
            });
        }

        Ok(Self { times, charges })
    }

    /// Sample times [s].
    pub fn times(&self) -> ndarray::ArrayView1<'_, f64> {
        self.times.view()
    }

    /// Capacitor charge at each sample time [C].
    pub fn charges(&self) -> ndarray::ArrayView1<'_, f64> {
        self.charges.view()
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Iterates over `(t, q)` pairs in time order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.charges.iter().copied())
    }
}

/// Describes a simulation.
pub struct SimulationDescriptor<S: Solver> {
    /// The `Solver` for the simulation.
    pub solver: S,
    /// The parameters for the simulation.
    pub sim_params: SimulationParameters,
}

/// Describes a simulation run.
#[derive(Default)]
pub struct RunDescriptor {
    /// Whether or not to print information to the console.
    pub verbose: bool,
}

/// The main `struct` of the framework.
pub struct Simulation<S: Solver> {
    solver: S,
    sim_params: SimulationParameters,
}

impl<S: Solver> Simulation<S> {
    /// Creates a new `Simulation` instance.
    #[inline]
    pub fn new(desc: SimulationDescriptor<S>) -> Result<Self, Error> {
        // reject bad time windows before anything is allocated
        desc.sim_params.nsamples()?;

        Ok(Self {
            solver: desc.solver,
            sim_params: desc.sim_params,
        })
    }

    /// Does a computational run.
    #[inline]
    pub fn run(&self, desc: RunDescriptor) -> Result<TimeSeries, Error> {
        let nsamples = self.sim_params.nsamples()?;
        let t_step = self.sim_params.t_step;
        let times = ndarray::Array1::from_shape_fn(nsamples, |i| (i as f64) * t_step);

        // setup output if verbose
        let bar = if desc.verbose {
            println!("# of samples: {}", nsamples);
            Some(indicatif::ProgressBar::new(nsamples as u64))
        } else {
            None
        };

        let charges = self.solver.compute(ComputeDescriptor {
            times: times.view(),
            bar: &bar,
        })?;

        if let Some(ref bar) = bar {
            bar.finish();
        }

        tracing::info!(nsamples, t_step, "transient run finished");

        TimeSeries::new(times, charges)
    }
}

/// Computes the charge response of an underdamped series RLC circuit.
///
/// Inputs are expected to have passed [`crate::params::validate`]; anything
/// outside the underdamped regime or with a non-positive time window is
/// still rejected with an error rather than producing NaN samples.
pub fn simulate(
    voltage: f64,
    capacitance: f64,
    inductance: f64,
    resistance: f64,
    t_end: f64,
    t_step: f64,
) -> Result<TimeSeries, Error> {
    let circuit = SeriesRlc::new(SeriesRlcDescriptor {
        voltage,
        capacitance,
        inductance,
        resistance,
    })?;
    tracing::debug!(
        alpha = circuit.alpha(),
        omega_0 = circuit.natural_frequency(),
        omega = circuit.damped_frequency(),
        "series RLC circuit"
    );

    let simulation = Simulation::new(SimulationDescriptor {
        solver: AnalyticSolver::new(AnalyticSolverDescriptor { circuit }),
        sim_params: SimulationParameters { t_end, t_step },
    })?;

    simulation.run(RunDescriptor::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_count_is_ceiling_plus_one() {
        let exact = SimulationParameters { t_end: 1.0, t_step: 0.25 };
        assert_eq!(exact.nsamples().unwrap(), 5);

        let partial = SimulationParameters { t_end: 1.0, t_step: 0.3 };
        assert_eq!(partial.nsamples().unwrap(), 5);

        let single = SimulationParameters { t_end: 0.1, t_step: 1.0 };
        assert_eq!(single.nsamples().unwrap(), 2);
    }

    #[test]
    fn rounding_noise_does_not_add_a_sample() {
        // 0.001 / 0.000001 evaluates to 1000.0000000000001
        let params = SimulationParameters { t_end: 0.001, t_step: 0.000001 };
        assert_eq!(params.nsamples().unwrap(), 1001);
    }

    #[test]
    fn fraction_just_above_integer_rounds_up() {
        // 1e-9 past a whole step is far more than rounding noise
        let params = SimulationParameters { t_end: 1.0 + 1e-9, t_step: 1.0 };
        assert_eq!(params.nsamples().unwrap(), 3);

        let params = SimulationParameters { t_end: 1.000001e-3, t_step: 1e-6 };
        assert_eq!(params.nsamples().unwrap(), 1002);
    }

    #[test]
    fn bad_timing_is_rejected() {
        for (t_end, t_step) in [
            (1.0, 0.0),
            (1.0, -1e-3),
            (0.0, 1e-3),
            (1.0, f64::NAN),
            (f64::INFINITY, 1e-3),
        ] {
            let params = SimulationParameters { t_end, t_step };
            assert!(
                matches!(params.nsamples(), Err(Error::InvalidTiming { .. })),
                "t_end={}, t_step={}", t_end, t_step,
            );
        }
    }

    #[test]
    fn huge_sample_counts_are_rejected() {
        let params = SimulationParameters { t_end: 1e300, t_step: 1e-300 };
        assert!(matches!(params.nsamples(), Err(Error::TooManySamples { .. })));

        let params = SimulationParameters { t_end: 1.0, t_step: 1e-8 };
        assert!(matches!(params.nsamples(), Err(Error::TooManySamples { .. })));
    }

    #[test]
    fn mismatched_series_is_rejected() {
        let result = TimeSeries::new(
            ndarray::Array1::zeros(3),
            ndarray::Array1::zeros(2),
        );

        match result {
            Err(Error::BadInit { input_length, expected_length, .. }) => {
                assert_eq!(input_length, 2);
                assert_eq!(expected_length, 3);
            }
            other => panic!("expected BadInit, got {:?}", other),
        }
    }

    #[test]
    fn last_sample_may_pass_end_time() {
        let series = simulate(10.0, 1e-8, 1e-2, 7.5, 1.0e-5, 3.0e-6).unwrap();

        assert_eq!(series.len(), 5);
        let last = series.times()[series.len() - 1];
        assert!((last - 1.2e-5).abs() < 1e-18);
        assert!(last > 1.0e-5);
    }

    #[test]
    fn overdamped_circuit_produces_no_series() {
        let result = simulate(10.0, 1e-7, 1e-3, 1000.0, 1e-3, 1e-6);
        assert!(matches!(result, Err(Error::NotUnderdamped { .. })));
    }
}
