//! A framework for simulating the transient charge response of a series RLC circuit.
//!
//! Raw parameter strings are checked with [`params::validate`], and a passing
//! [`params::ParameterSet`] is turned into a [`TimeSeries`] of capacitor charge
//! samples. The series can then be written to a flat text file with
//! [`output`] and drawn as a line chart with [`plot`].

mod simulation;

pub mod output;
pub mod params;
pub mod plot;
pub mod prelude;
pub mod rlc;

pub use simulation::{
    simulate, RunDescriptor, Simulation, SimulationDescriptor, SimulationParameters, TimeSeries,
    MAX_SAMPLES,
};

/// Represents an error in the simulation.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Init {array_name} array does not have expected length \
        ( {array_name} array length: {input_length}, \
        expected length: {expected_length} )")]
    BadInit {
        array_name: String,
        input_length: usize,
        expected_length: usize,
    },
    #[error("Invalid time window ( end time: {t_end}, time step: {t_step} ), \
        both must be finite and strictly positive")]
    InvalidTiming {
        t_end: f64,
        t_step: f64,
    },
    #[error("Simulation would need {requested} samples, more than the limit of {limit}")]
    TooManySamples {
        requested: f64,
        limit: usize,
    },
    #[error("Invalid component value for {component}: {value}")]
    InvalidComponent {
        component: &'static str,
        value: f64,
    },
    #[error("Circuit is not underdamped \
        ( damping coefficient: {alpha} 1/s, natural frequency: {natural_frequency} rad/s )")]
    NotUnderdamped {
        alpha: f64,
        natural_frequency: f64,
    },
    #[error("Plotting failed: {0}")]
    Plot(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Manages actual computations.
pub trait Solver {
    /// Generates charge data for a set of times.
    fn compute(&self, desc: ComputeDescriptor) -> Result<ndarray::Array1<f64>, Error>;
}

/// Describes how a `Solver` should do computations.
pub struct ComputeDescriptor<'a> {
    /// The sample times, in seconds.
    pub times: ndarray::ArrayView1<'a, f64>,
    pub bar: &'a Option<indicatif::ProgressBar>,
}
