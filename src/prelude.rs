//! Includes commonly used library components.

pub use crate::{
    simulate,
    ComputeDescriptor,
    RunDescriptor,
    Simulation,
    SimulationDescriptor,
    SimulationParameters,
    Solver,
    TimeSeries,
};
pub use crate::output::SaveSettings;
pub use crate::params::{validate, Parameter, ParameterSet, ValidationResult};
pub use crate::plot::PlotDescriptor;
pub use crate::rlc::Transient;
