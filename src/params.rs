//! Parameter limits and validation of raw user input.
//!
//! Every parameter is checked against [`PARAMETER_SPECS`]. Strings that do not
//! parse as numbers are reported the same way as out of range values: the
//! parameter is marked as failed and nothing is raised.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use crate::{simulate, Error, TimeSeries};

/// The user supplied inputs of a simulation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Parameter {
    Voltage,
    Capacitance,
    Inductance,
    Resistance,
    TimeEnd,
    TimeStep,
}

impl Parameter {
    /// All parameters, in table order.
    pub const ALL: [Parameter; 6] = [
        Parameter::Voltage,
        Parameter::Capacitance,
        Parameter::Inductance,
        Parameter::Resistance,
        Parameter::TimeEnd,
        Parameter::TimeStep,
    ];

    /// The identifier used for raw input keys and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Parameter::Voltage => "V",
            Parameter::Capacitance => "C",
            Parameter::Inductance => "L",
            Parameter::Resistance => "R",
            Parameter::TimeEnd => "t_end",
            Parameter::TimeStep => "t_step",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// The allowed range for this parameter.
    pub fn spec(self) -> &'static ParameterSpec {
        &PARAMETER_SPECS[self as usize]
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The allowed range of a single parameter.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ParameterSpec {
    pub parameter: Parameter,
    pub units: &'static str,
    pub min: f64,
    pub max: f64,
    /// Whether `min` itself is allowed.
    pub inclusive_min: bool,
    /// Whether `max` itself is allowed.
    pub inclusive_max: bool,
}

impl ParameterSpec {
    /// Checks `value` against both bounds. NaN is never in range.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        let above_min = if self.inclusive_min { value >= self.min } else { value > self.min };
        let below_max = if self.inclusive_max { value <= self.max } else { value < self.max };

        above_min && below_max
    }
}

/// Range table, indexed by `Parameter`.
pub const PARAMETER_SPECS: [ParameterSpec; 6] = [
    ParameterSpec {
        parameter: Parameter::Voltage,
        units: "Volts",
        min: 4.0,
        max: 15.0,
        inclusive_min: true,
        inclusive_max: true,
    },
    ParameterSpec {
        parameter: Parameter::Capacitance,
        units: "Farads",
        min: 1e-9,
        max: 1e-7,
        inclusive_min: true,
        inclusive_max: true,
    },
    ParameterSpec {
        parameter: Parameter::Inductance,
        units: "Henrys",
        min: 1e-3,
        max: 1e-1,
        inclusive_min: true,
        inclusive_max: true,
    },
    ParameterSpec {
        parameter: Parameter::Resistance,
        units: "Ohms",
        min: 5.0,
        max: 10.0,
        inclusive_min: true,
        inclusive_max: true,
    },
    // time values are used as a divisor and a step, so zero is excluded
    ParameterSpec {
        parameter: Parameter::TimeEnd,
        units: "Seconds",
        min: 0.0,
        max: 1.23456e300,
        inclusive_min: false,
        inclusive_max: true,
    },
    ParameterSpec {
        parameter: Parameter::TimeStep,
        units: "Seconds",
        min: 0.0,
        max: 1.23456e300,
        inclusive_min: false,
        inclusive_max: true,
    },
];

/// A complete set of validated parameter values.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ParameterSet {
    pub voltage: f64,
    pub capacitance: f64,
    pub inductance: f64,
    pub resistance: f64,
    pub t_end: f64,
    pub t_step: f64,
}

impl ParameterSet {
    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Voltage => self.voltage,
            Parameter::Capacitance => self.capacitance,
            Parameter::Inductance => self.inductance,
            Parameter::Resistance => self.resistance,
            Parameter::TimeEnd => self.t_end,
            Parameter::TimeStep => self.t_step,
        }
    }

    /// Runs the transient simulation for these values.
    pub fn simulate(&self) -> Result<TimeSeries, Error> {
        simulate(
            self.voltage,
            self.capacitance,
            self.inductance,
            self.resistance,
            self.t_end,
            self.t_step,
        )
    }
}

/// The outcome of checking all six parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationResult {
    // `Some` only for values that parsed and are in range
    values: [Option<f64>; 6],
}

impl ValidationResult {
    pub fn is_valid(&self, parameter: Parameter) -> bool {
        self.values[parameter as usize].is_some()
    }

    pub fn all_valid(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// The parameters that failed, in table order.
    pub fn failures(&self) -> impl Iterator<Item = Parameter> + '_ {
        Parameter::ALL.into_iter().filter(move |&p| !self.is_valid(p))
    }

    /// The validated values, available only when every parameter passed.
    pub fn parameter_set(&self) -> Option<ParameterSet> {
        match self.values {
            [Some(voltage), Some(capacitance), Some(inductance), Some(resistance), Some(t_end), Some(t_step)] => {
                Some(ParameterSet {
                    voltage,
                    capacitance,
                    inductance,
                    resistance,
                    t_end,
                    t_step,
                })
            }
            _ => None,
        }
    }

    /// A message naming every failed parameter, empty when all passed.
    pub fn error_message(&self) -> String {
        error_message(self.failures().map(Parameter::name))
    }
}

/// Builds the user facing message for a list of bad inputs.
pub fn error_message<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names
        .into_iter()
        .map(|name| format!("Error in input: {}. Please enter a valid input.\n", name))
        .collect()
}

/// Parses and range checks the six raw parameter strings, keyed by name.
///
/// Missing keys and unparsable strings fail their parameter.
pub fn validate<K, V, S>(raw: &HashMap<K, V, S>) -> ValidationResult
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    let mut values = [None; 6];

    for spec in PARAMETER_SPECS.iter() {
        let value = raw
            .get(spec.parameter.name())
            .and_then(|s| s.as_ref().trim().parse::<f64>().ok())
            .filter(|&v| spec.contains(v));

        if value.is_none() {
            tracing::debug!(parameter = spec.parameter.name(), "input failed validation");
        }
        values[spec.parameter as usize] = value;
    }

    ValidationResult { values }
}
