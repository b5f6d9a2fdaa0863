use crate::Error;
use crate::rlc::Transient;

/// Component values of a series RLC circuit.
#[derive(Copy, Clone, Debug)]
pub struct SeriesRlcDescriptor {
    /// Source voltage [V].
    pub voltage: f64,
    /// Capacitance [F].
    pub capacitance: f64,
    /// Inductance [H].
    pub inductance: f64,
    /// Resistance [Ω].
    pub resistance: f64,
}

/// An underdamped series RLC circuit.
///
/// The capacitor charge follows `q(t) = V·C·e^(−α·t)·cos(ω·t)` with
/// `α = R/(2L)` and `ω = sqrt(1/(LC) − α²)`. Only the underdamped regime,
/// where `1/(LC) > α²`, can be constructed.
#[derive(Copy, Clone, Debug)]
pub struct SeriesRlc {
    initial_charge: f64,
    alpha: f64,
    natural_frequency: f64,
    damped_frequency: f64,
}

impl SeriesRlc {
    #[inline]
    pub fn new(desc: SeriesRlcDescriptor) -> Result<Self, Error> {
        if !desc.voltage.is_finite() {
            return Err(Error::InvalidComponent {
                component: "V",
                value: desc.voltage,
            });
        }
        if !(desc.capacitance.is_finite() && desc.capacitance > 0.0) {
            return Err(Error::InvalidComponent {
                component: "C",
                value: desc.capacitance,
            });
        }
        if !(desc.inductance.is_finite() && desc.inductance > 0.0) {
            return Err(Error::InvalidComponent {
                component: "L",
                value: desc.inductance,
            });
        }
        if !(desc.resistance.is_finite() && desc.resistance >= 0.0) {
            return Err(Error::InvalidComponent {
                component: "R",
                value: desc.resistance,
            });
        }

        let alpha = desc.resistance / (2.0 * desc.inductance);
        let natural_sq = (desc.inductance * desc.capacitance).recip();

        // critically damped and overdamped circuits have no real ω
        let damped_sq = natural_sq - alpha.powi(2);
        if damped_sq <= 0.0 {
            return Err(Error::NotUnderdamped {
                alpha,
                natural_frequency: natural_sq.sqrt(),
            });
        }

        Ok(Self {
            initial_charge: desc.voltage * desc.capacitance,
            alpha,
            natural_frequency: natural_sq.sqrt(),
            damped_frequency: damped_sq.sqrt(),
        })
    }

    /// Damping coefficient `α` [1/s].
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Undamped natural frequency `ω₀` [rad/s].
    #[inline]
    pub fn natural_frequency(&self) -> f64 {
        self.natural_frequency
    }

    /// Damped angular frequency `ω` [rad/s].
    #[inline]
    pub fn damped_frequency(&self) -> f64 {
        self.damped_frequency
    }
}

impl Transient for SeriesRlc {
    #[inline]
    fn charge(&self, t: f64) -> f64 {
        self.initial_charge * f64::exp(-self.alpha * t) * f64::cos(self.damped_frequency * t)
    }

    #[inline]
    fn initial_charge(&self) -> f64 {
        self.initial_charge
    }
}
