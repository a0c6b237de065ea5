use beamcalc_core::constraint::ConstraintError;
use thiserror::Error;

/// Errors that may occur when evaluating nozzle relations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NozzleError {
    /// The heat capacity ratio `k` is not a finite number above one.
    ///
    /// The flow function `f(k)` has a pole at `k = 1`.
    #[error("heat capacity ratio must be finite and greater than 1, got {value}")]
    HeatCapacityRatio { value: f64 },

    /// A dimensional input is zero, negative, or not a number.
    #[error("`{parameter}` is invalid ({source}): {value} in SI units")]
    Invalid {
        parameter: &'static str,
        value: f64,
        #[source]
        source: ConstraintError,
    },

    /// A dimensional input is infinite.
    #[error("`{parameter}` must be finite")]
    Infinite { parameter: &'static str },

    /// The calculation overflowed or underflowed to a non-physical result.
    #[error("`{quantity}` is not a finite positive number: {value}")]
    Calculation { quantity: &'static str, value: f64 },
}
