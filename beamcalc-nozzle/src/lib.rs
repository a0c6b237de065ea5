//! Closed-form relations for a sonic nozzle expanding into a pumped chamber.
//!
//! Gas from a reservoir at stagnation conditions `(p₀, T₀)` chokes in the
//! nozzle throat, so the throughput depends only on the source and the
//! nozzle diameter. In steady state the chamber pump removes the same
//! throughput, which fixes the pressure rise `Δp = Q / S`.
//!
//! All inputs are [`uom`] quantities, so callers may supply bar, mbar, µm,
//! or L/s directly.

mod error;
mod flow;
mod orifice;
pub mod units;

pub use error::NozzleError;
pub use flow::flow_function;
pub use orifice::{Chamber, Source, nozzle_diameter, pressure_rise, throughput};
