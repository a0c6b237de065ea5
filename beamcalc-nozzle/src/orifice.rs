use std::f64::consts::PI;

use beamcalc_core::constraint::StrictlyPositive;
use log::debug;
use uom::si::{
    f64::{Length, Pressure, ThermodynamicTemperature, VolumeRate},
    length::meter,
    power::watt,
    pressure::pascal,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
    volume_rate::cubic_meter_per_second,
};

use crate::{
    NozzleError, flow_function,
    units::{SpecificGasConstant, Throughput},
};

/// Stagnation conditions of the gas upstream of the nozzle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Source {
    /// Ratio of specific heats `k = cp / cv`.
    pub heat_capacity_ratio: f64,
    pub gas_constant: SpecificGasConstant,
    pub stagnation_temperature: ThermodynamicTemperature,
    pub stagnation_pressure: Pressure,
}

/// The vacuum chamber the nozzle expands into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chamber {
    /// Temperature at which the pumping speed is specified.
    pub temperature: ThermodynamicTemperature,
    pub pumping_speed: VolumeRate,
}

/// Source and chamber values in SI base units, checked once.
struct Si {
    f: f64,
    sqrt_r: f64,
    t0: f64,
    p0: f64,
    t: f64,
    s: f64,
}

impl Si {
    fn new(source: &Source, chamber: &Chamber) -> Result<Self, NozzleError> {
        Ok(Self {
            f: flow_function(source.heat_capacity_ratio)?,
            sqrt_r: positive(
                "gas_constant",
                source.gas_constant.get::<joule_per_kilogram_kelvin>(),
            )?
            .sqrt(),
            t0: positive(
                "stagnation_temperature",
                source.stagnation_temperature.get::<kelvin>(),
            )?,
            p0: positive(
                "stagnation_pressure",
                source.stagnation_pressure.get::<pascal>(),
            )?,
            t: positive("temperature", chamber.temperature.get::<kelvin>())?,
            s: positive(
                "pumping_speed",
                chamber.pumping_speed.get::<cubic_meter_per_second>(),
            )?,
        })
    }

    /// Throughput per unit nozzle area, `p₀·f(k)·√R·T/√T₀`.
    fn throughput_per_area(&self) -> f64 {
        self.p0 * self.f * self.sqrt_r * self.t / self.t0.sqrt()
    }
}

/// Gas throughput of a sonic nozzle of the given diameter.
///
/// ```text
/// Q = (π/4)·d²·p₀·f(k)·√R·T/√T₀
/// ```
///
/// # Errors
///
/// Returns a [`NozzleError`] if any input is not finite and strictly positive,
/// or if `k ≤ 1`.
pub fn throughput(
    source: &Source,
    chamber: &Chamber,
    diameter: Length,
) -> Result<Throughput, NozzleError> {
    let si = Si::new(source, chamber)?;
    let d = positive("diameter", diameter.get::<meter>())?;

    let q = finite("throughput", PI / 4.0 * d * d * si.throughput_per_area())?;
    Ok(Throughput::new::<watt>(q))
}

/// Steady-state pressure rise in the chamber, `Δp = Q / S`.
///
/// # Errors
///
/// See [`throughput`].
pub fn pressure_rise(
    source: &Source,
    chamber: &Chamber,
    diameter: Length,
) -> Result<Pressure, NozzleError> {
    let si = Si::new(source, chamber)?;
    let q = throughput(source, chamber, diameter)?.get::<watt>();

    let delta_p = finite("pressure_rise", q / si.s)?;
    debug!(
        "d = {} m, p0 = {} Pa, S = {} m³/s: Δp = {delta_p} Pa",
        diameter.get::<meter>(),
        si.p0,
        si.s
    );
    Ok(Pressure::new::<pascal>(delta_p))
}

/// Nozzle diameter that produces the given chamber pressure rise.
///
/// Inverts [`pressure_rise`]:
///
/// ```text
/// d = √((4/π)·Δp·S·√T₀ / (p₀·f(k)·√R·T))
/// ```
///
/// # Errors
///
/// Returns a [`NozzleError`] if any input is not finite and strictly positive,
/// or if `k ≤ 1`.
pub fn nozzle_diameter(
    source: &Source,
    chamber: &Chamber,
    pressure_rise: Pressure,
) -> Result<Length, NozzleError> {
    let si = Si::new(source, chamber)?;
    let delta_p = positive("pressure_rise", pressure_rise.get::<pascal>())?;

    let area = delta_p * si.s / si.throughput_per_area();
    let d = finite("diameter", (4.0 / PI * area).sqrt())?;
    debug!(
        "Δp = {delta_p} Pa, p0 = {} Pa, S = {} m³/s: d = {d} m",
        si.p0, si.s
    );
    Ok(Length::new::<meter>(d))
}

/// Checks that an SI input value is finite and strictly positive.
fn positive(parameter: &'static str, value: f64) -> Result<f64, NozzleError> {
    if value.is_infinite() {
        return Err(NozzleError::Infinite { parameter });
    }
    StrictlyPositive::new(value)
        .map(|value| value.into_inner())
        .map_err(|source| NozzleError::Invalid {
            parameter,
            value,
            source,
        })
}

/// Checks that a computed result is finite and strictly positive.
fn finite(quantity: &'static str, value: f64) -> Result<f64, NozzleError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(NozzleError::Calculation { quantity, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use beamcalc_core::constraint::ConstraintError;
    use uom::si::{
        length::micrometer,
        pressure::{bar, millibar},
        volume_rate::liter_per_second,
    };

    fn helium(p0_bar: f64) -> Source {
        Source {
            heat_capacity_ratio: 5.0 / 3.0,
            gas_constant: SpecificGasConstant::new::<joule_per_kilogram_kelvin>(2077.1),
            stagnation_temperature: ThermodynamicTemperature::new::<kelvin>(300.0),
            stagnation_pressure: Pressure::new::<bar>(p0_bar),
        }
    }

    fn chamber(speed_l_per_s: f64) -> Chamber {
        Chamber {
            temperature: ThermodynamicTemperature::new::<kelvin>(300.0),
            pumping_speed: VolumeRate::new::<liter_per_second>(speed_l_per_s),
        }
    }

    #[test]
    fn helium_pressure_rise() {
        let delta_p = pressure_rise(
            &helium(50.0),
            &chamber(1000.0),
            Length::new::<micrometer>(100.0),
        )
        .unwrap();

        assert_relative_eq!(
            delta_p.get::<pascal>(),
            22.511_068_915_102_086,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            delta_p.get::<millibar>(),
            0.225_110_689_151_020_9,
            max_relative = 1e-12
        );
    }

    #[test]
    fn argon_throughput() {
        let argon = Source {
            gas_constant: SpecificGasConstant::new::<joule_per_kilogram_kelvin>(208.13),
            stagnation_pressure: Pressure::new::<bar>(20.0),
            ..helium(1.0)
        };

        let diameter = Length::new::<micrometer>(50.0);
        let q = throughput(&argon, &chamber(500.0), diameter).unwrap();

        assert_relative_eq!(
            q.get::<watt>(),
            0.712_581_850_690_003_8,
            max_relative = 1e-12
        );
    }

    #[test]
    fn pressure_rise_scales_with_p0_over_s() {
        let d = Length::new::<micrometer>(100.0);
        let base = pressure_rise(&helium(50.0), &chamber(1000.0), d).unwrap();
        let doubled_p0 = pressure_rise(&helium(100.0), &chamber(1000.0), d).unwrap();
        let doubled_s = pressure_rise(&helium(50.0), &chamber(2000.0), d).unwrap();

        let base = base.get::<pascal>();
        assert_relative_eq!(doubled_p0.get::<pascal>(), 2.0 * base, max_relative = 1e-12);
        assert_relative_eq!(doubled_s.get::<pascal>(), 0.5 * base, max_relative = 1e-12);
    }

    #[test]
    fn diameter_inverts_pressure_rise() {
        let d = nozzle_diameter(
            &helium(50.0),
            &chamber(1000.0),
            Pressure::new::<millibar>(0.225_110_689_151_020_9),
        )
        .unwrap();

        assert_relative_eq!(d.get::<micrometer>(), 100.0, max_relative = 1e-12);
    }

    #[test]
    fn round_trip_through_a_range_of_sizes() {
        for microns in [10.0, 75.0, 300.0, 1000.0] {
            let d = Length::new::<micrometer>(microns);
            let delta_p = pressure_rise(&helium(20.0), &chamber(2500.0), d).unwrap();
            let back = nozzle_diameter(&helium(20.0), &chamber(2500.0), delta_p).unwrap();
            assert_relative_eq!(back.get::<micrometer>(), microns, max_relative = 1e-12);
        }
    }

    #[test]
    fn rejects_non_positive_inputs() {
        let zero_speed = pressure_rise(
            &helium(50.0),
            &chamber(0.0),
            Length::new::<micrometer>(100.0),
        );
        assert_eq!(
            zero_speed,
            Err(NozzleError::Invalid {
                parameter: "pumping_speed",
                value: 0.0,
                source: ConstraintError::Zero,
            })
        );

        let negative_diameter = throughput(
            &helium(50.0),
            &chamber(1000.0),
            Length::new::<micrometer>(-1.0),
        );
        assert!(matches!(
            negative_diameter,
            Err(NozzleError::Invalid {
                parameter: "diameter",
                source: ConstraintError::Negative,
                ..
            })
        ));

        let infinite_p0 = pressure_rise(
            &helium(f64::INFINITY),
            &chamber(1000.0),
            Length::new::<micrometer>(100.0),
        );
        assert_eq!(
            infinite_p0,
            Err(NozzleError::Infinite {
                parameter: "stagnation_pressure"
            })
        );
    }

    #[test]
    fn rejects_isothermal_k() {
        let source = Source {
            heat_capacity_ratio: 1.0,
            ..helium(50.0)
        };
        let result = nozzle_diameter(&source, &chamber(1000.0), Pressure::new::<millibar>(0.1));
        assert_eq!(result, Err(NozzleError::HeatCapacityRatio { value: 1.0 }));
    }
}
