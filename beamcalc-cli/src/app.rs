use std::io::Write;

use beamcalc_expr::evaluate;
use beamcalc_nozzle::{
    Chamber, Source, nozzle_diameter, pressure_rise, units::SpecificGasConstant,
};
use beamcalc_skimmer::{Config, Knowns, Variable, solve_unobserved};
use log::info;
use uom::si::{
    f64::{Length, Pressure, ThermodynamicTemperature, VolumeRate},
    length::micrometer,
    pressure::{bar, millibar},
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
    volume_rate::liter_per_second,
};

use crate::{
    cli::{Command, DiameterArgs, GasArgs, PressureRiseArgs, SkimmerArgs},
    error::CliError,
};

/// Runs one subcommand, writing its result lines to `out`.
pub fn run(command: &Command, out: &mut impl Write) -> Result<(), CliError> {
    match command {
        Command::Skimmer(args) => skimmer(args, out),
        Command::PressureRise(args) => pressure_rise_table(args, out),
        Command::Diameter(args) => diameter_table(args, out),
    }
}

fn skimmer(args: &SkimmerArgs, out: &mut impl Write) -> Result<(), CliError> {
    let fields = [
        (Variable::S1, &args.s1),
        (Variable::S2, &args.s2),
        (Variable::Dx, &args.dx),
        (Variable::D12, &args.d12),
        (Variable::L1, &args.l1),
        (Variable::L2, &args.l2),
    ];

    let mut knowns = Knowns::new();
    for (variable, text) in fields {
        // A blank field is an unknown, same as an omitted one.
        let Some(text) = text.as_deref().filter(|text| !text.trim().is_empty()) else {
            continue;
        };
        knowns.insert(variable, number(variable.key(), text)?);
    }
    let count = knowns.len();
    info!("solving skimmer geometry with {count} known lengths");

    let solution = solve_unobserved(&knowns, &Config::default())?;
    if solution.is_empty() {
        return Err(CliError::NothingToReport);
    }
    for (variable, value) in solution.iter() {
        writeln!(out, "{} = {value:.2} mm", variable.label())?;
    }
    Ok(())
}

fn pressure_rise_table(args: &PressureRiseArgs, out: &mut impl Write) -> Result<(), CliError> {
    let gas = Gas::evaluate(&args.gas)?;
    let diameter = Length::new::<micrometer>(number("d0", &args.d0)?);
    let chamber = gas.chamber(number("speed", &args.speed)?);

    for text in &args.p0 {
        let source = gas.source(number("p0", text)?);
        let delta_p = pressure_rise(&source, &chamber, diameter)?;
        writeln!(out, "Δp = {:.2e} mbar", delta_p.get::<millibar>())?;
    }
    Ok(())
}

fn diameter_table(args: &DiameterArgs, out: &mut impl Write) -> Result<(), CliError> {
    let gas = Gas::evaluate(&args.gas)?;
    let delta_p = Pressure::new::<millibar>(number("delta-p", &args.delta_p)?);
    let source = gas.source(number("p0", &args.p0)?);

    for text in &args.speed {
        let chamber = gas.chamber(number("speed", text)?);
        let diameter = nozzle_diameter(&source, &chamber, delta_p)?;
        writeln!(out, "d₀ = {:.6} µm", diameter.get::<micrometer>())?;
    }
    Ok(())
}

/// Evaluated gas arguments, before pressures and speeds are attached.
struct Gas {
    k: f64,
    gas_constant: SpecificGasConstant,
    t0: ThermodynamicTemperature,
    t: ThermodynamicTemperature,
}

impl Gas {
    fn evaluate(args: &GasArgs) -> Result<Self, CliError> {
        Ok(Self {
            k: number("k", &args.k)?,
            gas_constant: SpecificGasConstant::new::<joule_per_kilogram_kelvin>(number(
                "gas-constant",
                &args.gas_constant,
            )?),
            t0: ThermodynamicTemperature::new::<kelvin>(number("t0", &args.t0)?),
            t: ThermodynamicTemperature::new::<kelvin>(number("t", &args.t)?),
        })
    }

    fn source(&self, p0_bar: f64) -> Source {
        Source {
            heat_capacity_ratio: self.k,
            gas_constant: self.gas_constant,
            stagnation_temperature: self.t0,
            stagnation_pressure: Pressure::new::<bar>(p0_bar),
        }
    }

    fn chamber(&self, speed_l_per_s: f64) -> Chamber {
        Chamber {
            temperature: self.t,
            pumping_speed: VolumeRate::new::<liter_per_second>(speed_l_per_s),
        }
    }
}

fn number(argument: &'static str, text: &str) -> Result<f64, CliError> {
    evaluate(text).map_err(|source| CliError::Expression { argument, source })
}
