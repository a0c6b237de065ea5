use clap::{ArgAction, Args, Parser, Subcommand};

/// Design calculators for molecular-beam apparatus.
///
/// Every numeric argument is an arithmetic expression, e.g. `2*pi`,
/// `sqrt(2)/2`, or `1.5e-3`.
#[derive(Parser, Debug)]
#[command(name = "beamcalc", author, version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Solve a two-stage skimmer geometry from any four lengths (mm).
    Skimmer(SkimmerArgs),

    /// Chamber pressure rise behind a sonic nozzle, one line per stagnation pressure.
    PressureRise(PressureRiseArgs),

    /// Nozzle diameter giving a target pressure rise, one line per pumping speed.
    Diameter(DiameterArgs),
}

/// Known skimmer lengths in millimetres. Omit the unknowns.
#[derive(Args, Debug, Default)]
pub struct SkimmerArgs {
    /// Transverse offset of the stage-1 skimmer aperture.
    #[arg(long, value_name = "EXPR", allow_hyphen_values = true)]
    pub s1: Option<String>,

    /// Transverse offset of the stage-2 skimmer aperture.
    #[arg(long, value_name = "EXPR", allow_hyphen_values = true)]
    pub s2: Option<String>,

    /// Transverse displacement at the reference plane.
    #[arg(long, value_name = "EXPR", allow_hyphen_values = true)]
    pub dx: Option<String>,

    /// Axial distance between the two skimmers.
    #[arg(long, value_name = "EXPR", allow_hyphen_values = true)]
    pub d12: Option<String>,

    /// Axial position of the stage-1 skimmer from the reference plane.
    #[arg(long, value_name = "EXPR", allow_hyphen_values = true)]
    pub l1: Option<String>,

    /// Axial position of the stage-2 skimmer from the reference plane.
    #[arg(long, value_name = "EXPR", allow_hyphen_values = true)]
    pub l2: Option<String>,
}

/// Gas and temperature inputs shared by the nozzle calculators.
#[derive(Args, Debug)]
#[command(next_help_heading = "Gas")]
pub struct GasArgs {
    /// Heat capacity ratio cp/cv (5/3 for a monatomic gas).
    #[arg(long, value_name = "EXPR", allow_hyphen_values = true)]
    pub k: String,

    /// Specific gas constant in J/(kg·K).
    #[arg(long, value_name = "EXPR", allow_hyphen_values = true)]
    pub gas_constant: String,

    /// Stagnation temperature of the source in K.
    #[arg(long, value_name = "EXPR", allow_hyphen_values = true)]
    pub t0: String,

    /// Temperature at which the pumping speed is specified, in K.
    #[arg(long, value_name = "EXPR", allow_hyphen_values = true)]
    pub t: String,
}

#[derive(Args, Debug)]
pub struct PressureRiseArgs {
    #[command(flatten)]
    pub gas: GasArgs,

    /// Nozzle diameter in µm.
    #[arg(long, value_name = "EXPR", allow_hyphen_values = true)]
    pub d0: String,

    /// Pumping speed in L/s.
    #[arg(long, value_name = "EXPR", allow_hyphen_values = true)]
    pub speed: String,

    /// Stagnation pressure in bar. Repeat for several.
    #[arg(
        long,
        value_name = "EXPR",
        required = true,
        allow_hyphen_values = true
    )]
    pub p0: Vec<String>,
}

#[derive(Args, Debug)]
pub struct DiameterArgs {
    #[command(flatten)]
    pub gas: GasArgs,

    /// Target chamber pressure rise in mbar.
    #[arg(long, value_name = "EXPR", allow_hyphen_values = true)]
    pub delta_p: String,

    /// Stagnation pressure in bar.
    #[arg(long, value_name = "EXPR", allow_hyphen_values = true)]
    pub p0: String,

    /// Pumping speed in L/s. Repeat for several.
    #[arg(
        long,
        value_name = "EXPR",
        required = true,
        allow_hyphen_values = true
    )]
    pub speed: Vec<String>,
}
