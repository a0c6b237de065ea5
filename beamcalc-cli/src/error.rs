use beamcalc_expr::ExprError;
use beamcalc_nozzle::NozzleError;
use beamcalc_skimmer::SolveError;
use thiserror::Error;

/// Anything that stops a subcommand from printing a result.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("could not evaluate `--{argument}`")]
    Expression {
        argument: &'static str,
        #[source]
        source: ExprError,
    },

    #[error("skimmer geometry not solved")]
    Skimmer(#[from] SolveError),

    #[error("nozzle calculation failed")]
    Nozzle(#[from] NozzleError),

    #[error("nothing to report: every skimmer length is already known")]
    NothingToReport,

    #[error("failed to write results")]
    Output(#[from] std::io::Error),
}
