use log::trace;

use crate::{
    Variable,
    system::{Assignment, Relation},
    term::Root,
};

use super::Config;

/// A relation found to be violated while propagating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Violation {
    pub(crate) relation: Relation,
    /// Relative residual of the violated relation.
    pub(crate) residual: f64,
}

/// Repeatedly solves every relation that has exactly one unknown.
///
/// A similarity relation with a zero offset or position also fixes `dx`
/// while `h` is still unknown.
///
/// Relations with no unknowns are checked against `config.residual_tol`.
/// Sweeps run in canonical relation order until nothing changes, so the
/// result is deterministic.
///
/// # Errors
///
/// Returns the first relation that cannot be satisfied by any value.
pub(crate) fn propagate(values: &mut Assignment, config: &Config) -> Result<(), Violation> {
    loop {
        let mut progressed = false;

        for relation in Relation::ALL {
            let mut unknowns = relation
                .variables()
                .iter()
                .copied()
                .filter(|variable| !values.is_known(*variable));

            match (unknowns.next(), unknowns.next()) {
                (None, _) => check(relation, values, config)?,
                (Some(target), None) => {
                    if solve_for(relation, target, values, config)? {
                        progressed = true;
                    }
                }
                _ => {
                    if let Some(dx) = relation.forced_displacement(values) {
                        trace!("`{relation}` fixes dx = {dx} for every admissible h");
                        values.set(Variable::Dx, dx);
                        progressed = true;
                    }
                }
            }
        }

        if !progressed {
            return Ok(());
        }
    }
}

fn check(relation: Relation, values: &Assignment, config: &Config) -> Result<(), Violation> {
    let Some(residual) = relation.residual(values) else {
        return Ok(());
    };
    if residual.is_negligible(config.residual_tol) {
        Ok(())
    } else {
        let relative = residual.relative();
        trace!("`{relation}` violated, relative residual {relative}");
        Err(Violation {
            relation,
            residual: relative,
        })
    }
}

/// Solves `relation` for `target`, returning true if a value was assigned.
fn solve_for(
    relation: Relation,
    target: Variable,
    values: &mut Assignment,
    config: &Config,
) -> Result<bool, Violation> {
    let Some(linear) = relation.isolate(target, values) else {
        return Ok(false);
    };

    match linear.root(config.degeneracy_tol, config.residual_tol) {
        Root::Unique(value) => {
            trace!("`{relation}` gives {target} = {value}");
            values.set(target, value);
            Ok(true)
        }
        Root::Free => {
            trace!("`{relation}` holds for any {target}");
            Ok(false)
        }
        Root::Inconsistent => {
            trace!("`{relation}` cannot hold for any {target}");
            Err(Violation {
                relation,
                residual: linear.intercept.relative(),
            })
        }
    }
}
