/// Configuration for the skimmer solver.
///
/// Both tolerances are relative to the magnitude of the quantities that
/// produced the tested value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Largest relative residual accepted for a satisfied relation.
    pub residual_tol: f64,
    /// Largest relative magnitude treated as a vanishing coefficient or denominator.
    pub degeneracy_tol: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            residual_tol: 1e-9,
            degeneracy_tol: 1e-12,
        }
    }
}

impl Config {
    /// Validates that all tolerances are finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns an error if any tolerance is negative or non-finite.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.residual_tol.is_finite() || self.residual_tol < 0.0 {
            return Err("residual_tol must be finite and non-negative");
        }
        if !self.degeneracy_tol.is_finite() || self.degeneracy_tol < 0.0 {
            return Err("degeneracy_tol must be finite and non-negative");
        }
        Ok(())
    }
}
