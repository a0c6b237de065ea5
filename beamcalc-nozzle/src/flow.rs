use crate::NozzleError;

/// Sonic flow function of an ideal gas with heat capacity ratio `k`.
///
/// ```text
/// f(k) = √k / ((k + 1) / 2)^((k + 1) / (2k − 2))
/// ```
///
/// For a choked orifice the mass flow is `A·p₀·f(k) / √(R·T₀)`.
///
/// # Errors
///
/// Returns [`NozzleError::HeatCapacityRatio`] unless `k` is finite and `k > 1`.
pub fn flow_function(k: f64) -> Result<f64, NozzleError> {
    if !k.is_finite() || k <= 1.0 {
        return Err(NozzleError::HeatCapacityRatio { value: k });
    }
    let exponent = (k + 1.0) / (2.0 * k - 2.0);
    Ok(k.sqrt() / ((k + 1.0) / 2.0).powf(exponent))
}
