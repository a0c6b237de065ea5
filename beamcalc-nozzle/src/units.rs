use uom::{
    si::{ISQ, Quantity, SI},
    typenum::{N1, N2, N3, P1, P2, Z0},
};

/// Specific gas constant, J/kg·K in SI.
pub type SpecificGasConstant = Quantity<ISQ<P2, Z0, N2, Z0, N1, Z0, Z0>, SI<f64>, f64>;

/// Gas throughput `p·V̇`, Pa·m³/s (W) in SI.
///
/// Shares its dimensions with power, so `uom::si::power` units apply;
/// `mbar·L/s` is 0.1 W.
pub type Throughput = Quantity<ISQ<P2, P1, N3, Z0, Z0, Z0, Z0>, SI<f64>, f64>;
