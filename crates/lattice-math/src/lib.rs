//! Numerical primitives for the SCPN pin-cell Sn solver.

pub mod diamond;
pub mod norms;
pub mod quadrature;
