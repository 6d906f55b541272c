//! Diamond-difference balance for one cell and one ordinate.
//!
//! Cell-centred balance with incoming edge fluxes ψ_x, ψ_y:
//!   ψ_c = (Q + 2|μ|/h·ψ_x + 2|η|/h·ψ_y) / (Σt + 2|μ|/h + 2|η|/h)
//! closed by ψ_out = 2ψ_c − ψ_in on both edges.

/// Streaming coefficients 2|μ|/h and 2|η|/h of one ordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Streaming {
    pub cx: f64,
    pub cy: f64,
}

impl Streaming {
    #[inline]
    pub fn new(mu: f64, eta: f64, h: f64) -> Self {
        Streaming {
            cx: 2.0 * mu.abs() / h,
            cy: 2.0 * eta.abs() / h,
        }
    }
}

/// Result of one cell update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiamondUpdate {
    /// Cell-centred angular flux.
    pub cell: f64,
    /// Flux leaving through the downstream x edge.
    pub outgoing_x: f64,
    /// Flux leaving through the downstream y edge.
    pub outgoing_y: f64,
}

#[inline(always)]
pub fn diamond_difference(
    source: f64,
    sigma_t: f64,
    streaming: Streaming,
    incoming_x: f64,
    incoming_y: f64,
) -> DiamondUpdate {
    let Streaming { cx, cy } = streaming;
    let cell = (source + cx * incoming_x + cy * incoming_y) / (sigma_t + cx + cy);
    DiamondUpdate {
        cell,
        outgoing_x: 2.0 * cell - incoming_x,
        outgoing_y: 2.0 * cell - incoming_y,
    }
}
