// ─────────────────────────────────────────────────────────────────────
// SCPN Lattice Sn — Reaction Rates
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Volume-integrated reaction rates and the Dancoff factor.

use crate::mesh::Mesh;
use lattice_types::error::{LatticeError, LatticeResult};
use lattice_types::state::ReactionRates;
use ndarray::Zip;

impl Mesh {
    /// Reaction rates of the current angular flux, in absolute units.
    ///
    /// RR = Σ φ·Σt·h² over fuel cells and over all cells. The flux ratio is
    /// the mean fuel flux over the mean moderator flux.
    pub fn reaction_rates(&self) -> LatticeResult<ReactionRates> {
        let phi = self.unnormalized_scalar_flux();
        let area = self.pin.mesh_size * self.pin.mesh_size;
        let fuel = self.fuel;

        let mut rr_fuel = 0.0;
        let mut rr_total = 0.0;
        let mut fuel_flux = 0.0;
        let mut fuel_cells = 0usize;
        let mut moderator_flux = 0.0;
        let mut moderator_cells = 0usize;

        Zip::from(&phi)
            .and(&self.sigma_t)
            .and(&self.cell_material)
            .for_each(|&f, &sigma, &id| {
                let rr = f * sigma * area;
                rr_total += rr;
                if id == fuel {
                    rr_fuel += rr;
                    fuel_flux += f;
                    fuel_cells += 1;
                } else {
                    moderator_flux += f;
                    moderator_cells += 1;
                }
            });

        if fuel_cells == 0 {
            return Err(LatticeError::degenerate(
                "fuel region",
                "no cell is classified as fuel",
            ));
        }
        if moderator_cells == 0 {
            return Err(LatticeError::degenerate(
                "moderator region",
                "no cell is classified as moderator",
            ));
        }
        let moderator_mean = moderator_flux / moderator_cells as f64;
        if moderator_mean == 0.0 || !moderator_mean.is_finite() {
            return Err(LatticeError::degenerate(
                "moderator mean flux",
                format!("flux ratio undefined for moderator mean {moderator_mean:e}"),
            ));
        }

        Ok(ReactionRates {
            fuel: rr_fuel,
            total: rr_total,
            flux_ratio: (fuel_flux / fuel_cells as f64) / moderator_mean,
        })
    }
}

/// D = 1 − (1 − RR_lat/RR_tot) / (1 − RR_iso/RR_tot).
pub fn dancoff_factor(rr_isolated: f64, rr_lattice: f64, rr_total: f64) -> LatticeResult<f64> {
    if rr_total == 0.0 || !rr_total.is_finite() {
        return Err(LatticeError::degenerate(
            "total reaction rate",
            format!("cannot normalise by RR_total = {rr_total:e}"),
        ));
    }
    let denominator = 1.0 - rr_isolated / rr_total;
    if denominator == 0.0 || !denominator.is_finite() {
        return Err(LatticeError::degenerate(
            "Dancoff denominator",
            format!(
                "1 − RR_isolated/RR_total = {denominator:e} \
                 (RR_isolated = {rr_isolated:e}, RR_total = {rr_total:e})"
            ),
        ));
    }
    Ok(1.0 - (1.0 - rr_lattice / rr_total) / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_types::config::CaseConfig;
    use std::f64::consts::PI;

    #[test]
    fn test_dancoff_formula() {
        // 1 − (1 − 0.8)/(1 − 0.5) = 0.6
        let d = dancoff_factor(0.5, 0.8, 1.0).unwrap();
        assert!((d - 0.6).abs() < 1e-12);
        // Lattice rate equal to isolated rate: no shadowing.
        assert!(dancoff_factor(0.3, 0.3, 1.0).unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_dancoff_degenerate_inputs() {
        assert!(matches!(
            dancoff_factor(0.5, 0.8, 0.0),
            Err(LatticeError::Degenerate {
                quantity: "total reaction rate",
                ..
            })
        ));
        assert!(matches!(
            dancoff_factor(2.0, 1.0, 2.0),
            Err(LatticeError::Degenerate {
                quantity: "Dancoff denominator",
                ..
            })
        ));
    }

    #[test]
    fn test_uniform_flux_rates() {
        let mut mesh = Mesh::from_config(&CaseConfig::default()).unwrap();
        mesh.ang_flux.fill(1.0);
        let rates = mesh.reaction_rates().unwrap();
        // φ = 4π everywhere; 49 fuel cells, 95 moderator cells, h² = 0.01.
        let phi = 4.0 * PI;
        let fuel = 49.0 * phi * 100.0 * 0.01;
        let total = fuel + 95.0 * phi * 0.25 * 0.01;
        assert!((rates.fuel - fuel).abs() < 1e-9 * fuel);
        assert!((rates.total - total).abs() < 1e-9 * total);
        assert!((rates.flux_ratio - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_moderator_flux_is_degenerate() {
        let mut mesh = Mesh::from_config(&CaseConfig::default()).unwrap();
        mesh.ang_flux.fill(0.0);
        assert!(matches!(
            mesh.reaction_rates(),
            Err(LatticeError::Degenerate {
                quantity: "moderator mean flux",
                ..
            })
        ));
    }
}
