// ─────────────────────────────────────────────────────────────────────
// SCPN Lattice Sn — Scalar Flux
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Angle integration, normalisation and the convergence metric.

use crate::mesh::Mesh;
use lattice_math::norms::{l2_change, mean};
use lattice_types::error::{LatticeError, LatticeResult};
use ndarray::{Array2, ArrayView1, ArrayView2, ArrayView3, ArrayViewMut2, Axis};

/// Current/previous scalar flux with an explicit swap step.
#[derive(Debug, Clone)]
pub struct ScalarFlux {
    current: Array2<f64>,
    previous: Array2<f64>,
}

impl ScalarFlux {
    pub fn new(width: usize) -> Self {
        ScalarFlux {
            current: Array2::zeros((width, width)),
            previous: Array2::zeros((width, width)),
        }
    }

    /// previous ← current, current ← 0.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.previous);
        self.current.fill(0.0);
    }

    pub fn current(&self) -> ArrayView2<'_, f64> {
        self.current.view()
    }

    pub fn previous(&self) -> ArrayView2<'_, f64> {
        self.previous.view()
    }

    pub fn current_mut(&mut self) -> ArrayViewMut2<'_, f64> {
        self.current.view_mut()
    }

    /// ‖current − previous‖₂.
    pub fn change(&self) -> f64 {
        l2_change(self.current.view(), self.previous.view())
    }
}

/// φ = Σ_a w_a (ψ_a + ψ_{a+na/4} + ψ_{a+na/2} + ψ_{a+3na/4}), accumulated into `out`.
pub fn integrate_angles(
    ang_flux: ArrayView3<f64>,
    weight: ArrayView1<f64>,
    mut out: ArrayViewMut2<f64>,
) {
    let per_quadrant = weight.len();
    for block in 0..4 {
        for (a, &w) in weight.iter().enumerate() {
            out.scaled_add(w, &ang_flux.index_axis(Axis(0), block * per_quadrant + a));
        }
    }
}

impl Mesh {
    /// Swap the double buffer, integrate the angular flux and normalise the
    /// result to mesh mean 1. Returns the mean before normalisation.
    pub fn update_scalar_flux(&mut self) -> LatticeResult<f64> {
        self.scalar.swap();
        integrate_angles(
            self.ang_flux.view(),
            self.quadrature.weight.view(),
            self.scalar.current_mut(),
        );

        let avg = mean(self.scalar.current()).ok_or_else(|| {
            LatticeError::degenerate("scalar flux mean", "mesh has no cells")
        })?;
        if !avg.is_finite() || avg <= 0.0 {
            return Err(LatticeError::degenerate(
                "scalar flux mean",
                format!("cannot normalise by mean flux {avg:e}"),
            ));
        }
        self.scalar.current_mut().mapv_inplace(|phi| phi / avg);
        Ok(avg)
    }

    /// L2 norm of the scalar-flux change over the last reduction.
    pub fn convergence_residual(&self) -> f64 {
        self.scalar.change()
    }

    /// Angle-integrated flux in absolute units, `[y, x]`.
    pub fn unnormalized_scalar_flux(&self) -> Array2<f64> {
        let mut phi = Array2::zeros((self.width, self.width));
        integrate_angles(
            self.ang_flux.view(),
            self.quadrature.weight.view(),
            phi.view_mut(),
        );
        phi
    }
}
