// ─────────────────────────────────────────────────────────────────────
// SCPN Lattice Sn — Source Iteration
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Sweep iteration with vacuum or reflective outer boundaries.

use crate::mesh::Mesh;
use lattice_types::error::{LatticeError, LatticeResult};
use lattice_types::state::{BoundaryCondition, SolveReport};

impl Mesh {
    /// Iterate transport passes until the scalar flux settles.
    pub fn solve(
        &mut self,
        boundary: BoundaryCondition,
        max_iterations: usize,
    ) -> LatticeResult<SolveReport> {
        self.solve_observed(boundary, max_iterations, |_, _, _| {})
    }

    /// [`Mesh::solve`] with a callback after every iteration, receiving the
    /// iteration number (1-based), its residual and the mesh.
    ///
    /// Algorithm:
    /// 1. Vacuum: zero every edge buffer
    /// 2. Per iteration:
    ///    a. Sweep the four quadrants, reflecting after each when reflective
    ///    b. Vacuum: zero the edge buffers again
    ///    c. Reduce, normalise and measure the scalar-flux change
    ///    d. Check convergence
    /// 3. Reaction rates from the final angular flux
    /// 4. Vacuum: clear the angular flux for the next solve
    ///
    /// A vacuum pass sees zero inflow and a fixed source, so its result does
    /// not depend on the previous iterate; it is converged after one pass.
    pub fn solve_observed<F>(
        &mut self,
        boundary: BoundaryCondition,
        max_iterations: usize,
        mut observer: F,
    ) -> LatticeResult<SolveReport>
    where
        F: FnMut(usize, f64, &Mesh),
    {
        if max_iterations == 0 {
            return Err(LatticeError::ConfigError(
                "max_iterations must be >= 1".to_string(),
            ));
        }
        let start = std::time::Instant::now();
        let reflective = boundary.is_reflective();

        // 1. Isolated pin: nothing enters from outside
        if !reflective {
            self.edges.fill(0.0);
        }

        let mut converged = false;
        let mut iterations = 0;
        let mut residual = f64::MAX;
        let mut residual_history = Vec::with_capacity(max_iterations);

        for k in 1..=max_iterations {
            // 2a-b. Transport pass
            self.transport_pass(reflective)?;
            if !reflective {
                self.edges.fill(0.0);
            }

            // 2c. Scalar flux
            self.update_scalar_flux()?;
            residual = self.convergence_residual();
            residual_history.push(residual);
            iterations = k;
            observer(k, residual, self);

            // 2d. Convergence
            if !reflective || residual < self.tolerance {
                converged = true;
                break;
            }
        }

        // 3. Rates are taken before a vacuum solve clears its flux
        let rates = self.reaction_rates()?;

        // 4. Clean slate
        if !reflective {
            self.clear_angular_flux();
        }

        let elapsed = start.elapsed().as_secs_f64() * 1000.0;

        Ok(SolveReport {
            boundary,
            converged,
            iterations,
            residual,
            tolerance: self.tolerance,
            residual_history,
            rates,
            solve_time_ms: elapsed,
        })
    }
}
