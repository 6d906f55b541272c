// ─────────────────────────────────────────────────────────────────────
// SCPN Lattice Sn — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::error::{LatticeError, LatticeResult};
use serde::{Deserialize, Serialize};

/// Material classification of a mesh cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Fuel,
    Moderator,
}

impl MaterialKind {
    pub fn is_fuel(self) -> bool {
        matches!(self, MaterialKind::Fuel)
    }
}

/// Fuel region shape inside the square unit cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Geometry {
    /// Centered square block of fuel cells.
    Square,
    /// Cells whose centre lies within the pin radius.
    Circle,
}

/// Outer boundary treatment for one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryCondition {
    /// Zero incoming flux on every edge: an isolated pin.
    Vacuum,
    /// Specular reflection on every edge: an infinite square lattice.
    Reflective,
}

impl BoundaryCondition {
    pub fn is_reflective(self) -> bool {
        matches!(self, BoundaryCondition::Reflective)
    }
}

/// Volume-integrated reaction rates of one solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReactionRates {
    /// Σ over fuel cells of φ·Σt·h².
    pub fuel: f64,
    /// Σ over all cells of φ·Σt·h².
    pub total: f64,
    /// Mean fuel flux / mean moderator flux.
    pub flux_ratio: f64,
}

/// Terminal state of a solve. Non-convergence is reported, not raised.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveReport {
    pub boundary: BoundaryCondition,
    pub converged: bool,
    pub iterations: usize,
    /// L2 norm of the last scalar-flux change.
    pub residual: f64,
    pub tolerance: f64,
    pub residual_history: Vec<f64>,
    pub rates: ReactionRates,
    pub solve_time_ms: f64,
}

impl SolveReport {
    /// Turn an exhausted iteration budget into [`LatticeError::NotConverged`].
    pub fn ensure_converged(self) -> LatticeResult<Self> {
        if self.converged {
            Ok(self)
        } else {
            Err(LatticeError::NotConverged {
                iterations: self.iterations,
                residual: self.residual,
                tolerance: self.tolerance,
            })
        }
    }
}

/// Isolated-vs-lattice comparison for one pin cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DancoffResult {
    pub case_name: String,
    pub width: usize,
    pub num_angles: usize,
    pub rr_isolated: f64,
    pub rr_lattice: f64,
    pub rr_total: f64,
    pub flux_ratio: f64,
    pub dancoff: f64,
    pub isolated: SolveReport,
    pub lattice: SolveReport,
}
