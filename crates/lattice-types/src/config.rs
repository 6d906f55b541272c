// ─────────────────────────────────────────────────────────────────────
// SCPN Lattice Sn — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::{
    DEFAULT_FUEL_DIAMETER_CM, DEFAULT_MAX_ITERATIONS, DEFAULT_MESH_SIZE_CM, DEFAULT_ORDER,
    DEFAULT_PITCH_CM, DEFAULT_TOLERANCE, FUEL_SIGMA_T, FUEL_SOURCE, MODERATOR_SIGMA_T,
    MODERATOR_SOURCE,
};
use crate::error::{LatticeError, LatticeResult};
use crate::state::Geometry;
use serde::{Deserialize, Serialize};

/// One pin-cell case: geometry, angular order, materials and solver budget.
/// Maps 1:1 to pin_cell_config.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseConfig {
    pub case_name: String,
    /// Sn order (level-symmetric).
    pub order: usize,
    /// Cell edge length [cm].
    pub mesh_size: f64,
    /// Lattice pitch [cm].
    pub pitch: f64,
    /// Fuel diameter [cm].
    pub fuel_diameter: f64,
    pub geometry: Geometry,
    pub fuel: MaterialParams,
    pub moderator: MaterialParams,
    pub solver: SolverConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MaterialParams {
    /// Total macroscopic cross-section [1/cm].
    pub sigma_t: f64,
    /// Isotropic volumetric source [n/(cm³·s·sr)].
    pub source: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Reflective sweep budget.
    pub max_iterations: usize,
    /// Bound on the L2 norm of the scalar-flux change.
    pub tolerance: f64,
    /// Sweep the angles of a quadrant concurrently.
    #[serde(default)]
    pub parallel_angles: bool,
}

impl Default for CaseConfig {
    fn default() -> Self {
        CaseConfig {
            case_name: "PWR-Pin-Reference".to_string(),
            order: DEFAULT_ORDER,
            mesh_size: DEFAULT_MESH_SIZE_CM,
            pitch: DEFAULT_PITCH_CM,
            fuel_diameter: DEFAULT_FUEL_DIAMETER_CM,
            geometry: Geometry::Square,
            fuel: MaterialParams {
                sigma_t: FUEL_SIGMA_T,
                source: FUEL_SOURCE,
            },
            moderator: MaterialParams {
                sigma_t: MODERATOR_SIGMA_T,
                source: MODERATOR_SOURCE,
            },
            solver: SolverConfig {
                max_iterations: DEFAULT_MAX_ITERATIONS,
                tolerance: DEFAULT_TOLERANCE,
                parallel_angles: false,
            },
        }
    }
}

impl MaterialParams {
    pub fn validate(&self, label: &str) -> LatticeResult<()> {
        if !self.sigma_t.is_finite() || self.sigma_t <= 0.0 {
            return Err(LatticeError::ConfigError(format!(
                "{label} sigma_t must be finite and > 0, got {}",
                self.sigma_t
            )));
        }
        if !self.source.is_finite() || self.source < 0.0 {
            return Err(LatticeError::ConfigError(format!(
                "{label} source must be finite and >= 0, got {}",
                self.source
            )));
        }
        Ok(())
    }
}

impl CaseConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> LatticeResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Reject anything that would make the mesh or the sweep meaningless.
    pub fn validate(&self) -> LatticeResult<()> {
        if !self.mesh_size.is_finite() || self.mesh_size <= 0.0 {
            return Err(LatticeError::ConfigError(format!(
                "mesh_size must be finite and > 0, got {}",
                self.mesh_size
            )));
        }
        if !self.pitch.is_finite() || self.pitch <= 0.0 {
            return Err(LatticeError::ConfigError(format!(
                "pitch must be finite and > 0, got {}",
                self.pitch
            )));
        }
        if !self.fuel_diameter.is_finite() || self.fuel_diameter < 0.0 {
            return Err(LatticeError::ConfigError(format!(
                "fuel_diameter must be finite and >= 0, got {}",
                self.fuel_diameter
            )));
        }
        if self.fuel_diameter >= self.pitch {
            return Err(LatticeError::ConfigError(format!(
                "fuel_diameter {} must be smaller than pitch {}",
                self.fuel_diameter, self.pitch
            )));
        }
        if self.width() == 0 {
            return Err(LatticeError::ConfigError(format!(
                "mesh_size {} exceeds pitch {}: mesh has no cells",
                self.mesh_size, self.pitch
            )));
        }
        self.fuel.validate("fuel")?;
        self.moderator.validate("moderator")?;
        self.solver.validate()
    }

    /// Cells per side: floor(pitch / mesh_size).
    pub fn width(&self) -> usize {
        let cells = (self.pitch / self.mesh_size).floor();
        if cells.is_finite() && cells >= 0.0 {
            cells as usize
        } else {
            0
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> LatticeResult<()> {
        if self.max_iterations == 0 {
            return Err(LatticeError::ConfigError(
                "max_iterations must be >= 1".to_string(),
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(LatticeError::ConfigError(format!(
                "tolerance must be finite and > 0, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}
