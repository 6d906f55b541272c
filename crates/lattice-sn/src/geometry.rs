// ─────────────────────────────────────────────────────────────────────
// SCPN Lattice Sn — Pin-Cell Geometry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Square unit cell discretised into width × width cells, and the
//! fuel/moderator classifier.

use lattice_types::config::CaseConfig;
use lattice_types::error::{LatticeError, LatticeResult};
use lattice_types::state::{Geometry, MaterialKind};

/// Unit-cell dimensions and fuel shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinCell {
    /// Lattice pitch [cm].
    pub pitch: f64,
    /// Cell edge length [cm].
    pub mesh_size: f64,
    /// Fuel diameter [cm].
    pub fuel_diameter: f64,
    pub geometry: Geometry,
}

impl PinCell {
    pub fn from_config(cfg: &CaseConfig) -> Self {
        PinCell {
            pitch: cfg.pitch,
            mesh_size: cfg.mesh_size,
            fuel_diameter: cfg.fuel_diameter,
            geometry: cfg.geometry,
        }
    }

    pub fn validate(&self) -> LatticeResult<()> {
        if !self.mesh_size.is_finite() || self.mesh_size <= 0.0 {
            return Err(LatticeError::ConfigError(format!(
                "mesh_size must be finite and > 0, got {}",
                self.mesh_size
            )));
        }
        if !self.fuel_diameter.is_finite() || self.fuel_diameter < 0.0 {
            return Err(LatticeError::ConfigError(format!(
                "fuel_diameter must be finite and >= 0, got {}",
                self.fuel_diameter
            )));
        }
        if !self.pitch.is_finite() || self.pitch <= self.fuel_diameter {
            return Err(LatticeError::ConfigError(format!(
                "pitch {} must be finite and larger than fuel_diameter {}",
                self.pitch, self.fuel_diameter
            )));
        }
        if self.width() == 0 {
            return Err(LatticeError::ConfigError(format!(
                "mesh_size {} exceeds pitch {}: mesh has no cells",
                self.mesh_size, self.pitch
            )));
        }
        Ok(())
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

    /// Material of cell (x, y), x = column, y = row.
    pub fn classify(&self, x: usize, y: usize) -> MaterialKind {
        match self.geometry {
            Geometry::Square => self.classify_square(x, y),
            Geometry::Circle => self.classify_circle(x, y),
        }
    }

    /// Fuel half-width in whole cells.
    pub fn fuel_half_width(&self) -> usize {
        (self.fuel_diameter / self.mesh_size / 2.0).floor() as usize
    }

    /// Index of the first fuel column/row of the square fuel block.
    fn square_edge(&self) -> usize {
        (self.width() / 2).saturating_sub(self.fuel_half_width())
    }

    fn classify_square(&self, x: usize, y: usize) -> MaterialKind {
        let w = self.width();
        let edge = self.square_edge();
        let outside = |i: usize| i < edge || i > w - edge;
        if outside(x) || outside(y) {
            MaterialKind::Moderator
        } else {
            MaterialKind::Fuel
        }
    }

    fn classify_circle(&self, x: usize, y: usize) -> MaterialKind {
        if self.distance_from_center(x, y) <= self.fuel_diameter / 2.0 {
            MaterialKind::Fuel
        } else {
            MaterialKind::Moderator
        }
    }

    /// Distance from the centre of cell (x, y) to the centre of the mesh [cm].
    pub fn distance_from_center(&self, x: usize, y: usize) -> f64 {
        let h = self.mesh_size;
        let center = self.width() as f64 * h / 2.0;
        let cx = (x as f64 + 0.5) * h - center;
        let cy = (y as f64 + 0.5) * h - center;
        (cx * cx + cy * cy).sqrt()
    }
}
