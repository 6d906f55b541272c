// ─────────────────────────────────────────────────────────────────────
// SCPN Lattice Sn — Mesh
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Structured pin-cell mesh: cell grid, angular flux, edge buffers and the
//! material registry.
//!
//! Layouts (row = y, col = x, cell id = y·width + x):
//! - `ang_flux[[angle, y, x]]`, four contiguous quadrant blocks of na/4;
//! - `edges[[edge, slot_angle, position]]`, 4 edges × na/2 × width;
//! - scalar flux double buffer `[y, x]`.

use crate::flux::ScalarFlux;
use crate::geometry::PinCell;
use crate::material::{Material, MaterialId, MaterialRegistry};
use lattice_math::quadrature::{LevelSymmetric, QuadratureProvider, QuadratureSet};
use lattice_types::config::CaseConfig;
use lattice_types::constants::DEFAULT_TOLERANCE;
use lattice_types::error::{LatticeError, LatticeResult};
use lattice_types::state::{Geometry, MaterialKind};
use ndarray::{s, Array2, Array3, ArrayView1, ArrayView2, ArrayView3};

/// Read-only view of one cell.
#[derive(Debug, Clone)]
pub struct CellView<'a> {
    pub id: usize,
    pub row: usize,
    pub col: usize,
    pub material: &'a Material,
    /// Normalised scalar flux of the latest iteration.
    pub flux: f64,
    /// Scalar flux of the iteration before.
    pub old_flux: f64,
    /// Angular flux over all tracked angles, quadrant-blocked.
    pub ang_flux: ArrayView1<'a, f64>,
}

/// Pin-cell Sn mesh.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub(crate) pin: PinCell,
    pub(crate) width: usize,
    pub(crate) quadrature: QuadratureSet,
    pub(crate) materials: MaterialRegistry,
    pub(crate) fuel: MaterialId,
    pub(crate) moderator: MaterialId,
    pub(crate) cell_material: Array2<MaterialId>,
    /// Σt per cell, refreshed on every assignment.
    pub(crate) sigma_t: Array2<f64>,
    /// Source per cell, refreshed on every assignment.
    pub(crate) source: Array2<f64>,
    pub(crate) ang_flux: Array3<f64>,
    pub(crate) edges: Array3<f64>,
    pub(crate) scalar: ScalarFlux,
    pub(crate) tolerance: f64,
    pub(crate) parallel_angles: bool,
}

impl Mesh {
    /// Build the mesh and assign materials from the geometry rule.
    pub fn new(
        pin: PinCell,
        quadrature: QuadratureSet,
        fuel: Material,
        moderator: Material,
    ) -> LatticeResult<Self> {
        pin.validate()?;
        if quadrature.num_angles == 0 || quadrature.num_angles % 4 != 0 {
            return Err(LatticeError::ConfigError(format!(
                "quadrature must carry a positive multiple of 4 angles, got {}",
                quadrature.num_angles
            )));
        }
        if quadrature.num_angles != 4 * quadrature.num_angles_per_octant
            || quadrature.mu.len() != quadrature.num_angles_per_octant
            || quadrature.eta.len() != quadrature.num_angles_per_octant
            || quadrature.weight.len() != quadrature.num_angles_per_octant
        {
            return Err(LatticeError::ConfigError(
                "quadrature arrays disagree with num_angles_per_octant".to_string(),
            ));
        }
        if fuel.kind() != MaterialKind::Fuel || moderator.kind() != MaterialKind::Moderator {
            return Err(LatticeError::ConfigError(
                "fuel and moderator materials must carry matching kinds".to_string(),
            ));
        }

        let width = pin.width();
        let na = quadrature.num_angles;

        let mut materials = MaterialRegistry::new();
        let fuel_id = materials.register(fuel);
        let moderator_id = materials.register(moderator);

        let mut mesh = Mesh {
            pin,
            width,
            quadrature,
            materials,
            fuel: fuel_id,
            moderator: moderator_id,
            cell_material: Array2::from_elem((width, width), moderator_id),
            sigma_t: Array2::zeros((width, width)),
            source: Array2::zeros((width, width)),
            ang_flux: Array3::zeros((na, width, width)),
            edges: Array3::zeros((4, na / 2, width)),
            scalar: ScalarFlux::new(width),
            tolerance: DEFAULT_TOLERANCE,
            parallel_angles: false,
        };
        mesh.assign_materials();
        Ok(mesh)
    }

    /// Validate a case and build its mesh with level-symmetric quadrature.
    pub fn from_config(cfg: &CaseConfig) -> LatticeResult<Self> {
        Self::from_config_with(cfg, &LevelSymmetric)
    }

    pub fn from_config_with(
        cfg: &CaseConfig,
        provider: &dyn QuadratureProvider,
    ) -> LatticeResult<Self> {
        cfg.validate()?;
        let quadrature = provider.quadrature(cfg.order)?;
        let fuel = Material::from_params(MaterialKind::Fuel, &cfg.fuel)?;
        let moderator = Material::from_params(MaterialKind::Moderator, &cfg.moderator)?;
        let mut mesh = Self::new(PinCell::from_config(cfg), quadrature, fuel, moderator)?;
        mesh.set_tolerance(cfg.solver.tolerance)?;
        mesh.set_parallel_angles(cfg.solver.parallel_angles);
        Ok(mesh)
    }

    /// Classify every cell and refresh the cached cross-sections.
    /// Idempotent: safe to call again after a solve.
    pub fn assign_materials(&mut self) {
        for y in 0..self.width {
            for x in 0..self.width {
                let id = match self.pin.classify(x, y) {
                    MaterialKind::Fuel => self.fuel,
                    MaterialKind::Moderator => self.moderator,
                };
                self.cell_material[[y, x]] = id;
            }
        }
        self.refresh_cross_sections();
    }

    /// Switch fuel shape and reclassify.
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.pin.geometry = geometry;
        self.assign_materials();
    }

    pub fn set_fuel(&mut self, fuel: Material) -> LatticeResult<()> {
        if fuel.kind() != MaterialKind::Fuel {
            return Err(LatticeError::ConfigError(
                "set_fuel expects a fuel material".to_string(),
            ));
        }
        self.materials.replace(self.fuel, fuel);
        self.refresh_cross_sections();
        Ok(())
    }

    pub fn set_moderator(&mut self, moderator: Material) -> LatticeResult<()> {
        if moderator.kind() != MaterialKind::Moderator {
            return Err(LatticeError::ConfigError(
                "set_moderator expects a moderator material".to_string(),
            ));
        }
        self.materials.replace(self.moderator, moderator);
        self.refresh_cross_sections();
        Ok(())
    }

    pub fn set_tolerance(&mut self, tolerance: f64) -> LatticeResult<()> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(LatticeError::ConfigError(format!(
                "tolerance must be finite and > 0, got {tolerance}"
            )));
        }
        self.tolerance = tolerance;
        Ok(())
    }

    pub fn set_parallel_angles(&mut self, parallel: bool) {
        self.parallel_angles = parallel;
    }

    fn refresh_cross_sections(&mut self) {
        let materials = &self.materials;
        ndarray::Zip::from(&mut self.sigma_t)
            .and(&mut self.source)
            .and(&self.cell_material)
            .for_each(|sigma, q, &id| {
                let m = materials.get(id);
                *sigma = m.sigma_t();
                *q = m.source();
            });
    }

    /// Zero the cell angular fluxes and every edge buffer.
    pub fn clear_angular_flux(&mut self) {
        self.ang_flux.fill(0.0);
        self.edges.fill(0.0);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn mesh_size(&self) -> f64 {
        self.pin.mesh_size
    }

    pub fn pin(&self) -> &PinCell {
        &self.pin
    }

    pub fn num_cells(&self) -> usize {
        self.width * self.width
    }

    pub fn num_angles(&self) -> usize {
        self.quadrature.num_angles
    }

    pub fn quadrature(&self) -> &QuadratureSet {
        &self.quadrature
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn material(&self, id: MaterialId) -> &Material {
        self.materials.get(id)
    }

    pub fn fuel_id(&self) -> MaterialId {
        self.fuel
    }

    pub fn moderator_id(&self) -> MaterialId {
        self.moderator
    }

    /// Material kind of every cell, `[y, x]`.
    pub fn material_map(&self) -> Array2<MaterialKind> {
        self.cell_material
            .mapv(|id| self.materials.get(id).kind())
    }

    /// Normalised scalar flux of the latest iteration, `[y, x]`.
    pub fn scalar_flux(&self) -> ArrayView2<'_, f64> {
        self.scalar.current()
    }

    /// Scalar flux of the iteration before, `[y, x]`.
    pub fn old_scalar_flux(&self) -> ArrayView2<'_, f64> {
        self.scalar.previous()
    }

    /// Cell angular flux, `[angle, y, x]`.
    pub fn angular_flux(&self) -> ArrayView3<'_, f64> {
        self.ang_flux.view()
    }

    /// Edge buffers, `[edge, slot_angle, position]`.
    pub fn edge_flux(&self) -> ArrayView3<'_, f64> {
        self.edges.view()
    }

    pub fn cell(&self, row: usize, col: usize) -> LatticeResult<CellView<'_>> {
        if row >= self.width || col >= self.width {
            return Err(LatticeError::GridOutOfBounds { row, col });
        }
        Ok(CellView {
            id: row * self.width + col,
            row,
            col,
            material: self.materials.get(self.cell_material[[row, col]]),
            flux: self.scalar.current()[[row, col]],
            old_flux: self.scalar.previous()[[row, col]],
            ang_flux: self.ang_flux.slice(s![.., row, col]),
        })
    }

    /// Cell view by row-major id.
    pub fn cell_by_id(&self, id: usize) -> LatticeResult<CellView<'_>> {
        self.cell(id / self.width.max(1), id % self.width.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_types::config::CaseConfig;

    #[test]
    fn test_mesh_from_reference_config() {
        let mesh = Mesh::from_config(&CaseConfig::default()).unwrap();
        assert_eq!(mesh.width(), 12);
        assert_eq!(mesh.num_cells(), 144);
        assert_eq!(mesh.num_angles(), 12);
        assert_eq!(mesh.angular_flux().shape(), &[12, 12, 12]);
        assert_eq!(mesh.edge_flux().shape(), &[4, 6, 12]);
        assert_eq!(mesh.scalar_flux().shape(), &[12, 12]);
        assert!(mesh.angular_flux().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_every_cell_has_one_material() {
        let mesh = Mesh::from_config(&CaseConfig::default()).unwrap();
        let map = mesh.material_map();
        let fuel = map.iter().filter(|k| k.is_fuel()).count();
        let moderator = map.iter().filter(|k| !k.is_fuel()).count();
        assert_eq!(fuel + moderator, mesh.num_cells());
        assert_eq!(fuel, 49);
        assert_eq!(mesh.cell(6, 6).unwrap().material.kind(), MaterialKind::Fuel);
        assert_eq!(mesh.cell(0, 0).unwrap().material.kind(), MaterialKind::Moderator);
    }

    #[test]
    fn test_reassignment_is_idempotent() {
        let mut mesh = Mesh::from_config(&CaseConfig::default()).unwrap();
        let before = mesh.material_map();
        mesh.assign_materials();
        assert_eq!(before, mesh.material_map());

        mesh.set_geometry(Geometry::Circle);
        let circle = mesh.material_map();
        mesh.assign_materials();
        assert_eq!(circle, mesh.material_map());
        assert_ne!(before, circle);
    }

    #[test]
    fn test_cached_cross_sections_follow_registry() {
        let mut mesh = Mesh::from_config(&CaseConfig::default()).unwrap();
        assert!((mesh.sigma_t[[6, 6]] - 100.0).abs() < 1e-12);
        assert!((mesh.sigma_t[[0, 0]] - 0.25).abs() < 1e-12);
        mesh.set_fuel(Material::new(MaterialKind::Fuel, 10.0, 0.5).unwrap())
            .unwrap();
        assert!((mesh.sigma_t[[6, 6]] - 10.0).abs() < 1e-12);
        assert!((mesh.source[[6, 6]] - 0.5).abs() < 1e-12);
        assert!(mesh
            .set_moderator(Material::new(MaterialKind::Fuel, 1.0, 0.0).unwrap())
            .is_err());
    }

    #[test]
    fn test_cell_view_and_bounds() {
        let mesh = Mesh::from_config(&CaseConfig::default()).unwrap();
        let cell = mesh.cell(2, 5).unwrap();
        assert_eq!(cell.id, 2 * 12 + 5);
        assert_eq!(cell.ang_flux.len(), 12);
        let same = mesh.cell_by_id(29).unwrap();
        assert_eq!((same.row, same.col), (2, 5));
        assert!(matches!(
            mesh.cell(12, 0),
            Err(LatticeError::GridOutOfBounds { row: 12, col: 0 })
        ));
    }

    #[test]
    fn test_unsupported_order_fails_fast() {
        let cfg = CaseConfig {
            order: 24,
            ..CaseConfig::default()
        };
        assert!(matches!(
            Mesh::from_config(&cfg),
            Err(LatticeError::UnsupportedOrder { order: 24, .. })
        ));
    }

    #[test]
    fn test_rejects_swapped_material_kinds() {
        let cfg = CaseConfig::default();
        let q = lattice_math::quadrature::level_symmetric(4).unwrap();
        let fuel = Material::new(MaterialKind::Fuel, 100.0, 0.08).unwrap();
        let moderator = Material::new(MaterialKind::Moderator, 0.25, 0.0).unwrap();
        assert!(Mesh::new(PinCell::from_config(&cfg), q, moderator, fuel).is_err());
    }
}
