// ─────────────────────────────────────────────────────────────────────
// SCPN Lattice Sn — Case Pipeline
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! One pin-cell case end to end: isolated pin, infinite lattice, Dancoff.

use crate::mesh::Mesh;
use crate::reaction::dancoff_factor;
use lattice_types::config::CaseConfig;
use lattice_types::error::LatticeResult;
use lattice_types::state::{BoundaryCondition, DancoffResult};

/// Build the mesh, run the isolated (vacuum, one pass) and lattice
/// (reflective) solves and combine their fuel reaction rates.
pub fn run_case(cfg: &CaseConfig) -> LatticeResult<DancoffResult> {
    let mut mesh = Mesh::from_config(cfg)?;
    run_case_on(cfg, &mut mesh)
}

/// [`run_case`] on a prepared mesh, which keeps the lattice flux afterwards.
pub fn run_case_on(cfg: &CaseConfig, mesh: &mut Mesh) -> LatticeResult<DancoffResult> {
    mesh.assign_materials();
    let isolated = mesh.solve(BoundaryCondition::Vacuum, 1)?;
    let lattice = mesh.solve(BoundaryCondition::Reflective, cfg.solver.max_iterations)?;

    let rr_isolated = isolated.rates.fuel;
    let rr_lattice = lattice.rates.fuel;
    let rr_total = lattice.rates.total;
    let dancoff = dancoff_factor(rr_isolated, rr_lattice, rr_total)?;

    Ok(DancoffResult {
        case_name: cfg.case_name.clone(),
        width: mesh.width(),
        num_angles: mesh.num_angles(),
        rr_isolated,
        rr_lattice,
        rr_total,
        flux_ratio: lattice.rates.flux_ratio,
        dancoff,
        isolated,
        lattice,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_types::error::LatticeError;
    use lattice_types::state::Geometry;
    use std::path::PathBuf;

    fn project_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
    }

    #[test]
    fn test_reference_case() {
        let result = run_case(&CaseConfig::default()).unwrap();
        assert_eq!(result.width, 12);
        assert_eq!(result.num_angles, 12);
        assert!(result.isolated.converged);
        for v in [
            result.rr_isolated,
            result.rr_lattice,
            result.rr_total,
            result.flux_ratio,
            result.dancoff,
        ] {
            assert!(v.is_finite());
        }
        assert!(
            (0.0..=1.0).contains(&result.dancoff),
            "dancoff = {}",
            result.dancoff
        );
        // The lattice returns flux the isolated pin loses.
        assert!(result.rr_lattice >= result.rr_isolated);
        assert!(result.lattice.iterations <= 50);
    }

    #[test]
    fn test_case_from_config_file() {
        let path = project_root().join("pin_cell_config.json");
        let cfg = CaseConfig::from_file(path.to_str().unwrap()).unwrap();
        let result = run_case(&cfg).unwrap();
        assert_eq!(result.case_name, "PWR-Pin-Square-S4");
        assert!((0.0..=1.0).contains(&result.dancoff));
    }

    #[test]
    fn test_circle_case() {
        let cfg = CaseConfig {
            geometry: Geometry::Circle,
            ..CaseConfig::default()
        };
        let result = run_case(&cfg).unwrap();
        assert!(result.dancoff.is_finite());
        assert!((0.0..=1.0).contains(&result.dancoff));
    }

    #[test]
    fn test_rerun_on_same_mesh_is_identical() {
        let cfg = CaseConfig::default();
        let mut mesh = Mesh::from_config(&cfg).unwrap();
        let first = run_case_on(&cfg, &mut mesh).unwrap();
        mesh.clear_angular_flux();
        let second = run_case_on(&cfg, &mut mesh).unwrap();
        assert_eq!(first.rr_isolated, second.rr_isolated);
        assert_eq!(first.dancoff, second.dancoff);
    }

    #[test]
    fn test_invalid_case_fails_before_sweeping() {
        let cfg = CaseConfig {
            fuel_diameter: 2.0,
            ..CaseConfig::default()
        };
        assert!(matches!(run_case(&cfg), Err(LatticeError::ConfigError(_))));
    }
}
