// ─────────────────────────────────────────────────────────────────────
// SCPN Lattice Sn — Flux Map Export
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Scalar-flux and material snapshots for plotting.
//!
//! `.npz` layout: `flux` (f64, `[y, x]`), `fuel_mask` (u8, 1 = fuel) and
//! `mesh_size` (f64, one element).

use crate::mesh::Mesh;
use lattice_math::norms::min_max;
use lattice_types::error::{LatticeError, LatticeResult};
use ndarray::{Array1, Array2};
use ndarray_npy::{NpzReader, NpzWriter};
use std::fs::File;

/// Snapshot of the normalised scalar flux and the fuel layout.
#[derive(Debug, Clone, PartialEq)]
pub struct FluxMap {
    pub width: usize,
    /// Cell edge length [cm].
    pub mesh_size: f64,
    pub flux: Array2<f64>,
    pub fuel_mask: Array2<u8>,
}

impl Mesh {
    pub fn flux_map(&self) -> FluxMap {
        FluxMap {
            width: self.width,
            mesh_size: self.pin.mesh_size,
            flux: self.scalar_flux().to_owned(),
            fuel_mask: self.material_map().mapv(|k| u8::from(k.is_fuel())),
        }
    }
}

impl FluxMap {
    /// Flux rescaled to [0, 1] by its minimum and maximum.
    pub fn scaled(&self) -> LatticeResult<Array2<f64>> {
        let (lo, hi) = min_max(self.flux.view()).ok_or_else(|| {
            LatticeError::degenerate("flux range", "flux map has no cells")
        })?;
        let range = hi - lo;
        if range <= 0.0 || !range.is_finite() {
            return Err(LatticeError::degenerate(
                "flux range",
                format!("cannot scale flux with min {lo:e} and max {hi:e}"),
            ));
        }
        Ok(self.flux.mapv(|v| (v - lo) / range))
    }

    pub fn write_npz(&self, path: &str) -> LatticeResult<()> {
        let file = File::create(path)?;
        let mut writer = NpzWriter::new(file);
        let export = |e: ndarray_npy::WriteNpzError| {
            LatticeError::Export(format!("Failed to write npz '{path}': {e}"))
        };
        writer.add_array("flux", &self.flux).map_err(export)?;
        writer.add_array("fuel_mask", &self.fuel_mask).map_err(export)?;
        writer
            .add_array("mesh_size", &Array1::from_elem(1, self.mesh_size))
            .map_err(export)?;
        writer.finish().map_err(export)?;
        Ok(())
    }

    pub fn from_npz(path: &str) -> LatticeResult<Self> {
        let file = File::open(path)?;
        let mut npz = NpzReader::new(file)
            .map_err(|e| LatticeError::Export(format!("Failed to open npz '{path}': {e}")))?;

        let flux: Array2<f64> = read_array(&mut npz, "flux")?;
        let fuel_mask: Array2<u8> = read_array(&mut npz, "fuel_mask")?;
        let mesh_size: Array1<f64> = read_array(&mut npz, "mesh_size")?;

        let width = flux.nrows();
        if flux.ncols() != width || fuel_mask.dim() != flux.dim() {
            return Err(LatticeError::Export(format!(
                "npz '{path}': flux {:?} and fuel_mask {:?} must be matching squares",
                flux.dim(),
                fuel_mask.dim()
            )));
        }
        let mesh_size = mesh_size.first().copied().ok_or_else(|| {
            LatticeError::Export(format!("npz '{path}': mesh_size is empty"))
        })?;

        Ok(FluxMap {
            width,
            mesh_size,
            flux,
            fuel_mask,
        })
    }
}

fn read_array<A, D>(npz: &mut NpzReader<File>, key: &str) -> LatticeResult<ndarray::Array<A, D>>
where
    A: ndarray_npy::ReadableElement,
    D: ndarray::Dimension,
{
    npz.by_name::<ndarray::OwnedRepr<A>, D>(&format!("{key}.npy"))
        .or_else(|_| npz.by_name::<ndarray::OwnedRepr<A>, D>(key))
        .map_err(|e| LatticeError::Export(format!("Failed to read {key} from npz: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_types::config::CaseConfig;
    use lattice_types::state::BoundaryCondition;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_npz(tag: &str) -> std::path::PathBuf {
        let epoch_ns = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!(
            "lattice_sn_{tag}_{}_{}.npz",
            std::process::id(),
            epoch_ns
        ))
    }

    fn solved_mesh() -> Mesh {
        let mut mesh = Mesh::from_config(&CaseConfig::default()).unwrap();
        mesh.solve(BoundaryCondition::Reflective, 20).unwrap();
        mesh
    }

    #[test]
    fn test_flux_map_matches_mesh() {
        let mesh = solved_mesh();
        let map = mesh.flux_map();
        assert_eq!(map.width, 12);
        assert_eq!(map.flux, mesh.scalar_flux());
        assert_eq!(map.fuel_mask.iter().filter(|&&m| m == 1).count(), 49);
        assert_eq!(map.fuel_mask[[6, 6]], 1);
        assert_eq!(map.fuel_mask[[0, 0]], 0);
    }

    #[test]
    fn test_scaled_spans_unit_interval() {
        let map = solved_mesh().flux_map();
        let scaled = map.scaled().unwrap();
        let (lo, hi) = min_max(scaled.view()).unwrap();
        assert!(lo.abs() < 1e-12);
        assert!((hi - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_flat_flux_is_degenerate() {
        let mut map = solved_mesh().flux_map();
        map.flux.fill(1.0);
        assert!(matches!(
            map.scaled(),
            Err(LatticeError::Degenerate {
                quantity: "flux range",
                ..
            })
        ));
    }

    #[test]
    fn test_npz_export_reads_back() {
        let map = solved_mesh().flux_map();
        let path = temp_npz("flux_map");
        map.write_npz(path.to_str().unwrap()).unwrap();
        let loaded = FluxMap::from_npz(path.to_str().unwrap()).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, map);
    }

    #[test]
    fn test_missing_npz_is_io_error() {
        let path = temp_npz("missing");
        assert!(matches!(
            FluxMap::from_npz(path.to_str().unwrap()),
            Err(LatticeError::Io(_))
        ));
    }
}
