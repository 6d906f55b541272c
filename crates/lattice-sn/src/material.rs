// ─────────────────────────────────────────────────────────────────────
// SCPN Lattice Sn — Materials
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! One-group materials and the mesh-owned registry cells point into.

use lattice_types::config::MaterialParams;
use lattice_types::error::{LatticeError, LatticeResult};
use lattice_types::state::MaterialKind;

/// Immutable one-group material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    kind: MaterialKind,
    sigma_t: f64,
    source: f64,
}

impl Material {
    /// Validated constructor: Σt finite and > 0, source finite and >= 0.
    pub fn new(kind: MaterialKind, sigma_t: f64, source: f64) -> LatticeResult<Self> {
        if !sigma_t.is_finite() || sigma_t <= 0.0 {
            return Err(LatticeError::ConfigError(format!(
                "{kind:?} sigma_t must be finite and > 0, got {sigma_t}"
            )));
        }
        if !source.is_finite() || source < 0.0 {
            return Err(LatticeError::ConfigError(format!(
                "{kind:?} source must be finite and >= 0, got {source}"
            )));
        }
        Ok(Material {
            kind,
            sigma_t,
            source,
        })
    }

    pub fn from_params(kind: MaterialKind, params: &MaterialParams) -> LatticeResult<Self> {
        Self::new(kind, params.sigma_t, params.source)
    }

    pub fn kind(&self) -> MaterialKind {
        self.kind
    }

    /// Total cross-section [1/cm].
    pub fn sigma_t(&self) -> f64 {
        self.sigma_t
    }

    /// Isotropic source per steradian.
    pub fn source(&self) -> f64 {
        self.source
    }
}

/// Handle into a [`MaterialRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(usize);

impl MaterialId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Materials owned by a mesh. Cells hold a [`MaterialId`], never the material.
#[derive(Debug, Clone, Default)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    pub fn get(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }

    /// Swap the material behind an existing handle.
    pub fn replace(&mut self, id: MaterialId, material: Material) {
        self.materials[id.0] = material;
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
