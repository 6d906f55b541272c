// ─────────────────────────────────────────────────────────────────────
// SCPN Lattice Sn — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use std::f64::consts::PI;

/// Full solid angle (sr).
pub const FOUR_PI: f64 = 4.0 * PI;

/// Reference lattice pitch (cm), typical PWR pin pitch.
pub const DEFAULT_PITCH_CM: f64 = 1.26;

/// Reference fuel pellet diameter (cm).
pub const DEFAULT_FUEL_DIAMETER_CM: f64 = 0.70;

/// Reference cell edge length (cm).
pub const DEFAULT_MESH_SIZE_CM: f64 = 0.1;

/// Reference Sn order.
pub const DEFAULT_ORDER: usize = 4;

/// Fuel total cross-section (1/cm). Black absorber limit.
pub const FUEL_SIGMA_T: f64 = 100.0;

/// Fuel isotropic source, normalised to one neutron per cm³ over 4π.
pub const FUEL_SOURCE: f64 = 1.0 / FOUR_PI;

/// Moderator total cross-section (1/cm).
pub const MODERATOR_SIGMA_T: f64 = 0.25;

/// Moderator carries no source.
pub const MODERATOR_SOURCE: f64 = 0.0;

/// Reference convergence tolerance on the L2 change of the scalar flux.
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Reference reflective iteration budget.
pub const DEFAULT_MAX_ITERATIONS: usize = 50;
